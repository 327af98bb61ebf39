//! Export pipeline tests over a pre-authorized session.

use std::fs;
use std::path::Path;

use anyhow::Result;

use tg_exporter::client::MediaKind;
use tg_exporter::{
    CredentialStore, Credentials, Event, ExportFormat, ExportRequest, ExportedMessage,
};

use crate::support::{
    media_at, message_at, next_event, outgoing_at, spawn_worker, wait_for, ClientScript,
};

const SESSION_FILE: &str = "telegram.session";

/// Seed the data directory so the startup probe lands on an authorized
/// session, then spawn a worker over it.
fn authorized_script(messages: Vec<tg_exporter::client::HistoryMessage>) -> ClientScript {
    ClientScript {
        authorized: true,
        messages,
        ..ClientScript::default()
    }
}

fn seed_session(dir: &Path) {
    CredentialStore::new(dir)
        .save(&Credentials {
            api_id: 1,
            api_hash: "h".to_string(),
        })
        .unwrap();
    fs::write(dir.join(SESSION_FILE), b"opaque").unwrap();
}

fn export_request(dir: &Path, name: &str, format: ExportFormat) -> ExportRequest {
    ExportRequest {
        target: "@alice".to_string(),
        output_name: dir.join(name).to_string_lossy().into_owned(),
        format,
    }
}

#[tokio::test]
async fn export_writes_chronological_text() -> Result<()> {
    let dir = tempfile::tempdir()?;
    seed_session(dir.path());

    // Delivered newest first; the file must come out oldest first
    let messages = vec![
        message_at(2, "three"),
        outgoing_at(1, "two"),
        message_at(0, "one"),
    ];
    let (handle, mut events, _log) = spawn_worker(authorized_script(messages), dir.path());
    next_event(&mut events).await;

    handle.export(export_request(dir.path(), "chat", ExportFormat::Text))?;
    let seen = wait_for(&mut events, |event| matches!(event, Event::Completed(_))).await;
    assert!(seen.contains(&Event::Status("Finding user '@alice'...".to_string())));
    assert!(seen.contains(&Event::Status("Starting message export...".to_string())));
    assert_eq!(
        seen.last(),
        Some(&Event::Completed(
            "Success! Exported 3 messages (3 scanned).".to_string()
        ))
    );

    let body = fs::read_to_string(dir.path().join("chat.txt"))?;
    assert_eq!(
        body,
        "[2024-05-01 12:00:00] Alice: one\n\
         [2024-05-01 12:01:00] You: two\n\
         [2024-05-01 12:02:00] Alice: three\n"
    );
    Ok(())
}

#[tokio::test]
async fn export_drops_empty_messages_but_still_counts_them() -> Result<()> {
    let dir = tempfile::tempdir()?;
    seed_session(dir.path());

    let messages = vec![
        message_at(2, "kept"),
        message_at(1, ""), // no media, no text: dropped
        media_at(0, MediaKind::Photo),
    ];
    let (handle, mut events, _log) = spawn_worker(authorized_script(messages), dir.path());
    next_event(&mut events).await;

    handle.export(export_request(dir.path(), "chat", ExportFormat::Text))?;
    let seen = wait_for(&mut events, |event| matches!(event, Event::Completed(_))).await;
    assert_eq!(
        seen.last(),
        Some(&Event::Completed(
            "Success! Exported 2 messages (3 scanned).".to_string()
        ))
    );

    let body = fs::read_to_string(dir.path().join("chat.txt"))?;
    assert_eq!(body.lines().count(), 2);
    assert!(body.contains("[Photo]"));
    Ok(())
}

#[tokio::test]
async fn export_json_round_trips_with_media_tags() -> Result<()> {
    let dir = tempfile::tempdir()?;
    seed_session(dir.path());

    let messages = vec![
        media_at(
            2,
            MediaKind::Document {
                file_name: Some("report.pdf".to_string()),
            },
        ),
        media_at(
            1,
            MediaKind::Sticker {
                emoji: Some("😀".to_string()),
            },
        ),
        message_at(0, "hello"),
    ];
    let (handle, mut events, _log) = spawn_worker(authorized_script(messages), dir.path());
    next_event(&mut events).await;

    handle.export(export_request(dir.path(), "chat", ExportFormat::Json))?;
    wait_for(&mut events, |event| matches!(event, Event::Completed(_))).await;

    let body = fs::read_to_string(dir.path().join("chat.json"))?;
    let records: Vec<ExportedMessage> = serde_json::from_str(&body)?;
    assert_eq!(records.len(), 3);
    assert_eq!(records[0].content, "hello");
    assert!(records[1].content.starts_with("[Sticker 😀]"));
    assert_eq!(records[2].content, "[File: report.pdf]");
    assert_eq!(records[0].timestamp, "2024-05-01 12:00:00");
    Ok(())
}

#[tokio::test]
async fn export_reports_progress_every_hundred_scanned() -> Result<()> {
    let dir = tempfile::tempdir()?;
    seed_session(dir.path());

    let messages: Vec<_> = (0u32..205)
        .map(|i| message_at(i % 60, &format!("m{i}")))
        .collect();
    let (handle, mut events, _log) = spawn_worker(authorized_script(messages), dir.path());
    next_event(&mut events).await;

    handle.export(export_request(dir.path(), "chat", ExportFormat::Text))?;
    let seen = wait_for(&mut events, |event| matches!(event, Event::Completed(_))).await;

    let progress: Vec<_> = seen
        .iter()
        .filter(|event| {
            matches!(event, Event::Status(text) if text.ends_with("messages so far..."))
        })
        .collect();
    assert_eq!(
        progress,
        vec![
            &Event::Status("Fetched 100 messages so far...".to_string()),
            &Event::Status("Fetched 200 messages so far...".to_string()),
        ]
    );
    Ok(())
}

#[tokio::test]
async fn resolution_failure_writes_no_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    seed_session(dir.path());

    let script = ClientScript {
        resolve_fails: true,
        ..authorized_script(vec![message_at(0, "never exported")])
    };
    let (handle, mut events, _log) = spawn_worker(script, dir.path());
    next_event(&mut events).await;

    handle.export(export_request(dir.path(), "chat", ExportFormat::Text))?;
    let seen = wait_for(&mut events, |event| matches!(event, Event::Failed(_))).await;
    match seen.last() {
        Some(Event::Failed(message)) => {
            assert!(message.starts_with("Error: "), "unexpected: {message}");
            assert!(message.contains("@alice"));
        }
        other => panic!("expected Failed, got {other:?}"),
    }
    assert!(!dir.path().join("chat.txt").exists());
    Ok(())
}

#[tokio::test]
async fn export_without_session_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let (handle, mut events, _log) = spawn_worker(ClientScript::default(), dir.path());
    next_event(&mut events).await;

    handle.export(export_request(dir.path(), "chat", ExportFormat::Text))?;
    let seen = wait_for(&mut events, |event| matches!(event, Event::Failed(_))).await;
    assert!(matches!(seen.last(), Some(Event::Failed(_))));
    assert!(!dir.path().join("chat.txt").exists());
    Ok(())
}

#[tokio::test]
async fn export_validation_is_synchronous() {
    let dir = tempfile::tempdir().unwrap();
    let (handle, mut events, _log) = spawn_worker(ClientScript::default(), dir.path());
    next_event(&mut events).await;

    let request = ExportRequest {
        target: String::new(),
        output_name: "chat".to_string(),
        format: ExportFormat::Text,
    };
    assert!(handle.export(request).is_err());
    assert!(events.try_recv().is_err());
}

#[tokio::test]
async fn existing_extension_wins_over_format() -> Result<()> {
    let dir = tempfile::tempdir()?;
    seed_session(dir.path());

    let messages = vec![message_at(0, "hello")];
    let (handle, mut events, _log) = spawn_worker(authorized_script(messages), dir.path());
    next_event(&mut events).await;

    // The name keeps its .txt extension, the body is still JSON
    handle.export(export_request(dir.path(), "chat.txt", ExportFormat::Json))?;
    wait_for(&mut events, |event| matches!(event, Event::Completed(_))).await;

    let body = fs::read_to_string(dir.path().join("chat.txt"))?;
    let records: Vec<ExportedMessage> = serde_json::from_str(&body)?;
    assert_eq!(records.len(), 1);
    Ok(())
}
