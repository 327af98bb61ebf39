//! Export Pipeline
//!
//! Resolves the target conversation, streams its history (delivered newest
//! first), normalizes each message into a text record, then reverses and
//! serializes the whole set before a single write. The output file is only
//! created once the complete record set is in memory, so a failed export
//! never leaves a partial file behind.

use std::fs;
use std::path::PathBuf;

use crate::client::{HistoryMessage, MediaKind, Peer};
use crate::models::command::ExportRequest;
use crate::models::export::{ExportFormat, ExportReport, ExportedMessage};
use crate::services::viewer;
use crate::services::worker::Worker;
use crate::utils::error::AppResult;

/// Emit a progress event every this many scanned messages
const PROGRESS_INTERVAL: u64 = 100;

impl Worker {
    pub(crate) async fn handle_export(&mut self, request: ExportRequest) {
        match self.run_export(&request).await {
            Ok((report, path)) => {
                self.events.completed(format!(
                    "Success! Exported {} messages ({} scanned).",
                    report.exported, report.scanned
                ));
                viewer::open_in_viewer(&path);
            }
            Err(err) => self.events.failed(format!("Error: {err}")),
        }
    }

    async fn run_export(
        &mut self,
        request: &ExportRequest,
    ) -> AppResult<(ExportReport, PathBuf)> {
        let file_name = normalize_output_name(&request.output_name, request.format);

        self.events
            .status(format!("Finding user '{}'...", request.target));
        let peer = self.client_mut()?.resolve_peer(&request.target).await?;

        self.events.status("Starting message export...");
        let mut history = self.client_mut()?.open_history(&peer).await?;

        let mut records = Vec::new();
        let mut scanned: u64 = 0;
        while let Some(message) = history.next().await? {
            scanned += 1;
            if let Some(content) = render_content(&message) {
                records.push(ExportedMessage {
                    timestamp: message.date.format("%Y-%m-%d %H:%M:%S").to_string(),
                    sender: sender_label(&message, &peer, &request.target),
                    content,
                });
            }
            if scanned % PROGRESS_INTERVAL == 0 {
                self.events
                    .status(format!("Fetched {scanned} messages so far..."));
            }
        }

        // Delivery order is newest first; the file is chronological.
        records.reverse();

        let body = serialize_records(&records, request.format)?;
        let path = PathBuf::from(file_name);
        fs::write(&path, body)?;

        let report = ExportReport {
            scanned,
            exported: records.len() as u64,
        };
        Ok((report, path))
    }
}

/// Append the format's extension unless the name already carries a
/// recognized one
pub(crate) fn normalize_output_name(output_name: &str, format: ExportFormat) -> String {
    let lower = output_name.to_lowercase();
    if lower.ends_with(".txt") || lower.ends_with(".json") {
        output_name.to_string()
    } else {
        format!("{output_name}.{}", format.extension())
    }
}

/// Media tag and raw text, space-joined; `None` when the message would be an
/// empty record
pub(crate) fn render_content(message: &HistoryMessage) -> Option<String> {
    let mut parts = Vec::new();
    if let Some(media) = &message.media {
        parts.push(media_tag(media));
    }
    if !message.text.is_empty() {
        parts.push(message.text.clone());
    }
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

fn media_tag(media: &MediaKind) -> String {
    match media {
        MediaKind::Photo => "[Photo]".to_string(),
        MediaKind::Video => "[Video]".to_string(),
        MediaKind::Voice => "[Voice Message]".to_string(),
        MediaKind::Sticker { emoji } => match emoji {
            Some(emoji) => format!("[Sticker {emoji}]"),
            None => "[Sticker]".to_string(),
        },
        MediaKind::Document { file_name } => {
            format!("[File: {}]", file_name.as_deref().unwrap_or("file"))
        }
    }
}

fn sender_label(message: &HistoryMessage, peer: &Peer, fallback: &str) -> String {
    if message.outgoing {
        "You".to_string()
    } else {
        peer.display_name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| fallback.to_string())
    }
}

pub(crate) fn serialize_records(
    records: &[ExportedMessage],
    format: ExportFormat,
) -> AppResult<String> {
    match format {
        ExportFormat::Json => Ok(serde_json::to_string_pretty(records)?),
        ExportFormat::Text => {
            let mut out = String::new();
            for record in records {
                out.push_str(&format!(
                    "[{}] {}: {}\n",
                    record.timestamp, record.sender, record.content
                ));
            }
            Ok(out)
        }
    }
}
