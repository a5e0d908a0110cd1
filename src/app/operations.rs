//! Upload, initialize and session-list actions.
//!
//! These report through the status banner (and the odd system message);
//! failures are shown to the user with the backend's own error text and
//! never abort the session.

use crate::api::{ProcessedDocuments, SessionSummary, UploadFile};
use crate::error::ApiError;
use crate::render::{Message, render, render_session_list};
use crate::session::SessionController;
use crate::ui::Severity;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const FALLBACK_FILE_NAME: &str = "document.pdf";

async fn read_upload(path: &Path) -> anyhow::Result<UploadFile> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map_or_else(|| FALLBACK_FILE_NAME.to_string(), |n| n.to_string_lossy().into_owned());
    Ok(UploadFile { file_name, bytes })
}

fn report_failure(ctl: &mut SessionController, err: &ApiError, transport_label: &str) {
    let message = if err.is_backend_error() {
        format!("❌ Error: {}", err.user_message())
    } else {
        format!("❌ {transport_label}: {err}")
    };
    ctl.view_mut().status.show(message, Severity::Error);
}

/// Sends local files to the backend for indexing. An empty list is a no-op.
pub async fn upload_documents(
    ctl: &mut SessionController,
    paths: &[PathBuf],
) -> Option<ProcessedDocuments> {
    if paths.is_empty() {
        return None;
    }
    ctl.view_mut()
        .status
        .show("Uploading and processing documents...", Severity::Info);

    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        match read_upload(path).await {
            Ok(file) => files.push(file),
            Err(e) => {
                warn!("could not read upload: {e:#}");
                ctl.view_mut()
                    .status
                    .show(format!("❌ Upload failed: {e:#}"), Severity::Error);
                return None;
            }
        }
    }

    let backend = ctl.backend().clone();
    match backend.upload_documents(files).await {
        Ok(processed) => {
            info!(files = processed.files_processed.len(), "documents uploaded");
            ctl.view_mut()
                .status
                .show(format!("✅ {}", processed.message), Severity::Success);
            let note = format!(
                "Documents processed successfully: {}",
                processed.files_processed.join(", ")
            );
            ctl.view_mut().transcript.push(render(&Message::System(note)));
            Some(processed)
        }
        Err(e) => {
            warn!(error = %e, "upload failed");
            report_failure(ctl, &e, "Upload failed");
            None
        }
    }
}

/// Asks the backend to index the PDFs it already has on disk.
pub async fn initialize_with_existing_pdfs(
    ctl: &mut SessionController,
) -> Option<ProcessedDocuments> {
    ctl.view_mut()
        .status
        .show("Initializing with existing PDF files...", Severity::Info);

    let backend = ctl.backend().clone();
    match backend.initialize_with_existing_pdfs().await {
        Ok(processed) => {
            info!(files = processed.files_processed.len(), "initialized with existing pdfs");
            ctl.view_mut()
                .status
                .show(format!("✅ {}", processed.message), Severity::Success);
            if !processed.files_processed.is_empty() {
                let note = format!(
                    "Initialized with documents: {}",
                    processed.files_processed.join(", ")
                );
                ctl.view_mut().transcript.push(render(&Message::System(note)));
            }
            Some(processed)
        }
        Err(e) => {
            warn!(error = %e, "initialization failed");
            report_failure(ctl, &e, "Initialization failed");
            None
        }
    }
}

/// Lists recent conversations into the transcript.
pub async fn show_recent_sessions(
    ctl: &mut SessionController,
    limit: Option<u32>,
) -> Option<Vec<SessionSummary>> {
    let backend = ctl.backend().clone();
    match backend.recent_sessions(limit).await {
        Ok(recent) if recent.sessions.is_empty() => {
            ctl.view_mut()
                .transcript
                .push(render(&Message::System("No recent conversations found.".into())));
            Some(recent.sessions)
        }
        Ok(recent) => {
            ctl.view_mut()
                .transcript
                .push(render_session_list(&recent.sessions));
            Some(recent.sessions)
        }
        Err(e) => {
            warn!(error = %e, "could not load recent sessions");
            ctl.view_mut().transcript.push(render(&Message::System(
                "Error loading conversation history.".into(),
            )));
            None
        }
    }
}
