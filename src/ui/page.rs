//! Standalone HTML export of the chat view.

use super::ChatView;
use crate::render::escape_html;
use anyhow::{Context, Result};
use std::fmt::Write;
use std::path::Path;

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Indian Legal Assistant</title>
<script src="https://cdn.tailwindcss.com"></script>
<link rel="stylesheet" href="https://cdnjs.cloudflare.com/ajax/libs/font-awesome/6.4.0/css/all.min.css">
</head>
<body class="bg-gray-50">
<main class="max-w-4xl mx-auto p-6">
"#;

const TYPING: &str = r#"<div id="typing-indicator" class="flex items-center text-gray-500 text-sm"><i class="fas fa-robot text-blue-600 mr-2"></i>Assistant is typing...</div>"#;

pub fn render_page(view: &ChatView) -> String {
    let mut html = String::from(HEAD);

    if let Some(status) = view.status.current() {
        let _ = writeln!(
            html,
            r#"<div id="status" class="mb-4 p-3 rounded border {}">{}</div>"#,
            status.severity.css_class(),
            escape_html(&status.message)
        );
    }

    html.push_str(r#"<section id="chat-messages" class="space-y-4">"#);
    html.push('\n');
    html.push_str(&view.transcript.to_html());
    html.push_str("\n</section>\n");

    if view.typing.is_active() {
        html.push_str(TYPING);
        html.push('\n');
    }

    html.push_str("</main>\n</body>\n</html>\n");
    html
}

/// Overwrites `path` with the current page.
pub async fn write_page(path: &Path, view: &ChatView) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        tokio::fs::create_dir_all(parent)
            .await
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    tokio::fs::write(path, render_page(view))
        .await
        .with_context(|| format!("Failed to write transcript: {}", path.display()))
}
