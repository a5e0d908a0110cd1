use super::escape::escape_html;
use crate::api::Source;
use std::fmt::Write;

/// Sources shown inline under an answer; the rest are summarised.
pub const INLINE_SOURCE_LIMIT: usize = 3;

const FALLBACK_DOCUMENT: &str = "Document";
const FALLBACK_PAGE: &str = "N/A";

/// Title line for one source: `"{document type} - Page {page}"`.
pub fn source_title(source: &Source) -> String {
    let metadata = &source.metadata;
    format!(
        "{} - Page {}",
        metadata.document_type_label().unwrap_or(FALLBACK_DOCUMENT),
        metadata
            .page_label()
            .unwrap_or_else(|| FALLBACK_PAGE.to_string())
    )
}

/// Empty when there is nothing to cite.
pub fn render_sources(sources: &[Source]) -> String {
    if sources.is_empty() {
        return String::new();
    }

    let mut html = String::from(
        r#"<div class="mt-4 pt-3 border-t border-gray-200"><p class="text-sm font-semibold text-gray-600 mb-2">📚 Sources:</p><div class="space-y-1">"#,
    );
    for source in sources.iter().take(INLINE_SOURCE_LIMIT) {
        let _ = write!(
            html,
            r#"<div class="source-entry text-xs bg-blue-50 p-2 rounded border-l-2 border-blue-400"><p class="font-medium text-blue-800">{}</p><p class="text-gray-600 mt-1 text-xs">{}</p></div>"#,
            escape_html(&source_title(source)),
            escape_html(&source.content)
        );
    }
    if sources.len() > INLINE_SOURCE_LIMIT {
        let _ = write!(
            html,
            r#"<p class="text-xs text-gray-500 italic">+{} more sources</p>"#,
            sources.len() - INLINE_SOURCE_LIMIT
        );
    }
    html.push_str("</div></div>");
    html
}
