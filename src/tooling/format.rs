//! Format a decoded shallow update as text or JSON.

use crate::error::ApiError;
use crate::shallow::ShallowUpdate;
use comfy_table::presets::UTF8_BORDERS_ONLY;
use comfy_table::Table;
use owo_colors::OwoColorize;

/// Format a section heading, bold/underlined when `color` is set.
pub fn format_section_heading(title: &str, color: bool) -> String {
    if color {
        format!("{}", title.bold().underline())
    } else {
        title.to_string()
    }
}

/// Format a shallow update as a human-readable table.
///
/// Rows list shallow lines first, then unshallow lines, each in server order.
pub fn format_shallow_update_text(update: &ShallowUpdate, color: bool) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{}\n\n",
        format_section_heading("Shallow Update", color)
    ));

    if update.is_empty() {
        out.push_str("  No shallow or unshallow lines.\n");
        return out;
    }

    let mut table = Table::new();
    table.load_preset(UTF8_BORDERS_ONLY);
    table.set_header(vec!["Verb", "Commit"]);
    for id in &update.shallows {
        table.add_row(vec!["shallow".to_string(), id.encode_hex()]);
    }
    for id in &update.unshallows {
        table.add_row(vec!["unshallow".to_string(), id.encode_hex()]);
    }
    out.push_str(&format!("{}\n\n", table));
    out.push_str(&format!(
        "Total: {} shallow, {} unshallow.\n",
        update.shallows.len(),
        update.unshallows.len()
    ));
    out
}

/// Format a shallow update as pretty JSON: `{"shallow": [...], "unshallow": [...]}`.
pub fn format_shallow_update_json(update: &ShallowUpdate) -> Result<String, ApiError> {
    serde_json::to_string_pretty(update)
        .map_err(|e| ApiError::ConfigError(format!("Failed to serialize output: {}", e)))
}
