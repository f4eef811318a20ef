//! Table output for schema and record listings.

use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

/// Columns assumed when stdout is not a terminal.
const FALLBACK_WIDTH: u16 = 120;

/// A table with the given header row, sized to the terminal so long labels
/// and messages wrap inside their cells instead of across the screen.
pub fn new_table(header: &[&str]) -> Table {
    let width = crossterm::terminal::size()
        .map(|(w, _)| w)
        .unwrap_or(FALLBACK_WIDTH);

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width)
        .set_header(header.to_vec());
    table
}

/// Cut `s` to at most `max` characters, ending in "..." when shortened.
pub fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(truncate_str("Acme", 10), "Acme");
    }

    #[test]
    fn long_text_is_cut() {
        assert_eq!(truncate_str("Freight Forwarding, 3PL", 12), "Freight F...");
    }

    #[test]
    fn cuts_on_character_boundaries() {
        assert_eq!(truncate_str("Zürich Zürich", 8), "Züric...");
    }

    #[test]
    fn header_is_set() {
        let table = new_table(&["Field", "Value"]);
        assert!(table.header().is_some());
    }
}
