//! Parser for the Google Sheets gviz CSV export.
//!
//! Deliberately permissive: malformed rows (mismatched column counts, stray
//! quotes) never error, and doubled-quote escaping (`""`) is not handled —
//! the sheet data has never needed it and consumers rely on the simpler
//! behavior.

/// One data row, keyed by header. Cells keep column order; lookups return
/// the first cell under a key, so duplicate headers within a row are legal.
#[derive(Debug, Clone, Default)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new(cells: Vec<(String, String)>) -> Self {
        Self { cells }
    }

    /// Raw lookup; `Some("")` when the cell exists but is blank.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Lookup that treats blank cells as missing, mirroring the sheet
    /// convention that an empty cell means "use the default".
    pub fn text(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// First non-blank value among alternative column spellings.
    pub fn first_of(&self, keys: &[&str]) -> Option<&str> {
        keys.iter().find_map(|k| self.text(k))
    }
}

/// Parses a CSV blob into header-keyed rows. Never fails; rows shorter than
/// the header are padded with empty strings, extra trailing cells are
/// dropped.
pub fn parse(text: &str) -> Vec<RawRow> {
    let mut lines = text.trim().split('\n');
    let Some(header_line) = lines.next() else {
        return Vec::new();
    };

    let headers: Vec<String> = header_line.split(',').map(clean_cell).collect();

    lines
        .map(|line| {
            let values = split_line(line);
            let cells = headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.clone(), values.get(i).cloned().unwrap_or_default()))
                .collect();
            RawRow::new(cells)
        })
        .collect()
}

/// Splits one data line on unquoted commas. A `"` flips the quote state, so
/// literal commas inside quoted fields survive.
fn split_line(line: &str) -> Vec<String> {
    let mut values = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => {
                values.push(clean_cell(&current));
                current.clear();
            }
            _ => current.push(ch),
        }
    }
    values.push(clean_cell(&current));
    values
}

/// Trim, strip one surrounding quote pair, trim again. Also eats the `\r`
/// left behind by CRLF line endings.
fn clean_cell(raw: &str) -> String {
    let trimmed = raw.trim();
    let trimmed = trimmed.strip_prefix('"').unwrap_or(trimmed);
    let trimmed = trimmed.strip_suffix('"').unwrap_or(trimmed);
    trimmed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quoted_comma_stays_in_field() {
        let rows = parse("Name,Note\n\"Name\",\"Some, note\"");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("Name"), Some("Name"));
        assert_eq!(rows[0].get("Note"), Some("Some, note"));
    }

    #[test]
    fn short_row_pads_missing_trailing_cells() {
        let rows = parse("A,B,C\n1");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get("A"), Some("1"));
        assert_eq!(rows[0].get("B"), Some(""));
        assert_eq!(rows[0].get("C"), Some(""));
    }

    #[test]
    fn extra_cells_are_dropped() {
        let rows = parse("A,B\n1,2,3,4");
        assert_eq!(rows[0].get("A"), Some("1"));
        assert_eq!(rows[0].get("B"), Some("2"));
        assert_eq!(rows[0].get("C"), None);
    }

    #[test]
    fn header_quotes_and_whitespace_are_stripped() {
        let rows = parse("\" PlayerId \",\"First\"\n7,Ana");
        assert_eq!(rows[0].get("PlayerId"), Some("7"));
        assert_eq!(rows[0].get("First"), Some("Ana"));
    }

    #[test]
    fn crlf_endings_are_tolerated() {
        let rows = parse("A,B\r\n1,2\r\n3,4");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("B"), Some("2"));
        assert_eq!(rows[1].get("A"), Some("3"));
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(parse("").is_empty());
        assert!(parse("OnlyHeader,Columns").is_empty());
    }

    #[test]
    fn stray_quote_does_not_error() {
        // Unbalanced quote swallows the comma; permissive by design.
        let rows = parse("A,B\n\"1,2");
        assert_eq!(rows[0].get("A"), Some("1,2"));
        assert_eq!(rows[0].get("B"), Some(""));
    }

    #[test]
    fn text_treats_blank_as_missing() {
        let rows = parse("A,B\n,x");
        assert_eq!(rows[0].get("A"), Some(""));
        assert_eq!(rows[0].text("A"), None);
        assert_eq!(rows[0].text("B"), Some("x"));
    }

    #[test]
    fn first_of_prefers_earlier_spelling() {
        let rows = parse("ImageUrl,Image URL\n,https://x/y.png");
        assert_eq!(
            rows[0].first_of(&["ImageUrl", "Image URL"]),
            Some("https://x/y.png")
        );
    }
}
