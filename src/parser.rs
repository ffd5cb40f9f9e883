//! Quote-aware parsing of the spreadsheet CSV export.
//!
//! The export is loosely structured: a quoted field may contain literal
//! commas, doubled quotes, and even raw line breaks spanning several
//! physical lines. Splitting on commas and newlines breaks on such rows,
//! so parsing runs as a single-pass character state machine instead.

/// Parse CSV text into rows of normalized fields.
///
/// Inside a quoted field, commas and newlines are data; a doubled quote
/// (`""`) collapses to one literal quote. Bare carriage returns outside
/// quotes are dropped. Each extracted field has embedded line breaks
/// flattened to single spaces and surrounding whitespace trimmed.
pub fn parse_rows(text: &str) -> Vec<Vec<String>> {
    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' => {
                if in_quotes && chars.peek() == Some(&'"') {
                    // Escaped quote inside a quoted field
                    field.push('"');
                    chars.next();
                } else {
                    in_quotes = !in_quotes;
                }
            }
            ',' if !in_quotes => {
                row.push(normalize_field(&field));
                field.clear();
            }
            '\r' if !in_quotes => {}
            '\n' if !in_quotes => {
                row.push(normalize_field(&field));
                field.clear();
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    // Flush the last row when the text does not end with a newline
    if !field.is_empty() || !row.is_empty() {
        row.push(normalize_field(&field));
        rows.push(row);
    }

    rows
}

/// Collapse any run of line breaks within a field to a single space and
/// trim the result. The parser is line-oriented for storage but fields
/// must not carry raw line breaks into display.
fn normalize_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut pending_break = false;
    for c in field.chars() {
        if c == '\n' || c == '\r' {
            pending_break = true;
        } else {
            if pending_break {
                out.push(' ');
                pending_break = false;
            }
            out.push(c);
        }
    }
    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_rows() {
        let rows = parse_rows("a,b,c\nd,e,f\n");
        assert_eq!(rows, vec![vec!["a", "b", "c"], vec!["d", "e", "f"]]);
    }

    #[test]
    fn test_quoted_comma_is_not_a_separator() {
        let rows = parse_rows("title,\"Hall A, Floor 2\",x\n");
        assert_eq!(rows, vec![vec!["title", "Hall A, Floor 2", "x"]]);
    }

    #[test]
    fn test_quoted_newline_becomes_space() {
        let rows = parse_rows("a,\"line one\nline two\",b\n");
        assert_eq!(rows, vec![vec!["a", "line one line two", "b"]]);
    }

    #[test]
    fn test_quoted_comma_and_newline_in_one_field() {
        // One field whose value keeps the comma and flattens the newline
        let rows = parse_rows("x,\"A multi\nline, desc\",y\n");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], vec!["x", "A multi line, desc", "y"]);
    }

    #[test]
    fn test_doubled_quote_collapses() {
        let rows = parse_rows("a,\"say \"\"hi\"\"\",b\n");
        assert_eq!(rows, vec![vec!["a", "say \"hi\"", "b"]]);
    }

    #[test]
    fn test_crlf_line_endings() {
        let rows = parse_rows("a,b\r\nc,d\r\n");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_crlf_inside_quotes_becomes_single_space() {
        let rows = parse_rows("a,\"one\r\ntwo\"\n");
        assert_eq!(rows, vec![vec!["a", "one two"]]);
    }

    #[test]
    fn test_no_trailing_newline() {
        let rows = parse_rows("a,b\nc,d");
        assert_eq!(rows, vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_fields_are_trimmed() {
        let rows = parse_rows("  a , b  ,\" c \"\n");
        assert_eq!(rows, vec![vec!["a", "b", "c"]]);
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_rows("").is_empty());
    }

    #[test]
    fn test_header_only() {
        let rows = parse_rows("title,date\n");
        assert_eq!(rows.len(), 1);
    }

    #[test]
    fn test_trailing_empty_field() {
        let rows = parse_rows("a,b,\n");
        assert_eq!(rows, vec![vec!["a", "b", ""]]);
    }
}
