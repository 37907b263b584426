// crates/districts-core/src/loader/delimited.rs

//! # Delimited Text Reader
//!
//! Splits spreadsheet exports into rows of fields.
//!
//! - Quoted fields may contain the delimiter, line breaks and doubled quotes
//!   (`""` inside quotes is a literal `"`).
//! - CR-LF, LF and lone CR all end a row.
//! - Blank lines produce no row, so a trailing newline never yields a
//!   phantom record.
//!
//! Malformed input never fails: an unterminated quote simply runs to the end
//! of the text.

/// A parsed row of raw (untrimmed) fields.
pub type Row = Vec<String>;

/// Parse delimited text into rows.
///
/// ```rust
/// use districts_core::loader::delimited::parse_delimited;
///
/// let rows = parse_delimited("name,phone\n\"Ely, MN\",555-0100\n", ',');
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[1][0], "Ely, MN");
/// ```
pub fn parse_delimited(text: &str, delimiter: char) -> Vec<Row> {
    let mut reader = RowBuilder::default();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '"' {
            if reader.in_quotes && chars.peek() == Some(&'"') {
                chars.next();
                reader.field.push('"');
            } else {
                reader.in_quotes = !reader.in_quotes;
                reader.quoted = true;
            }
        } else if reader.in_quotes {
            reader.field.push(ch);
        } else if ch == delimiter {
            reader.end_field();
        } else if ch == '\n' || ch == '\r' {
            reader.end_row();
            if ch == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
        } else {
            reader.field.push(ch);
        }
    }
    reader.end_row();
    reader.rows
}

/// Parse comma-separated text.
pub fn parse_csv(text: &str) -> Vec<Row> {
    parse_delimited(text, ',')
}

#[derive(Default)]
struct RowBuilder {
    rows: Vec<Row>,
    row: Row,
    field: String,
    in_quotes: bool,
    // A quoted empty field ("") still counts as a field.
    quoted: bool,
}

impl RowBuilder {
    fn end_field(&mut self) {
        self.row.push(std::mem::take(&mut self.field));
        self.quoted = false;
    }

    fn end_row(&mut self) {
        if !self.field.is_empty() || self.quoted || !self.row.is_empty() {
            self.end_field();
        }
        if !self.row.is_empty() {
            self.rows.push(std::mem::take(&mut self.row));
        }
    }
}
