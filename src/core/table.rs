//! Tabular import/export format.
//!
//! Reads and writes comma-separated documents the way spreadsheet tools
//! produce them: an optional UTF-8 BOM, LF or CRLF record separators, and
//! double-quoted cells that may contain commas, doubled quotes (`""`) and
//! literal line breaks.
//!
//! Parsing validates structure as it goes. The header is checked before any
//! data row is read, and every data row must match the header's width.

use std::collections::HashMap;
use std::iter::Peekable;
use std::str::Chars;

use tracing::{debug, trace};

use crate::core::constants;
use crate::error::TableError;

const DELIMITER: char = ',';
const QUOTE: char = '"';
const BOM: char = '\u{feff}';

/// Validated header row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    columns: Vec<String>,
}

impl Header {
    /// Validate raw header cells.
    ///
    /// Column names are trimmed. Fails on empty columns, on duplicates under
    /// [`column_key`], and when no `name` column exists.
    pub fn new(cells: Vec<String>) -> Result<Self, TableError> {
        let columns: Vec<String> = cells.into_iter().map(|c| c.trim().to_string()).collect();

        if let Some(pos) = columns.iter().position(|c| c.is_empty()) {
            return Err(TableError::EmptyColumn { column: pos + 1 });
        }

        let mut seen: HashMap<String, usize> = HashMap::with_capacity(columns.len());
        for (pos, column) in columns.iter().enumerate() {
            if let Some(first) = seen.insert(column_key(column), pos) {
                return Err(TableError::DuplicateColumn {
                    name: column.clone(),
                    first: first + 1,
                    second: pos + 1,
                });
            }
        }

        if !seen.contains_key(constants::NAME_COLUMN) {
            return Err(TableError::MissingNameColumn);
        }

        Ok(Self { columns })
    }

    /// Column names in document order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Position of a column, compared by [`column_key`].
    pub fn position(&self, name: &str) -> Option<usize> {
        let key = column_key(name);
        self.columns.iter().position(|c| column_key(c) == key)
    }

    /// Number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Whether the header has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

/// One data row, cells aligned with the header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    number: usize,
    cells: Vec<String>,
}

impl Row {
    /// Data row number (1-based, header excluded).
    pub fn number(&self) -> usize {
        self.number
    }

    /// Raw cell values in column order.
    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Cell under the named column (case-insensitive).
    pub fn get<'a>(&'a self, header: &Header, column: &str) -> Option<&'a str> {
        header
            .position(column)
            .and_then(|pos| self.cells.get(pos))
            .map(String::as_str)
    }
}

/// A structurally valid document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    header: Header,
    rows: Vec<Row>,
}

impl Table {
    /// Parse and validate a document.
    ///
    /// # Errors
    ///
    /// Returns the first `TableError` found. Header problems are reported
    /// before any data row is read.
    pub fn parse(input: &[u8]) -> Result<Self, TableError> {
        let text = std::str::from_utf8(input)?;
        let mut reader = Reader::new(text);

        let header = match reader.next_record()? {
            Some(cells) => Header::new(cells)?,
            None => return Err(TableError::MissingHeader),
        };
        debug!(columns = header.len(), "header validated");

        let mut rows = Vec::new();
        while let Some(cells) = reader.next_record()? {
            let number = rows.len() + 1;
            if cells.len() != header.len() {
                return Err(TableError::WidthMismatch {
                    row: number,
                    actual: cells.len(),
                    expected: header.len(),
                });
            }
            rows.push(Row { number, cells });
        }

        debug!(rows = rows.len(), "table parsed");
        Ok(Self { header, rows })
    }

    /// The validated header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Data rows in document order.
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Comparison key for column names.
///
/// Column names match ignoring ASCII case only; other characters compare
/// exactly. Every header check and lookup goes through this.
pub fn column_key(name: &str) -> String {
    name.to_ascii_lowercase()
}

/// Record-at-a-time reader over document text.
struct Reader<'a> {
    chars: Peekable<Chars<'a>>,
    records: usize,
}

impl<'a> Reader<'a> {
    fn new(text: &'a str) -> Self {
        let text = text.strip_prefix(BOM).unwrap_or(text);
        Self {
            chars: text.chars().peekable(),
            records: 0,
        }
    }

    /// Read the next non-blank record.
    fn next_record(&mut self) -> Result<Option<Vec<String>>, TableError> {
        loop {
            if self.chars.peek().is_none() {
                return Ok(None);
            }

            // Header is record 0, so this is also the 1-based data row.
            let row = self.records;
            let (cells, blank) = self.read_record(row)?;
            if blank {
                trace!(row, "skipping blank line");
                continue;
            }

            self.records += 1;
            return Ok(Some(cells));
        }
    }

    /// Read one record. The flag is set for a bare empty line.
    fn read_record(&mut self, row: usize) -> Result<(Vec<String>, bool), TableError> {
        let mut cells = Vec::new();
        let mut quoted_any = false;

        loop {
            let (cell, quoted) = if self.chars.peek() == Some(&QUOTE) {
                self.chars.next();
                (self.read_quoted(row)?, true)
            } else {
                (self.read_bare(), false)
            };
            quoted_any |= quoted;
            cells.push(cell);

            match self.chars.next() {
                Some(DELIMITER) => continue,
                Some('\r') => {
                    if self.chars.peek() == Some(&'\n') {
                        self.chars.next();
                    }
                    break;
                }
                Some('\n') | None => break,
                Some(_) => return Err(TableError::StrayQuote { row }),
            }
        }

        let blank = !quoted_any && cells.len() == 1 && cells[0].is_empty();
        Ok((cells, blank))
    }

    /// Read an unquoted cell up to the next delimiter or line break.
    fn read_bare(&mut self) -> String {
        let mut cell = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch == DELIMITER || ch == '\r' || ch == '\n' {
                break;
            }
            cell.push(ch);
            self.chars.next();
        }
        cell
    }

    /// Read a quoted cell; the opening quote is already consumed.
    ///
    /// After the closing quote the reader must sit on a delimiter, a line
    /// break, or the end of input.
    fn read_quoted(&mut self, row: usize) -> Result<String, TableError> {
        let mut cell = String::new();
        loop {
            match self.chars.next() {
                Some(QUOTE) if self.chars.peek() == Some(&QUOTE) => {
                    self.chars.next();
                    cell.push(QUOTE);
                }
                Some(QUOTE) => break,
                Some(ch) => cell.push(ch),
                None => return Err(TableError::UnterminatedQuote { row }),
            }
        }

        match self.chars.peek() {
            None | Some(&DELIMITER) | Some(&'\r') | Some(&'\n') => Ok(cell),
            Some(_) => Err(TableError::StrayQuote { row }),
        }
    }
}

/// Render records as a document.
///
/// Cells are quoted only when needed: when they contain the delimiter, a
/// quote, a line break, or leading/trailing whitespace.
pub fn write<I, R, S>(records: I) -> String
where
    I: IntoIterator<Item = R>,
    R: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut out = String::new();
    for record in records {
        let mut first = true;
        for cell in record {
            if !first {
                out.push(DELIMITER);
            }
            first = false;
            push_cell(&mut out, cell.as_ref());
        }
        out.push('\n');
    }
    out
}

fn push_cell(out: &mut String, cell: &str) {
    if !needs_quotes(cell) {
        out.push_str(cell);
        return;
    }

    out.push(QUOTE);
    for ch in cell.chars() {
        if ch == QUOTE {
            out.push(QUOTE);
        }
        out.push(ch);
    }
    out.push(QUOTE);
}

fn needs_quotes(cell: &str) -> bool {
    cell.contains([DELIMITER, QUOTE, '\r', '\n'])
        || cell.starts_with(char::is_whitespace)
        || cell.ends_with(char::is_whitespace)
}
