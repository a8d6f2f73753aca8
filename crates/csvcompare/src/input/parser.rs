//! CSV parsing into keyed rows, structural checks, and serialization.

use std::collections::HashSet;

use encoding_rs::Encoding;
use serde::Serialize;

use crate::error::{CompareError, Result};
use crate::table::Row;
use crate::table::dedupe::unique_values;

/// Options for reading a dataset.
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Explicit column names. When set (and non-empty), the first line is data.
    pub columns: Option<Vec<String>>,
    /// Encoding to decode files with (None = detect).
    pub encoding: Option<&'static Encoding>,
    /// Field delimiter.
    pub delimiter: u8,
    /// Quote character.
    pub quote: u8,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            columns: None,
            encoding: None,
            delimiter: b',',
            quote: b'"',
        }
    }
}

impl ReadOptions {
    /// Use these column names instead of a header row.
    ///
    /// Names are used as given and must be unique; parsing fails with
    /// [`CompareError::Config`] on a repeated name.
    pub fn with_columns<I, S>(mut self, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.columns = Some(columns.into_iter().map(Into::into).collect());
        self
    }

    /// Skip detection and decode files with this encoding.
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Use a delimiter other than `,`.
    pub fn with_delimiter(mut self, delimiter: u8) -> Self {
        self.delimiter = delimiter;
        self
    }

    fn explicit_columns(&self) -> Option<&[String]> {
        self.columns.as_deref().filter(|columns| !columns.is_empty())
    }
}

/// Validate column names that arrive as untyped JSON values.
pub fn column_names_from_values(values: &[serde_json::Value]) -> Result<Vec<String>> {
    values
        .iter()
        .enumerate()
        .map(|(position, value)| match value {
            serde_json::Value::String(name) => Ok(name.clone()),
            other => Err(CompareError::InvalidColumnName {
                position,
                found: json_kind(other).to_string(),
            }),
        })
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

/// Column list and rows produced by parsing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedTable {
    pub columns: Vec<String>,
    pub rows: Vec<Row>,
}

/// A data record whose field count differs from the header's.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructuralError {
    /// 1-based line where the record starts.
    pub line: u64,
    /// Field count of the header record.
    pub expected: usize,
    /// Field count of this record.
    pub found: usize,
}

#[derive(Debug, Clone, Copy)]
struct RecordLine {
    line: u64,
    blank: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
    FieldStart,
    Unquoted,
    Quoted,
    QuoteInQuoted,
}

fn first_repeat(names: &[String]) -> Option<&str> {
    let mut seen = HashSet::with_capacity(names.len());
    names
        .iter()
        .find(|name| !seen.insert(name.as_str()))
        .map(String::as_str)
}

/// Parses CSV text into keyed rows.
pub struct Parser {
    options: ReadOptions,
}

impl Parser {
    /// Create a parser with default options.
    pub fn new() -> Self {
        Self {
            options: ReadOptions::default(),
        }
    }

    /// Create a parser with custom options.
    pub fn with_options(options: ReadOptions) -> Self {
        Self { options }
    }

    fn reader<'a>(&self, text: &'a str) -> csv::Reader<&'a [u8]> {
        csv::ReaderBuilder::new()
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .has_headers(false)
            .flexible(true)
            .from_reader(text.as_bytes())
    }

    /// Parse text into columns and rows.
    pub fn parse_text(&self, text: &str) -> Result<ParsedTable> {
        let mut reader = self.reader(text);
        let mut records = reader.records();

        let columns = match self.options.explicit_columns() {
            Some(columns) => {
                if let Some(name) = first_repeat(columns) {
                    return Err(CompareError::Config(format!(
                        "Explicit column name '{name}' appears more than once"
                    )));
                }
                columns.to_vec()
            }
            None => match records.next() {
                Some(header) => {
                    let header: Vec<String> = header?.iter().map(String::from).collect();
                    unique_values(&header)
                }
                None => return Ok(ParsedTable::default()),
            },
        };

        let mut rows = Vec::new();
        for record in records {
            let record = record?;
            if record.len() > columns.len() {
                tracing::debug!(
                    line = record.position().map(|p| p.line()),
                    fields = record.len(),
                    columns = columns.len(),
                    "Dropping surplus fields"
                );
            }
            let row: Row = columns
                .iter()
                .cloned()
                .zip(record.iter().map(String::from))
                .collect();
            rows.push(row);
        }

        Ok(ParsedTable { columns, rows })
    }

    /// Records whose field count differs from the first record's.
    ///
    /// Blank lines after the header count as records with no fields.
    pub fn structural_errors(&self, text: &str) -> Vec<StructuralError> {
        let lines = self.record_lines(text);
        let mut reader = self.reader(text);
        let mut records = reader.records().filter_map(|record| record.ok());

        let Some(header) = records.next() else {
            return Vec::new();
        };
        let expected = header.len();

        let mut starts = lines
            .iter()
            .filter(|record| !record.blank)
            .map(|record| record.line);
        let header_line = starts.next().unwrap_or(1);

        let mut errors: Vec<StructuralError> = records
            .zip(starts)
            .filter(|(record, _)| record.len() != expected)
            .map(|(record, line)| StructuralError {
                line,
                expected,
                found: record.len(),
            })
            .collect();

        errors.extend(
            lines
                .iter()
                .filter(|record| record.blank && record.line > header_line)
                .map(|record| StructuralError {
                    line: record.line,
                    expected,
                    found: 0,
                }),
        );
        errors.sort_by_key(|error| error.line);
        errors
    }

    /// Physical records of `text` with their 1-based start lines.
    ///
    /// Line breaks inside quoted fields do not end a record. A trailing line
    /// break does not start an empty final record.
    fn record_lines(&self, text: &str) -> Vec<RecordLine> {
        let (delimiter, quote) = (self.options.delimiter, self.options.quote);

        let mut lines = Vec::new();
        let mut state = ScanState::FieldStart;
        let mut line = 1u64;
        let mut start = RecordLine { line, blank: true };

        for &byte in text.as_bytes() {
            if byte == b'\n' {
                line += 1;
                if state != ScanState::Quoted {
                    lines.push(start);
                    start = RecordLine { line, blank: true };
                    state = ScanState::FieldStart;
                }
                continue;
            }
            if byte != b'\r' {
                start.blank = false;
            }

            state = match state {
                ScanState::FieldStart if byte == quote => ScanState::Quoted,
                ScanState::FieldStart | ScanState::Unquoted | ScanState::QuoteInQuoted
                    if byte == delimiter =>
                {
                    ScanState::FieldStart
                }
                ScanState::Quoted if byte == quote => ScanState::QuoteInQuoted,
                ScanState::Quoted => ScanState::Quoted,
                ScanState::QuoteInQuoted if byte == quote => ScanState::Quoted,
                _ => ScanState::Unquoted,
            };
        }

        if !start.blank {
            lines.push(start);
        }
        lines
    }

    /// Serialize a header plus rows, keeping only `columns`.
    pub fn write_text(&self, columns: &[String], rows: &[Row]) -> Result<String> {
        let mut writer = csv::WriterBuilder::new()
            .delimiter(self.options.delimiter)
            .quote(self.options.quote)
            .from_writer(Vec::new());

        writer.write_record(columns)?;
        for row in rows {
            writer.write_record(
                columns
                    .iter()
                    .map(|column| row.get(column).map_or("", String::as_str)),
            )?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv() {
        let parser = Parser::new();
        let table = parser
            .parse_text("name,age,city\nAlice,30,NYC\nBob,25,LA")
            .unwrap();

        assert_eq!(table.columns, vec!["name", "age", "city"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0]["name"], "Alice");
        assert_eq!(table.rows[1]["age"], "25");
    }

    #[test]
    fn test_parse_quoted_fields() {
        let table = Parser::new()
            .parse_text("id,note\n1,\"hello, world\"\n2,\"say \"\"hi\"\"\"")
            .unwrap();
        assert_eq!(table.rows[0]["note"], "hello, world");
        assert_eq!(table.rows[1]["note"], "say \"hi\"");
    }

    #[test]
    fn test_parse_empty() {
        let table = Parser::new().parse_text("").unwrap();
        assert!(table.columns.is_empty());
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_duplicate_headers_are_renamed() {
        let table = Parser::new()
            .parse_text("column 1,column 2,column 1\nrow 1,row 1:2,row 1:1")
            .unwrap();
        assert_eq!(table.columns, vec!["column 1", "column 2", "column 1.1"]);
        assert_eq!(table.rows[0]["column 1.1"], "row 1:1");
    }

    #[test]
    fn test_explicit_columns_treat_first_line_as_data() {
        let parser = Parser::with_options(ReadOptions::default().with_columns(["a", "b"]));
        let table = parser.parse_text("1,2\n3,4").unwrap();
        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0]["a"], "1");
    }

    #[test]
    fn test_empty_explicit_columns_fall_back_to_header() {
        let parser = Parser::with_options(ReadOptions::default().with_columns(Vec::<String>::new()));
        let table = parser.parse_text("a,b\n1,2").unwrap();
        assert_eq!(table.columns, vec!["a", "b"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn test_ragged_rows() {
        let table = Parser::new().parse_text("a,b,c\n1,2\n1,2,3,4").unwrap();
        assert_eq!(table.rows[0].len(), 2);
        assert!(!table.rows[0].contains_key("c"));
        assert_eq!(table.rows[1].len(), 3);
    }

    #[test]
    fn test_structural_errors() {
        let parser = Parser::new();
        let errors = parser.structural_errors("a,b,c\n1,2,3,4\n1,2,3\n1,2");
        assert_eq!(
            errors,
            vec![
                StructuralError { line: 2, expected: 3, found: 4 },
                StructuralError { line: 4, expected: 3, found: 2 },
            ]
        );
        assert!(parser.structural_errors("").is_empty());
        assert!(parser.structural_errors("a,b\n1,2").is_empty());
    }

    #[test]
    fn test_blank_lines_are_structural_errors() {
        let parser = Parser::new();
        assert_eq!(
            parser.structural_errors("a,b\n1,2\n\n3,4"),
            vec![StructuralError { line: 3, expected: 2, found: 0 }]
        );
        assert_eq!(
            parser.structural_errors("a,b\r\n1,2\r\n\r\n3\r\n"),
            vec![
                StructuralError { line: 3, expected: 2, found: 0 },
                StructuralError { line: 4, expected: 2, found: 1 },
            ]
        );
        assert!(parser.structural_errors("a,b\n1,2\n").is_empty());
        assert_eq!(parser.structural_errors("a,b\n1,2\n\n").len(), 1);
    }

    #[test]
    fn test_quoted_line_breaks_keep_line_numbers() {
        let parser = Parser::new();
        let text = "id,note\n1,\"first\n\nsecond\"\n2,ok,extra";
        assert_eq!(
            parser.structural_errors(text),
            vec![StructuralError { line: 5, expected: 2, found: 3 }]
        );
    }

    #[test]
    fn test_duplicate_explicit_columns_rejected() {
        let parser = Parser::with_options(ReadOptions::default().with_columns(["a", "b", "a"]));
        match parser.parse_text("1,2,3") {
            Err(CompareError::Config(message)) => assert!(message.contains("'a'")),
            other => panic!("expected Config error, got {:?}", other),
        }
    }

    #[test]
    fn test_write_text_filters_to_columns() {
        let parser = Parser::new();
        let table = parser.parse_text("a,b\n1,2").unwrap();
        let mut rows = table.rows;
        rows[0].insert("stray".to_string(), "x".to_string());

        let text = parser.write_text(&["b".to_string(), "a".to_string()], &rows).unwrap();
        assert_eq!(text, "b,a\n2,1\n");
    }

    #[test]
    fn test_column_names_from_values() {
        let values = vec![serde_json::json!("column 1"), serde_json::json!("column 2")];
        assert_eq!(
            column_names_from_values(&values).unwrap(),
            vec!["column 1", "column 2"]
        );

        let values = vec![
            serde_json::json!("column 1"),
            serde_json::json!(2),
            serde_json::json!("column 3"),
        ];
        match column_names_from_values(&values) {
            Err(CompareError::InvalidColumnName { position, found }) => {
                assert_eq!(position, 1);
                assert_eq!(found, "a number");
            }
            other => panic!("expected InvalidColumnName, got {:?}", other),
        }
    }
}
