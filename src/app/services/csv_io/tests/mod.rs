//! Tests for CSV reading and writing

use std::io::Cursor;

use super::reader::CsvSource;


/// Create a source over in-memory CSV text
pub fn source_from_str(content: &str) -> CsvSource<Cursor<Vec<u8>>> {
    CsvSource::from_reader("test.csv", Cursor::new(content.as_bytes().to_vec()))
        .expect("valid CSV header")
}

/// A small "default fields" export
pub fn create_default_fields_csv() -> String {
    "Issue key,Summary,Assignee,Reporter,Priority,Status,Created,Updated\n\
     BUG-1,Crash on save,Ann,Bob,High,Open,2024-01-02,2024-01-03 10:00\n\
     BUG-2,\"Slow, very slow\",,Bob,Low,Done,,\n"
        .to_string()
}
