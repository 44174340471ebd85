//! Delimited text row codec
//!
//! Comma-separated fields, quoted with `"` when a field contains a comma,
//! a quote, CR or LF. Quotes inside a quoted field are doubled. Rows are
//! written with CRLF endings; the reader accepts LF or CRLF, newlines
//! inside quoted fields, and skips blank lines.
//!
//! Outside quotes a `"` in the middle of a field is kept literally, as are
//! characters following a closing quote.

use std::io::{self, BufRead};

use thiserror::Error;

const DELIMITER: char = ',';
const QUOTE: char = '"';
pub(crate) const TERMINATOR: &str = "\r\n";

/// One decoded row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// 1-based physical line the row starts on
    pub line: usize,
    pub fields: Vec<String>,
}

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("unterminated quoted field starting on line {line}")]
    UnterminatedQuote { line: usize },
}

/// Encodes one row, including the line terminator.
pub fn encode_row<S: AsRef<str>>(fields: &[S]) -> String {
    let mut out = String::new();
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(DELIMITER);
        }
        let field = field.as_ref();
        if field.contains([DELIMITER, QUOTE, '\r', '\n']) {
            out.push(QUOTE);
            for c in field.chars() {
                if c == QUOTE {
                    out.push(QUOTE);
                }
                out.push(c);
            }
            out.push(QUOTE);
        } else {
            out.push_str(field);
        }
    }
    out.push_str(TERMINATOR);
    out
}

/// Streaming row decoder over buffered text
pub struct RowReader<R> {
    inner: R,
    line: usize,
}

impl<R: BufRead> RowReader<R> {
    pub fn new(inner: R) -> Self {
        Self { inner, line: 0 }
    }

    /// Physical lines consumed so far
    pub fn line(&self) -> usize {
        self.line
    }

    /// Reads the next non-blank row, or `None` at end of input.
    pub fn next_row(&mut self) -> Result<Option<Row>, DecodeError> {
        let mut fields: Vec<String> = Vec::new();
        let mut field = String::new();
        let mut quoted = false;
        let mut in_quotes = false;
        let mut start_line = self.line + 1;
        let mut buf = String::new();

        loop {
            buf.clear();
            if self.inner.read_line(&mut buf)? == 0 {
                if in_quotes {
                    return Err(DecodeError::UnterminatedQuote { line: start_line });
                }
                if fields.is_empty() && field.is_empty() && !quoted {
                    return Ok(None);
                }
                fields.push(field);
                return Ok(Some(Row { line: start_line, fields }));
            }
            self.line += 1;

            let mut chars = buf.chars().peekable();
            while let Some(c) = chars.next() {
                if in_quotes {
                    if c == QUOTE {
                        if chars.peek() == Some(&QUOTE) {
                            chars.next();
                            field.push(QUOTE);
                        } else {
                            in_quotes = false;
                        }
                    } else {
                        field.push(c);
                    }
                    continue;
                }

                match c {
                    DELIMITER => {
                        fields.push(std::mem::take(&mut field));
                        quoted = false;
                    }
                    QUOTE if field.is_empty() && !quoted => {
                        in_quotes = true;
                        quoted = true;
                    }
                    '\r' if chars.peek() == Some(&'\n') => {}
                    '\n' => {
                        if fields.is_empty() && field.is_empty() && !quoted {
                            // Blank line
                            start_line = self.line + 1;
                            break;
                        }
                        fields.push(std::mem::take(&mut field));
                        return Ok(Some(Row { line: start_line, fields }));
                    }
                    c => field.push(c),
                }
            }
        }
    }
}

impl<R: BufRead> Iterator for RowReader<R> {
    type Item = Result<Row, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_row().transpose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn decode(text: &str) -> Vec<Vec<String>> {
        RowReader::new(Cursor::new(text))
            .map(|row| row.unwrap().fields)
            .collect()
    }

    #[test]
    fn test_encode_plain() {
        assert_eq!(encode_row(&["a", "b", ""]), "a,b,\r\n");
    }

    #[test]
    fn test_encode_quotes_when_needed() {
        assert_eq!(
            encode_row(&["Doe, Jane", "say \"hi\"", "two\nlines"]),
            "\"Doe, Jane\",\"say \"\"hi\"\"\",\"two\nlines\"\r\n"
        );
    }

    #[test]
    fn test_decode_simple() {
        assert_eq!(decode("a,b,c\r\nd,e,f\n"), vec![vec!["a", "b", "c"], vec!["d", "e", "f"]]);
    }

    #[test]
    fn test_decode_quoted_fields() {
        let rows = decode("\"Doe, Jane\",\"say \"\"hi\"\"\",\"two\r\nlines\"\r\n");
        assert_eq!(rows, vec![vec!["Doe, Jane", "say \"hi\"", "two\r\nlines"]]);
    }

    #[test]
    fn test_decode_skips_blank_lines() {
        assert_eq!(decode("a,b\n\n\r\nc,d\n"), vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_decode_without_trailing_newline() {
        assert_eq!(decode("a,b\nc,d"), vec![vec!["a", "b"], vec!["c", "d"]]);
    }

    #[test]
    fn test_decode_empty_fields() {
        assert_eq!(decode(",,\n"), vec![vec!["", "", ""]]);
        assert_eq!(decode("\"\"\n"), vec![vec![""]]);
    }

    #[test]
    fn test_decode_literal_quote_mid_field() {
        assert_eq!(decode("ab\"c,d\n"), vec![vec!["ab\"c", "d"]]);
    }

    #[test]
    fn test_row_line_numbers() {
        let mut reader = RowReader::new(Cursor::new("a\n\"multi\nline\"\n\nb\n"));
        assert_eq!(reader.next_row().unwrap().unwrap().line, 1);
        assert_eq!(reader.next_row().unwrap().unwrap().line, 2);
        assert_eq!(reader.next_row().unwrap().unwrap().line, 5);
        assert!(reader.next_row().unwrap().is_none());
    }

    #[test]
    fn test_unterminated_quote() {
        let mut reader = RowReader::new(Cursor::new("a,\"open\nstill open\n"));
        let err = reader.next_row().unwrap_err();
        assert!(matches!(err, DecodeError::UnterminatedQuote { line: 1 }));
    }

    #[test]
    fn test_round_trip_awkward_fields() {
        let fields = ["", "Brontë, Charlotte", "\"Quoted\"", "a,b", "line\nbreak"];
        let encoded = encode_row(&fields);
        assert_eq!(decode(&encoded), vec![fields.to_vec()]);
    }
}
