//! Tab-delimited corpus files.
//!
//! One header line naming the columns, then one document per line:
//!
//! ```text
//! id  title  author  date  url  text  type
//! ```
//!
//! Tabs, newlines, carriage returns and backslashes inside a field are
//! backslash-escaped so a record always stays on one line.

use std::{
    borrow::Cow,
    io::{BufRead, Write},
};

use crate::{
    corpus::{
        document::{Document, DocumentKind},
        Corpus,
    },
    error::{Error, Result, RowError},
};

pub const COL_ID: &str = "id";
pub const COL_TITLE: &str = "title";
pub const COL_AUTHOR: &str = "author";
pub const COL_DATE: &str = "date";
pub const COL_URL: &str = "url";
pub const COL_TEXT: &str = "text";
pub const COL_TYPE: &str = "type";

/// Required columns, in the order they are written.
pub const COLUMNS: [&str; 7] = [COL_ID, COL_TITLE, COL_AUTHOR, COL_DATE, COL_URL, COL_TEXT, COL_TYPE];

/// A parsed data row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    /// id as stored in the file; the store assigns fresh ids on load
    pub id: u64,
    pub document: Document,
}

pub fn escape_field(field: &str) -> Cow<'_, str> {
    if !field.contains(['\\', '\t', '\n', '\r']) {
        return Cow::Borrowed(field);
    }
    let mut out = String::with_capacity(field.len() + 8);
    for c in field.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\t' => out.push_str("\\t"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

pub fn unescape_field(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut chars = field.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('\\') => out.push('\\'),
            Some('t') => out.push('\t'),
            Some('n') => out.push('\n'),
            Some('r') => out.push('\r'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    out
}

/// Write every document of `corpus`, in store order.
pub fn write_tsv<W: Write>(mut w: W, corpus: &Corpus) -> Result<()> {
    writeln!(w, "{}", COLUMNS.join("\t"))?;
    for (id, doc) in corpus.iter() {
        writeln!(
            w,
            "{}\t{}\t{}\t{}\t{}\t{}\t{}",
            id,
            escape_field(&doc.title),
            escape_field(&doc.author),
            escape_field(&doc.date),
            escape_field(&doc.url),
            escape_field(&doc.text),
            doc.type_tag(),
        )?;
    }
    w.flush()?;
    Ok(())
}

/// Column positions resolved from the header line.
struct Layout {
    positions: [usize; 7],
    width: usize,
}

impl Layout {
    fn from_header(header: &str) -> Result<Self> {
        let names: Vec<&str> = header.split('\t').map(str::trim).collect();
        let mut positions = [0usize; 7];
        for (slot, col) in positions.iter_mut().zip(COLUMNS) {
            *slot = names
                .iter()
                .position(|n| *n == col)
                .ok_or(Error::MissingColumn(col))?;
        }
        Ok(Layout {
            positions,
            width: names.len(),
        })
    }

    fn parse(&self, line_no: usize, line: &str) -> std::result::Result<Row, RowError> {
        let fields: Vec<&str> = line.split('\t').collect();
        if fields.len() < self.width {
            return Err(RowError::new(
                line_no,
                format!("expected {} fields, found {}", self.width, fields.len()),
            ));
        }
        let field = |i: usize| unescape_field(fields[self.positions[i]]);

        let raw_id = fields[self.positions[0]].trim();
        let id = raw_id
            .parse::<u64>()
            .map_err(|_| RowError::new(line_no, format!("invalid id {:?}", raw_id)))?;
        let kind = DocumentKind::from_tag(fields[self.positions[6]].trim());
        let document = Document::new(field(1), field(2), field(3), field(4), field(5)).with_kind(kind);
        Ok(Row { id, document })
    }
}

/// Read a corpus file.
///
/// A missing header column fails the whole read. Individual data rows are
/// returned as they parse, malformed ones as `RowError` so the caller decides
/// whether to skip them. Blank lines are ignored.
pub fn read_tsv<R: BufRead>(reader: R) -> Result<Vec<std::result::Result<Row, RowError>>> {
    let mut lines = reader.lines();
    let layout = match lines.next() {
        Some(header) => Layout::from_header(&header?)?,
        None => return Ok(Vec::new()),
    };
    let mut rows = Vec::new();
    for (i, line) in lines.enumerate() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        if line.trim().is_empty() {
            continue;
        }
        // header is line 1
        rows.push(layout.parse(i + 2, line));
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn escaping_roundtrips_control_characters() {
        let raw = "a\tb\nc\\d\re";
        let escaped = escape_field(raw);
        assert!(!escaped.contains('\t') && !escaped.contains('\n'));
        assert_eq!(unescape_field(&escaped), raw);
        assert!(matches!(escape_field("plain"), Cow::Borrowed("plain")));
    }

    #[test]
    fn columns_may_be_reordered_and_extended() {
        let data = "type\ttext\turl\tdate\tauthor\ttitle\tid\textra\n\
                    Reddit\thello world\thttp://x\t2024-01-01\tann\tHi\t7\tignored\n";
        let rows = read_tsv(Cursor::new(data)).unwrap();
        assert_eq!(rows.len(), 1);
        let row = rows[0].as_ref().unwrap();
        assert_eq!(row.id, 7);
        assert_eq!(row.document.title, "Hi");
        assert_eq!(row.document.text, "hello world");
        assert_eq!(row.document.kind, DocumentKind::Reddit { comments: 0 });
    }

    #[test]
    fn unknown_type_degrades_to_plain() {
        let data = "id\ttitle\tauthor\tdate\turl\ttext\ttype\n1\tT\tA\td\tu\tx\tPodcast\n";
        let rows = read_tsv(Cursor::new(data)).unwrap();
        assert_eq!(rows[0].as_ref().unwrap().document.kind, DocumentKind::Plain);
    }

    #[test]
    fn malformed_rows_are_reported_not_raised() {
        let data = "id\ttitle\tauthor\tdate\turl\ttext\ttype\n\
                    x\tT\tA\td\tu\tx\tDocument\n\
                    2\tshort\n\
                    \n\
                    3\tT\tA\td\tu\tx\tDocument\n";
        let rows = read_tsv(Cursor::new(data)).unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].as_ref().unwrap_err().line, 2);
        assert_eq!(rows[1].as_ref().unwrap_err().line, 3);
        assert_eq!(rows[2].as_ref().unwrap().id, 3);
    }

    #[test]
    fn missing_column_fails_the_read() {
        let data = "id\ttitle\tauthor\tdate\ttext\ttype\n";
        let res = read_tsv(Cursor::new(data));
        assert!(matches!(res, Err(Error::MissingColumn("url"))));
    }

    #[test]
    fn empty_input_has_no_rows() {
        assert!(read_tsv(Cursor::new("")).unwrap().is_empty());
    }
}
