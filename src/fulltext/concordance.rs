use std::{fmt, io::Write};

use serde::Serialize;

use crate::{corpus::{persist::escape_field, DocId}, error::Result};

/// One keyword-in-context record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConcordanceLine {
    pub doc_id: DocId,
    /// title of the owning document
    pub document: String,
    pub left: String,
    #[serde(rename = "match")]
    pub matched: String,
    pub right: String,
}

/// Ordered concordance table (document order, then position).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Concordance {
    pub lines: Vec<ConcordanceLine>,
}

impl Concordance {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ConcordanceLine> {
        self.lines.iter()
    }

    /// Tab-separated export with a `document, left, match, right` header.
    pub fn write_tsv<W: Write>(&self, mut w: W) -> Result<()> {
        writeln!(w, "document\tleft\tmatch\tright")?;
        for line in &self.lines {
            writeln!(
                w,
                "{}\t{}\t{}\t{}",
                escape_field(&line.document),
                escape_field(&line.left),
                escape_field(&line.matched),
                escape_field(&line.right)
            )?;
        }
        w.flush()?;
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Concordance {
    type Item = &'a ConcordanceLine;
    type IntoIter = std::slice::Iter<'a, ConcordanceLine>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

impl fmt::Display for Concordance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // right-align the left context so the matches line up
        let width = self.lines.iter().map(|l| l.left.chars().count()).max().unwrap_or(0);
        for line in &self.lines {
            writeln!(
                f,
                "{}: ...{:>width$} [{}] {}...",
                line.document,
                line.left,
                line.matched,
                line.right,
                width = width
            )?;
        }
        Ok(())
    }
}
