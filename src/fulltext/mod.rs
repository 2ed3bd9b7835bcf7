pub mod concordance;

use std::{ops::Range, sync::Arc};

use indexmap::IndexMap;
use regex::{Regex, RegexBuilder};
use serde::Serialize;
use tracing::debug;

use crate::{
    corpus::{document::Document, DocId},
    error::{Error, Result},
    fulltext::concordance::{Concordance, ConcordanceLine},
};

/// Region `start..end` (byte offsets) of the concatenated text owned by one
/// document. `end` includes the trailing separator.
#[derive(Debug, Clone)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
    pub id: DocId,
    pub doc: Arc<Document>,
}

/// One whole-word keyword hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub doc_id: DocId,
    pub title: String,
    pub snippet: String,
}

/// All document bodies joined by a separator, plus the span of each document.
///
/// The spans are sorted, contiguous and cover the whole text exactly once.
#[derive(Debug, Clone, Default)]
pub struct FullText {
    text: String,
    spans: Vec<TextSpan>,
    separator: char,
}

impl FullText {
    pub fn build<'a, I>(documents: I, separator: char) -> Self
    where
        I: IntoIterator<Item = (&'a DocId, &'a Arc<Document>)>,
    {
        let mut text = String::new();
        let mut spans = Vec::new();
        for (id, doc) in documents {
            let start = text.len();
            text.push_str(&doc.text);
            text.push(separator);
            spans.push(TextSpan {
                start,
                end: text.len(),
                id: *id,
                doc: Arc::clone(doc),
            });
        }
        FullText { text, spans, separator }
    }

    #[inline]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[inline]
    pub fn spans(&self) -> &[TextSpan] {
        &self.spans
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// End of the document body inside `span`, i.e. before the separator.
    #[inline]
    fn body_end(&self, span: &TextSpan) -> usize {
        span.end - self.separator.len_utf8()
    }

    /// Span containing byte offset `pos` (binary search).
    pub fn span_at(&self, pos: usize) -> Option<&TextSpan> {
        let i = self.spans.partition_point(|s| s.end <= pos);
        self.spans.get(i).filter(|s| s.start <= pos)
    }

    /// Whole-word, case-insensitive search for a literal keyword.
    ///
    /// Each hit carries up to `context` characters on both sides, clipped to
    /// the owning document and trimmed.
    pub fn search(&self, keyword: &str, context: usize) -> Result<Vec<SearchHit>> {
        if keyword.is_empty() {
            return Err(Error::EmptyPattern);
        }
        let re = RegexBuilder::new(&format!(r"\b{}\b", regex::escape(keyword)))
            .case_insensitive(true)
            .build()?;
        let hits = self
            .matches(&re)
            .map(|(m, span)| {
                let lo = clip_left(&self.text, span.start, m.start, context);
                let hi = clip_right(&self.text, m.end, self.body_end(span), context);
                SearchHit {
                    doc_id: span.id,
                    title: span.doc.title.clone(),
                    snippet: self.text[lo..hi].trim().to_string(),
                }
            })
            .collect();
        Ok(hits)
    }

    /// Keyword-in-context listing for a case-insensitive regular expression.
    pub fn concordance(&self, pattern: &str, context: usize) -> Result<Concordance> {
        if pattern.is_empty() {
            return Err(Error::EmptyPattern);
        }
        let re = RegexBuilder::new(pattern).case_insensitive(true).build()?;
        let lines = self
            .matches(&re)
            .map(|(m, span)| {
                let lo = clip_left(&self.text, span.start, m.start, context);
                let hi = clip_right(&self.text, m.end, self.body_end(span), context);
                ConcordanceLine {
                    doc_id: span.id,
                    document: span.doc.title.clone(),
                    left: self.text[lo..m.start].trim().to_string(),
                    matched: self.text[m.clone()].to_string(),
                    right: self.text[m.end..hi].trim().to_string(),
                }
            })
            .collect();
        Ok(Concordance { lines })
    }

    /// Left-to-right matches as byte ranges of the full text, with their
    /// owning span. The pattern runs over one document body at a time, so a
    /// match never reaches the separator. Zero-length matches are dropped.
    fn matches<'t>(&'t self, re: &'t Regex) -> impl Iterator<Item = (Range<usize>, &'t TextSpan)> + 't {
        self.spans.iter().flat_map(move |span| {
            let body = &self.text[span.start..self.body_end(span)];
            re.find_iter(body)
                .filter(|m| !m.is_empty())
                .map(move |m| (span.start + m.start()..span.start + m.end(), span))
        })
    }
}

/// Byte offset `n` characters before `pos`, not below `floor`.
fn clip_left(text: &str, floor: usize, pos: usize, n: usize) -> usize {
    if n == 0 {
        return pos;
    }
    text[floor..pos]
        .char_indices()
        .rev()
        .nth(n - 1)
        .map_or(floor, |(i, _)| floor + i)
}

/// Byte offset `n` characters after `pos`, not above `ceil`.
fn clip_right(text: &str, pos: usize, ceil: usize, n: usize) -> usize {
    text[pos..ceil]
        .char_indices()
        .nth(n)
        .map_or(ceil, |(i, _)| pos + i)
}

/// Lazily built [`FullText`] owned by the store.
///
/// The store calls [`invalidate`](Self::invalidate) on every write and
/// [`ensure_built`](Self::ensure_built) before every read, so a query never
/// sees text older than the last write.
#[derive(Debug, Clone)]
pub struct FullTextCache {
    separator: char,
    built: Option<FullText>,
}

impl FullTextCache {
    pub fn new(separator: char) -> Self {
        FullTextCache {
            separator,
            built: None,
        }
    }

    #[inline]
    pub fn separator(&self) -> char {
        self.separator
    }

    #[inline]
    pub fn invalidate(&mut self) {
        self.built = None;
    }

    #[inline]
    pub fn is_built(&self) -> bool {
        self.built.is_some()
    }

    /// Build unconditionally, replacing any cached text.
    pub fn rebuild(&mut self, documents: &IndexMap<DocId, Arc<Document>>) -> &FullText {
        self.built.insert(build_logged(documents, self.separator))
    }

    pub fn ensure_built(&mut self, documents: &IndexMap<DocId, Arc<Document>>) -> &FullText {
        let separator = self.separator;
        self.built.get_or_insert_with(|| build_logged(documents, separator))
    }
}

fn build_logged(documents: &IndexMap<DocId, Arc<Document>>, separator: char) -> FullText {
    let full = FullText::build(documents, separator);
    debug!(documents = full.spans.len(), bytes = full.len(), "rebuilt full-text cache");
    full
}
