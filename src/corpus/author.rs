use std::{fmt, sync::Arc};

use indexmap::IndexMap;
use tracing::warn;

use crate::corpus::document::Document;

/// Documents produced by one author, keyed by title.
#[derive(Debug, Clone)]
pub struct Author {
    pub name: String,
    production: IndexMap<String, Arc<Document>>,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Author {
            name: name.into(),
            production: IndexMap::new(),
        }
    }

    /// Record a document under `title`.
    ///
    /// First write wins: a second document with the same title is dropped
    /// (with a warning) and `false` is returned.
    pub fn add(&mut self, title: &str, doc: Arc<Document>) -> bool {
        if self.production.contains_key(title) {
            warn!(author = %self.name, title, "document already registered for author, ignoring");
            return false;
        }
        self.production.insert(title.to_string(), doc);
        true
    }

    pub fn doc_count(&self) -> usize {
        self.production.len()
    }

    pub fn production(&self) -> &IndexMap<String, Arc<Document>> {
        &self.production
    }

    /// Mean number of whitespace-separated words per document, 0 when empty.
    pub fn average_word_count(&self) -> f64 {
        if self.production.is_empty() {
            return 0.0;
        }
        let total: usize = self.production.values().map(|d| d.word_count()).sum();
        total as f64 / self.production.len() as f64
    }
}

impl fmt::Display for Author {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let titles = if self.production.is_empty() {
            "no documents".to_string()
        } else {
            self.production.keys().cloned().collect::<Vec<_>>().join(", ")
        };
        writeln!(f, "Author: {}", self.name)?;
        writeln!(f, "Documents: {}", self.doc_count())?;
        write!(f, "Production: {}", titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_write_wins() {
        let first = Arc::new(Document::new("T", "A", "2024-01-01", "u1", "one two"));
        let second = Arc::new(Document::new("T", "A", "2024-02-01", "u2", "three"));
        let mut author = Author::new("A");
        assert!(author.add("T", Arc::clone(&first)));
        assert!(!author.add("T", second));
        assert_eq!(author.doc_count(), 1);
        assert_eq!(author.production()["T"].url, "u1");
    }

    #[test]
    fn average_word_count() {
        let mut author = Author::new("A");
        assert_eq!(author.average_word_count(), 0.0);
        author.add("x", Arc::new(Document::new("x", "A", "d", "u", "one two")));
        author.add("y", Arc::new(Document::new("y", "A", "d", "u", "one two three four")));
        assert_eq!(author.average_word_count(), 3.0);
    }
}
