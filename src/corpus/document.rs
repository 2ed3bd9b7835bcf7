use std::fmt;

use serde::{Deserialize, Serialize};

/// Variant-specific payload of a [`Document`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DocumentKind {
    #[default]
    Plain,
    /// social post
    Reddit { comments: u64 },
    /// publication with co-authors besides the main author
    Arxiv { coauthors: Vec<String> },
}

impl DocumentKind {
    pub const PLAIN_TAG: &'static str = "Document";
    pub const REDDIT_TAG: &'static str = "Reddit";
    pub const ARXIV_TAG: &'static str = "Arxiv";

    /// Tag written to the `type` column of a corpus file.
    pub fn tag(&self) -> &'static str {
        match self {
            DocumentKind::Plain => Self::PLAIN_TAG,
            DocumentKind::Reddit { .. } => Self::REDDIT_TAG,
            DocumentKind::Arxiv { .. } => Self::ARXIV_TAG,
        }
    }

    /// Inverse of [`tag`](Self::tag). Subtype fields are not persisted, so
    /// they come back defaulted; unknown tags degrade to `Plain`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            Self::REDDIT_TAG => DocumentKind::Reddit { comments: 0 },
            Self::ARXIV_TAG => DocumentKind::Arxiv { coauthors: Vec::new() },
            _ => DocumentKind::Plain,
        }
    }
}

/// A text document with its metadata.
///
/// Once added to a [`Corpus`](crate::Corpus) a document is shared behind an
/// `Arc` and never mutated again.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub title: String,
    pub author: String,
    /// ISO-8601 timestamp or `YYYY-MM-DD...` as delivered by the source
    pub date: String,
    pub url: String,
    pub text: String,
    pub kind: DocumentKind,
}

impl Document {
    pub fn new(
        title: impl Into<String>,
        author: impl Into<String>,
        date: impl Into<String>,
        url: impl Into<String>,
        text: impl Into<String>,
    ) -> Self {
        Document {
            title: title.into(),
            author: author.into(),
            date: date.into(),
            url: url.into(),
            text: text.into(),
            kind: DocumentKind::Plain,
        }
    }

    pub fn with_kind(mut self, kind: DocumentKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn type_tag(&self) -> &'static str {
        self.kind.tag()
    }

    pub fn comments(&self) -> Option<u64> {
        match &self.kind {
            DocumentKind::Reddit { comments } => Some(*comments),
            _ => None,
        }
    }

    pub fn coauthors(&self) -> &[String] {
        match &self.kind {
            DocumentKind::Arxiv { coauthors } => coauthors,
            _ => &[],
        }
    }

    /// Add a co-author unless already listed. No-op for non-publication documents.
    pub fn add_coauthor(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        match &mut self.kind {
            DocumentKind::Arxiv { coauthors } if !coauthors.contains(&name) => {
                coauthors.push(name);
                true
            }
            _ => false,
        }
    }

    pub fn word_count(&self) -> usize {
        self.text.split_whitespace().count()
    }
}

impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            DocumentKind::Plain => write!(f, "Document: {}", self.title),
            DocumentKind::Reddit { comments } => write!(
                f,
                "{}: '{}' by {} ({}) - {} comments",
                self.type_tag(),
                self.title,
                self.author,
                self.date,
                comments
            ),
            DocumentKind::Arxiv { coauthors } => {
                let coauthors = if coauthors.is_empty() {
                    "none".to_string()
                } else {
                    coauthors.join(", ")
                };
                write!(
                    f,
                    "{}: '{}' by {} ({}) - co-authors: {}",
                    self.type_tag(),
                    self.title,
                    self.author,
                    self.date,
                    coauthors
                )
            }
        }
    }
}
