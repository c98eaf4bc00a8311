use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Prefix marking an anonymous (minted) node
pub const ANONYMOUS_PREFIX: &str = "_:";

/// An opaque node identifier: a compact URI (`NCBIGene:1234`), a full IRI,
/// or a minted anonymous address (`_:position-...`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identifier(pub String);

impl Identifier {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// True for minted anonymous nodes
    #[must_use]
    pub fn is_anonymous(&self) -> bool {
        self.0.starts_with(ANONYMOUS_PREFIX)
    }

    /// True for fully-qualified IRIs rather than compact URIs
    #[must_use]
    pub fn is_iri(&self) -> bool {
        self.0.starts_with("http://") || self.0.starts_with("https://") || self.0.starts_with("ftp://")
    }

    /// Prefix of a compact URI (`NCBIGene` for `NCBIGene:1234`).
    /// Returns `None` for IRIs and anonymous nodes.
    #[must_use]
    pub fn prefix(&self) -> Option<&str> {
        if self.is_iri() || self.is_anonymous() {
            return None;
        }
        self.0.split_once(':').map(|(prefix, _)| prefix)
    }

    /// Local part of a compact URI (`1234` for `NCBIGene:1234`)
    #[must_use]
    pub fn local_name(&self) -> &str {
        if self.is_iri() {
            return &self.0;
        }
        self.0.split_once(':').map_or(self.0.as_str(), |(_, local)| local)
    }
}

impl std::fmt::Display for Identifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Identifier {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for Identifier {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for Identifier {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Recoverable, per-record modeling failures.
///
/// None of these abort an ingest: the driver logs them and skips the
/// offending record.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("No relationship resolved for {subject} -> {object} (relation: {relation})")]
    UnresolvedPredicate {
        subject: String,
        object: String,
        relation: String,
    },

    #[error("Ambiguous mapping for '{term}': {}", candidates.join(", "))]
    AmbiguousMapping {
        term: String,
        candidates: Vec<String>,
    },
}

impl ModelError {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }
}
