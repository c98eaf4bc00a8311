//! Translation tables: a source's local vocabulary -> canonical identifiers.
//!
//! A table is loaded once per process and never mutated afterwards. Terms
//! are matched exactly after trimming. A term listed against more than one
//! canonical identifier is ambiguous; lookups for it fail rather than guess.

use std::collections::HashMap;
use std::io::BufRead;
use std::path::Path;
use tracing::debug;

use crate::core::types::{Identifier, ModelError};
use crate::parsing::records::{open_table, ParseError, RecordReader};
use crate::utils::validation::non_empty;

#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: HashMap<String, Vec<Identifier>>,
}

impl TranslationTable {
    /// Build a table from `(local_term, canonical_id)` pairs.
    /// Repeated pairs collapse; a term with two different ids becomes ambiguous.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Identifier>,
    {
        let mut entries: HashMap<String, Vec<Identifier>> = HashMap::new();
        for (term, id) in pairs {
            let term = term.into().trim().to_string();
            let id = id.into();
            let candidates = entries.entry(term).or_default();
            if !candidates.contains(&id) {
                candidates.push(id);
            }
        }
        Self { entries }
    }

    /// Parse a two-column table: `local_term<TAB>canonical_id`
    ///
    /// # Errors
    ///
    /// Returns `ParseError::InvalidFormat` if a row does not have two
    /// non-empty columns.
    pub fn parse_text(text: &str) -> Result<Self, ParseError> {
        Self::from_reader(text.as_bytes())
    }

    /// Load a table from a file (optionally gzipped)
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be read, or
    /// `ParseError::InvalidFormat` for malformed rows.
    pub fn load(path: &Path) -> Result<Self, ParseError> {
        let table = Self::from_reader(open_table(path)?)?;
        debug!(
            "Loaded {} translation terms from {}",
            table.len(),
            path.display()
        );
        Ok(table)
    }

    fn from_reader<R: BufRead>(reader: R) -> Result<Self, ParseError> {
        let mut rows = RecordReader::new(reader, '\t', &["term", "local_term"], pair_from_fields);
        let mut pairs = Vec::new();
        for row in rows.by_ref() {
            pairs.push(row.map_err(|e| ParseError::InvalidFormat(e.to_string()))?);
        }
        rows.finish()?;
        Ok(Self::from_pairs(pairs))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a local term.
    ///
    /// Returns `Ok(None)` for unknown terms.
    ///
    /// # Errors
    ///
    /// Returns `ModelError::AmbiguousMapping` if the term maps to more than
    /// one canonical identifier.
    pub fn resolve(&self, term: &str) -> Result<Option<&Identifier>, ModelError> {
        match self.entries.get(term.trim()).map(Vec::as_slice) {
            None | Some([]) => Ok(None),
            Some([id]) => Ok(Some(id)),
            Some(candidates) => Err(ModelError::AmbiguousMapping {
                term: term.to_string(),
                candidates: candidates.iter().map(ToString::to_string).collect(),
            }),
        }
    }
}

fn pair_from_fields(fields: &[&str]) -> Result<(String, Identifier), ModelError> {
    let term = fields.first().copied().and_then(non_empty);
    let id = fields.get(1).copied().and_then(non_empty);
    match (term, id) {
        (Some(term), Some(id)) => Ok((term.to_string(), Identifier::new(id))),
        _ => Err(ModelError::invalid("needs a term and a canonical identifier")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        let table = TranslationTable::from_pairs([
            ("gene", "SO:0000704"),
            ("has phenotype", "RO:0002200"),
        ]);
        assert_eq!(
            table.resolve("gene").unwrap(),
            Some(&Identifier::new("SO:0000704"))
        );
        assert_eq!(
            table.resolve(" has phenotype ").unwrap(),
            Some(&Identifier::new("RO:0002200"))
        );
        assert_eq!(table.resolve("pseudogene").unwrap(), None);
    }

    #[test]
    fn test_ambiguous_term() {
        let table =
            TranslationTable::from_pairs([("marker", "SO:0001645"), ("marker", "SO:0000110")]);
        assert!(matches!(
            table.resolve("marker"),
            Err(ModelError::AmbiguousMapping { candidates, .. }) if candidates.len() == 2
        ));
    }

    #[test]
    fn test_repeated_pair_is_not_ambiguous() {
        let table = TranslationTable::from_pairs([("gene", "SO:0000704"), ("gene", "SO:0000704")]);
        assert!(table.resolve("gene").unwrap().is_some());
    }

    #[test]
    fn test_parse_text() {
        let text = "# relations
term\tid
is marker for\tRO:0002607
causes\tRO:0003303
";
        let table = TranslationTable::parse_text(text).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(
            table.resolve("causes").unwrap(),
            Some(&Identifier::new("RO:0003303"))
        );
    }

    #[test]
    fn test_parse_text_rejects_half_rows() {
        let result = TranslationTable::parse_text("gene\tSO:0000704\npseudogene\n");
        assert!(matches!(
            result,
            Err(ParseError::InvalidFormat(msg)) if msg.contains("line 2")
        ));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("types.tsv");
        std::fs::write(&path, "gene\tSO:0000704\n").unwrap();
        let table = TranslationTable::load(&path).unwrap();
        assert_eq!(table.len(), 1);
    }
}
