//! Dataset provenance.
//!
//! Every ingest describes the source it read: a [`Dataset`] node keyed on the
//! ingest's source tag, with the release it came from, when that release was
//! issued, its license and the works it cites.
//!
//! ```text
//! :ctd          a dctypes:Dataset ; dcterms:title "CTD" ; dcterms:identifier "ctd"
//! :ctd          dcterms:license <license> ; cito:citesAsAuthority PMID:...
//! :ctd/2024-06  dcterms:isVersionOf :ctd ; pav:version "2024-06"
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use tracing::debug;

use crate::core::types::Identifier;
use crate::core::vocab;
use crate::graph::{Graph, Literal};

static ISO_DATE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    id: Identifier,
    /// The ingest's source tag, as given
    source: String,
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<Identifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub license: Option<Identifier>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rights: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_issued: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    citations: Vec<Identifier>,
}

impl Dataset {
    /// A dataset named after `source`. Whitespace in the tag becomes `_` in
    /// the node id; the tag itself is kept as the dataset's identifier.
    pub fn new(source: &str) -> Self {
        let source = source.trim();
        Self {
            id: Identifier::new(format!(":{}", underscore_whitespace(source))),
            source: source.to_string(),
            title: source.to_string(),
            page: None,
            description: None,
            license: None,
            rights: None,
            version: None,
            date_issued: None,
            citations: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    #[must_use]
    pub fn with_license(mut self, license: Identifier) -> Self {
        self.license = Some(license);
        self
    }

    #[must_use]
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    #[must_use]
    pub fn with_date_issued(mut self, date: impl Into<String>) -> Self {
        self.date_issued = Some(date.into());
        self
    }

    /// Cite a work as the authority for this dataset. Repeats are ignored.
    pub fn add_citation(&mut self, citation: Identifier) {
        if !self.citations.contains(&citation) {
            self.citations.push(citation);
        }
    }

    #[must_use]
    pub fn id(&self) -> &Identifier {
        &self.id
    }

    #[must_use]
    pub fn source(&self) -> &str {
        &self.source
    }

    #[must_use]
    pub fn citations(&self) -> &[Identifier] {
        &self.citations
    }

    /// Node for the release named by `version`, if one is set
    #[must_use]
    pub fn version_id(&self) -> Option<Identifier> {
        let version = self.version.as_deref()?.trim();
        if version.is_empty() {
            return None;
        }
        Some(Identifier::new(format!(
            "{}/{}",
            self.id,
            underscore_whitespace(version)
        )))
    }

    fn issued_literal(&self) -> Option<Literal> {
        let date = self.date_issued.as_deref()?.trim();
        if date.is_empty() {
            return None;
        }
        if ISO_DATE.is_match(date) {
            Some(Literal {
                value: date.to_string(),
                datatype: Some(vocab::term(vocab::XSD_DATE)),
            })
        } else {
            Some(Literal::plain(date))
        }
    }

    /// Add the dataset's triples to `graph` and return its id
    pub fn emit<G: Graph + ?Sized>(&self, graph: &mut G) -> Identifier {
        let id = &self.id;
        graph.add_node(
            id,
            &vocab::term(vocab::RDF_TYPE),
            &vocab::term(vocab::DCTYPES_DATASET),
        );
        graph.add_literal(id, &vocab::term(vocab::DC_TITLE), &self.title);
        graph.add_literal(id, &vocab::term(vocab::DC_IDENTIFIER), &self.source);

        if let Some(page) = &self.page {
            graph.add_node(id, &vocab::term(vocab::FOAF_PAGE), page);
        }
        if let Some(description) = &self.description {
            graph.add_literal(id, &vocab::term(vocab::DC_DESCRIPTION), description);
        }
        if let Some(license) = &self.license {
            graph.add_node(id, &vocab::term(vocab::DC_LICENSE), license);
        }
        if let Some(rights) = &self.rights {
            graph.add_literal(id, &vocab::term(vocab::DC_RIGHTS), rights);
        }

        let issued = self.issued_literal();
        if let Some(issued) = &issued {
            graph.add_typed_literal(id, &vocab::term(vocab::DC_ISSUED), issued.clone());
        }

        if let Some(version_id) = self.version_id() {
            graph.add_node(&version_id, &vocab::term(vocab::DC_IS_VERSION_OF), id);
            if let Some(version) = self.version.as_deref() {
                graph.add_literal(&version_id, &vocab::term(vocab::PAV_VERSION), version.trim());
            }
            if let Some(issued) = issued {
                graph.add_typed_literal(&version_id, &vocab::term(vocab::DC_ISSUED), issued);
            }
        }

        for citation in &self.citations {
            graph.add_node(id, &vocab::term(vocab::CITO_CITES_AS_AUTHORITY), citation);
        }

        debug!("Emitted dataset {id}");
        id.clone()
    }
}

fn underscore_whitespace(s: &str) -> String {
    s.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
