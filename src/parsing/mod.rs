//! Readers for the tabular inputs handed to the modeling core.
//!
//! This module provides:
//!
//! - **Feature tables**: one genomic feature per row
//! - **Association tables**: one subject–relation–object claim per row
//! - **Translation tables**: local vocabulary -> canonical identifiers
//!
//! All readers accept plain or gzip-compressed (`.gz`) tab-delimited files.
//!
//! ## Example
//!
//! ```rust
//! use bioforge::parsing::records::parse_feature_text;
//!
//! let text = "NCBIGene:3630\tINS\tSO:0000704\tchr11\t2159779\t2161209\t-\t9606\n";
//! let records = parse_feature_text(text, '\t').unwrap();
//! assert_eq!(records.len(), 1);
//! ```
//!
//! ## Columns
//!
//! | Table | Columns |
//! |-------|---------|
//! | features | id, label, type, chrom, start, end, strand, taxon |
//! | associations | subject, relation, object, evidence, sources, description |
//! | translation | local term, canonical id |
//!
//! Empty cells mean "absent". Multi-valued cells (evidence, sources) are
//! separated by `|`. A malformed row becomes an error for that row only.

pub mod records;
pub mod translation;
