//! Standard record -> model -> graph transformations.

use tracing::debug;

use crate::core::association::Association;
use crate::core::feature::{chromosome_feature, taxon_curie, Feature};
use crate::core::position::make_chrom_id;
use crate::core::types::{Identifier, ModelError};
use crate::core::vocab;
use crate::graph::Graph;
use crate::ingest::RecordOutcome;
use crate::parsing::records::{AssociationRecord, FeatureRecord};
use crate::parsing::translation::TranslationTable;

/// Resolve a raw relation to a predicate.
///
/// Tried in order: the source's translation table, the built-in relationship
/// vocabulary, then the raw value itself if it is already a compact URI.
///
/// # Errors
///
/// Returns `ModelError::AmbiguousMapping` if the translation table maps the
/// relation to several predicates.
pub fn resolve_relation(
    relation: &str,
    table: Option<&TranslationTable>,
) -> Result<Option<Identifier>, ModelError> {
    let relation = relation.trim();
    if relation.is_empty() {
        return Ok(None);
    }
    if let Some(table) = table {
        if let Some(id) = table.resolve(relation)? {
            return Ok(Some(id.clone()));
        }
    }
    if let Some(id) = vocab::relationship(relation) {
        return Ok(Some(id));
    }
    let Some(candidate) = term_as_written(relation) else {
        return Ok(None);
    };
    if !vocab::is_known_relationship(candidate.as_str()) {
        debug!("Relation {candidate} is not in the built-in vocabulary; using it as written");
    }
    Ok(Some(candidate))
}

// An IRI, or a CURIE with both a prefix and a local name
fn term_as_written(raw: &str) -> Option<Identifier> {
    let candidate = Identifier::new(raw.trim());
    if candidate.is_empty() || candidate.as_str().contains(char::is_whitespace) {
        return None;
    }
    if candidate.is_iri() {
        return Some(candidate);
    }
    let has_prefix = candidate.prefix().is_some_and(|p| !p.is_empty());
    (has_prefix && !candidate.local_name().is_empty()).then_some(candidate)
}

fn resolve_feature_type(
    raw: &str,
    table: Option<&TranslationTable>,
) -> Result<Identifier, ModelError> {
    if let Some(table) = table {
        if let Some(id) = table.resolve(raw)? {
            return Ok(id.clone());
        }
    }
    term_as_written(raw).ok_or_else(|| {
        ModelError::invalid(format!(
            "feature type '{raw}' is not an ontology term and has no translation"
        ))
    })
}

/// Emit one feature row: the feature, its location on the taxon-scoped
/// chromosome, the chromosome itself, and the feature's taxon.
///
/// # Errors
///
/// Returns `ModelError::InvalidInput` for untranslatable types, coordinates
/// without a chromosome, or a chromosome label that normalizes to nothing;
/// `ModelError::AmbiguousMapping` if the type translation is ambiguous.
pub fn emit_feature_record(
    graph: &mut dyn Graph,
    record: &FeatureRecord,
    types: Option<&TranslationTable>,
) -> Result<RecordOutcome, ModelError> {
    let feature_type = resolve_feature_type(&record.feature_type, types)?;
    let mut feature = Feature::new(record.id.clone(), record.label.clone(), feature_type);

    let has_coordinates = record.start.is_some() || record.end.is_some();
    let reference = match record.chrom.as_deref() {
        Some(chrom) => Some(make_chrom_id(chrom, record.taxon.as_deref())?),
        None if has_coordinates => {
            return Err(ModelError::invalid(format!(
                "feature {} has coordinates but no chromosome",
                record.id
            )));
        }
        None => None,
    };

    if let Some(reference) = &reference {
        if let Some(start) = record.start {
            feature.set_start(start, reference.clone(), record.strand, [])?;
        }
        if let Some(end) = record.end {
            feature.set_end(end, reference.clone(), record.strand, [])?;
        }
    }

    // Build everything before touching the graph so a bad row adds nothing
    let chromosome = record
        .chrom
        .as_deref()
        .map(|chrom| chromosome_feature(chrom, record.taxon.as_deref()))
        .transpose()?;

    feature.emit(graph)?;
    if let Some(taxon) = record.taxon.as_deref() {
        feature.add_taxon(graph, taxon_curie(taxon));
    }
    if let Some(chromosome) = chromosome {
        chromosome.emit(graph)?;
    }

    Ok(RecordOutcome::Emitted)
}

/// Emit one association row under the ingest's `source` tag.
///
/// # Errors
///
/// Returns `ModelError::UnresolvedPredicate` (carrying the raw relation)
/// when the relation cannot be resolved; nothing is emitted in that case.
/// Returns `ModelError::AmbiguousMapping` for ambiguous relation translations.
pub fn emit_association_record(
    graph: &mut dyn Graph,
    source: &str,
    record: &AssociationRecord,
    relations: Option<&TranslationTable>,
) -> Result<RecordOutcome, ModelError> {
    let Some(predicate) = resolve_relation(&record.relation, relations)? else {
        return Err(ModelError::UnresolvedPredicate {
            subject: record.subject.to_string(),
            object: record.object.to_string(),
            relation: record.relation.clone(),
        });
    };

    let mut association =
        Association::new(source, record.subject.clone(), record.object.clone())
            .with_predicate(predicate);
    for evidence in &record.evidence {
        association.add_evidence(evidence.clone());
    }
    for citation in &record.sources {
        association.add_source(citation.clone());
    }
    if let Some(description) = &record.description {
        association.set_description(description.clone());
    }

    match association.emit(graph) {
        Some(id) => {
            debug!("Emitted association {id}");
            Ok(RecordOutcome::Emitted)
        }
        None => Ok(RecordOutcome::Ignored),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::position::Strand;
    use crate::graph::MemoryGraph;
    use crate::ingest::{Ingest, IngestOptions};
    use crate::parsing::records::parse_association_text;
    use tracing_test::traced_test;

    fn id(s: &str) -> Identifier {
        Identifier::new(s)
    }

    fn ins_record() -> FeatureRecord {
        FeatureRecord {
            id: id("NCBIGene:3630"),
            label: Some("INS".to_string()),
            feature_type: "SO:0000704".to_string(),
            chrom: Some("chr11".to_string()),
            start: Some(2_159_779),
            end: Some(2_161_209),
            strand: Strand::Minus,
            taxon: Some("9606".to_string()),
        }
    }

    #[test]
    fn test_resolve_relation_order() {
        let table = TranslationTable::from_pairs([("has_phenotype", "RO:9999999")]);
        // table wins over the built-in vocabulary
        assert_eq!(
            resolve_relation("has_phenotype", Some(&table)).unwrap(),
            Some(id("RO:9999999"))
        );
        assert_eq!(
            resolve_relation("has_phenotype", None).unwrap(),
            Some(id("RO:0002200"))
        );
        assert_eq!(
            resolve_relation("RO:0002434", None).unwrap(),
            Some(id("RO:0002434"))
        );
        assert_eq!(resolve_relation("likes", None).unwrap(), None);
        assert_eq!(resolve_relation("", None).unwrap(), None);
    }

    #[test]
    fn test_resolve_relation_written_terms() {
        let iri = "http://purl.obolibrary.org/obo/RO_0002200";
        assert_eq!(resolve_relation(iri, None).unwrap(), Some(id(iri)));
        assert_eq!(resolve_relation("likes:", None).unwrap(), None);
        assert_eq!(resolve_relation(":likes", None).unwrap(), None);
        assert_eq!(resolve_relation("RO: 0002200", None).unwrap(), None);
    }

    #[test]
    fn test_feature_type_and_relation_agree() {
        for raw in [
            "SO:0000704",
            "http://purl.obolibrary.org/obo/SO_0000704",
            "SO:",
            "gene",
        ] {
            assert_eq!(
                resolve_relation(raw, None).unwrap().is_some(),
                resolve_feature_type(raw, None).is_ok(),
                "{raw}"
            );
        }
    }

    #[test]
    #[traced_test]
    fn test_unlisted_relation_is_logged() {
        resolve_relation("RO:0002434", None).unwrap();
        assert!(!logs_contain("not in the built-in vocabulary"));
        resolve_relation("RO:9999999", None).unwrap();
        assert!(logs_contain("RO:9999999 is not in the built-in vocabulary"));
    }

    #[test]
    fn test_emit_feature_record() {
        let mut graph = MemoryGraph::new();
        let outcome = emit_feature_record(&mut graph, &ins_record(), None).unwrap();
        assert_eq!(outcome, RecordOutcome::Emitted);

        let gene = id("NCBIGene:3630");
        assert!(graph.contains_node(&gene, &vocab::term(vocab::IN_TAXON), &id("NCBITaxon:9606")));
        assert!(graph.contains_node(
            &id(":9606chr11"),
            &vocab::term(vocab::RDF_TYPE),
            &vocab::term(vocab::SO_CHROMOSOME)
        ));
        let region = graph.objects(&gene, &vocab::term(vocab::FALDO_LOCATION))[0]
            .as_node()
            .unwrap()
            .clone();
        let begin = graph.objects(&region, &vocab::term(vocab::FALDO_BEGIN))[0]
            .as_node()
            .unwrap()
            .clone();
        assert!(graph.contains_node(
            &begin,
            &vocab::term(vocab::RDF_TYPE),
            &vocab::term(vocab::FALDO_MINUS_STRAND)
        ));
        assert!(graph.contains_node(
            &begin,
            &vocab::term(vocab::FALDO_REFERENCE),
            &id(":9606chr11")
        ));
    }

    #[test]
    fn test_feature_type_translation() {
        let types = TranslationTable::from_pairs([("gene", "SO:0000704")]);
        let mut record = ins_record();
        record.feature_type = "gene".to_string();

        let mut graph = MemoryGraph::new();
        emit_feature_record(&mut graph, &record, Some(&types)).unwrap();
        assert!(graph.contains_node(
            &id("NCBIGene:3630"),
            &vocab::term(vocab::RDF_TYPE),
            &id("SO:0000704")
        ));

        let mut graph = MemoryGraph::new();
        let err = emit_feature_record(&mut graph, &record, None).unwrap_err();
        assert!(matches!(err, ModelError::InvalidInput(_)));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_coordinates_without_chromosome_rejected() {
        let mut record = ins_record();
        record.chrom = None;
        let mut graph = MemoryGraph::new();
        assert!(emit_feature_record(&mut graph, &record, None).is_err());
        assert!(graph.is_empty());
    }

    #[test]
    fn test_emit_association_record_unresolved() {
        let records = parse_association_text("MGI:1\tlikes\tMP:1\tECO:1\tPMID:1\n", '\t').unwrap();
        let record = records[0].as_ref().unwrap();

        let mut graph = MemoryGraph::new();
        let err = emit_association_record(&mut graph, "mgi", record, None).unwrap_err();
        assert!(matches!(
            err,
            ModelError::UnresolvedPredicate { ref relation, .. } if relation == "likes"
        ));
        assert!(graph.is_empty());
    }

    #[test]
    fn test_association_ingest_end_to_end() {
        let text = "NCBIGene:3630\thas_phenotype\tHP:0000819\tECO:0000033\tPMID:1
NCBIGene:3630\tlikes\tHP:0000819\t\t
NCBIGene:3630\tambiguous\tHP:0000819\t\t
NCBIGene:3630\thas_phenotype\tHP:0000819\tECO:0000033\tPMID:1
";
        let relations = TranslationTable::from_pairs([
            ("ambiguous", "RO:0000001"),
            ("ambiguous", "RO:0000002"),
        ]);
        let records = parse_association_text(text, '\t').unwrap();

        let mut graph = MemoryGraph::new();
        let mut ingest = Ingest::new(&mut graph, IngestOptions::new("ctd"));
        ingest.process(records, |g, record| {
            emit_association_record(g, "ctd", &record, Some(&relations))
        });
        let summary = ingest.finish();

        assert_eq!(summary.records_read, 4);
        assert_eq!(summary.records_emitted, 2);
        assert_eq!(summary.associations_dropped, 1);
        assert_eq!(summary.records_skipped, 1);
        // direct + type + s/p/o + evidence + source; the repeat adds nothing
        assert_eq!(summary.triples_added, 7);
        assert_eq!(graph.len(), summary.header_triples + 7);
    }
}
