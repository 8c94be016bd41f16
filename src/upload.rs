// Upload handlers - load source files into the two stores
//
// The query engines never write; these handlers are the only write path.
// Both are idempotent: uploading the same file twice leaves the store as it
// was after the first upload. A journal node is replaced wholesale, so a
// corrected row overwrites the values uploaded before it.

use crate::bibliographic::{connect, DOAJ_NS, JOURNAL_NS, MEMORY_LOCATION, SCHEMA_NS};
use crate::db::{self, UploadStats};
use crate::error::{Error, Result};
use crate::handler::{require_location, validate_location, Handler};
use crate::parser::{load_journals_csv, load_taxonomy_json, JournalRecord, TaxonomyRecord};
use crate::sparql::{literal, MemoryGraph, SparqlClient};
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

/// Records per update request
const INSERT_BATCH_SIZE: usize = 200;

pub trait UploadHandler: Handler {
    /// Load a source file into the store; returns the number of records read
    fn push_data_to_db(&self, path: &Path) -> Result<usize>;
}

// ============================================================================
// TAXONOMY (JSON -> SQLite)
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct CategoryUploadHandler {
    db_path: String,
}

impl CategoryUploadHandler {
    pub fn new() -> Self {
        CategoryUploadHandler::default()
    }

    pub fn with_location(location: &str) -> Result<Self> {
        let mut handler = CategoryUploadHandler::new();
        handler.set_db_path_or_url(location)?;
        Ok(handler)
    }

    pub fn push_records(&self, records: &[TaxonomyRecord]) -> Result<UploadStats> {
        let mut conn = db::open_read_write(require_location(&self.db_path)?)?;
        let stats = db::insert_taxonomy_records(&mut conn, records)?;

        info!(
            db = %self.db_path,
            records = records.len(),
            journals = stats.journals,
            categories = stats.categories,
            areas = stats.areas,
            assignments = stats.assignments,
            "taxonomy upload complete"
        );
        Ok(stats)
    }
}

impl Handler for CategoryUploadHandler {
    fn db_path_or_url(&self) -> &str {
        &self.db_path
    }

    fn set_db_path_or_url(&mut self, location: &str) -> Result<()> {
        self.db_path = validate_location(location)?;
        Ok(())
    }
}

impl UploadHandler for CategoryUploadHandler {
    fn push_data_to_db(&self, path: &Path) -> Result<usize> {
        require_location(&self.db_path)?;
        let records = load_taxonomy_json(path)?;
        self.push_records(&records)?;
        Ok(records.len())
    }
}

// ============================================================================
// JOURNALS (CSV -> graph)
// ============================================================================

#[derive(Clone, Default)]
pub struct JournalUploadHandler {
    location: String,
    client: Option<Arc<dyn SparqlClient>>,
}

fn yes_no(value: &str) -> &'static str {
    if value.trim().eq_ignore_ascii_case("yes") {
        "Yes"
    } else {
        "No"
    }
}

fn journal_node(record: &JournalRecord) -> String {
    format!("<{}{}>", JOURNAL_NS, record.idempotency_hash())
}

/// Turtle-style triple block describing one journal node
fn journal_triples(record: &JournalRecord) -> String {
    let mut triples = format!(
        "{} a <{}Periodical> ;\n    <{}name> {} ;\n    <{}identifier> {} ;\n    <{}inLanguage> {} ;\n",
        journal_node(record),
        SCHEMA_NS,
        SCHEMA_NS,
        literal(record.title.trim()),
        SCHEMA_NS,
        literal(&record.identifier_field()),
        SCHEMA_NS,
        literal(record.languages.trim()),
    );

    if !record.publisher.trim().is_empty() {
        triples.push_str(&format!(
            "    <{}publisher> {} ;\n",
            SCHEMA_NS,
            literal(record.publisher.trim())
        ));
    }

    triples.push_str(&format!(
        "    <{}seal> \"{}\" ;\n    <{}license> {} ;\n    <{}apc> \"{}\" .\n",
        DOAJ_NS,
        yes_no(&record.seal),
        SCHEMA_NS,
        literal(record.licence.trim()),
        DOAJ_NS,
        yes_no(&record.apc),
    ));

    triples
}

/// Clear the batch's nodes, then insert them again in one request
fn replace_batch(batch: &[JournalRecord]) -> String {
    let mut update: String = batch
        .iter()
        .map(|record| format!("DELETE WHERE {{ {} ?p ?o }} ;\n", journal_node(record)))
        .collect();
    let body: String = batch.iter().map(journal_triples).collect();
    update.push_str(&format!("INSERT DATA {{\n{}}}", body));
    update
}

impl JournalUploadHandler {
    pub fn new() -> Self {
        JournalUploadHandler::default()
    }

    pub fn with_location(location: &str) -> Result<Self> {
        let mut handler = JournalUploadHandler::new();
        handler.set_db_path_or_url(location)?;
        Ok(handler)
    }

    /// Bind to an in-process store
    pub fn with_store(graph: MemoryGraph) -> Self {
        JournalUploadHandler {
            location: MEMORY_LOCATION.to_string(),
            client: Some(Arc::new(graph)),
        }
    }

    pub fn push_records(&self, records: &[JournalRecord]) -> Result<usize> {
        require_location(&self.location)?;
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| Error::invalid_argument("database path or URL is not set"))?;

        for batch in records.chunks(INSERT_BATCH_SIZE) {
            client.update(&replace_batch(batch))?;
        }

        info!(location = %self.location, records = records.len(), "journal upload complete");
        Ok(records.len())
    }
}

impl fmt::Debug for JournalUploadHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JournalUploadHandler")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl Handler for JournalUploadHandler {
    fn db_path_or_url(&self) -> &str {
        &self.location
    }

    fn set_db_path_or_url(&mut self, location: &str) -> Result<()> {
        let location = validate_location(location)?;
        self.client = Some(connect(&location)?);
        self.location = location;
        Ok(())
    }
}

impl UploadHandler for JournalUploadHandler {
    fn push_data_to_db(&self, path: &Path) -> Result<usize> {
        require_location(&self.location)?;
        let records = load_journals_csv(path)?;
        self.push_records(&records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bibliographic::{BibliographicQueryHandler, BibliographicReader};
    use crate::parser::CategoryAssignment;
    use std::io::Write;

    fn record(title: &str, issn: &str) -> JournalRecord {
        JournalRecord {
            title: title.to_string(),
            issn: issn.to_string(),
            languages: "English".to_string(),
            seal: "yes".to_string(),
            licence: "CC BY".to_string(),
            apc: "No".to_string(),
            ..JournalRecord::default()
        }
    }

    #[test]
    fn test_journal_upload_twice_is_idempotent() {
        let graph = MemoryGraph::new().unwrap();
        let handler = JournalUploadHandler::with_store(graph.clone());
        let records = vec![record("AI Quarterly", "1111-1111"), record("Logic Today", "2222-2222")];

        handler.push_records(&records).unwrap();
        let after_first = graph.len().unwrap();
        handler.push_records(&records).unwrap();

        assert_eq!(graph.len().unwrap(), after_first);
        // 2 journals x 7 triples (no publisher)
        assert_eq!(after_first, 14);
    }

    #[test]
    fn test_corrected_row_replaces_previous_values() {
        let graph = MemoryGraph::new().unwrap();
        let handler = JournalUploadHandler::with_store(graph.clone());
        let original = record("AI Quarterly", "1111-1111");
        let corrected = JournalRecord {
            licence: "CC BY-SA".to_string(),
            apc: "Yes".to_string(),
            ..original.clone()
        };

        handler.push_records(&[original]).unwrap();
        handler.push_records(&[corrected.clone()]).unwrap();
        handler.push_records(&[corrected]).unwrap();

        assert_eq!(graph.len().unwrap(), 7);
        let rows = BibliographicQueryHandler::with_store(graph)
            .get_all_journals()
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].licence, "CC BY-SA");
        assert!(rows[0].has_apc());
    }

    #[test]
    fn test_replace_batch_clears_each_node_first() {
        let update = replace_batch(&[record("AI Quarterly", "1111-1111")]);
        let delete = update.find("DELETE WHERE").unwrap();
        let insert = update.find("INSERT DATA").unwrap();
        assert!(delete < insert);
        assert_eq!(update.matches("DELETE WHERE").count(), 1);
    }

    #[test]
    fn test_triples_escape_literals() {
        let triples = journal_triples(&record("The \"Quoted\" Review", "1111-1111"));
        assert!(triples.contains(r#""The \"Quoted\" Review""#));
        assert!(triples.contains(r#"<https://doaj.org/ontology#seal> "Yes""#));
    }

    #[test]
    fn test_unset_location_rejected() {
        let journals = JournalUploadHandler::new();
        assert!(journals.push_records(&[]).unwrap_err().is_invalid_argument());

        let categories = CategoryUploadHandler::new();
        assert!(categories
            .push_data_to_db(Path::new("missing.json"))
            .unwrap_err()
            .is_invalid_argument());
    }

    #[test]
    fn test_category_upload_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let json_path = dir.path().join("taxonomy.json");
        let records = vec![TaxonomyRecord {
            identifiers: vec!["1111-1111".to_string()],
            categories: vec![CategoryAssignment {
                id: "AI".to_string(),
                quartile: Some("Q1".to_string()),
            }],
            areas: vec!["Computer Science".to_string()],
        }];
        let mut file = std::fs::File::create(&json_path).unwrap();
        file.write_all(serde_json::to_string(&records).unwrap().as_bytes())
            .unwrap();

        let db_path = dir.path().join("taxonomy.db");
        let handler = CategoryUploadHandler::with_location(db_path.to_str().unwrap()).unwrap();

        assert_eq!(handler.push_data_to_db(&json_path).unwrap(), 1);
        let conn = db::open_for_query(db_path.to_str().unwrap()).unwrap();
        assert_eq!(db::count_rows(&conn, "areas_categories").unwrap(), 1);
    }
}
