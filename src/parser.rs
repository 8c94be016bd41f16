// Source file parsing - DOAJ journal CSV and taxonomy JSON
//
// Both formats are read into plain records here; the upload handlers turn
// them into graph triples and relational rows.

use crate::error::Result;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

// ============================================================================
// JOURNAL CSV (bibliographic store input)
// ============================================================================

/// One row of the DOAJ journal export
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct JournalRecord {
    #[serde(rename = "Journal title")]
    pub title: String,

    #[serde(rename = "Journal ISSN (print version)", default)]
    pub issn: String,

    #[serde(rename = "Journal EISSN (online version)", default)]
    pub eissn: String,

    /// Already ", "-joined in the export ("English, Italian")
    #[serde(rename = "Languages in which the journal accepts manuscripts", default)]
    pub languages: String,

    #[serde(rename = "Publisher", default)]
    pub publisher: String,

    /// "Yes" / "No"
    #[serde(rename = "DOAJ Seal", default)]
    pub seal: String,

    #[serde(rename = "Journal license", default)]
    pub licence: String,

    /// "Yes" / "No"
    #[serde(rename = "APC", default)]
    pub apc: String,
}

impl JournalRecord {
    /// ISSN and EISSN joined into the single identifier literal of the graph
    pub fn identifier_field(&self) -> String {
        [self.issn.trim(), self.eissn.trim()]
            .iter()
            .filter(|id| !id.is_empty())
            .copied()
            .collect::<Vec<_>>()
            .join(",")
    }

    /// Stable hash of the record identity, used to name its graph node so
    /// that uploading the same file twice writes the same node
    pub fn idempotency_hash(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(format!("{}|{}", self.identifier_field(), self.title.trim()));
        format!("{:x}", hasher.finalize())
    }
}

pub fn load_journals_csv(csv_path: &Path) -> Result<Vec<JournalRecord>> {
    read_journals_csv(File::open(csv_path)?)
}

pub fn read_journals_csv<R: Read>(reader: R) -> Result<Vec<JournalRecord>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    for result in rdr.deserialize() {
        let record: JournalRecord = result?;
        records.push(record);
    }

    Ok(records)
}

// ============================================================================
// TAXONOMY JSON (taxonomy store input)
// ============================================================================

/// Category assignment of one journal; `id` is the category name
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CategoryAssignment {
    pub id: String,

    #[serde(default)]
    pub quartile: Option<String>,
}

/// One journal entry of the taxonomy document
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TaxonomyRecord {
    #[serde(default)]
    pub identifiers: Vec<String>,

    #[serde(default)]
    pub categories: Vec<CategoryAssignment>,

    #[serde(default)]
    pub areas: Vec<String>,
}

pub fn load_taxonomy_json(json_path: &Path) -> Result<Vec<TaxonomyRecord>> {
    read_taxonomy_json(BufReader::new(File::open(json_path)?))
}

pub fn read_taxonomy_json<R: Read>(reader: R) -> Result<Vec<TaxonomyRecord>> {
    Ok(serde_json::from_reader(reader)?)
}
