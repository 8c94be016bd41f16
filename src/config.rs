// Engine configuration - which backends a query session federates
//
// {
//   "taxonomy": ["data/taxonomy.db"],
//   "bibliographic": ["http://localhost:9999/blazegraph/sparql"],
//   "match_strategy": "containment"
// }
//
// Locations are kept as raw JSON values so that a non-string entry is
// reported as an invalid argument instead of a generic parse error.

use crate::bibliographic::BibliographicQueryHandler;
use crate::engine::FullQueryEngine;
use crate::error::{Error, Result};
use crate::reconciliation::MatchStrategy;
use crate::taxonomy::TaxonomyQueryHandler;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct EngineConfig {
    /// SQLite files holding taxonomy stores
    #[serde(default)]
    pub taxonomy: Vec<Value>,

    /// SPARQL endpoint URLs holding bibliographic stores
    #[serde(default)]
    pub bibliographic: Vec<Value>,

    #[serde(default)]
    pub match_strategy: MatchStrategy,
}

fn location_str(value: &Value) -> Result<&str> {
    value.as_str().ok_or_else(|| {
        Error::invalid_argument(format!("backend location must be a string, got {}", value))
    })
}

impl EngineConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        Ok(serde_json::from_reader(reader)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn taxonomy_locations(&self) -> Result<Vec<&str>> {
        self.taxonomy.iter().map(location_str).collect()
    }

    pub fn bibliographic_locations(&self) -> Result<Vec<&str>> {
        self.bibliographic.iter().map(location_str).collect()
    }

    /// Engine with one handler registered per configured location
    pub fn build_engine(&self) -> Result<FullQueryEngine> {
        let mut engine = FullQueryEngine::with_strategy(self.match_strategy);

        for location in self.taxonomy_locations()? {
            engine.add_category_handler(Arc::new(TaxonomyQueryHandler::with_location(location)?));
        }
        for location in self.bibliographic_locations()? {
            engine.add_journal_handler(Arc::new(BibliographicQueryHandler::with_location(
                location,
            )?));
        }

        info!(
            taxonomy = engine.basic().category_handlers().len(),
            bibliographic = engine.basic().journal_handlers().len(),
            strategy = ?self.match_strategy,
            "query engine ready"
        );
        Ok(engine)
    }
}
