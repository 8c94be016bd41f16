// Journal Federation - Core Library
// Exposes handlers, query engines and uploads for the CLI and tests

pub mod error;
pub mod entities;       // Domain model: Area, Category, Journal
pub mod handler;        // Handler abstraction (location binding)
pub mod db;             // Taxonomy store: SQLite schema + inserts
pub mod parser;         // DOAJ CSV + taxonomy JSON input
pub mod sparql;         // Graph store access: in-process + remote endpoint
pub mod taxonomy;       // Taxonomy Query Handler
pub mod bibliographic;  // Bibliographic Query Handler
pub mod deduplication;  // Fan-out merge, first occurrence wins
pub mod reconciliation; // Cross-store identifier matching
pub mod engine;         // Basic + Full query engines
pub mod upload;         // Upload handlers (write path)
pub mod config;         // Engine configuration

// Re-export commonly used types
pub use error::{Error, Result};
pub use entities::{
    Area, Category, Entity, EntityKind, IdentifierSet, Journal, Quartile,
};
pub use handler::Handler;
pub use db::{setup_database, insert_taxonomy_records, UploadStats};
pub use parser::{
    JournalRecord, TaxonomyRecord, CategoryAssignment,
    load_journals_csv, load_taxonomy_json,
};
pub use sparql::{MemoryGraph, RemoteEndpoint, SparqlClient};
pub use taxonomy::{
    TaxonomyQueryHandler, TaxonomyReader, TaxonomyHit,
    CategoryRow, AreaRow, IdentifierPair,
};
pub use bibliographic::{
    BibliographicQueryHandler, BibliographicReader, JournalFilter, JournalRow,
};
pub use deduplication::{merge_unique, fan_out};
pub use reconciliation::{IdentifierMatcher, MatchStrategy, ReconciliationReport};
pub use engine::{BasicQueryEngine, FullQueryEngine};
pub use upload::{CategoryUploadHandler, JournalUploadHandler, UploadHandler};
pub use config::EngineConfig;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
