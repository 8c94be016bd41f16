// Bibliographic Query Handler - journal metadata in a SPARQL graph store
//
// Graph shape: one schema:Periodical node per journal, every attribute a
// plain literal. The identifier literal holds ISSN and EISSN joined by ",",
// languages are ", "-joined, seal and APC flags are "Yes" / "No".
//
// All reads share one SELECT template; a query differs from another only in
// the FILTER clause plugged into it.

use crate::entities::IdentifierSet;
use crate::error::{Error, Result};
use crate::handler::{is_remote, require_location, validate_location, Handler};
use crate::sparql::{literal, Binding, MemoryGraph, RemoteEndpoint, SparqlClient};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

// ============================================================================
// VOCABULARY
// ============================================================================

pub const SCHEMA_NS: &str = "https://schema.org/";
pub const DOAJ_NS: &str = "https://doaj.org/ontology#";
pub const JOURNAL_NS: &str = "https://doaj.org/journal/";

/// Location reported by handlers bound to an in-process store
pub const MEMORY_LOCATION: &str = "memory:";

const PREFIXES: &str = "PREFIX schema: <https://schema.org/>\nPREFIX doaj: <https://doaj.org/ontology#>\n";

const SELECT_TEMPLATE: &str = "SELECT ?title ?identifier ?languages ?publisher ?seal ?licence ?apc
WHERE {
    ?journal a schema:Periodical ;
        schema:name ?title ;
        schema:identifier ?identifier ;
        schema:inLanguage ?languages ;
        doaj:seal ?seal ;
        schema:license ?licence ;
        doaj:apc ?apc .
    OPTIONAL { ?journal schema:publisher ?publisher }
    %FILTER%
}
ORDER BY ?identifier ?title";

// ============================================================================
// FILTERS
// ============================================================================

/// Interchangeable FILTER clause of the journal SELECT template
#[derive(Debug, Clone, PartialEq)]
pub enum JournalFilter {
    All,
    /// Case-insensitive substring of the title
    TitleContains(String),
    /// Case-insensitive substring of the publisher
    PublisherContains(String),
    /// Any of the licenses appears as a whole entry of the licence list;
    /// an empty list keeps every journal
    Licenses(Vec<String>),
    Apc(bool),
    DoajSeal,
    /// Identifier literal contains the given identifier
    IdentifierContains(String),
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "Yes"
    } else {
        "No"
    }
}

impl JournalFilter {
    pub fn clause(&self) -> String {
        match self {
            JournalFilter::All => String::new(),
            JournalFilter::TitleContains(partial) => format!(
                "FILTER(CONTAINS(LCASE(STR(?title)), LCASE({})))",
                literal(partial)
            ),
            JournalFilter::PublisherContains(partial) => format!(
                "FILTER(BOUND(?publisher) && CONTAINS(LCASE(STR(?publisher)), LCASE({})))",
                literal(partial)
            ),
            JournalFilter::Licenses(licenses) => {
                let terms: Vec<String> = licenses
                    .iter()
                    .map(|l| l.trim())
                    .filter(|l| !l.is_empty())
                    .map(|l| {
                        format!(
                            r#"CONTAINS(CONCAT(",", REPLACE(STR(?licence), "\\s*,\\s*", ","), ","), {})"#,
                            literal(&format!(",{},", l))
                        )
                    })
                    .collect();

                if terms.is_empty() {
                    String::new()
                } else {
                    format!("FILTER({})", terms.join(" || "))
                }
            }
            JournalFilter::Apc(flag) => format!("FILTER(STR(?apc) = \"{}\")", yes_no(*flag)),
            JournalFilter::DoajSeal => "FILTER(STR(?seal) = \"Yes\")".to_string(),
            JournalFilter::IdentifierContains(id) => {
                format!("FILTER(CONTAINS(STR(?identifier), {}))", literal(id))
            }
        }
    }

    /// Full SELECT query for this filter
    pub fn query(&self) -> String {
        format!("{}{}", PREFIXES, SELECT_TEMPLATE.replace("%FILTER%", &self.clause()))
    }
}

// ============================================================================
// ROWS
// ============================================================================

/// Bibliographic row as stored in the graph (node IRI dropped)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct JournalRow {
    pub title: String,
    pub identifier: String,
    pub languages: String,
    pub publisher: Option<String>,
    pub seal: String,
    pub licence: String,
    pub apc: String,
}

impl JournalRow {
    pub fn from_binding(binding: &Binding) -> Self {
        let text = |key: &str| binding.get(key).cloned().unwrap_or_default();

        JournalRow {
            title: text("title"),
            identifier: text("identifier"),
            languages: text("languages"),
            publisher: binding.get("publisher").cloned(),
            seal: text("seal"),
            licence: text("licence"),
            apc: text("apc"),
        }
    }

    /// Non-empty identifiers of the delimited identifier literal
    pub fn identifiers(&self) -> Result<IdentifierSet> {
        IdentifierSet::parse_delimited(&self.identifier)
    }

    pub fn language_list(&self) -> Vec<String> {
        if self.languages.trim().is_empty() {
            return Vec::new();
        }
        self.languages.split(", ").map(str::to_string).collect()
    }

    pub fn has_seal(&self) -> bool {
        self.seal == "Yes"
    }

    pub fn has_apc(&self) -> bool {
        self.apc == "Yes"
    }
}

// ============================================================================
// READER CAPABILITY
// ============================================================================

/// Read capability over one bibliographic store
pub trait BibliographicReader: Send + Sync {
    /// First journal whose identifier literal contains `id`
    fn get_by_id(&self, id: &str) -> Result<Option<JournalRow>>;

    fn get_all_journals(&self) -> Result<Vec<JournalRow>>;

    fn get_journals_with_title(&self, partial_title: &str) -> Result<Vec<JournalRow>>;

    fn get_journals_published_by(&self, partial_name: &str) -> Result<Vec<JournalRow>>;

    fn get_journals_with_license(&self, licenses: &[&str]) -> Result<Vec<JournalRow>>;

    fn get_journals_with_apc(&self) -> Result<Vec<JournalRow>>;

    fn get_journals_without_apc(&self) -> Result<Vec<JournalRow>>;

    fn get_journals_with_doaj_seal(&self) -> Result<Vec<JournalRow>>;
}

/// Connect to the graph store a location names
pub(crate) fn connect(location: &str) -> Result<Arc<dyn SparqlClient>> {
    if is_remote(location) {
        Ok(Arc::new(RemoteEndpoint::new(location)?))
    } else {
        Err(Error::invalid_argument(format!(
            "bibliographic location must be an http(s) SPARQL endpoint, got {:?}",
            location
        )))
    }
}

// ============================================================================
// SPARQL HANDLER
// ============================================================================

/// Bibliographic handler bound to one graph store
#[derive(Clone, Default)]
pub struct BibliographicQueryHandler {
    location: String,
    client: Option<Arc<dyn SparqlClient>>,
}

impl BibliographicQueryHandler {
    pub fn new() -> Self {
        BibliographicQueryHandler::default()
    }

    pub fn with_location(location: &str) -> Result<Self> {
        let mut handler = BibliographicQueryHandler::new();
        handler.set_db_path_or_url(location)?;
        Ok(handler)
    }

    /// Bind to an in-process store
    pub fn with_store(graph: MemoryGraph) -> Self {
        BibliographicQueryHandler {
            location: MEMORY_LOCATION.to_string(),
            client: Some(Arc::new(graph)),
        }
    }

    fn select(&self, filter: JournalFilter) -> Result<Vec<JournalRow>> {
        require_location(&self.location)?;
        let client = self
            .client
            .as_ref()
            .ok_or_else(|| Error::invalid_argument("database path or URL is not set"))?;

        let rows: Vec<JournalRow> = client
            .select(&filter.query())?
            .iter()
            .map(JournalRow::from_binding)
            .collect();

        debug!(location = %self.location, ?filter, rows = rows.len(), "bibliographic query");
        Ok(rows)
    }
}

impl fmt::Debug for BibliographicQueryHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BibliographicQueryHandler")
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}

impl Handler for BibliographicQueryHandler {
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

impl BibliographicReader for BibliographicQueryHandler {
    #[instrument(level = "debug", skip(self))]
    fn get_by_id(&self, id: &str) -> Result<Option<JournalRow>> {
        Ok(self
            .select(JournalFilter::IdentifierContains(id.to_string()))?
            .into_iter()
            .next())
    }

    fn get_all_journals(&self) -> Result<Vec<JournalRow>> {
        self.select(JournalFilter::All)
    }

    fn get_journals_with_title(&self, partial_title: &str) -> Result<Vec<JournalRow>> {
        self.select(JournalFilter::TitleContains(partial_title.to_string()))
    }

    fn get_journals_published_by(&self, partial_name: &str) -> Result<Vec<JournalRow>> {
        self.select(JournalFilter::PublisherContains(partial_name.to_string()))
    }

    fn get_journals_with_license(&self, licenses: &[&str]) -> Result<Vec<JournalRow>> {
        self.select(JournalFilter::Licenses(
            licenses.iter().map(|l| l.to_string()).collect(),
        ))
    }

    fn get_journals_with_apc(&self) -> Result<Vec<JournalRow>> {
        self.select(JournalFilter::Apc(true))
    }

    fn get_journals_without_apc(&self) -> Result<Vec<JournalRow>> {
        self.select(JournalFilter::Apc(false))
    }

    fn get_journals_with_doaj_seal(&self) -> Result<Vec<JournalRow>> {
        self.select(JournalFilter::DoajSeal)
    }
}
