// SPARQL access - in-process oxigraph store or a remote SPARQL 1.1 endpoint
//
// Both backends answer SELECT queries with rows of variable -> plain string
// value. Each call is one stateless round-trip.

use crate::error::{Error, Result};
use oxigraph::model::{Literal, Term};
use oxigraph::sparql::QueryResults;
use oxigraph::store::Store;
use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// One solution of a SELECT query; unbound variables are absent
pub type Binding = BTreeMap<String, String>;

pub trait SparqlClient: Send + Sync {
    fn select(&self, query: &str) -> Result<Vec<Binding>>;

    fn update(&self, update: &str) -> Result<()>;
}

/// Render a string as an escaped SPARQL literal ("a \"b\"")
pub fn literal(value: &str) -> String {
    Literal::new_simple_literal(value).to_string()
}

// ============================================================================
// IN-PROCESS STORE
// ============================================================================

/// In-memory graph store; clones share the same data
#[derive(Clone)]
pub struct MemoryGraph {
    store: Store,
}

impl MemoryGraph {
    pub fn new() -> Result<Self> {
        Ok(MemoryGraph {
            store: Store::new()?,
        })
    }

    /// Number of triples held
    pub fn len(&self) -> Result<usize> {
        Ok(self.store.len()?)
    }

    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.store.is_empty()?)
    }
}

impl fmt::Debug for MemoryGraph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryGraph").finish_non_exhaustive()
    }
}

fn term_value(term: &Term) -> String {
    match term {
        Term::Literal(literal) => literal.value().to_string(),
        Term::NamedNode(node) => node.as_str().to_string(),
        other => other.to_string(),
    }
}

impl SparqlClient for MemoryGraph {
    fn select(&self, query: &str) -> Result<Vec<Binding>> {
        let QueryResults::Solutions(solutions) = self.store.query(query)? else {
            return Err(Error::invalid_argument("expected a SELECT query"));
        };

        let mut rows = Vec::new();
        for solution in solutions {
            let solution = solution?;
            rows.push(
                solution
                    .iter()
                    .map(|(variable, term)| (variable.as_str().to_string(), term_value(term)))
                    .collect(),
            );
        }

        debug!(rows = rows.len(), "in-process SPARQL select");
        Ok(rows)
    }

    fn update(&self, update: &str) -> Result<()> {
        self.store.update(update)?;
        Ok(())
    }
}

// ============================================================================
// REMOTE ENDPOINT
// ============================================================================

#[derive(Deserialize)]
struct SparqlJson {
    results: SparqlJsonResults,
}

#[derive(Deserialize)]
struct SparqlJsonResults {
    bindings: Vec<BTreeMap<String, SparqlJsonTerm>>,
}

#[derive(Deserialize)]
struct SparqlJsonTerm {
    value: String,
}

/// Decode an application/sparql-results+json document; unbound variables
/// stay absent from their row
pub(crate) fn decode_results(body: &str) -> Result<Vec<Binding>> {
    let results: SparqlJson = serde_json::from_str(body)?;

    Ok(results
        .results
        .bindings
        .into_iter()
        .map(|row| row.into_iter().map(|(k, term)| (k, term.value)).collect())
        .collect())
}

/// SPARQL 1.1 protocol endpoint (Blazegraph, Fuseki, oxigraph server, ...)
#[derive(Debug, Clone)]
pub struct RemoteEndpoint {
    url: String,
    client: Client,
}

impl RemoteEndpoint {
    pub fn new(url: &str) -> Result<Self> {
        Ok(RemoteEndpoint {
            url: url.to_string(),
            client: Client::builder().build()?,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    fn post_form(&self, field: &str, body: &str) -> Result<reqwest::blocking::Response> {
        let response = self
            .client
            .post(&self.url)
            .header(ACCEPT, "application/sparql-results+json")
            .form(&[(field, body)])
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::Endpoint {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            });
        }
        Ok(response)
    }
}

impl SparqlClient for RemoteEndpoint {
    fn select(&self, query: &str) -> Result<Vec<Binding>> {
        let rows = decode_results(&self.post_form("query", query)?.text()?)?;

        debug!(endpoint = %self.url, rows = rows.len(), "remote SPARQL select");
        Ok(rows)
    }

    fn update(&self, update: &str) -> Result<()> {
        self.post_form("update", update)?;
        Ok(())
    }
}
