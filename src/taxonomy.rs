// Taxonomy Query Handler - categories, areas and quartiles over SQLite
//
// Every filter follows one convention: an empty filter list means
// "unfiltered", never "match nothing". Nullable quartile filters get an
// explicit `IS NULL` disjunct because NULL never matches an IN list.

use crate::db;
use crate::entities::{Area, Category, IdentifierSet, Quartile};
use crate::error::Result;
use crate::handler::{require_location, validate_location, Handler};
use rusqlite::types::Value;
use rusqlite::{params_from_iter, OptionalExtension, Row};
use serde::Serialize;
use tracing::{debug, instrument};

// ============================================================================
// ROWS (surrogate keys stripped)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct CategoryRow {
    pub name: String,
    pub quartile: Option<Quartile>,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct AreaRow {
    pub name: String,
}

/// The two identifier columns of a taxonomy journal; either may be NULL
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct IdentifierPair {
    pub identifier_1: Option<String>,
    pub identifier_2: Option<String>,
}

impl IdentifierPair {
    pub fn new(identifier_1: Option<&str>, identifier_2: Option<&str>) -> Self {
        IdentifierPair {
            identifier_1: identifier_1.map(str::to_string),
            identifier_2: identifier_2.map(str::to_string),
        }
    }

    /// Non-null identifiers, first column first
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.identifier_1
            .as_deref()
            .into_iter()
            .chain(self.identifier_2.as_deref())
    }

    pub fn to_identifier_set(&self) -> Result<IdentifierSet> {
        IdentifierSet::new(self.iter())
    }
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Category::new(row.name, row.quartile)
    }
}

impl From<AreaRow> for Area {
    fn from(row: AreaRow) -> Self {
        Area::new(row.name)
    }
}

/// First match of a taxonomy `get_by_id` probe, tagged with its kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TaxonomyHit {
    Area(AreaRow),
    Category(CategoryRow),
    Journal(IdentifierPair),
}

// ============================================================================
// READER CAPABILITY
// ============================================================================

/// Read capability over one taxonomy store
pub trait TaxonomyReader: Send + Sync {
    /// Probe areas, then categories, then journals for an exact match
    fn get_by_id(&self, id: &str) -> Result<Option<TaxonomyHit>>;

    fn get_all_categories(&self) -> Result<Vec<CategoryRow>>;

    fn get_all_areas(&self) -> Result<Vec<AreaRow>>;

    /// `None` inside `quartiles` selects categories without a quartile
    fn get_categories_with_quartile(&self, quartiles: &[Option<Quartile>])
        -> Result<Vec<CategoryRow>>;

    fn get_categories_assigned_to_areas(&self, area_ids: &[&str]) -> Result<Vec<CategoryRow>>;

    fn get_areas_assigned_to_categories(&self, category_ids: &[&str]) -> Result<Vec<AreaRow>>;

    /// Categories of the journals whose identifier_1 or identifier_2 is listed
    fn get_journal_categories(&self, journal_ids: &[&str]) -> Result<Vec<CategoryRow>>;

    fn get_journal_areas(&self, journal_ids: &[&str]) -> Result<Vec<AreaRow>>;

    /// Journals in an area listed in `area_ids` and holding one of the
    /// (category, quartile) combinations built from the two other lists
    fn get_journals_by_area_and_category_with_quartile(
        &self,
        area_ids: &[&str],
        category_ids: &[&str],
        quartiles: &[Option<Quartile>],
    ) -> Result<Vec<IdentifierPair>>;

    fn get_journals_by_category_with_quartile(
        &self,
        category_ids: &[&str],
        quartiles: &[Option<Quartile>],
    ) -> Result<Vec<IdentifierPair>> {
        self.get_journals_by_area_and_category_with_quartile(&[], category_ids, quartiles)
    }

    fn get_journals_by_area(&self, area_ids: &[&str]) -> Result<Vec<IdentifierPair>> {
        self.get_journals_by_area_and_category_with_quartile(area_ids, &[], &[])
    }
}

// ============================================================================
// SQL PREDICATES
// ============================================================================

/// SQL fragment with its positional parameters
struct Predicate {
    sql: String,
    params: Vec<Value>,
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}

fn text_in(column: &str, values: &[&str]) -> Option<Predicate> {
    if values.is_empty() {
        return None;
    }

    Some(Predicate {
        sql: format!("{} IN ({})", column, placeholders(values.len())),
        params: values.iter().map(|v| Value::Text(v.to_string())).collect(),
    })
}

fn quartile_in(column: &str, quartiles: &[Option<Quartile>]) -> Option<Predicate> {
    if quartiles.is_empty() {
        return None;
    }

    let labels: Vec<Value> = quartiles
        .iter()
        .flatten()
        .map(|q| Value::Text(q.as_str().to_string()))
        .collect();
    let wants_null = quartiles.iter().any(Option::is_none);

    let sql = match (labels.is_empty(), wants_null) {
        (false, true) => format!(
            "({} IN ({}) OR {} IS NULL)",
            column,
            placeholders(labels.len()),
            column
        ),
        (false, false) => format!("{} IN ({})", column, placeholders(labels.len())),
        (true, _) => format!("{} IS NULL", column),
    };

    Some(Predicate { sql, params: labels })
}

fn journal_identifier_in(journal_ids: &[&str]) -> Option<Predicate> {
    if journal_ids.is_empty() {
        return None;
    }

    let list = placeholders(journal_ids.len());
    let ids: Vec<Value> = journal_ids.iter().map(|v| Value::Text(v.to_string())).collect();
    let mut params = ids.clone();
    params.extend(ids);

    Some(Predicate {
        sql: format!("(j.identifier_1 IN ({}) OR j.identifier_2 IN ({}))", list, list),
        params,
    })
}

/// Disjunction over every (name, quartile) pair; vacuous when either list is empty
fn category_combinations(category_ids: &[&str], quartiles: &[Option<Quartile>]) -> Option<Predicate> {
    let mut terms = Vec::new();
    let mut params = Vec::new();

    for name in category_ids {
        for quartile in quartiles {
            params.push(Value::Text(name.to_string()));
            match quartile {
                Some(q) => {
                    terms.push("(c.name = ? AND c.quartile = ?)");
                    params.push(Value::Text(q.as_str().to_string()));
                }
                None => terms.push("(c.name = ? AND c.quartile IS NULL)"),
            }
        }
    }

    if terms.is_empty() {
        None
    } else {
        Some(Predicate {
            sql: format!("({})", terms.join(" OR ")),
            params,
        })
    }
}

fn exists(subquery: &str, inner: Option<Predicate>) -> Option<Predicate> {
    inner.map(|p| Predicate {
        sql: format!("EXISTS ({} AND {})", subquery, p.sql),
        params: p.params,
    })
}

/// " WHERE a AND b" over the present predicates, "" when none are
fn where_all(predicates: Vec<Option<Predicate>>) -> Predicate {
    let present: Vec<Predicate> = predicates.into_iter().flatten().collect();
    if present.is_empty() {
        return Predicate {
            sql: String::new(),
            params: Vec::new(),
        };
    }

    let sql = format!(
        " WHERE {}",
        present.iter().map(|p| p.sql.as_str()).collect::<Vec<_>>().join(" AND ")
    );
    let params = present.into_iter().flat_map(|p| p.params).collect();
    Predicate { sql, params }
}

fn category_row(row: &Row<'_>) -> rusqlite::Result<CategoryRow> {
    Ok(CategoryRow {
        name: row.get(0)?,
        quartile: row.get(1)?,
    })
}

fn area_row(row: &Row<'_>) -> rusqlite::Result<AreaRow> {
    Ok(AreaRow { name: row.get(0)? })
}

fn identifier_pair(row: &Row<'_>) -> rusqlite::Result<IdentifierPair> {
    Ok(IdentifierPair {
        identifier_1: row.get(0)?,
        identifier_2: row.get(1)?,
    })
}

// ============================================================================
// SQLITE HANDLER
// ============================================================================

/// Taxonomy handler bound to one SQLite file
#[derive(Debug, Clone, Default)]
pub struct TaxonomyQueryHandler {
    db_path: String,
}

impl TaxonomyQueryHandler {
    pub fn new() -> Self {
        TaxonomyQueryHandler::default()
    }

    pub fn with_location(location: &str) -> Result<Self> {
        let mut handler = TaxonomyQueryHandler::new();
        handler.set_db_path_or_url(location)?;
        Ok(handler)
    }

    /// Run one SELECT on a connection scoped to this call
    fn query_rows<T, F>(&self, sql: &str, params: Vec<Value>, map: F) -> Result<Vec<T>>
    where
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = db::open_for_query(require_location(&self.db_path)?)?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params_from_iter(params.iter()), map)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        debug!(db = %self.db_path, rows = rows.len(), "taxonomy query");
        Ok(rows)
    }
}

impl Handler for TaxonomyQueryHandler {
    fn db_path_or_url(&self) -> &str {
        &self.db_path
    }

    fn set_db_path_or_url(&mut self, location: &str) -> Result<()> {
        self.db_path = validate_location(location)?;
        Ok(())
    }
}

impl TaxonomyReader for TaxonomyQueryHandler {
    #[instrument(level = "debug", skip(self))]
    fn get_by_id(&self, id: &str) -> Result<Option<TaxonomyHit>> {
        let conn = db::open_for_query(require_location(&self.db_path)?)?;

        let area = conn
            .query_row(
                "SELECT name FROM areas WHERE name = ?1 ORDER BY id LIMIT 1",
                [id],
                area_row,
            )
            .optional()?;
        if let Some(area) = area {
            return Ok(Some(TaxonomyHit::Area(area)));
        }

        let category = conn
            .query_row(
                "SELECT name, quartile FROM categories WHERE name = ?1 ORDER BY id LIMIT 1",
                [id],
                category_row,
            )
            .optional()?;
        if let Some(category) = category {
            return Ok(Some(TaxonomyHit::Category(category)));
        }

        let journal = conn
            .query_row(
                "SELECT identifier_1, identifier_2 FROM journals
                 WHERE identifier_1 = ?1 OR identifier_2 = ?1
                 ORDER BY id LIMIT 1",
                [id],
                identifier_pair,
            )
            .optional()?;

        Ok(journal.map(TaxonomyHit::Journal))
    }

    fn get_all_categories(&self) -> Result<Vec<CategoryRow>> {
        self.query_rows(
            "SELECT name, quartile FROM categories ORDER BY id",
            Vec::new(),
            category_row,
        )
    }

    fn get_all_areas(&self) -> Result<Vec<AreaRow>> {
        self.query_rows("SELECT name FROM areas ORDER BY id", Vec::new(), area_row)
    }

    #[instrument(level = "debug", skip(self))]
    fn get_categories_with_quartile(
        &self,
        quartiles: &[Option<Quartile>],
    ) -> Result<Vec<CategoryRow>> {
        let filter = where_all(vec![quartile_in("quartile", quartiles)]);
        self.query_rows(
            &format!("SELECT name, quartile FROM categories{} ORDER BY id", filter.sql),
            filter.params,
            category_row,
        )
    }

    #[instrument(level = "debug", skip(self))]
    fn get_categories_assigned_to_areas(&self, area_ids: &[&str]) -> Result<Vec<CategoryRow>> {
        let filter = where_all(vec![text_in("a.name", area_ids)]);
        self.query_rows(
            &format!(
                "SELECT DISTINCT c.name, c.quartile, c.id FROM categories c
                 JOIN areas_categories ac ON ac.category_id = c.id
                 JOIN areas a ON a.id = ac.area_id{}
                 ORDER BY c.id",
                filter.sql
            ),
            filter.params,
            category_row,
        )
    }

    #[instrument(level = "debug", skip(self))]
    fn get_areas_assigned_to_categories(&self, category_ids: &[&str]) -> Result<Vec<AreaRow>> {
        let filter = where_all(vec![text_in("c.name", category_ids)]);
        self.query_rows(
            &format!(
                "SELECT DISTINCT a.name, a.id FROM areas a
                 JOIN areas_categories ac ON ac.area_id = a.id
                 JOIN categories c ON c.id = ac.category_id{}
                 ORDER BY a.id",
                filter.sql
            ),
            filter.params,
            area_row,
        )
    }

    #[instrument(level = "debug", skip(self))]
    fn get_journal_categories(&self, journal_ids: &[&str]) -> Result<Vec<CategoryRow>> {
        let filter = where_all(vec![journal_identifier_in(journal_ids)]);
        self.query_rows(
            &format!(
                "SELECT DISTINCT c.name, c.quartile, c.id FROM categories c
                 JOIN journals_categories jc ON jc.category_id = c.id
                 JOIN journals j ON j.id = jc.journal_id{}
                 ORDER BY c.id",
                filter.sql
            ),
            filter.params,
            category_row,
        )
    }

    #[instrument(level = "debug", skip(self))]
    fn get_journal_areas(&self, journal_ids: &[&str]) -> Result<Vec<AreaRow>> {
        let filter = where_all(vec![journal_identifier_in(journal_ids)]);
        self.query_rows(
            &format!(
                "SELECT DISTINCT a.name, a.id FROM areas a
                 JOIN journals_areas ja ON ja.area_id = a.id
                 JOIN journals j ON j.id = ja.journal_id{}
                 ORDER BY a.id",
                filter.sql
            ),
            filter.params,
            area_row,
        )
    }

    #[instrument(level = "debug", skip(self))]
    fn get_journals_by_area_and_category_with_quartile(
        &self,
        area_ids: &[&str],
        category_ids: &[&str],
        quartiles: &[Option<Quartile>],
    ) -> Result<Vec<IdentifierPair>> {
        let filter = where_all(vec![
            exists(
                "SELECT 1 FROM journals_areas ja JOIN areas a ON a.id = ja.area_id
                 WHERE ja.journal_id = j.id",
                text_in("a.name", area_ids),
            ),
            exists(
                "SELECT 1 FROM journals_categories jc JOIN categories c ON c.id = jc.category_id
                 WHERE jc.journal_id = j.id",
                category_combinations(category_ids, quartiles),
            ),
        ]);

        self.query_rows(
            &format!(
                "SELECT j.identifier_1, j.identifier_2 FROM journals j{} ORDER BY j.id",
                filter.sql
            ),
            filter.params,
            identifier_pair,
        )
    }
}
