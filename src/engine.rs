// Query engines - federated reads over every registered handler
//
// BasicQueryEngine keeps one ordered registry per handler kind and answers
// entity queries by fanning out to every handler of that kind, merging the
// result sets (first occurrence wins) and mapping rows to entities.
//
// FullQueryEngine adds cross-store queries: it resolves identifier pairs on
// the taxonomy side, candidate rows on the bibliographic side, and keeps the
// rows whose identifiers reconcile with a pair.
//
// Registries change only through `&mut self`; queries take `&self`.

use crate::bibliographic::{BibliographicReader, JournalRow};
use crate::deduplication::{fan_out, first_hit};
use crate::entities::{Area, Category, Entity, Journal, Quartile};
use crate::error::Result;
use crate::reconciliation::{IdentifierMatcher, MatchStrategy};
use crate::taxonomy::{IdentifierPair, TaxonomyHit, TaxonomyReader};
use std::fmt;
use std::sync::Arc;
use tracing::{debug, instrument};

// ============================================================================
// BASIC QUERY ENGINE
// ============================================================================

#[derive(Clone, Default)]
pub struct BasicQueryEngine {
    journal_handlers: Vec<Arc<dyn BibliographicReader>>,
    category_handlers: Vec<Arc<dyn TaxonomyReader>>,
}

impl fmt::Debug for BasicQueryEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicQueryEngine")
            .field("journal_handlers", &self.journal_handlers.len())
            .field("category_handlers", &self.category_handlers.len())
            .finish()
    }
}

impl BasicQueryEngine {
    pub fn new() -> Self {
        BasicQueryEngine::default()
    }

    // ------------------------------------------------------------------------
    // Registry
    // ------------------------------------------------------------------------

    /// Register a bibliographic handler; the same handler may be added twice
    pub fn add_journal_handler(&mut self, handler: Arc<dyn BibliographicReader>) -> bool {
        self.journal_handlers.push(handler);
        true
    }

    /// Register a taxonomy handler; the same handler may be added twice
    pub fn add_category_handler(&mut self, handler: Arc<dyn TaxonomyReader>) -> bool {
        self.category_handlers.push(handler);
        true
    }

    pub fn clean_journal_handlers(&mut self) -> bool {
        self.journal_handlers.clear();
        true
    }

    pub fn clean_category_handlers(&mut self) -> bool {
        self.category_handlers.clear();
        true
    }

    pub fn journal_handlers(&self) -> &[Arc<dyn BibliographicReader>] {
        &self.journal_handlers
    }

    pub fn category_handlers(&self) -> &[Arc<dyn TaxonomyReader>] {
        &self.category_handlers
    }

    // ------------------------------------------------------------------------
    // Entity lookup
    // ------------------------------------------------------------------------

    /// Resolve a bare identifier to whatever entity it names
    ///
    /// Bibliographic handlers are probed first and yield a fully built
    /// journal. Otherwise the first taxonomy hit decides the kind; a journal
    /// known only to the taxonomy side comes back with its identifiers and
    /// nothing else. A blank id names nothing.
    #[instrument(level = "debug", skip(self))]
    pub fn get_entity_by_id(&self, id: &str) -> Result<Option<Entity>> {
        if id.trim().is_empty() {
            return Ok(None);
        }

        if let Some(row) = first_hit(&self.journal_handlers, |h| h.get_by_id(id))? {
            return Ok(Some(Entity::Journal(self.build_journal(&row)?)));
        }

        let entity = match first_hit(&self.category_handlers, |h| h.get_by_id(id))? {
            None => None,
            Some(TaxonomyHit::Area(row)) => Some(Entity::Area(row.into())),
            Some(TaxonomyHit::Category(row)) => Some(Entity::Category(row.into())),
            Some(TaxonomyHit::Journal(pair)) => {
                Some(Entity::Journal(Journal::new(pair.to_identifier_set()?)))
            }
        };
        Ok(entity)
    }

    // ------------------------------------------------------------------------
    // Journals
    // ------------------------------------------------------------------------

    pub fn get_all_journals(&self) -> Result<Vec<Journal>> {
        self.journals(|h| h.get_all_journals())
    }

    pub fn get_journals_with_title(&self, partial_title: &str) -> Result<Vec<Journal>> {
        self.journals(|h| h.get_journals_with_title(partial_title))
    }

    pub fn get_journals_published_by(&self, partial_name: &str) -> Result<Vec<Journal>> {
        self.journals(|h| h.get_journals_published_by(partial_name))
    }

    /// Empty `licenses` means every journal
    pub fn get_journals_with_license(&self, licenses: &[&str]) -> Result<Vec<Journal>> {
        self.journals(|h| h.get_journals_with_license(licenses))
    }

    pub fn get_journals_with_apc(&self) -> Result<Vec<Journal>> {
        self.journals(|h| h.get_journals_with_apc())
    }

    pub fn get_journals_without_apc(&self) -> Result<Vec<Journal>> {
        self.journals(|h| h.get_journals_without_apc())
    }

    pub fn get_journals_with_doaj_seal(&self) -> Result<Vec<Journal>> {
        self.journals(|h| h.get_journals_with_doaj_seal())
    }

    // ------------------------------------------------------------------------
    // Categories and areas
    // ------------------------------------------------------------------------

    pub fn get_all_categories(&self) -> Result<Vec<Category>> {
        let rows = fan_out(&self.category_handlers, |h| h.get_all_categories())?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    pub fn get_all_areas(&self) -> Result<Vec<Area>> {
        let rows = fan_out(&self.category_handlers, |h| h.get_all_areas())?;
        Ok(rows.into_iter().map(Area::from).collect())
    }

    /// `None` selects categories without a quartile; empty means all
    pub fn get_categories_with_quartile(
        &self,
        quartiles: &[Option<Quartile>],
    ) -> Result<Vec<Category>> {
        let rows = fan_out(&self.category_handlers, |h| {
            h.get_categories_with_quartile(quartiles)
        })?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    pub fn get_categories_assigned_to_areas(&self, area_ids: &[&str]) -> Result<Vec<Category>> {
        let rows = fan_out(&self.category_handlers, |h| {
            h.get_categories_assigned_to_areas(area_ids)
        })?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    pub fn get_areas_assigned_to_categories(&self, category_ids: &[&str]) -> Result<Vec<Area>> {
        let rows = fan_out(&self.category_handlers, |h| {
            h.get_areas_assigned_to_categories(category_ids)
        })?;
        Ok(rows.into_iter().map(Area::from).collect())
    }

    // ------------------------------------------------------------------------
    // Journal assembly
    // ------------------------------------------------------------------------

    /// Join one bibliographic row with its categories and areas
    ///
    /// A row without identifiers gets no taxonomy lookup: an empty
    /// identifier filter would match every journal in the store.
    pub fn build_journal(&self, row: &JournalRow) -> Result<Journal> {
        let ids = row.identifiers()?;
        let journal = Journal::new(ids.clone())
            .with_title(row.title.as_str())
            .with_languages(row.language_list())
            .with_publisher(row.publisher.clone())
            .with_seal(row.has_seal())
            .with_licence(row.licence.as_str())
            .with_apc(row.has_apc());

        if ids.is_empty() {
            return Ok(journal);
        }

        let id_list: Vec<&str> = ids.iter().collect();
        let categories = fan_out(&self.category_handlers, |h| {
            h.get_journal_categories(&id_list)
        })?;
        let areas = fan_out(&self.category_handlers, |h| h.get_journal_areas(&id_list))?;

        Ok(journal
            .with_categories(categories.into_iter().map(Category::from).collect())
            .with_areas(areas.into_iter().map(Area::from).collect()))
    }

    fn build_journals(&self, rows: &[JournalRow]) -> Result<Vec<Journal>> {
        rows.iter().map(|row| self.build_journal(row)).collect()
    }

    fn journals<F>(&self, query: F) -> Result<Vec<Journal>>
    where
        F: FnMut(&(dyn BibliographicReader + 'static)) -> Result<Vec<JournalRow>>,
    {
        let rows = fan_out(&self.journal_handlers, query)?;
        self.build_journals(&rows)
    }
}

// ============================================================================
// FULL QUERY ENGINE
// ============================================================================

/// Basic engine plus queries that reconcile both stores by identifier
#[derive(Debug, Clone, Default)]
pub struct FullQueryEngine {
    basic: BasicQueryEngine,
    matcher: IdentifierMatcher,
}

impl FullQueryEngine {
    pub fn new() -> Self {
        FullQueryEngine::default()
    }

    pub fn with_strategy(strategy: MatchStrategy) -> Self {
        FullQueryEngine {
            basic: BasicQueryEngine::new(),
            matcher: IdentifierMatcher::new(strategy),
        }
    }

    pub fn match_strategy(&self) -> MatchStrategy {
        self.matcher.strategy
    }

    pub fn set_match_strategy(&mut self, strategy: MatchStrategy) {
        self.matcher = IdentifierMatcher::new(strategy);
    }

    pub fn basic(&self) -> &BasicQueryEngine {
        &self.basic
    }

    pub fn basic_mut(&mut self) -> &mut BasicQueryEngine {
        &mut self.basic
    }

    // ------------------------------------------------------------------------
    // Single-store operations (forwarded)
    // ------------------------------------------------------------------------

    pub fn add_journal_handler(&mut self, handler: Arc<dyn BibliographicReader>) -> bool {
        self.basic.add_journal_handler(handler)
    }

    pub fn add_category_handler(&mut self, handler: Arc<dyn TaxonomyReader>) -> bool {
        self.basic.add_category_handler(handler)
    }

    pub fn clean_journal_handlers(&mut self) -> bool {
        self.basic.clean_journal_handlers()
    }

    pub fn clean_category_handlers(&mut self) -> bool {
        self.basic.clean_category_handlers()
    }

    pub fn get_entity_by_id(&self, id: &str) -> Result<Option<Entity>> {
        self.basic.get_entity_by_id(id)
    }

    pub fn get_all_journals(&self) -> Result<Vec<Journal>> {
        self.basic.get_all_journals()
    }

    pub fn get_journals_with_title(&self, partial_title: &str) -> Result<Vec<Journal>> {
        self.basic.get_journals_with_title(partial_title)
    }

    pub fn get_journals_published_by(&self, partial_name: &str) -> Result<Vec<Journal>> {
        self.basic.get_journals_published_by(partial_name)
    }

    pub fn get_journals_with_license(&self, licenses: &[&str]) -> Result<Vec<Journal>> {
        self.basic.get_journals_with_license(licenses)
    }

    pub fn get_journals_with_apc(&self) -> Result<Vec<Journal>> {
        self.basic.get_journals_with_apc()
    }

    pub fn get_journals_without_apc(&self) -> Result<Vec<Journal>> {
        self.basic.get_journals_without_apc()
    }

    pub fn get_journals_with_doaj_seal(&self) -> Result<Vec<Journal>> {
        self.basic.get_journals_with_doaj_seal()
    }

    pub fn get_all_categories(&self) -> Result<Vec<Category>> {
        self.basic.get_all_categories()
    }

    pub fn get_all_areas(&self) -> Result<Vec<Area>> {
        self.basic.get_all_areas()
    }

    pub fn get_categories_with_quartile(
        &self,
        quartiles: &[Option<Quartile>],
    ) -> Result<Vec<Category>> {
        self.basic.get_categories_with_quartile(quartiles)
    }

    pub fn get_categories_assigned_to_areas(&self, area_ids: &[&str]) -> Result<Vec<Category>> {
        self.basic.get_categories_assigned_to_areas(area_ids)
    }

    pub fn get_areas_assigned_to_categories(&self, category_ids: &[&str]) -> Result<Vec<Area>> {
        self.basic.get_areas_assigned_to_categories(category_ids)
    }

    // ------------------------------------------------------------------------
    // Cross-store operations
    // ------------------------------------------------------------------------

    /// Journals holding any of the (category, quartile) combinations
    #[instrument(level = "debug", skip(self))]
    pub fn get_journals_in_categories_with_quartile(
        &self,
        category_ids: &[&str],
        quartiles: &[Option<Quartile>],
    ) -> Result<Vec<Journal>> {
        let pairs = fan_out(&self.basic.category_handlers, |h| {
            h.get_journals_by_category_with_quartile(category_ids, quartiles)
        })?;
        let rows = fan_out(&self.basic.journal_handlers, |h| h.get_all_journals())?;

        self.reconciled_journals(rows, &pairs)
    }

    /// Journals in any of the areas carrying any of the licenses
    #[instrument(level = "debug", skip(self))]
    pub fn get_journals_in_areas_with_license(
        &self,
        area_ids: &[&str],
        licenses: &[&str],
    ) -> Result<Vec<Journal>> {
        let pairs = fan_out(&self.basic.category_handlers, |h| {
            h.get_journals_by_area(area_ids)
        })?;
        let rows = fan_out(&self.basic.journal_handlers, |h| {
            h.get_journals_with_license(licenses)
        })?;

        self.reconciled_journals(rows, &pairs)
    }

    /// Journals without APC, in the areas and holding the category combinations
    #[instrument(level = "debug", skip(self))]
    pub fn get_diamond_journals_in_areas_and_categories_with_quartile(
        &self,
        area_ids: &[&str],
        category_ids: &[&str],
        quartiles: &[Option<Quartile>],
    ) -> Result<Vec<Journal>> {
        let pairs = fan_out(&self.basic.category_handlers, |h| {
            h.get_journals_by_area_and_category_with_quartile(area_ids, category_ids, quartiles)
        })?;
        let rows = fan_out(&self.basic.journal_handlers, |h| h.get_journals_without_apc())?;

        self.reconciled_journals(rows, &pairs)
    }

    fn reconciled_journals(
        &self,
        rows: Vec<JournalRow>,
        pairs: &[IdentifierPair],
    ) -> Result<Vec<Journal>> {
        let (kept, report) = self.matcher.reconcile(rows, pairs);
        debug!(matched = report.matched, candidates = report.candidates, "reconciled rows");
        self.basic.build_journals(&kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{AreaRow, CategoryRow};

    /// Taxonomy store stand-in answering every journal filter the same way
    #[derive(Default)]
    struct FixedTaxonomy {
        categories: Vec<CategoryRow>,
        areas: Vec<AreaRow>,
        pairs: Vec<IdentifierPair>,
        hit: Option<TaxonomyHit>,
    }

    impl TaxonomyReader for FixedTaxonomy {
        fn get_by_id(&self, _id: &str) -> Result<Option<TaxonomyHit>> {
            Ok(self.hit.clone())
        }

        fn get_all_categories(&self) -> Result<Vec<CategoryRow>> {
            Ok(self.categories.clone())
        }

        fn get_all_areas(&self) -> Result<Vec<AreaRow>> {
            Ok(self.areas.clone())
        }

        fn get_categories_with_quartile(
            &self,
            _quartiles: &[Option<Quartile>],
        ) -> Result<Vec<CategoryRow>> {
            Ok(self.categories.clone())
        }

        fn get_categories_assigned_to_areas(&self, _ids: &[&str]) -> Result<Vec<CategoryRow>> {
            Ok(self.categories.clone())
        }

        fn get_areas_assigned_to_categories(&self, _ids: &[&str]) -> Result<Vec<AreaRow>> {
            Ok(self.areas.clone())
        }

        fn get_journal_categories(&self, _ids: &[&str]) -> Result<Vec<CategoryRow>> {
            Ok(self.categories.clone())
        }

        fn get_journal_areas(&self, _ids: &[&str]) -> Result<Vec<AreaRow>> {
            Ok(self.areas.clone())
        }

        fn get_journals_by_area_and_category_with_quartile(
            &self,
            _area_ids: &[&str],
            _category_ids: &[&str],
            _quartiles: &[Option<Quartile>],
        ) -> Result<Vec<IdentifierPair>> {
            Ok(self.pairs.clone())
        }
    }

    #[derive(Default)]
    struct FixedJournals {
        rows: Vec<JournalRow>,
    }

    impl BibliographicReader for FixedJournals {
        fn get_by_id(&self, id: &str) -> Result<Option<JournalRow>> {
            Ok(self.rows.iter().find(|r| r.identifier.contains(id)).cloned())
        }

        fn get_all_journals(&self) -> Result<Vec<JournalRow>> {
            Ok(self.rows.clone())
        }

        fn get_journals_with_title(&self, _partial: &str) -> Result<Vec<JournalRow>> {
            Ok(self.rows.clone())
        }

        fn get_journals_published_by(&self, _partial: &str) -> Result<Vec<JournalRow>> {
            Ok(self.rows.clone())
        }

        fn get_journals_with_license(&self, _licenses: &[&str]) -> Result<Vec<JournalRow>> {
            Ok(self.rows.clone())
        }

        fn get_journals_with_apc(&self) -> Result<Vec<JournalRow>> {
            Ok(self.rows.iter().filter(|r| r.has_apc()).cloned().collect())
        }

        fn get_journals_without_apc(&self) -> Result<Vec<JournalRow>> {
            Ok(self.rows.iter().filter(|r| !r.has_apc()).cloned().collect())
        }

        fn get_journals_with_doaj_seal(&self) -> Result<Vec<JournalRow>> {
            Ok(self.rows.iter().filter(|r| r.has_seal()).cloned().collect())
        }
    }

    fn journal_row(title: &str, identifier: &str, apc: &str) -> JournalRow {
        JournalRow {
            title: title.to_string(),
            identifier: identifier.to_string(),
            languages: "English, Italian".to_string(),
            publisher: Some("Bologna Press".to_string()),
            seal: "Yes".to_string(),
            licence: "CC BY".to_string(),
            apc: apc.to_string(),
        }
    }

    fn category(name: &str, quartile: Option<Quartile>) -> CategoryRow {
        CategoryRow {
            name: name.to_string(),
            quartile,
        }
    }

    #[test]
    fn test_empty_registry_returns_nothing() {
        let engine = FullQueryEngine::new();

        assert!(engine.get_all_journals().unwrap().is_empty());
        assert!(engine.get_all_categories().unwrap().is_empty());
        assert!(engine.get_entity_by_id("1111-1111").unwrap().is_none());
        assert!(engine
            .get_journals_in_categories_with_quartile(&["AI"], &[Some(Quartile::Q1)])
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_results_merge_across_handlers_in_order() {
        let first: Arc<dyn TaxonomyReader> = Arc::new(FixedTaxonomy {
            categories: vec![category("AI", Some(Quartile::Q1)), category("Logic", None)],
            ..FixedTaxonomy::default()
        });
        let second: Arc<dyn TaxonomyReader> = Arc::new(FixedTaxonomy {
            categories: vec![category("Logic", None), category("AI", Some(Quartile::Q2))],
            ..FixedTaxonomy::default()
        });

        let mut engine = BasicQueryEngine::new();
        engine.add_category_handler(first.clone());
        engine.add_category_handler(second);
        engine.add_category_handler(first);

        let categories = engine.get_all_categories().unwrap();
        assert_eq!(
            categories,
            vec![
                Category::new("AI", Some(Quartile::Q1)),
                Category::new("Logic", None),
                Category::new("AI", Some(Quartile::Q2)),
            ]
        );
    }

    #[test]
    fn test_clean_handlers_empties_registry() {
        let mut engine = FullQueryEngine::new();
        assert!(engine.add_journal_handler(Arc::new(FixedJournals::default())));
        assert!(engine.add_category_handler(Arc::new(FixedTaxonomy::default())));

        assert!(engine.clean_journal_handlers());
        assert!(engine.clean_category_handlers());

        assert!(engine.basic().journal_handlers().is_empty());
        assert!(engine.basic().category_handlers().is_empty());
    }

    #[test]
    fn test_blank_id_names_nothing() {
        let mut engine = FullQueryEngine::new();
        engine.add_journal_handler(Arc::new(FixedJournals {
            rows: vec![journal_row("AI Quarterly", "1111-1111", "No")],
        }));
        engine.add_category_handler(Arc::new(FixedTaxonomy {
            hit: Some(TaxonomyHit::Area(AreaRow {
                name: "Computer Science".to_string(),
            })),
            ..FixedTaxonomy::default()
        }));

        assert!(engine.get_entity_by_id("").unwrap().is_none());
        assert!(engine.get_entity_by_id("   ").unwrap().is_none());
        assert!(engine.get_entity_by_id("1111").unwrap().is_some());
    }

    #[test]
    fn test_basic_mut_reaches_registry() {
        let mut engine = FullQueryEngine::new();
        engine
            .basic_mut()
            .add_category_handler(Arc::new(FixedTaxonomy::default()));
        assert_eq!(engine.basic().category_handlers().len(), 1);
    }

    #[test]
    fn test_build_journal_attaches_taxonomy() {
        let mut engine = BasicQueryEngine::new();
        engine.add_category_handler(Arc::new(FixedTaxonomy {
            categories: vec![category("AI", Some(Quartile::Q1))],
            areas: vec![AreaRow {
                name: "Computer Science".to_string(),
            }],
            ..FixedTaxonomy::default()
        }));

        let journal = engine
            .build_journal(&journal_row("AI Quarterly", "1111-1111,2222-2222", "No"))
            .unwrap();

        assert_eq!(journal.ids().to_vec(), vec!["1111-1111", "2222-2222"]);
        assert_eq!(journal.languages(), ["English", "Italian"]);
        assert!(journal.has_doaj_seal());
        assert!(!journal.has_apc());
        assert_eq!(journal.categories(), [Category::new("AI", Some(Quartile::Q1))]);
        assert_eq!(journal.areas()[0].name(), "Computer Science");
    }

    #[test]
    fn test_build_journal_without_identifiers_skips_taxonomy() {
        let mut engine = BasicQueryEngine::new();
        engine.add_category_handler(Arc::new(FixedTaxonomy {
            categories: vec![category("AI", Some(Quartile::Q1))],
            ..FixedTaxonomy::default()
        }));

        let journal = engine.build_journal(&journal_row("Untracked", "", "No")).unwrap();

        assert!(journal.ids().is_empty());
        assert!(!journal.has_category());
    }

    #[test]
    fn test_taxonomy_only_journal_is_degenerate() {
        let mut engine = BasicQueryEngine::new();
        engine.add_journal_handler(Arc::new(FixedJournals::default()));
        engine.add_category_handler(Arc::new(FixedTaxonomy {
            hit: Some(TaxonomyHit::Journal(IdentifierPair::new(
                Some("5555-5555"),
                Some("6666-6666"),
            ))),
            ..FixedTaxonomy::default()
        }));

        let entity = engine.get_entity_by_id("5555-5555").unwrap().unwrap();
        let journal = entity.as_journal().unwrap();

        assert_eq!(journal.ids().to_vec(), vec!["5555-5555", "6666-6666"]);
        assert_eq!(journal.title(), "");
        assert_eq!(journal.licence(), "");
        assert!(!journal.has_doaj_seal());
        assert!(!journal.has_apc());
    }

    #[test]
    fn test_bibliographic_hit_wins_over_taxonomy() {
        let mut engine = BasicQueryEngine::new();
        engine.add_journal_handler(Arc::new(FixedJournals {
            rows: vec![journal_row("AI Quarterly", "1111-1111", "No")],
        }));
        engine.add_category_handler(Arc::new(FixedTaxonomy {
            hit: Some(TaxonomyHit::Area(AreaRow {
                name: "1111-1111".to_string(),
            })),
            ..FixedTaxonomy::default()
        }));

        let entity = engine.get_entity_by_id("1111-1111").unwrap().unwrap();
        assert_eq!(entity.as_journal().map(Journal::title), Some("AI Quarterly"));
    }

    #[test]
    fn test_diamond_query_drops_apc_journals() {
        let mut engine = FullQueryEngine::new();
        engine.add_journal_handler(Arc::new(FixedJournals {
            rows: vec![
                journal_row("AI Quarterly", "1111-1111", "No"),
                journal_row("Paid Review", "2222-2222", "Yes"),
                journal_row("Unranked", "3333-3333", "No"),
            ],
        }));
        engine.add_category_handler(Arc::new(FixedTaxonomy {
            pairs: vec![
                IdentifierPair::new(Some("1111-1111"), None),
                IdentifierPair::new(None, Some("2222-2222")),
            ],
            ..FixedTaxonomy::default()
        }));

        let journals = engine
            .get_diamond_journals_in_areas_and_categories_with_quartile(
                &["Computer Science"],
                &["AI"],
                &[Some(Quartile::Q1)],
            )
            .unwrap();

        let titles: Vec<&str> = journals.iter().map(Journal::title).collect();
        assert_eq!(titles, vec!["AI Quarterly"]);
    }

    #[test]
    fn test_strategy_can_be_switched() {
        let mut engine = FullQueryEngine::with_strategy(MatchStrategy::Exact);
        assert_eq!(engine.match_strategy(), MatchStrategy::Exact);

        engine.set_match_strategy(MatchStrategy::Containment);
        assert_eq!(engine.match_strategy(), MatchStrategy::Containment);
    }
}
