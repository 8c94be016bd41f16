// Journal Entity - bibliographic record joined with its taxonomy snapshot
//
// Categories and areas are copied in when the journal is built; they are a
// point-in-time read of the taxonomy stores, not a live view.

use super::area::Area;
use super::category::Category;
use super::identifiers::IdentifierSet;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Journal {
    ids: IdentifierSet,
    title: String,
    languages: Vec<String>,
    publisher: Option<String>,
    seal: bool,
    licence: String,
    apc: bool,
    categories: Vec<Category>,
    areas: Vec<Area>,
}

impl Journal {
    /// Create a journal with empty metadata; fill it with the builder methods
    pub fn new(ids: IdentifierSet) -> Self {
        Journal {
            ids,
            title: String::new(),
            languages: Vec::new(),
            publisher: None,
            seal: false,
            licence: String::new(),
            apc: false,
            categories: Vec::new(),
            areas: Vec::new(),
        }
    }

    /// Builder pattern: title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Builder pattern: language codes, in source order
    pub fn with_languages(mut self, languages: Vec<String>) -> Self {
        self.languages = languages;
        self
    }

    pub fn with_publisher(mut self, publisher: Option<String>) -> Self {
        self.publisher = publisher;
        self
    }

    pub fn with_seal(mut self, seal: bool) -> Self {
        self.seal = seal;
        self
    }

    pub fn with_licence(mut self, licence: impl Into<String>) -> Self {
        self.licence = licence.into();
        self
    }

    pub fn with_apc(mut self, apc: bool) -> Self {
        self.apc = apc;
        self
    }

    pub fn with_categories(mut self, categories: Vec<Category>) -> Self {
        self.categories = categories;
        self
    }

    pub fn with_areas(mut self, areas: Vec<Area>) -> Self {
        self.areas = areas;
        self
    }

    pub fn ids(&self) -> &IdentifierSet {
        &self.ids
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    pub fn publisher(&self) -> Option<&str> {
        self.publisher.as_deref()
    }

    /// DOAJ quality seal
    pub fn has_doaj_seal(&self) -> bool {
        self.seal
    }

    pub fn licence(&self) -> &str {
        &self.licence
    }

    /// Article processing charge
    pub fn has_apc(&self) -> bool {
        self.apc
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn areas(&self) -> &[Area] {
        &self.areas
    }

    pub fn has_category(&self) -> bool {
        !self.categories.is_empty()
    }

    pub fn has_area(&self) -> bool {
        !self.areas.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::Quartile;

    #[test]
    fn test_new_journal_is_shallow() {
        let journal = Journal::new(IdentifierSet::single("1111-1111"));

        assert_eq!(journal.title(), "");
        assert!(journal.languages().is_empty());
        assert_eq!(journal.publisher(), None);
        assert!(!journal.has_doaj_seal());
        assert!(!journal.has_apc());
        assert!(!journal.has_category());
        assert!(!journal.has_area());
    }

    #[test]
    fn test_builder_fills_metadata() {
        let journal = Journal::new(IdentifierSet::single("1111-1111"))
            .with_title("AI Quarterly")
            .with_languages(vec!["EN".to_string(), "IT".to_string()])
            .with_publisher(Some("Bologna Press".to_string()))
            .with_seal(true)
            .with_licence("CC BY")
            .with_categories(vec![Category::new("AI", Some(Quartile::Q1))])
            .with_areas(vec![Area::new("Computer Science")]);

        assert_eq!(journal.title(), "AI Quarterly");
        assert_eq!(journal.languages(), ["EN", "IT"]);
        assert_eq!(journal.publisher(), Some("Bologna Press"));
        assert!(journal.has_doaj_seal());
        assert!(journal.has_category());
        assert!(journal.has_area());
        assert_eq!(journal.areas()[0].name(), "Computer Science");
    }
}
