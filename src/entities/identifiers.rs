// Identifier sets - identity of every entity in the federation
//
// Two entities are the same logical entity when their identifier sets
// share at least one identifier. A journal carries at most an ISSN and
// an EISSN, so the set never holds more than two entries.

use crate::error::{Error, Result};
use serde::ser::{Serialize, SerializeSeq, Serializer};

/// Maximum number of identifiers one entity can carry (ISSN + EISSN)
pub const MAX_IDENTIFIERS: usize = 2;

/// Fixed-capacity identifier set with overlap-based equality
#[derive(Debug, Clone, Default)]
pub struct IdentifierSet {
    slots: [Option<String>; MAX_IDENTIFIERS],
}

impl IdentifierSet {
    /// Empty set (a journal with neither ISSN nor EISSN recorded)
    pub fn empty() -> Self {
        IdentifierSet::default()
    }

    /// Set holding exactly one identifier (areas and categories)
    pub fn single(id: impl Into<String>) -> Self {
        IdentifierSet {
            slots: [Some(id.into()), None],
        }
    }

    /// Build a set from any identifiers, collapsing duplicates and blanks
    ///
    /// Fails when more than two distinct identifiers are supplied.
    pub fn new<I, S>(ids: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut set = IdentifierSet::empty();
        for id in ids {
            set.insert(id.into())?;
        }
        Ok(set)
    }

    /// Parse a delimited identifier field such as "1234-5678,8765-4321"
    pub fn parse_delimited(field: &str) -> Result<Self> {
        IdentifierSet::new(field.split(',').map(str::trim))
    }

    fn insert(&mut self, id: String) -> Result<()> {
        let id = id.trim().to_string();
        if id.is_empty() || self.contains(&id) {
            return Ok(());
        }

        match self.slots.iter_mut().find(|slot| slot.is_none()) {
            Some(slot) => {
                *slot = Some(id);
                Ok(())
            }
            None => Err(Error::invalid_argument(format!(
                "an entity carries at most {} identifiers, got a third one: {}",
                MAX_IDENTIFIERS, id
            ))),
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.iter().any(|existing| existing == id)
    }

    /// True when both sets share at least one identifier
    pub fn overlaps(&self, other: &IdentifierSet) -> bool {
        self.iter().any(|id| other.contains(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.slots.iter().flatten().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Identifiers as an owned list, in insertion order
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }
}

impl PartialEq for IdentifierSet {
    fn eq(&self, other: &Self) -> bool {
        self.overlaps(other)
    }
}

impl Serialize for IdentifierSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for id in self.iter() {
            seq.serialize_element(id)?;
        }
        seq.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicates_and_blanks_collapse() {
        let set = IdentifierSet::new(["1234-5678", " 1234-5678 ", "", "8765-4321"]).unwrap();

        assert_eq!(set.len(), 2);
        assert_eq!(set.to_vec(), vec!["1234-5678", "8765-4321"]);
    }

    #[test]
    fn test_third_identifier_rejected() {
        let err = IdentifierSet::new(["a", "b", "c"]).unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_equality_is_overlap() {
        let print_only = IdentifierSet::single("1234-5678");
        let both = IdentifierSet::new(["1234-5678", "9999-0000"]).unwrap();
        let other = IdentifierSet::single("1111-1111");

        assert_eq!(print_only, both, "sets sharing an ISSN denote one journal");
        assert_ne!(print_only, other);
        assert_ne!(IdentifierSet::empty(), IdentifierSet::empty());
    }

    #[test]
    fn test_parse_delimited_field() {
        let set = IdentifierSet::parse_delimited("1234-5678,9999-0000").unwrap();
        assert!(set.contains("1234-5678"));
        assert!(set.contains("9999-0000"));

        assert!(IdentifierSet::parse_delimited("").unwrap().is_empty());
        assert_eq!(IdentifierSet::parse_delimited("1234-5678,").unwrap().len(), 1);
    }

    #[test]
    fn test_serializes_as_list() {
        let set = IdentifierSet::new(["1234-5678", "9999-0000"]).unwrap();
        let json = serde_json::to_string(&set).unwrap();
        assert_eq!(json, r#"["1234-5678","9999-0000"]"#);
    }
}
