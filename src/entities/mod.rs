// Entity Models - Area, Category, Journal
//
// Every entity is identified by a set of identifiers; two entities denote
// the same thing when those sets overlap. Entities are built once per
// engine call and never mutated afterwards.

pub mod identifiers;
pub mod area;
pub mod category;
pub mod journal;

pub use identifiers::IdentifierSet;
pub use area::Area;
pub use category::{Category, Quartile};
pub use journal::Journal;

use serde::Serialize;

/// Kind tag for entities resolved by identifier alone
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EntityKind {
    Journal,
    Category,
    Area,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Journal => "journal",
            EntityKind::Category => "category",
            EntityKind::Area => "area",
        }
    }
}

/// Any entity the federation can return for a bare identifier
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Entity {
    Journal(Journal),
    Category(Category),
    Area(Area),
}

impl Entity {
    pub fn kind(&self) -> EntityKind {
        match self {
            Entity::Journal(_) => EntityKind::Journal,
            Entity::Category(_) => EntityKind::Category,
            Entity::Area(_) => EntityKind::Area,
        }
    }

    pub fn ids(&self) -> &IdentifierSet {
        match self {
            Entity::Journal(journal) => journal.ids(),
            Entity::Category(category) => category.ids(),
            Entity::Area(area) => area.ids(),
        }
    }

    pub fn as_journal(&self) -> Option<&Journal> {
        match self {
            Entity::Journal(journal) => Some(journal),
            _ => None,
        }
    }
}
