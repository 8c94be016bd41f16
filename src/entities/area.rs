// Area Entity - broad research domain, identified by its name

use super::identifiers::IdentifierSet;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Area {
    ids: IdentifierSet,
}

impl Area {
    pub fn new(name: impl Into<String>) -> Self {
        Area {
            ids: IdentifierSet::single(name),
        }
    }

    pub fn ids(&self) -> &IdentifierSet {
        &self.ids
    }

    pub fn name(&self) -> &str {
        self.ids.iter().next().unwrap_or_default()
    }
}
