// Category Entity - subject category with its quartile ranking
//
// The quartile belongs to the (category, assignment) pair, not to the name:
// "Oncology" can appear as Q1 in one row and Q3 in another, and both stay
// distinct categories.

use super::identifiers::IdentifierSet;
use crate::error::Error;
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// QUARTILE
// ============================================================================

/// Ranking tier of a category assignment (Q1 best .. Q4)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Quartile {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quartile {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quartile::Q1 => "Q1",
            Quartile::Q2 => "Q2",
            Quartile::Q3 => "Q3",
            Quartile::Q4 => "Q4",
        }
    }

    /// Parse an optional label where "" means "no quartile"
    pub fn parse_optional(label: Option<&str>) -> Result<Option<Quartile>, Error> {
        match label.map(str::trim) {
            None | Some("") => Ok(None),
            Some(label) => label.parse().map(Some),
        }
    }
}

impl fmt::Display for Quartile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quartile {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "Q1" => Ok(Quartile::Q1),
            "Q2" => Ok(Quartile::Q2),
            "Q3" => Ok(Quartile::Q3),
            "Q4" => Ok(Quartile::Q4),
            other => Err(Error::invalid_argument(format!(
                "unknown quartile label: {:?}",
                other
            ))),
        }
    }
}

impl ToSql for Quartile {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Quartile {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|e: Error| {
            FromSqlError::Other(Box::<dyn std::error::Error + Send + Sync>::from(e.to_string()))
        })
    }
}

// ============================================================================
// CATEGORY ENTITY
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Category {
    ids: IdentifierSet,
    quartile: Option<Quartile>,
}

impl Category {
    pub fn new(name: impl Into<String>, quartile: Option<Quartile>) -> Self {
        Category {
            ids: IdentifierSet::single(name),
            quartile,
        }
    }

    pub fn ids(&self) -> &IdentifierSet {
        &self.ids
    }

    /// Category name (its only identifier)
    pub fn name(&self) -> &str {
        self.ids.iter().next().unwrap_or_default()
    }

    pub fn quartile(&self) -> Option<Quartile> {
        self.quartile
    }
}
