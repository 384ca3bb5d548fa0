//! Relationship declarations and the conventional hierarchy link

use serde::{Deserialize, Serialize};

/// Name of the link walked when climbing a hierarchy
///
/// Hierarchical kinds (continent, country, metro, building, suite, rack)
/// declare this to-one relationship toward their enclosing level.
pub const PARENT_LINK: &str = "parent";

/// How many peers a relationship may hold
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cardinality {
    /// Zero or one peer
    One,
    /// Any number of peers
    Many,
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::One => write!(f, "one"),
            Self::Many => write!(f, "many"),
        }
    }
}
