//! Food categories.

use core::cmp::Ordering;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Food category an item is stocked and demanded under.
///
/// The named variants are the categories the charity tracks demand for;
/// anything else is kept verbatim (lower-cased) in `Other` so it can still be
/// grouped. Ordering is by name, which is what tie-breaks use.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Category {
    Protein,
    Grain,
    Fruit,
    Dairy,
    Vegetable,
    Prepared,
    /// Legacy bucket for canned goods.
    Canned,
    Other(String),
}

impl Category {
    pub fn as_str(&self) -> &str {
        match self {
            Category::Protein => "protein",
            Category::Grain => "grain",
            Category::Fruit => "fruit",
            Category::Dairy => "dairy",
            Category::Vegetable => "vegetable",
            Category::Prepared => "prepared",
            Category::Canned => "canned",
            Category::Other(name) => name,
        }
    }

    /// The catch-all `other` bucket.
    pub fn other() -> Self {
        Category::Other("other".to_string())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_lowercase();
        Ok(match name.as_str() {
            "" => return Err(DomainError::validation("category cannot be empty")),
            "protein" => Category::Protein,
            "grain" => Category::Grain,
            "fruit" => Category::Fruit,
            "dairy" => Category::Dairy,
            "vegetable" => Category::Vegetable,
            "prepared" => Category::Prepared,
            "canned" => Category::Canned,
            _ => Category::Other(name),
        })
    }
}

impl TryFrom<String> for Category {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Category> for String {
    fn from(value: Category) -> Self {
        value.as_str().to_string()
    }
}

impl core::fmt::Display for Category {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Ord for Category {
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_str().cmp(other.as_str())
    }
}

impl PartialOrd for Category {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_names_map_to_variants() {
        assert_eq!("Protein".parse::<Category>().unwrap(), Category::Protein);
        assert_eq!(" canned ".parse::<Category>().unwrap(), Category::Canned);
    }

    #[test]
    fn unknown_names_are_kept() {
        let c: Category = "Baby Food".parse().unwrap();
        assert_eq!(c, Category::Other("baby food".to_string()));
        assert_eq!(c.as_str(), "baby food");
        assert_eq!("other".parse::<Category>().unwrap(), Category::other());
    }

    #[test]
    fn empty_name_is_rejected() {
        assert!("  ".parse::<Category>().is_err());
    }

    #[test]
    fn ordering_is_by_name() {
        let mut cs = vec![Category::Vegetable, Category::Canned, Category::Dairy];
        cs.sort();
        assert_eq!(cs, vec![Category::Canned, Category::Dairy, Category::Vegetable]);
    }

    #[test]
    fn serde_uses_plain_names() {
        let json = serde_json::to_string(&Category::Fruit).unwrap();
        assert_eq!(json, "\"fruit\"");
        let back: Category = serde_json::from_str("\"FRUIT\"").unwrap();
        assert_eq!(back, Category::Fruit);
    }
}
