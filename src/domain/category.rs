// src/domain/category.rs
//
// Category Entity
//
// Podcast genre/category. Many-to-many with podcasts.

use std::cmp::Ordering;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::domain::{non_empty_trimmed, DisplayOrder, DomainResult};

#[derive(Debug, Clone, Serialize)]
pub struct Category {
    id: u32,
    name: String,
}

impl Category {
    pub fn new(id: u32, name: &str) -> DomainResult<Self> {
        Ok(Self {
            id,
            name: non_empty_trimmed(name, "Category name")?,
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: &str) -> DomainResult<()> {
        self.name = non_empty_trimmed(name, "New name")?;
        Ok(())
    }
}

impl PartialEq for Category {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Category {}

impl Hash for Category {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl DisplayOrder for Category {
    fn display_cmp(&self, other: &Self) -> Ordering {
        self.name.cmp(&other.name)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<Category {}: {}>", self.id, self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_category() {
        let category = Category::new(1, " News ").unwrap();
        assert_eq!(category.name(), "News");
    }

    #[test]
    fn test_empty_name_fails() {
        assert!(Category::new(1, "").is_err());
        assert!(Category::new(1, "\t").is_err());
    }

    #[test]
    fn test_equality_and_hash_by_id() {
        use std::collections::HashSet;

        let mut set = HashSet::new();
        set.insert(Category::new(1, "News").unwrap());
        set.insert(Category::new(1, "Politics").unwrap());
        set.insert(Category::new(2, "News").unwrap());
        assert_eq!(set.len(), 2);
    }
}
