//! Category reference data
//!
//! Categories are a fixed set known at build time. They are handed to the
//! aggregator as an immutable [`CategoryRegistry`] rather than looked up from
//! global state, so tests and alternate front ends can supply their own set.

use serde::Serialize;
use std::fmt;

/// Reserved pseudo-category used by income entries
pub const INCOME_CATEGORY_ID: &str = "income";

/// Category every unknown id falls back to
pub const FALLBACK_CATEGORY_ID: &str = "other";

/// An expense classification bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
    /// Icon reference understood by the presentation layer
    pub icon: &'static str,
    /// Chart colour as a hex string
    pub color: &'static str,
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}

const BUILTIN_CATEGORIES: &[Category] = &[
    Category {
        id: "food",
        name: "Food & Dining",
        icon: "utensils",
        color: "#2a9d8f",
    },
    Category {
        id: "transport",
        name: "Transportation",
        icon: "car",
        color: "#e76f51",
    },
    Category {
        id: "housing",
        name: "Housing & Utilities",
        icon: "home",
        color: "#5b7db1",
    },
    Category {
        id: "shopping",
        name: "Shopping",
        icon: "shopping-cart",
        color: "#e9c46a",
    },
    Category {
        id: "health",
        name: "Health & Wellness",
        icon: "heart-pulse",
        color: "#f4a261",
    },
    Category {
        id: FALLBACK_CATEGORY_ID,
        name: "Other",
        icon: "more-horizontal",
        color: "#8d99ae",
    },
];

static BUILTIN: CategoryRegistry = CategoryRegistry {
    categories: BUILTIN_CATEGORIES,
};

/// Immutable, ordered set of categories
///
/// A registry must contain the fallback category; [`CategoryRegistry::new`]
/// enforces that.
#[derive(Debug, Clone, Copy)]
pub struct CategoryRegistry {
    categories: &'static [Category],
}

impl CategoryRegistry {
    /// The registry shipped with the application
    pub fn builtin() -> &'static CategoryRegistry {
        &BUILTIN
    }

    /// Build a registry from a custom static list
    ///
    /// Returns `None` when the list has no "other" entry to fall back to.
    pub fn new(categories: &'static [Category]) -> Option<Self> {
        categories
            .iter()
            .any(|c| c.id == FALLBACK_CATEGORY_ID)
            .then_some(Self { categories })
    }

    /// All categories in display order
    pub fn all(&self) -> &'static [Category] {
        self.categories
    }

    /// Category ids in display order
    pub fn ids(&self) -> impl Iterator<Item = &'static str> {
        self.categories.iter().map(|c| c.id)
    }

    /// Look up a category; unknown ids yield `None`
    pub fn get(&self, id: &str) -> Option<&'static Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Look up a category, substituting "Other" for unknown ids
    pub fn resolve(&self, id: &str) -> &'static Category {
        self.get(id).unwrap_or_else(|| self.fallback())
    }

    /// The "Other" category
    pub fn fallback(&self) -> &'static Category {
        // `new` and the builtin list both guarantee presence
        self.categories
            .iter()
            .find(|c| c.id == FALLBACK_CATEGORY_ID)
            .unwrap_or(&BUILTIN_CATEGORIES[BUILTIN_CATEGORIES.len() - 1])
    }

    /// Find a category by id or by case-insensitive display name
    pub fn find(&self, query: &str) -> Option<&'static Category> {
        let query = query.trim();
        self.get(query).or_else(|| {
            self.categories
                .iter()
                .find(|c| c.name.eq_ignore_ascii_case(query))
        })
    }

    /// Human-readable label for any category reference, including income
    pub fn display_name(&self, id: &str) -> &'static str {
        if id == INCOME_CATEGORY_ID {
            "Income"
        } else {
            self.resolve(id).name
        }
    }
}
