//! Budget goals
//!
//! One monthly spending target per known category. A zero amount means the
//! goal is unset. The collection is always reconciled against the registry so
//! that every category has exactly one entry.

use serde::{Deserialize, Serialize};

use super::category::{CategoryRegistry, FALLBACK_CATEGORY_ID};
use super::money::Money;

/// A monthly spending target for one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetGoal {
    pub category_id: String,
    /// Non-negative; zero means unset
    pub amount: Money,
}

impl BudgetGoal {
    pub fn new(category_id: impl Into<String>, amount: Money) -> Self {
        Self {
            category_id: category_id.into(),
            amount: amount.clamp_non_negative(),
        }
    }

    pub fn is_set(&self) -> bool {
        self.amount.is_positive()
    }
}

/// The full goal set, one entry per registry category, in registry order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BudgetGoals(Vec<BudgetGoal>);

impl BudgetGoals {
    /// Zero goals for every category in the registry
    pub fn empty_for(registry: &CategoryRegistry) -> Self {
        Self(
            registry
                .ids()
                .map(|id| BudgetGoal::new(id, Money::zero()))
                .collect(),
        )
    }

    /// Fill in missing categories with zero goals and drop entries for ids the
    /// registry does not know. The first stored entry for a category wins.
    pub fn reconcile(loaded: Vec<BudgetGoal>, registry: &CategoryRegistry) -> Self {
        let goals = registry
            .ids()
            .map(|id| {
                loaded
                    .iter()
                    .find(|g| g.category_id == id)
                    .map(|g| BudgetGoal::new(id, g.amount))
                    .unwrap_or_else(|| BudgetGoal::new(id, Money::zero()))
            })
            .collect();
        Self(goals)
    }

    /// Overwrite the goal for a category, clamping negative amounts to zero
    ///
    /// Returns the previous amount, or `None` when the category has no entry
    /// (in which case nothing changes).
    pub fn set(&mut self, category_id: &str, amount: Money) -> Option<Money> {
        let goal = self.0.iter_mut().find(|g| g.category_id == category_id)?;
        let previous = goal.amount;
        goal.amount = amount.clamp_non_negative();
        Some(previous)
    }

    pub fn get(&self, category_id: &str) -> Option<&BudgetGoal> {
        self.0.iter().find(|g| g.category_id == category_id)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BudgetGoal> {
        self.0.iter()
    }

    /// Goals with a non-zero target
    pub fn active(&self) -> impl Iterator<Item = &BudgetGoal> {
        self.0.iter().filter(|g| g.is_set())
    }

    /// Goals that can be tracked against spending: set, known, and not "other"
    pub fn trackable<'a>(
        &'a self,
        registry: &'a CategoryRegistry,
    ) -> impl Iterator<Item = &'a BudgetGoal> + 'a {
        self.active().filter(move |g| {
            g.category_id != FALLBACK_CATEGORY_ID && registry.get(&g.category_id).is_some()
        })
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[BudgetGoal] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a BudgetGoals {
    type Item = &'a BudgetGoal;
    type IntoIter = std::slice::Iter<'a, BudgetGoal>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> &'static CategoryRegistry {
        CategoryRegistry::builtin()
    }

    #[test]
    fn test_reconcile_fills_missing_categories() {
        let loaded = vec![BudgetGoal::new("food", Money::from_units(300))];
        let goals = BudgetGoals::reconcile(loaded, registry());

        assert_eq!(goals.len(), registry().all().len());
        assert_eq!(goals.get("food").unwrap().amount, Money::from_units(300));
        assert_eq!(goals.get("transport").unwrap().amount, Money::zero());
    }

    #[test]
    fn test_reconcile_drops_unknown_and_duplicate_entries() {
        let loaded = vec![
            BudgetGoal::new("gadgets", Money::from_units(50)),
            BudgetGoal::new("food", Money::from_units(10)),
            BudgetGoal::new("food", Money::from_units(99)),
        ];
        let goals = BudgetGoals::reconcile(loaded, registry());

        assert!(goals.get("gadgets").is_none());
        assert_eq!(goals.iter().filter(|g| g.category_id == "food").count(), 1);
        assert_eq!(goals.get("food").unwrap().amount, Money::from_units(10));
    }

    #[test]
    fn test_set_clamps_negative_to_zero() {
        let mut goals = BudgetGoals::empty_for(registry());
        goals.set("food", Money::from_units(100));
        let previous = goals.set("food", Money::from_units(-50));

        assert_eq!(previous, Some(Money::from_units(100)));
        assert_eq!(goals.get("food").unwrap().amount, Money::zero());
    }

    #[test]
    fn test_set_unknown_category_is_noop() {
        let mut goals = BudgetGoals::empty_for(registry());
        let before = goals.clone();
        assert_eq!(goals.set("gadgets", Money::from_units(10)), None);
        assert_eq!(goals, before);
    }

    #[test]
    fn test_trackable_skips_other_and_unset() {
        let mut goals = BudgetGoals::empty_for(registry());
        goals.set("other", Money::from_units(40));
        goals.set("health", Money::from_units(60));

        let ids: Vec<_> = goals
            .trackable(registry())
            .map(|g| g.category_id.as_str())
            .collect();
        assert_eq!(ids, vec!["health"]);
        assert_eq!(goals.active().count(), 2);
    }

    #[test]
    fn test_serializes_as_list() {
        let goals = BudgetGoals::empty_for(registry());
        let json = serde_json::to_value(&goals).unwrap();
        assert!(json.is_array());
        assert_eq!(json[0]["category_id"], "food");
    }
}
