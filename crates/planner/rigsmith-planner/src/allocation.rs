//! Budget allocation tables per use case

use rigsmith_core::{Category, Result, RigsmithError, UseCase, Validatable};
use serde::{Deserialize, Serialize};

/// Fraction of the remaining budget each category receives
///
/// Categories not listed get weight 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation(&'static [(Category, f64)]);

const GAMING: Allocation = Allocation(&[
    (Category::Gpu, 0.35),
    (Category::Cpu, 0.20),
    (Category::Motherboard, 0.12),
    (Category::Memory, 0.08),
    (Category::Storage, 0.08),
    (Category::Psu, 0.07),
    (Category::Case, 0.05),
]);

const PRODUCTIVITY: Allocation = Allocation(&[
    (Category::Cpu, 0.30),
    (Category::Motherboard, 0.15),
    (Category::Memory, 0.15),
    (Category::Storage, 0.12),
    (Category::Gpu, 0.12),
    (Category::Psu, 0.07),
    (Category::Case, 0.05),
    (Category::Cooling, 0.04),
]);

const STREAMING: Allocation = Allocation(&[
    (Category::Cpu, 0.25),
    (Category::Gpu, 0.25),
    (Category::Motherboard, 0.12),
    (Category::Memory, 0.12),
    (Category::Storage, 0.10),
    (Category::Psu, 0.07),
    (Category::Case, 0.05),
    (Category::Cooling, 0.04),
]);

const OFFICE: Allocation = Allocation(&[
    (Category::Cpu, 0.25),
    (Category::Motherboard, 0.15),
    (Category::Storage, 0.15),
    (Category::Monitor, 0.15),
    (Category::Memory, 0.12),
    (Category::Psu, 0.08),
    (Category::Case, 0.08),
]);

const DEFAULT: Allocation = Allocation(&[
    (Category::Gpu, 0.26),
    (Category::Cpu, 0.22),
    (Category::Motherboard, 0.13),
    (Category::Memory, 0.10),
    (Category::Storage, 0.10),
    (Category::Psu, 0.08),
    (Category::Case, 0.06),
    (Category::Cooling, 0.05),
]);

impl Allocation {
    /// Weight of `category`, 0 when unlisted
    pub fn weight(&self, category: Category) -> f64 {
        self.0
            .iter()
            .find(|(listed, _)| *listed == category)
            .map_or(0.0, |(_, weight)| *weight)
    }

    /// Listed categories and their weights
    pub fn entries(&self) -> &'static [(Category, f64)] {
        self.0
    }

    /// Sum of all weights
    pub fn total(&self) -> f64 {
        self.0.iter().map(|(_, weight)| weight).sum()
    }

    /// All nine categories, heaviest first
    ///
    /// Equal weights keep [`Category::ALL`] order.
    pub fn processing_order(&self) -> Vec<Category> {
        let mut order = Category::ALL.to_vec();
        order.sort_by(|a, b| self.weight(*b).total_cmp(&self.weight(*a)));
        order
    }
}

/// Allocation table for a use case
pub fn allocation_for(use_case: UseCase) -> Allocation {
    match use_case {
        UseCase::Gaming => GAMING,
        UseCase::Productivity => PRODUCTIVITY,
        UseCase::Streaming => STREAMING,
        UseCase::Office => OFFICE,
        UseCase::Default => DEFAULT,
    }
}

/// A generation request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetProfile {
    /// Total amount available
    pub total_budget: f64,
    /// Allocation profile
    pub use_case: UseCase,
}

impl BudgetProfile {
    /// Create a profile
    pub fn new(total_budget: f64, use_case: UseCase) -> Self {
        Self {
            total_budget,
            use_case,
        }
    }

    /// Allocation table of the profile's use case
    pub fn allocation(&self) -> Allocation {
        allocation_for(self.use_case)
    }
}

impl Validatable for BudgetProfile {
    fn validate(&self) -> Result<()> {
        if !self.total_budget.is_finite() || self.total_budget <= 0.0 {
            return Err(RigsmithError::InvalidBudget {
                budget: self.total_budget,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_weights_never_exceed_budget() {
        for use_case in UseCase::ALL {
            let total = allocation_for(use_case).total();
            assert!(total <= 1.0 + 1e-9, "{use_case} allocates {total}");
        }
    }

    #[test]
    fn test_unlisted_category_weighs_nothing() {
        assert_eq!(allocation_for(UseCase::Gaming).weight(Category::Cooling), 0.0);
        assert_eq!(allocation_for(UseCase::Office).weight(Category::Gpu), 0.0);
        assert_eq!(allocation_for(UseCase::Office).weight(Category::Monitor), 0.15);
    }

    #[test]
    fn test_gaming_order() {
        assert_eq!(
            allocation_for(UseCase::Gaming).processing_order(),
            vec![
                Category::Gpu,
                Category::Cpu,
                Category::Motherboard,
                Category::Memory,
                Category::Storage,
                Category::Psu,
                Category::Case,
                Category::Cooling,
                Category::Monitor,
            ]
        );
    }

    #[test]
    fn test_ties_follow_priority_list() {
        let order = allocation_for(UseCase::Streaming).processing_order();
        assert_eq!(&order[..2], &[Category::Cpu, Category::Gpu]);
        let order = allocation_for(UseCase::Office).processing_order();
        assert_eq!(
            &order[1..4],
            &[Category::Motherboard, Category::Storage, Category::Monitor]
        );
    }

    #[test_case(0.0 ; "zero")]
    #[test_case(-100.0 ; "negative")]
    #[test_case(f64::NAN ; "not a number")]
    #[test_case(f64::INFINITY ; "infinite")]
    fn test_invalid_budgets(budget: f64) {
        let err = BudgetProfile::new(budget, UseCase::Gaming).validate().unwrap_err();
        assert!(matches!(err, RigsmithError::InvalidBudget { .. }));
    }

    #[test]
    fn test_profile_serde() {
        let profile: BudgetProfile =
            serde_json::from_str(r#"{"totalBudget": 1200, "useCase": "streaming"}"#).unwrap();
        assert_eq!(profile, BudgetProfile::new(1200.0, UseCase::Streaming));
        assert!(profile.is_valid());
    }
}
