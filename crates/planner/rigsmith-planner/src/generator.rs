//! Greedy budget-driven build generation
//!
//! Categories are visited once, heaviest allocation first. Each gets its
//! weight times whatever budget is still unspent, and the most expensive
//! compatible option within that amount is taken. Earlier choices are
//! never revisited, so a build may come back with empty slots or unspent
//! budget.

use crate::allocation::BudgetProfile;
use once_cell::sync::Lazy;
use rigsmith_compat::{sockets_compatible, Attribute, CompatibilityEvaluator, CompatibilityFilter};
use rigsmith_core::config::GeneratorConfig;
use rigsmith_core::{
    Build, Catalog, Category, Component, ConfiguratorConfig, Result, UseCase, Validatable,
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

static DEFAULT_GENERATOR: Lazy<BuildGenerator> = Lazy::new(BuildGenerator::new);

/// What happened to one category during generation
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AllocationStep {
    /// Category visited
    pub category: Category,
    /// Allocation weight of the category
    pub weight: f64,
    /// Amount the category could spend; `None` when it was skipped
    pub category_budget: Option<f64>,
    /// Id of the chosen component
    pub selected: Option<String>,
    /// Effective price of the chosen component
    pub spent: f64,
}

/// Generated build with the decisions that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationPlan {
    /// Resulting build
    pub build: Build,
    /// One step per category, in visiting order
    pub steps: Vec<AllocationStep>,
    /// Budget left after the last selection
    pub remaining_budget: f64,
}

/// Builds a parts list from a budget and a use case
#[derive(Debug, Clone)]
pub struct BuildGenerator {
    evaluator: Arc<CompatibilityEvaluator>,
    settings: GeneratorConfig,
}

impl BuildGenerator {
    /// Generator with default configuration
    pub fn new() -> Self {
        Self::with_config(&ConfiguratorConfig::default())
    }

    /// Generator tuned by `config`
    pub fn with_config(config: &ConfiguratorConfig) -> Self {
        Self {
            evaluator: Arc::new(CompatibilityEvaluator::with_config(config)),
            settings: config.generator.clone(),
        }
    }

    /// Generator sharing an existing evaluator
    pub fn with_evaluator(evaluator: Arc<CompatibilityEvaluator>, settings: GeneratorConfig) -> Self {
        Self {
            evaluator,
            settings,
        }
    }

    /// Generate a build
    pub fn generate(&self, budget: f64, use_case: UseCase, catalog: &Catalog) -> Result<Build> {
        Ok(self.plan(BudgetProfile::new(budget, use_case), catalog)?.build)
    }

    /// Generate a build and keep the per-category trace
    pub fn plan(&self, profile: BudgetProfile, catalog: &Catalog) -> Result<GenerationPlan> {
        profile.validate()?;
        let allocation = profile.allocation();
        let filter = CompatibilityFilter::new(&self.evaluator);

        let mut build = Build::new();
        let mut remaining = profile.total_budget;
        let mut steps = Vec::with_capacity(Category::ALL.len());

        for category in allocation.processing_order() {
            let weight = allocation.weight(category);
            let Some(category_budget) = self.category_budget(category, weight, remaining, &build) else {
                debug!(%category, "Skipping unweighted category");
                steps.push(AllocationStep {
                    category,
                    weight,
                    category_budget: None,
                    selected: None,
                    spent: 0.0,
                });
                continue;
            };

            let affordable: Vec<&Component> = catalog
                .options(category)
                .iter()
                .filter(|option| {
                    let price = option.effective_price();
                    price > 0.0 && price <= category_budget
                })
                .collect();
            let cpu_socket = build.get(Category::Cpu).and_then(|cpu| Attribute::CpuSocket.text(cpu));
            let candidates: Vec<&Component> = affordable
                .into_iter()
                .filter(|option| fits_cpu_socket(category, cpu_socket.as_deref(), option))
                .filter(|option| filter.admits(category, option, &build))
                .collect();
            debug!(%category, category_budget, candidates = candidates.len(), "Allocating category");

            let Some(choice) = most_expensive(&candidates) else {
                warn!(%category, category_budget, "No affordable compatible option, leaving slot empty");
                steps.push(AllocationStep {
                    category,
                    weight,
                    category_budget: Some(category_budget),
                    selected: None,
                    spent: 0.0,
                });
                continue;
            };

            let spent = choice.effective_price();
            debug!(%category, component = %choice.id, spent, "Selected component");
            build.insert(category, choice.clone())?;
            remaining -= spent;
            steps.push(AllocationStep {
                category,
                weight,
                category_budget: Some(category_budget),
                selected: Some(choice.id.clone()),
                spent,
            });
        }

        info!(
            use_case = %profile.use_case,
            budget = profile.total_budget,
            selected = build.len(),
            remaining,
            "Build generated"
        );
        Ok(GenerationPlan {
            build,
            steps,
            remaining_budget: remaining,
        })
    }

    fn category_budget(&self, category: Category, weight: f64, remaining: f64, build: &Build) -> Option<f64> {
        if weight > 0.0 {
            return Some(remaining * weight);
        }
        if category == Category::Cooling && wants_aftermarket_cooler(build) {
            return Some(
                (remaining * self.settings.fallback_cooler_share).min(self.settings.fallback_cooler_cap),
            );
        }
        None
    }
}

impl Default for BuildGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// A CPU is selected and its name does not mark it as a tray/OEM part
fn wants_aftermarket_cooler(build: &Build) -> bool {
    build.get(Category::Cpu).is_some_and(|cpu| {
        let name = cpu.name.to_lowercase();
        !name.contains("tray") && !name.contains("oem")
    })
}

fn fits_cpu_socket(category: Category, cpu_socket: Option<&str>, option: &Component) -> bool {
    match (category, cpu_socket) {
        (Category::Motherboard, Some(socket)) => {
            sockets_compatible(Some(socket), Attribute::MotherboardSocket.text(option).as_deref())
        }
        _ => true,
    }
}

/// Highest effective price; the first option wins a tie
fn most_expensive<'c>(candidates: &[&'c Component]) -> Option<&'c Component> {
    candidates.iter().copied().fold(None, |best, option| match best {
        Some(current) if current.effective_price() >= option.effective_price() => Some(current),
        _ => Some(option),
    })
}

/// Generate a build with the default configuration
pub fn generate_build(budget: f64, use_case: UseCase, catalog: &Catalog) -> Result<Build> {
    DEFAULT_GENERATOR.generate(budget, use_case, catalog)
}
