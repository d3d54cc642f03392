//! Rule evaluation over a whole build

use crate::power::{estimate_power, PowerEstimate};
use crate::rules::{default_rules, CompatibilityRule, Findings};
use once_cell::sync::Lazy;
use rigsmith_core::config::PowerConfig;
use rigsmith_core::{Build, Category, ConfiguratorConfig, IssueMap};
use tracing::{debug, info};

static DEFAULT_EVALUATOR: Lazy<CompatibilityEvaluator> = Lazy::new(CompatibilityEvaluator::new);

/// Runs a fixed set of compatibility rules against builds
///
/// Rules only read the build, so the result does not depend on rule
/// order and one evaluator can be shared freely across threads.
#[derive(Debug)]
pub struct CompatibilityEvaluator {
    rules: Vec<Box<dyn CompatibilityRule>>,
    power: PowerConfig,
}

impl CompatibilityEvaluator {
    /// Evaluator with the stock rules and default constants
    pub fn new() -> Self {
        Self::with_config(&ConfiguratorConfig::default())
    }

    /// Evaluator with the stock rules tuned by `config`
    pub fn with_config(config: &ConfiguratorConfig) -> Self {
        Self {
            rules: default_rules(&config.power),
            power: config.power.clone(),
        }
    }

    /// Evaluator with a custom rule set
    pub fn with_rules(rules: Vec<Box<dyn CompatibilityRule>>) -> Self {
        Self {
            rules,
            power: PowerConfig::default(),
        }
    }

    /// Rules in evaluation order
    pub fn rules(&self) -> &[Box<dyn CompatibilityRule>] {
        &self.rules
    }

    /// Every finding for the build
    pub fn findings(&self, build: &Build) -> Findings {
        let mut findings = Findings::new();
        for rule in &self.rules {
            rule.check(build, &mut findings);
        }
        findings
    }

    /// Findings of the rules that read `category`
    pub fn findings_involving(&self, build: &Build, category: Category) -> Findings {
        let mut findings = Findings::new();
        for rule in self.rules.iter().filter(|rule| rule.involves(category)) {
            rule.check(build, &mut findings);
        }
        findings
    }

    /// Issue map covering all nine categories
    pub fn evaluate(&self, build: &Build) -> IssueMap {
        debug!(selected = build.len(), rules = self.rules.len(), "Evaluating build");
        let issues = self.findings(build).into_issue_map();
        info!(
            errors = issues.error_count(),
            warnings = issues.warning_count(),
            "Compatibility evaluated"
        );
        issues
    }

    /// Power draw estimate with this evaluator's constants
    pub fn estimate_power(&self, build: &Build) -> Option<PowerEstimate> {
        estimate_power(build, &self.power)
    }

    /// Process-wide evaluator with default configuration
    pub fn shared() -> &'static CompatibilityEvaluator {
        &DEFAULT_EVALUATOR
    }
}

impl Default for CompatibilityEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluate a build with the default rules
pub fn evaluate_compatibility(build: &Build) -> IssueMap {
    DEFAULT_EVALUATOR.evaluate(build)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::SocketRule;
    use rigsmith_core::{Component, Severity};

    fn mismatched_build() -> Build {
        Build::new()
            .with_component(
                Category::Cpu,
                Component::new("cpu", Category::Cpu, "Ryzen 5 5600X", 199.0).with_attr("socket", "AM4"),
            )
            .unwrap()
            .with_component(
                Category::Motherboard,
                Component::new("mb", Category::Motherboard, "X670", 259.0).with_attr("socket", "AM5"),
            )
            .unwrap()
    }

    #[test]
    fn test_empty_build_is_clean() {
        let issues = evaluate_compatibility(&Build::new());
        assert!(issues.is_clean());
        assert_eq!(issues.iter().count(), 9);
    }

    #[test]
    fn test_evaluate_reports_both_sides() {
        let issues = CompatibilityEvaluator::new().evaluate(&mismatched_build());
        assert_eq!(issues.for_category(Category::Cpu).len(), 1);
        assert_eq!(issues.for_category(Category::Motherboard).len(), 1);
        assert_eq!(issues.for_category(Category::Cpu)[0].severity, Severity::Error);
    }

    #[test]
    fn test_findings_involving_selects_rules() {
        let evaluator = CompatibilityEvaluator::new();
        let findings = evaluator.findings_involving(&mismatched_build(), Category::Gpu);
        assert!(findings.is_empty());
        let findings = evaluator.findings_involving(&mismatched_build(), Category::Cpu);
        assert!(findings.blocks(Category::Cpu));
    }

    #[test]
    fn test_custom_rule_set() {
        let evaluator = CompatibilityEvaluator::with_rules(vec![Box::new(SocketRule)]);
        assert_eq!(evaluator.rules().len(), 1);
        assert_eq!(evaluator.evaluate(&mismatched_build()).error_count(), 2);
    }

    #[test]
    fn test_power_constants_follow_config() {
        let mut config = ConfiguratorConfig::default();
        config.power.overhead_watts = 50.0;
        let evaluator = CompatibilityEvaluator::with_config(&config);
        let estimate = evaluator.estimate_power(&mismatched_build()).unwrap();
        assert_eq!(estimate.estimated, 175.0);
    }
}
