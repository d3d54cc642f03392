//! Candidate filtering for a single target category

use crate::evaluator::CompatibilityEvaluator;
use rigsmith_core::{Build, Category, Component};
use tracing::debug;

/// Keeps the candidates that would not introduce a blocking conflict
///
/// Only rules that read the target category are run, against whatever
/// else is currently in the build. Warnings never exclude a candidate.
#[derive(Debug, Clone, Copy)]
pub struct CompatibilityFilter<'e> {
    evaluator: &'e CompatibilityEvaluator,
}

impl<'e> CompatibilityFilter<'e> {
    /// Filter backed by the given evaluator's rules
    pub fn new(evaluator: &'e CompatibilityEvaluator) -> Self {
        Self { evaluator }
    }

    /// Check if `candidate` could occupy `target` without an error
    pub fn admits(&self, target: Category, candidate: &Component, build: &Build) -> bool {
        let trial = match build.with_component(target, candidate.clone()) {
            Ok(trial) => trial,
            Err(err) => {
                debug!(%target, candidate = %candidate.id, error = %err, "Candidate rejected");
                return false;
            }
        };
        let blocked = self
            .evaluator
            .findings_involving(&trial, target)
            .blocks(target);
        if blocked {
            debug!(%target, candidate = %candidate.id, "Candidate conflicts with build");
        }
        !blocked
    }

    /// Compatible subset of `candidates`, in their original order
    ///
    /// With `compatibility_mode` off the list comes back unchanged.
    pub fn filter(
        &self,
        target: Category,
        candidates: &[Component],
        build: &Build,
        compatibility_mode: bool,
    ) -> Vec<Component> {
        if !compatibility_mode {
            return candidates.to_vec();
        }
        let kept: Vec<Component> = candidates
            .iter()
            .filter(|candidate| self.admits(target, candidate, build))
            .cloned()
            .collect();
        debug!(
            %target,
            offered = candidates.len(),
            kept = kept.len(),
            "Filtered candidates"
        );
        kept
    }
}

impl Default for CompatibilityFilter<'static> {
    fn default() -> Self {
        Self::new(CompatibilityEvaluator::shared())
    }
}

/// Filter candidates for `category` with the default rules
pub fn filter_compatible_options(
    category: Category,
    candidates: &[Component],
    build: &Build,
    compatibility_mode: bool,
) -> Vec<Component> {
    CompatibilityFilter::default().filter(category, candidates, build, compatibility_mode)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn am5_build() -> Build {
        Build::new()
            .with_component(
                Category::Cpu,
                Component::new("7600", Category::Cpu, "Ryzen 5 7600", 229.0).with_attr("socket", "AM5"),
            )
            .unwrap()
    }

    fn boards() -> Vec<Component> {
        vec![
            Component::new("b550", Category::Motherboard, "B550", 120.0).with_attr("socket", "AM4"),
            Component::new("b650", Category::Motherboard, "B650", 160.0).with_attr("socket", "AM5"),
            Component::new("mystery", Category::Motherboard, "Unknown board", 90.0),
        ]
    }

    #[test]
    fn test_filter_drops_error_conflicts_only() {
        let kept = filter_compatible_options(Category::Motherboard, &boards(), &am5_build(), true);
        let ids: Vec<_> = kept.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["b650", "mystery"]);
    }

    #[test]
    fn test_filter_bypassed_when_disabled() {
        let kept = filter_compatible_options(Category::Motherboard, &boards(), &am5_build(), false);
        assert_eq!(kept, boards());
    }

    #[test]
    fn test_filter_rejects_wrong_category() {
        let gpu = Component::new("gpu", Category::Gpu, "RTX 4070", 549.0);
        let filter = CompatibilityFilter::default();
        assert!(!filter.admits(Category::Motherboard, &gpu, &Build::new()));
    }

    #[test]
    fn test_warnings_do_not_exclude() {
        let build = Build::new()
            .with_component(
                Category::Cpu,
                Component::new("cpu", Category::Cpu, "Core i9", 589.0).with_attr("tdp", 253),
            )
            .unwrap();
        let cooler = Component::new("cooler", Category::Cooling, "Small tower", 35.0)
            .with_attr("tdpSupport", 150);
        let kept = filter_compatible_options(Category::Cooling, &[cooler], &build, true);
        assert_eq!(kept.len(), 1);
    }
}
