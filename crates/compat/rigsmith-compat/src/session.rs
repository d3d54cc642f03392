//! Build session
//!
//! A session pairs a build with the issue map computed from it. Every
//! transition returns a new session; nothing is updated in place, so the
//! issue map can never go stale relative to its build.

use crate::evaluator::CompatibilityEvaluator;
use crate::filter::CompatibilityFilter;
use rigsmith_core::{Build, Category, Component, IssueMap, Result, RigsmithError};
use std::sync::Arc;

/// A build, its issues and the compatibility-mode toggle
#[derive(Debug, Clone)]
pub struct BuildSession {
    build: Build,
    issues: IssueMap,
    compatibility_mode: bool,
    evaluator: Arc<CompatibilityEvaluator>,
}

impl BuildSession {
    /// Empty session with compatibility mode on
    pub fn new() -> Self {
        Self::with_evaluator(Arc::new(CompatibilityEvaluator::new()))
    }

    /// Empty session using a custom evaluator
    pub fn with_evaluator(evaluator: Arc<CompatibilityEvaluator>) -> Self {
        Self {
            issues: evaluator.evaluate(&Build::new()),
            build: Build::new(),
            compatibility_mode: true,
            evaluator,
        }
    }

    fn advance(&self, build: Build) -> Self {
        Self {
            issues: self.evaluator.evaluate(&build),
            build,
            compatibility_mode: self.compatibility_mode,
            evaluator: Arc::clone(&self.evaluator),
        }
    }

    /// Toggle candidate filtering
    pub fn with_compatibility_mode(&self, enabled: bool) -> Self {
        Self {
            compatibility_mode: enabled,
            ..self.clone()
        }
    }

    /// Select a component into the slot named by its own category
    pub fn with_component(&self, component: Component) -> Result<Self> {
        let category = component.category.ok_or_else(|| {
            RigsmithError::invalid_input(format!("component '{}' has no category", component.id))
        })?;
        self.with_component_in(category, component)
    }

    /// Select a component into an explicit slot
    pub fn with_component_in(&self, category: Category, component: Component) -> Result<Self> {
        Ok(self.advance(self.build.with_component(category, component)?))
    }

    /// Clear a slot
    pub fn without_component(&self, category: Category) -> Self {
        self.advance(self.build.without_component(category))
    }

    /// Replace the whole build, e.g. with a generated one
    pub fn with_build(&self, build: Build) -> Self {
        self.advance(build)
    }

    /// Current build
    pub fn build(&self) -> &Build {
        &self.build
    }

    /// Issues of the current build
    pub fn issues(&self) -> &IssueMap {
        &self.issues
    }

    /// Whether candidate filtering is on
    pub fn compatibility_mode(&self) -> bool {
        self.compatibility_mode
    }

    /// Candidates for `category` that fit the current build
    pub fn options_for(&self, category: Category, candidates: &[Component]) -> Vec<Component> {
        CompatibilityFilter::new(&self.evaluator).filter(
            category,
            candidates,
            &self.build,
            self.compatibility_mode,
        )
    }
}

impl Default for BuildSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_is_empty_and_clean() {
        let session = BuildSession::new();
        assert!(session.build().is_empty());
        assert!(session.issues().is_clean());
        assert!(session.compatibility_mode());
    }

    #[test]
    fn test_component_without_category_is_rejected() {
        let mut loose = Component::new("x", Category::Cpu, "Loose", 10.0);
        loose.category = None;
        let err = BuildSession::new().with_component(loose).unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_transitions_leave_previous_session_untouched() {
        let first = BuildSession::new();
        let second = first
            .with_component(Component::new("c", Category::Cpu, "Ryzen", 100.0))
            .unwrap();
        assert!(first.build().is_empty());
        assert!(second.build().contains(Category::Cpu));

        let third = second.without_component(Category::Cpu);
        assert!(third.build().is_empty());
        assert!(second.build().contains(Category::Cpu));
    }
}
