//! Builds and issue maps
//!
//! A [`Build`] holds at most one component per category. Transitions are
//! pure: `with_component` / `without_component` return a new build and
//! leave the original untouched. An [`IssueMap`] is always complete (one
//! entry per category) and is recomputed wholesale after every change.

use crate::component::Component;
use crate::error::{Result, RigsmithError};
use crate::traits::Validatable;
use crate::types::{Category, Issue, Severity};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

type BuildRepr = BTreeMap<Category, Option<Component>>;

/// The user's current selection, one optional component per category
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BuildRepr", into = "BuildRepr")]
pub struct Build {
    slots: BTreeMap<Category, Component>,
}

impl Build {
    /// Create an empty build
    pub fn new() -> Self {
        Self::default()
    }

    /// Component selected for a category
    pub fn get(&self, category: Category) -> Option<&Component> {
        self.slots.get(&category)
    }

    /// Check if a category is populated
    pub fn contains(&self, category: Category) -> bool {
        self.slots.contains_key(&category)
    }

    /// Place a component, returning the one it replaced
    ///
    /// Fails when the component declares a different category than the slot.
    pub fn insert(&mut self, category: Category, component: Component) -> Result<Option<Component>> {
        if let Some(found) = component.category {
            if found != category {
                return Err(RigsmithError::CategoryMismatch { slot: category, found });
            }
        }
        Ok(self.slots.insert(category, component))
    }

    /// Clear a slot
    pub fn remove(&mut self, category: Category) -> Option<Component> {
        self.slots.remove(&category)
    }

    /// New build with `component` in `category`
    pub fn with_component(&self, category: Category, component: Component) -> Result<Build> {
        let mut next = self.clone();
        next.insert(category, component)?;
        Ok(next)
    }

    /// New build with `category` cleared
    #[must_use]
    pub fn without_component(&self, category: Category) -> Build {
        let mut next = self.clone();
        next.remove(category);
        next
    }

    /// Populated slots in category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &Component)> {
        self.slots.iter().map(|(category, component)| (*category, component))
    }

    /// Number of populated slots
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Check if nothing is selected
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Sum of effective prices of all selected components
    pub fn effective_total(&self) -> f64 {
        self.slots.values().map(Component::effective_price).sum()
    }
}

impl Validatable for Build {
    fn validate(&self) -> Result<()> {
        for (slot, component) in &self.slots {
            if let Some(found) = component.category {
                if found != *slot {
                    return Err(RigsmithError::CategoryMismatch { slot: *slot, found });
                }
            }
        }
        Ok(())
    }
}

impl TryFrom<BuildRepr> for Build {
    type Error = RigsmithError;

    fn try_from(repr: BuildRepr) -> Result<Self> {
        let mut build = Build::new();
        for (category, component) in repr {
            if let Some(component) = component {
                build.insert(category, component)?;
            }
        }
        Ok(build)
    }
}

impl From<Build> for BuildRepr {
    fn from(build: Build) -> Self {
        let mut slots = build.slots;
        Category::ALL
            .into_iter()
            .map(|category| (category, slots.remove(&category)))
            .collect()
    }
}

/// Issues per category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<Category, Vec<Issue>>", into = "BTreeMap<Category, Vec<Issue>>")]
pub struct IssueMap {
    issues: BTreeMap<Category, Vec<Issue>>,
}

impl IssueMap {
    /// Create a map with an empty list for every category
    pub fn new() -> Self {
        Self {
            issues: Category::ALL.into_iter().map(|c| (c, Vec::new())).collect(),
        }
    }

    /// Append an issue to one category
    pub fn push(&mut self, category: Category, issue: Issue) {
        self.issues.entry(category).or_default().push(issue);
    }

    /// Issues recorded for a category
    pub fn for_category(&self, category: Category) -> &[Issue] {
        self.issues.get(&category).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check if any category has a blocking issue
    pub fn has_errors(&self) -> bool {
        self.error_count() > 0
    }

    /// Number of error-severity entries across all categories
    pub fn error_count(&self) -> usize {
        self.count(Severity::Error)
    }

    /// Number of warning-severity entries across all categories
    pub fn warning_count(&self) -> usize {
        self.count(Severity::Warning)
    }

    /// Total number of entries across all categories
    pub fn total(&self) -> usize {
        self.issues.values().map(Vec::len).sum()
    }

    /// Check if no category has any issue
    pub fn is_clean(&self) -> bool {
        self.total() == 0
    }

    /// Every category with its issue list, in category order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[Issue])> {
        self.issues.iter().map(|(category, issues)| (*category, issues.as_slice()))
    }

    fn count(&self, severity: Severity) -> usize {
        self.issues
            .values()
            .flatten()
            .filter(|issue| issue.severity == severity)
            .count()
    }
}

impl Default for IssueMap {
    fn default() -> Self {
        Self::new()
    }
}

impl From<BTreeMap<Category, Vec<Issue>>> for IssueMap {
    fn from(partial: BTreeMap<Category, Vec<Issue>>) -> Self {
        let mut map = IssueMap::new();
        for (category, issues) in partial {
            map.issues.insert(category, issues);
        }
        map
    }
}

impl From<IssueMap> for BTreeMap<Category, Vec<Issue>> {
    fn from(map: IssueMap) -> Self {
        map.issues
    }
}
