//! Breadcrumb trail for moving between organizations, projects, and mandalas.
//!
//! The host owns a `NavigationContext` per browsing session and may persist
//! it as JSON. Entering a different scope resets the trail.

#[cfg(test)]
#[path = "navigation_test.rs"]
mod navigation_test;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One step of the trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Crumb {
    pub id: Uuid,
    pub name: String,
    /// Route the host navigates to when the crumb is clicked.
    pub path: String,
}

/// Trail of visited mandalas within one scope (usually a project).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationContext {
    scope: Option<Uuid>,
    crumbs: Vec<Crumb>,
}

impl NavigationContext {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Switch to `scope`. Returns `true` if the trail was reset.
    pub fn enter_scope(&mut self, scope: Uuid) -> bool {
        if self.scope == Some(scope) {
            return false;
        }
        tracing::debug!(%scope, dropped = self.crumbs.len(), "navigation scope changed");
        self.scope = Some(scope);
        self.crumbs.clear();
        true
    }

    /// Append a crumb. Revisiting a crumb already on the trail truncates
    /// the trail back to it instead of duplicating it.
    pub fn push(&mut self, crumb: Crumb) {
        if let Some(index) = self.crumbs.iter().position(|c| c.id == crumb.id) {
            self.crumbs.truncate(index);
        }
        self.crumbs.push(crumb);
    }

    pub fn pop(&mut self) -> Option<Crumb> {
        self.crumbs.pop()
    }

    pub fn clear(&mut self) {
        self.crumbs.clear();
    }

    #[must_use]
    pub fn scope(&self) -> Option<Uuid> {
        self.scope
    }

    #[must_use]
    pub fn crumbs(&self) -> &[Crumb] {
        &self.crumbs
    }

    #[must_use]
    pub fn current(&self) -> Option<&Crumb> {
        self.crumbs.last()
    }
}
