//! Expansion state: which post-its show their children in an orbit.
//!
//! Every parent is either collapsed (initial) or expanded. After any change
//! the visible children are recomputed as the union of children of all
//! expanded parents. Children that leave the visible set move to an exiting
//! set, keeping their last position, under an [`ExitTimer`]. The host
//! schedules the timer and reports back through [`Expansion::expire`]. A
//! child that becomes visible again has its pending timer cancelled, so a
//! late `expire` for it is ignored.

#[cfg(test)]
#[path = "expansion_test.rs"]
mod expansion_test;

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::camera::Point;
use crate::doc::{DocStore, Postit, PostitId};
use crate::orbit::{self, OrbitParams};

/// Opaque handle identifying one scheduled exit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerToken(pub u64);

/// A child that just left the visible set and should be purged later.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExitTimer {
    pub child: PostitId,
    pub token: TimerToken,
    /// Host clock time (ms) at which the child should be purged.
    pub deadline_ms: f64,
}

#[derive(Debug, Clone, Copy)]
struct Exiting {
    position: Point,
    token: TimerToken,
    started_ms: f64,
}

/// Expanded parents plus the children currently shown or fading out.
#[derive(Debug, Clone)]
pub struct Expansion {
    expanded: IndexSet<PostitId>,
    visible: IndexMap<PostitId, Point>,
    exiting: IndexMap<PostitId, Exiting>,
    next_token: u64,
    exit_ms: f64,
}

impl Expansion {
    /// Create an empty state whose exits last `exit_ms` milliseconds.
    #[must_use]
    pub fn new(exit_ms: f64) -> Self {
        Self {
            expanded: IndexSet::new(),
            visible: IndexMap::new(),
            exiting: IndexMap::new(),
            next_token: 0,
            exit_ms,
        }
    }

    #[must_use]
    pub fn is_expanded(&self, parent: &PostitId) -> bool {
        self.expanded.contains(parent)
    }

    /// Flip `parent` between collapsed and expanded, then recompute.
    ///
    /// `center_of` gives the absolute center of a post-it that anchors an orbit.
    pub fn toggle<F>(
        &mut self,
        parent: PostitId,
        now_ms: f64,
        doc: &DocStore,
        params: &OrbitParams,
        center_of: F,
    ) -> Vec<ExitTimer>
    where
        F: Fn(&Postit) -> Option<Point>,
    {
        let expanded = if self.expanded.shift_remove(&parent) {
            false
        } else {
            self.expanded.insert(parent)
        };
        tracing::debug!(%parent, expanded, "toggled post-it expansion");
        self.recompute(now_ms, doc, params, center_of)
    }

    /// Rebuild the visible set from the expanded parents.
    ///
    /// Returns timers for children that just started exiting.
    pub fn recompute<F>(&mut self, now_ms: f64, doc: &DocStore, params: &OrbitParams, center_of: F) -> Vec<ExitTimer>
    where
        F: Fn(&Postit) -> Option<Point>,
    {
        self.expanded.retain(|id| doc.postit(id).is_some());

        let mut next = IndexMap::new();
        for parent_id in &self.expanded {
            let Some(center) = doc.postit(parent_id).and_then(&center_of) else {
                continue;
            };
            let children = doc.children_of(parent_id);
            let positions = orbit::layout(center, &children, params);
            for child in children {
                if let Some(pos) = positions.get(&child) {
                    next.insert(child, *pos);
                }
            }
        }

        let mut timers = Vec::new();
        for (child, position) in &self.visible {
            if next.contains_key(child) || doc.postit(child).is_none() {
                continue;
            }
            let token = TimerToken(self.next_token);
            self.next_token += 1;
            self.exiting.insert(*child, Exiting { position: *position, token, started_ms: now_ms });
            timers.push(ExitTimer { child: *child, token, deadline_ms: now_ms + self.exit_ms });
        }

        self.exiting.retain(|child, _| !next.contains_key(child));
        self.visible = next;
        timers
    }

    /// Purge the exiting child scheduled under `token`.
    ///
    /// Returns `None` if the token was cancelled or already handled.
    pub fn expire(&mut self, token: TimerToken) -> Option<PostitId> {
        let child = self
            .exiting
            .iter()
            .find(|(_, exiting)| exiting.token == token)
            .map(|(child, _)| *child)?;
        self.exiting.shift_remove(&child);
        Some(child)
    }

    /// Purge every exiting child whose animation has finished by `now_ms`.
    pub fn purge_due(&mut self, now_ms: f64) -> Vec<PostitId> {
        let exit_ms = self.exit_ms;
        let due: Vec<PostitId> = self
            .exiting
            .iter()
            .filter(|(_, exiting)| now_ms - exiting.started_ms >= exit_ms)
            .map(|(child, _)| *child)
            .collect();
        for child in &due {
            self.exiting.shift_remove(child);
        }
        due
    }

    /// Visible children and their top-left positions.
    pub fn visible(&self) -> impl Iterator<Item = (PostitId, Point)> + '_ {
        self.visible.iter().map(|(id, pos)| (*id, *pos))
    }

    #[must_use]
    pub fn visible_position(&self, child: &PostitId) -> Option<Point> {
        self.visible.get(child).copied()
    }

    /// Exiting children with their last position and fade progress in `[0, 1]`.
    pub fn exiting(&self, now_ms: f64) -> impl Iterator<Item = (PostitId, Point, f64)> + '_ {
        self.exiting.iter().map(move |(id, exiting)| {
            let progress = if self.exit_ms > 0.0 {
                ((now_ms - exiting.started_ms) / self.exit_ms).clamp(0.0, 1.0)
            } else {
                1.0
            };
            (*id, exiting.position, progress)
        })
    }

    #[must_use]
    pub fn is_exiting(&self, child: &PostitId) -> bool {
        self.exiting.contains_key(child)
    }
}
