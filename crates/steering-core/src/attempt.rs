use serde::{Deserialize, Serialize};

/// Mutable state scoped to a single trial attempt.
///
/// Passed explicitly into the checkers instead of living in globals, so
/// independent attempts never observe each other. Reset on setup and restart.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttemptState {
    /// Sticky: set once the target main-menu row is hovered.
    pub submenu_hovered: bool,
    /// Set once an excursion has been marked in a mark-only phase.
    pub excursion_marked: bool,
}

impl AttemptState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Record a hover over the target main-menu row. Never cleared until reset.
    pub fn note_submenu_hover(&mut self) {
        self.submenu_hovered = true;
    }

    pub fn submenu_visible(&self) -> bool {
        self.submenu_hovered
    }

    /// Mark an excursion. Returns `true` only for the first mark of the attempt.
    pub fn mark_excursion(&mut self) -> bool {
        let first = !self.excursion_marked;
        self.excursion_marked = true;
        first
    }
}

/// How the controller reacts to a positive excursion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// No checks run.
    Ignore,
    /// Practice: the first excursion is marked and the attempt continues.
    /// Anti-cheat violations still fail.
    MarkOnly,
    /// The first violation fails the attempt.
    #[default]
    Enforce,
}

impl BoundaryPolicy {
    pub fn should_check(self) -> bool {
        !matches!(self, Self::Ignore)
    }

    pub fn should_enforce(self) -> bool {
        matches!(self, Self::Enforce)
    }
}
