//! The Idle/Running state machine every driver shares.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

/// Play/pause toggle. Transitions report whether they changed anything so
/// callers can arm or cancel their tick exactly once.
#[derive(Debug, Clone, Default)]
pub struct Lifecycle {
    state: RunState,
}

impl Lifecycle {
    /// Idle -> Running. Returns `false` (no-op) if already running.
    pub fn play(&mut self) -> bool {
        let changed = self.state == RunState::Idle;
        self.state = RunState::Running;
        changed
    }

    /// Running -> Idle. Returns `false` (no-op) if already idle.
    pub fn pause(&mut self) -> bool {
        let changed = self.state == RunState::Running;
        self.state = RunState::Idle;
        changed
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }
}
