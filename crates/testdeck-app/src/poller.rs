//! Dashboard auto-refresh state machine
//!
//! The poller only tracks *whether* polling is active and which timer is
//! current. The timer itself is a one-shot task spawned by the action layer;
//! each tick carries the generation it was scheduled with, and a tick whose
//! generation is no longer current is ignored. This keeps at most one live
//! timer even when a restart races with an already-fired tick.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PollerState {
    #[default]
    Stopped,
    Polling,
}

#[derive(Debug, Clone, Default)]
pub struct DashboardPoller {
    state: PollerState,
    generation: u64,
}

impl DashboardPoller {
    pub fn state(&self) -> PollerState {
        self.state
    }

    pub fn is_polling(&self) -> bool {
        self.state == PollerState::Polling
    }

    /// Enter (or stay in) `Polling` with a fresh timer.
    ///
    /// Returns the generation the new timer must carry. Any earlier timer is
    /// superseded.
    pub fn start(&mut self) -> u64 {
        self.generation += 1;
        self.state = PollerState::Polling;
        self.generation
    }

    /// Enter `Stopped`. Returns whether polling was active.
    pub fn stop(&mut self) -> bool {
        let was_polling = self.is_polling();
        self.state = PollerState::Stopped;
        self.generation += 1;
        was_polling
    }

    /// Whether a tick from the timer with `generation` should be honored
    pub fn accepts_tick(&self, generation: u64) -> bool {
        self.is_polling() && self.generation == generation
    }
}
