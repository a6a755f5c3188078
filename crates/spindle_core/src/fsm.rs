//! Synchronization-mode state machine
//!
//! A wheel column has three mutation channels that must never misinterpret
//! each other's side effects as fresh user input: an external value push
//! moves the offset, the resulting scroll samples must not be reclassified;
//! an accepted wheel step animates the offset, and those samples must not
//! read as a drag. The channels are arbitrated by a small statechart with
//! timed auto-transitions back to [`WheelMode::Idle`] (the timers live in
//! the column engine; the machine itself is pure).

use std::hash::Hash;

use crate::events::wheel_events::*;

/// Trait for state types that handle event-driven transitions
///
/// Implement on a state enum and pattern-match `(state, event)` pairs;
/// return `None` when the event does not transition the current state.
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: u32) -> Option<Self>;
}

/// Which mutation channel currently owns a wheel column's offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum WheelMode {
    /// No transition in flight; scroll samples reclassify freely
    #[default]
    Idle,
    /// A discrete step was accepted; scroll samples are suppressed until
    /// the step-settling window elapses
    Stepping,
    /// An external value push is being written through (or the one-shot
    /// post-mount re-sync is still pending)
    ExternalSync,
}

impl StateTransitions for WheelMode {
    fn on_event(&self, event: u32) -> Option<Self> {
        match (self, event) {
            (WheelMode::Idle, STEP_ACCEPTED) => Some(WheelMode::Stepping),
            // An accepted step re-arms the settling window
            (WheelMode::Stepping, STEP_ACCEPTED) => Some(WheelMode::Stepping),
            (WheelMode::Stepping, SETTLE_ELAPSED) => Some(WheelMode::Idle),
            // User interaction overrides a pending mount re-sync
            (WheelMode::ExternalSync, STEP_ACCEPTED) => Some(WheelMode::Stepping),
            (WheelMode::ExternalSync, SYNC_APPLIED) => Some(WheelMode::Idle),
            // External authority wins from every mode
            (_, EXTERNAL_SET) => Some(WheelMode::ExternalSync),
            _ => None,
        }
    }
}

impl WheelMode {
    /// Whether continuous scroll samples are currently suppressed
    pub fn suppresses_scroll(&self) -> bool {
        matches!(self, WheelMode::Stepping)
    }

    /// Apply an event in place, tracing the transition. Returns the mode
    /// after the event (unchanged when the event does not apply).
    pub fn send(&mut self, event: u32) -> WheelMode {
        if let Some(next) = self.on_event(event) {
            if next != *self {
                tracing::trace!(from = ?self, to = ?next, event, "wheel mode transition");
            }
            *self = next;
        }
        *self
    }
}
