//! Wheel input event identifiers
//!
//! A wheel column is mutated by three channels: programmatic value pushes,
//! continuous drag scrolling, and discrete wheel-step ticks. The constants
//! here name the occurrences the synchronization state machine cares about.

/// Event type identifier
pub type EventType = u32;

/// Wheel event types
pub mod wheel_events {
    use super::EventType;

    /// A continuous scroll position sample (drag or fling in progress)
    pub const SCROLL_SAMPLE: EventType = 1;
    /// The drag/fling gesture ended and the column may settle
    pub const SCROLL_END: EventType = 2;
    /// A discrete wheel tick survived the debounce window
    pub const STEP_ACCEPTED: EventType = 3;
    /// The step-settling window elapsed
    pub const SETTLE_ELAPSED: EventType = 4;
    /// An external (programmatic) value push arrived
    pub const EXTERNAL_SET: EventType = 5;
    /// The externally pushed value has been written through to the offset
    pub const SYNC_APPLIED: EventType = 6;
}
