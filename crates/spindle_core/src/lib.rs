//! Spindle Core Primitives
//!
//! This crate provides the foundational pieces for the Spindle wheel picker:
//!
//! - **Items**: the integer-valued, labeled entries a wheel column displays
//! - **Events**: identifiers for the input channels that mutate a column
//! - **State Machines**: the synchronization-mode statechart that keeps the
//!   input channels from misreading each other's side effects
//!
//! # Example
//!
//! ```rust
//! use spindle_core::{wheel_events, ItemList, StateTransitions, WheelMode};
//!
//! let months = ItemList::from_range(1..=12, |v| format!("{v:02}"));
//! assert_eq!(months.index_of(3), Some(2));
//!
//! let mode = WheelMode::Idle;
//! let mode = mode.on_event(wheel_events::STEP_ACCEPTED).unwrap();
//! assert_eq!(mode, WheelMode::Stepping);
//! ```

pub mod events;
pub mod fsm;
pub mod item;

pub use events::wheel_events;
pub use fsm::{StateTransitions, WheelMode};
pub use item::{Item, ItemList};
