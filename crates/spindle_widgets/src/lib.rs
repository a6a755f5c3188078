//! Spindle Wheel Picker Widgets
//!
//! A headless spinning-wheel date picker: three synchronized wheel columns
//! (year, month, day) whose continuous scroll offsets, discrete selections,
//! and derived per-row visuals stay mutually consistent under programmatic
//! pushes, drag scrolling, and discrete wheel steps.
//!
//! The embedder feeds input events and pumps frames:
//!
//! ```rust
//! use std::time::Instant;
//!
//! use spindle_widgets::{DatePickerConfig, PickerColumn, WheelDatePicker};
//!
//! let now = Instant::now();
//! let mut picker = WheelDatePicker::new(DatePickerConfig::default(), now)
//!     .on_change(|date| println!("picked {date}"));
//!
//! // One wheel tick on the day column, then pump a frame.
//! picker.wheel_tick(PickerColumn::Day, 1.0, now);
//! picker.tick(now);
//! ```

pub mod calendar;
pub mod date_picker;
pub mod row_visual;
pub mod wheel;

pub use date_picker::{DatePickerConfig, PickerColumn, PickerConfigError, WheelDatePicker};
pub use row_visual::{row_visual, RowVisual};
pub use wheel::{WheelColumn, WheelConfig};
