//! Three-column wheel date picker
//!
//! [`WheelDatePicker`] owns the year/month/day wheel columns and keeps them
//! calendar-consistent: whenever the year or month changes, the day range
//! is re-derived and the day clamped into it (the clamp propagates like any
//! other day change). One composed-date notification fires per settled
//! change, deduplicated by calendar value so internal recomputations that
//! land on the same date stay silent.

use std::time::Instant;

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use spindle_core::ItemList;

use crate::calendar::{clamp_date, days_in_month};
use crate::row_visual::RowVisual;
use crate::wheel::{WheelColumn, WheelConfig};

/// Which of the three wheels an input event targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerColumn {
    Year,
    Month,
    Day,
}

/// Composed-date change listener
pub type DateListener = Box<dyn FnMut(NaiveDate) + Send>;

/// Errors a [`DatePickerConfig`] can report before construction
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PickerConfigError {
    /// The configured minimum date lies after the maximum date
    #[error("minimum date {min} is after maximum date {max}")]
    ReversedRange { min: NaiveDate, max: NaiveDate },
}

/// Configuration for [`WheelDatePicker`]
#[derive(Debug, Clone, Copy)]
pub struct DatePickerConfig {
    /// Date the wheels are seeded with (clamped into the range)
    pub initial: NaiveDate,
    /// Inclusive lower bound of the selectable range
    pub min: NaiveDate,
    /// Inclusive upper bound of the selectable range
    pub max: NaiveDate,
    /// Wheel behavior shared by all three columns
    pub wheel: WheelConfig,
}

impl Default for DatePickerConfig {
    fn default() -> Self {
        Self {
            initial: chrono::Local::now().date_naive(),
            min: NaiveDate::from_ymd_opt(1900, 1, 1).expect("valid min date"),
            max: NaiveDate::from_ymd_opt(2100, 12, 31).expect("valid max date"),
            wheel: WheelConfig::default(),
        }
    }
}

impl DatePickerConfig {
    /// Report configuration problems without constructing a picker.
    /// Construction itself never fails; it normalizes instead.
    pub fn validate(&self) -> Result<(), PickerConfigError> {
        if self.min > self.max {
            return Err(PickerConfigError::ReversedRange {
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }

    /// Swap a reversed range and clamp the initial date into bounds
    fn normalized(mut self) -> Self {
        if self.min > self.max {
            tracing::warn!(
                min = %self.min,
                max = %self.max,
                "date range is reversed; swapping bounds"
            );
            std::mem::swap(&mut self.min, &mut self.max);
        }
        self.initial = clamp_date(self.initial, self.min, self.max);
        self
    }
}

/// The three-column picker coordinator
pub struct WheelDatePicker {
    year_wheel: WheelColumn,
    month_wheel: WheelColumn,
    day_wheel: WheelColumn,
    year: i32,
    month: u32,
    day: u32,
    min: NaiveDate,
    max: NaiveDate,
    last_emitted: Option<NaiveDate>,
    on_change: Option<DateListener>,
}

impl WheelDatePicker {
    /// Build a picker seeded from the configured initial date
    pub fn new(config: DatePickerConfig, now: Instant) -> Self {
        let config = config.normalized();
        let initial = config.initial;
        let year = initial.year();
        let month = initial.month();
        let day = initial.day();

        let year_items = ItemList::from_range(config.min.year()..=config.max.year(), |v| {
            v.to_string()
        });
        let month_items = ItemList::from_range(1..=12, |v| format!("{v:02}"));
        let day_items = Self::day_items(year, month);

        Self {
            year_wheel: WheelColumn::new(year_items, year, config.wheel, now),
            month_wheel: WheelColumn::new(month_items, month as i32, config.wheel, now),
            day_wheel: WheelColumn::new(day_items, day as i32, config.wheel, now),
            year,
            month,
            day,
            min: config.min,
            max: config.max,
            last_emitted: Some(initial),
            on_change: None,
        }
    }

    /// Register the composed-date callback (chainable at construction)
    pub fn on_change(mut self, listener: impl FnMut(NaiveDate) + Send + 'static) -> Self {
        self.on_change = Some(Box::new(listener));
        self
    }

    /// The currently composed date
    pub fn date(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day).unwrap_or(self.min)
    }

    /// Inclusive selectable range
    pub fn range(&self) -> (NaiveDate, NaiveDate) {
        (self.min, self.max)
    }

    /// Borrow one of the wheels (for rendering embedders)
    pub fn wheel(&self, column: PickerColumn) -> &WheelColumn {
        match column {
            PickerColumn::Year => &self.year_wheel,
            PickerColumn::Month => &self.month_wheel,
            PickerColumn::Day => &self.day_wheel,
        }
    }

    /// Derived visuals for one wheel's rows
    pub fn row_visuals(
        &self,
        column: PickerColumn,
    ) -> impl Iterator<Item = (usize, &spindle_core::Item, RowVisual)> + '_ {
        self.wheel(column).row_visuals()
    }

    /// Route a continuous scroll sample to a column
    pub fn scroll_sample(&mut self, column: PickerColumn, offset: f32, now: Instant) {
        if let Some(value) = self.wheel_mut(column).scroll_sample(offset, now) {
            self.apply(column, value, now);
        }
    }

    /// Route a drag-release to a column
    pub fn scroll_end(&mut self, column: PickerColumn, now: Instant) {
        self.wheel_mut(column).scroll_end(now);
    }

    /// Route a discrete wheel tick to a column
    pub fn wheel_tick(&mut self, column: PickerColumn, delta: f32, now: Instant) {
        if let Some(value) = self.wheel_mut(column).wheel_tick(delta, now) {
            self.apply(column, value, now);
        }
    }

    /// Push a date from outside. The wheels jump without animation and no
    /// change notification echoes back; the push becomes the new
    /// deduplication anchor.
    pub fn set_date(&mut self, date: NaiveDate, now: Instant) {
        let date = clamp_date(date, self.min, self.max);
        self.year = date.year();
        self.month = date.month();
        self.day = date.day();

        self.rebuild_day_items_if_needed();
        self.year_wheel.set_selected(self.year, now);
        self.month_wheel.set_selected(self.month as i32, now);
        self.day_wheel.set_selected(self.day as i32, now);
        self.last_emitted = Some(date);
    }

    /// Frame pump for all three columns. Returns whether any column is
    /// still animating.
    pub fn tick(&mut self, now: Instant) -> bool {
        let year = self.year_wheel.tick(now);
        let month = self.month_wheel.tick(now);
        let day = self.day_wheel.tick(now);
        year || month || day
    }

    fn wheel_mut(&mut self, column: PickerColumn) -> &mut WheelColumn {
        match column {
            PickerColumn::Year => &mut self.year_wheel,
            PickerColumn::Month => &mut self.month_wheel,
            PickerColumn::Day => &mut self.day_wheel,
        }
    }

    /// Fold a user-driven column change into picker state and re-derive
    /// everything that depends on it
    fn apply(&mut self, column: PickerColumn, value: i32, now: Instant) {
        match column {
            PickerColumn::Year => self.year = value,
            PickerColumn::Month => self.month = value.max(1) as u32,
            PickerColumn::Day => self.day = value.max(1) as u32,
        }
        self.reconcile(now);
    }

    /// Re-enforce the day clamp invariant, regenerate the day wheel when
    /// its range changed, and emit the composed date if it moved
    fn reconcile(&mut self, now: Instant) {
        let max_day = days_in_month(self.year, self.month);
        if self.day > max_day {
            tracing::debug!(day = self.day, max_day, "clamping day into month range");
            self.day = max_day;
        }

        self.rebuild_day_items_if_needed();
        self.day_wheel.set_selected(self.day as i32, now);

        let Some(composed) = NaiveDate::from_ymd_opt(self.year, self.month, self.day) else {
            debug_assert!(false, "clamped state composed an invalid date");
            return;
        };
        if self.last_emitted != Some(composed) {
            self.last_emitted = Some(composed);
            tracing::debug!(date = %composed, "composed date changed");
            if let Some(listener) = self.on_change.as_mut() {
                listener(composed);
            }
        }
    }

    fn rebuild_day_items_if_needed(&mut self) {
        let max_day = days_in_month(self.year, self.month) as usize;
        if self.day_wheel.items().len() != max_day {
            self.day_wheel.set_items(Self::day_items(self.year, self.month));
        }
    }

    fn day_items(year: i32, month: u32) -> ItemList {
        ItemList::from_range(1..=days_in_month(year, month) as i32, |v| format!("{v:02}"))
    }
}
