//! Wheel column synchronization engine
//!
//! A [`WheelColumn`] owns the mapping between a discrete selected value and
//! a continuous scroll offset, and reconciles the three channels that
//! mutate it: programmatic value pushes, continuous drag samples, and
//! discrete wheel-step ticks. Channel arbitration runs through the
//! [`WheelMode`] statechart; two per-column time windows (step debounce and
//! step settling) gate the discrete channel and suppress drag
//! reclassification while a step's own animation is in flight.
//!
//! Time is injected on every call (`Instant` parameters); the engine never
//! reads a global clock, so every temporal contract is deterministic under
//! test. Dropping the column drops its deadlines and tween with it, so a
//! pending window can never act on a torn-down column.

use std::time::{Duration, Instant};

use smallvec::SmallVec;

use spindle_animation::{Easing, Tween};
use spindle_core::wheel_events::*;
use spindle_core::{ItemList, WheelMode};

use crate::row_visual::{row_visual, RowVisual};

/// Change listener invoked with the newly selected value
pub type ValueListener = Box<dyn Fn(i32) + Send + Sync>;

/// Configuration for wheel behavior
#[derive(Debug, Clone, Copy)]
pub struct WheelConfig {
    /// Height of one row in pixels
    pub item_height: f32,
    /// Rows visible in the viewport (odd, so one row sits at center)
    pub visible_items: usize,
    /// Discrete steps closer together than this are dropped
    pub step_debounce: Duration,
    /// Window after an accepted step during which drag samples are
    /// suppressed; also the duration of the step's settle animation
    pub step_settle: Duration,
    /// Post-mount delay before the one-shot offset re-assertion
    pub mount_resync: Duration,
    /// Duration of the snap-to-row animation after a drag release
    pub snap_duration: Duration,
    /// Easing curve for snap and step animations
    pub snap_easing: Easing,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            item_height: 40.0,
            visible_items: 5,
            step_debounce: Duration::from_millis(150),
            step_settle: Duration::from_millis(200),
            mount_resync: Duration::from_millis(30),
            snap_duration: Duration::from_millis(200),
            snap_easing: Easing::EaseOutCubic,
        }
    }
}

/// One synchronized wheel column
pub struct WheelColumn {
    items: ItemList,
    selected: i32,
    offset: f32,
    mode: WheelMode,
    config: WheelConfig,
    /// Time of the previously accepted discrete step
    last_step: Option<Instant>,
    /// End of the step-settling window
    settle_deadline: Option<Instant>,
    /// One-shot post-mount re-sync
    resync_deadline: Option<Instant>,
    /// Active snap/settle animation
    snap: Option<Tween>,
    listeners: SmallVec<[ValueListener; 2]>,
}

impl WheelColumn {
    /// Create a column seeded with `selected`. The offset is written
    /// through immediately; because layout measurement can race the first
    /// paint, the column stays in external-sync mode and re-asserts the
    /// offset once more after the configured mount delay.
    pub fn new(items: ItemList, selected: i32, config: WheelConfig, now: Instant) -> Self {
        let offset = items
            .index_of(selected)
            .map(|index| index as f32 * config.item_height)
            .unwrap_or(0.0);
        Self {
            items,
            selected,
            offset,
            mode: WheelMode::ExternalSync,
            config,
            last_step: None,
            settle_deadline: None,
            resync_deadline: Some(now + config.mount_resync),
            snap: None,
            listeners: SmallVec::new(),
        }
    }

    /// Register a selection-change listener. Fired for user-driven changes
    /// only (drag reclassification and accepted steps), never for
    /// programmatic pushes.
    pub fn on_value_change(&mut self, listener: impl Fn(i32) + Send + Sync + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Currently selected value
    pub fn selected_value(&self) -> i32 {
        self.selected
    }

    /// Current continuous scroll offset in pixels
    pub fn offset(&self) -> f32 {
        self.offset
    }

    /// Current synchronization mode
    pub fn mode(&self) -> WheelMode {
        self.mode
    }

    /// The column's items
    pub fn items(&self) -> &ItemList {
        &self.items
    }

    /// The column's configuration
    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Programmatically select a value. Idempotent: pushing the value that
    /// is already selected performs no motion and notifies nobody; a value
    /// absent from the items is a silent no-op. An in-flight step/settle
    /// transition is cancelled first: external authority wins.
    pub fn set_selected(&mut self, value: i32, now: Instant) {
        if value == self.selected {
            return;
        }
        let Some(index) = self.items.index_of(value) else {
            tracing::trace!(value, "set_selected: no matching item, ignoring");
            return;
        };

        self.mode.send(EXTERNAL_SET);
        self.last_step = None;
        self.settle_deadline = None;
        self.snap = None;

        self.selected = value;
        self.offset = index as f32 * self.config.item_height;
        tracing::debug!(value, offset = self.offset, "selection pushed externally");

        // Stay in external-sync only while the mount re-assertion is
        // pending; otherwise the write-through completes the sync.
        if self.resync_deadline.is_none() {
            self.mode.send(SYNC_APPLIED);
        } else {
            self.resync_deadline = Some(now + self.config.mount_resync);
        }
    }

    /// Feed one continuous scroll sample (drag/fling position). Suppressed
    /// while a step-settling window is open so the step's own animation is
    /// never misread as a drag. Returns the newly selected value when the
    /// sample reclassified the selection.
    pub fn scroll_sample(&mut self, offset: f32, now: Instant) -> Option<i32> {
        if self.items.is_empty() {
            return None;
        }
        if self.mode.suppresses_scroll() {
            match self.settle_deadline {
                Some(deadline) if now < deadline => {
                    tracing::trace!(offset, "scroll sample suppressed during step settling");
                    return None;
                }
                _ => {
                    // Window already elapsed; close it out before
                    // classifying this sample.
                    self.settle_deadline = None;
                    self.snap = None;
                    self.mode.send(SETTLE_ELAPSED);
                }
            }
        }

        // The user owns the offset again; abandon any pending snap.
        self.snap = None;
        self.offset = offset;

        let index = self.index_for_offset(offset);
        let value = self.items.value_at(index)?;
        if value != self.selected {
            self.selected = value;
            tracing::debug!(value, index, "selection reclassified from scroll");
            self.notify(value);
            return Some(value);
        }
        None
    }

    /// The drag/fling gesture ended: settle the offset onto the selected
    /// row. No selection change and no notification; samples already
    /// classified the selection while the gesture ran.
    pub fn scroll_end(&mut self, now: Instant) {
        if self.items.is_empty() || self.mode != WheelMode::Idle {
            return;
        }
        let index = self
            .items
            .index_of(self.selected)
            .unwrap_or_else(|| self.index_for_offset(self.offset));
        let target = index as f32 * self.config.item_height;
        if (self.offset - target).abs() > f32::EPSILON {
            tracing::trace!(from = self.offset, to = target, "settling after drag release");
            self.snap = Some(Tween::new(
                self.offset,
                target,
                now,
                self.config.snap_duration,
                self.config.snap_easing,
            ));
        }
    }

    /// Feed one discrete wheel tick. Ticks inside the debounce window are
    /// dropped entirely. An accepted tick re-arms both time windows and
    /// moves the selection by exactly one row in the delta's direction,
    /// saturating at the ends (a boundary tick arms the windows but moves
    /// nothing and notifies nobody). Returns the newly selected value when
    /// the tick moved the selection.
    pub fn wheel_tick(&mut self, delta: f32, now: Instant) -> Option<i32> {
        if self.items.is_empty() || delta == 0.0 {
            return None;
        }
        if let Some(last) = self.last_step {
            if now.saturating_duration_since(last) < self.config.step_debounce {
                tracing::trace!(delta, "wheel tick dropped by debounce");
                return None;
            }
        }

        self.last_step = Some(now);
        self.resync_deadline = None;
        self.mode.send(STEP_ACCEPTED);
        self.settle_deadline = Some(now + self.config.step_settle);

        let current = self.items.index_of(self.selected)?;
        let next = if delta > 0.0 {
            (current + 1).min(self.items.last_index())
        } else {
            current.saturating_sub(1)
        };
        if next == current {
            tracing::trace!(current, "wheel tick saturated at boundary");
            return None;
        }

        let value = self.items.value_at(next)?;
        self.selected = value;
        let target = next as f32 * self.config.item_height;
        self.snap = Some(Tween::new(
            self.offset,
            target,
            now,
            self.config.step_settle,
            self.config.snap_easing,
        ));
        tracing::debug!(value, index = next, "selection stepped");
        self.notify(value);
        Some(value)
    }

    /// Frame pump: advances the snap animation and expires the time
    /// windows. Returns whether anything is still in motion.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.items.is_empty() {
            return false;
        }

        if let Some(tween) = self.snap {
            self.offset = tween.sample(now);
            if tween.is_done(now) {
                self.offset = tween.end();
                self.snap = None;
            }
        }

        if self.mode == WheelMode::Stepping {
            match self.settle_deadline {
                Some(deadline) if now < deadline => {}
                _ => {
                    self.settle_deadline = None;
                    self.snap = None;
                    self.align_offset();
                    self.mode.send(SETTLE_ELAPSED);
                }
            }
        }

        if self.mode == WheelMode::ExternalSync {
            match self.resync_deadline {
                Some(deadline) if now < deadline => {}
                _ => {
                    // One bounded re-assertion, then native settling is
                    // trusted from here on.
                    self.resync_deadline = None;
                    self.align_offset();
                    self.mode.send(SYNC_APPLIED);
                }
            }
        }

        self.snap.is_some() || self.mode != WheelMode::Idle
    }

    /// Replace the item list (the day column when its month changes). A
    /// still-present selection keeps its row, with the offset re-aligned;
    /// an absent selection is left for the owner's next push, with the
    /// offset clamped into the new range.
    pub fn set_items(&mut self, items: ItemList) {
        self.snap = None;
        self.items = items;
        if self.items.is_empty() {
            return;
        }
        match self.items.index_of(self.selected) {
            Some(index) => self.offset = index as f32 * self.config.item_height,
            None => {
                let max = self.items.last_index() as f32 * self.config.item_height;
                self.offset = self.offset.clamp(0.0, max);
                tracing::trace!(
                    selected = self.selected,
                    "selection absent from regenerated items"
                );
            }
        }
    }

    /// Derive the visual for every row from the live offset
    pub fn row_visuals(&self) -> impl Iterator<Item = (usize, &spindle_core::Item, RowVisual)> + '_ {
        let item_height = self.config.item_height;
        let offset = self.offset;
        self.items.iter().enumerate().map(move |(index, item)| {
            let distance = index as f32 * item_height - offset;
            (index, item, row_visual(distance, item_height))
        })
    }

    fn index_for_offset(&self, offset: f32) -> usize {
        let raw = (offset / self.config.item_height).round();
        let clamped = raw.clamp(0.0, self.items.last_index() as f32);
        clamped as usize
    }

    fn align_offset(&mut self) {
        match self.items.index_of(self.selected) {
            Some(index) => self.offset = index as f32 * self.config.item_height,
            None => {
                let max = self.items.last_index() as f32 * self.config.item_height;
                self.offset = self.offset.clamp(0.0, max);
            }
        }
    }

    fn notify(&self, value: i32) {
        for listener in &self.listeners {
            listener(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use spindle_core::ItemList;

    const H: f32 = 40.0;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn days(count: i32) -> ItemList {
        ItemList::from_range(1..=count, |v| format!("{v:02}"))
    }

    /// Column with the mount re-sync already consumed, so tests start from
    /// a settled idle state.
    fn settled_column(selected: i32) -> (WheelColumn, Instant) {
        let t0 = Instant::now();
        let mut column = WheelColumn::new(days(31), selected, WheelConfig::default(), t0);
        column.tick(t0 + ms(50));
        (column, t0 + ms(50))
    }

    fn recording(column: &mut WheelColumn) -> Arc<Mutex<Vec<i32>>> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        column.on_value_change(move |v| sink.lock().unwrap().push(v));
        seen
    }

    #[test]
    fn test_mount_seeds_offset_and_resyncs_once() {
        let t0 = Instant::now();
        let mut column = WheelColumn::new(days(31), 15, WheelConfig::default(), t0);
        assert_eq!(column.offset(), 14.0 * H);
        assert_eq!(column.mode(), WheelMode::ExternalSync);

        // Before the re-sync deadline the mode holds
        assert!(column.tick(t0 + ms(10)));
        assert_eq!(column.mode(), WheelMode::ExternalSync);

        // Past the deadline the offset is re-asserted and the mode settles
        assert!(!column.tick(t0 + ms(40)));
        assert_eq!(column.mode(), WheelMode::Idle);
        assert_eq!(column.offset(), 14.0 * H);
    }

    #[test]
    fn test_set_selected_is_idempotent() {
        let (mut column, now) = settled_column(15);
        let seen = recording(&mut column);
        let offset_before = column.offset();

        column.set_selected(15, now);

        assert_eq!(column.offset(), offset_before);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_set_selected_jumps_immediately_without_notification() {
        let (mut column, now) = settled_column(15);
        let seen = recording(&mut column);

        column.set_selected(20, now);

        assert_eq!(column.selected_value(), 20);
        assert_eq!(column.offset(), 19.0 * H);
        assert_eq!(column.mode(), WheelMode::Idle);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_set_selected_with_absent_value_is_a_noop() {
        let (mut column, now) = settled_column(15);
        column.set_selected(99, now);
        assert_eq!(column.selected_value(), 15);
        assert_eq!(column.offset(), 14.0 * H);
    }

    #[test]
    fn test_scroll_sample_reclassifies_selection() {
        let (mut column, now) = settled_column(1);
        let seen = recording(&mut column);

        // Drag to just past row index 2 (value 3)
        let changed = column.scroll_sample(2.2 * H, now);

        assert_eq!(changed, Some(3));
        assert_eq!(column.selected_value(), 3);
        assert_eq!(*seen.lock().unwrap(), vec![3]);
    }

    #[test]
    fn test_scroll_sample_same_row_does_not_notify() {
        let (mut column, now) = settled_column(1);
        let seen = recording(&mut column);

        assert_eq!(column.scroll_sample(0.3 * H, now), None);
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn test_scroll_sample_clamps_to_item_range() {
        let (mut column, now) = settled_column(1);
        let changed = column.scroll_sample(500.0 * H, now);
        assert_eq!(changed, Some(31));
    }

    #[test]
    fn test_wheel_tick_moves_exactly_one_row_regardless_of_delta() {
        let (mut column, now) = settled_column(10);
        assert_eq!(column.wheel_tick(840.0, now), Some(11));
        assert_eq!(column.wheel_tick(-3.0, now + ms(200)), Some(10));
    }

    #[test]
    fn test_wheel_tick_debounce_window() {
        let (mut column, now) = settled_column(10);
        let seen = recording(&mut column);

        assert_eq!(column.wheel_tick(1.0, now), Some(11));
        // 100 ms later: dropped
        assert_eq!(column.wheel_tick(1.0, now + ms(100)), None);
        assert_eq!(column.selected_value(), 11);
        // 160 ms after the accepted tick: accepted
        assert_eq!(column.wheel_tick(1.0, now + ms(160)), Some(12));
        assert_eq!(*seen.lock().unwrap(), vec![11, 12]);
    }

    #[test]
    fn test_wheel_tick_saturates_at_boundaries() {
        let (mut column, now) = settled_column(31);
        let seen = recording(&mut column);

        assert_eq!(column.wheel_tick(1.0, now), None);
        assert_eq!(column.selected_value(), 31);
        assert!(seen.lock().unwrap().is_empty());

        let (mut column, now) = settled_column(1);
        assert_eq!(column.wheel_tick(-1.0, now), None);
        assert_eq!(column.selected_value(), 1);
    }

    #[test]
    fn test_boundary_tick_still_arms_the_windows() {
        let (mut column, now) = settled_column(31);
        column.wheel_tick(1.0, now);

        // Debounce still applies to the follower...
        assert_eq!(column.wheel_tick(-1.0, now + ms(100)), None);
        // ...and scroll samples are suppressed during the settle window.
        assert_eq!(column.scroll_sample(0.0, now + ms(120)), None);
        assert_eq!(column.selected_value(), 31);
    }

    #[test]
    fn test_scroll_suppressed_while_stepping_then_released() {
        let (mut column, now) = settled_column(10);
        column.wheel_tick(1.0, now);
        assert_eq!(column.mode(), WheelMode::Stepping);

        // Inside the 200 ms settle window samples are ignored
        assert_eq!(column.scroll_sample(0.0, now + ms(150)), None);
        assert_eq!(column.selected_value(), 11);

        // Past the window the same sample reclassifies normally
        let changed = column.scroll_sample(0.0, now + ms(250));
        assert_eq!(changed, Some(1));
        assert_eq!(column.mode(), WheelMode::Idle);
    }

    #[test]
    fn test_step_settles_offset_exactly_on_row() {
        let (mut column, now) = settled_column(10);
        column.wheel_tick(1.0, now);

        // Mid-animation the offset is in between rows
        column.tick(now + ms(100));
        let mid = column.offset();
        assert!(mid > 9.0 * H && mid < 10.0 * H);

        // After the settle window it sits exactly on the new row
        assert!(!column.tick(now + ms(250)));
        assert_eq!(column.offset(), 10.0 * H);
        assert_eq!(column.mode(), WheelMode::Idle);
    }

    #[test]
    fn test_external_set_cancels_inflight_step() {
        let (mut column, now) = settled_column(10);
        column.wheel_tick(1.0, now);
        assert_eq!(column.mode(), WheelMode::Stepping);

        column.set_selected(5, now + ms(50));

        assert_eq!(column.selected_value(), 5);
        assert_eq!(column.offset(), 4.0 * H);
        assert_eq!(column.mode(), WheelMode::Idle);
        // The old settle window no longer suppresses scroll samples
        assert_eq!(column.scroll_sample(0.0, now + ms(60)), Some(1));
    }

    #[test]
    fn test_scroll_end_snaps_to_nearest_row() {
        let (mut column, now) = settled_column(1);
        column.scroll_sample(2.3 * H, now);
        column.scroll_end(now);

        assert!(column.tick(now + ms(100)));
        assert!(!column.tick(now + ms(250)));
        assert_eq!(column.offset(), 2.0 * H);
        assert_eq!(column.selected_value(), 3);
    }

    #[test]
    fn test_set_items_keeps_present_selection() {
        let (mut column, _now) = settled_column(29);
        column.set_items(days(31));
        assert_eq!(column.selected_value(), 29);
        assert_eq!(column.offset(), 28.0 * H);
    }

    #[test]
    fn test_set_items_with_absent_selection_clamps_offset() {
        let (mut column, _now) = settled_column(31);
        column.set_items(days(28));
        // Selection is left for the owner to clamp; offset stays in range
        assert_eq!(column.selected_value(), 31);
        assert!(column.offset() <= 27.0 * H);
    }

    #[test]
    fn test_empty_items_never_crash() {
        let t0 = Instant::now();
        let mut column = WheelColumn::new(ItemList::default(), 1, WheelConfig::default(), t0);
        assert_eq!(column.scroll_sample(100.0, t0), None);
        assert_eq!(column.wheel_tick(1.0, t0), None);
        column.scroll_end(t0);
        assert!(!column.tick(t0 + ms(100)));
    }

    #[test]
    fn test_row_visuals_follow_offset() {
        let (column, _now) = settled_column(3);
        let visuals: Vec<_> = column.row_visuals().collect();
        // The selected row (index 2) sits at center: full visibility
        assert_eq!(visuals[2].2.opacity, 1.0);
        assert_eq!(visuals[2].2.rotation_deg, 0.0);
        // Neighbors fade and rotate in opposite directions
        assert!(visuals[1].2.opacity < 1.0);
        assert_eq!(visuals[1].2.rotation_deg, 18.0);
        assert_eq!(visuals[3].2.rotation_deg, -18.0);
    }
}
