//! Interactive terminal demo for the wheel date picker.
//!
//! Controls:
//! - Left/Right: switch column
//! - Up/Down: discrete wheel steps (debounced, ±1 row)
//! - `[` / `]`: drag the focused wheel by a third of a row
//! - Enter: release the drag (snap to the nearest row)
//! - `t`: push today's date programmatically
//! - `q` / Esc: quit
//!
//! Run with `RUST_LOG=spindle_widgets=trace` to watch the engine arbitrate
//! the input channels.

use std::io::{stdout, Write};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    event::{self, Event, KeyCode, KeyEventKind},
    execute, queue,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
    terminal::{
        disable_raw_mode, enable_raw_mode, Clear, ClearType, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use spindle_widgets::{DatePickerConfig, PickerColumn, WheelDatePicker};

/// Frame rate for animations (approximately 30 FPS)
const FRAME_DURATION: Duration = Duration::from_millis(33);

const COLUMNS: [PickerColumn; 3] = [PickerColumn::Year, PickerColumn::Month, PickerColumn::Day];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    enable_raw_mode().context("failed to enable raw mode")?;
    execute!(stdout(), EnterAlternateScreen, Hide).context("failed to enter alternate screen")?;

    let result = run();

    execute!(stdout(), Show, LeaveAlternateScreen).ok();
    disable_raw_mode().ok();
    result
}

fn run() -> Result<()> {
    let last_change: Arc<Mutex<Option<NaiveDate>>> = Arc::new(Mutex::new(None));
    let sink = last_change.clone();

    let mut picker = WheelDatePicker::new(DatePickerConfig::default(), Instant::now())
        .on_change(move |date| {
            *sink.lock().unwrap() = Some(date);
        });

    let mut focus = 2usize;
    let mut dragging = false;

    loop {
        let now = Instant::now();
        picker.tick(now);
        draw(&picker, focus, &last_change)?;

        if !event::poll(FRAME_DURATION)? {
            continue;
        }
        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        let now = Instant::now();
        let column = COLUMNS[focus];
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => break,
            KeyCode::Left => focus = focus.saturating_sub(1),
            KeyCode::Right => focus = (focus + 1).min(COLUMNS.len() - 1),
            KeyCode::Up => picker.wheel_tick(column, -1.0, now),
            KeyCode::Down => picker.wheel_tick(column, 1.0, now),
            KeyCode::Char('[') => {
                dragging = true;
                let offset = picker.wheel(column).offset();
                let nudge = picker.wheel(column).config().item_height / 3.0;
                picker.scroll_sample(column, offset - nudge, now);
            }
            KeyCode::Char(']') => {
                dragging = true;
                let offset = picker.wheel(column).offset();
                let nudge = picker.wheel(column).config().item_height / 3.0;
                picker.scroll_sample(column, offset + nudge, now);
            }
            KeyCode::Enter if dragging => {
                dragging = false;
                picker.scroll_end(column, now);
            }
            KeyCode::Char('t') => {
                picker.set_date(chrono::Local::now().date_naive(), now);
            }
            _ => {}
        }
    }
    Ok(())
}

fn draw(
    picker: &WheelDatePicker,
    focus: usize,
    last_change: &Arc<Mutex<Option<NaiveDate>>>,
) -> Result<()> {
    let mut out = stdout();
    queue!(out, Clear(ClearType::All))?;

    queue!(
        out,
        MoveTo(2, 1),
        SetAttribute(Attribute::Bold),
        Print("spindle wheel date picker"),
        SetAttribute(Attribute::Reset),
    )?;

    let widths = [6u16, 4, 4];
    let mut x = 4u16;
    for (col_idx, column) in COLUMNS.iter().enumerate() {
        draw_wheel(&mut out, picker, *column, x, 3, col_idx == focus)?;
        x += widths[col_idx] + 3;
    }

    let picked = *last_change.lock().unwrap();
    queue!(
        out,
        MoveTo(2, 10),
        Print(format!("composed: {}", picker.date())),
        MoveTo(2, 11),
        Print(match picked {
            Some(date) => format!("last change: {date}"),
            None => "last change: (none yet)".to_string(),
        }),
        MoveTo(2, 13),
        SetForegroundColor(Color::DarkGrey),
        Print("←/→ column   ↑/↓ step   [ ] drag   ⏎ release   t today   q quit"),
        ResetColor,
    )?;

    out.flush()?;
    Ok(())
}

fn draw_wheel(
    out: &mut impl Write,
    picker: &WheelDatePicker,
    column: PickerColumn,
    x: u16,
    y_top: u16,
    focused: bool,
) -> Result<()> {
    let wheel = picker.wheel(column);
    let item_height = wheel.config().item_height;
    let half = (wheel.config().visible_items / 2) as i32;

    for (index, item, visual) in wheel.row_visuals() {
        let distance = index as f32 * item_height - wheel.offset();
        let slot = (distance / item_height).round() as i32;
        if slot.abs() > half {
            continue;
        }
        let y = (y_top as i32 + slot + half) as u16;
        let selected = item.value == wheel.selected_value() && slot == 0;

        // Map the derived opacity onto a grayscale ramp; the terminal has
        // no sub-cell scale/rotation, so brightness carries the depth cue.
        let level = (40.0 + visual.opacity * 215.0) as u8;
        queue!(
            out,
            MoveTo(x, y),
            SetForegroundColor(if selected && focused {
                Color::Cyan
            } else {
                Color::Rgb {
                    r: level,
                    g: level,
                    b: level,
                }
            }),
        )?;
        if selected {
            queue!(out, SetAttribute(Attribute::Bold))?;
        }
        queue!(out, Print(&item.label), SetAttribute(Attribute::Reset), ResetColor)?;
    }
    Ok(())
}
