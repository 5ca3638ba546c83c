//! A terminal progress bar for a run.
//!
//! A run is complete when the history recorder holds one sample per chart column, so the
//! natural measure of progress is the tick count against the chart resolution. A simulation
//! started with progress enabled initializes the bar itself and updates it every tick:
//!
//! ```ignore
//! /// Initialize the progress bar with the number of ticks the run will take.
//! pub fn init_tick_progress_bar(max_ticks: usize);
//! /// Updates the progress bar with the current tick. Finalizes the bar at `max_ticks`.
//! pub fn update_tick_progress(tick: usize);
//! ```
//!
//! Only one bar is active at a time. Initializing a second one replaces the first.

use std::sync::Mutex;

use progress_bar::{
    finalize_progress_bar, init_progress_bar, set_progress_bar_action, set_progress_bar_progress,
    Color, Style,
};

use crate::log::{trace, warn};

/// Tick count at which the tick bar finalizes. `None` until a tick bar is initialized.
static MAX_TICKS: Mutex<Option<usize>> = Mutex::new(None);

/// Initialize the progress bar with the number of ticks the run will take.
pub fn init_tick_progress_bar(max_ticks: usize) {
    trace!("initializing tick progress bar with {} ticks", max_ticks);
    *MAX_TICKS.lock().expect("Mutex poisoned") = Some(max_ticks);
    init_progress_bar(max_ticks);
    set_progress_bar_action("Ticks", Color::Blue, Style::Bold);
}

/// Updates the tick progress bar. Values past the maximum are clamped.
pub(crate) fn update_tick_progress(tick: usize) {
    let mut max_ticks = MAX_TICKS.lock().expect("Mutex poisoned");
    let Some(max) = *max_ticks else {
        warn!("attempted to update tick progress bar before it was initialized");
        return;
    };
    let tick = tick.min(max);
    set_progress_bar_progress(tick);
    if tick == max {
        finalize_progress_bar();
        *max_ticks = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_bar_clamps_and_finalizes() {
        init_tick_progress_bar(3);
        update_tick_progress(1);
        assert_eq!(*MAX_TICKS.lock().unwrap(), Some(3));

        update_tick_progress(5);
        assert_eq!(*MAX_TICKS.lock().unwrap(), None);

        // A finalized bar ignores further updates.
        update_tick_progress(2);
        assert_eq!(*MAX_TICKS.lock().unwrap(), None);
    }
}
