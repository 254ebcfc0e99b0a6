//! Elapsed-time tracking for the on-screen timer.
//!
//! The session only ever asks its timer to restart. How ticks are delivered is
//! up to the collaborator: the browser build drives a 1 Hz interval, tests use
//! a recording stub.

/// Timer collaborator injected into a session.
pub trait Timer {
    /// Reset the reference time to now and start reporting from zero.
    /// Any previously scheduled reporting is cancelled.
    fn restart(&mut self);

    /// Whole seconds since the last restart, if the timer can tell.
    fn elapsed_secs(&self) -> Option<u64> {
        None
    }
}

/// Reference-time bookkeeping, independent of any clock source.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Stopwatch {
    started_at_ms: Option<f64>,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn restart(&mut self, now_ms: f64) {
        self.started_at_ms = Some(now_ms);
    }

    pub fn is_running(&self) -> bool {
        self.started_at_ms.is_some()
    }

    /// Whole seconds elapsed at `now_ms`, rounded down. Zero if never started
    /// or if the clock went backwards.
    pub fn elapsed_secs(&self, now_ms: f64) -> u64 {
        match self.started_at_ms {
            Some(start) if now_ms > start => ((now_ms - start) / 1000.0).floor() as u64,
            _ => 0,
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use interval::IntervalTimer;

#[cfg(target_arch = "wasm32")]
mod interval {
    use std::cell::Cell;
    use std::rc::Rc;

    use gloo_timers::callback::Interval;
    use wasm_bindgen::JsValue;

    use super::{Stopwatch, Timer};

    /// Browser timer: reports elapsed seconds to a JS callback on a fixed interval.
    pub struct IntervalTimer {
        stopwatch: Rc<Cell<Stopwatch>>,
        on_tick: js_sys::Function,
        period_ms: u32,
        // Dropping the handle cancels the interval.
        handle: Option<Interval>,
    }

    impl IntervalTimer {
        pub fn new(on_tick: js_sys::Function, period_ms: u32) -> Self {
            Self {
                stopwatch: Rc::new(Cell::new(Stopwatch::new())),
                on_tick,
                period_ms: period_ms.max(1),
                handle: None,
            }
        }
    }

    impl Timer for IntervalTimer {
        fn restart(&mut self) {
            self.handle = None;

            let mut sw = Stopwatch::new();
            sw.restart(js_sys::Date::now());
            self.stopwatch.set(sw);

            let stopwatch = Rc::clone(&self.stopwatch);
            let on_tick = self.on_tick.clone();
            self.handle = Some(Interval::new(self.period_ms, move || {
                let secs = stopwatch.get().elapsed_secs(js_sys::Date::now());
                if let Err(err) = on_tick.call1(&JsValue::NULL, &JsValue::from_f64(secs as f64)) {
                    log::warn!("timer callback failed: {:?}", err);
                }
            }));
        }

        fn elapsed_secs(&self) -> Option<u64> {
            let sw = self.stopwatch.get();
            sw.is_running().then(|| sw.elapsed_secs(js_sys::Date::now()))
        }
    }
}
