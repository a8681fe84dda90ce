use std::time::Instant;

use roller_common::FxIndexMap;
use rustc_hash::FxHashMap;

/// Label → elapsed milliseconds. `#`-prefixed labels are top-level phases,
/// `##` sub-phases.
pub type SerializedTimings = FxIndexMap<String, f64>;

pub const TIMER_BUILD: &str = "# BUILD";
pub const TIMER_GENERATE: &str = "# GENERATE";

/// Phase timers, active only under `perf`. Repeated phases accumulate.
#[derive(Debug, Default)]
pub struct Timers {
  enabled: bool,
  running: FxHashMap<String, Instant>,
  timings: SerializedTimings,
}

impl Timers {
  pub fn new(enabled: bool) -> Self {
    Self { enabled, ..Self::default() }
  }

  pub fn start(&mut self, label: &str) {
    if self.enabled {
      self.running.insert(label.to_string(), Instant::now());
    }
  }

  pub fn stop(&mut self, label: &str) {
    if let Some(started) = self.running.remove(label) {
      let elapsed = started.elapsed().as_secs_f64() * 1000.0;
      *self.timings.entry(label.to_string()).or_insert(0.0) += elapsed;
    }
  }

  /// Snapshot for `Build::timings`. `# BUILD` and `# GENERATE` are present
  /// even when a phase has not run yet.
  pub fn serialized(&self) -> Option<SerializedTimings> {
    if !self.enabled {
      return None;
    }
    let mut timings = self.timings.clone();
    for label in [TIMER_BUILD, TIMER_GENERATE] {
      timings.entry(label.to_string()).or_insert(0.0);
    }
    Some(timings)
  }
}
