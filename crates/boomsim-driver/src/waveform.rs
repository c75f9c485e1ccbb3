//! Control signals and the run's sampling grid.
//!
//! A [`Waveform`] is any total function of simulated time. The driver
//! samples every waveform on the same grid, `t_i = (i + 1) / N · T`, so the
//! first sample sits one step after zero and the last one at `T`.

use std::fmt;
use std::sync::Arc;

use boomsim_types::{ArmMode, StepCount};
use serde::{Deserialize, Serialize};

/// Pump supply pressure of the standard duty cycles, Pa.
pub const STANDARD_PUMP_PRESSURE: f64 = 100e5;

/// Control signal amplitude of the standard duty cycles.
const FULL_SPOOL: f64 = 10.0;

/// A scalar signal defined for every `t` in `[0, T]`.
pub trait Waveform: Send + Sync {
    fn value_at(&self, t: f64) -> f64;
}

impl<F> Waveform for F
where
    F: Fn(f64) -> f64 + Send + Sync,
{
    fn value_at(&self, t: f64) -> f64 {
        self(t)
    }
}

/// The same value at every instant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Constant(pub f64);

impl Waveform for Constant {
    fn value_at(&self, _t: f64) -> f64 {
        self.0
    }
}

/// One `[start, end)` interval of a [`PiecewiseConstant`] signal.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: f64,
    pub end: f64,
    pub value: f64,
}

impl Segment {
    pub fn new(start: f64, end: f64, value: f64) -> Self {
        Self { start, end, value }
    }

    fn contains(&self, t: f64) -> bool {
        self.start <= t && t < self.end
    }
}

/// Step signal built from half-open segments.
///
/// Outside every segment the signal holds `rest` (zero unless set). When
/// segments overlap, the first one listed wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PiecewiseConstant {
    pub segments: Vec<Segment>,
    #[serde(default)]
    pub rest: f64,
}

impl PiecewiseConstant {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self {
            segments,
            rest: 0.0,
        }
    }

    pub fn with_rest(mut self, rest: f64) -> Self {
        self.rest = rest;
        self
    }
}

impl Waveform for PiecewiseConstant {
    fn value_at(&self, t: f64) -> f64 {
        self.segments
            .iter()
            .find(|segment| segment.contains(t))
            .map_or(self.rest, |segment| segment.value)
    }
}

/// Single-arm duty cycle: raise for four seconds, then lower.
pub fn lift_lower_cycle() -> PiecewiseConstant {
    PiecewiseConstant::new(vec![
        Segment::new(2.0, 6.0, FULL_SPOOL),
        Segment::new(9.0, 12.5, -FULL_SPOOL),
    ])
}

/// Dual-arm duty cycle of the lift cylinder.
pub fn lift_boom_cycle() -> PiecewiseConstant {
    PiecewiseConstant::new(vec![
        Segment::new(2.0, 6.0, FULL_SPOOL),
        Segment::new(8.0, 10.7, -FULL_SPOOL),
        Segment::new(13.0, 16.0, FULL_SPOOL),
        Segment::new(17.0, 18.0, -FULL_SPOOL),
    ])
}

/// Dual-arm duty cycle of the tilt cylinder.
pub fn tilt_boom_cycle() -> PiecewiseConstant {
    PiecewiseConstant::new(vec![
        Segment::new(1.0, 3.0, FULL_SPOOL),
        Segment::new(4.0, 6.6, -FULL_SPOOL),
        Segment::new(8.0, 10.0, FULL_SPOOL),
        Segment::new(12.0, 15.0, -FULL_SPOOL),
        Segment::new(16.0, 18.0, FULL_SPOOL),
    ])
}

/// Control signals of a run: one waveform per actuator plus the pump.
#[derive(Clone)]
pub struct ControlPlan {
    actuators: Vec<Arc<dyn Waveform>>,
    pump: Arc<dyn Waveform>,
}

impl ControlPlan {
    pub fn new(actuators: Vec<Arc<dyn Waveform>>, pump: Arc<dyn Waveform>) -> Self {
        Self { actuators, pump }
    }

    /// The standard duty cycle for `mode` with a constant pump pressure.
    pub fn standard(mode: ArmMode, pump_pressure: f64) -> Self {
        let actuators: Vec<Arc<dyn Waveform>> = match mode {
            ArmMode::SingleArm => vec![Arc::new(lift_lower_cycle())],
            ArmMode::DualArm => vec![Arc::new(lift_boom_cycle()), Arc::new(tilt_boom_cycle())],
        };
        Self::new(actuators, Arc::new(Constant(pump_pressure)))
    }

    /// Actuator waveforms in actuator order (lift first).
    pub fn actuators(&self) -> &[Arc<dyn Waveform>] {
        &self.actuators
    }

    pub fn pump(&self) -> &dyn Waveform {
        self.pump.as_ref()
    }
}

impl fmt::Debug for ControlPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlPlan")
            .field("actuators", &self.actuators.len())
            .finish_non_exhaustive()
    }
}

/// Sampling instants of a run with `steps` steps ending at `end_time`.
pub fn sample_times(steps: StepCount, end_time: f64) -> Vec<f64> {
    let n = steps.as_usize();
    (1..=n).map(|i| i as f64 / n as f64 * end_time).collect()
}

/// Evaluates `waveform` at each instant.
pub fn sample(waveform: &dyn Waveform, times: &[f64]) -> Vec<f64> {
    times.iter().map(|&t| waveform.value_at(t)).collect()
}
