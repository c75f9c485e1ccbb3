//! One simulation run, end to end.
//!
//! ```text
//! Configure ─► BuildInput ─► Invoke ─► CollectOutputs ─► DeriveEnergy ─► Finalize
//!                  │            │             │                │
//!               encode       solver     sensor columns     integrator
//! ```
//!
//! Every phase runs at most once per call to [`SimulationDriver::run`]. The
//! first error ends the run and is returned unchanged; nothing is retried
//! and no partial output is kept.

use std::fmt::{self, Display};

use boomsim_codec::{ChannelSet, CodecError, InputVector, OutputVector, PackedVector};
use boomsim_energy::EnergyIntegrator;
use boomsim_layout::{ChannelLayout, RunLayouts};
use boomsim_types::{ArmMode, Channel};

use crate::strategy::{ModelStrategy, strategy_for};
use crate::waveform::{sample, sample_times};
use crate::{
    ArtifactHeader, ControlPlan, ControlTable, DriverError, RunArtifact, RunParams, SensorStore,
    SolveRequest, Solver,
};

/// Phases of a run, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RunPhase {
    Configure,
    BuildInput,
    Invoke,
    CollectOutputs,
    DeriveEnergy,
    Finalize,
}

impl Display for RunPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunPhase::Configure => "configure",
            RunPhase::BuildInput => "build-input",
            RunPhase::Invoke => "invoke",
            RunPhase::CollectOutputs => "collect-outputs",
            RunPhase::DeriveEnergy => "derive-energy",
            RunPhase::Finalize => "finalize",
        };
        f.write_str(name)
    }
}

/// Control channels of each mode, in actuator order.
fn control_channels(mode: ArmMode) -> &'static [Channel] {
    match mode {
        ArmMode::SingleArm => &[Channel::Control],
        ArmMode::DualArm => &[Channel::Control1, Channel::Control2],
    }
}

/// A configured run.
///
/// Holds only read-only state, so one driver can be run several times and
/// shared across threads. Each call to [`SimulationDriver::run`] needs its
/// own solver.
#[derive(Debug)]
pub struct SimulationDriver {
    params: RunParams,
    controls: ControlPlan,
    strategy: Box<dyn ModelStrategy>,
    layouts: RunLayouts,
    times: Vec<f64>,
}

impl SimulationDriver {
    /// Configure phase: validates the parameters and derives both layouts.
    pub fn new(params: RunParams, controls: ControlPlan) -> Result<Self, DriverError> {
        if !(params.end_time.is_finite() && params.end_time > 0.0) {
            return Err(DriverError::InvalidRun(format!(
                "end time must be positive and finite, got {}",
                params.end_time
            )));
        }
        if !(params.initial_angles.lift.is_finite() && params.initial_angles.tilt.is_finite()) {
            return Err(DriverError::InvalidRun(
                "initial angles must be finite".to_string(),
            ));
        }

        let strategy = strategy_for(params.variant);
        if !strategy.supports(params.mode) {
            return Err(DriverError::InvalidRun(format!(
                "variant {} is not modelled for {} runs",
                params.variant, params.mode
            )));
        }

        let expected = params.mode.actuator_count();
        if controls.actuators().len() > expected {
            return Err(DriverError::InvalidRun(format!(
                "{} runs drive {expected} actuator(s), got {} control waveforms",
                params.mode,
                controls.actuators().len()
            )));
        }

        let layouts = ChannelLayout::for_run(params.steps, params.mode, strategy.body_model())?;
        let times = sample_times(params.steps, params.end_time);

        tracing::debug!(
            phase = %RunPhase::Configure,
            mode = %params.mode,
            variant = %params.variant,
            steps = %params.steps,
            input_len = layouts.input.total_len(),
            output_len = layouts.output.total_len(),
            "run configured"
        );

        Ok(Self {
            params,
            controls,
            strategy,
            layouts,
            times,
        })
    }

    pub fn params(&self) -> &RunParams {
        &self.params
    }

    pub fn layouts(&self) -> &RunLayouts {
        &self.layouts
    }

    /// Sampling instants `t_i = (i + 1) / N · T`.
    pub fn sample_times(&self) -> &[f64] {
        &self.times
    }

    pub fn strategy(&self) -> &dyn ModelStrategy {
        self.strategy.as_ref()
    }

    /// Runs every phase against `solver`.
    pub fn run<S: Solver + ?Sized>(&self, solver: &mut S) -> Result<RunArtifact, DriverError> {
        let span = tracing::info_span!(
            "run",
            mode = %self.params.mode,
            variant = %self.params.variant,
            steps = %self.params.steps,
        );
        let _enter = span.enter();

        let input = self.build_input()?;
        let request = self.solve_request(&input)?;

        tracing::debug!(phase = %RunPhase::Invoke, model = ?request.model, "invoking solver");
        let store = solver.solve(&request).inspect_err(|err| {
            tracing::error!(phase = %RunPhase::Invoke, error = %err, "solver failed");
        })?;

        let mut output = self.collect_outputs(&store)?;
        self.derive_energy(&mut output)?;

        tracing::debug!(phase = %RunPhase::Finalize, "run complete");
        if self.params.solution_viewer {
            solver.show_solution()?;
        }

        Ok(RunArtifact::new(self.header(), input, output))
    }

    /// BuildInput phase: samples the controls and packs the input buffer.
    pub fn build_input(&self) -> Result<InputVector, DriverError> {
        let mode = self.params.mode;
        let mut channels = ChannelSet::new();

        for (channel, waveform) in control_channels(mode).iter().zip(self.controls.actuators()) {
            channels.insert_series(*channel, sample(waveform.as_ref(), &self.times));
        }
        channels.insert_series(Channel::PumpPressure, sample(self.controls.pump(), &self.times));
        channels.insert_scalar(Channel::Theta1, self.params.initial_angles.lift);
        if mode == ArmMode::DualArm {
            channels.insert_scalar(Channel::Theta2, self.params.initial_angles.tilt);
        }

        let input = PackedVector::encode(self.layouts.input.clone(), &channels)?;

        // Postcondition: buffer length matches the layout
        debug_assert_eq!(input.len(), self.layouts.input.total_len());

        tracing::debug!(phase = %RunPhase::BuildInput, len = input.len(), "input encoded");
        Ok(input)
    }

    /// Decodes the input buffer into what the solver consumes.
    fn solve_request(&self, input: &InputVector) -> Result<SolveRequest, DriverError> {
        let mode = self.params.mode;
        let decoded = input.decode();

        let series = |channel: Channel| {
            decoded
                .series(channel)
                .map(|values| ControlTable::from_samples(&self.times, values))
                .ok_or(CodecError::MissingChannel { channel })
        };

        let controls = control_channels(mode)
            .iter()
            .map(|&channel| series(channel))
            .collect::<Result<Vec<_>, _>>()?;

        let theta2 = match mode {
            ArmMode::SingleArm => None,
            ArmMode::DualArm => Some(input.scalar(Channel::Theta2)?),
        };

        Ok(SolveRequest {
            model: self.strategy.solver_model(mode),
            body: self.strategy.body_model(),
            steps: self.params.steps,
            end_time: self.params.end_time,
            load_mass: self.params.load_mass,
            flexible_modes: self.params.flexible_modes,
            theta1: input.scalar(Channel::Theta1)?,
            theta2,
            controls,
            pump_pressure: series(Channel::PumpPressure)?,
            initial_pressures: self.params.initial_pressures,
        })
    }

    /// CollectOutputs phase: reads every bound sensor column into its slot.
    pub fn collect_outputs(&self, store: &SensorStore) -> Result<OutputVector, DriverError> {
        let steps = self.params.steps.as_usize();
        let mut output = OutputVector::zeroed(self.layouts.output.clone());

        for binding in self.strategy.sensor_bindings(self.params.mode) {
            let values: Vec<f64> = store
                .column(binding.sensor, binding.column, steps)?
                .into_iter()
                .map(|value| binding.conversion.apply(value))
                .collect();
            output.splice(binding.channel, &values)?;
        }

        tracing::debug!(phase = %RunPhase::CollectOutputs, len = output.len(), "outputs collected");
        Ok(output)
    }

    /// DeriveEnergy phase: splices force and work next to the recordings.
    pub fn derive_energy(&self, output: &mut OutputVector) -> Result<(), DriverError> {
        if !self.strategy.derives_energy(self.params.mode) {
            return Ok(());
        }

        let integrator = EnergyIntegrator::new(self.params.areas);
        let trace = integrator.integrate(
            output.channel(Channel::Distance)?,
            output.channel(Channel::Pressure1)?,
            output.channel(Channel::Pressure2)?,
        )?;

        tracing::debug!(
            phase = %RunPhase::DeriveEnergy,
            total_work = trace.total_work(),
            "energy derived"
        );

        let (force, energy) = trace.into_parts();
        output.splice(Channel::Force, &force)?;
        output.splice(Channel::Energy, &energy)?;
        Ok(())
    }

    fn header(&self) -> ArtifactHeader {
        ArtifactHeader {
            mode: self.params.mode,
            variant: self.params.variant,
            steps: self.params.steps,
            end_time: self.params.end_time,
            load_mass: self.params.load_mass,
        }
    }
}
