//! Configuration management for boomsim
//!
//! Provides hierarchical configuration loading from multiple sources:
//! 1. CLI arguments (highest precedence)
//! 2. Environment variables (BOOMSIM_* prefix, `__` between section and key)
//! 3. boomsim.local.toml (local overrides, not checked in)
//! 4. boomsim.toml (project config)
//! 5. ~/.config/boomsim/config.toml (user defaults)
//! 6. Built-in defaults (lowest precedence)
//!
//! The built-in defaults reproduce the reference lift boom rig: a 16 s
//! run sampled every 5 ms with a 200 kg payload.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use boomsim_driver::{ControlPlan, InitialAngles, PiecewiseConstant, RunParams, Waveform};
use boomsim_energy::CylinderAreas;
use boomsim_types::{ArmMode, BoomDesign, ModelVariant, StepCount};
use serde::{Deserialize, Serialize};

mod error;
mod loader;
mod paths;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use paths::Paths;

/// Main boomsim configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct BoomsimConfig {
    pub run: RunConfig,
    pub hydraulics: HydraulicsConfig,
    pub control: ControlConfig,
    pub output: OutputConfig,
}

/// Model family selected in `[run]`; the boom design of flexible runs
/// comes from `flexible_design`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum VariantKind {
    RigidDefault,
    RigidOptimised,
    Flexible,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    pub mode: ArmMode,
    pub variant: VariantKind,
    pub flexible_design: BoomDesign,
    /// Simulated duration, s.
    pub end_time: f64,
    /// Sampling interval, s.
    pub time_step: f64,
    /// Overrides `trunc(end_time / time_step)` when set.
    pub steps: Option<usize>,
    pub lift_angle_deg: f64,
    pub tilt_angle_deg: f64,
    /// Payload, kg.
    pub load_mass: f64,
    /// Flexible eigenmodes passed to the solver.
    pub modes: u32,
    pub solution_viewer: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            mode: ArmMode::SingleArm,
            variant: VariantKind::RigidDefault,
            flexible_design: BoomDesign::Default,
            end_time: 16.0,
            time_step: 5e-3,
            steps: None,
            lift_angle_deg: 14.6,
            tilt_angle_deg: -58.8,
            load_mass: 200.0,
            modes: 4,
            solution_viewer: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HydraulicsConfig {
    /// Pa.
    pub pump_pressure: f64,
    /// Initial chamber pressures `p1..p4`, Pa.
    pub initial_pressures: [f64; 4],
    /// Bore diameter of the lift cylinder, m.
    pub piston_diameter: f64,
    /// Rod diameter of the lift cylinder, m.
    pub rod_diameter: f64,
}

impl Default for HydraulicsConfig {
    fn default() -> Self {
        Self {
            pump_pressure: boomsim_driver::STANDARD_PUMP_PRESSURE,
            initial_pressures: [8e6; 4],
            piston_diameter: 0.100,
            rod_diameter: 0.056,
        }
    }
}

/// Custom spool schedules, one per actuator in actuator order. Empty
/// means the standard duty cycles of the mode.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlConfig {
    pub actuators: Vec<PiecewiseConstant>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("solution"),
        }
    }
}

impl BoomsimConfig {
    /// Reads and validates a single TOML file, bypassing the layered sources.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::read_toml_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a single TOML file without validating it, so callers can
    /// apply overrides first.
    pub fn read_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::ReadError {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&content).map_err(|source| ConfigError::ParseError {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    pub fn variant(&self) -> ModelVariant {
        match self.run.variant {
            VariantKind::RigidDefault => ModelVariant::RigidDefault,
            VariantKind::RigidOptimised => ModelVariant::RigidOptimised,
            VariantKind::Flexible => ModelVariant::Flexible {
                design: self.run.flexible_design,
            },
        }
    }

    /// Selects a variant, keeping `flexible_design` in sync.
    pub fn set_variant(&mut self, variant: ModelVariant) {
        self.run.variant = match variant {
            ModelVariant::RigidDefault => VariantKind::RigidDefault,
            ModelVariant::RigidOptimised => VariantKind::RigidOptimised,
            ModelVariant::Flexible { design } => {
                self.run.flexible_design = design;
                VariantKind::Flexible
            }
        };
    }

    /// Step count `N` of the configured run.
    pub fn steps(&self) -> StepCount {
        self.run.steps.map_or_else(
            || RunParams::steps_for(self.run.end_time, self.run.time_step),
            StepCount::new,
        )
    }

    pub fn areas(&self) -> CylinderAreas {
        CylinderAreas::from_diameters(self.hydraulics.piston_diameter, self.hydraulics.rod_diameter)
    }

    /// Checks everything a run would otherwise reject later.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::ValidationError(msg));
        let run = &self.run;
        let hydraulics = &self.hydraulics;

        if !(run.end_time.is_finite() && run.end_time > 0.0) {
            return invalid(format!("run.end_time must be positive, got {}", run.end_time));
        }
        if run.steps.is_none() && !(run.time_step.is_finite() && run.time_step > 0.0) {
            return invalid(format!("run.time_step must be positive, got {}", run.time_step));
        }
        if self.steps().is_zero() {
            return invalid("run needs at least one step".to_string());
        }
        if !(run.lift_angle_deg.is_finite() && run.tilt_angle_deg.is_finite()) {
            return invalid("initial angles must be finite".to_string());
        }
        if !(hydraulics.piston_diameter > 0.0 && hydraulics.rod_diameter > 0.0) {
            return invalid("cylinder diameters must be positive".to_string());
        }
        if hydraulics.rod_diameter >= hydraulics.piston_diameter {
            return invalid(format!(
                "rod diameter {} must be smaller than piston diameter {}",
                hydraulics.rod_diameter, hydraulics.piston_diameter
            ));
        }
        if run.mode == ArmMode::DualArm && self.variant().design() == BoomDesign::Optimised {
            return invalid("the optimised lift boom is only modelled for single-arm runs".to_string());
        }

        let schedules = self.control.actuators.len();
        if schedules != 0 && schedules != run.mode.actuator_count() {
            return invalid(format!(
                "{} runs need {} control schedule(s), got {schedules}",
                run.mode,
                run.mode.actuator_count()
            ));
        }

        Ok(())
    }

    /// Immutable parameters of one run.
    pub fn to_run_params(&self) -> Result<RunParams, ConfigError> {
        self.validate()?;
        Ok(RunParams {
            steps: self.steps(),
            end_time: self.run.end_time,
            mode: self.run.mode,
            variant: self.variant(),
            initial_angles: InitialAngles::from_degrees(
                self.run.lift_angle_deg,
                self.run.tilt_angle_deg,
            ),
            load_mass: self.run.load_mass,
            flexible_modes: self.run.modes,
            initial_pressures: self.hydraulics.initial_pressures,
            areas: self.areas(),
            solution_viewer: self.run.solution_viewer,
        })
    }

    /// Control waveforms of the run.
    pub fn control_plan(&self) -> ControlPlan {
        if self.control.actuators.is_empty() {
            return ControlPlan::standard(self.run.mode, self.hydraulics.pump_pressure);
        }
        let actuators = self
            .control
            .actuators
            .iter()
            .map(|schedule| Arc::new(schedule.clone()) as Arc<dyn Waveform>)
            .collect();
        ControlPlan::new(
            actuators,
            Arc::new(boomsim_driver::Constant(self.hydraulics.pump_pressure)),
        )
    }

    /// Resolve relative paths to absolute
    pub fn resolve_paths(&mut self, base_dir: impl AsRef<Path>) {
        if self.output.directory.is_relative() {
            self.output.directory = base_dir.as_ref().join(&self.output.directory);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boomsim_driver::Segment;
    use test_case::test_case;

    #[test]
    fn test_default_config() {
        let config = BoomsimConfig::default();
        assert_eq!(config.run.mode, ArmMode::SingleArm);
        assert_eq!(config.variant(), ModelVariant::RigidDefault);
        assert_eq!(config.steps(), StepCount::new(3200));
        assert_eq!(config.hydraulics.pump_pressure, 1e7);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_run_params_conversion() {
        let params = BoomsimConfig::default().to_run_params().unwrap();
        assert!((params.initial_angles.lift - 14.6_f64.to_radians()).abs() < 1e-15);
        assert!((params.initial_angles.tilt - (-58.8_f64).to_radians()).abs() < 1e-15);
        assert_eq!(params.areas, CylinderAreas::from_diameters(0.1, 0.056));
        assert_eq!(params.flexible_modes, 4);
        assert_eq!(params.initial_pressures, [8e6; 4]);
    }

    #[test]
    fn test_explicit_steps_override() {
        let mut config = BoomsimConfig::default();
        config.run.steps = Some(4);
        assert_eq!(config.to_run_params().unwrap().steps, StepCount::new(4));
    }

    #[test]
    fn test_variant_round_trip() {
        let mut config = BoomsimConfig::default();
        let flexible = ModelVariant::Flexible {
            design: BoomDesign::Optimised,
        };
        config.set_variant(flexible);
        assert_eq!(config.run.variant, VariantKind::Flexible);
        assert_eq!(config.variant(), flexible);
    }

    fn zero_end_time(c: &mut BoomsimConfig) {
        c.run.end_time = 0.0;
    }

    fn step_longer_than_run(c: &mut BoomsimConfig) {
        c.run.time_step = 20.0;
    }

    fn zero_explicit_steps(c: &mut BoomsimConfig) {
        c.run.steps = Some(0);
    }

    fn nan_angle(c: &mut BoomsimConfig) {
        c.run.lift_angle_deg = f64::NAN;
    }

    fn rod_wider_than_piston(c: &mut BoomsimConfig) {
        c.hydraulics.rod_diameter = 0.2;
    }

    fn optimised_dual_arm(c: &mut BoomsimConfig) {
        c.run.mode = ArmMode::DualArm;
        c.run.variant = VariantKind::RigidOptimised;
    }

    fn schedule_count_mismatch(c: &mut BoomsimConfig) {
        c.control.actuators = vec![PiecewiseConstant::new(vec![]); 2];
    }

    #[test_case(zero_end_time)]
    #[test_case(step_longer_than_run)]
    #[test_case(zero_explicit_steps)]
    #[test_case(nan_angle)]
    #[test_case(rod_wider_than_piston)]
    #[test_case(optimised_dual_arm)]
    #[test_case(schedule_count_mismatch)]
    fn test_validation_rejects(mutate: fn(&mut BoomsimConfig)) {
        let mut config = BoomsimConfig::default();
        mutate(&mut config);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_custom_schedule_drives_control_plan() {
        let mut config = BoomsimConfig::default();
        config.control.actuators = vec![PiecewiseConstant::new(vec![Segment::new(0.0, 1.0, 7.0)])];
        config.hydraulics.pump_pressure = 2e7;

        let plan = config.control_plan();
        assert_eq!(plan.actuators()[0].value_at(0.5), 7.0);
        assert_eq!(plan.pump().value_at(0.5), 2e7);
    }

    #[test]
    fn test_path_resolution() {
        let mut config = BoomsimConfig::default();
        config.resolve_paths("/home/user/rig");
        assert_eq!(config.output.directory, PathBuf::from("/home/user/rig/solution"));
    }

    #[test]
    fn test_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.toml");
        fs::write(
            &path,
            r#"
[run]
mode = "dual-arm"
variant = "flexible"
end_time = 20.0

[[control.actuators]]
segments = [{ start = 0.0, end = 5.0, value = 10.0 }]

[[control.actuators]]
segments = []
rest = -1.0
"#,
        )
        .unwrap();

        let config = BoomsimConfig::from_toml_file(&path).unwrap();
        assert_eq!(config.run.mode, ArmMode::DualArm);
        assert_eq!(
            config.variant(),
            ModelVariant::Flexible {
                design: BoomDesign::Default
            }
        );
        assert_eq!(config.steps(), StepCount::new(4000));
        assert_eq!(config.control_plan().actuators()[1].value_at(3.0), -1.0);
        assert!(config.output.directory.is_absolute());
    }

    #[test]
    fn test_from_toml_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            BoomsimConfig::from_toml_file(&missing),
            Err(ConfigError::ReadError { .. })
        ));

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "[run\nmode = ").unwrap();
        assert!(matches!(
            BoomsimConfig::from_toml_file(&broken),
            Err(ConfigError::ParseError { .. })
        ));
    }
}
