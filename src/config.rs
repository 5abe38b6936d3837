//! TOML configuration for a simulation run.
//!
//! ```toml
//! start = 0.0
//! end = 10.0
//! iterations = 500
//! time_step = "uniform"   # or "literal"
//! coincidence = "error"   # or "skip"
//! parallel = false
//!
//! [scenario]
//! bodies = 3
//! seed = 42
//! ```
//!
//! Every field is optional and falls back to [`SimulationConfig::default`].

use crate::error::{Error, Result};
use crate::units;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// How the fixed step size is derived from the time domain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeStepRule {
    /// `(end - start) / iterations`
    #[default]
    Uniform,
    /// `end - start / iterations`, kept for reproducing older runs.
    Literal,
}

impl TimeStepRule {
    pub fn time_step(self, start: f64, end: f64, iterations: usize) -> f64 {
        let n = iterations as f64;
        match self {
            TimeStepRule::Uniform => (end - start) / n,
            TimeStepRule::Literal => end - start / n,
        }
    }
}

/// What acceleration computation does with two bodies at the same position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoincidencePolicy {
    /// Abort the step with [`Error::DegenerateConfiguration`].
    #[default]
    Error,
    /// Drop the pair's contribution for this step.
    Skip,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub start: f64,
    pub end: f64,
    pub iterations: usize,
    pub time_step: TimeStepRule,
    /// Gravitational scaling constant in engine units.
    pub gravity: f64,
    pub coincidence: CoincidencePolicy,
    pub parallel: bool,
    pub scenario: ScenarioConfig,
}

/// Random scenario settings used by the binary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub bodies: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start: 0.0,
            end: 10.0,
            iterations: 500,
            time_step: TimeStepRule::Uniform,
            gravity: units::GRAVITY,
            coincidence: CoincidencePolicy::Error,
            parallel: false,
            scenario: ScenarioConfig::default(),
        }
    }
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            bodies: 3,
            seed: None,
        }
    }
}

impl SimulationConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::InvalidArgument("iterations must be positive".into()));
        }
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(Error::InvalidArgument(format!(
                "time bounds must be finite, got [{}, {}]",
                self.start, self.end
            )));
        }
        if !(self.gravity.is_finite() && self.gravity > 0.0) {
            return Err(Error::InvalidArgument(format!(
                "gravity must be finite and positive, got {}",
                self.gravity
            )));
        }
        Ok(())
    }

    /// Fixed step size this configuration produces.
    pub fn time_step(&self) -> f64 {
        self.time_step.time_step(self.start, self.end, self.iterations)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn empty_document_gives_defaults() {
        let config = SimulationConfig::from_toml_str("").unwrap();
        assert_eq!(config, SimulationConfig::default());
        assert_relative_eq!(config.time_step(), 0.02);
    }

    #[test]
    fn parses_every_field() {
        let config = SimulationConfig::from_toml_str(
            r#"
            start = 1.0
            end = 3.0
            iterations = 4
            time_step = "literal"
            gravity = 1.0
            coincidence = "skip"
            parallel = true

            [scenario]
            bodies = 7
            seed = 42
            "#,
        )
        .unwrap();

        assert_eq!(config.iterations, 4);
        assert_eq!(config.time_step, TimeStepRule::Literal);
        assert_eq!(config.coincidence, CoincidencePolicy::Skip);
        assert!(config.parallel);
        assert_eq!(config.scenario.bodies, 7);
        assert_eq!(config.scenario.seed, Some(42));
        // 3.0 - 1.0 / 4
        assert_relative_eq!(config.time_step(), 2.75);
    }

    #[test]
    fn uniform_and_literal_rules_differ_unless_start_is_zero() {
        assert_relative_eq!(TimeStepRule::Uniform.time_step(2.0, 10.0, 4), 2.0);
        assert_relative_eq!(TimeStepRule::Literal.time_step(2.0, 10.0, 4), 9.5);
        assert_relative_eq!(TimeStepRule::Literal.time_step(0.0, 10.0, 4), 10.0);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(matches!(
            SimulationConfig::from_toml_str("iterations = 0"),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            SimulationConfig::from_toml_str("gravity = -1.0"),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            SimulationConfig::from_toml_str("time_step = \"sideways\""),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn toml_round_trip() {
        let config = SimulationConfig {
            iterations: 12,
            parallel: true,
            ..SimulationConfig::default()
        };
        let text = config.to_toml_string().unwrap();
        assert_eq!(SimulationConfig::from_toml_str(&text).unwrap(), config);
    }
}
