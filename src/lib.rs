pub mod body;
pub mod c_api;
pub mod config;
pub mod error;
pub mod export;
pub mod history;
pub mod scenario;
pub mod simulation;
pub mod units;

pub use body::Body;
pub use config::{CoincidencePolicy, ScenarioConfig, SimulationConfig, TimeStepRule};
pub use error::{Error, Result};
pub use history::{BodyState, History, Snapshot};
pub use simulation::Simulator;
pub use ultraviolet::DVec3;
