pub mod error;
pub mod simulation;
pub mod configuration;
#[cfg(feature = "viewer")]
pub mod visualization;

pub use error::SimError;

pub use simulation::states::{Body, NVec2};
pub use simulation::forces::NewtonianGravity;
pub use simulation::integrator::semi_implicit_euler;
pub use simulation::simulator::Simulator;
pub use simulation::scenario::{Appearance, Scenario};

pub use configuration::config::{EngineConfig, UnitsConfig, ParametersConfig, TimestepConfig, TimestepMode, BodyConfig, ScenarioConfig, ViewConfig};

#[cfg(feature = "viewer")]
pub use visualization::{jovisim_vis2d::run_2d, jovisim_vis3d::run_3d};
