//! Build fully-initialized simulation scenarios from configuration
//!
//! Takes a `ScenarioConfig` (YAML-facing) and produces a runtime bundle
//! containing:
//! - engine settings (`Engine`)
//! - numerical parameters (`Parameters`)
//! - the step driver (`Simulator`) with bodies at t = 0
//! - one `Appearance` per body, in the same order, for the viewers
//!
//! With the `viewer` feature the scenario is inserted into Bevy as a
//! `Resource` and consumed by the integration and visualization systems

use crate::configuration::config::{ScenarioConfig, BodyConfig, DEFAULT_BODY_RADIUS, DEFAULT_ROTATION_PERIOD};
use crate::error::SimError;
use crate::simulation::engine::Engine;
use crate::simulation::params::Parameters;
use crate::simulation::simulator::Simulator;
use crate::simulation::states::Body;

/// Presentation-only data for one body. The physics never reads it.
#[derive(Debug, Clone, PartialEq)]
pub struct Appearance {
    pub name: String,
    pub radius: f64,          // display radius (screen units)
    pub rotation_period: f64, // sidereal rotation period (s)
}

/// Runtime bundle constructed from a [`ScenarioConfig`]
#[cfg_attr(feature = "viewer", derive(bevy::prelude::Resource))]
#[derive(Debug, Clone)]
pub struct Scenario {
    pub engine: Engine,
    pub parameters: Parameters,
    pub simulator: Simulator,
    pub appearances: Vec<Appearance>,
}

impl Scenario {
    pub fn build_scenario(cfg: ScenarioConfig) -> Result<Self, SimError> {
        cfg.validate()?;

        // Bodies: map `BodyConfig` -> runtime `Body`, converting units once here
        let bodies = cfg
            .bodies
            .iter()
            .enumerate()
            .map(|(i, bc): (usize, &BodyConfig)| {
                Body::new(bc.position()?, bc.velocity(&cfg.units)?, bc.m).map_err(|e| e.with_index(i))
            })
            .collect::<Result<Vec<Body>, SimError>>()?;

        let appearances = cfg
            .bodies
            .iter()
            .enumerate()
            .map(|(i, bc)| Appearance {
                name: bc.name.clone().unwrap_or_else(|| format!("body {}", i)),
                radius: bc.radius.unwrap_or(DEFAULT_BODY_RADIUS),
                rotation_period: bc.rotation_days.map_or(DEFAULT_ROTATION_PERIOD, |d| d * cfg.units.day),
            })
            .collect();

        // Parameters (runtime) from ParametersConfig + TimestepConfig
        let p_cfg = &cfg.parameters;
        let parameters = Parameters {
            G: p_cfg.G,
            eps: p_cfg.eps,
            min_separation: p_cfg.min_separation,
            dt: cfg.timestep.dt(),
        };

        // Engine (runtime) from EngineConfig + UnitsConfig
        let engine = Engine {
            view: cfg.engine.view,
            metres_per_pixel: cfg.units.metres_per_pixel,
            report_every: cfg.report_every,
        };

        let simulator = Simulator::new(bodies, parameters.gravity())?;

        log::info!(
            "scenario ready: {} bodies, dt = {} s, G = {:e}, eps = {:e} m, {:?} view",
            simulator.len(),
            parameters.dt,
            parameters.G,
            parameters.eps,
            engine.view,
        );

        Ok(Self {
            engine,
            parameters,
            simulator,
            appearances,
        })
    }

    /// Advance by the configured per-frame timestep
    pub fn advance(&mut self) -> Result<(), SimError> {
        self.simulator.step(self.parameters.dt)
    }

    /// Whether a status report is due after the most recent step
    pub fn report_due(&self) -> bool {
        let steps = self.simulator.steps();
        steps > 0 && steps % self.engine.report_every == 0
    }

    /// One-line summary of body `i`: position, velocity, force, mass
    pub fn status_line(&self, i: usize) -> Option<String> {
        let b = self.simulator.body(i)?;
        let name = self.appearances.get(i).map_or("?", |a| a.name.as_str());
        let (x, v, f) = (b.position(), b.velocity(), b.force());
        Some(format!(
            "t = {:.0} s  {:<9} x = ({:.6e}, {:.6e}) m  v = ({:.6e}, {:.6e}) m/s  f = ({:.6e}, {:.6e}) N  m = {:e} kg",
            self.simulator.time(),
            name,
            x.x,
            x.y,
            v.x,
            v.y,
            f.x,
            f.y,
            b.mass(),
        ))
    }
}
