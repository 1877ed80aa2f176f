//! Configuration types for loading simulation scenarios from YAML.
//!
//! A scenario consists of:
//!
//! - [`EngineConfig`]     – which front-end view the bodies are laid out for
//! - [`UnitsConfig`]      – unit conversions and presentation scale
//! - [`ParametersConfig`] – physical constants for the force law
//! - [`TimestepConfig`]   – how the per-frame timestep is derived
//! - [`BodyConfig`]       – initial state for each body
//! - [`ScenarioConfig`]   – top-level wrapper used to load a scenario from YAML
//!
//! Every section except `bodies` may be left out and falls back to the
//! defaults documented on each field.
//!
//! # YAML format
//!
//! ```yaml
//! engine:
//!   view: scene             # "plane" (x/y) or "scene" (x/z)
//!
//! units:
//!   kph: 0.277777778        # km/h -> m/s
//!   day: 86400.0            # days -> s
//!   metres_per_pixel: 5.0e6 # presentation scale
//!
//! parameters:
//!   G: 6.673e-11            # gravitational constant
//!   eps: 3.0e4              # softening length (m)
//!   min_separation: 1.0e-3  # closer pairs are rejected (m)
//!
//! timestep:
//!   mode: frame_rate        # or "fixed"
//!   dt: 100.0               # used by "fixed" (s)
//!   time_scale: 1.0e4       # used by "frame_rate": dt = time_scale / fps
//!   fps: 60.0
//!
//! report_every: 600         # headless status cadence (steps)
//!
//! bodies:
//!   - name: Io
//!     x: [0.0, -421800.0e3] # m
//!     v_kph: [62423.1, 0.0] # km/h, or `v: [..]` in m/s
//!     m: 8.931e22           # kg
//!     radius: 3.0           # display only
//!     rotation_days: 1.769  # display only
//! ```

use std::fs;
use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

use crate::error::SimError;
use crate::simulation::states::NVec2;

pub const DEFAULT_G: f64 = 6.673e-11;
pub const DEFAULT_EPS: f64 = 3.0e4;
pub const DEFAULT_MIN_SEPARATION: f64 = 1.0e-3;
pub const DEFAULT_KPH: f64 = 0.277777778;
pub const DEFAULT_DAY: f64 = 86400.0;
pub const DEFAULT_METRES_PER_PIXEL: f64 = 5.0e6;
pub const DEFAULT_DT: f64 = 100.0;
pub const DEFAULT_TIME_SCALE: f64 = 1.0e4;
pub const DEFAULT_FPS: f64 = 60.0;
pub const DEFAULT_REPORT_EVERY: u64 = 600;
pub const DEFAULT_BODY_RADIUS: f64 = 4.0;
pub const DEFAULT_ROTATION_PERIOD: f64 = 5.0;

/// Plane the two simulated components are laid out in,
/// `view: "plane"` or `view: "scene"`
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewConfig {
    #[serde(rename = "plane")] // flat x/y view, y grows down the screen like a canvas
    #[default]
    Plane,

    #[serde(rename = "scene")] // 3D scene, bodies orbit in the x/z plane
    Scene,
}

impl FromStr for ViewConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "plane" | "2d" => Ok(ViewConfig::Plane),
            "scene" | "3d" => Ok(ViewConfig::Scene),
            other => Err(format!("unknown view '{}', expected 'plane' or 'scene'", other)),
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub view: ViewConfig,
}

/// Unit conversions, applied once while building the scenario
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct UnitsConfig {
    pub kph: f64,              // multiply km/h by this to get m/s
    pub day: f64,              // seconds per day
    pub metres_per_pixel: f64, // world metres per screen unit
}

impl Default for UnitsConfig {
    fn default() -> Self {
        Self {
            kph: DEFAULT_KPH,
            day: DEFAULT_DAY,
            metres_per_pixel: DEFAULT_METRES_PER_PIXEL,
        }
    }
}

/// Physical constants for the force law
#[allow(non_snake_case)]
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct ParametersConfig {
    pub G: f64,              // gravitational constant
    pub eps: f64,            // softening - bound forces at very small separations
    pub min_separation: f64, // separation below which the force direction is undefined
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            G: DEFAULT_G,
            eps: DEFAULT_EPS,
            min_separation: DEFAULT_MIN_SEPARATION,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestepMode {
    #[serde(rename = "fixed")] // same dt every frame
    #[default]
    Fixed,

    #[serde(rename = "frame_rate")] // dt = time_scale / fps
    FrameRate,
}

#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct TimestepConfig {
    pub mode: TimestepMode,
    pub dt: f64,         // fixed step (s)
    pub time_scale: f64, // simulated seconds per real second
    pub fps: f64,        // frames per real second
}

impl Default for TimestepConfig {
    fn default() -> Self {
        Self {
            mode: TimestepMode::Fixed,
            dt: DEFAULT_DT,
            time_scale: DEFAULT_TIME_SCALE,
            fps: DEFAULT_FPS,
        }
    }
}

impl TimestepConfig {
    pub fn fixed(dt: f64) -> Self {
        Self { mode: TimestepMode::Fixed, dt, ..Default::default() }
    }

    pub fn frame_rate(time_scale: f64, fps: f64) -> Self {
        Self { mode: TimestepMode::FrameRate, time_scale, fps, ..Default::default() }
    }

    /// Simulated seconds advanced per frame
    pub fn dt(&self) -> f64 {
        match self.mode {
            TimestepMode::Fixed => self.dt,
            TimestepMode::FrameRate => self.time_scale / self.fps,
        }
    }
}

/// Configuration for a single body's initial state
#[derive(Deserialize, Debug, Clone)]
pub struct BodyConfig {
    #[serde(default)]
    pub name: Option<String>,
    pub x: Vec<f64>,             // initial position (m)
    #[serde(default)]
    pub v: Option<Vec<f64>>,     // initial velocity (m/s)
    #[serde(default)]
    pub v_kph: Option<Vec<f64>>, // initial velocity (km/h), converted with `units.kph`
    pub m: f64,                  // mass (kg)
    #[serde(default)]
    pub radius: Option<f64>,     // display radius, never read by the physics
    #[serde(default)]
    pub rotation_days: Option<f64>, // sidereal rotation period, display only
}

impl BodyConfig {
    pub fn position(&self) -> Result<NVec2, SimError> {
        planar(&self.x, "x")
    }

    /// Initial velocity in m/s. Exactly one of `v` / `v_kph` must be given.
    pub fn velocity(&self, units: &UnitsConfig) -> Result<NVec2, SimError> {
        match (&self.v, &self.v_kph) {
            (Some(v), None) => planar(v, "v"),
            (None, Some(v)) => Ok(planar(v, "v_kph")? * units.kph),
            (Some(_), Some(_)) => Err(SimError::InvalidConfig(format!("{}: give either `v` or `v_kph`, not both", self.label()))),
            (None, None) => Err(SimError::InvalidConfig(format!("{}: missing velocity (`v` or `v_kph`)", self.label()))),
        }
    }

    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| "body".to_string())
    }
}

/// Top-level scenario configuration loaded from YAML.
#[derive(Deserialize, Debug, Clone)]
pub struct ScenarioConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub units: UnitsConfig,
    #[serde(default)]
    pub parameters: ParametersConfig,
    #[serde(default)]
    pub timestep: TimestepConfig,
    #[serde(default = "default_report_every")]
    pub report_every: u64,
    pub bodies: Vec<BodyConfig>,
}

fn default_report_every() -> u64 {
    DEFAULT_REPORT_EVERY
}

impl ScenarioConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, SimError> {
        let cfg: ScenarioConfig = serde_yaml::from_str(s)?;
        Ok(cfg)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let text = fs::read_to_string(path)?;
        Self::from_yaml_str(&text)
    }

    /// Jupiter and the four Galilean moons, all other settings at their defaults
    pub fn jovian() -> Self {
        let body = |name: &str, x: [f64; 2], v_kph: [f64; 2], m: f64, radius: f64, rotation_days: f64| BodyConfig {
            name: Some(name.to_string()),
            x: x.to_vec(),
            v: None,
            v_kph: Some(v_kph.to_vec()),
            m,
            radius: Some(radius),
            rotation_days: Some(rotation_days),
        };

        Self {
            engine: EngineConfig::default(),
            units: UnitsConfig::default(),
            parameters: ParametersConfig::default(),
            timestep: TimestepConfig::default(),
            report_every: DEFAULT_REPORT_EVERY,
            bodies: vec![
                body("Jupiter", [0.0, 0.0], [0.0, 0.0], 1.8986e27, 20.0, 0.41354),
                body("Io", [0.0, -421800e3], [62423.1, 0.0], 8.931e22, 3.0, 1.769),
                body("Europa", [671100e3, 0.0], [0.0, 49476.1], 4.7998e22, 2.0, 3.551),
                body("Ganymede", [0.0, 1070400e3], [-39165.6, 0.0], 1.4819e23, 5.0, 7.155),
                body("Callisto", [-1882700e3, 0.0], [0.0, -29531.6], 1.0759e23, 4.0, 16.6890184),
            ],
        }
    }

    /// Reject anything the builder could not turn into a sane run
    pub fn validate(&self) -> Result<(), SimError> {
        let p = &self.parameters;
        positive("parameters.G", p.G)?;
        non_negative("parameters.eps", p.eps)?;
        non_negative("parameters.min_separation", p.min_separation)?;

        let u = &self.units;
        positive("units.kph", u.kph)?;
        positive("units.day", u.day)?;
        positive("units.metres_per_pixel", u.metres_per_pixel)?;

        match self.timestep.mode {
            TimestepMode::Fixed => positive("timestep.dt", self.timestep.dt)?,
            TimestepMode::FrameRate => {
                positive("timestep.time_scale", self.timestep.time_scale)?;
                positive("timestep.fps", self.timestep.fps)?;
            }
        }

        if self.report_every == 0 {
            return Err(SimError::InvalidConfig("report_every must be at least 1".to_string()));
        }
        if self.bodies.is_empty() {
            return Err(SimError::InvalidConfig("scenario has no bodies".to_string()));
        }

        for (i, b) in self.bodies.iter().enumerate() {
            if !(b.m > 0.0 && b.m.is_finite()) {
                return Err(SimError::NonPositiveMass { index: Some(i), mass: b.m });
            }
            b.position()?;
            b.velocity(u)?;
            if let Some(r) = b.radius {
                positive("bodies[].radius", r)?;
            }
            if let Some(d) = b.rotation_days {
                positive("bodies[].rotation_days", d)?;
            }
        }
        Ok(())
    }
}

// helpers ==============================================================================

fn planar(values: &[f64], field: &str) -> Result<NVec2, SimError> {
    match values {
        [a, b] if a.is_finite() && b.is_finite() => Ok(NVec2::new(*a, *b)),
        [_, _] => Err(SimError::InvalidConfig(format!("`{}` must be finite", field))),
        _ => Err(SimError::InvalidConfig(format!("`{}` needs 2 components, got {}", field, values.len()))),
    }
}

fn positive(field: &str, value: f64) -> Result<(), SimError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidConfig(format!("{} must be positive, got {}", field, value)))
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), SimError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidConfig(format!("{} must not be negative, got {}", field, value)))
    }
}
