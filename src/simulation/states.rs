//! Core state type for the N-body simulation.
//!
//! A [`Body`] is a point mass in a plane. Which plane (x/y for the flat view,
//! x/z for the scene view) only matters to the viewers; the physics works on
//! the two in-plane components.
//!
//! Fields are private to the crate. Consumers read them through accessors and
//! can only move a body through [`Simulator::set_position`](crate::Simulator::set_position)
//! before a run starts.

use nalgebra::Vector2;

use crate::error::SimError;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::{semi_implicit_euler, validate_timestep};

pub type NVec2 = Vector2<f64>;

#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub(crate) x: NVec2, // position (m)
    pub(crate) v: NVec2, // velocity (m/s)
    pub(crate) f: NVec2, // accumulated force (N), only meaningful inside a step
    pub(crate) m: f64,   // mass (kg)
}

impl Body {
    /// Create a body with zero accumulated force. Fails if `m` is not a positive, finite number.
    pub fn new(x: NVec2, v: NVec2, m: f64) -> Result<Self, SimError> {
        check_mass(m)?;
        Ok(Self {
            x,
            v,
            f: NVec2::zeros(),
            m,
        })
    }

    pub fn position(&self) -> NVec2 {
        self.x
    }

    pub fn velocity(&self) -> NVec2 {
        self.v
    }

    pub fn force(&self) -> NVec2 {
        self.f
    }

    pub fn mass(&self) -> f64 {
        self.m
    }

    pub fn momentum(&self) -> NVec2 {
        self.m * self.v
    }

    /// Zero the accumulated force ahead of a new step
    pub fn reset_force(&mut self) {
        self.f = NVec2::zeros();
    }

    /// Compute the pull of `other` on this body, add it to this body's force
    /// and hand it back so the caller can apply the reaction to `other`.
    pub fn add_force_from(&mut self, other: &Body, gravity: &NewtonianGravity) -> Result<NVec2, SimError> {
        let force = gravity.force(self.x, self.m, other.x, other.m)?;
        self.f += force;
        Ok(force)
    }

    /// Advance velocity then position by `dt` using the current force.
    pub fn integrate(&mut self, dt: f64) -> Result<(), SimError> {
        validate_timestep(dt)?;
        check_mass(self.m)?;
        semi_implicit_euler(&mut self.x, &mut self.v, &self.f, self.m, dt);
        Ok(())
    }

    pub fn distance_to(&self, other: &Body) -> f64 {
        (other.x - self.x).norm()
    }

    // reaction half of a pair, see Simulator::compute_forces
    pub(crate) fn sub_force(&mut self, force: NVec2) {
        self.f -= force;
    }
}

pub(crate) fn check_mass(m: f64) -> Result<(), SimError> {
    if m > 0.0 && m.is_finite() {
        Ok(())
    } else {
        Err(SimError::NonPositiveMass { index: None, mass: m })
    }
}
