//! The step driver
//!
//! A [`Simulator`] owns the body set and the force law for one run. Each call
//! to [`Simulator::step`] goes through three phases, each finished before the
//! next starts:
//!
//! 1. reset every body's accumulated force
//! 2. evaluate each unordered pair `(i, j)`, `i < j`, exactly once and apply
//!    the result to `i` and its negation to `j`
//! 3. integrate every body independently
//!
//! Everything that can fail is checked before phase 1, so a failed step leaves
//! the simulator exactly as it was.

use crate::error::SimError;
use crate::simulation::forces::NewtonianGravity;
use crate::simulation::integrator::validate_timestep;
use crate::simulation::states::{check_mass, Body, NVec2};

#[derive(Debug, Clone)]
pub struct Simulator {
    bodies: Vec<Body>,
    gravity: NewtonianGravity,
    t: f64,     // simulated time (s)
    steps: u64, // completed steps
}

impl Simulator {
    /// Take ownership of `bodies`. Their order is fixed from here on.
    pub fn new(bodies: Vec<Body>, gravity: NewtonianGravity) -> Result<Self, SimError> {
        for (i, b) in bodies.iter().enumerate() {
            check_mass(b.m).map_err(|e| e.with_index(i))?;
        }

        Ok(Self {
            bodies,
            gravity,
            t: 0.0,
            steps: 0,
        })
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    pub fn body(&self, i: usize) -> Option<&Body> {
        self.bodies.get(i)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    pub fn gravity(&self) -> &NewtonianGravity {
        &self.gravity
    }

    pub fn time(&self) -> f64 {
        self.t
    }

    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Move body `i` before the run starts. Velocity and force stay untouched.
    /// Fails once a step has completed.
    pub fn set_position(&mut self, i: usize, x: NVec2) -> Result<(), SimError> {
        if self.steps > 0 {
            return Err(SimError::InvalidConfig(format!(
                "positions are fixed once the run has started ({} steps taken)",
                self.steps
            )));
        }

        let n = self.bodies.len();
        let body = self
            .bodies
            .get_mut(i)
            .ok_or_else(|| SimError::InvalidConfig(format!("no body {} in a set of {}", i, n)))?;
        body.x = x;
        Ok(())
    }

    /// Advance the whole set by one timestep.
    pub fn step(&mut self, dt: f64) -> Result<(), SimError> {
        self.validate(dt)?;

        self.accumulate_forces()?;

        for (i, b) in self.bodies.iter_mut().enumerate() {
            b.integrate(dt).map_err(|e| e.with_index(i))?;
        }

        self.t += dt;
        self.steps += 1;
        Ok(())
    }

    /// Call [`Simulator::step`] `n` times, stopping at the first failure.
    pub fn run(&mut self, dt: f64, n: u64) -> Result<(), SimError> {
        for _ in 0..n {
            self.step(dt)?;
        }
        Ok(())
    }

    /// Phases 1 and 2 of a step: reset and accumulate, without integrating.
    /// Afterwards every body's `force()` holds its net force for the current
    /// positions. A degenerate pair is reported before any force is touched.
    pub fn compute_forces(&mut self) -> Result<(), SimError> {
        self.check_pairs()?;
        self.accumulate_forces()
    }

    // caller has already run check_pairs
    fn accumulate_forces(&mut self) -> Result<(), SimError> {
        for b in self.bodies.iter_mut() {
            b.reset_force();
        }

        let n = self.bodies.len();
        for i in 0..n {
            // head[i] is body i, tail holds bodies i+1..n
            let (head, tail) = self.bodies.split_at_mut(i + 1);
            let bi = &mut head[i];
            for (k, bj) in tail.iter_mut().enumerate() {
                let force = bi.add_force_from(bj, &self.gravity).map_err(|e| e.with_pair(i, i + 1 + k))?;
                bj.sub_force(force);
            }
        }
        Ok(())
    }

    /// Check everything a step with `dt` could trip over, without mutating.
    pub fn validate(&self, dt: f64) -> Result<(), SimError> {
        validate_timestep(dt)?;

        for (i, b) in self.bodies.iter().enumerate() {
            check_mass(b.m).map_err(|e| e.with_index(i))?;
        }

        self.check_pairs()
    }

    /// Reject any pair closer than the force law's minimum separation
    fn check_pairs(&self) -> Result<(), SimError> {
        for (i, bi) in self.bodies.iter().enumerate() {
            for (j, bj) in self.bodies.iter().enumerate().skip(i + 1) {
                self.gravity
                    .check_separation(bi.distance_to(bj))
                    .map_err(|e| e.with_pair(i, j))?;
            }
        }
        Ok(())
    }

    /// Sum of every body's accumulated force. Zero up to rounding after a
    /// successful [`Simulator::compute_forces`].
    pub fn net_force(&self) -> NVec2 {
        self.bodies.iter().fold(NVec2::zeros(), |acc, b| acc + b.f)
    }

    pub fn total_momentum(&self) -> NVec2 {
        self.bodies.iter().fold(NVec2::zeros(), |acc, b| acc + b.momentum())
    }

    pub fn total_mass(&self) -> f64 {
        self.bodies.iter().map(|b| b.m).sum()
    }

    /// Mass-weighted mean position, or the origin for an empty set
    pub fn center_of_mass(&self) -> NVec2 {
        let m = self.total_mass();
        if m <= 0.0 {
            return NVec2::zeros();
        }
        self.bodies.iter().fold(NVec2::zeros(), |acc, b| acc + b.m * b.x) / m
    }
}
