//! Numerical and physical parameters for the simulation
//!
//! `Parameters` holds runtime settings:
//! - gravitational constant and softening (`G`, `eps`),
//! - the degenerate-pair guard (`min_separation`),
//! - the per-frame step size `dt`, already resolved from the timestep config

use crate::simulation::forces::NewtonianGravity;

#[allow(non_snake_case)]
#[derive(Debug, Clone)]
pub struct Parameters {
    pub G: f64, // gravitational constant
    pub eps: f64, // softening length
    pub min_separation: f64, // degenerate-pair guard
    pub dt: f64, // step size per frame
}

impl Parameters {
    pub fn gravity(&self) -> NewtonianGravity {
        NewtonianGravity {
            G: self.G,
            eps: self.eps,
            min_separation: self.min_separation,
        }
    }
}
