//! Fixed-step time integration for a single body
//!
//! Semi-implicit (symplectic) Euler: kick the velocity with the force
//! accumulated for this step, then drift the position with the *new*
//! velocity. Swapping the two lines gives explicit Euler, which slowly pumps
//! energy into every orbit.

use crate::error::SimError;
use crate::simulation::states::NVec2;

/// Advance one body by `dt`. Callers validate `m` and `dt` first.
pub fn semi_implicit_euler(x: &mut NVec2, v: &mut NVec2, f: &NVec2, m: f64, dt: f64) {
    // Kick: v_n+1 = v_n + dt * f_n / m
    *v += dt * *f / m;

    // Drift: x_n+1 = x_n + dt * v_n+1
    *x += dt * *v;
}

pub fn validate_timestep(dt: f64) -> Result<(), SimError> {
    if dt > 0.0 && dt.is_finite() {
        Ok(())
    } else {
        Err(SimError::InvalidTimestep(dt))
    }
}
