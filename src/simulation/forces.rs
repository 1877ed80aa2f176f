//! Softened Newtonian gravity between two point masses
//!
//! Magnitude uses the softened distance, direction uses the true one:
//!
//! ```text
//! d = x_b - x_a,  r = |d|
//! F = G * m_a * m_b / (r^2 + eps^2)
//! f_a = F * d / r
//! ```
//!
//! Softening keeps `F` below `G * m_a * m_b / eps^2` however close the bodies
//! get. It does nothing for the direction, which is undefined at `r = 0`, so
//! pairs closer than `min_separation` are rejected with
//! [`SimError::DegenerateGeometry`].

use crate::error::SimError;
use crate::simulation::states::NVec2;

#[allow(non_snake_case)]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonianGravity {
    pub G: f64,              // gravitational constant
    pub eps: f64,            // softening length (m)
    pub min_separation: f64, // pairs closer than this are degenerate (m)
}

impl NewtonianGravity {
    /// Force on body `a` (at `x_a`, mass `m_a`) due to body `b`.
    /// The force on `b` due to `a` is the negation of this.
    pub fn force(&self, x_a: NVec2, m_a: f64, x_b: NVec2, m_b: f64) -> Result<NVec2, SimError> {
        // d points from a to b, so a is pulled along +d
        let d = x_b - x_a;
        let r = d.norm();
        self.check_separation(r)?;

        let magnitude = self.magnitude(r, m_a, m_b);
        Ok(magnitude * d / r)
    }

    /// Softened force magnitude at separation `r`
    pub fn magnitude(&self, r: f64, m_a: f64, m_b: f64) -> f64 {
        (self.G * m_a * m_b) / (r * r + self.eps * self.eps)
    }

    /// Upper bound on the magnitude at any separation. Infinite when unsoftened.
    pub fn bound(&self, m_a: f64, m_b: f64) -> f64 {
        (self.G * m_a * m_b) / (self.eps * self.eps)
    }

    pub fn check_separation(&self, r: f64) -> Result<(), SimError> {
        // NaN positions fall through to the error too
        if r > self.min_separation && r > 0.0 {
            Ok(())
        } else {
            Err(SimError::DegenerateGeometry { pair: None, separation: r })
        }
    }
}
