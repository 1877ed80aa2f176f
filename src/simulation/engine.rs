//! High-level runtime engine settings
//!
//! Selects the front-end view and the presentation scale used when
//! mapping a `Scenario` onto the screen

use crate::configuration::config::ViewConfig;
use crate::simulation::states::NVec2;

#[derive(Debug, Clone)]
pub struct Engine {
    pub view: ViewConfig, // plane (x/y) or scene (x/z)
    pub metres_per_pixel: f64, // world metres per screen unit
    pub report_every: u64, // steps between status reports
}

impl Engine {
    /// World position in screen units, still in the simulation's own plane
    pub fn to_screen(&self, x: NVec2) -> NVec2 {
        x / self.metres_per_pixel
    }
}
