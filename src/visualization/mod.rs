//! Thin Bevy front-ends over the shared simulation core
//!
//! Both views hold the [`Scenario`](crate::Scenario) as a resource, step it
//! once per frame with the configured timestep and then copy body positions
//! onto their meshes. Neither view touches velocity or force.

pub mod jovisim_vis2d;
pub mod jovisim_vis3d;

use crate::simulation::scenario::Scenario;

/// Step the scenario once. Returns false once the run has failed and halted.
pub(crate) fn advance_frame(scenario: &mut Scenario, halted: &mut bool) -> bool {
    if *halted {
        return false;
    }

    if let Err(e) = scenario.advance() {
        log::error!("simulation halted after {} steps: {}", scenario.simulator.steps(), e);
        *halted = true;
        return false;
    }

    if scenario.report_due() {
        // primary body, like the reference status panel
        if let Some(line) = scenario.status_line(0) {
            log::info!("{}", line);
        }
    }
    true
}
