use std::f64::consts::TAU;

use bevy::prelude::*;
use bevy::math::primitives::{Sphere, Cuboid};
use bevy::ecs::system::Local;

use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec2;
use super::advance_frame;

/// Component tagging each sphere with its body index into Scenario.simulator
#[derive(Component)]
struct BodyIndex3(pub usize);

/// Height and distance of the camera above the orbital (x/z) plane
const CAMERA_HEIGHT: f32 = 350.0;
const CAMERA_DISTANCE: f32 = 450.0;

/// Convenience entrypoint, mirroring run_2d(scenario: Scenario)
pub fn run_3d(scenario: Scenario) {
    log::info!("run_3d: starting Bevy 3D viewer with {} bodies", scenario.simulator.len());

    App::new()
        .insert_resource(scenario)
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_3d)
        .add_systems(Update, (physics_step_3d, sync_transforms_3d).chain())
        .run();
}

/// The simulation plane is laid flat: in-plane (a, b) becomes world (a, 0, b)
fn to_world(scenario: &Scenario, x: NVec2) -> Vec3 {
    let p = scenario.engine.to_screen(x);
    Vec3::new(p.x as f32, 0.0, p.y as f32)
}

/// Startup system: spawn camera, light, and one sphere per body
fn setup_3d(mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    scenario: Res<Scenario>,
) {
    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)), // pure black
            ..Default::default()
        },
        transform: Transform::from_xyz(0.0, CAMERA_HEIGHT, CAMERA_DISTANCE)
            .looking_at(Vec3::ZERO, Vec3::Y),
        ..Default::default()
    });

    // Sun-like light off to one side of the system
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 5.0e8,
            range: 5000.0,
            ..Default::default()
        },
        transform: Transform::from_xyz(-1500.0, 200.0, 0.0),
        ..Default::default()
    });

    spawn_plane_axes(&mut commands, &mut meshes, &mut materials);

    for (i, (b, look)) in scenario.simulator.bodies().iter().zip(scenario.appearances.iter()).enumerate() {
        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Sphere::new(look.radius as f32).mesh()),
                material: materials.add(StandardMaterial {
                    base_color: if i == 0 { Color::srgb(0.85, 0.65, 0.45) } else { Color::srgb(0.8, 0.8, 0.8) },
                    ..Default::default()
                }),
                transform: Transform::from_translation(to_world(&scenario, b.position())),
                ..Default::default()
            },
            BodyIndex3(i),
        ));
    }
}

/// Per-frame physics integration for the 3D scenario
fn physics_step_3d(mut scenario: ResMut<Scenario>, mut halted: Local<bool>) {
    advance_frame(&mut scenario, &mut halted);
}

/// Runs after the step: place every sphere and spin it by the simulated time
/// that passed since the last frame. A halted run stops spinning.
fn sync_transforms_3d(
    scenario: Res<Scenario>,
    mut last_steps: Local<u64>,
    mut query: Query<(&BodyIndex3, &mut Transform)>,
) {
    let steps = scenario.simulator.steps();
    let advanced = steps.saturating_sub(*last_steps);
    *last_steps = steps;

    for (BodyIndex3(i), mut transform) in &mut query {
        if let (Some(b), Some(look)) = (scenario.simulator.body(*i), scenario.appearances.get(*i)) {
            transform.translation = to_world(&scenario, b.position());
            if advanced > 0 {
                transform.rotate_y(spin_angle(look.rotation_period, scenario.parameters.dt, advanced));
            }
        }
    }
}

/// Rotation about world Y for `advanced` steps of `dt`, clockwise seen from above
fn spin_angle(rotation_period: f64, dt: f64, advanced: u64) -> f32 {
    -(TAU / rotation_period * dt * advanced as f64) as f32
}

// =========================================================================================
// Reference axes lying in the orbital plane
// =========================================================================================

fn spawn_plane_axes(commands: &mut Commands, meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) {
    let axis_len = 800.0;
    let axis_thickness = 0.4;

    // first in-plane component: red, along world X
    commands.spawn(PbrBundle {
        mesh: meshes.add(Cuboid::new(axis_len, axis_thickness, axis_thickness).mesh()),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.6, 0.0, 0.0),
            unlit: true,
            ..Default::default()
        }),
        ..Default::default()
    });

    // second in-plane component: blue, along world Z
    commands.spawn(PbrBundle {
        mesh: meshes.add(Cuboid::new(axis_thickness, axis_thickness, axis_len).mesh()),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(0.0, 0.0, 0.6),
            unlit: true,
            ..Default::default()
        }),
        ..Default::default()
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spin_stops_when_no_step_was_taken() {
        assert_eq!(spin_angle(5.0, 100.0, 0), 0.0);
    }

    #[test]
    fn spin_covers_one_turn_per_period() {
        // 50 steps of 0.1 s over a 5 s period
        let angle = spin_angle(5.0, 0.1, 50);
        assert!((angle + std::f32::consts::TAU).abs() < 1e-5, "angle {}", angle);
    }
}
