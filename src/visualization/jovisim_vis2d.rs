use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::math::primitives::Circle;

use crate::simulation::scenario::Scenario;
use crate::simulation::states::NVec2;
use super::advance_frame;

#[derive(Component)]
struct BodyIndex(pub usize);

/// Screen pixels per m/s when drawing velocity arrows
const VELOCITY_VECTOR_SCALE: f64 = 1.0 / 500.0;
/// Screen pixels per newton when drawing force arrows
const FORCE_VECTOR_SCALE: f64 = 1.0 / 10e20;

pub fn run_2d(scenario: Scenario) {
    log::info!("run_2d: starting Bevy 2D viewer with {} bodies", scenario.simulator.len());

    App::new()
        .insert_resource(scenario)
        .add_plugins(DefaultPlugins)
        .add_systems(Startup, setup_bodies_system)
        .add_systems(Update, (physics_step_system, sync_transforms_system, draw_vectors_system).chain())
        .run();
}

/// Canvas convention: +y points down the screen
fn to_screen(scenario: &Scenario, x: NVec2) -> Vec2 {
    let p = scenario.engine.to_screen(x);
    Vec2::new(p.x as f32, -p.y as f32)
}

fn setup_bodies_system(mut commands: Commands, scenario: Res<Scenario>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    // 2D camera
    commands.spawn(Camera2dBundle::default());

    for (i, (body, look)) in scenario.simulator.bodies().iter().zip(scenario.appearances.iter()).enumerate() {
        let radius_screen = (look.radius as f32).max(1.0);
        let p = to_screen(&scenario, body.position());
        // primary drawn warm, satellites white
        let color = if i == 0 { Color::srgb(0.9, 0.7, 0.5) } else { Color::WHITE };

        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(radius_screen))),
                material: materials.add(ColorMaterial::from(color)),
                transform: Transform::from_xyz(p.x, p.y, 0.0),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

fn physics_step_system(mut scenario: ResMut<Scenario>, mut halted: Local<bool>) {
    advance_frame(&mut scenario, &mut halted);
}

fn sync_transforms_system(scenario: Res<Scenario>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(b) = scenario.simulator.body(*i) {
            let p = to_screen(&scenario, b.position());
            transform.translation.x = p.x;
            transform.translation.y = p.y;
        }
    }
}

/// Velocity (red) for the satellites, force (blue) for everyone
fn draw_vectors_system(scenario: Res<Scenario>, mut gizmos: Gizmos) {
    for (i, b) in scenario.simulator.bodies().iter().enumerate() {
        let start = to_screen(&scenario, b.position());

        let f = b.force() * FORCE_VECTOR_SCALE;
        gizmos.line_2d(start, start + Vec2::new(f.x as f32, -f.y as f32), Color::srgb(0.0, 0.0, 1.0));

        if i > 0 {
            let v = b.velocity() * VELOCITY_VECTOR_SCALE;
            gizmos.line_2d(start, start + Vec2::new(v.x as f32, -v.y as f32), Color::srgb(1.0, 0.0, 0.0));
        }
    }
}
