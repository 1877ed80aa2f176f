use approx::assert_relative_eq;

use jovisim::{Scenario, ScenarioConfig, SimError, TimestepConfig, TimestepMode, ViewConfig};

const MINIMAL: &str = "
bodies:
  - x: [0.0, 0.0]
    v: [0.0, 0.0]
    m: 1.0e20
  - x: [1.0e8, 0.0]
    v_kph: [3.6, 0.0]
    m: 1.0e18
";

// ==================================================================================
// Defaults
// ==================================================================================

#[test]
fn omitted_sections_take_documented_defaults() {
    let cfg = ScenarioConfig::from_yaml_str(MINIMAL).unwrap();

    assert_eq!(cfg.engine.view, ViewConfig::Plane);
    assert_eq!(cfg.parameters.G, 6.673e-11);
    assert_eq!(cfg.parameters.eps, 3e4);
    assert_eq!(cfg.parameters.min_separation, 1e-3);
    assert_eq!(cfg.units.kph, 0.277777778);
    assert_eq!(cfg.units.metres_per_pixel, 5e6);
    assert_eq!(cfg.timestep.mode, TimestepMode::Fixed);
    assert_eq!(cfg.timestep.dt(), 100.0);
    assert_eq!(cfg.report_every, 600);
}

#[test]
fn frame_rate_timestep_is_time_scale_over_fps() {
    let ts = TimestepConfig::frame_rate(1.0e4, 60.0);
    assert_relative_eq!(ts.dt(), 10000.0 / 60.0);

    assert_eq!(TimestepConfig::fixed(25.0).dt(), 25.0);
}

#[test]
fn kph_velocities_are_converted_once() {
    let scenario = Scenario::build_scenario(ScenarioConfig::from_yaml_str(MINIMAL).unwrap()).unwrap();

    let v = scenario.simulator.bodies()[1].velocity();
    assert_relative_eq!(v.x, 1.0, max_relative = 1e-8);
    assert_eq!(v.y, 0.0);
}

// ==================================================================================
// Scenario files
// ==================================================================================

#[test]
fn jovian_file_matches_builtin_system() {
    let from_file = ScenarioConfig::from_yaml_str(include_str!("../scenarios/jovian.yaml")).unwrap();
    let from_file = Scenario::build_scenario(from_file).unwrap();
    let builtin = Scenario::build_scenario(ScenarioConfig::jovian()).unwrap();

    assert_eq!(from_file.simulator.len(), 5);
    assert_eq!(from_file.appearances, builtin.appearances);
    assert_eq!(from_file.parameters.dt, builtin.parameters.dt);

    for (a, b) in from_file.simulator.bodies().iter().zip(builtin.simulator.bodies()) {
        assert_eq!(a.mass(), b.mass());
        assert_relative_eq!(a.position().x, b.position().x);
        assert_relative_eq!(a.position().y, b.position().y);
        assert_relative_eq!(a.velocity().x, b.velocity().x);
        assert_relative_eq!(a.velocity().y, b.velocity().y);
    }
}

#[test]
fn scene_file_uses_frame_rate_step() {
    let cfg = ScenarioConfig::from_yaml_str(include_str!("../scenarios/jovian_scene.yaml")).unwrap();
    let scenario = Scenario::build_scenario(cfg).unwrap();

    assert_eq!(scenario.engine.view, ViewConfig::Scene);
    assert_relative_eq!(scenario.parameters.dt, 10000.0 / 60.0);
}

#[test]
fn appearances_follow_body_order() {
    let scenario = Scenario::build_scenario(ScenarioConfig::jovian()).unwrap();
    let io = &scenario.appearances[1];

    assert_eq!(io.name, "Io");
    assert_eq!(io.radius, 3.0);
    assert_relative_eq!(io.rotation_period, 1.769 * 86400.0);

    // unnamed bodies without display data fall back to defaults
    let minimal = Scenario::build_scenario(ScenarioConfig::from_yaml_str(MINIMAL).unwrap()).unwrap();
    assert_eq!(minimal.appearances[0].name, "body 0");
    assert_eq!(minimal.appearances[0].radius, 4.0);
    assert_eq!(minimal.appearances[0].rotation_period, 5.0);
}

#[test]
fn advance_uses_configured_timestep_and_reports_on_cadence() {
    let mut cfg = ScenarioConfig::jovian();
    cfg.report_every = 2;
    cfg.timestep = TimestepConfig::fixed(50.0);
    let mut scenario = Scenario::build_scenario(cfg).unwrap();

    assert!(!scenario.report_due());
    scenario.advance().unwrap();
    assert!(!scenario.report_due());
    scenario.advance().unwrap();
    assert!(scenario.report_due());
    assert_relative_eq!(scenario.simulator.time(), 100.0);

    let line = scenario.status_line(0).unwrap();
    assert!(line.contains("Jupiter"));
    assert!(scenario.status_line(5).is_none());
}

#[test]
fn view_parses_from_cli_strings() {
    assert_eq!("plane".parse::<ViewConfig>().unwrap(), ViewConfig::Plane);
    assert_eq!("3d".parse::<ViewConfig>().unwrap(), ViewConfig::Scene);
    assert!("cube".parse::<ViewConfig>().is_err());
}

// ==================================================================================
// Validation
// ==================================================================================

fn build(yaml: &str) -> Result<Scenario, SimError> {
    Scenario::build_scenario(ScenarioConfig::from_yaml_str(yaml)?)
}

#[test]
fn rejects_both_or_neither_velocity() {
    let both = "
bodies:
  - x: [0.0, 0.0]
    v: [0.0, 0.0]
    v_kph: [0.0, 0.0]
    m: 1.0
";
    let neither = "
bodies:
  - x: [0.0, 0.0]
    m: 1.0
";
    assert!(matches!(build(both), Err(SimError::InvalidConfig(_))));
    assert!(matches!(build(neither), Err(SimError::InvalidConfig(_))));
}

#[test]
fn rejects_wrong_vector_arity() {
    let yaml = "
bodies:
  - x: [0.0, 0.0, 0.0]
    v: [0.0, 0.0]
    m: 1.0
";
    assert!(matches!(build(yaml), Err(SimError::InvalidConfig(_))));
}

#[test]
fn rejects_non_positive_mass_with_index() {
    let yaml = "
bodies:
  - x: [0.0, 0.0]
    v: [0.0, 0.0]
    m: 1.0
  - x: [1.0, 0.0]
    v: [0.0, 0.0]
    m: 0.0
";
    let err = build(yaml).unwrap_err();
    assert!(matches!(err, SimError::NonPositiveMass { index: Some(1), .. }));
    assert!(err.is_domain());
}

#[test]
fn rejects_bad_constants() {
    let mut cfg = ScenarioConfig::jovian();
    cfg.parameters.G = -1.0;
    assert!(matches!(cfg.validate(), Err(SimError::InvalidConfig(_))));

    let mut cfg = ScenarioConfig::jovian();
    cfg.timestep = TimestepConfig::frame_rate(1.0e4, 0.0);
    assert!(matches!(cfg.validate(), Err(SimError::InvalidConfig(_))));

    let mut cfg = ScenarioConfig::jovian();
    cfg.units.kph = 0.0;
    assert!(matches!(cfg.validate(), Err(SimError::InvalidConfig(_))));

    let mut cfg = ScenarioConfig::jovian();
    cfg.bodies.clear();
    assert!(matches!(cfg.validate(), Err(SimError::InvalidConfig(_))));

    // zero softening is allowed, it is plain Newtonian gravity
    let mut cfg = ScenarioConfig::jovian();
    cfg.parameters.eps = 0.0;
    assert!(cfg.validate().is_ok());
}

#[test]
fn unknown_view_is_a_parse_error() {
    let yaml = "
engine:
  view: hologram
bodies:
  - x: [0.0, 0.0]
    v: [0.0, 0.0]
    m: 1.0
";
    assert!(matches!(ScenarioConfig::from_yaml_str(yaml), Err(SimError::Parse(_))));
}

#[test]
fn missing_file_is_an_io_error() {
    let err = ScenarioConfig::from_path("does/not/exist.yaml").unwrap_err();
    assert!(matches!(err, SimError::Io(_)));
}
