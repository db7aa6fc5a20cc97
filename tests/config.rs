use climb_optimizer::config::{ConfigError, ScenarioConfig, load_aircraft_catalog, load_scenario};
use climb_optimizer::trajectory::aircraft::{self, AircraftError};
use climb_optimizer::trajectory::{Objective, scenario};

#[test]
fn bundled_scenario_matches_defaults() {
    let loaded = load_scenario("configs/scenario.toml").expect("scenario toml");
    assert_eq!(loaded, ScenarioConfig::default());
}

#[test]
fn yaml_scenario_fills_missing_fields() {
    let loaded = load_scenario("configs/scenario_short.yaml").expect("scenario yaml");
    assert_eq!(loaded.grid.resolution, 5);
    assert_eq!(loaded.aircraft.mass_kg, 140_000.0);
    assert_eq!(loaded.aircraft.wing_area_m2, 300.0);
    assert_eq!(loaded.objectives, ScenarioConfig::default().objectives);

    let runtime = scenario::from_config(&loaded);
    assert_eq!(runtime.resolution, 5);
    assert_eq!(runtime.finish.altitude_m, 3_750.0);
    assert_eq!(runtime.profile(Objective::MinimizeFuel).settings.len(), 3);
}

#[test]
fn catalog_selection_is_case_insensitive() {
    let catalog = load_aircraft_catalog("configs/aircraft").expect("aircraft catalog");
    let names: Vec<&str> = catalog.iter().map(|cfg| cfg.name.as_str()).collect();
    assert_eq!(names, ["TY-134", "TY-134-LIGHT"]);

    let default = aircraft::select(&catalog, None).expect("default aircraft");
    assert_eq!(default.name, "TY-134");

    let light = aircraft::select(&catalog, Some("ty-134-light")).expect("light aircraft");
    assert_eq!(light.mass_kg, 120_000.0);
    assert_eq!(light.powerplant.throttle_percent, 100.0);
    assert_eq!(light.powerplant.engine_count, 4);

    assert!(matches!(
        aircraft::select(&catalog, Some("AN-2")),
        Err(AircraftError::NotFound(name)) if name == "AN-2"
    ));
    assert!(matches!(
        aircraft::select(&[], None),
        Err(AircraftError::EmptyCatalog)
    ));
}

#[test]
fn invalid_scenario_file_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "[grid]\nresolution = 0\n").expect("write scenario");

    match load_scenario(&path) {
        Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, "grid.resolution"),
        other => panic!("expected invalid resolution, got {other:?}"),
    }
}
