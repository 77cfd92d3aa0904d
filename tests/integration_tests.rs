use std::io::Write;

use assert_approx_eq::assert_approx_eq;
use snare_engine::catalog::{CatalogFilter, LocationCatalog};
use snare_engine::data::{read_catalog_from_file, write_catalog_to_file};
use snare_engine::geometry::{distance, line_distance, GeometryError, Point3};
use snare_engine::snare::{ContainmentError, PlanError, SnarePlan, SNARE_RADIUS};
use snare_engine::Location;

fn body(name: &str, pos: Point3, grid_radius: f64, om: Option<f64>) -> Location {
    Location {
        internal_name: name.into(),
        object_container: name.into(),
        kind: "Planet".into(),
        system: "Stanton".into(),
        x: pos[0],
        y: pos[1],
        z: pos[2],
        grid_radius,
        orbital_marker_radius: om,
    }
}

fn scenario_a() -> SnarePlan {
    SnarePlan::new(
        body("Source", [1_000_000.0, 0.0, 0.0], 0.0, None),
        body("Destination", [0.0, 0.0, 0.0], 5_000.0, None),
    )
    .expect("valid plan")
}

#[test]
fn scenario_a_single_axis_plan() {
    let plan = scenario_a();
    let destination = plan.destination().position();

    assert_approx_eq!(distance(&plan.point_of_physics(), &destination), 5_000.0);
    for d in [plan.min_pullout_distance(), plan.optimal_pullout_distance()] {
        assert!(d > 5_000.0 && d < 1_000_000.0, "pullout distance {d}");
    }
    assert!(plan.has_full_coverage());
    assert_approx_eq!(plan.centerline_length(), 1_000_000.0);
    assert_eq!(plan.centerline(), [1_000_000.0, 0.0, 0.0]);
}

#[test]
fn scenario_b_optimal_point_is_on_target() {
    let plan = scenario_a();
    let route = plan.score(plan.optimal_pullout_point()).expect("outside grid");
    assert!(route.snare_cone_margin <= 0.0);
    assert_approx_eq!(route.vertical.magnitude, 0.0, 1e-6);
    assert_approx_eq!(route.lateral.magnitude, 0.0, 1e-6);
    assert_approx_eq!(route.along_centerline.magnitude, 0.0, 1e-6);
}

#[test]
fn scenario_c_destination_is_inside_grid() {
    let plan = scenario_a();
    let err = plan.score(plan.destination().position()).unwrap_err();
    assert!(matches!(err, ContainmentError::WithinPhysicsGrid { .. }));
}

#[test]
fn scenario_d_coincident_endpoints() {
    let err = SnarePlan::new(
        body("Here", [1.0, 2.0, 3.0], 0.0, None),
        body("Also here", [1.0, 2.0, 3.0], 10.0, None),
    )
    .unwrap_err();
    assert_eq!(err, PlanError::InvalidInput(GeometryError::DegenerateVector));
}

#[test]
fn planning_is_deterministic() {
    assert_eq!(scenario_a(), scenario_a());
}

fn assorted_plans() -> Vec<SnarePlan> {
    let pairs = vec![
        (
            body("Axis", [1_000_000.0, 0.0, 0.0], 0.0, None),
            body("Origin", [0.0, 0.0, 0.0], 5_000.0, None),
        ),
        (
            body("Above", [0.0, 0.0, 2_000_000.0], 0.0, Some(50_000.0)),
            body("Origin", [0.0, 0.0, 0.0], 10_000.0, None),
        ),
        (
            body("Wide", [1_000_000.0, 0.0, 0.0], 0.0, Some(100_000.0)),
            body("Big", [0.0, 0.0, 0.0], 500_000.0, None),
        ),
        (
            body(
                "Crusader",
                [-18_962_176_000.0, -2_664_960_000.0, 0.0],
                7_450_000.0,
                Some(10_000_000.0),
            ),
            body("Hurston", [12_850_457_093.0, 0.0, 0.0], 1_200_000.0, None),
        ),
        (
            body("Skewed", [-350_000.0, 820_000.0, 64_000.0], 0.0, Some(5_000.0)),
            body("Station", [1_250_000.0, -40_000.0, -12_500.0], 2_000.0, None),
        ),
    ];
    pairs
        .into_iter()
        .map(|(s, d)| SnarePlan::new(s, d).expect("valid plan"))
        .collect()
}

#[test]
fn optimal_pullout_lies_between_earliest_pullout_and_grid() {
    for plan in assorted_plans() {
        let grid = plan.destination().grid_radius;
        assert!(
            plan.optimal_pullout_distance() <= plan.min_pullout_distance() + 1e-6,
            "{:?}",
            plan.summary()
        );
        assert!(plan.optimal_pullout_distance() >= grid - 0.01, "{:?}", plan.summary());
    }
}

#[test]
fn coverage_matches_grid_entry_radius() {
    let plans = assorted_plans();
    assert!(plans.iter().any(|p| p.has_full_coverage()));
    assert!(plans.iter().any(|p| !p.has_full_coverage()));
    for plan in plans {
        let radius = line_distance(plan.hypotenuse(), &plan.point_of_physics());
        assert_eq!(plan.coverage() >= 1.0, radius <= SNARE_RADIUS, "{:?}", plan.summary());
    }
}

#[test]
fn catalog_json_to_bundle_to_plan() {
    let json = r#"[
        {"InternalName": "Stanton1", "ObjectContainer": "Hurston", "Type": "Planet",
         "System": "Stanton", "XCoord": 12850457093.0, "YCoord": 0.0, "ZCoord": 0.0,
         "GRIDRadius": 1200000.0, "OrbitalMarkerRadius": null},
        {"InternalName": "Stanton2", "ObjectContainer": "Crusader", "Type": "Planet",
         "System": "Stanton",
         "XCoord": -18962176000.0, "YCoord": -2664960000.0, "ZCoord": 0.0, "GRIDRadius": 7450000.0,
         "OrbitalMarkerRadius": 10000000.0},
        {"InternalName": "Stanton", "ObjectContainer": "Stanton", "Type": "Star",
         "System": "Stanton",
         "XCoord": 0.0, "YCoord": 0.0, "ZCoord": 0.0, "GRIDRadius": 0.0}
    ]"#;
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    file.write_all(json.as_bytes()).expect("write json");

    let catalog =
        LocationCatalog::from_json_file(file.path(), &CatalogFilter::default()).expect("catalog");
    assert_eq!(catalog.len(), 2);

    let dir = tempfile::tempdir().expect("temp dir");
    let bundle = dir.path().join("catalog.bin");
    write_catalog_to_file(&catalog, &bundle).expect("write bundle");
    let restored = read_catalog_from_file(&bundle).expect("read bundle");

    let plan = SnarePlan::new(
        restored.get("Crusader").expect("present").clone(),
        restored.get("Hurston").expect("present").clone(),
    )
    .expect("valid plan");
    let summary = plan.summary();
    assert_eq!(summary.source, "Crusader");
    assert_eq!(summary.destination, "Hurston");
    assert!(summary.full_coverage);
    assert_approx_eq!(summary.source_grid_radius, 7_450_000.0);
    assert!(summary.optimal_leeway > 0.0);
}
