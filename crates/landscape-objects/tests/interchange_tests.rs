use std::path::{Path, PathBuf};

use glam::Vec3;
use landscape_core::{LandscapeConfig, PlacementRecord};
use landscape_objects::document::{load_document, write_document};
use landscape_objects::frame::to_absolute;
use landscape_objects::obj::{load_objects, write_objects};
use landscape_objects::osm::{convert_features, parse_overpass};
use landscape_objects::pipeline::{self, InterchangeOptions, Landscape};
use landscape_objects::{FeatureKind, Projector, UtmProjection};

/// Lay out `<dir>/Landscapes/<name>/<name>.trn` with a one-tile header.
fn make_landscape(condor_dir: &Path, name: &str, easting: f32, northing: f32) -> PathBuf {
    let dir = condor_dir.join("Landscapes").join(name);
    std::fs::create_dir_all(&dir).unwrap();

    let mut header = Vec::new();
    header.extend_from_slice(&256i32.to_le_bytes());
    header.extend_from_slice(&256i32.to_le_bytes());
    for _ in 0..3 {
        header.extend_from_slice(&90.0f32.to_le_bytes());
    }
    header.extend_from_slice(&easting.to_le_bytes());
    header.extend_from_slice(&northing.to_le_bytes());
    header.extend_from_slice(&[33, 0, 0, 0, b'N', 0, 0, 0]);
    std::fs::write(dir.join(format!("{name}.trn")), header).unwrap();
    dir
}

fn config_for(condor_dir: &Path) -> LandscapeConfig {
    LandscapeConfig {
        condor_dir: condor_dir.to_path_buf(),
        ..Default::default()
    }
}

#[test]
fn test_transfer_between_landscapes() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_for(tmp.path());
    make_landscape(tmp.path(), "West", 460_800.0, 5_760_000.0);
    // shifted 10 km east and 5 km north; overlaps the east half of West
    make_landscape(tmp.path(), "East", 470_800.0, 5_765_000.0);

    let west = Landscape::open(&config, "West").unwrap();
    let records = vec![
        // overlap area
        PlacementRecord::new(Vec3::new(2_000.0, 8_000.0, 40.0), 1.0, 0.5, "Church.c3d"),
        // only in West
        PlacementRecord::new(Vec3::new(20_000.0, 1_000.0, 10.0), 1.0, 0.0, "Barn.c3d"),
    ];
    write_objects(&west.obj_path, &records).unwrap();

    let doc = tmp.path().join("west.json");
    let exported = pipeline::export_to(&west, &InterchangeOptions::default(), &doc).unwrap();
    assert_eq!(exported.len(), 2);

    let east = Landscape::open(&config, "East").unwrap();
    let written = pipeline::import(&east, &[&doc], &InterchangeOptions::default()).unwrap();
    assert_eq!(written, 1);

    let moved = load_objects(&east.obj_path).unwrap();
    assert_eq!(moved[0].name, "Church.c3d");
    assert_eq!(moved[0].position, Vec3::new(12_000.0, 3_000.0, 40.0));

    let before = to_absolute(&records[0], west.origin());
    let after = to_absolute(&moved[0], east.origin());
    assert_eq!((before.x, before.y), (after.x, after.y));
}

#[test]
fn test_power_line_import() {
    let projection = UtmProjection::new(33).unwrap();

    // five pylons running east, 500 m apart, plus a wind turbine
    let lat = 52.5;
    let lons: Vec<f64> = (0..5).map(|i| 13.40 + i as f64 * 0.0074).collect();
    let elements: Vec<String> = lons
        .iter()
        .enumerate()
        .map(|(i, lon)| {
            let id = i + 1;
            format!(
                r#"{{"type": "node", "id": {id}, "lat": {lat}, "lon": {lon},
                    "tags": {{"power": "tower"}}}}"#
            )
        })
        .collect();
    let power_json = format!(r#"{{"elements": [{}]}}"#, elements.join(","));
    let wind_json = r#"{"elements": [{"type": "node", "id": 99, "lat": 52.51, "lon": 13.42}]}"#;

    let config = LandscapeConfig::default();
    let mut objects = convert_features(
        &parse_overpass(&power_json).unwrap(),
        FeatureKind::PowerTower,
        &projection,
        &config,
    )
    .unwrap();
    objects.extend(
        convert_features(
            &parse_overpass(wind_json).unwrap(),
            FeatureKind::WindGenerator,
            &projection,
            &config,
        )
        .unwrap(),
    );
    assert_eq!(objects.len(), 6);

    // interior pylons follow the east-west line
    for obj in &objects[1..4] {
        let axis = obj.orientation.rem_euclid(std::f64::consts::PI);
        let error = axis.min(std::f64::consts::PI - axis);
        assert!(error < 0.05, "{} heading {}", obj.name, obj.orientation);
    }
    assert_eq!(objects[5].orientation, 0.0);

    // landscape whose SE corner lies just beyond the features
    let east_edge = projection.project(13.50, lat).unwrap().x.round() as f32;
    let south_edge = projection.project(13.40, 52.45).unwrap().y.round() as f32;
    let tmp = tempfile::tempdir().unwrap();
    let landscape_config = config_for(tmp.path());
    make_landscape(tmp.path(), "Berlin", east_edge, south_edge);

    let doc = tmp.path().join("osm.json");
    write_document(&doc, &objects).unwrap();
    assert_eq!(load_document(&doc).unwrap(), objects);

    let landscape = Landscape::open(&landscape_config, "Berlin").unwrap();
    pipeline::import(&landscape, &[&doc], &InterchangeOptions::default()).unwrap();

    let report = pipeline::view(&landscape, &InterchangeOptions::default()).unwrap();
    assert_eq!(report.in_region.total, 6);
    assert_eq!(report.in_region.by_name["Powertower.c3d"], 5);
    assert_eq!(report.in_region.by_name["Eolienne2.c3d"], 1);
}
