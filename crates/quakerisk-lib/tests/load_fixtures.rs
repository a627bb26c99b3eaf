//! Loader tests against the checked-in fixture files.

mod common;

use std::io::Cursor;

use quakerisk_lib::{
    load_airlines, load_airports, load_earthquakes, load_routes, read_airlines, read_airports,
    DatasetPaths, Error, RouteRecord,
};

use common::{fixtures_dir, FRANKFURT, HANEDA, NARITA};

#[test]
fn routes_with_unparsable_ids_are_discarded() {
    let routes = load_routes(&fixtures_dir().join("routes.csv")).expect("routes load");
    assert_eq!(routes.len(), 7);
    assert_eq!(routes[0], RouteRecord::new(324, HANEDA, NARITA));
}

#[test]
fn airports_keep_rows_with_numeric_coordinates() {
    let airports = load_airports(&fixtures_dir().join("airports.csv")).expect("airports load");
    // the `n/a` longitude row is dropped; the duplicate id row is kept for the resolver
    assert_eq!(airports.len(), 5);
    assert_eq!(airports[0].id, HANEDA);
    assert_eq!(airports[0].name, "Tokyo Haneda International Airport");
    assert_eq!(airports[0].city, "Tokyo");
    assert!(airports.iter().any(|a| a.id == FRANKFURT));
    assert!(airports.iter().all(|a| a.id != 9998));
}

#[test]
fn airline_lookup_preserves_raw_alias() {
    let airlines = load_airlines(&fixtures_dir().join("airlines.csv")).expect("airlines load");
    assert_eq!(airlines.len(), 3);
    let jal = airlines.get(2987).expect("JAL present");
    assert_eq!(jal.alias, "\\N");
    assert_eq!(jal.display_alias(), "-");
    assert_eq!(airlines.get(324).map(|a| a.display_alias()), Some("ANA"));
}

#[test]
fn earthquake_feed_keeps_missing_magnitudes() {
    let quakes =
        load_earthquakes(&fixtures_dir().join("earthquakes.geojson")).expect("feed loads");
    assert_eq!(quakes.len(), 5);
    assert_eq!(quakes[0].magnitude, Some(6.0));
    assert_eq!(quakes[0].title, "M 6.0 - near Tokyo Bay, Japan");
    assert_eq!(quakes[3].magnitude, None);
}

#[test]
fn missing_file_reports_its_path() {
    let paths = DatasetPaths::in_dir(&fixtures_dir().join("does-not-exist"));
    let err = load_routes(&paths.routes).expect_err("missing file");
    match err {
        Error::InputNotFound { path } => assert!(path.ends_with("routes.csv")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn airport_file_without_coordinates_is_rejected() {
    let csv = "airport_id,airport_name\n1,Somewhere\n";
    let err = read_airports(Cursor::new(csv)).expect_err("missing lng/lat");
    assert!(matches!(err, Error::DataValidation { source_name: "airport", .. }));
}

#[test]
fn later_airline_rows_replace_earlier_ones() {
    let csv = "airline_id,name,alias\n5,Old Name,ON\n5,New Name,NN\nxx,Bad Row,BR\n";
    let airlines = read_airlines(Cursor::new(csv)).expect("airlines parse");
    assert_eq!(airlines.len(), 1);
    assert_eq!(airlines.get(5).map(|a| a.name.as_str()), Some("New Name"));
}
