//! Property tests for the analysis pipeline invariants.

use proptest::prelude::*;

use quakerisk_lib::{
    build_adjacency_index, build_exposure_report, resolve_affected_airports, AffectedAirport,
    AirlineLookup, AirportRecord, EarthquakeRecord, FixedMultiplierBuffer, ImpactModel,
    MagnitudeScaledCircle, RouteRecord,
};

fn route_strategy() -> impl Strategy<Value = RouteRecord> {
    (0i64..8, 0i64..20, 0i64..20)
        .prop_map(|(airline, src, dest)| RouteRecord::new(airline, src, dest))
}

fn matched_ids<M: ImpactModel>(
    quakes: &[EarthquakeRecord],
    airports: &[AirportRecord],
    model: &M,
) -> Vec<i64> {
    resolve_affected_airports(quakes, airports, model)
        .into_iter()
        .map(|a| a.airport_id)
        .collect()
}

fn airports_around(
    center_lon: f64,
    center_lat: f64,
    offsets: &[(f64, f64)],
) -> Vec<AirportRecord> {
    offsets
        .iter()
        .enumerate()
        .map(|(i, (dlon, dlat))| {
            AirportRecord::new(i as i64, center_lon + dlon, center_lat + dlat)
        })
        .collect()
}

proptest! {
    #[test]
    fn adjacency_counts_sum_to_twice_the_routes(routes in prop::collection::vec(route_strategy(), 0..64)) {
        let index = build_adjacency_index(&routes);
        prop_assert_eq!(index.total_endpoints(), 2 * routes.len() as u64);
    }

    #[test]
    fn adjacency_ignores_route_order(
        routes in prop::collection::vec(route_strategy(), 0..64).prop_shuffle()
    ) {
        let mut sorted = routes.clone();
        sorted.sort_by_key(|r| (r.airline_id, r.source_airport_id, r.destination_airport_id));
        prop_assert_eq!(build_adjacency_index(&routes), build_adjacency_index(&sorted));
    }

    #[test]
    fn larger_magnitude_never_loses_airports(
        center_lon in -170.0f64..170.0,
        center_lat in -60.0f64..60.0,
        magnitude in 3.0f64..7.0,
        growth in 0.5f64..2.0,
        offsets in prop::collection::vec((-3.0f64..3.0, -3.0f64..3.0), 1..40),
    ) {
        let airports = airports_around(center_lon, center_lat, &offsets);
        let small = vec![EarthquakeRecord::new(center_lon, center_lat, magnitude)];
        let large = vec![EarthquakeRecord::new(center_lon, center_lat, magnitude + growth)];

        let circle = MagnitudeScaledCircle::default();
        let before = matched_ids(&small, &airports, &circle);
        let after = matched_ids(&large, &airports, &circle);
        prop_assert!(before.iter().all(|id| after.contains(id)));

        let buffer = FixedMultiplierBuffer::default();
        let before = matched_ids(&small, &airports, &buffer);
        let after = matched_ids(&large, &airports, &buffer);
        prop_assert!(before.iter().all(|id| after.contains(id)));
    }

    #[test]
    fn report_conserves_adjacency_counts(
        routes in prop::collection::vec(route_strategy(), 0..64),
        affected_ids in prop::collection::btree_set(0i64..25, 0..10),
    ) {
        let index = build_adjacency_index(&routes);
        let affected: Vec<AffectedAirport> = affected_ids
            .iter()
            .map(|&id| AffectedAirport {
                airport_id: id,
                longitude: 0.0,
                latitude: 0.0,
                exposure_count: 1,
            })
            .collect();
        let report = build_exposure_report(&index, &affected, &AirlineLookup::new());

        let expected: u64 = affected_ids.iter().map(|&id| index.total_at(id)).sum();
        prop_assert_eq!(report.total_affected_routes(), expected);
    }
}
