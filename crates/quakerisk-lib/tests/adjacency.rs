use std::collections::BTreeMap;

use quakerisk_lib::{build_adjacency_index, RouteRecord};

const A1: i64 = 1;
const A2: i64 = 2;

fn tally(pairs: &[(i64, u32)]) -> BTreeMap<i64, u32> {
    pairs.iter().copied().collect()
}

#[test]
fn routes_add_one_unit_at_each_endpoint() {
    let routes = vec![
        RouteRecord::new(A1, 100, 200),
        RouteRecord::new(A1, 100, 300),
        RouteRecord::new(A2, 200, 300),
    ];
    let index = build_adjacency_index(&routes);

    assert_eq!(index.len(), 3);
    assert_eq!(index.airlines_at(100), Some(&tally(&[(A1, 2)])));
    assert_eq!(index.airlines_at(200), Some(&tally(&[(A1, 1), (A2, 1)])));
    assert_eq!(index.airlines_at(300), Some(&tally(&[(A1, 1), (A2, 1)])));
    assert_eq!(index.total_endpoints(), 6);
}

#[test]
fn rebuilding_from_reordered_routes_is_equal() {
    let routes = vec![
        RouteRecord::new(A1, 100, 200),
        RouteRecord::new(A2, 300, 100),
        RouteRecord::new(A1, 100, 300),
        RouteRecord::new(A2, 200, 300),
    ];
    let mut reversed = routes.clone();
    reversed.reverse();

    assert_eq!(build_adjacency_index(&routes), build_adjacency_index(&reversed));
    assert_eq!(build_adjacency_index(&routes), build_adjacency_index(&routes));
}

#[test]
fn airline_tallies_iterate_in_airline_order() {
    let routes = vec![
        RouteRecord::new(30, 1, 2),
        RouteRecord::new(10, 1, 2),
        RouteRecord::new(20, 1, 2),
    ];
    let index = build_adjacency_index(&routes);
    let airlines: Vec<i64> = index
        .airlines_at(1)
        .expect("airport 1 indexed")
        .keys()
        .copied()
        .collect();
    assert_eq!(airlines, vec![10, 20, 30]);
}
