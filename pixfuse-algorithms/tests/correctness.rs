//! Scenario tests shared across all three algorithms.

use approx::assert_relative_eq;
use pixfuse_algorithms::{cluster, Algorithm};
use pixfuse_core::{ClusteringConfig, Error, HitData, HitStore};

const ALL: [Algorithm; 3] = [Algorithm::Grid, Algorithm::Streaming, Algorithm::Density];

fn scenario_config() -> ClusteringConfig {
    ClusteringConfig::new()
        .with_radius(5.0)
        .with_temporal_window(200.0)
        .with_min_cluster_size(1)
}

fn merge_pair() -> HitStore {
    [
        HitData::new(10, 10, 100, 50, 0, 0),
        HitData::new(10, 11, 150, 50, 0, 0),
    ]
    .into_iter()
    .collect()
}

#[test]
fn test_scenario_merge() {
    for algorithm in ALL {
        let clusters = cluster(&merge_pair(), &scenario_config(), algorithm).unwrap();

        assert_eq!(clusters.len(), 1, "{}", algorithm.name());
        let c = &clusters[0];
        assert_eq!(c.member_indices, vec![0, 1]);
        assert_eq!(c.size, 2);
        assert_relative_eq!(c.centroid_x, 10.0);
        assert_relative_eq!(c.centroid_y, 10.5);
        assert_eq!(c.total_tot, 100);
        assert_eq!(c.time_min, 100);
        assert_eq!(c.time_max, 150);
    }
}

#[test]
fn test_scenario_no_merge() {
    let mut store = merge_pair();
    store.push(HitData::new(200, 200, 900, 50, 0, 0));

    for algorithm in ALL {
        let clusters = cluster(&store, &scenario_config(), algorithm).unwrap();
        let mut sizes: Vec<usize> = clusters.iter().map(|c| c.size).collect();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![1, 2], "{}", algorithm.name());

        let far = clusters.iter().find(|c| c.size == 1).unwrap();
        assert_eq!(far.member_indices, vec![2]);
    }
}

#[test]
fn test_scenario_no_merge_with_threshold() {
    let mut store = merge_pair();
    store.push(HitData::new(200, 200, 900, 50, 0, 0));
    let config = scenario_config().with_min_cluster_size(2);

    for algorithm in ALL {
        let clusters = cluster(&store, &config, algorithm).unwrap();
        assert_eq!(clusters.len(), 1, "{}", algorithm.name());
        assert_eq!(clusters[0].member_indices, vec![0, 1]);
    }
}

#[test]
fn test_scenario_empty_input() {
    let store = HitStore::new();
    for algorithm in ALL {
        let clusters = cluster(&store, &scenario_config(), algorithm).unwrap();
        assert!(clusters.is_empty(), "{}", algorithm.name());
    }
}

#[test]
fn test_scenario_ordering_violation() {
    let store: HitStore = [
        HitData::new(0, 0, 100, 10, 0, 0),
        HitData::new(1, 0, 50, 10, 0, 0),
        HitData::new(2, 0, 200, 10, 0, 0),
    ]
    .into_iter()
    .collect();

    let result = cluster(&store, &scenario_config(), Algorithm::Streaming);
    assert!(matches!(
        result,
        Err(Error::UnsortedInput {
            index: 1,
            toa: 50,
            prev_toa: 100,
        })
    ));

    // The order-insensitive algorithms accept the same input.
    for algorithm in [Algorithm::Grid, Algorithm::Density] {
        assert!(cluster(&store, &scenario_config(), algorithm).is_ok());
    }
}

#[test]
fn test_columnar_ingestion_is_equivalent() {
    let records = merge_pair();
    let columns = HitStore::from_columns(
        &[10, 10],
        &[10, 11],
        &[100, 150],
        &[50, 50],
        &[0, 0],
        &[0, 0],
    )
    .unwrap();

    for algorithm in ALL {
        let from_records = cluster(&records, &scenario_config(), algorithm).unwrap();
        let from_columns = cluster(&columns, &scenario_config(), algorithm).unwrap();
        assert_eq!(from_records, from_columns, "{}", algorithm.name());
    }
}
