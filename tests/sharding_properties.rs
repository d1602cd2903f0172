use harvest_matrix::{JobRecord, MatrixEncoding, MaxJobs, VersionMap, shard, shard_with_encoding};
use proptest::prelude::*;
use proptest::test_runner::Config;
use std::collections::BTreeMap;

/// Maps in arbitrary insertion order; the first occurrence of a key wins
fn version_maps() -> impl Strategy<Value = VersionMap> {
    prop::collection::vec(
        ("[a-z0-9_-]{1,12}", "https://[a-z]{1,10}\\.org/[a-z0-9/._{}-]{0,20}"),
        0..300,
    )
    .prop_map(|entries| {
        let mut map = VersionMap::new();
        for (id, url) in entries {
            map.entry(id).or_insert(url);
        }
        map
    })
}

proptest! {
    #![proptest_config(Config::with_cases(128))]
    #[test]
    fn group_count_is_min_of_limit_and_size(map in version_maps(), max_jobs in 1usize..300) {
        let matrix = shard(&map, MaxJobs::new(max_jobs).unwrap()).unwrap();
        prop_assert_eq!(matrix.len(), max_jobs.min(map.len()));
    }

    #[test]
    fn every_entry_appears_exactly_once(map in version_maps(), max_jobs in 1usize..300) {
        let matrix = shard(&map, MaxJobs::new(max_jobs).unwrap()).unwrap();

        let mut decoded = BTreeMap::new();
        for record in matrix.records(MatrixEncoding::Legacy).unwrap().into_iter().flatten() {
            prop_assert!(decoded.insert(record.id, record.url).is_none());
        }
        let expected: BTreeMap<String, String> = map
            .iter()
            .map(|(id, url)| (id.clone(), MatrixEncoding::Legacy.wire_value(url).into_owned()))
            .collect();
        prop_assert_eq!(decoded, expected);
        prop_assert_eq!(
            matrix.verify_against(&map, MatrixEncoding::Legacy).unwrap(),
            map.len()
        );
    }

    #[test]
    fn group_sizes_differ_by_at_most_one(map in version_maps(), max_jobs in 1usize..300) {
        let matrix = shard(&map, MaxJobs::new(max_jobs).unwrap()).unwrap();
        let sizes: Vec<usize> = matrix
            .records(MatrixEncoding::Legacy)
            .unwrap()
            .iter()
            .map(Vec::len)
            .collect();

        if let (Some(max), Some(min)) = (sizes.iter().max(), sizes.iter().min()) {
            prop_assert!(max - min <= 1);
            prop_assert!(*min >= 1);
        }
    }

    #[test]
    fn groups_are_reversed_contiguous_runs(map in version_maps(), max_jobs in 1usize..300) {
        let matrix = shard(&map, MaxJobs::new(max_jobs).unwrap()).unwrap();

        let mut ids: Vec<String> = Vec::new();
        for group in matrix.records(MatrixEncoding::Legacy).unwrap() {
            ids.extend(group.into_iter().rev().map(|record| record.id));
        }
        let original: Vec<String> = map.keys().cloned().collect();
        prop_assert_eq!(ids, original);
    }

    #[test]
    fn encodings_agree_on_records(map in version_maps(), max_jobs in 1usize..300) {
        let max_jobs = MaxJobs::new(max_jobs).unwrap();
        let legacy = shard_with_encoding(&map, max_jobs, MatrixEncoding::Legacy).unwrap();
        let array = shard_with_encoding(&map, max_jobs, MatrixEncoding::JsonArray).unwrap();

        let repaired: Vec<Vec<JobRecord>> = array
            .records(MatrixEncoding::JsonArray)
            .unwrap()
            .into_iter()
            .map(|group| {
                group
                    .into_iter()
                    .map(|record| {
                        let url = MatrixEncoding::Legacy.wire_value(&record.url).into_owned();
                        JobRecord::new(record.id, url)
                    })
                    .collect()
            })
            .collect();
        prop_assert_eq!(legacy.records(MatrixEncoding::Legacy).unwrap(), repaired);
    }
}

#[test]
fn empty_map_yields_empty_include() {
    let matrix = shard(&VersionMap::new(), MaxJobs::new(256).unwrap()).unwrap();
    assert_eq!(serde_json::to_string(&matrix).unwrap(), r#"{"include":[]}"#);
}

#[test]
fn three_entries_two_jobs() {
    let map: VersionMap = [("a", "http://x"), ("b", "http://y"), ("c", "http://z")]
        .into_iter()
        .map(|(id, url)| (id.to_string(), url.to_string()))
        .collect();

    let matrix = shard(&map, MaxJobs::new(2).unwrap()).unwrap();
    assert_eq!(matrix.len(), 2);

    for group in &matrix.include {
        for fragment in group.data.split(' ') {
            let value: serde_json::Value = serde_json::from_str(fragment).unwrap();
            assert!(value["id"].is_string());
            assert!(value["url"].is_string());
        }
    }
    assert_eq!(matrix.record_count(MatrixEncoding::Legacy).unwrap(), 3);
}
