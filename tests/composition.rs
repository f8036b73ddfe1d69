//! Crate-level tests combining path collection with canonical keys

use pathkey::{collect_paths, dedup, CanonicalKey, Value};
use std::collections::{BTreeMap, HashMap, HashSet};

fn key(value: impl Into<Value>) -> CanonicalKey {
    CanonicalKey::new(value).unwrap()
}

#[test]
fn test_dedup_collected_paths() {
    let graph: HashMap<u32, Vec<u32>> = HashMap::from([
        (1, vec![2, 3, 2]),
        (2, vec![4]),
        (3, vec![4]),
        (4, vec![4]),
    ]);
    let paths = collect_paths(&1, &graph);
    assert_eq!(paths, vec![vec![2, 4], vec![3, 4], vec![2, 4]]);

    let unique: HashSet<CanonicalKey> = paths
        .iter()
        .map(|path| key(Value::list(path.iter().map(|n| i64::from(*n)))))
        .collect();
    assert_eq!(unique.len(), 2);

    let mut sorted: Vec<CanonicalKey> = unique.into_iter().collect();
    sorted.sort();
    let restored: Vec<Value> = sorted.into_iter().map(CanonicalKey::into_inner).collect();
    assert_eq!(restored, vec![Value::list([2, 4]), Value::list([3, 4])]);
}

#[test]
fn test_canonical_keys_as_graph_nodes() {
    // Nodes are maps, which have no hash of their own
    let root = key(Value::map([("id", 1), ("kind", 0)]));
    let same_root = key(Value::map([("kind", 0), ("id", 1)]));
    let child = key(Value::map([("id", 2)]));
    let leaf = key(Value::map([("id", 3), ("tags", 0)]));

    let graph: HashMap<CanonicalKey, Vec<CanonicalKey>> = HashMap::from([
        (root.clone(), vec![child.clone(), root.clone()]),
        (child.clone(), vec![leaf.clone()]),
    ]);

    let paths = collect_paths(&same_root, &graph);
    assert_eq!(paths, vec![vec![child, leaf.clone()]]);
    assert_eq!(paths[0][1].restore(), leaf.restore());
}

#[test]
fn test_btreemap_adjacency_with_canonical_keys() {
    let a = key("a");
    let b = key(Value::list([1, 2]));
    let c = key(7);

    let mut graph = BTreeMap::new();
    graph.insert(a.clone(), vec![b.clone(), c.clone()]);
    graph.insert(b.clone(), vec![b.clone()]);

    assert_eq!(collect_paths(&a, &graph), vec![vec![b], vec![c]]);
}

#[test]
fn test_dedup_demo_values() {
    let values = [
        Value::map([("a", 1)]),
        Value::map([("a", 1)]),
        Value::map([("a", Value::map([("b", 1)]))]),
        Value::map([("a", "b")]),
    ];

    let first = dedup(values.clone()).unwrap();
    let second = dedup(values.clone()).unwrap();

    assert_eq!(first.len(), 3);
    assert_eq!(first, second, "order is deterministic within a process");

    let rendered: HashSet<String> = first.iter().map(Value::to_string).collect();
    assert!(rendered.contains("{'a': 1}"));
    assert!(rendered.contains("{'a': {'b': 1}}"));
    assert!(rendered.contains("{'a': 'b'}"));
}

#[test]
fn test_dedup_many_mixed_values() {
    let values: Vec<Value> = (0..400i64)
        .map(|i| match i % 5 {
            0 => Value::Int(i % 30),
            1 => Value::from(format!("node-{}", i % 12)),
            2 => Value::map([("k", i % 10)]),
            3 => Value::Float((i % 8) as f64 + 0.25),
            _ => Value::set([i % 4, i % 6]),
        })
        .chain([Value::None, Value::Float(f64::NAN)])
        .collect();

    let deduped = dedup(values.clone()).unwrap();
    let distinct: HashSet<CanonicalKey> = values.iter().cloned().map(key).collect();
    assert_eq!(deduped.len(), distinct.len());
    assert_eq!(deduped[0], Value::None);

    let keys: Vec<CanonicalKey> = deduped.into_iter().map(key).collect();
    for pair in keys.windows(2) {
        assert!(pair[0] < pair[1]);
    }

    let mut reversed = values;
    reversed.reverse();
    let again: Vec<CanonicalKey> = dedup(reversed).unwrap().into_iter().map(key).collect();
    assert_eq!(keys, again);
}
