use fedclient_results::*;
use serde_json::json;

fn keyed<const N: usize>(entries: [(&str, Fragment); N]) -> Fragment {
    Fragment::Keyed(
        entries
            .into_iter()
            .map(|(key, value)| KeyedEntry {
                key: key.to_string(),
                value,
            })
            .collect(),
    )
}

#[test]
fn test_nested_object_and_list() {
    let fragment = render_tree(&json!({"x": [1, {"y": "z"}]}), 0, &TreeLimits::default()).unwrap();
    let expected = keyed([(
        "X",
        Fragment::List(vec![
            Fragment::Leaf("1".into()),
            keyed([("Y", Fragment::Leaf("z".into()))]),
        ]),
    )]);
    assert_eq!(fragment, expected);
}

#[test]
fn test_scalars_become_leaves() {
    let limits = TreeLimits::default();
    assert_eq!(render_tree(&json!(null), 0, &limits).unwrap(), Fragment::Leaf("".into()));
    assert_eq!(render_tree(&json!(true), 0, &limits).unwrap(), Fragment::Leaf("true".into()));
    assert_eq!(render_tree(&json!("relu"), 0, &limits).unwrap(), Fragment::Leaf("relu".into()));
    assert_eq!(render_tree(&json!(784), 0, &limits).unwrap(), Fragment::Leaf("784".into()));
}

#[test]
fn test_keys_keep_source_order() {
    let fragment = render_tree(
        &json!({"zeta": 1, "alpha": 2, "mid": 3}),
        0,
        &TreeLimits::default(),
    )
    .unwrap();
    let Fragment::Keyed(entries) = fragment else {
        panic!("object must render as keyed block");
    };
    let keys: Vec<_> = entries.iter().map(|e| e.key.as_str()).collect();
    assert_eq!(keys, vec!["Zeta", "Alpha", "Mid"]);
}

#[test]
fn test_depth_ceiling_is_enforced() {
    let mut value = json!("leaf");
    for _ in 0..10 {
        value = json!([value]);
    }
    let shallow = TreeLimits { max_depth: 4 };
    assert_eq!(
        render_tree(&value, 0, &shallow),
        Err(ResultsError::TooDeep { limit: 4 })
    );
    assert!(render_tree(&value, 0, &TreeLimits { max_depth: 10 }).is_ok());
}

#[test]
fn test_flattened_lines() {
    let fragment = render_tree(
        &json!({"optimizer": "sgd", "layers": [784, {"units": 10}]}),
        0,
        &TreeLimits::default(),
    )
    .unwrap();
    let lines: Vec<String> = fragment.lines().iter().map(ToString::to_string).collect();
    assert_eq!(
        lines,
        vec![
            "Optimizer: sgd",
            "Layers:",
            "  1. 784",
            "  2.",
            "    Units: 10",
        ]
    );
}

#[test]
fn test_float_leaves_match_table_formatting() {
    let fragment = render_tree(&json!({"lr": 1.0, "drop": 0.0, "decay": 0.25}), 0, &TreeLimits::default()).unwrap();
    let lines: Vec<String> = fragment.lines().iter().map(ToString::to_string).collect();
    assert_eq!(lines, vec!["Lr: 1", "Drop: 0", "Decay: 0.25"]);
    assert_eq!(format_value(1.0), "1");
}
