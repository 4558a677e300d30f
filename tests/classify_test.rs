use indexmap::IndexMap;
use nodescan::extractor::classify::partition_inputs;
use nodescan::schema::{InputGroups, NodeInput};

fn input(name: &str, ty: &str) -> NodeInput {
    NodeInput {
        name: name.to_string(),
        ty: ty.to_string(),
        options: IndexMap::new(),
    }
}

#[test]
fn test_primitive_types_become_widgets() {
    let groups = InputGroups {
        required: vec![
            input("scale", "FLOAT"),
            input("steps", "INT"),
            input("prompt", "STRING"),
            input("enabled", "BOOLEAN"),
        ],
        optional: None,
    };

    let inputs = partition_inputs(groups);
    assert!(inputs.links.is_empty());
    assert_eq!(inputs.widgets.len(), 4);
}

#[test]
fn test_unknown_types_become_links() {
    let groups = InputGroups {
        required: vec![
            input("image", "IMAGE"),
            input("conditioning", "CONDITIONING"),
            // The vocabulary is exact: lowercase is not a widget type
            input("odd_one", "float"),
        ],
        optional: None,
    };

    let inputs = partition_inputs(groups);
    assert_eq!(inputs.links.len(), 3);
    assert!(inputs.widgets.is_empty());
}

#[test]
fn test_partition_preserves_canonical_order() {
    let groups = InputGroups {
        required: vec![input("model", "MODEL"), input("seed", "INT")],
        optional: Some(vec![input("mask", "MASK"), input("denoise", "FLOAT")]),
    };

    let inputs = partition_inputs(groups);

    let link_names: Vec<&str> = inputs.links.iter().map(|i| i.name.as_str()).collect();
    let widget_names: Vec<&str> = inputs.widgets.iter().map(|i| i.name.as_str()).collect();
    assert_eq!(link_names, vec!["model", "mask"]);
    assert_eq!(widget_names, vec!["seed", "denoise"]);

    // Nothing duplicated, nothing dropped
    assert_eq!(
        inputs.links.len() + inputs.widgets.len(),
        inputs.all.required.len() + inputs.all.optional.as_ref().map_or(0, Vec::len)
    );

    // The declared grouping survives untouched
    assert_eq!(inputs.all.required[0].name, "model");
    assert_eq!(inputs.all.optional.as_ref().unwrap()[1].name, "denoise");
}

#[test]
fn test_empty_groups_partition_to_empty() {
    let inputs = partition_inputs(InputGroups::default());
    assert!(inputs.links.is_empty());
    assert!(inputs.widgets.is_empty());
    assert!(inputs.all.required.is_empty());
    assert!(inputs.all.optional.is_none());
}
