use crate::extractor::WIDGET_TYPES;
use crate::schema::{InputGroups, NodeInputs};

/// Splits the declared inputs into widget inputs (primitive, edited inline)
/// and link inputs (typed connections to another node's output).
///
/// The canonical order is required first, then optional; both partitions
/// keep that relative order, and the original grouping is retained
/// untouched in `all`.
pub fn partition_inputs(groups: InputGroups) -> NodeInputs {
    let mut links = Vec::new();
    let mut widgets = Vec::new();

    for input in groups
        .required
        .iter()
        .chain(groups.optional.iter().flatten())
    {
        if WIDGET_TYPES.contains(&input.ty.as_str()) {
            widgets.push(input.clone());
        } else {
            links.push(input.clone());
        }
    }

    NodeInputs {
        all: groups,
        links,
        widgets,
    }
}
