//! Schema extraction for graph-node definition files.
//!
//! Reads a restricted dialect of Python declaring node classes and produces
//! a mapping from class name to the node's declared inputs, outputs and
//! category, for consumers that enrich a visual graph with ports and
//! widgets.

pub mod extractor;
pub mod schema;

pub use extractor::core::Extractor;
pub use extractor::error::ExtractError;
pub use schema::{InputGroups, NodeInfo, NodeInput, NodeInputs, NodeMap};
