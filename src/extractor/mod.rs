pub mod classify;
pub mod core;
pub mod error;
pub mod loader;
pub mod preprocess;

// 方言约定的标识符

/// Method whose return value declares the input schema.
pub const SCHEMA_METHOD: &str = "INPUT_TYPES";
/// Class attribute holding the tuple of output type names.
pub const OUTPUT_ATTR: &str = "RETURN_TYPES";
/// Class attribute holding the category string.
pub const CATEGORY_ATTR: &str = "CATEGORY";

/// Primitive type names rendered as inline widgets; everything else is a
/// typed link to another node's output.
pub const WIDGET_TYPES: [&str; 4] = ["FLOAT", "INT", "STRING", "BOOLEAN"];
