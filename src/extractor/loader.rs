use anyhow::{Result, Context as AnyhowContext};
use std::fs;

pub fn load_source_from_file(file_path: &str) -> Result<String> {
    fs::read_to_string(file_path)
        .with_context(|| format!("Failed to read node definition source from {}", file_path))
}
