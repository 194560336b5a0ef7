// Copyright 2025 Cowboy AI, LLC.

//! Write the OpenAPI document to `openapi.json`, or to the path given as the first argument

use anyhow::Context;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    let path = std::env::args_os()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("openapi.json"));

    let document = serde_json::to_string_pretty(&cattery::openapi::document())?;
    std::fs::write(&path, document).with_context(|| format!("write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}
