//! Path resolution command

use std::path::Path;

use anyhow::{Context, Result};
use particle_bake::unique_path;

pub fn execute(path: &Path) -> Result<()> {
    let resolved = unique_path(path)
        .with_context(|| format!("Failed to resolve a free path for {}", path.display()))?;
    println!("{}", resolved.display());
    Ok(())
}
