//! `unitgen abi-types` and `unitgen tuples`

use std::path::Path;
use tracing::info;
use unitgen::*;

pub fn cmd_abi_types(dir: &Path) -> Result<()> {
    let paths = generate_abi_types(dir)?;
    info!(count = paths.len(), "generated ABI types");
    Ok(())
}

pub fn cmd_tuples(dir: &Path) -> Result<()> {
    let paths = generate_tuples(dir)?;
    info!(count = paths.len(), "generated tuples");
    Ok(())
}
