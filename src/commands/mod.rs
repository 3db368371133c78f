pub mod aggregate;
pub mod export;

use crate::config;
use anyhow::Result;
use std::path::Path;

pub fn validate_config(path: &Path) -> Result<()> {
    let tenant = config::load_config(path)?;
    println!(
        "tenant config OK: {} ({}) with {} section(s)",
        tenant.name,
        tenant.code,
        tenant.sections.len()
    );
    Ok(())
}
