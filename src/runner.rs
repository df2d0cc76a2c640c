use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::error::{Error, Result};

/// Run `<program> -c <config>` and wait for it, inheriting stdio.
///
/// # Errors
///
/// [`Error::BuildoutSpawn`] if `program` cannot be started, [`Error::Buildout`] if it exits
/// unsuccessfully.
pub fn run_buildout(program: &str, config: &Path) -> Result<()> {
    info!(program, config = %config.display(), "running buildout");

    let status = Command::new(program)
        .arg("-c")
        .arg(config)
        .status()
        .map_err(|source| Error::BuildoutSpawn {
            program: program.to_owned(),
            source,
        })?;

    if !status.success() {
        return Err(Error::Buildout {
            program: program.to_owned(),
            status,
        });
    }

    Ok(())
}
