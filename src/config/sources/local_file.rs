//! Working-directory config file source: `<work_dir>/copilot.toml`

use crate::config::LOCAL_CONFIG_FILE;
use config::builder::DefaultState;
use config::{ConfigBuilder, ConfigError, File};
use std::path::Path;

/// Add the local config file; a missing file is not an error.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    work_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = work_dir.join(LOCAL_CONFIG_FILE);
    Ok(builder.add_source(File::from(path).required(false)))
}
