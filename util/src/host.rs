//! Host platform utility functions

use std::{env, path::PathBuf};

/// Name of the environment variable pointing at the software root directory.
pub const SW_ROOT_ENV_VAR: &str = "MOUSE_SW_ROOT";

/// Get the software root directory.
///
/// This is the value of `MOUSE_SW_ROOT` if set, otherwise the current working directory. The
/// simulator launches the executable from an arbitrary directory, so the variable is optional.
pub fn get_mouse_sw_root() -> std::io::Result<PathBuf> {
    match env::var_os(SW_ROOT_ENV_VAR) {
        Some(root) => Ok(PathBuf::from(root)),
        None => env::current_dir(),
    }
}
