mod backend;
mod io;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use io::atomic_write_str;
pub use paths::{BASE_DIR_ENV, ConfigError, RuidoPaths};

use once_cell::sync::OnceCell;

static PATHS: OnceCell<RuidoPaths> = OnceCell::new();
static CONFIG_BACKEND: OnceCell<TomlConfigBackend> = OnceCell::new();

/// Process-wide paths (portable or system), resolved on first use.
pub fn paths() -> Result<&'static RuidoPaths, ConfigError> {
  PATHS.get_or_try_init(RuidoPaths::detect)
}

/// Process-wide config backend over [`paths`].
pub fn config_backend() -> Result<&'static TomlConfigBackend, ConfigError> {
  CONFIG_BACKEND.get_or_try_init(|| paths().map(|p| TomlConfigBackend::new(p.clone())))
}
