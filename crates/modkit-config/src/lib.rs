//! # modkit-config
//!
//! Configuration for the modkit module build orchestrator.
//!
//! Settings are layered with `figment`: CLI overrides > `MODKIT_*` environment
//! variables > config file (`modkit.toml` or the `modkit` field of
//! `package.json`) > defaults.
//!
//! ```
//! use modkit_config::ModkitConfig;
//! use std::path::PathBuf;
//!
//! let config = ModkitConfig::default();
//! assert_eq!(config.module_dir, PathBuf::from("modules"));
//! assert_eq!(config.build_dir, PathBuf::from("build"));
//! assert_eq!(config.module_entry, "lib.js");
//! config.validate().unwrap();
//! ```

pub mod config;
pub mod discovery;
pub mod error;
pub mod loading;
pub mod validation;

pub use config::*;
pub use discovery::ConfigDiscovery;
pub use error::{ConfigError, Result};
pub use loading::{ConfigOverrides, ENV_PREFIX};
