//! failsim-core: data model, status classification, and config loading
//! for the failover simulation tool.

pub mod config;
pub mod error;
pub mod types;

pub use config::{PollSettings, SimulationConfig, load_config, parse_duration};
pub use error::{ConfigError, ConfigResult};
pub use types::*;
