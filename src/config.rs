//! # Codec Configuration
//!
//! Settings for the job configuration codec, loaded from built-in defaults and
//! `CLOUD_JOB_CODEC_*` environment overrides.
//!
//! ```rust,no_run
//! use cloud_job_codec::config::CodecConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = CodecConfig::load()?;
//! println!("pretty output: {}", config.pretty_print);
//! # Ok(())
//! # }
//! ```

use crate::error::{CodecError, CodecResult};
use ::config::{Config, Environment};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Environment variable prefix for codec overrides
pub const ENV_PREFIX: &str = "CLOUD_JOB_CODEC";

/// Maximum accepted input size for decode (1MB)
pub const DEFAULT_MAX_INPUT_BYTES: usize = 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    /// Emit indented JSON on encode
    pub pretty_print: bool,
    /// Inputs longer than this are rejected before parsing
    pub max_input_bytes: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            pretty_print: false,
            max_input_bytes: DEFAULT_MAX_INPUT_BYTES,
        }
    }
}

impl CodecConfig {
    /// Load defaults overlaid with `CLOUD_JOB_CODEC_*` environment variables
    pub fn load() -> CodecResult<Self> {
        Self::load_with_prefix(ENV_PREFIX)
    }

    /// Load defaults overlaid with environment variables under an explicit prefix
    pub fn load_with_prefix(prefix: &str) -> CodecResult<Self> {
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("pretty_print", defaults.pretty_print)?
            .set_default("max_input_bytes", defaults.max_input_bytes as i64)?
            .add_source(Environment::with_prefix(prefix).try_parsing(true))
            .build()?;

        let config: CodecConfig = settings.try_deserialize()?;
        config.validate()?;

        debug!(
            prefix = prefix,
            pretty_print = config.pretty_print,
            max_input_bytes = config.max_input_bytes,
            "Codec configuration loaded"
        );
        Ok(config)
    }

    pub fn with_pretty_print(mut self, pretty_print: bool) -> Self {
        self.pretty_print = pretty_print;
        self
    }

    pub fn with_max_input_bytes(mut self, max_input_bytes: usize) -> Self {
        self.max_input_bytes = max_input_bytes;
        self
    }

    pub fn validate(&self) -> CodecResult<()> {
        if self.max_input_bytes == 0 {
            return Err(CodecError::Configuration(
                "max_input_bytes must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
