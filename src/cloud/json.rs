//! JSON entry points for cloud job configurations.
//!
//! ```rust
//! use cloud_job_codec::cloud::json;
//! use cloud_job_codec::models::JobExecutionType;
//! use cloud_job_codec::CodecRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = CodecRegistry::default();
//! json::register(&registry)?;
//!
//! let config = json::from_json(
//!     &registry,
//!     r#"{"jobName":"test_job","jobClass":"com.example.TestJob","jobType":"SIMPLE",
//!         "cron":"0/30 * * * * ?","shardingTotalCount":10,
//!         "cpuCount":1.0,"memoryMB":128,"appURL":"http://x/app.jar",
//!         "bootstrapScript":"start.sh","jobExecutionType":"TRANSIENT"}"#,
//! )?;
//! assert_eq!(config.job_execution_type(), JobExecutionType::Transient);
//!
//! let text = json::to_json(&registry, &config)?;
//! assert_eq!(json::from_json(&registry, &text)?, config);
//! # Ok(())
//! # }
//! ```

use super::codec::CloudJobConfigurationExtension;
use crate::codec::CodecRegistry;
use crate::config::CodecConfig;
use crate::error::CodecResult;
use crate::models::CloudJobConfiguration;
use std::sync::Arc;

/// Install the cloud job codec. Fails if `registry` already has one.
pub fn register(registry: &CodecRegistry) -> CodecResult<()> {
    registry.register(CloudJobConfigurationExtension)
}

/// Build a registry with the cloud job codec installed, ready to be shared
pub fn init_registry(config: CodecConfig) -> CodecResult<Arc<CodecRegistry>> {
    config.validate()?;
    let registry = CodecRegistry::new(config);
    register(&registry)?;
    Ok(Arc::new(registry))
}

/// Encode `config` as JSON. The configuration is assumed valid.
pub fn to_json(registry: &CodecRegistry, config: &CloudJobConfiguration) -> CodecResult<String> {
    registry.to_json(config)
}

/// Decode and validate a cloud job configuration
pub fn from_json(registry: &CodecRegistry, json: &str) -> CodecResult<CloudJobConfiguration> {
    registry.from_json(json)
}
