#![allow(clippy::missing_errors_doc)] // Allow public functions without # Errors sections
#![allow(clippy::must_use_candidate)] // Allow methods without must_use when context is clear

//! # Cloud Job Codec
//!
//! Typed JSON codec for cloud job configurations.
//!
//! ## Overview
//!
//! A cloud job configuration is an ordinary job configuration (name, cron,
//! sharding, job type) extended with the resources and application bundle the
//! cloud scheduler needs to launch it. This crate converts those
//! configurations to and from JSON, validating them on the way in.
//!
//! ## Architecture
//!
//! A generic [`codec::JobConfigCodec`] owns the field scan loop and the common
//! job fields. Concrete configuration types plug into it through the
//! [`codec::JobConfigExtension`] hooks: recognize a field, build the entity,
//! write the extension fields. [`cloud::CloudJobConfigurationExtension`] is the
//! extension for [`models::CloudJobConfiguration`].
//!
//! Codecs live in an explicit [`CodecRegistry`] created at startup and shared
//! with every call site; there is no global codec state.
//!
//! ## Module Organization
//!
//! - [`models`] - Job type and cloud job configuration entities
//! - [`codec`] - Field cursors, extension contract, generic codec, registry
//! - [`cloud`] - Cloud job codec extension and JSON entry points
//! - [`config`] - Codec settings
//! - [`error`] - Structured error handling
//! - [`logging`] - Tracing subscriber setup
//!
//! ## Quick Start
//!
//! ```rust
//! use cloud_job_codec::cloud::json;
//! use cloud_job_codec::models::{
//!     CloudJobConfiguration, JobCoreConfiguration, JobExecutionType, JobTypeConfiguration,
//! };
//! use cloud_job_codec::CodecConfig;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = json::init_registry(CodecConfig::default())?;
//!
//! let config = CloudJobConfiguration::with_bean(
//!     JobTypeConfiguration::Simple {
//!         core: JobCoreConfiguration::new("order_sync", "0/30 * * * * ?", 3),
//!         job_class: "com.example.OrderSyncJob".to_string(),
//!     },
//!     1.0,
//!     128.0,
//!     "http://repo/order-sync.jar",
//!     "bin/start.sh",
//!     JobExecutionType::Daemon,
//!     "orderSyncJob",
//!     "classpath:context.xml",
//! );
//!
//! let text = json::to_json(&registry, &config)?;
//! assert_eq!(json::from_json(&registry, &text)?, config);
//! # Ok(())
//! # }
//! ```

pub mod cloud;
pub mod codec;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod models;

pub use codec::{CodecRegistry, EntityCodec, JobConfigCodec, JobConfigExtension};
pub use config::CodecConfig;
pub use error::{CodecError, CodecResult, UnknownVariant};
pub use models::{
    BeanExecution, CloudJobConfiguration, JobCoreConfiguration, JobExecutionType, JobProperties,
    JobType, JobTypeConfiguration,
};
