//! # Job Configuration Codec Infrastructure
//!
//! ```text
//! codec
//! ├── cursor       (FieldReader / FieldWriter handed to hooks)
//! ├── extension    (JobConfigExtension hook contract)
//! ├── job_config   (JobConfigCodec: scan loop + common job fields)
//! └── registry     (CodecRegistry: entity type -> codec)
//! ```

pub mod cursor;
pub mod extension;
pub mod job_config;
pub mod registry;

pub use cursor::{FieldReader, FieldWriter};
pub use extension::JobConfigExtension;
pub use job_config::JobConfigCodec;
pub use registry::{CodecRegistry, EntityCodec};
