//! # Job Configuration Models
//!
//! - [`job_type`]: configuration common to every job (core scheduling attributes and job type)
//! - [`cloud_job`]: the cloud job configuration built on top of it

pub mod cloud_job;
pub mod job_type;

pub use cloud_job::{BeanExecution, CloudJobConfiguration, JobExecutionType};
pub use job_type::{JobCoreConfiguration, JobProperties, JobType, JobTypeConfiguration};
