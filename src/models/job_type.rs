//! Common job-type configuration shared by every concrete job configuration.
//!
//! These values are produced and consumed by the generic codec; concrete
//! configurations such as the cloud job configuration carry them unchanged.

use crate::error::UnknownVariant;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of job the scheduler runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobType {
    Simple,
    Dataflow,
    Script,
}

impl JobType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "SIMPLE",
            Self::Dataflow => "DATAFLOW",
            Self::Script => "SCRIPT",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SIMPLE" => Ok(Self::Simple),
            "DATAFLOW" => Ok(Self::Dataflow),
            "SCRIPT" => Ok(Self::Script),
            _ => Err(UnknownVariant {
                enum_name: "JobType",
                value: s.to_string(),
            }),
        }
    }
}

/// Pluggable handler overrides, keyed on the wire by snake_case names
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobProperties {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_exception_handler: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub executor_service_handler: Option<String>,
}

impl JobProperties {
    pub fn is_empty(&self) -> bool {
        self.job_exception_handler.is_none() && self.executor_service_handler.is_none()
    }
}

/// Scheduling attributes common to all job types
#[derive(Debug, Clone, PartialEq)]
pub struct JobCoreConfiguration {
    pub job_name: String,
    pub cron: String,
    pub sharding_total_count: i32,
    pub sharding_item_parameters: String,
    pub job_parameter: String,
    pub failover: bool,
    pub misfire: bool,
    pub description: String,
    pub job_properties: JobProperties,
}

impl JobCoreConfiguration {
    /// Create a core configuration with default flags (no failover, misfire enabled)
    pub fn new(job_name: impl Into<String>, cron: impl Into<String>, sharding_total_count: i32) -> Self {
        Self {
            job_name: job_name.into(),
            cron: cron.into(),
            sharding_total_count,
            sharding_item_parameters: String::new(),
            job_parameter: String::new(),
            failover: false,
            misfire: true,
            description: String::new(),
            job_properties: JobProperties::default(),
        }
    }

    pub fn with_sharding_item_parameters(mut self, parameters: impl Into<String>) -> Self {
        self.sharding_item_parameters = parameters.into();
        self
    }

    pub fn with_job_parameter(mut self, parameter: impl Into<String>) -> Self {
        self.job_parameter = parameter.into();
        self
    }

    pub fn with_failover(mut self, failover: bool) -> Self {
        self.failover = failover;
        self
    }

    pub fn with_misfire(mut self, misfire: bool) -> Self {
        self.misfire = misfire;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_job_properties(mut self, job_properties: JobProperties) -> Self {
        self.job_properties = job_properties;
        self
    }
}

/// Core configuration plus the attributes specific to one job type
#[derive(Debug, Clone, PartialEq)]
pub enum JobTypeConfiguration {
    Simple {
        core: JobCoreConfiguration,
        job_class: String,
    },
    Dataflow {
        core: JobCoreConfiguration,
        job_class: String,
        streaming_process: bool,
    },
    Script {
        core: JobCoreConfiguration,
        script_command_line: String,
    },
}

impl JobTypeConfiguration {
    pub fn job_type(&self) -> JobType {
        match self {
            Self::Simple { .. } => JobType::Simple,
            Self::Dataflow { .. } => JobType::Dataflow,
            Self::Script { .. } => JobType::Script,
        }
    }

    pub fn core(&self) -> &JobCoreConfiguration {
        match self {
            Self::Simple { core, .. } | Self::Dataflow { core, .. } | Self::Script { core, .. } => {
                core
            }
        }
    }

    /// Implementation class, absent for script jobs
    pub fn job_class(&self) -> Option<&str> {
        match self {
            Self::Simple { job_class, .. } | Self::Dataflow { job_class, .. } => Some(job_class),
            Self::Script { .. } => None,
        }
    }
}
