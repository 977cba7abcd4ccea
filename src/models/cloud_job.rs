//! Cloud job configuration: a job-type configuration plus the resources and
//! application bundle needed to launch it on the cluster.

use super::job_type::JobTypeConfiguration;
use crate::error::UnknownVariant;
use std::fmt;

/// How the cloud scheduler keeps the job's executor alive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JobExecutionType {
    /// Executor is launched per trigger and exits afterwards
    Transient,
    /// Executor stays resident between triggers
    Daemon,
}

impl JobExecutionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Transient => "TRANSIENT",
            Self::Daemon => "DAEMON",
        }
    }
}

impl fmt::Display for JobExecutionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for JobExecutionType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TRANSIENT" => Ok(Self::Transient),
            "DAEMON" => Ok(Self::Daemon),
            _ => Err(UnknownVariant {
                enum_name: "JobExecutionType",
                value: s.to_string(),
            }),
        }
    }
}

/// Bean lookup for jobs whose instance is managed by an application context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeanExecution {
    pub bean_name: String,
    pub application_context: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CloudJobConfiguration {
    type_config: JobTypeConfiguration,
    cpu_count: f64,
    memory_mb: f64,
    app_url: String,
    bootstrap_script: String,
    job_execution_type: JobExecutionType,
    bean: Option<BeanExecution>,
}

impl CloudJobConfiguration {
    /// Plain execution: the job class is instantiated directly.
    ///
    /// Values are not validated here; decoding is the validating path.
    pub fn new(
        type_config: JobTypeConfiguration,
        cpu_count: f64,
        memory_mb: f64,
        app_url: impl Into<String>,
        bootstrap_script: impl Into<String>,
        job_execution_type: JobExecutionType,
    ) -> Self {
        Self {
            type_config,
            cpu_count,
            memory_mb,
            app_url: app_url.into(),
            bootstrap_script: bootstrap_script.into(),
            job_execution_type,
            bean: None,
        }
    }

    /// Bean execution: the job instance is resolved by name from an application context
    #[allow(clippy::too_many_arguments)]
    pub fn with_bean(
        type_config: JobTypeConfiguration,
        cpu_count: f64,
        memory_mb: f64,
        app_url: impl Into<String>,
        bootstrap_script: impl Into<String>,
        job_execution_type: JobExecutionType,
        bean_name: impl Into<String>,
        application_context: impl Into<String>,
    ) -> Self {
        Self {
            bean: Some(BeanExecution {
                bean_name: bean_name.into(),
                application_context: application_context.into(),
            }),
            ..Self::new(
                type_config,
                cpu_count,
                memory_mb,
                app_url,
                bootstrap_script,
                job_execution_type,
            )
        }
    }

    pub fn type_config(&self) -> &JobTypeConfiguration {
        &self.type_config
    }

    pub fn job_name(&self) -> &str {
        &self.type_config.core().job_name
    }

    pub fn cpu_count(&self) -> f64 {
        self.cpu_count
    }

    pub fn memory_mb(&self) -> f64 {
        self.memory_mb
    }

    pub fn app_url(&self) -> &str {
        &self.app_url
    }

    pub fn bootstrap_script(&self) -> &str {
        &self.bootstrap_script
    }

    pub fn job_execution_type(&self) -> JobExecutionType {
        self.job_execution_type
    }

    pub fn bean(&self) -> Option<&BeanExecution> {
        self.bean.as_ref()
    }

    pub fn bean_name(&self) -> Option<&str> {
        self.bean.as_ref().map(|bean| bean.bean_name.as_str())
    }

    pub fn application_context(&self) -> Option<&str> {
        self.bean
            .as_ref()
            .map(|bean| bean.application_context.as_str())
    }
}
