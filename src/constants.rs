//! # Wire Field Names
//!
//! JSON field names shared by the generic job configuration codec and the
//! cloud extension. Names are camelCase to stay compatible with configurations
//! already stored by the scheduler.

/// Common job fields owned by the generic codec
pub mod job {
    pub const JOB_NAME: &str = "jobName";
    pub const JOB_CLASS: &str = "jobClass";
    pub const JOB_TYPE: &str = "jobType";
    pub const CRON: &str = "cron";
    pub const SHARDING_TOTAL_COUNT: &str = "shardingTotalCount";
    pub const SHARDING_ITEM_PARAMETERS: &str = "shardingItemParameters";
    pub const JOB_PARAMETER: &str = "jobParameter";
    pub const FAILOVER: &str = "failover";
    pub const MISFIRE: &str = "misfire";
    pub const DESCRIPTION: &str = "description";
    pub const JOB_PROPERTIES: &str = "jobProperties";
    pub const STREAMING_PROCESS: &str = "streamingProcess";
    pub const SCRIPT_COMMAND_LINE: &str = "scriptCommandLine";

    /// Every field name the generic codec consumes itself
    pub const ALL: &[&str] = &[
        JOB_NAME,
        JOB_CLASS,
        JOB_TYPE,
        CRON,
        SHARDING_TOTAL_COUNT,
        SHARDING_ITEM_PARAMETERS,
        JOB_PARAMETER,
        FAILOVER,
        MISFIRE,
        DESCRIPTION,
        JOB_PROPERTIES,
        STREAMING_PROCESS,
        SCRIPT_COMMAND_LINE,
    ];
}

/// Extension fields recognized by the cloud job codec
pub mod cloud {
    pub const CPU_COUNT: &str = "cpuCount";
    pub const MEMORY_MB: &str = "memoryMB";
    pub const APP_URL: &str = "appURL";
    pub const BOOTSTRAP_SCRIPT: &str = "bootstrapScript";
    pub const JOB_EXECUTION_TYPE: &str = "jobExecutionType";
    pub const BEAN_NAME: &str = "beanName";
    pub const APPLICATION_CONTEXT: &str = "applicationContext";
}

/// Resource floors enforced when decoding cloud job configurations
pub mod limits {
    pub const MIN_CPU_COUNT: f64 = 0.01;
    pub const MIN_MEMORY_MB: f64 = 16.0;
}
