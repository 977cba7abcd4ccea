//! # Cloud Job Configuration Codec
//!
//! Extension of the generic job configuration codec for
//! [`CloudJobConfiguration`]. It buffers the cloud-specific fields while the
//! object is scanned, validates them once the scan is complete, and chooses
//! between plain and bean execution depending on which optional fields were
//! supplied.

use crate::codec::{FieldReader, FieldWriter, JobConfigExtension};
use crate::constants::cloud;
use crate::constants::limits::{MIN_CPU_COUNT, MIN_MEMORY_MB};
use crate::error::{CodecError, CodecResult};
use crate::models::{CloudJobConfiguration, JobExecutionType, JobTypeConfiguration};
use serde::de::MapAccess;
use serde::ser::{self, SerializeMap};
use tracing::{debug, trace};

/// Decode buffer: one slot per recognized cloud field
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CloudJobFieldBuffer {
    pub cpu_count: Option<f64>,
    pub memory_mb: Option<f64>,
    pub app_url: Option<String>,
    pub bootstrap_script: Option<String>,
    pub job_execution_type: Option<String>,
    pub bean_name: Option<String>,
    pub application_context: Option<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CloudJobConfigurationExtension;

impl JobConfigExtension for CloudJobConfigurationExtension {
    type Entity = CloudJobConfiguration;
    type Buffer = CloudJobFieldBuffer;

    fn recognize_field<'de, A>(
        &self,
        name: &str,
        reader: FieldReader<'_, A>,
        buffer: &mut Self::Buffer,
    ) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        match name {
            cloud::CPU_COUNT => buffer.cpu_count = reader.next_f64()?,
            cloud::MEMORY_MB => buffer.memory_mb = reader.next_f64()?,
            cloud::APP_URL => buffer.app_url = reader.next_string()?,
            cloud::BOOTSTRAP_SCRIPT => buffer.bootstrap_script = reader.next_string()?,
            cloud::JOB_EXECUTION_TYPE => buffer.job_execution_type = reader.next_string()?,
            cloud::BEAN_NAME => buffer.bean_name = reader.next_string()?,
            cloud::APPLICATION_CONTEXT => buffer.application_context = reader.next_string()?,
            _ => {
                trace!(field = name, "Skipping unrecognized field");
                reader.skip_value()?;
            }
        }
        Ok(())
    }

    fn build_entity(
        &self,
        type_config: JobTypeConfiguration,
        buffer: Self::Buffer,
    ) -> CodecResult<Self::Entity> {
        let cpu_count = buffer
            .cpu_count
            .ok_or_else(|| CodecError::missing(cloud::CPU_COUNT, "cpuCount cannot be null."))?;
        if cpu_count.is_nan() || cpu_count < MIN_CPU_COUNT {
            return Err(CodecError::invalid(
                cloud::CPU_COUNT,
                cpu_count,
                "cpuCount cannot be less than 0.01",
            ));
        }

        let memory_mb = buffer
            .memory_mb
            .ok_or_else(|| CodecError::missing(cloud::MEMORY_MB, "memoryMB cannot be null."))?;
        if memory_mb.is_nan() || memory_mb < MIN_MEMORY_MB {
            return Err(CodecError::invalid(
                cloud::MEMORY_MB,
                memory_mb,
                "memory cannot be less than 16",
            ));
        }

        let app_url = buffer
            .app_url
            .ok_or_else(|| CodecError::missing(cloud::APP_URL, "appURL cannot be null."))?;
        let bootstrap_script = buffer.bootstrap_script.ok_or_else(|| {
            CodecError::missing(cloud::BOOTSTRAP_SCRIPT, "bootstrapScript cannot be null.")
        })?;
        let job_execution_type = buffer.job_execution_type.ok_or_else(|| {
            CodecError::missing(cloud::JOB_EXECUTION_TYPE, "jobExecutionType cannot be null.")
        })?;
        let job_execution_type = job_execution_type
            .parse::<JobExecutionType>()
            .map_err(|e| CodecError::invalid(cloud::JOB_EXECUTION_TYPE, &e.value, e.to_string()))?;

        match (buffer.bean_name, buffer.application_context) {
            (Some(bean_name), Some(application_context)) => Ok(CloudJobConfiguration::with_bean(
                type_config,
                cpu_count,
                memory_mb,
                app_url,
                bootstrap_script,
                job_execution_type,
                bean_name,
                application_context,
            )),
            (bean_name, application_context) => {
                // A lone half of the pair is ignored rather than rejected
                if bean_name.is_some() || application_context.is_some() {
                    debug!(
                        job_name = %type_config.core().job_name,
                        has_bean_name = bean_name.is_some(),
                        has_application_context = application_context.is_some(),
                        "Incomplete bean execution fields, using plain execution"
                    );
                }
                Ok(CloudJobConfiguration::new(
                    type_config,
                    cpu_count,
                    memory_mb,
                    app_url,
                    bootstrap_script,
                    job_execution_type,
                ))
            }
        }
    }

    fn type_config<'e>(&self, entity: &'e Self::Entity) -> &'e JobTypeConfiguration {
        entity.type_config()
    }

    fn write_extensions<M>(
        &self,
        writer: &mut FieldWriter<'_, M>,
        entity: &Self::Entity,
    ) -> Result<(), M::Error>
    where
        M: SerializeMap,
    {
        // JSON has no spelling for NaN or infinity
        for (name, value) in [
            (cloud::CPU_COUNT, entity.cpu_count()),
            (cloud::MEMORY_MB, entity.memory_mb()),
        ] {
            if !value.is_finite() {
                return Err(ser::Error::custom(format_args!(
                    "{name} must be a finite number, got {value}"
                )));
            }
        }

        writer
            .field(cloud::CPU_COUNT, &entity.cpu_count())?
            .field(cloud::MEMORY_MB, &entity.memory_mb())?
            .field(cloud::APP_URL, entity.app_url())?
            .field(cloud::BOOTSTRAP_SCRIPT, entity.bootstrap_script())?
            .field(cloud::JOB_EXECUTION_TYPE, entity.job_execution_type().as_str())?
            .field(cloud::BEAN_NAME, &entity.bean_name())?
            .field(cloud::APPLICATION_CONTEXT, &entity.application_context())?;
        Ok(())
    }
}
