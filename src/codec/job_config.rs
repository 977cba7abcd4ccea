//! # Generic Job Configuration Codec
//!
//! Streams a JSON object field by field, decodes the common job fields into a
//! [`JobTypeConfiguration`] and delegates every other field to a
//! [`JobConfigExtension`]. Encoding writes the common fields in a fixed order
//! followed by the extension's fields.
//!
//! ```text
//! decode: Start -> ScanningFields* -> Validating -> Succeeded | Failed
//! ```
//!
//! Scanning only fails on malformed input. Every validation failure happens
//! after the whole object has been buffered.

use super::cursor::{FieldReader, FieldWriter};
use super::extension::JobConfigExtension;
use crate::config::CodecConfig;
use crate::constants::job;
use crate::error::{CodecError, CodecResult};
use crate::models::{JobCoreConfiguration, JobProperties, JobType, JobTypeConfiguration};
use serde::de::{MapAccess, Visitor};
use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;
use std::fmt;
use tracing::{debug, warn};

pub struct JobConfigCodec<X> {
    extension: X,
    config: CodecConfig,
}

impl<X> JobConfigCodec<X>
where
    X: JobConfigExtension,
{
    pub fn new(extension: X) -> Self {
        Self::with_config(extension, CodecConfig::default())
    }

    pub fn with_config(extension: X, config: CodecConfig) -> Self {
        Self { extension, config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Encode `entity` as a JSON object. No validation is applied.
    pub fn encode(&self, entity: &X::Entity) -> CodecResult<String> {
        let document = EncodedJobConfig {
            extension: &self.extension,
            entity,
        };
        let json = if self.config.pretty_print {
            serde_json::to_string_pretty(&document)
        } else {
            serde_json::to_string(&document)
        }
        .map_err(|e| CodecError::Serialization(e.to_string()))?;

        debug!(
            job_name = %self.extension.type_config(entity).core().job_name,
            bytes = json.len(),
            "Encoded job configuration"
        );
        Ok(json)
    }

    /// Decode and validate a JSON object into the extension's entity
    pub fn decode(&self, json: &str) -> CodecResult<X::Entity> {
        if json.len() > self.config.max_input_bytes {
            return Err(CodecError::InputTooLarge {
                size: json.len(),
                max: self.config.max_input_bytes,
            });
        }

        let mut deserializer = serde_json::Deserializer::from_str(json);
        let visitor = FieldScanVisitor {
            extension: &self.extension,
        };
        let (common, buffer) = serde::Deserializer::deserialize_map(&mut deserializer, visitor)
            .map_err(|e| CodecError::MalformedInput(e.to_string()))?;
        deserializer
            .end()
            .map_err(|e| CodecError::MalformedInput(e.to_string()))?;

        let result = common
            .into_type_config()
            .and_then(|type_config| self.extension.build_entity(type_config, buffer));

        match &result {
            Ok(entity) => debug!(
                job_name = %self.extension.type_config(entity).core().job_name,
                "Decoded job configuration"
            ),
            Err(error) => warn!(
                field = error.field().unwrap_or_default(),
                error = %error,
                "Job configuration failed validation"
            ),
        }
        result
    }
}

/// Buffered values of the common job fields
#[derive(Debug, Default)]
struct CommonFieldBuffer {
    job_name: Option<String>,
    job_class: Option<String>,
    job_type: Option<String>,
    cron: Option<String>,
    sharding_total_count: Option<i32>,
    sharding_item_parameters: Option<String>,
    job_parameter: Option<String>,
    failover: Option<bool>,
    misfire: Option<bool>,
    description: Option<String>,
    job_properties: Option<JobProperties>,
    streaming_process: Option<bool>,
    script_command_line: Option<String>,
}

impl CommonFieldBuffer {
    fn owns(name: &str) -> bool {
        job::ALL.contains(&name)
    }

    fn read_field<'de, A>(&mut self, name: &str, reader: FieldReader<'_, A>) -> Result<(), A::Error>
    where
        A: MapAccess<'de>,
    {
        match name {
            job::JOB_NAME => self.job_name = reader.next_string()?,
            job::JOB_CLASS => self.job_class = reader.next_string()?,
            job::JOB_TYPE => self.job_type = reader.next_string()?,
            job::CRON => self.cron = reader.next_string()?,
            job::SHARDING_TOTAL_COUNT => self.sharding_total_count = reader.next_i32()?,
            job::SHARDING_ITEM_PARAMETERS => self.sharding_item_parameters = reader.next_string()?,
            job::JOB_PARAMETER => self.job_parameter = reader.next_string()?,
            job::FAILOVER => self.failover = reader.next_value()?,
            job::MISFIRE => self.misfire = reader.next_value()?,
            job::DESCRIPTION => self.description = reader.next_string()?,
            job::JOB_PROPERTIES => self.job_properties = reader.next_value()?,
            job::STREAMING_PROCESS => self.streaming_process = reader.next_value()?,
            job::SCRIPT_COMMAND_LINE => self.script_command_line = reader.next_string()?,
            _ => reader.skip_value()?,
        }
        Ok(())
    }

    fn into_type_config(self) -> CodecResult<JobTypeConfiguration> {
        let job_name = non_empty(self.job_name)
            .ok_or_else(|| CodecError::missing(job::JOB_NAME, "jobName can not be empty."))?;
        let cron = non_empty(self.cron)
            .ok_or_else(|| CodecError::missing(job::CRON, "cron can not be empty."))?;
        let sharding_total_count = self.sharding_total_count.ok_or_else(|| {
            CodecError::missing(
                job::SHARDING_TOTAL_COUNT,
                "shardingTotalCount should larger than zero.",
            )
        })?;
        if sharding_total_count <= 0 {
            return Err(CodecError::invalid(
                job::SHARDING_TOTAL_COUNT,
                sharding_total_count,
                "shardingTotalCount should larger than zero.",
            ));
        }

        let job_type = self
            .job_type
            .ok_or_else(|| CodecError::missing(job::JOB_TYPE, "jobType cannot be null."))?;
        let job_type = job_type
            .parse::<JobType>()
            .map_err(|e| CodecError::invalid(job::JOB_TYPE, &e.value, e.to_string()))?;

        let core = JobCoreConfiguration {
            job_name,
            cron,
            sharding_total_count,
            sharding_item_parameters: self.sharding_item_parameters.unwrap_or_default(),
            job_parameter: self.job_parameter.unwrap_or_default(),
            failover: self.failover.unwrap_or(false),
            misfire: self.misfire.unwrap_or(true),
            description: self.description.unwrap_or_default(),
            job_properties: self.job_properties.unwrap_or_default(),
        };

        let type_config = match job_type {
            JobType::Simple => JobTypeConfiguration::Simple {
                core,
                job_class: require_job_class(self.job_class)?,
            },
            JobType::Dataflow => JobTypeConfiguration::Dataflow {
                core,
                job_class: require_job_class(self.job_class)?,
                streaming_process: self.streaming_process.unwrap_or(false),
            },
            JobType::Script => JobTypeConfiguration::Script {
                core,
                script_command_line: self.script_command_line.unwrap_or_default(),
            },
        };
        Ok(type_config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

fn require_job_class(job_class: Option<String>) -> CodecResult<String> {
    non_empty(job_class)
        .ok_or_else(|| CodecError::missing(job::JOB_CLASS, "jobClass cannot be empty."))
}

struct FieldScanVisitor<'c, X> {
    extension: &'c X,
}

impl<'de, X> Visitor<'de> for FieldScanVisitor<'_, X>
where
    X: JobConfigExtension,
{
    type Value = (CommonFieldBuffer, X::Buffer);

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a job configuration object")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut common = CommonFieldBuffer::default();
        let mut buffer = X::Buffer::default();

        while let Some(name) = map.next_key::<String>()? {
            let reader = FieldReader::new(&mut map);
            if CommonFieldBuffer::owns(&name) {
                common.read_field(&name, reader)?;
            } else {
                self.extension.recognize_field(&name, reader, &mut buffer)?;
            }
        }
        Ok((common, buffer))
    }
}

struct EncodedJobConfig<'c, X: JobConfigExtension> {
    extension: &'c X,
    entity: &'c X::Entity,
}

impl<X> Serialize for EncodedJobConfig<'_, X>
where
    X: JobConfigExtension,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(None)?;
        let mut writer = FieldWriter::new(&mut map);
        write_common_fields(&mut writer, self.extension.type_config(self.entity))?;
        self.extension.write_extensions(&mut writer, self.entity)?;
        map.end()
    }
}

fn write_common_fields<M>(
    writer: &mut FieldWriter<'_, M>,
    type_config: &JobTypeConfiguration,
) -> Result<(), M::Error>
where
    M: SerializeMap,
{
    let core = type_config.core();
    writer.field(job::JOB_NAME, &core.job_name)?;
    if let Some(job_class) = type_config.job_class() {
        writer.field(job::JOB_CLASS, job_class)?;
    }
    writer
        .field(job::JOB_TYPE, type_config.job_type().as_str())?
        .field(job::CRON, &core.cron)?
        .field(job::SHARDING_TOTAL_COUNT, &core.sharding_total_count)?
        .field(job::SHARDING_ITEM_PARAMETERS, &core.sharding_item_parameters)?
        .field(job::JOB_PARAMETER, &core.job_parameter)?
        .field(job::FAILOVER, &core.failover)?
        .field(job::MISFIRE, &core.misfire)?
        .field(job::DESCRIPTION, &core.description)?
        .field(job::JOB_PROPERTIES, &core.job_properties)?;

    match type_config {
        JobTypeConfiguration::Dataflow {
            streaming_process, ..
        } => {
            writer.field(job::STREAMING_PROCESS, streaming_process)?;
        }
        JobTypeConfiguration::Script {
            script_command_line,
            ..
        } => {
            writer.field(job::SCRIPT_COMMAND_LINE, script_command_line)?;
        }
        JobTypeConfiguration::Simple { .. } => {}
    }
    Ok(())
}
