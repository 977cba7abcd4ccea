//! Extension contract between the generic job configuration codec and a
//! concrete configuration type.
//!
//! The generic codec owns the scan loop and the common job fields. For every
//! field name it does not own it calls [`JobConfigExtension::recognize_field`];
//! once the input is exhausted it hands the common [`JobTypeConfiguration`] and
//! the extension's buffer to [`JobConfigExtension::build_entity`]. Encoding
//! writes the common fields first and then calls
//! [`JobConfigExtension::write_extensions`].

use super::cursor::{FieldReader, FieldWriter};
use crate::error::CodecResult;
use crate::models::JobTypeConfiguration;
use serde::de::MapAccess;
use serde::ser::SerializeMap;

pub trait JobConfigExtension: Send + Sync + 'static {
    /// Configuration type produced by decode and consumed by encode
    type Entity: 'static;

    /// Per-decode storage for extension field values awaiting validation
    type Buffer: Default;

    /// Store the value of `name` into `buffer`, or skip it if the name is not recognized.
    ///
    /// Scanning must not fail on content; only parser errors are returned here.
    fn recognize_field<'de, A>(
        &self,
        name: &str,
        reader: FieldReader<'_, A>,
        buffer: &mut Self::Buffer,
    ) -> Result<(), A::Error>
    where
        A: MapAccess<'de>;

    /// Validate the buffered values and construct the entity
    fn build_entity(
        &self,
        type_config: JobTypeConfiguration,
        buffer: Self::Buffer,
    ) -> CodecResult<Self::Entity>;

    /// Common configuration carried by `entity`, written before the extension fields
    fn type_config<'e>(&self, entity: &'e Self::Entity) -> &'e JobTypeConfiguration;

    /// Append the extension fields of `entity`
    fn write_extensions<M>(
        &self,
        writer: &mut FieldWriter<'_, M>,
        entity: &Self::Entity,
    ) -> Result<(), M::Error>
    where
        M: SerializeMap;
}
