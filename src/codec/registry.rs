//! # Codec Registry
//!
//! Explicit registry mapping an entity type to the codec that encodes and
//! decodes it. The registry is created once at process start, populated with
//! [`CodecRegistry::register`], and then shared (usually behind an `Arc`) with
//! every call site that needs to convert configurations.
//!
//! ## Usage
//!
//! ```rust
//! use cloud_job_codec::cloud::CloudJobConfigurationExtension;
//! use cloud_job_codec::models::CloudJobConfiguration;
//! use cloud_job_codec::CodecRegistry;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let registry = CodecRegistry::default();
//! registry.register(CloudJobConfigurationExtension)?;
//! assert!(registry.is_registered::<CloudJobConfiguration>());
//!
//! // A second registration for the same entity type is rejected
//! assert!(registry.register(CloudJobConfigurationExtension).is_err());
//! # Ok(())
//! # }
//! ```

use super::extension::JobConfigExtension;
use super::job_config::JobConfigCodec;
use crate::config::CodecConfig;
use crate::error::{CodecError, CodecResult};
use parking_lot::RwLock;
use std::any::{type_name, Any, TypeId};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{info, warn};

/// Type-erased view of a codec for one entity type
pub trait EntityCodec<E>: Send + Sync {
    fn encode(&self, entity: &E) -> CodecResult<String>;

    fn decode(&self, json: &str) -> CodecResult<E>;
}

impl<X> EntityCodec<X::Entity> for JobConfigCodec<X>
where
    X: JobConfigExtension,
{
    fn encode(&self, entity: &X::Entity) -> CodecResult<String> {
        JobConfigCodec::encode(self, entity)
    }

    fn decode(&self, json: &str) -> CodecResult<X::Entity> {
        JobConfigCodec::decode(self, json)
    }
}

/// Holds an `Arc<dyn EntityCodec<E>>` for the entity type it is keyed under
type ErasedCodec = Box<dyn Any + Send + Sync>;

pub struct CodecRegistry {
    config: CodecConfig,
    codecs: RwLock<HashMap<TypeId, ErasedCodec>>,
}

impl Default for CodecRegistry {
    fn default() -> Self {
        Self::new(CodecConfig::default())
    }
}

impl CodecRegistry {
    /// Create an empty registry; codecs registered through it inherit `config`
    pub fn new(config: CodecConfig) -> Self {
        Self {
            config,
            codecs: RwLock::new(HashMap::new()),
        }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Register a job configuration codec built from `extension`
    pub fn register<X>(&self, extension: X) -> CodecResult<()>
    where
        X: JobConfigExtension,
    {
        self.register_codec::<X::Entity, _>(JobConfigCodec::with_config(
            extension,
            self.config.clone(),
        ))
    }

    /// Register an arbitrary codec for `E`. Fails if `E` already has one.
    pub fn register_codec<E, C>(&self, codec: C) -> CodecResult<()>
    where
        E: 'static,
        C: EntityCodec<E> + 'static,
    {
        let type_name = type_name::<E>();
        let mut codecs = self.codecs.write();
        match codecs.entry(TypeId::of::<E>()) {
            Entry::Occupied(_) => {
                warn!(entity = type_name, "Rejected duplicate codec registration");
                Err(CodecError::AlreadyRegistered {
                    type_name: type_name.to_string(),
                })
            }
            Entry::Vacant(slot) => {
                let codec: Arc<dyn EntityCodec<E>> = Arc::new(codec);
                slot.insert(Box::new(codec));
                info!(entity = type_name, "Registered codec");
                Ok(())
            }
        }
    }

    pub fn is_registered<E: 'static>(&self) -> bool {
        self.codecs.read().contains_key(&TypeId::of::<E>())
    }

    /// Look up the codec registered for `E`
    pub fn codec<E: 'static>(&self) -> CodecResult<Arc<dyn EntityCodec<E>>> {
        self.codecs
            .read()
            .get(&TypeId::of::<E>())
            .and_then(|codec| codec.downcast_ref::<Arc<dyn EntityCodec<E>>>())
            .cloned()
            .ok_or_else(|| CodecError::NotRegistered {
                type_name: type_name::<E>().to_string(),
            })
    }

    pub fn to_json<E: 'static>(&self, entity: &E) -> CodecResult<String> {
        self.codec::<E>()?.encode(entity)
    }

    pub fn from_json<E: 'static>(&self, json: &str) -> CodecResult<E> {
        self.codec::<E>()?.decode(json)
    }

    pub fn len(&self) -> usize {
        self.codecs.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.codecs.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Codec for a bare string that wraps it in a JSON string literal
    struct QuotedCodec;

    impl EntityCodec<String> for QuotedCodec {
        fn encode(&self, entity: &String) -> CodecResult<String> {
            serde_json::to_string(entity).map_err(|e| CodecError::Serialization(e.to_string()))
        }

        fn decode(&self, json: &str) -> CodecResult<String> {
            serde_json::from_str(json).map_err(|e| CodecError::MalformedInput(e.to_string()))
        }
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = CodecRegistry::default();
        assert!(registry.is_empty());
        assert!(!registry.is_registered::<String>());

        registry.register_codec::<String, _>(QuotedCodec).unwrap();
        assert_eq!(registry.len(), 1);
        assert!(registry.is_registered::<String>());

        let json = registry.to_json(&"hello".to_string()).unwrap();
        assert_eq!(json, "\"hello\"");
        assert_eq!(registry.from_json::<String>(&json).unwrap(), "hello");
    }

    #[test]
    fn test_duplicate_registration_is_rejected() {
        let registry = CodecRegistry::default();
        registry.register_codec::<String, _>(QuotedCodec).unwrap();

        let err = registry.register_codec::<String, _>(QuotedCodec).unwrap_err();
        assert!(matches!(err, CodecError::AlreadyRegistered { .. }));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_lookup_without_registration_fails() {
        let registry = CodecRegistry::default();
        let err = registry.from_json::<String>("\"x\"").unwrap_err();
        assert!(matches!(
            err,
            CodecError::NotRegistered { ref type_name } if type_name.contains("String")
        ));
    }

    #[test]
    fn test_registry_is_shareable_across_threads() {
        let registry = Arc::new(CodecRegistry::default());
        registry.register_codec::<String, _>(QuotedCodec).unwrap();

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let registry = Arc::clone(&registry);
                std::thread::spawn(move || registry.to_json(&format!("worker-{i}")).unwrap())
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            assert_eq!(handle.join().unwrap(), format!("\"worker-{i}\""));
        }
    }
}
