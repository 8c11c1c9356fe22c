//! File resources and their metadata.

use std::sync::Arc;

use serde_json::Map;
use serde_json::Value;

pub mod error;
pub mod event;
pub mod metadata;
pub mod repository;

pub use error::INVALID_UID_CODE;
pub use error::ResourceError;
pub use metadata::MetaDataAspect;
pub use repository::InMemoryMetaDataRepository;
pub use repository::MetaDataRepository;

/// One metadata row, keyed by column name in insertion order.
pub type MetaData = Map<String, Value>;

/// Storage a file belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceStorage {
    pub uid: i64,
    pub name: String,
}

impl ResourceStorage {
    pub fn new(uid: i64, name: impl Into<String>) -> Self {
        Self {
            uid,
            name: name.into(),
        }
    }
}

/// An indexed file with its lazily loaded metadata.
pub struct File {
    properties: Map<String, Value>,
    storage: ResourceStorage,
    meta_data: MetaDataAspect,
}

impl File {
    /// `meta_data`, when not empty, is added to the aspect as already loaded.
    pub fn new(
        properties: Map<String, Value>,
        storage: ResourceStorage,
        repository: Arc<dyn MetaDataRepository>,
        meta_data: MetaData,
    ) -> Self {
        let uid = uid_of(&properties);
        let mut aspect = MetaDataAspect::new(uid, repository);
        if !meta_data.is_empty() {
            aspect.add(meta_data);
        }
        Self {
            properties,
            storage,
            meta_data: aspect,
        }
    }

    /// The `uid` property, or 0 when the file is not indexed.
    pub fn uid(&self) -> i64 {
        uid_of(&self.properties)
    }

    pub fn property(&self, key: &str) -> Option<&Value> {
        self.properties.get(key)
    }

    pub fn name(&self) -> Option<&str> {
        self.property("name").and_then(Value::as_str)
    }

    pub fn storage(&self) -> &ResourceStorage {
        &self.storage
    }

    pub fn meta_data(&self) -> &MetaDataAspect {
        &self.meta_data
    }

    pub fn meta_data_mut(&mut self) -> &mut MetaDataAspect {
        &mut self.meta_data
    }
}

fn uid_of(properties: &Map<String, Value>) -> i64 {
    match properties.get("uid") {
        Some(Value::Number(number)) => number.as_i64().unwrap_or(0),
        Some(Value::String(text)) => text.trim().parse().unwrap_or(0),
        _ => 0,
    }
}
