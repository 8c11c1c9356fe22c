use std::collections::HashMap;
use std::sync::Arc;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;

use chrono::Utc;
use log::debug;
use serde_json::Value;
use serde_json::json;

use crate::dispatcher::EventDispatcher;
use crate::dispatcher::EventDispatcherExt;
use crate::resource::MetaData;
use crate::resource::error::ResourceError;
use crate::resource::event::AfterFileMetaDataCreatedEvent;
use crate::resource::event::AfterFileMetaDataDeletedEvent;
use crate::resource::event::AfterFileMetaDataUpdatedEvent;
use crate::resource::event::EnrichFileMetaDataEvent;

/// Storage of metadata rows, one row per file.
#[cfg_attr(test, mockall::automock)]
pub trait MetaDataRepository: Send + Sync {
    /// The metadata row of `file_uid`, or an empty map when none exists.
    fn find_by_file_uid(&self, file_uid: i64) -> Result<MetaData, ResourceError>;

    /// Inserts a row for `file_uid` and returns the stored record.
    ///
    /// Fails with [`ResourceError::MetaDataExists`] when the file already has a
    /// row; the stored row is left untouched.
    fn create_meta_data_record(
        &self,
        file_uid: i64,
        additional_fields: &MetaData,
    ) -> Result<MetaData, ResourceError>;

    /// Writes the known fields of `data` to the row of `file_uid`.
    fn update(&self, file_uid: i64, data: &MetaData) -> Result<(), ResourceError>;

    fn remove_by_file_uid(&self, file_uid: i64) -> Result<(), ResourceError>;
}

type Clock = Box<dyn Fn() -> i64 + Send + Sync>;

/// [`MetaDataRepository`] keeping rows in memory.
///
/// Only the configured table fields are stored besides the system fields
/// (`uid`, `file`, `pid`, `crdate`, `tstamp`, `l10n_diffsource`). Reads and
/// writes are reported through the event dispatcher.
pub struct InMemoryMetaDataRepository {
    table_fields: Vec<String>,
    rows: RwLock<HashMap<i64, MetaData>>,
    next_uid: AtomicI64,
    dispatcher: Arc<dyn EventDispatcher>,
    clock: Clock,
}

impl InMemoryMetaDataRepository {
    pub fn new<I, S>(table_fields: I, dispatcher: Arc<dyn EventDispatcher>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table_fields: table_fields.into_iter().map(Into::into).collect(),
            rows: RwLock::new(HashMap::new()),
            next_uid: AtomicI64::new(1),
            dispatcher,
            clock: Box::new(|| Utc::now().timestamp()),
        }
    }

    /// Replaces the clock used for `crdate` / `tstamp` (unix seconds).
    pub fn with_clock<F>(mut self, clock: F) -> Self
    where
        F: Fn() -> i64 + Send + Sync + 'static,
    {
        self.clock = Box::new(clock);
        self
    }

    fn is_table_field(&self, field: &str) -> bool {
        self.table_fields.iter().any(|known| known == field)
    }

    fn known_fields(&self, data: &MetaData) -> MetaData {
        data.iter()
            .filter(|(field, _)| self.is_table_field(field))
            .map(|(field, value)| (field.clone(), value.clone()))
            .collect()
    }

    fn stored_row(&self, file_uid: i64) -> Option<MetaData> {
        self.rows
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&file_uid)
            .cloned()
    }
}

fn row_uid(row: &MetaData) -> i64 {
    row.get("uid").and_then(Value::as_i64).unwrap_or(0)
}

impl MetaDataRepository for InMemoryMetaDataRepository {
    fn find_by_file_uid(&self, file_uid: i64) -> Result<MetaData, ResourceError> {
        if file_uid <= 0 {
            return Err(ResourceError::InvalidUid { uid: file_uid });
        }

        let Some(record) = self.stored_row(file_uid) else {
            return Ok(MetaData::new());
        };

        let event = self.dispatcher.dispatch_event(EnrichFileMetaDataEvent {
            file_uid,
            meta_data_uid: row_uid(&record),
            record,
        })?;
        Ok(event.record)
    }

    fn create_meta_data_record(
        &self,
        file_uid: i64,
        additional_fields: &MetaData,
    ) -> Result<MetaData, ResourceError> {
        let now = (self.clock)();
        let mut record = MetaData::new();
        record.insert("file".to_string(), json!(file_uid));
        record.insert("pid".to_string(), json!(0));
        record.insert("crdate".to_string(), json!(now));
        record.insert("tstamp".to_string(), json!(now));
        record.insert("l10n_diffsource".to_string(), json!(""));
        record.extend(self.known_fields(additional_fields));

        let uid = {
            let mut rows = self.rows.write().unwrap_or_else(PoisonError::into_inner);
            if rows.contains_key(&file_uid) {
                return Err(ResourceError::MetaDataExists { file_uid });
            }
            let uid = self.next_uid.fetch_add(1, Ordering::SeqCst);
            record.insert("uid".to_string(), json!(uid));
            rows.insert(file_uid, record.clone());
            uid
        };
        debug!("Created metadata record {uid} for file {file_uid}");

        let event = self.dispatcher.dispatch_event(AfterFileMetaDataCreatedEvent {
            file_uid,
            meta_data_uid: uid,
            record,
        })?;
        Ok(event.record)
    }

    fn update(&self, file_uid: i64, data: &MetaData) -> Result<(), ResourceError> {
        let mut changes = self.known_fields(data);
        changes.remove("uid");

        let row = self.find_by_file_uid(file_uid)?;
        if changes.is_empty() {
            return Ok(());
        }
        if row.is_empty() {
            return Err(ResourceError::MetaDataNotFound { file_uid });
        }
        changes.insert("tstamp".to_string(), json!((self.clock)()));

        if let Some(stored) = self
            .rows
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_mut(&file_uid)
        {
            stored.extend(changes.clone());
        }
        debug!("Updated metadata of file {file_uid}");

        let mut record = row;
        record.extend(changes);
        self.dispatcher.dispatch_event(AfterFileMetaDataUpdatedEvent {
            file_uid,
            meta_data_uid: row_uid(&record),
            record,
        })?;
        Ok(())
    }

    fn remove_by_file_uid(&self, file_uid: i64) -> Result<(), ResourceError> {
        self.rows
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&file_uid);
        debug!("Removed metadata of file {file_uid}");

        self.dispatcher
            .dispatch_event(AfterFileMetaDataDeletedEvent { file_uid })?;
        Ok(())
    }
}
