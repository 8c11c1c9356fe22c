//! Events dispatched by the metadata repository.

use crate::event::Capability;
use crate::event::Event;
use crate::event::EventType;
use crate::impl_event;
use crate::resource::MetaData;

/// Satisfied by every event reporting a change of a file's metadata row.
pub static FILE_META_DATA_CHANGED: Capability = Capability::new("resource.file.metadata.changed");

pub static ENRICH_FILE_META_DATA: EventType = EventType::new("resource.file.metadata.enrich");

pub static AFTER_FILE_META_DATA_CREATED: EventType = EventType {
    name: "resource.file.metadata.created",
    parent: None,
    capabilities: &[&FILE_META_DATA_CHANGED],
};

pub static AFTER_FILE_META_DATA_UPDATED: EventType = EventType {
    name: "resource.file.metadata.updated",
    parent: None,
    capabilities: &[&FILE_META_DATA_CHANGED],
};

pub static AFTER_FILE_META_DATA_DELETED: EventType = EventType {
    name: "resource.file.metadata.deleted",
    parent: None,
    capabilities: &[&FILE_META_DATA_CHANGED],
};

/// Dispatched whenever a metadata row is read. Listeners may rewrite `record`,
/// and the rewritten record is what the reader receives.
#[derive(Clone, Debug)]
pub struct EnrichFileMetaDataEvent {
    pub file_uid: i64,
    pub meta_data_uid: i64,
    pub record: MetaData,
}

/// Dispatched after a metadata row was inserted. Listeners may rewrite the
/// record handed back to the caller; the stored row is not changed.
#[derive(Clone, Debug)]
pub struct AfterFileMetaDataCreatedEvent {
    pub file_uid: i64,
    pub meta_data_uid: i64,
    pub record: MetaData,
}

#[derive(Clone, Debug)]
pub struct AfterFileMetaDataUpdatedEvent {
    pub file_uid: i64,
    pub meta_data_uid: i64,
    pub record: MetaData,
}

#[derive(Clone, Debug)]
pub struct AfterFileMetaDataDeletedEvent {
    pub file_uid: i64,
}

impl_event!(EnrichFileMetaDataEvent, ENRICH_FILE_META_DATA);
impl_event!(AfterFileMetaDataCreatedEvent, AFTER_FILE_META_DATA_CREATED);
impl_event!(AfterFileMetaDataUpdatedEvent, AFTER_FILE_META_DATA_UPDATED);
impl_event!(AfterFileMetaDataDeletedEvent, AFTER_FILE_META_DATA_DELETED);

/// Uid of the file concerned by a metadata change event.
///
/// Meant for listeners registered on [`FILE_META_DATA_CHANGED`], which receive
/// any of the change events.
pub fn changed_file_uid(event: &dyn Event) -> Option<i64> {
    if !event.event_type().is_a(FILE_META_DATA_CHANGED.name) {
        return None;
    }
    if let Some(event) = event.downcast_ref::<AfterFileMetaDataCreatedEvent>() {
        Some(event.file_uid)
    } else if let Some(event) = event.downcast_ref::<AfterFileMetaDataUpdatedEvent>() {
        Some(event.file_uid)
    } else {
        event
            .downcast_ref::<AfterFileMetaDataDeletedEvent>()
            .map(|event| event.file_uid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_changed_file_uid_only_for_change_events() {
        let created = AfterFileMetaDataCreatedEvent {
            file_uid: 12,
            meta_data_uid: 1,
            record: MetaData::new(),
        };
        let enrich = EnrichFileMetaDataEvent {
            file_uid: 12,
            meta_data_uid: 1,
            record: MetaData::new(),
        };

        assert_eq!(changed_file_uid(&created), Some(12));
        assert_eq!(changed_file_uid(&AfterFileMetaDataDeletedEvent { file_uid: 7 }), Some(7));
        assert_eq!(changed_file_uid(&enrich), None);
    }
}
