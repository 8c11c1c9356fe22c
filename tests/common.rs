//! Common test utilities and event fixtures.

#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::Mutex;

use cms_core::container::Service;
use cms_core::event::Capability;
use cms_core::event::Event;
use cms_core::event::EventType;
use cms_core::impl_event;
use uuid::Uuid;

pub static AUDITABLE: Capability = Capability::new("audit.auditable");

pub static PAGE_EVENT: EventType = EventType::new("page.event");

pub static PAGE_SAVED: EventType = EventType {
    name: "page.saved",
    parent: Some(&PAGE_EVENT),
    capabilities: &[&AUDITABLE],
};

pub struct PageEvent {
    pub page_id: u32,
    pub visited: Vec<String>,
}

pub struct PageSavedEvent {
    pub page: PageEvent,
    pub stopped: bool,
}

impl PageSavedEvent {
    pub fn new(page_id: u32) -> Self {
        Self {
            page: PageEvent {
                page_id,
                visited: Vec::new(),
            },
            stopped: false,
        }
    }
}

impl_event!(PageEvent, PAGE_EVENT);
impl_event!(PageSavedEvent, PAGE_SAVED, parent = page, stoppable = stopped);

/// Service exposing a direct entry point and an `onSaved` handler, recording
/// every call into the shared log.
pub struct RecordingService {
    pub name: &'static str,
    pub log: Arc<Mutex<Vec<String>>>,
}

impl RecordingService {
    pub fn shared(name: &'static str, log: &Arc<Mutex<Vec<String>>>) -> Arc<dyn Service> {
        Arc::new(Self {
            name,
            log: log.clone(),
        })
    }

    fn record(&self, entry: String, event: &mut dyn Event) -> anyhow::Result<()> {
        if let Some(page) = event.downcast_mut::<PageEvent>() {
            page.visited.push(entry.clone());
        }
        self.log.lock().unwrap().push(entry);
        Ok(())
    }
}

impl Service for RecordingService {
    fn invoke(&self, event: &mut dyn Event) -> Option<anyhow::Result<()>> {
        Some(self.record(self.name.to_string(), event))
    }

    fn call_method(&self, method: &str, event: &mut dyn Event) -> Option<anyhow::Result<()>> {
        match method {
            "onSaved" => Some(self.record(format!("{}::onSaved", self.name), event)),
            _ => None,
        }
    }
}

/// Writes `content` to a fresh file in the temp directory.
pub fn write_temp_file(content: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("cms-core-test-{}.json", Uuid::new_v4()));
    std::fs::write(&path, content).expect("Failed to write temp file");
    path
}

pub fn remove_temp_file(path: PathBuf) {
    let _ = std::fs::remove_file(path);
}
