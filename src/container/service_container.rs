use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::PoisonError;
use std::sync::RwLock;
use std::thread;
use std::thread::ThreadId;

use log::debug;

use crate::container::Container;
use crate::container::ContainerError;
use crate::container::Service;

type Building = Mutex<Vec<(ThreadId, String)>>;

type Factory =
    Box<dyn Fn(&ServiceContainer) -> anyhow::Result<Arc<dyn Service>> + Send + Sync + 'static>;

/// In-process [`Container`] holding ready instances and shared-service factories.
///
/// A factory runs on the first [`get`](Container::get) of its id and the result
/// is cached, so every later lookup returns the same instance. Factories
/// receive the container to resolve their own dependencies.
///
/// Builds in progress are tracked per thread, so only a factory that asks for
/// its own id (directly or through its dependencies) is a circular reference.
/// Threads racing on the first lookup may each run the factory; the first
/// instance cached is the one every caller receives.
pub struct ServiceContainer {
    factories: HashMap<String, Factory>,
    instances: RwLock<HashMap<String, Arc<dyn Service>>>,
    building: Building,
}

impl ServiceContainer {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
            instances: RwLock::new(HashMap::new()),
            building: Mutex::new(Vec::new()),
        }
    }

    /// Registers a ready instance under `id`, replacing any earlier instance.
    pub fn set(&mut self, id: impl Into<String>, service: Arc<dyn Service>) -> &mut Self {
        self.instances
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.into(), service);
        self
    }

    /// Registers a factory building the shared service `id` on first use.
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(&ServiceContainer) -> anyhow::Result<Arc<dyn Service>> + Send + Sync + 'static,
    {
        self.factories.insert(id.into(), Box::new(factory));
        self
    }

    /// All known service ids, sorted.
    pub fn service_ids(&self) -> Vec<String> {
        let instances = self.instances.read().unwrap_or_else(PoisonError::into_inner);
        let mut ids: Vec<String> = instances
            .keys()
            .chain(self.factories.keys().filter(|id| !instances.contains_key(*id)))
            .cloned()
            .collect();
        ids.sort();
        ids
    }

    fn build(&self, id: &str, factory: &Factory) -> Result<Arc<dyn Service>, ContainerError> {
        let thread = thread::current().id();
        {
            let mut building = self.building.lock().unwrap_or_else(PoisonError::into_inner);
            if building
                .iter()
                .any(|(owner, pending)| *owner == thread && pending == id)
            {
                return Err(ContainerError::CircularReference { id: id.to_string() });
            }
            building.push((thread, id.to_string()));
        }
        let _guard = BuildGuard {
            building: &self.building,
            thread,
            id,
        };

        debug!("Building service \"{id}\"");
        factory(self).map_err(|e| ContainerError::ResolutionFailed {
            id: id.to_string(),
            source: e.into(),
        })
    }
}

/// Removes a build from the in-progress list, also when the factory panics.
struct BuildGuard<'a> {
    building: &'a Building,
    thread: ThreadId,
    id: &'a str,
}

impl Drop for BuildGuard<'_> {
    fn drop(&mut self) {
        let mut building = self.building.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(position) = building
            .iter()
            .position(|(owner, pending)| *owner == self.thread && pending == self.id)
        {
            building.remove(position);
        }
    }
}

impl Container for ServiceContainer {
    fn get(&self, id: &str) -> Result<Arc<dyn Service>, ContainerError> {
        if let Some(service) = self
            .instances
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
        {
            return Ok(service.clone());
        }

        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| ContainerError::NotFound { id: id.to_string() })?;
        let service = self.build(id, factory)?;

        Ok(self
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(id.to_string())
            .or_insert(service)
            .clone())
    }

    fn has(&self, id: &str) -> bool {
        self.factories.contains_key(id)
            || self
                .instances
                .read()
                .unwrap_or_else(PoisonError::into_inner)
                .contains_key(id)
    }
}

impl Default for ServiceContainer {
    fn default() -> Self {
        Self::new()
    }
}
