use serde::Deserialize;
use serde::Serialize;

/// How a resolved listener service is called.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InvocationTarget {
    /// The service itself is the listener.
    DirectCall,
    /// The named handler method of the service is the listener.
    Method(String),
}

impl InvocationTarget {
    pub fn method(&self) -> Option<&str> {
        match self {
            Self::DirectCall => None,
            Self::Method(name) => Some(name),
        }
    }
}

impl From<Option<&str>> for InvocationTarget {
    fn from(method: Option<&str>) -> Self {
        match method {
            Some(name) => Self::Method(name.to_string()),
            None => Self::DirectCall,
        }
    }
}

/// A registered listener: the event type it listens to and how to build it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListenerDefinition {
    pub event_type: String,
    pub service: String,
    pub target: InvocationTarget,
}

impl ListenerDefinition {
    pub fn new(
        event_type: impl Into<String>,
        service: impl Into<String>,
        method: Option<&str>,
    ) -> Self {
        Self {
            event_type: event_type.into(),
            service: service.into(),
            target: method.into(),
        }
    }

    pub fn descriptor(&self) -> ListenerDescriptor {
        ListenerDescriptor {
            service: self.service.clone(),
            method: self.target.method().map(str::to_string),
        }
    }
}

/// Plain-data view of a [`ListenerDefinition`] used for introspection.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListenerDescriptor {
    pub service: String,
    pub method: Option<String>,
}

impl ListenerDescriptor {
    pub fn new(service: &str, method: Option<&str>) -> Self {
        Self {
            service: service.to_string(),
            method: method.map(str::to_string),
        }
    }
}
