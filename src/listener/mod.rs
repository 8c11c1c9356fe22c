//! Event listener registry and lazy listener resolution.

pub mod config;
pub mod definition;
pub mod error;
pub mod ordering;
pub mod provider;

pub use config::ListenerConfig;
pub use config::ListenerEntry;
pub use definition::InvocationTarget;
pub use definition::ListenerDefinition;
pub use definition::ListenerDescriptor;
pub use error::ListenerConfigError;
pub use error::ListenerError;
pub use error::NOT_CALLABLE_CODE;
pub use provider::ListenerInvocable;
pub use provider::ListenerProvider;
pub use provider::Listeners;
