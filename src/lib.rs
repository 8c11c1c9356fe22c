//! cms-core - Event listener registry and dispatcher with file metadata handling.
//!
//! This crate provides:
//! - Event types described by static descriptors with parent types and capabilities
//! - A listener provider resolving listener services lazily through a container
//! - Event dispatchers, including propagation stopping
//! - File metadata aspects persisted through a repository that emits events

pub mod config;
pub mod container;
pub mod dispatcher;
pub mod error;
pub mod event;
pub mod listener;
pub mod logging;
pub mod macros;
pub mod resource;
