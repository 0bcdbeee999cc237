//! Entity shapes the repository moves between callers and storage.
//!
//! # Responsibility
//! - Define the `Model` contract typed entities implement.
//! - Define `Record`, the serialized form every repository variant handles.
//! - Map model names to descriptors through an explicit registry.
//!
//! # Invariants
//! - A record is identified by `(model, id)`.
//! - Name lookup never consults anything except the registry it is given.

pub mod record;
pub mod registry;
