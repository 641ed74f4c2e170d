//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the durable offline-store contract used by services and the
//!   synchronizer.
//! - Isolate SQLite and JSON-blob details from orchestration code.
//!
//! # Invariants
//! - Blobs are read and written wholesale; no partial or indexed access
//!   into blob contents.
//! - Mutations return typed results; failures are logged at this boundary.

pub mod offline_repo;
