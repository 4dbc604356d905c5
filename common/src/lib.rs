//! Shared data model for the classification reference checker.
//!
//! Every surface of the service (CSV ingestion, the validation core, the HTTP
//! handlers) speaks in terms of the types defined here. They are plain serde
//! structs with no behaviour beyond accessors, so they can be reused by any
//! client that talks to the backend.

pub mod model;
pub mod requests;
pub mod responses;
