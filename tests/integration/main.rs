//! Integration Tests
//!
//! End-to-end tests through the public `howdog` facade:
//! - Lifecycle: register, query, verify across separate transactions
//! - History: revision order, deletes, replay
//! - Wire: string invocations and JSON responses

#[path = "../common/mod.rs"]
mod common;

mod history;
mod lifecycle;
mod wire;
