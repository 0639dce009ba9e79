//! Bobpop Core
//!
//! Shared utilities for the bobpop crates: hash collections and logging setup.

pub mod alloc;
pub mod logging;
