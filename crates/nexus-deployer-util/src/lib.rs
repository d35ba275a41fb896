//! Shared utilities for nexus-deployer.
//!
//! This crate provides cross-cutting concerns used by the other crates:
//! the deploy error taxonomy, filesystem helpers, MD5/SHA-1 hashing and
//! terminal status output.

pub mod errors;
pub mod fs;
pub mod hash;
pub mod progress;
