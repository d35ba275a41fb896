//! Maven repository publishing: metadata and POM rendering, checksum
//! staging, upload planning, HTTP transport, and the deploy flow that ties
//! them together.

pub mod auth;
pub mod deploy;
pub mod layout;
pub mod staging;
pub mod template;
pub mod upload;
