//! Core data types for nexus-deployer.
//!
//! A [`request::DeploymentRequest`] describes one artifact to publish and
//! derives every Maven layout path the upload plan needs. It is usually
//! assembled from a [`config::DeployConfig`] (TOML file merged with CLI
//! flags).

pub mod config;
pub mod package;
pub mod request;
pub mod timestamp;
