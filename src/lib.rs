//! Tablet Configurator Library
//!
//! This crate provides the control-channel client, domain model, and
//! supporting services for configuring a StoryTablet driver over its local
//! WebSocket endpoint.

pub mod app;
pub mod client;
pub mod connection;
pub mod constants;
pub mod domain;
pub mod error;
pub mod helpers;
pub mod protocol;
pub mod services;
pub mod utils;
