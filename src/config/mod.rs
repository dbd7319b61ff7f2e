// ABOUTME: Configuration management module for the Kinetic service
// ABOUTME: Server settings from the environment on top of the generator configuration
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

//! Configuration module for the Kinetic server
//!
//! - **Environment**: listener, catalog snapshot and suggestion settings read from
//!   environment variables
//! - Engine policy (duration tolerance, recovery curve, composition limits) lives in
//!   `kinetic_generator::config` and is embedded in [`ServerConfig`]

/// Environment and server configuration
pub mod environment;

pub use environment::ServerConfig;
