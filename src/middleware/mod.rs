// ABOUTME: HTTP middleware for request tracing, request id propagation and CORS
// ABOUTME: Layers applied around every route of the Kinetic service
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Kinetic Fitness

/// CORS configuration
pub mod cors;
/// Request ids and request spans
pub mod tracing;

pub use cors::setup_cors;
pub use tracing::{create_request_span, MakeRequestId, REQUEST_ID_HEADER};
