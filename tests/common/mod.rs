//! Common test utilities and fixtures for integration tests.
//!
//! # Modules
//!
//! - `fixtures`: Hub payloads and mock-server helpers
//! - `logger`: Per-test progress lines on stderr

pub mod fixtures;
pub mod logger;
