//! Core types for the chat gateway
//!
//! This module provides the fundamental types used throughout the gateway:
//! - `GatewayError` / `GatewayResult` - Error types

pub mod error;

pub use error::{GatewayError, GatewayResult};
