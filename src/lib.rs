pub mod bridge;
pub mod core;
pub mod dispatch;
pub mod gateway;
pub mod runtime;
pub mod session;
pub mod transport;

// Optional components
pub mod config;
pub mod logging;
