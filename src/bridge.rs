//! Async/sync bridge
//!
//! The chat front-end invokes the gateway from a synchronous UI callback,
//! while the agent runtime is async. `run_blocking` reconciles the two:
//! it drives one future to completion from a synchronous call site,
//! creating and fully tearing down an execution context per call.
//!
//! Two paths:
//! - **Primary**: no ambient tokio runtime on this thread. A fresh
//!   current-thread runtime is built, the future is driven to completion,
//!   and the runtime is dropped before returning, so no background tasks
//!   outlive the call.
//! - **Fallback**: an ambient runtime is already live (detected via
//!   `Handle::try_current`), where blocking in place would panic. The
//!   future runs on a dedicated thread with its own short-lived runtime,
//!   and the calling thread joins it.
//!
//! Faults on either path, including panics inside the future, are
//! captured and returned as errors; nothing escapes to the caller as an
//! unwinding crash. Calls are independent: no execution context is shared
//! across invocations.

use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;

use tokio::runtime::{Builder, Handle, Runtime};

use crate::core::{GatewayError, GatewayResult};

/// Drive a future to completion from a synchronous call site
pub fn run_blocking<F, T>(operation: F) -> GatewayResult<T>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    match Handle::try_current() {
        Err(_) => {
            tracing::trace!("Bridge: driving future on a fresh runtime");
            let runtime = new_runtime()?;
            let outcome =
                std::panic::catch_unwind(AssertUnwindSafe(|| runtime.block_on(operation)));
            // Tear the context down before reporting the outcome
            drop(runtime);
            outcome.map_err(|payload| GatewayError::BridgeFault(panic_message(payload)))
        }
        Ok(_) => {
            tracing::trace!("Bridge: ambient runtime detected, using dedicated thread");
            let joined = std::thread::Builder::new()
                .name("gateway-bridge".into())
                .spawn(move || -> GatewayResult<T> {
                    let runtime = new_runtime()?;
                    Ok(runtime.block_on(operation))
                })
                .map_err(|err| GatewayError::BridgeSetup(err.to_string()))?
                .join();

            match joined {
                Ok(result) => result,
                Err(payload) => Err(GatewayError::BridgeFault(panic_message(payload))),
            }
        }
    }
}

fn new_runtime() -> GatewayResult<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|err| GatewayError::BridgeSetup(err.to_string()))
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(text) = payload.downcast_ref::<&str>() {
        (*text).to_string()
    } else if let Some(text) = payload.downcast_ref::<String>() {
        text.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
