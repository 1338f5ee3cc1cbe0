//! ecs-drainer-lambda - Drains ECS container instances during scale-in
//!
//! One invocation of the Lambda runs a single drain decision: validate the
//! lifecycle event, put the terminating instance's ECS container instance
//! into DRAINING, then either heartbeat the lifecycle hook (tasks still
//! present) or complete it (drained). The external poller re-invokes while
//! the returned event carries `Wait = true`.
//!
//! ## Modules
//!
//! - [`aws`]: service clients for EC2, ECS, and AutoScaling
//! - [`config`]: environment toggles and tracing setup
//! - [`drain`]: the drain decision procedure and its capability seam
//! - [`error`]: error categories surfaced to the Lambda runtime

pub mod aws;
pub mod config;
pub mod drain;
pub mod error;

// Re-export commonly used types
pub use drain::{DrainOperations, process};
pub use error::DrainError;
