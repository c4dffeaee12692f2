//! Client for the JobMailer service: a transport adapter over its HTTP API
//! and a coordinator that walks a session through profile creation, email
//! and cover-letter generation, and sending.

pub mod cli;
pub mod config;
pub mod core;
pub mod types;
pub mod utils;
pub mod workflow;

pub use crate::config::ClientConfig;
pub use crate::core::{ApiError, ServiceClient};
pub use crate::workflow::{Session, Stage, WorkflowCoordinator, WorkflowError};
