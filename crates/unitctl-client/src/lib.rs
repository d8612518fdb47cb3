pub mod bus;
pub mod config;
mod handler;
pub mod handlers;
mod registry;
mod service;
mod status;

pub use config::{ClientConfig, Level};
pub use handler::*;
pub use handlers::DbusServiceHandler;
pub use registry::*;
pub use service::*;
pub use status::*;
pub use unitctl_core::{Action, INVALID_ARGUMENT, Result, ServiceError};
