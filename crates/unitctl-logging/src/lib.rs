mod logger_builder;
mod logger_guard;
mod reload_handle;
mod timezone;

pub use logger_builder::*;
pub use reload_handle::*;
pub use timezone::*;
pub use {time, tracing_subscriber};
