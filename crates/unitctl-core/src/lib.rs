mod action;
mod error;

pub use action::*;
pub use error::*;
