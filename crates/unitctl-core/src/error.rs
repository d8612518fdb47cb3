/// Component name used as the prefix of rendered errors.
pub const COMPONENT: &str = "service";

/// `EINVAL`. Every failure reported by the handlers uses this code.
pub const INVALID_ARGUMENT: i32 = libc::EINVAL;

pub type Result<T, E = ServiceError> = std::result::Result<T, E>;

/// Failure carrying an errno-style code and a fully formatted description.
///
/// A code of `0` renders as the bare description. Any other code renders as
/// `service: error(<code>): <description>`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{}", render(.code, .description))]
pub struct ServiceError {
    code: i32,
    description: String,
}

impl ServiceError {
    pub fn new(code: i32, description: impl Into<String>) -> Self {
        Self {
            code,
            description: description.into(),
        }
    }

    pub fn invalid_argument(description: impl Into<String>) -> Self {
        Self::new(INVALID_ARGUMENT, description)
    }

    pub fn code(&self) -> i32 {
        self.code
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_invalid_argument(&self) -> bool {
        self.code == INVALID_ARGUMENT
    }
}

fn render(code: &i32, description: &str) -> String {
    if *code == 0 {
        return description.to_owned();
    }
    format!("{COMPONENT}: error({code}): {description}")
}

/// Builds a [`ServiceError`] from a code and a `format!` template.
///
/// ```
/// use unitctl_core::{service_error, INVALID_ARGUMENT};
///
/// let err = service_error!(INVALID_ARGUMENT, "Invalid handler type {}", "bogus");
/// assert_eq!("Invalid handler type bogus", err.description());
/// ```
#[macro_export]
macro_rules! service_error {
    ($code:expr, $($arg:tt)+) => {
        $crate::ServiceError::new($code, ::std::format!($($arg)+))
    };
}

#[cfg(test)]
#[path = "./error_test.rs"]
mod error_test;
