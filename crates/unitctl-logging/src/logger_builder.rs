#[cfg(all(target_os = "linux", feature = "linux-journald"))]
use std::io;
use std::io::{stderr, stdout};
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Mutex;

use once_cell::sync::{Lazy, OnceCell};
use time::UtcOffset;
use time::format_description::well_known::Rfc3339;
use tracing::metadata::LevelFilter;
use tracing::{Level, Subscriber, debug};
use tracing_appender::non_blocking::NonBlockingBuilder;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::fmt::Layer;
use tracing_subscriber::fmt::time::OffsetTime;
use tracing_subscriber::prelude::*;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, reload};

use crate::logger_guard::LoggerGuard;
use crate::{ReloadHandle, Timezone};

static LOGGER_GUARD: Lazy<Mutex<Option<LoggerGuard>>> = Lazy::new(|| Mutex::new(None));

static LOCAL_TIME: OnceCell<Result<OffsetTime<Rfc3339>, time::error::IndeterminateOffset>> =
    OnceCell::new();

/// Flushes the writers of the last built logger when dropped.
#[must_use]
pub struct GlobalLoggerGuard;

impl Drop for GlobalLoggerGuard {
    fn drop(&mut self) {
        debug!("Dropping global logger guard");
        if let Ok(mut guard) = LOGGER_GUARD.lock() {
            guard.take();
        }
    }
}

// The local offset can only be read soundly before other threads are spawned.
#[ctor::ctor]
fn init_time() {
    LOCAL_TIME.set(OffsetTime::local_rfc_3339()).ok();
}

pub fn init() -> GlobalLoggerGuard {
    GlobalLoggerGuard
}

#[derive(thiserror::Error, Debug)]
pub enum LoggerCreationError {
    #[cfg(all(target_os = "linux", feature = "linux-journald"))]
    #[error("Error creating journald logging layer: {0}")]
    JournaldFailure(io::Error),
}

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct LogLevel(pub Level);

impl LogLevel {
    pub(crate) fn to_level_filter(self) -> LevelFilter {
        LevelFilter::from_level(self.0)
    }
}

impl Default for LogLevel {
    fn default() -> Self {
        LogLevel(Level::INFO)
    }
}

impl FromStr for LogLevel {
    type Err = <Level as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Level::from_str(s).map(LogLevel)
    }
}

impl Deref for LogLevel {
    type Target = Level;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

#[cfg(feature = "config")]
impl<'de> serde::Deserialize<'de> for LogLevel {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let val = String::deserialize(deserializer)?;
        LogLevel::from_str(&val).map_err(serde::de::Error::custom)
    }
}

/// Logging settings an operator may change.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(confique::Config))]
pub struct UserConfig {
    /// One of `trace`, `debug`, `info`, `warn` or `error`.
    #[cfg_attr(
        feature = "config",
        config(default = "info", env = "UNITCTL_LOG_LEVEL", parse_env = LogLevel::from_str)
    )]
    pub log_level: LogLevel,
}

#[derive(Debug, Clone)]
pub struct LoggerBuilder {
    name: String,
    timezone: Timezone,
    output_buffer_limit: usize,
    user_config: UserConfig,
    env_filter_directives: Vec<Directive>,
    log_to_stdout: bool,
    log_to_stderr: bool,
}

impl LoggerBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            timezone: Timezone::Local,
            // Only a handful of lines are logged per operation
            output_buffer_limit: 256,
            user_config: UserConfig::default(),
            log_to_stdout: false,
            log_to_stderr: true,
            env_filter_directives: vec![],
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn with_timezone(mut self, timezone: Timezone) -> Self {
        self.timezone = timezone;
        self
    }

    pub fn with_log_to_stdout(mut self, log_to_stdout: bool) -> Self {
        self.log_to_stdout = log_to_stdout;
        self
    }

    pub fn with_log_to_stderr(mut self, log_to_stderr: bool) -> Self {
        self.log_to_stderr = log_to_stderr;
        self
    }

    pub fn with_output_buffer_limit(mut self, output_buffer_limit: usize) -> Self {
        self.output_buffer_limit = output_buffer_limit;
        self
    }

    pub fn with_config(mut self, user_config: UserConfig) -> Self {
        self.user_config = user_config;
        self
    }

    pub fn with_env_filter_directive(mut self, directive: Directive) -> Self {
        self.env_filter_directives.push(directive);
        self
    }

    fn env_filter(&self) -> EnvFilter {
        let mut env_filter =
            EnvFilter::from_default_env().add_directive(self.user_config.log_level.0.into());
        for directive in &self.env_filter_directives {
            env_filter = env_filter.add_directive(directive.clone());
        }
        env_filter
    }

    fn output_filter(&self, enabled: bool) -> EnvFilter {
        if enabled {
            self.env_filter()
        } else {
            EnvFilter::from_default_env().add_directive(LevelFilter::OFF.into())
        }
    }

    fn timer(&self) -> OffsetTime<Rfc3339> {
        match (self.timezone, LOCAL_TIME.get()) {
            (Timezone::Local, Some(Ok(offset))) => offset.to_owned(),
            (Timezone::Local, Some(Err(e))) => {
                eprintln!("Error getting local time: {e}");
                OffsetTime::new(UtcOffset::UTC, Rfc3339)
            }
            _ => OffsetTime::new(UtcOffset::UTC, Rfc3339),
        }
    }

    pub fn build(
        self,
    ) -> Result<
        (
            impl SubscriberInitExt + Subscriber + for<'a> LookupSpan<'a>,
            ReloadHandle,
        ),
        LoggerCreationError,
    > {
        let offset = self.timer();
        let collector = tracing_subscriber::registry().with(self.env_filter());

        let mut guard = LoggerGuard::default();

        let (non_blocking_stdout, stdout_guard) = NonBlockingBuilder::default()
            .buffered_lines_limit(self.output_buffer_limit)
            .finish(stdout());
        guard.add_guard(stdout_guard);

        let (non_blocking_stderr, stderr_guard) = NonBlockingBuilder::default()
            .buffered_lines_limit(self.output_buffer_limit)
            .finish(stderr());
        guard.add_guard(stderr_guard);

        let collector = collector
            .with(
                Layer::new()
                    .pretty()
                    .with_timer(offset.clone())
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_writer(non_blocking_stdout)
                    .with_filter(self.output_filter(self.log_to_stdout)),
            )
            .with(
                Layer::new()
                    .pretty()
                    .with_timer(offset)
                    .with_thread_ids(true)
                    .with_thread_names(true)
                    .with_writer(non_blocking_stderr)
                    .with_filter(self.output_filter(self.log_to_stderr)),
            )
            .with(tracing_error::ErrorLayer::default());

        #[cfg(all(target_os = "linux", feature = "linux-journald"))]
        let collector = collector.with(
            tracing_journald::layer()
                .map_err(LoggerCreationError::JournaldFailure)?
                .with_syslog_identifier(self.name.clone())
                .with_filter(self.env_filter()),
        );

        let (filter, reload_handle) =
            reload::Layer::new(self.user_config.log_level.to_level_filter());
        let reload_fn = move |level_filter: LevelFilter| {
            reload_handle.modify(|l| *l = level_filter).ok();
        };

        let collector = collector.with(filter);
        if let Ok(mut slot) = LOGGER_GUARD.lock() {
            *slot = Some(guard);
        }
        Ok((collector, ReloadHandle::new(reload_fn)))
    }
}

#[cfg(test)]
#[path = "./logger_builder_test.rs"]
mod logger_builder_test;
