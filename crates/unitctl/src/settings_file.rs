use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use confique::{Config, toml};
use directories::ProjectDirs;
use tracing::{debug, info};

use crate::Settings;

pub const SETTINGS_FILENAME: &str = "unitctl.toml";

/// Directory holding [`SETTINGS_FILENAME`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SettingsDir {
    /// The platform config directory, `~/.config/unitctl` on Linux.
    Default,
    Custom(PathBuf),
}

impl SettingsDir {
    fn resolve(self) -> Result<PathBuf, SettingsError> {
        match self {
            SettingsDir::Custom(dir) => Ok(dir),
            SettingsDir::Default => ProjectDirs::from("", "", "unitctl")
                .map(|dirs| dirs.config_dir().to_owned())
                .ok_or(SettingsError::NoHomeDir),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum SettingsError {
    #[error("Unable to locate a home directory for the settings file")]
    NoHomeDir,
    #[error("Unable to write the default settings to {path:#?}: {source}")]
    Template { path: PathBuf, source: io::Error },
    #[error("Unable to load settings from {path:#?}: {message}")]
    Load { path: PathBuf, message: String },
}

/// The settings file plus the settings last loaded from it.
///
/// `UNITCTL_*` environment variables override the file, which overrides the
/// built-in defaults.
#[derive(Clone, Debug)]
pub struct SettingsFile {
    path: PathBuf,
    current: Arc<ArcSwap<Settings>>,
}

impl SettingsFile {
    /// Loads the settings, writing a commented template first if the file is missing.
    pub fn open(dir: SettingsDir) -> Result<Self, SettingsError> {
        let path = dir.resolve()?.join(SETTINGS_FILENAME);
        write_template(&path).map_err(|source| SettingsError::Template {
            path: path.clone(),
            source,
        })?;
        let settings = load(&path)?;
        Ok(Self {
            path,
            current: Arc::new(ArcSwap::from_pointee(settings)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> Arc<Settings> {
        self.current.load_full()
    }

    /// Re-reads the file. On failure the previous settings stay current.
    pub fn reload(&self) -> Result<Arc<Settings>, SettingsError> {
        let settings = Arc::new(load(&self.path)?);
        self.current.store(settings.clone());
        info!("Reloaded settings from {:#?}", self.path);
        Ok(settings)
    }
}

fn write_template(path: &Path) -> io::Result<()> {
    if path.exists() {
        debug!("Using existing settings file {path:#?}");
        return Ok(());
    }
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(
        path,
        toml::template::<Settings>(toml::FormatOptions::default()),
    )
}

fn load(path: &Path) -> Result<Settings, SettingsError> {
    Settings::builder()
        .env()
        .file(path)
        .load()
        .map_err(|e| SettingsError::Load {
            path: path.to_owned(),
            message: e.to_string(),
        })
}

#[cfg(test)]
#[path = "./settings_file_test.rs"]
mod settings_file_test;
