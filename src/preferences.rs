//! Small persisted key/value preferences, kept as a JSON object on disk.

use std::collections::BTreeMap;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

pub const LANGUAGE_KEY: &str = "user-language";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("Preference file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("Preference file is not a JSON string map: {0}")]
    Parse(#[from] serde_json::Error),
}

/// UI languages the app ships translations for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Language {
    #[default]
    En,
    Hi,
    Kn,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::En, Language::Hi, Language::Kn];

    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Hi => "hi",
            Language::Kn => "kn",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Language::En => "English",
            Language::Hi => "हिन्दी",
            Language::Kn => "ಕನ್ನಡ",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.code() == s)
            .ok_or_else(|| format!("Unsupported language: {}", s))
    }
}

/// File-backed preferences. Every `set` rewrites the whole file.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    values: RwLock<BTreeMap<String, String>>,
}

impl PreferenceStore {
    /// Loads the file at `path`; a missing file is an empty store.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, PreferenceError> {
        let path = path.as_ref().to_path_buf();
        let values = match tokio::fs::read(&path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No preference file yet");
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            values: RwLock::new(values),
        })
    }

    pub async fn get(&self, key: &str) -> Option<String> {
        self.values.read().await.get(key).cloned()
    }

    #[instrument(skip(self, value))]
    pub async fn set(&self, key: &str, value: impl Into<String>) -> Result<(), PreferenceError> {
        let mut values = self.values.write().await;
        values.insert(key.to_string(), value.into());
        let bytes = serde_json::to_vec_pretty(&*values)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&self.path, bytes).await?;
        debug!("Preference saved");
        Ok(())
    }

    /// The stored language, or English when unset or unrecognised.
    pub async fn language(&self) -> Language {
        match self.get(LANGUAGE_KEY).await {
            None => Language::default(),
            Some(code) => code.parse().unwrap_or_else(|e| {
                warn!(error = %e, "Falling back to default language");
                Language::default()
            }),
        }
    }

    pub async fn set_language(&self, language: Language) -> Result<(), PreferenceError> {
        self.set(LANGUAGE_KEY, language.code()).await?;
        info!(%language, "Language changed");
        Ok(())
    }
}
