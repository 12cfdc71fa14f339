//! Persisted user preferences.
//!
//! Only the interface language survives between sessions. Storage goes
//! through [`PreferenceStore`] so the core never reaches for ambient state.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::RwLock;

use serde::{Deserialize, Serialize};

use crate::{GridError, GridResult};

/// Key the language preference is stored under.
pub const LANGUAGE_KEY: &str = "grid-language";

/// Interface and caption language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    /// English.
    En,
    /// Romanian.
    #[default]
    Ro,
}

impl Language {
    /// Two-letter code.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ro => "ro",
        }
    }

    /// Title line printed at the top of an exported page.
    #[must_use]
    pub fn export_title(self) -> &'static str {
        match self {
            Self::En => "Grid Designer - Export to PDF",
            Self::Ro => "Grid Designer - Exporta in PDF",
        }
    }

    /// Orientation word used in the grid info caption.
    #[must_use]
    pub fn orientation_label(self, is_horizontal: bool) -> &'static str {
        match (self, is_horizontal) {
            (Self::En, true) => "Horizontal",
            (Self::En, false) => "Vertical",
            (Self::Ro, true) => "Orizontala",
            (Self::Ro, false) => "Verticala",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Self::En),
            "ro" => Ok(Self::Ro),
            other => Err(GridError::Preferences(format!("unknown language: {other}"))),
        }
    }
}

/// Key-value storage for preferences.
pub trait PreferenceStore {
    /// Read a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be read.
    fn get(&self, key: &str) -> GridResult<Option<String>>;

    /// Write a value.
    ///
    /// # Errors
    ///
    /// Returns an error if the backing storage cannot be written.
    fn set(&self, key: &str, value: &str) -> GridResult<()>;
}

/// Preferences held in memory for the lifetime of the process.
#[derive(Debug, Default)]
pub struct MemoryPreferences {
    values: RwLock<HashMap<String, String>>,
}

impl MemoryPreferences {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl PreferenceStore for MemoryPreferences {
    fn get(&self, key: &str) -> GridResult<Option<String>> {
        let values = self
            .values
            .read()
            .map_err(|_| GridError::Preferences("lock poisoned".to_string()))?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> GridResult<()> {
        let mut values = self
            .values
            .write()
            .map_err(|_| GridError::Preferences("lock poisoned".to_string()))?;
        values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Preferences stored as a flat JSON object in one file.
#[derive(Debug, Clone)]
pub struct FilePreferences {
    path: PathBuf,
}

impl FilePreferences {
    /// Use `path`; the file is created on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> GridResult<HashMap<String, String>> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let contents = std::fs::read_to_string(&self.path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}

impl PreferenceStore for FilePreferences {
    fn get(&self, key: &str) -> GridResult<Option<String>> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> GridResult<()> {
        let mut values = self.read_all()?;
        values.insert(key.to_string(), value.to_string());
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&self.path, serde_json::to_string_pretty(&values)?)?;
        tracing::debug!("Saved preference {key} to {}", self.path.display());
        Ok(())
    }
}

/// The stored language, or the default when absent, unknown or unreadable.
#[must_use]
pub fn load_language(store: &dyn PreferenceStore) -> Language {
    match store.get(LANGUAGE_KEY) {
        Ok(Some(value)) => value.parse().unwrap_or_else(|e| {
            tracing::warn!("Ignoring stored language: {e}");
            Language::default()
        }),
        Ok(None) => Language::default(),
        Err(e) => {
            tracing::warn!("Failed to read language preference: {e}");
            Language::default()
        }
    }
}

/// Persist `language`.
///
/// # Errors
///
/// Returns an error if the store cannot be written.
pub fn store_language(store: &dyn PreferenceStore, language: Language) -> GridResult<()> {
    store.set(LANGUAGE_KEY, language.code())
}
