//! User configuration.
//!
//! Settings come from a TOML file when the `config` feature is enabled (the default). Command
//! line flags are applied on top by the binary.
//!
//! ```toml
//! [display]
//! line_numbers = true
//! wrap = false
//! locked = false
//! theme = "default"
//!
//! [search]
//! case_insensitive = false
//! ```

use crate::error::{Result, TailError};
use crate::render::segments::DisplayFlags;
use crate::render::ui::ColorTheme;
use crate::search::SearchOptions;
use crate::viewport::NavigationMode;
use std::path::{Path, PathBuf};

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "config",
    derive(serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct Config {
    pub display: DisplayConfig,
    pub search: SearchConfig,
}

/// `[display]` table
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(
    feature = "config",
    derive(serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct DisplayConfig {
    pub line_numbers: bool,
    pub wrap: bool,
    pub locked: bool,
    pub theme: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            line_numbers: true,
            wrap: false,
            locked: false,
            theme: "default".to_string(),
        }
    }
}

/// `[search]` table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "config",
    derive(serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct SearchConfig {
    pub case_insensitive: bool,
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist and parse. Without one, the per-user file is read if present
    /// and defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.is_file() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Location of the per-user configuration file
    #[cfg(feature = "config")]
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("rltail").join("config.toml"))
    }

    #[cfg(not(feature = "config"))]
    pub fn default_path() -> Option<PathBuf> {
        None
    }

    /// Read and parse a configuration file
    #[cfg(feature = "config")]
    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            TailError::config(format!("Cannot read {}: {}", path.display(), e))
        })?;
        let config = Self::from_toml_str(&text)
            .map_err(|e| TailError::config(format!("{}: {}", path.display(), e)))?;

        log::debug!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    #[cfg(not(feature = "config"))]
    pub fn load_from(path: &Path) -> Result<Self> {
        Err(TailError::config(format!(
            "Cannot load {}: built without configuration file support",
            path.display()
        )))
    }

    /// Parse configuration from TOML text
    #[cfg(feature = "config")]
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| TailError::config(e.to_string()))
    }

    pub fn display_flags(&self) -> DisplayFlags {
        DisplayFlags {
            line_numbers: self.display.line_numbers,
            wrap: self.display.wrap,
            ..DisplayFlags::default()
        }
    }

    pub fn navigation_mode(&self) -> NavigationMode {
        if self.display.locked {
            NavigationMode::Locked
        } else {
            NavigationMode::Free
        }
    }

    pub fn search_options(&self) -> SearchOptions {
        SearchOptions {
            case_insensitive: self.search.case_insensitive,
        }
    }

    /// Resolve the configured theme name
    pub fn theme(&self) -> Result<ColorTheme> {
        ColorTheme::from_name(&self.display.theme).ok_or_else(|| {
            TailError::config(format!(
                "Unknown theme '{}' (expected default, monochrome or high-contrast)",
                self.display.theme
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.display.line_numbers);
        assert!(!config.display.wrap);
        assert_eq!(config.navigation_mode(), NavigationMode::Free);
        assert_eq!(config.search_options(), SearchOptions::default());
        assert_eq!(config.theme().unwrap(), ColorTheme::default());
    }

    #[test]
    fn test_unknown_theme() {
        let mut config = Config::default();
        config.display.theme = "neon".to_string();
        assert!(matches!(config.theme(), Err(TailError::ConfigError { .. })));
    }

    #[test]
    fn test_display_flags() {
        let mut config = Config::default();
        config.display.wrap = true;
        config.display.line_numbers = false;

        let flags = config.display_flags();
        assert!(flags.wrap);
        assert!(!flags.line_numbers);
    }

    #[cfg(feature = "config")]
    mod file {
        use super::*;
        use std::io::Write;
        use tempfile::NamedTempFile;

        #[test]
        fn test_partial_toml_keeps_defaults() {
            let config = Config::from_toml_str(
                r#"
                [display]
                wrap = true
                locked = true
                "#,
            )
            .unwrap();

            assert!(config.display.wrap);
            assert!(config.display.line_numbers);
            assert_eq!(config.navigation_mode(), NavigationMode::Locked);
            assert!(!config.search.case_insensitive);
        }

        #[test]
        fn test_full_toml() {
            let config = Config::from_toml_str(
                r#"
                [display]
                line_numbers = false
                theme = "monochrome"

                [search]
                case_insensitive = true
                "#,
            )
            .unwrap();

            assert!(!config.display.line_numbers);
            assert_eq!(config.theme().unwrap(), ColorTheme::monochrome());
            assert!(config.search_options().case_insensitive);
        }

        #[test]
        fn test_unknown_key_is_rejected() {
            let result = Config::from_toml_str("[display]\nwarp = true\n");
            assert!(matches!(result, Err(TailError::ConfigError { .. })));
        }

        #[test]
        fn test_load_explicit_file() {
            let mut file = NamedTempFile::new().unwrap();
            file.write_all(b"[search]\ncase_insensitive = true\n").unwrap();
            file.flush().unwrap();

            let config = Config::load(Some(file.path())).unwrap();
            assert!(config.search.case_insensitive);
        }

        #[test]
        fn test_load_missing_explicit_file_fails() {
            let result = Config::load(Some(Path::new("/no/such/rltail.toml")));
            assert!(matches!(result, Err(TailError::ConfigError { .. })));
        }
    }
}
