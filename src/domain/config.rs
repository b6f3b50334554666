use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::domain::catalog::DEFAULT_DELIMITER;

/// The name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "course-planner.toml";

/// The catalogue offered when the user doesn't name one.
pub const DEFAULT_DATA_FILE: &str = "CS 300 ABCU_Advising_Program_Input.csv";

/// Configuration for the course planner.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "Versions")]
pub struct Config {
    /// The catalogue file used when none is given on the command line and the
    /// user accepts the default at the prompt.
    data_file: PathBuf,

    /// The ASCII character separating fields on each line of the catalogue.
    delimiter: u8,

    /// Whether a failed reload keeps the previously loaded catalogue.
    ///
    /// When `false` (default), a failed load leaves nothing loaded and the
    /// catalogue has to be loaded again before it can be queried.
    pub keep_catalog_on_failed_load: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            delimiter: DEFAULT_DELIMITER,
            keep_catalog_on_failed_load: false,
        }
    }
}

impl Config {
    /// Loads the configuration from a TOML file at the given path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or if the TOML content is
    /// invalid.
    pub fn load(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("Failed to parse config file: {e}"))
    }

    /// Loads the configuration from `path`, falling back to the defaults if
    /// the file is missing or invalid.
    #[must_use]
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::debug!("Failed to load config: {e}");
            Self::default()
        })
    }

    /// The default catalogue file.
    #[must_use]
    pub fn data_file(&self) -> &Path {
        &self.data_file
    }

    /// The field delimiter.
    #[must_use]
    pub const fn delimiter(&self) -> u8 {
        self.delimiter
    }
}

fn default_data_file() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_FILE)
}

fn default_delimiter() -> char {
    char::from(DEFAULT_DELIMITER)
}

/// The serialized versions of the configuration.
#[derive(Debug, Deserialize)]
#[serde(tag = "_version")]
enum Versions {
    #[serde(rename = "1")]
    V1 {
        #[serde(default = "default_data_file")]
        data_file: PathBuf,

        #[serde(default = "default_delimiter")]
        delimiter: char,

        #[serde(default)]
        keep_catalog_on_failed_load: bool,
    },
}

impl TryFrom<Versions> for Config {
    type Error = String;

    fn try_from(versions: Versions) -> Result<Self, Self::Error> {
        match versions {
            Versions::V1 {
                data_file,
                delimiter,
                keep_catalog_on_failed_load,
            } => {
                let delimiter = u8::try_from(delimiter)
                    .ok()
                    .filter(u8::is_ascii)
                    .ok_or_else(|| format!("delimiter '{delimiter}' is not an ASCII character"))?;
                Ok(Self {
                    data_file,
                    delimiter,
                    keep_catalog_on_failed_load,
                })
            }
        }
    }
}
