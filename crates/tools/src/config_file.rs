//! TOML generator configuration files.

use std::error::Error;
use std::path::{Path, PathBuf};
use std::{fmt, fs, io};

use levelgen::GeneratorConfig;

#[derive(Debug)]
pub enum ConfigLoadError {
    Read { path: PathBuf, source: io::Error },
    Parse { path: PathBuf, source: toml::de::Error },
    Invalid { path: PathBuf, reason: String },
}

impl fmt::Display for ConfigLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "failed to read config {}: {source}", path.display())
            }
            Self::Parse { path, source } => {
                write!(f, "failed to parse config {}: {source}", path.display())
            }
            Self::Invalid { path, reason } => {
                write!(f, "invalid config {}: {reason}", path.display())
            }
        }
    }
}

impl Error for ConfigLoadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid { .. } => None,
        }
    }
}

/// Reads a config file; missing keys take their defaults.
pub fn load_config(path: &Path) -> Result<GeneratorConfig, ConfigLoadError> {
    let text = fs::read_to_string(path)
        .map_err(|source| ConfigLoadError::Read { path: path.to_path_buf(), source })?;
    let config: GeneratorConfig = toml::from_str(&text)
        .map_err(|source| ConfigLoadError::Parse { path: path.to_path_buf(), source })?;
    validate(&config)
        .map_err(|reason| ConfigLoadError::Invalid { path: path.to_path_buf(), reason })?;
    Ok(config)
}

fn validate(config: &GeneratorConfig) -> Result<(), String> {
    if config.stress_threshold.is_nan() || config.stress_threshold <= 0.0 {
        return Err(format!("stress_threshold must be positive, got {}", config.stress_threshold));
    }
    for (name, relax) in [("relax", &config.relax), ("edge_relax", &config.edge_relax)] {
        if relax.max_move.is_nan() || relax.max_move <= 0.0 {
            return Err(format!("{name}.max_move must be positive, got {}", relax.max_move));
        }
    }
    Ok(())
}
