use super::Config;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigLoaderError {
    #[error("error loading config: `{0}`")]
    IOError(#[from] std::io::Error),

    #[error("error loading config: `{0}`")]
    SerdeYamlError(#[from] serde_yaml::Error),
}

pub trait ConfigLoader {
    fn load_config(&self) -> Result<Config, ConfigLoaderError>;
}

/// Loads the configuration from a YAML file.
pub struct ConfigLoaderFile {
    path: PathBuf,
}

impl ConfigLoaderFile {
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
        }
    }
}

impl ConfigLoader for ConfigLoaderFile {
    fn load_config(&self) -> Result<Config, ConfigLoaderError> {
        let file = std::fs::File::open(&self.path)?;
        // An empty file is a valid configuration that keeps every default.
        if file.metadata()?.len() == 0 {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_reader(file)?)
    }
}
