use std::{
    fs,
    path::{Path, PathBuf},
};

use color_eyre::{
    Result,
    eyre::{WrapErr, eyre},
};
use serde::{Deserialize, Serialize};

use crate::openai::DEFAULT_BASE_URL;

pub const API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const DEFAULT_VISION_MODEL: &str = "gpt-4o";

/// Contents of the optional config file. Every field may be left out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub base_url: Option<String>,
    pub vision_model: Option<String>,
    pub output_dir: Option<PathBuf>,
}

/// Fully resolved configuration, built once at startup.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub api_key: Option<String>,
    pub base_url: String,
    pub vision_model: String,
    pub output_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self::resolve(Config::default(), None)
    }
}

impl Settings {
    /// An API key from the environment wins over one from the config file.
    pub fn resolve(config: Config, env_api_key: Option<String>) -> Self {
        let Config {
            api_key,
            base_url,
            vision_model,
            output_dir,
        } = config;

        Self {
            api_key: non_empty(env_api_key).or(non_empty(api_key)),
            base_url: base_url.unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            vision_model: vision_model.unwrap_or_else(|| DEFAULT_VISION_MODEL.into()),
            output_dir: output_dir.unwrap_or_else(|| PathBuf::from(".")),
        }
    }

    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        if let Some(key) = non_empty(key) {
            self.api_key = Some(key);
        }
        self
    }

    pub fn with_vision_model(mut self, model: Option<String>) -> Self {
        if let Some(model) = model {
            self.vision_model = model;
        }
        self
    }

    pub fn with_output_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.output_dir = dir;
        }
        self
    }
}

fn non_empty(s: Option<String>) -> Option<String> {
    s.filter(|s| !s.trim().is_empty())
}

pub fn config_path() -> Result<PathBuf> {
    Ok(dirs::config_local_dir()
        .ok_or(eyre!("Couldn't get config dir"))?
        .join("imagegen.ron"))
}

pub fn load_ron_file<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let src = fs::read_to_string(path)?;
    Ok(ron::from_str(&src)?)
}

/// Loads `path` if given, otherwise the default config file if it exists.
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_ron_file(path).wrap_err_with(|| format!("loading {}", path.display())),
        None => {
            let path = config_path()?;
            if !path.exists() {
                Ok(Config::default())
            } else {
                load_ron_file(&path).wrap_err_with(|| format!("loading {}", path.display()))
            }
        }
    }
}
