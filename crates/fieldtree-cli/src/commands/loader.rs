//! Reading models, overrides and values from files or stdin.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use fieldtree_core::{Model, ModelError};
use fieldtree_lib::{FieldTree, InferOptions, Overrides, Registry, infer_with_overrides};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] io::Error),

    #[error("failed to read '{path}': {source}")]
    File { path: PathBuf, source: io::Error },

    #[error("invalid model in '{path}': {source}")]
    Model { path: PathBuf, source: ModelError },

    #[error("invalid JSON in '{path}': {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error(transparent)]
    Lib(#[from] fieldtree_lib::Error),
}

/// What every command builds its tree from.
pub struct TreeInput {
    pub model_path: PathBuf,
    pub overrides: Option<PathBuf>,
    pub humanize_labels: bool,
}

impl TreeInput {
    pub fn options(&self) -> InferOptions {
        InferOptions::default().humanize_labels(self.humanize_labels)
    }

    pub fn model(&self) -> Result<Model, LoadError> {
        load_model(&self.model_path)
    }

    /// Infer and initialize with the builtin registry.
    pub fn tree(&self) -> Result<FieldTree, LoadError> {
        let model = self.model()?;
        let overrides = match &self.overrides {
            Some(path) => load_overrides(path)?,
            None => Overrides::new(),
        };
        let raw = infer_with_overrides(&model, &Registry::default(), &self.options(), &overrides);
        for key_path in raw.stale_overrides() {
            tracing::info!(path = %key_path, "stale override");
        }
        Ok(raw.initialize())
    }
}

/// Read a file, `-` meaning stdin.
pub fn read_input(path: &Path) -> Result<String, LoadError> {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .map_err(LoadError::Stdin)?;
        return Ok(buf);
    }
    fs::read_to_string(path).map_err(|source| LoadError::File {
        path: path.to_path_buf(),
        source,
    })
}

/// JSON, or the compact binary encoding for `.bin` files.
pub fn load_model(path: &Path) -> Result<Model, LoadError> {
    let model = if path.extension().is_some_and(|ext| ext == "bin") {
        let bytes = fs::read(path).map_err(|source| LoadError::File {
            path: path.to_path_buf(),
            source,
        })?;
        Model::from_binary(&bytes)
    } else {
        Model::from_json(&read_input(path)?)
    };
    model.map_err(|source| LoadError::Model {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_overrides(path: &Path) -> Result<Overrides, LoadError> {
    let text = read_input(path)?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_json(path: &Path) -> Result<serde_json::Value, LoadError> {
    let text = read_input(path)?;
    serde_json::from_str(&text).map_err(|source| LoadError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Print `error: …` and exit 1.
pub fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("error: {message}");
    std::process::exit(1);
}
