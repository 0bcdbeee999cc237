//! Explicit model-name registry.
//!
//! # Responsibility
//! - Hold the set of model names a repository may serve.
//! - Resolve a caller-supplied name to its descriptor.
//!
//! # Invariants
//! - Registered names match `^[A-Za-z][A-Za-z0-9_]*$`.
//! - A name is registered at most once.

use crate::model::record::Model;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static MODEL_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_]*$").expect("valid model name regex"));

/// Registration errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    InvalidModelName(String),
    DuplicateModel(String),
}

impl Display for RegistryError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidModelName(name) => write!(f, "invalid model name: `{name}`"),
            Self::DuplicateModel(name) => write!(f, "model already registered: `{name}`"),
        }
    }
}

impl Error for RegistryError {}

/// Queryable descriptor for one registered model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    name: String,
}

impl ModelDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Name → descriptor mapping handed to a repository at construction.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<String, ModelDescriptor>,
}

impl ModelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a model by name.
    pub fn register(&mut self, name: &str) -> Result<&ModelDescriptor, RegistryError> {
        if !is_valid_model_name(name) {
            return Err(RegistryError::InvalidModelName(name.to_string()));
        }
        if self.models.contains_key(name) {
            return Err(RegistryError::DuplicateModel(name.to_string()));
        }

        let descriptor = self
            .models
            .entry(name.to_string())
            .or_insert_with(|| ModelDescriptor {
                name: name.to_string(),
            });
        Ok(descriptor)
    }

    /// Registers a typed model under `T::MODEL_NAME`.
    pub fn register_model<T: Model>(&mut self) -> Result<&ModelDescriptor, RegistryError> {
        self.register(T::MODEL_NAME)
    }

    /// Builder-style registration for static model lists.
    pub fn with(mut self, name: &str) -> Result<Self, RegistryError> {
        self.register(name)?;
        Ok(self)
    }

    /// Resolves a model name. `None` when the name is blank or unknown.
    pub fn resolve(&self, name: &str) -> Option<&ModelDescriptor> {
        if name.trim().is_empty() {
            return None;
        }
        self.models.get(name)
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        self.models.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }
}

fn is_valid_model_name(name: &str) -> bool {
    MODEL_NAME_RE.is_match(name)
}
