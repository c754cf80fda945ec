//! Teardown registry: backend implementations keyed by preparation type.

use crate::response::Response;
use crate::store::PreparationRecord;
use std::collections::HashMap;

pub const PREPARE_JVM_TYPE: &str = "jvm";
pub const PREPARE_K8S_TYPE: &str = "k8s";

/// Reverses one kind of preparation.
pub trait Teardown {
    fn detach(&self, record: &PreparationRecord) -> Response;
}

#[derive(Default)]
pub struct TeardownRegistry {
    backends: HashMap<String, Box<dyn Teardown>>,
}

impl TeardownRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend, replacing any previous one for `program_type`.
    pub fn register(&mut self, program_type: impl Into<String>, teardown: Box<dyn Teardown>) {
        self.backends.insert(program_type.into(), teardown);
    }

    pub fn get(&self, program_type: &str) -> Option<&dyn Teardown> {
        self.backends.get(program_type).map(|b| b.as_ref())
    }

    /// Registered program types, sorted.
    pub fn program_types(&self) -> Vec<&str> {
        let mut types: Vec<&str> = self.backends.keys().map(String::as_str).collect();
        types.sort_unstable();
        types
    }
}
