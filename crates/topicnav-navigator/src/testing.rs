//! In-memory content source for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::source::{ContentSource, FetchError};

/// Serves bodies from a map and records every request.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    bodies: Arc<Mutex<HashMap<String, String>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(self, target: &str, body: &str) -> Self {
        self.bodies
            .lock()
            .unwrap()
            .insert(target.to_string(), body.to_string());
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

impl ContentSource for MemorySource {
    async fn fetch(&self, target: &str) -> Result<String, FetchError> {
        self.requests.lock().unwrap().push(target.to_string());
        self.bodies
            .lock()
            .unwrap()
            .get(target)
            .cloned()
            .ok_or_else(|| FetchError::Read {
                path: target.to_string(),
                message: "not found".to_string(),
            })
    }
}
