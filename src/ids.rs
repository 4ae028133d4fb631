use std::sync::{Arc, Mutex};

use ulid::{Generator, Ulid};

/// Monotonic, collision-resistant id source shared by all requests. Documents
/// are keyed by these ids rather than anything the store generates.
#[derive(Clone)]
pub struct IdGenerator {
    inner: Arc<Mutex<Generator>>,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(Generator::new())),
        }
    }

    pub fn generate(&self) -> String {
        let mut generator = self.inner.lock().unwrap_or_else(|e| e.into_inner());
        match generator.generate() {
            Ok(id) => id.to_string(),
            // random-part overflow within one millisecond
            Err(_) => Ulid::new().to_string(),
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
