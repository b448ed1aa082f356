//! Held-key tracking.

use std::collections::HashMap;

/// Which raw keys are currently held down.
///
/// Entries are flipped one at a time by press/release events and never
/// cleared in bulk; click handling only reads them.
#[derive(Debug, Clone, Default)]
pub struct HeldKeys {
    keys: HashMap<String, bool>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn press(&mut self, key: &str) {
        self.keys.insert(key.to_string(), true);
    }

    pub fn release(&mut self, key: &str) {
        self.keys.insert(key.to_string(), false);
    }

    pub fn is_held(&self, key: &str) -> bool {
        self.keys.get(key).copied().unwrap_or(false)
    }
}
