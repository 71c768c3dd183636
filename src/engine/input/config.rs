// Key bindings and remapping

use super::action::{default_bindings, Action, InputSource};
use std::collections::HashMap;

/// Which key drives which action. A key drives at most one action; an
/// action may have any number of keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputConfig {
    bindings: HashMap<InputSource, Action>,
}

impl InputConfig {
    /// No bindings at all
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    pub fn with_defaults() -> Self {
        default_bindings().into_iter().collect()
    }

    /// Point `source` at `action`, dropping its previous binding
    pub fn bind(&mut self, source: InputSource, action: Action) {
        if let Some(previous) = self.bindings.insert(source, action) {
            if previous != action {
                log::debug!("Rebound {:?}: {:?} -> {:?}", source, previous, action);
            }
        }
    }

    pub fn unbind_source(&mut self, source: InputSource) {
        self.bindings.remove(&source);
    }

    /// Remove every key bound to `action`
    pub fn unbind_action(&mut self, action: Action) {
        self.bindings.retain(|_, bound| *bound != action);
    }

    pub fn action_for(&self, source: InputSource) -> Option<Action> {
        self.bindings.get(&source).copied()
    }

    /// Keys bound to `action`, in no particular order
    pub fn sources_for(&self, action: Action) -> Vec<InputSource> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(source, _)| *source)
            .collect()
    }

    pub fn is_bound(&self, action: Action) -> bool {
        self.bindings.values().any(|bound| *bound == action)
    }

    pub fn clear(&mut self) {
        self.bindings.clear();
    }

    pub fn reset_to_defaults(&mut self) {
        *self = Self::with_defaults();
    }
}

impl Default for InputConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl FromIterator<(InputSource, Action)> for InputConfig {
    fn from_iter<I: IntoIterator<Item = (InputSource, Action)>>(iter: I) -> Self {
        let mut config = Self::new();
        for (source, action) in iter {
            config.bind(source, action);
        }
        config
    }
}
