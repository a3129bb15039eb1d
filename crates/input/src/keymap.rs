use crate::action::Action;
use std::collections::HashMap;

/// A key as seen by the scene, independent of the windowing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// A printable character, as typed (case preserved).
    Char(char),
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    F1,
    Escape,
}

/// Key-to-action bindings.
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: HashMap<Key, Action>,
}

impl Default for KeyMap {
    /// `a`/`s`/`l` toggles, arrows for the camera, F1 for the HUD, Escape to quit.
    fn default() -> Self {
        let mut map = Self::empty();
        map.bind(Key::Char('a'), Action::ToggleAnimation);
        map.bind(Key::Char('s'), Action::ToggleDirectionalLight);
        map.bind(Key::Char('l'), Action::TogglePointLight);
        map.bind(Key::ArrowLeft, Action::OrbitLeft);
        map.bind(Key::ArrowRight, Action::OrbitRight);
        map.bind(Key::ArrowUp, Action::RaiseCamera);
        map.bind(Key::ArrowDown, Action::LowerCamera);
        map.bind(Key::F1, Action::ToggleHud);
        map.bind(Key::Escape, Action::Quit);
        map
    }
}

impl KeyMap {
    /// A map with no bindings.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Bind `key` to `action`, returning the action it replaced.
    pub fn bind(&mut self, key: Key, action: Action) -> Option<Action> {
        let previous = self.bindings.insert(key, action);
        if let Some(prev) = previous {
            tracing::debug!("rebound {key:?}: {prev:?} -> {action:?}");
        }
        previous
    }

    pub fn unbind(&mut self, key: Key) -> Option<Action> {
        self.bindings.remove(&key)
    }

    /// Look up the action for a key press.
    pub fn action_for(&self, key: Key) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    /// All keys bound to `action`, in no particular order.
    pub fn keys_for(&self, action: Action) -> Vec<Key> {
        self.bindings
            .iter()
            .filter(|&(_, a)| *a == action)
            .map(|(k, _)| *k)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
