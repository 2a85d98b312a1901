//! Keyboard binding table
//!
//! Keys are resolved once, through a single table, into [`Action`]s that the
//! [`ViewerContext`](crate::context::ViewerContext) carries out. Press and
//! release are separate entries, so holding a key and letting go are bound
//! independently.

use std::collections::HashMap;

use winit::keyboard::{Key, NamedKey};

use super::rotation::Arrow;

/// Layout-independent identifier of a key the viewer cares about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyId {
    /// A character key, stored lowercase
    Char(char),
    Arrow(Arrow),
    Escape,
}

impl KeyId {
    /// Maps a winit logical key, ignoring keys the viewer has no use for
    pub fn from_winit(key: &Key) -> Option<Self> {
        match key {
            Key::Named(NamedKey::ArrowUp) => Some(KeyId::Arrow(Arrow::Up)),
            Key::Named(NamedKey::ArrowDown) => Some(KeyId::Arrow(Arrow::Down)),
            Key::Named(NamedKey::ArrowLeft) => Some(KeyId::Arrow(Arrow::Left)),
            Key::Named(NamedKey::ArrowRight) => Some(KeyId::Arrow(Arrow::Right)),
            Key::Named(NamedKey::Escape) => Some(KeyId::Escape),
            Key::Character(text) => {
                let mut chars = text.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(KeyId::Char(c.to_ascii_lowercase())),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for KeyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyId::Char(c) => write!(f, "{}", c),
            KeyId::Arrow(arrow) => write!(f, "Arrow{:?}", arrow),
            KeyId::Escape => f.write_str("Escape"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyPhase {
    Pressed,
    Released,
}

/// Everything a key can make the viewer do
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Descend,
    Ascend,
    NextSibling,
    PreviousSibling,
    ShowAxes,
    HideAllAxes,
    Rotate(Arrow),
    ResetRoot,
    Exit,
}

impl Action {
    pub fn description(self) -> &'static str {
        match self {
            Action::Descend => "select child",
            Action::Ascend => "select parent",
            Action::NextSibling => "next sibling",
            Action::PreviousSibling => "previous sibling",
            Action::ShowAxes => "show axes (hold)",
            Action::HideAllAxes => "hide all axes",
            Action::Rotate(Arrow::Up) => "rotate up",
            Action::Rotate(Arrow::Down) => "rotate down",
            Action::Rotate(Arrow::Left) => "rotate left",
            Action::Rotate(Arrow::Right) => "rotate right",
            Action::ResetRoot => "reset robot position",
            Action::Exit => "quit",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Binding {
    action: Action,
    /// Whether auto-repeat events of a held key trigger the action again
    repeat: bool,
}

/// Table from (key, phase) to action
#[derive(Debug, Clone)]
pub struct InputMap {
    bindings: HashMap<(KeyId, KeyPhase), Binding>,
}

impl Default for InputMap {
    /// The viewer's standard controls
    fn default() -> Self {
        use KeyPhase::{Pressed, Released};

        Self::empty()
            .bind(KeyId::Char('s'), Pressed, Action::Descend)
            .bind(KeyId::Char('w'), Pressed, Action::Ascend)
            .bind(KeyId::Char('d'), Pressed, Action::NextSibling)
            .bind(KeyId::Char('a'), Pressed, Action::PreviousSibling)
            .bind_repeating(KeyId::Char('c'), Pressed, Action::ShowAxes)
            .bind(KeyId::Char('c'), Released, Action::HideAllAxes)
            .bind_repeating(KeyId::Arrow(Arrow::Up), Pressed, Action::Rotate(Arrow::Up))
            .bind_repeating(KeyId::Arrow(Arrow::Down), Pressed, Action::Rotate(Arrow::Down))
            .bind_repeating(KeyId::Arrow(Arrow::Left), Pressed, Action::Rotate(Arrow::Left))
            .bind_repeating(KeyId::Arrow(Arrow::Right), Pressed, Action::Rotate(Arrow::Right))
            .bind(KeyId::Char('r'), Pressed, Action::ResetRoot)
            .bind(KeyId::Escape, Pressed, Action::Exit)
    }
}

impl InputMap {
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Binds `action`; auto-repeat of a held key is ignored
    pub fn bind(mut self, key: KeyId, phase: KeyPhase, action: Action) -> Self {
        self.bindings.insert((key, phase), Binding { action, repeat: false });
        self
    }

    /// Binds `action` so that every auto-repeat event fires it again
    pub fn bind_repeating(mut self, key: KeyId, phase: KeyPhase, action: Action) -> Self {
        self.bindings.insert((key, phase), Binding { action, repeat: true });
        self
    }

    pub fn resolve(&self, key: KeyId, phase: KeyPhase, is_repeat: bool) -> Option<Action> {
        let binding = self.bindings.get(&(key, phase))?;
        if is_repeat && !binding.repeat {
            return None;
        }
        Some(binding.action)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Press bindings as (key, description), sorted for display
    pub fn describe(&self) -> Vec<(String, &'static str)> {
        let mut rows: Vec<(String, &'static str)> = self
            .bindings
            .iter()
            .filter(|((_, phase), _)| *phase == KeyPhase::Pressed)
            .map(|((key, _), binding)| (key.to_string(), binding.action.description()))
            .collect();
        rows.sort();
        rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_bindings() {
        let map = InputMap::default();
        let press = |key| map.resolve(key, KeyPhase::Pressed, false);

        assert_eq!(press(KeyId::Char('s')), Some(Action::Descend));
        assert_eq!(press(KeyId::Char('w')), Some(Action::Ascend));
        assert_eq!(press(KeyId::Char('d')), Some(Action::NextSibling));
        assert_eq!(press(KeyId::Char('a')), Some(Action::PreviousSibling));
        assert_eq!(press(KeyId::Char('c')), Some(Action::ShowAxes));
        assert_eq!(press(KeyId::Char('r')), Some(Action::ResetRoot));
        assert_eq!(
            press(KeyId::Arrow(Arrow::Left)),
            Some(Action::Rotate(Arrow::Left))
        );
        assert_eq!(press(KeyId::Char('x')), None);
    }

    #[test]
    fn test_only_c_has_a_release_binding() {
        let map = InputMap::default();
        assert_eq!(
            map.resolve(KeyId::Char('c'), KeyPhase::Released, false),
            Some(Action::HideAllAxes)
        );
        let releases = ['s', 'w', 'a', 'd', 'r']
            .iter()
            .filter_map(|&c| map.resolve(KeyId::Char(c), KeyPhase::Released, false))
            .count();
        assert_eq!(releases, 0);
    }

    #[test]
    fn test_repeat_only_fires_repeating_bindings() {
        let map = InputMap::default();
        assert_eq!(
            map.resolve(KeyId::Arrow(Arrow::Up), KeyPhase::Pressed, true),
            Some(Action::Rotate(Arrow::Up))
        );
        assert_eq!(map.resolve(KeyId::Char('s'), KeyPhase::Pressed, true), None);
    }

    #[test]
    fn test_rebinding_replaces_entry() {
        let map = InputMap::empty()
            .bind(KeyId::Char('s'), KeyPhase::Pressed, Action::Descend)
            .bind(KeyId::Char('s'), KeyPhase::Pressed, Action::Ascend);
        assert_eq!(map.len(), 1);
        assert_eq!(
            map.resolve(KeyId::Char('s'), KeyPhase::Pressed, false),
            Some(Action::Ascend)
        );
    }

    #[test]
    fn test_winit_key_mapping() {
        assert_eq!(
            KeyId::from_winit(&Key::Named(NamedKey::ArrowDown)),
            Some(KeyId::Arrow(Arrow::Down))
        );
        assert_eq!(
            KeyId::from_winit(&Key::Character("S".into())),
            Some(KeyId::Char('s'))
        );
        assert_eq!(KeyId::from_winit(&Key::Character("ab".into())), None);
        assert_eq!(KeyId::from_winit(&Key::Named(NamedKey::Tab)), None);
    }

    #[test]
    fn test_describe_lists_press_bindings() {
        let rows = InputMap::default().describe();
        assert_eq!(rows.len(), 11);
        assert!(rows.contains(&("s".to_string(), "select child")));
    }
}
