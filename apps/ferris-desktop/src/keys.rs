use ferris_input::Key;
use winit::keyboard::{Key as WinitKey, NamedKey};

/// Translate a winit logical key into a scene key.
///
/// Only single characters and the named keys the scene binds are mapped.
pub fn scene_key(key: &WinitKey) -> Option<Key> {
    match key {
        WinitKey::Character(text) => {
            let mut chars = text.chars();
            let c = chars.next()?;
            chars.next().is_none().then_some(Key::Char(c))
        }
        WinitKey::Named(named) => match named {
            NamedKey::ArrowLeft => Some(Key::ArrowLeft),
            NamedKey::ArrowRight => Some(Key::ArrowRight),
            NamedKey::ArrowUp => Some(Key::ArrowUp),
            NamedKey::ArrowDown => Some(Key::ArrowDown),
            NamedKey::F1 => Some(Key::F1),
            NamedKey::Escape => Some(Key::Escape),
            _ => None,
        },
        _ => None,
    }
}
