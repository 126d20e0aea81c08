/// The keys the viewer reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// `R`: extra spin of the cube while held.
    Rotate,
    /// `Escape`.
    Quit,
    Left,
    Right,
    Up,
    Down,
    LeftControl,
    LeftShift,
}

impl Key {
    pub const ALL: [Key; 8] = [
        Key::Rotate,
        Key::Quit,
        Key::Left,
        Key::Right,
        Key::Up,
        Key::Down,
        Key::LeftControl,
        Key::LeftShift,
    ];

    pub fn to_glfw(self) -> glfw::Key {
        match self {
            Key::Rotate => glfw::Key::R,
            Key::Quit => glfw::Key::Escape,
            Key::Left => glfw::Key::Left,
            Key::Right => glfw::Key::Right,
            Key::Up => glfw::Key::Up,
            Key::Down => glfw::Key::Down,
            Key::LeftControl => glfw::Key::LeftControl,
            Key::LeftShift => glfw::Key::LeftShift,
        }
    }
}

/// Level-triggered key state, sampled once per frame.
pub trait KeyInput {
    fn is_key_down(&self, key: Key) -> bool;
}

/// A fixed set of held keys.
impl KeyInput for [Key] {
    fn is_key_down(&self, key: Key) -> bool {
        self.contains(&key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_key_maps_to_a_distinct_glfw_key() {
        for (i, a) in Key::ALL.iter().enumerate() {
            for b in &Key::ALL[i + 1..] {
                assert_ne!(a.to_glfw(), b.to_glfw());
            }
        }
    }

    #[test]
    fn held_keys_slice() {
        let held = [Key::Left, Key::LeftShift];
        assert!(held[..].is_key_down(Key::Left));
        assert!(!held[..].is_key_down(Key::Right));
    }
}
