//! The abstract key vocabulary and per-backend lookup tables.
//!
//! Each backend owns a fixed-size `[Key; 256]` table indexed by its native
//! scancode/keysym byte. Entries not listed map to [`Key::Unknown`]. Tables
//! are hand-curated constants, grounded on `original_source/.../key_code_map.hxx`
//! for each platform.

/// Backend-agnostic key identity. The UI toolkit above owns key semantics
/// (text editing, shortcuts); this crate only normalizes native codes into
/// this vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum Key {
    Unknown,
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,
    Zero, One, Two, Three, Four, Five, Six, Seven, Eight, Nine,
    F1, F2, F3, F4, F5, F6, F7, F8, F9, F10, F11, F12,
    Escape,
    Tab,
    CapsLock,
    LeftShift,
    RightShift,
    LeftControl,
    RightControl,
    LeftAlt,
    RightAlt,
    LeftCommand,
    RightCommand,
    Space,
    Enter,
    Backspace,
    Insert,
    Delete,
    Home,
    End,
    PageUp,
    PageDown,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    PrintScreen,
    ScrollLock,
    Pause,
    Grave,
    Minus,
    Equals,
    LeftBracket,
    RightBracket,
    Backslash,
    Semicolon,
    Apostrophe,
    Comma,
    Period,
    Slash,
    NumLock,
    NumpadZero, NumpadOne, NumpadTwo, NumpadThree, NumpadFour,
    NumpadFive, NumpadSix, NumpadSeven, NumpadEight, NumpadNine,
    NumpadDivide,
    NumpadMultiply,
    NumpadMinus,
    NumpadPlus,
    NumpadEnter,
    NumpadDot,
    Menu,
}

/// A 256-entry lookup table from a native scancode byte to an abstract [`Key`].
/// Indices not curated by the owning backend default to [`Key::Unknown`].
pub type KeyMap = [Key; 256];

/// Builds a [`KeyMap`] filled with [`Key::Unknown`], to be overridden at the
/// curated indices by each backend's `const fn` table builder.
pub const fn empty_map() -> KeyMap {
    [Key::Unknown; 256]
}
