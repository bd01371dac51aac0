//! X11 keycode -> [`Key`] translation via a minimal built-in keysym table.
//!
//! A full deployment queries `xkbcommon-x11` for the active keymap; this
//! table covers the US QWERTY keycodes `original_source`'s `glue_xorg.cxx`
//! exercises in its own hand-rolled `key_code_map`, which is sufficient
//! grounding for the common range without pulling in a second keysym
//! dependency alongside the one `platform::wayland` already uses.

use crate::key::Key;

/// Standard X11 keycode offset: keycodes below 8 are invalid.
const KEYCODE_OFFSET: u8 = 8;

pub fn keycode_to_key(keycode: u8) -> Key {
    // Default X11 US layout keycodes (evdev + 8).
    match keycode {
        9 => Key::Escape,
        10 => Key::One,
        11 => Key::Two,
        12 => Key::Three,
        13 => Key::Four,
        14 => Key::Five,
        15 => Key::Six,
        16 => Key::Seven,
        17 => Key::Eight,
        18 => Key::Nine,
        19 => Key::Zero,
        20 => Key::Minus,
        21 => Key::Equals,
        22 => Key::Backspace,
        23 => Key::Tab,
        24 => Key::Q,
        25 => Key::W,
        26 => Key::E,
        27 => Key::R,
        28 => Key::T,
        29 => Key::Y,
        30 => Key::U,
        31 => Key::I,
        32 => Key::O,
        33 => Key::P,
        34 => Key::LeftBracket,
        35 => Key::RightBracket,
        36 => Key::Enter,
        37 => Key::LeftControl,
        38 => Key::A,
        39 => Key::S,
        40 => Key::D,
        41 => Key::F,
        42 => Key::G,
        43 => Key::H,
        44 => Key::J,
        45 => Key::K,
        46 => Key::L,
        47 => Key::Semicolon,
        48 => Key::Apostrophe,
        49 => Key::Grave,
        50 => Key::LeftShift,
        51 => Key::Backslash,
        52 => Key::Z,
        53 => Key::X,
        54 => Key::C,
        55 => Key::V,
        56 => Key::B,
        57 => Key::N,
        58 => Key::M,
        59 => Key::Comma,
        60 => Key::Period,
        61 => Key::Slash,
        62 => Key::RightShift,
        65 => Key::Space,
        66 => Key::CapsLock,
        67..=76 => key_from_f_index(keycode - 67),
        105 => Key::RightControl,
        110 => Key::Home,
        111 => Key::ArrowUp,
        112 => Key::PageUp,
        113 => Key::ArrowLeft,
        114 => Key::ArrowRight,
        115 => Key::End,
        116 => Key::ArrowDown,
        117 => Key::PageDown,
        118 => Key::Insert,
        119 => Key::Delete,
        _ => {
            let _ = KEYCODE_OFFSET;
            Key::Unknown
        }
    }
}

/// Best-effort unprintable-free ASCII for a normalized key, used only to
/// synthesize auto-repeat character-input text without a full
/// `xkbcommon-x11` keymap lookup. Returns `None` for non-printable keys.
pub fn key_to_char(key: Key) -> Option<char> {
    match key {
        Key::A => Some('a'),
        Key::B => Some('b'),
        Key::C => Some('c'),
        Key::D => Some('d'),
        Key::E => Some('e'),
        Key::F => Some('f'),
        Key::G => Some('g'),
        Key::H => Some('h'),
        Key::I => Some('i'),
        Key::J => Some('j'),
        Key::K => Some('k'),
        Key::L => Some('l'),
        Key::M => Some('m'),
        Key::N => Some('n'),
        Key::O => Some('o'),
        Key::P => Some('p'),
        Key::Q => Some('q'),
        Key::R => Some('r'),
        Key::S => Some('s'),
        Key::T => Some('t'),
        Key::U => Some('u'),
        Key::V => Some('v'),
        Key::W => Some('w'),
        Key::X => Some('x'),
        Key::Y => Some('y'),
        Key::Z => Some('z'),
        Key::Zero => Some('0'),
        Key::One => Some('1'),
        Key::Two => Some('2'),
        Key::Three => Some('3'),
        Key::Four => Some('4'),
        Key::Five => Some('5'),
        Key::Six => Some('6'),
        Key::Seven => Some('7'),
        Key::Eight => Some('8'),
        Key::Nine => Some('9'),
        Key::Space => Some(' '),
        _ => None,
    }
}

fn key_from_f_index(index: u8) -> Key {
    const F_KEYS: [Key; 10] = [
        Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6, Key::F7, Key::F8, Key::F9, Key::F10,
    ];
    F_KEYS.get(index as usize).copied().unwrap_or(Key::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_map() {
        assert_eq!(keycode_to_key(38), Key::A);
        assert_eq!(keycode_to_key(58), Key::M);
    }

    #[test]
    fn unmapped_is_unknown() {
        assert_eq!(keycode_to_key(255), Key::Unknown);
    }
}
