//! Keysym -> [`Key`] translation for the Wayland backend.
//!
//! Grounded on `handlers/seat/keyboard.rs`'s consumption of
//! `sctk::seat::keyboard::KeyEvent`, which carries an `xkbcommon` keysym
//! per key event; translated here onto this crate's backend-agnostic `Key`
//! vocabulary instead of forwarding to `iced_native::keyboard::KeyCode`.

use crate::key::Key;
use xkbcommon::xkb;

/// Maps an `xkbcommon` keysym to a normalized [`Key`]. Unknown keysyms map to
/// [`Key::Unknown`] rather than panicking, since compose/dead keys and
/// vendor-specific keysyms are expected on some layouts.
pub fn keysym_to_key(sym: xkb::Keysym) -> Key {
    use xkb::keysyms::*;
    match sym.raw() {
        KEY_a..=KEY_z => from_letter_offset(sym.raw() - KEY_a),
        KEY_A..=KEY_Z => from_letter_offset(sym.raw() - KEY_A),
        KEY_0 => Key::Zero,
        KEY_1 => Key::One,
        KEY_2 => Key::Two,
        KEY_3 => Key::Three,
        KEY_4 => Key::Four,
        KEY_5 => Key::Five,
        KEY_6 => Key::Six,
        KEY_7 => Key::Seven,
        KEY_8 => Key::Eight,
        KEY_9 => Key::Nine,
        KEY_F1 => Key::F1,
        KEY_F2 => Key::F2,
        KEY_F3 => Key::F3,
        KEY_F4 => Key::F4,
        KEY_F5 => Key::F5,
        KEY_F6 => Key::F6,
        KEY_F7 => Key::F7,
        KEY_F8 => Key::F8,
        KEY_F9 => Key::F9,
        KEY_F10 => Key::F10,
        KEY_F11 => Key::F11,
        KEY_F12 => Key::F12,
        KEY_Escape => Key::Escape,
        KEY_Tab => Key::Tab,
        KEY_Caps_Lock => Key::CapsLock,
        KEY_Shift_L => Key::LeftShift,
        KEY_Shift_R => Key::RightShift,
        KEY_Control_L => Key::LeftControl,
        KEY_Control_R => Key::RightControl,
        KEY_Alt_L => Key::LeftAlt,
        KEY_Alt_R => Key::RightAlt,
        KEY_Super_L => Key::LeftCommand,
        KEY_Super_R => Key::RightCommand,
        KEY_space => Key::Space,
        KEY_Return => Key::Enter,
        KEY_BackSpace => Key::Backspace,
        KEY_Insert => Key::Insert,
        KEY_Delete => Key::Delete,
        KEY_Home => Key::Home,
        KEY_End => Key::End,
        KEY_Page_Up => Key::PageUp,
        KEY_Page_Down => Key::PageDown,
        KEY_Left => Key::ArrowLeft,
        KEY_Right => Key::ArrowRight,
        KEY_Up => Key::ArrowUp,
        KEY_Down => Key::ArrowDown,
        KEY_Print => Key::PrintScreen,
        KEY_Scroll_Lock => Key::ScrollLock,
        KEY_Pause => Key::Pause,
        KEY_grave => Key::Grave,
        KEY_minus => Key::Minus,
        KEY_equal => Key::Equals,
        KEY_bracketleft => Key::LeftBracket,
        KEY_bracketright => Key::RightBracket,
        KEY_backslash => Key::Backslash,
        KEY_semicolon => Key::Semicolon,
        KEY_apostrophe => Key::Apostrophe,
        KEY_comma => Key::Comma,
        KEY_period => Key::Period,
        KEY_slash => Key::Slash,
        KEY_Num_Lock => Key::NumLock,
        KEY_KP_0 => Key::NumpadZero,
        KEY_KP_1 => Key::NumpadOne,
        KEY_KP_2 => Key::NumpadTwo,
        KEY_KP_3 => Key::NumpadThree,
        KEY_KP_4 => Key::NumpadFour,
        KEY_KP_5 => Key::NumpadFive,
        KEY_KP_6 => Key::NumpadSix,
        KEY_KP_7 => Key::NumpadSeven,
        KEY_KP_8 => Key::NumpadEight,
        KEY_KP_9 => Key::NumpadNine,
        KEY_KP_Divide => Key::NumpadDivide,
        KEY_KP_Multiply => Key::NumpadMultiply,
        KEY_KP_Subtract => Key::NumpadMinus,
        KEY_KP_Add => Key::NumpadPlus,
        KEY_KP_Enter => Key::NumpadEnter,
        KEY_KP_Decimal => Key::NumpadDot,
        KEY_Menu => Key::Menu,
        _ => Key::Unknown,
    }
}

fn from_letter_offset(offset: u32) -> Key {
    const LETTERS: [Key; 26] = [
        Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I, Key::J, Key::K,
        Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R, Key::S, Key::T, Key::U, Key::V,
        Key::W, Key::X, Key::Y, Key::Z,
    ];
    LETTERS.get(offset as usize).copied().unwrap_or(Key::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_map() {
        assert_eq!(keysym_to_key(xkb::Keysym::from(xkb::keysyms::KEY_a)), Key::A);
        assert_eq!(keysym_to_key(xkb::Keysym::from(xkb::keysyms::KEY_Z)), Key::Z);
        assert_eq!(keysym_to_key(xkb::Keysym::from(xkb::keysyms::KEY_5)), Key::Five);
    }

    #[test]
    fn unmapped_keysym_is_unknown() {
        assert_eq!(keysym_to_key(xkb::Keysym::from(0xdead_beef)), Key::Unknown);
    }
}
