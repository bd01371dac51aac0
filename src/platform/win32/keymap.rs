//! Virtual-key code -> [`Key`] translation.

use crate::key::Key;
use windows_sys::Win32::UI::Input::KeyboardAndMouse::*;

pub fn vk_to_key(vk: u32) -> Key {
    match vk as u16 {
        VK_ESCAPE => Key::Escape,
        VK_TAB => Key::Tab,
        VK_CAPITAL => Key::CapsLock,
        VK_LSHIFT | VK_SHIFT => Key::LeftShift,
        VK_RSHIFT => Key::RightShift,
        VK_LCONTROL | VK_CONTROL => Key::LeftControl,
        VK_RCONTROL => Key::RightControl,
        VK_LMENU | VK_MENU => Key::LeftAlt,
        VK_RMENU => Key::RightAlt,
        VK_LWIN => Key::LeftCommand,
        VK_RWIN => Key::RightCommand,
        VK_SPACE => Key::Space,
        VK_RETURN => Key::Enter,
        VK_BACK => Key::Backspace,
        VK_INSERT => Key::Insert,
        VK_DELETE => Key::Delete,
        VK_HOME => Key::Home,
        VK_END => Key::End,
        VK_PRIOR => Key::PageUp,
        VK_NEXT => Key::PageDown,
        VK_LEFT => Key::ArrowLeft,
        VK_RIGHT => Key::ArrowRight,
        VK_UP => Key::ArrowUp,
        VK_DOWN => Key::ArrowDown,
        VK_SNAPSHOT => Key::PrintScreen,
        VK_SCROLL => Key::ScrollLock,
        VK_PAUSE => Key::Pause,
        VK_NUMLOCK => Key::NumLock,
        VK_DIVIDE => Key::NumpadDivide,
        VK_MULTIPLY => Key::NumpadMultiply,
        VK_SUBTRACT => Key::NumpadMinus,
        VK_ADD => Key::NumpadPlus,
        VK_DECIMAL => Key::NumpadDot,
        VK_APPS => Key::Menu,
        0x30..=0x39 => digit((vk as u16) - 0x30),
        0x41..=0x5A => letter((vk as u16) - 0x41),
        0x60..=0x69 => numpad_digit((vk as u16) - 0x60),
        0x70..=0x7B => function((vk as u16) - 0x70),
        _ => Key::Unknown,
    }
}

fn digit(offset: u16) -> Key {
    const DIGITS: [Key; 10] = [
        Key::Zero, Key::One, Key::Two, Key::Three, Key::Four, Key::Five, Key::Six, Key::Seven,
        Key::Eight, Key::Nine,
    ];
    DIGITS[offset as usize]
}

fn numpad_digit(offset: u16) -> Key {
    const DIGITS: [Key; 10] = [
        Key::NumpadZero, Key::NumpadOne, Key::NumpadTwo, Key::NumpadThree, Key::NumpadFour,
        Key::NumpadFive, Key::NumpadSix, Key::NumpadSeven, Key::NumpadEight, Key::NumpadNine,
    ];
    DIGITS[offset as usize]
}

fn letter(offset: u16) -> Key {
    const LETTERS: [Key; 26] = [
        Key::A, Key::B, Key::C, Key::D, Key::E, Key::F, Key::G, Key::H, Key::I, Key::J, Key::K,
        Key::L, Key::M, Key::N, Key::O, Key::P, Key::Q, Key::R, Key::S, Key::T, Key::U, Key::V,
        Key::W, Key::X, Key::Y, Key::Z,
    ];
    LETTERS[offset as usize]
}

fn function(offset: u16) -> Key {
    const F_KEYS: [Key; 12] = [
        Key::F1, Key::F2, Key::F3, Key::F4, Key::F5, Key::F6, Key::F7, Key::F8, Key::F9, Key::F10,
        Key::F11, Key::F12,
    ];
    F_KEYS.get(offset as usize).copied().unwrap_or(Key::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_map() {
        assert_eq!(vk_to_key(0x41), Key::A);
        assert_eq!(vk_to_key(0x35), Key::Five);
    }

    #[test]
    fn unmapped_is_unknown() {
        assert_eq!(vk_to_key(0xE8), Key::Unknown);
    }
}
