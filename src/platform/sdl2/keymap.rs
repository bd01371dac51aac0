//! `sdl2::keyboard::Keycode` -> [`Key`] translation.

use crate::key::Key;
use sdl2::keyboard::Keycode;

pub fn keycode_to_key(code: Keycode) -> Key {
    match code {
        Keycode::A => Key::A, Keycode::B => Key::B, Keycode::C => Key::C, Keycode::D => Key::D,
        Keycode::E => Key::E, Keycode::F => Key::F, Keycode::G => Key::G, Keycode::H => Key::H,
        Keycode::I => Key::I, Keycode::J => Key::J, Keycode::K => Key::K, Keycode::L => Key::L,
        Keycode::M => Key::M, Keycode::N => Key::N, Keycode::O => Key::O, Keycode::P => Key::P,
        Keycode::Q => Key::Q, Keycode::R => Key::R, Keycode::S => Key::S, Keycode::T => Key::T,
        Keycode::U => Key::U, Keycode::V => Key::V, Keycode::W => Key::W, Keycode::X => Key::X,
        Keycode::Y => Key::Y, Keycode::Z => Key::Z,
        Keycode::Num0 => Key::Zero, Keycode::Num1 => Key::One, Keycode::Num2 => Key::Two,
        Keycode::Num3 => Key::Three, Keycode::Num4 => Key::Four, Keycode::Num5 => Key::Five,
        Keycode::Num6 => Key::Six, Keycode::Num7 => Key::Seven, Keycode::Num8 => Key::Eight,
        Keycode::Num9 => Key::Nine,
        Keycode::F1 => Key::F1, Keycode::F2 => Key::F2, Keycode::F3 => Key::F3, Keycode::F4 => Key::F4,
        Keycode::F5 => Key::F5, Keycode::F6 => Key::F6, Keycode::F7 => Key::F7, Keycode::F8 => Key::F8,
        Keycode::F9 => Key::F9, Keycode::F10 => Key::F10, Keycode::F11 => Key::F11, Keycode::F12 => Key::F12,
        Keycode::Escape => Key::Escape,
        Keycode::Tab => Key::Tab,
        Keycode::CapsLock => Key::CapsLock,
        Keycode::LShift => Key::LeftShift,
        Keycode::RShift => Key::RightShift,
        Keycode::LCtrl => Key::LeftControl,
        Keycode::RCtrl => Key::RightControl,
        Keycode::LAlt => Key::LeftAlt,
        Keycode::RAlt => Key::RightAlt,
        Keycode::LGui => Key::LeftCommand,
        Keycode::RGui => Key::RightCommand,
        Keycode::Space => Key::Space,
        Keycode::Return => Key::Enter,
        Keycode::Backspace => Key::Backspace,
        Keycode::Insert => Key::Insert,
        Keycode::Delete => Key::Delete,
        Keycode::Home => Key::Home,
        Keycode::End => Key::End,
        Keycode::PageUp => Key::PageUp,
        Keycode::PageDown => Key::PageDown,
        Keycode::Left => Key::ArrowLeft,
        Keycode::Right => Key::ArrowRight,
        Keycode::Up => Key::ArrowUp,
        Keycode::Down => Key::ArrowDown,
        Keycode::PrintScreen => Key::PrintScreen,
        Keycode::ScrollLock => Key::ScrollLock,
        Keycode::Pause => Key::Pause,
        Keycode::Backquote => Key::Grave,
        Keycode::Minus => Key::Minus,
        Keycode::Equals => Key::Equals,
        Keycode::LeftBracket => Key::LeftBracket,
        Keycode::RightBracket => Key::RightBracket,
        Keycode::Backslash => Key::Backslash,
        Keycode::Semicolon => Key::Semicolon,
        Keycode::Quote => Key::Apostrophe,
        Keycode::Comma => Key::Comma,
        Keycode::Period => Key::Period,
        Keycode::Slash => Key::Slash,
        Keycode::NumLockClear => Key::NumLock,
        Keycode::Kp0 => Key::NumpadZero, Keycode::Kp1 => Key::NumpadOne, Keycode::Kp2 => Key::NumpadTwo,
        Keycode::Kp3 => Key::NumpadThree, Keycode::Kp4 => Key::NumpadFour, Keycode::Kp5 => Key::NumpadFive,
        Keycode::Kp6 => Key::NumpadSix, Keycode::Kp7 => Key::NumpadSeven, Keycode::Kp8 => Key::NumpadEight,
        Keycode::Kp9 => Key::NumpadNine,
        Keycode::KpDivide => Key::NumpadDivide,
        Keycode::KpMultiply => Key::NumpadMultiply,
        Keycode::KpMinus => Key::NumpadMinus,
        Keycode::KpPlus => Key::NumpadPlus,
        Keycode::KpEnter => Key::NumpadEnter,
        Keycode::KpPeriod => Key::NumpadDot,
        Keycode::Menu | Keycode::Application => Key::Menu,
        _ => Key::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_and_digits_map() {
        assert_eq!(keycode_to_key(Keycode::A), Key::A);
        assert_eq!(keycode_to_key(Keycode::Num5), Key::Five);
    }

    #[test]
    fn unmapped_keycode_is_unknown() {
        assert_eq!(keycode_to_key(Keycode::Power), Key::Unknown);
    }
}
