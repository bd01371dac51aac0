//! The uniform, backend-agnostic input-event vocabulary and the
//! `GuiContext` sink it is delivered into.
//!
//! Grounded on `sctk_event::SctkEvent`'s enum shape, generalized from
//! Wayland-specific payloads to an abstract, backend-independent vocabulary
//! and stripped of the `iced_native` event types that module forwarded to.

use crate::dpi::{LogicalPosition, LogicalSize};
use crate::key::Key;
use crate::window::WindowId;

/// Stable integer identifying a pointer stream. `0` is the mouse; touch
/// pointers are `slot + 1`.
pub type PointerId = u32;

/// The mouse pointer's reserved id.
pub const MOUSE_POINTER_ID: PointerId = 0;

/// A mouse button or synthesized wheel direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    WheelUp,
    WheelDown,
    WheelLeft,
    WheelRight,
    Side,
    Extra,
    Forward,
    Back,
    Task,
}

/// Press/release discriminant shared by mouse buttons and keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Press,
    Release,
}

/// Lazily-composed UTF-32 text for a character-input event. Constructing the
/// string is deferred because text composition (IME lookups, xkbcommon
/// state queries) is expensive and should be skipped when the toolkit does
/// not register a text input target.
pub struct CharacterProvider<'a> {
    compose: Box<dyn FnOnce() -> String + 'a>,
}

impl<'a> CharacterProvider<'a> {
    pub fn new(compose: impl FnOnce() -> String + 'a) -> Self {
        Self {
            compose: Box::new(compose),
        }
    }

    /// Runs the composition closure and returns the resulting text.
    pub fn resolve(self) -> String {
        (self.compose)()
    }
}

impl<'a> std::fmt::Debug for CharacterProvider<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("CharacterProvider(..)")
    }
}

/// The out-of-window sentinel position used for synthetic release events
/// (a touch cancel that arrives with no last-known on-screen position).
pub const OUT_OF_WINDOW: (f32, f32) = (-1.0, -1.0);

/// Normalized event vocabulary delivered to a [`GuiContext`].
#[derive(Debug)]
pub enum GuiEvent<'a> {
    MouseMove {
        pos: (f32, f32),
        pointer_id: PointerId,
    },
    MouseButton {
        action: Action,
        pos: (f32, f32),
        button: MouseButton,
        pointer_id: PointerId,
    },
    MouseHover {
        is_hovered: bool,
        pointer_id: PointerId,
    },
    Key {
        action: Action,
        key: Key,
    },
    CharacterInput {
        provider: CharacterProvider<'a>,
    },
    Resize {
        size: LogicalSize<u32>,
    },
    Close,
}

/// The per-window sink a retained-mode UI toolkit provides to receive
/// normalized input and lifecycle events, and to render its content.
///
/// This is the one collaborator this crate treats as opaque: the toolkit's
/// widget tree, layout, and painting are not this crate's concern. The
/// app-wide tick that drives *when* to render lives on
/// [`crate::updater::Updater`], a separate, single, application-owned
/// collaborator.
pub trait GuiContext {
    /// Renders the current frame. Called with the window's context already
    /// bound and the framebuffer already cleared.
    fn render(&mut self);

    /// Sets the logical viewport size, called once per coalesced resize.
    fn set_viewport(&mut self, size: LogicalSize<u32>);

    /// Delivers a normalized input or lifecycle event.
    fn handle_event(&mut self, window: WindowId, event: GuiEvent<'_>);
}

/// Abstract mouse cursor shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CursorShape {
    None,
    Arrow,
    LeftRightArrow,
    UpDownArrow,
    AllDirectionsArrow,
    LeftSide,
    RightSide,
    TopSide,
    BottomSide,
    TopLeftCorner,
    TopRightCorner,
    BottomLeftCorner,
    BottomRightCorner,
    IndexFinger,
    Grab,
    Caret,
}

impl CursorShape {
    /// All cursor shapes, for cache-prewarming or exhaustive testing.
    pub const ALL: [CursorShape; 16] = [
        CursorShape::None,
        CursorShape::Arrow,
        CursorShape::LeftRightArrow,
        CursorShape::UpDownArrow,
        CursorShape::AllDirectionsArrow,
        CursorShape::LeftSide,
        CursorShape::RightSide,
        CursorShape::TopSide,
        CursorShape::BottomSide,
        CursorShape::TopLeftCorner,
        CursorShape::TopRightCorner,
        CursorShape::BottomLeftCorner,
        CursorShape::BottomRightCorner,
        CursorShape::IndexFinger,
        CursorShape::Grab,
        CursorShape::Caret,
    ];
}

/// Expands a quantized wheel delta into `clicks` alternating press/release
/// pairs: the OS reports a discrete detent count, not a button that stays
/// held, so each detent is a full press-then-release rather than one press
/// with `clicks` left outstanding.
pub fn wheel_clicks_to_actions(clicks: u32) -> impl Iterator<Item = Action> {
    (0..clicks).flat_map(|_| [Action::Press, Action::Release])
}

/// Normalizes an X11 button number to a [`MouseButton`]: `1->left,
/// 2->middle, 3->right, 4->wheel_up, 5->wheel_down, 6->wheel_left,
/// 7->wheel_right`; anything else maps to `middle`.
pub fn x11_button_number_to_enum(button: u32) -> MouseButton {
    match button {
        1 => MouseButton::Left,
        2 => MouseButton::Middle,
        3 => MouseButton::Right,
        4 => MouseButton::WheelUp,
        5 => MouseButton::WheelDown,
        6 => MouseButton::WheelLeft,
        7 => MouseButton::WheelRight,
        _ => MouseButton::Middle,
    }
}

/// A touch slot tracker: `pointer_id = slot + 1`, and a `cancel()` that
/// synthesizes releases at [`OUT_OF_WINDOW`] for every live slot before
/// clearing them.
#[derive(Debug, Default)]
pub struct TouchSlots {
    live: Vec<u32>,
}

impl TouchSlots {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn down(&mut self, slot: u32) -> PointerId {
        if !self.live.contains(&slot) {
            self.live.push(slot);
        }
        slot + 1
    }

    pub fn up(&mut self, slot: u32) -> PointerId {
        self.live.retain(|&s| s != slot);
        slot + 1
    }

    /// Returns the pointer ids of every still-live slot, in slot order, and
    /// clears the slot table. Callers must emit a release event at
    /// [`OUT_OF_WINDOW`] for each id returned, before any further motion
    /// event for that pointer.
    pub fn cancel(&mut self) -> Vec<PointerId> {
        let mut slots = std::mem::take(&mut self.live);
        slots.sort_unstable();
        slots.into_iter().map(|slot| slot + 1).collect()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// A [`GuiContext`] that does nothing, for tests that only need a live
    /// window to exist and don't care what renders into it.
    pub(crate) struct NoopGui;

    impl GuiContext for NoopGui {
        fn render(&mut self) {}
        fn set_viewport(&mut self, _size: LogicalSize<u32>) {}
        fn handle_event(&mut self, _window: WindowId, _event: GuiEvent<'_>) {}
    }

    #[test]
    fn x11_button_mapping() {
        assert_eq!(x11_button_number_to_enum(1), MouseButton::Left);
        assert_eq!(x11_button_number_to_enum(2), MouseButton::Middle);
        assert_eq!(x11_button_number_to_enum(3), MouseButton::Right);
        assert_eq!(x11_button_number_to_enum(4), MouseButton::WheelUp);
        assert_eq!(x11_button_number_to_enum(5), MouseButton::WheelDown);
        assert_eq!(x11_button_number_to_enum(6), MouseButton::WheelLeft);
        assert_eq!(x11_button_number_to_enum(7), MouseButton::WheelRight);
        assert_eq!(x11_button_number_to_enum(42), MouseButton::Middle);
    }

    #[test]
    fn wheel_clicks_expand_to_matched_press_release_pairs() {
        let actions: Vec<Action> = wheel_clicks_to_actions(3).collect();
        assert_eq!(
            actions,
            vec![
                Action::Press,
                Action::Release,
                Action::Press,
                Action::Release,
                Action::Press,
                Action::Release,
            ]
        );
    }

    #[test]
    fn zero_wheel_clicks_expand_to_nothing() {
        assert_eq!(wheel_clicks_to_actions(0).count(), 0);
    }

    #[test]
    fn touch_cancel_with_two_active_pointers() {
        // down slot 0, down slot 2, cancel -> release ids 1 and 3 in order.
        let mut slots = TouchSlots::new();
        assert_eq!(slots.down(0), 1);
        assert_eq!(slots.down(2), 3);
        assert_eq!(slots.cancel(), vec![1, 3]);
        // slot table is cleared
        assert!(slots.cancel().is_empty());
    }
}
