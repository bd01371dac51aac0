//! The `DisplayBackend` capability trait: per-process, connection-wide
//! state shared by all windows.

use crate::error::Error;
use crate::event::CursorShape;

/// The capability set required of every backend's display/connection
/// singleton. Exactly one instance exists per process, owned by the
/// application glue (`app::Application`) and outliving every window and
/// context that references it.
pub trait DisplayBackend: Sized {
    /// The backend's native cursor resource type, cached per shape.
    type Cursor;

    /// Opens the native display connection, queries extensions, and
    /// performs any one-time per-process registration (e.g. a Win32 window
    /// class). Fails with [`Error::DisplayUnavailable`] if the connection
    /// cannot be opened.
    fn new() -> Result<Self, Error>;

    /// Returns a reference to a cached cursor, building it on first request.
    /// The `None` shape is an empty 1x1 transparent bitmap.
    fn get_cursor(&mut self, shape: CursorShape) -> &Self::Cursor;

    /// Logical DPI of the primary screen.
    fn get_dots_per_inch(&self) -> f32;

    /// Pixels per density-independent point-pixel.
    fn get_pixels_per_pp(&self) -> f32;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dpi::{dots_per_inch, pixels_per_pp};
    use std::collections::HashMap;

    /// A display stand-in used by crate-level tests that need a
    /// `DisplayBackend` but not a real connection.
    struct MockDisplay {
        cursors: HashMap<CursorShape, u32>,
        next_cursor_id: u32,
    }

    impl DisplayBackend for MockDisplay {
        type Cursor = u32;

        fn new() -> Result<Self, Error> {
            Ok(Self {
                cursors: HashMap::new(),
                next_cursor_id: 0,
            })
        }

        fn get_cursor(&mut self, shape: CursorShape) -> &u32 {
            if !self.cursors.contains_key(&shape) {
                self.next_cursor_id += 1;
                self.cursors.insert(shape, self.next_cursor_id);
            }
            self.cursors.get(&shape).unwrap()
        }

        fn get_dots_per_inch(&self) -> f32 {
            dots_per_inch((1920, 1080), (600.0, 340.0))
        }

        fn get_pixels_per_pp(&self) -> f32 {
            pixels_per_pp((1920, 1080), (600.0, 340.0), None)
        }
    }

    #[test]
    fn cursor_is_built_once_per_shape() {
        let mut display = MockDisplay::new().unwrap();
        let first = *display.get_cursor(CursorShape::Arrow);
        let second = *display.get_cursor(CursorShape::Arrow);
        assert_eq!(first, second);
        let grab = *display.get_cursor(CursorShape::Grab);
        assert_ne!(first, grab);
    }
}
