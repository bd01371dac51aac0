//! Window parameters and the `NativeWindow` capability trait.

use crate::context::ApiVersion;
use crate::dpi::LogicalSize;
use crate::error::Error;
use crate::event::CursorShape;

/// Opaque, hashable, equatable, process-unique window identity, stable for
/// the window's lifetime. The concrete representation (integer handle,
/// pointer, surface handle) is backend-defined; this type erases it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WindowId(pub(crate) u64);

impl WindowId {
    /// Wraps a backend-native handle value as an opaque id. Backends convert
    /// their native id type (an XID, an `HWND` bit pattern, a Wayland
    /// `ObjectId`'s protocol id, ...) into a `u64` before calling this.
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Orientation policy requested at window-creation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrientationPolicy {
    Dynamic,
    Landscape,
    Portrait,
}

/// Extra framebuffers requested alongside the color buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BufferFlags {
    pub depth: bool,
    pub stencil: bool,
}

/// Input to window creation.
#[derive(Debug, Clone)]
pub struct WindowParams {
    /// Target content-area dimensions in pixels; a hint, not a guarantee.
    pub dims: LogicalSize<u32>,
    pub title: String,
    pub fullscreen: bool,
    pub visible: bool,
    pub taskbar_presence: bool,
    pub orientation: OrientationPolicy,
    pub buffers: BufferFlags,
    /// Requested graphics API version; `(0, 0)` means "minimum supported"
    /// (OpenGL 2.0 / OpenGL ES 2.0).
    pub api_version: ApiVersion,
}

impl Default for WindowParams {
    fn default() -> Self {
        Self {
            dims: LogicalSize::new(800, 600),
            title: String::new(),
            fullscreen: false,
            visible: true,
            taskbar_presence: true,
            orientation: OrientationPolicy::Dynamic,
            buffers: BufferFlags::default(),
            api_version: ApiVersion::MINIMUM,
        }
    }
}

/// The capability set required of every backend's native-window wrapper.
/// One concrete, non-`dyn` implementation exists per backend, selected at
/// compile time.
///
/// State machine: `Created -> Visible <-> Hidden -> Destroyed`, with
/// orthogonal substates `Windowed <-> Fullscreen`, `CursorShown <->
/// CursorHidden`, `Focused <-> Unfocused`, `Hovered <-> NotHovered`.
/// Implementers enforce this by construction: there is no `destroy()`
/// method here because destruction is `Drop`, and there is no way to
/// observe a window before `Created` since the type does not exist yet.
pub trait NativeWindow: Sized {
    /// The owned rendering context type, bound to this window's surface.
    type Context;

    /// Opaque, hashable, equatable, process-unique id, stable for the
    /// window's lifetime.
    fn id(&self) -> WindowId;

    /// Current content-area size in pixels (scaled where applicable).
    fn dims(&self) -> LogicalSize<u32>;

    fn dpi(&self) -> f32;

    fn scale_factor(&self) -> f32;

    /// Forwarded to the owned context. Must be called by the renderer
    /// before any GL command targeting this window.
    fn bind_rendering_context(&mut self) -> Result<(), Error>;

    fn swap_frame_buffers(&mut self);

    fn set_vsync(&mut self, enabled: bool);

    /// Shape change takes effect immediately if the window is currently
    /// hovered. Runtime failures log and continue rather than returning an
    /// error.
    fn set_mouse_cursor(&mut self, shape: CursorShape);

    /// Hide-on-enter / restore-on-leave policy is implemented by the
    /// backend's hover handling, not by this setter directly.
    fn set_mouse_cursor_visible(&mut self, visible: bool);

    /// Idempotent. `true` saves the current window rectangle and removes
    /// decorations where applicable; `false` restores them. One-way on
    /// fullscreen-only backends (e.g. Raspberry Pi framebuffer targets).
    fn set_fullscreen(&mut self, fullscreen: bool);

    fn is_fullscreen(&self) -> bool;

    /// Installs the handler invoked when the user requests window closure
    /// through the window manager. The default is `None`; installing a
    /// handler does not by itself close the window. Programmatic
    /// `destroy_window` never invokes this handler.
    fn set_close_handler(&mut self, handler: Option<Box<dyn FnMut()>>);

    /// Called by the backend when the window manager's close control (the
    /// title-bar X, `Alt+F4`, a compositor close request, ...) is activated.
    /// Invokes the installed close handler, if any; with none installed this
    /// is a no-op and the window stays open, since deciding whether and how
    /// to tear the window down is the handler's job, not this method's.
    fn request_close(&mut self);
}
