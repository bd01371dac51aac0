//! The `NativeContext` capability trait and supporting types.

use crate::error::Error;

/// Requested (or actual, once queried back) OpenGL / OpenGL ES API version.
/// `(0, 0)` means "minimum supported": OpenGL 2.0 or OpenGL ES 2.0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ApiVersion {
    pub major: u8,
    pub minor: u8,
}

impl ApiVersion {
    pub const MINIMUM: ApiVersion = ApiVersion { major: 0, minor: 0 };
    pub const GLES2: ApiVersion = ApiVersion { major: 2, minor: 0 };

    /// Resolves `(0, 0)` to the concrete minimum-supported version.
    pub fn resolved(self) -> ApiVersion {
        if self == Self::MINIMUM {
            Self::GLES2
        } else {
            self
        }
    }
}

/// The capability set required of every backend's native-context wrapper.
/// Owns a rendering-API context and, optionally, its drawable surface.
///
/// Destruction order, enforced by each backend's `Drop` implementation:
/// 1. if current on this thread, release current (bind none);
/// 2. destroy the context;
/// 3. destroy any owned surface;
/// 4. destroy any pbuffer/dummy surface.
///
/// The owning [`crate::display::DisplayBackend`] singleton only terminates
/// once every context referencing it has already been dropped, which the
/// application glue (`app`) guarantees by construction order (shared
/// context and all windows are dropped before the display).
pub trait NativeContext: Sized {
    /// Makes this context current on the calling thread, bound to (a) its
    /// own window surface if present, else (b) a dummy 1x1 pbuffer surface
    /// lazily created on first need, else (c) no surface if the backend
    /// advertises the surfaceless-context extension.
    fn bind(&mut self) -> Result<(), Error>;

    /// True iff the calling thread's current context equals this one.
    fn is_bound(&self) -> bool;

    /// Presents the back buffer. A no-op if no surface is attached.
    fn swap(&mut self);

    /// Requires this context to be bound. Toggles the swap interval to 1
    /// (enabled) or 0 (disabled). Backends with no swap-interval control log
    /// a warning and continue.
    fn set_vsync(&mut self, enabled: bool);
}

/// Wayland/Android-only capability: attaches or detaches the drawable
/// without destroying the context, preserving GPU objects across attach
/// cycles. If the context was bound to the surface being destroyed, it
/// must be re-bound to the surfaceless/dummy mode first.
pub trait SurfaceAttachable: NativeContext {
    type Surface;

    fn create_surface(&mut self, surface: Self::Surface) -> Result<(), Error>;

    fn destroy_surface(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_version_resolves_minimum() {
        assert_eq!(ApiVersion::MINIMUM.resolved(), ApiVersion::GLES2);
        let explicit = ApiVersion { major: 3, minor: 1 };
        assert_eq!(explicit.resolved(), explicit);
    }
}
