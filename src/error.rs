//! Error kinds surfaced by the window-system adaptation layer.

/// Errors produced by this crate.
///
/// Fatal kinds (`DisplayUnavailable`, `GraphicsApiUnsupported`,
/// `ContextCreationFailed`, `WindowCreationFailed`, `FactoryAlreadyRegistered`,
/// `FactoryNotRegistered`) unwind to `main` and terminate the process with a
/// diagnostic on stderr. `MultipleWindowsNotSupported` and
/// `WindowDestructionNotAllowed` are recoverable and returned to the caller.
/// `BindFailed` and `SurfaceCreationFailed` are transient driver/compositor
/// errors that callers typically translate into `WindowCreationFailed` at
/// window-construction boundaries.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The OS display/connection could not be opened.
    #[error("display unavailable: {reason}")]
    DisplayUnavailable { reason: String },

    /// The requested graphics API / version cannot be provided.
    #[error("graphics API unsupported: {reason}")]
    GraphicsApiUnsupported { reason: String },

    /// The driver refused to create a rendering context.
    #[error("context creation failed: {reason}")]
    ContextCreationFailed { reason: String },

    /// The OS refused to create the window.
    #[error("window creation failed: {reason}")]
    WindowCreationFailed { reason: String },

    /// A second [`crate::ApplicationFactory`] was constructed.
    #[error("an application factory is already registered")]
    FactoryAlreadyRegistered,

    /// [`crate::make_application`] was called before a factory was registered.
    #[error("no application factory has been registered")]
    FactoryNotRegistered,

    /// A single-window backend rejected a second `make_window` call.
    #[error("this backend supports only a single window")]
    MultipleWindowsNotSupported,

    /// A single-window backend rejected a programmatic `destroy_window` call.
    #[error("this backend does not allow programmatic window destruction")]
    WindowDestructionNotAllowed,

    /// Making a context current failed.
    #[error("failed to bind rendering context: {reason}")]
    BindFailed { reason: String },

    /// Creating or attaching a drawable surface failed.
    #[error("surface creation failed: {reason}")]
    SurfaceCreationFailed { reason: String },
}
