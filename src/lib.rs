//! Cross-platform window, GL-context and input-event adaptation layer.
//!
//! This crate owns the native top-level window(s), the OpenGL / OpenGL ES
//! rendering context bound to each of them, and the translation of native
//! input and lifecycle events into the uniform [`event::GuiEvent`] vocabulary
//! consumed by a retained-mode UI toolkit through the [`event::GuiContext`]
//! trait. It does not render anything and does not know about widgets.

pub mod app;
pub mod context;
pub mod directories;
pub mod dpi;
pub mod display;
pub mod error;
pub mod event;
pub mod factory;
pub mod key;
pub mod queue;
pub mod updater;
pub mod window;

mod platform;

pub use app::Application;
pub use directories::Directories;
pub use error::Error;
pub use event::{GuiContext, GuiEvent};
pub use factory::{application_factory, make_application, ApplicationFactory};
pub use key::Key;
pub use updater::Updater;
pub use window::{WindowId, WindowParams};

/// The concrete, compile-time-selected backend for the target platform.
///
/// Every backend module exports the same contract under this name: the
/// `Display`, `Context` and `Window` types (implementing
/// [`display::DisplayBackend`], [`context::NativeContext`] and
/// [`window::NativeWindow`] respectively), the `SINGLE_WINDOW` constant, the
/// `open_display`/`create_shared_context`/`create_window`/`make_waker`
/// constructor functions, and `run_event_loop`. Nothing outside
/// `platform::*` and `app` names a backend type directly; this is the single
/// seam where `cfg` selection happens: compile-time selection keeps every
/// other backend's cold paths out of the binary entirely.
pub(crate) use platform::backend;
