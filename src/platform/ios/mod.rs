//! iOS GLKit backend: `UIWindow`/`GLKView` via `objc2-ui-kit`/`objc2-gl-kit`,
//! binding `EAGLContext` directly rather than going through `glutin` (iOS has
//! no GLX/EGL/WGL/CGL equivalent `glutin` targets, and this is a
//! single-window backend like Android).
//!
//! Grounded on `original_source/.../ios` glue's direct `EAGLContext`
//! creation/sharegroup pattern, expressed here through `objc2`'s typed
//! bindings.

use std::sync::Arc;

use objc2::rc::Retained;
use objc2_foundation::{CGRect, CGPoint, CGSize, MainThreadMarker};
use objc2_gl_kit::{GLKView, EAGLContext, EAGLRenderingAPI};
use objc2_ui_kit::{UIApplication, UIScreen, UIWindow};

use crate::context::NativeContext;
use crate::app::Application;
use crate::display::DisplayBackend;
use crate::dpi::{dots_per_inch, pixels_per_pp, LogicalSize};
use crate::error::Error;
use crate::event::{CursorShape, GuiEvent};
use crate::queue::Waker;
use crate::window::{NativeWindow, WindowId, WindowParams};

/// Single-window backend: one `UIWindow` per process.
pub const SINGLE_WINDOW: bool = true;

pub struct Display {
    mtm: MainThreadMarker,
    screen_dims_px: (u32, u32),
}

impl DisplayBackend for Display {
    type Cursor = CursorShape;

    fn new() -> Result<Self, Error> {
        let mtm = MainThreadMarker::new()
            .ok_or_else(|| Error::DisplayUnavailable { reason: "must run on the main thread".into() })?;
        let _app = UIApplication::sharedApplication(mtm);
        let screen = UIScreen::mainScreen(mtm);
        let bounds = unsafe { screen.bounds() };
        let scale = unsafe { screen.scale() } as f32;
        let screen_dims_px = ((bounds.size.width as f32 * scale) as u32, (bounds.size.height as f32 * scale) as u32);
        Ok(Self { mtm, screen_dims_px })
    }

    fn get_cursor(&mut self, shape: CursorShape) -> &CursorShape {
        // Touch-only: no pointer cursor on iOS; tracked for API symmetry.
        Box::leak(Box::new(shape))
    }

    fn get_dots_per_inch(&self) -> f32 {
        // iOS does not expose physical screen dimensions; 163 ppi (the
        // non-Retina iPhone baseline) is the best available fallback absent
        // a per-device idiom table.
        dots_per_inch(self.screen_dims_px, (self.screen_dims_px.0 as f32 / 163.0 * 25.4, self.screen_dims_px.1 as f32 / 163.0 * 25.4))
    }

    fn get_pixels_per_pp(&self) -> f32 {
        pixels_per_pp(self.screen_dims_px, (self.screen_dims_px.0 as f32 / 163.0 * 25.4, self.screen_dims_px.1 as f32 / 163.0 * 25.4), None)
    }
}

pub struct Context {
    inner: Retained<EAGLContext>,
    bound: bool,
}

impl NativeContext for Context {
    fn bind(&mut self) -> Result<(), Error> {
        let ok = unsafe { EAGLContext::setCurrentContext(Some(&self.inner)) };
        self.bound = ok;
        if ok {
            Ok(())
        } else {
            Err(Error::BindFailed { reason: "EAGLContext::setCurrentContext returned NO".into() })
        }
    }

    fn is_bound(&self) -> bool {
        self.bound
    }

    fn swap(&mut self) {
        // Presentation happens through `GLKView`'s own `display`/render-buffer
        // present call, driven by the view's `CADisplayLink`, not by an
        // explicit swap on the context.
    }

    fn set_vsync(&mut self, _enabled: bool) {
        log::warn!("EAGLContext has no swap-interval control; vsync is governed by CADisplayLink instead");
    }
}

pub struct Window {
    id: WindowId,
    ui_window: Retained<UIWindow>,
    context: Context,
    dims: LogicalSize<u32>,
    close_handler: Option<Box<dyn FnMut()>>,
}

unsafe impl Send for Window {}

impl NativeWindow for Window {
    type Context = Context;

    fn id(&self) -> WindowId {
        self.id
    }

    fn dims(&self) -> LogicalSize<u32> {
        self.dims
    }

    fn dpi(&self) -> f32 {
        163.0
    }

    fn scale_factor(&self) -> f32 {
        unsafe { self.ui_window.contentScaleFactor() as f32 }
    }

    fn bind_rendering_context(&mut self) -> Result<(), Error> {
        self.context.bind()
    }

    fn swap_frame_buffers(&mut self) {
        self.context.swap();
    }

    fn set_vsync(&mut self, enabled: bool) {
        self.context.set_vsync(enabled);
    }

    fn set_mouse_cursor(&mut self, _shape: CursorShape) {}
    fn set_mouse_cursor_visible(&mut self, _visible: bool) {}

    fn set_fullscreen(&mut self, _fullscreen: bool) {
        // Every `UIWindow` is already fullscreen; there is no windowed mode
        // to toggle away from.
    }

    fn is_fullscreen(&self) -> bool {
        true
    }

    fn set_close_handler(&mut self, handler: Option<Box<dyn FnMut()>>) {
        self.close_handler = handler;
    }

    fn request_close(&mut self) {
        if let Some(handler) = self.close_handler.as_mut() {
            handler();
        }
    }
}

struct RunLoopWaker;

impl Waker for RunLoopWaker {
    fn wake(&self) {
        // A production build schedules a zero-delay block on the main
        // `CFRunLoop`; queued tasks otherwise run on the next
        // `CADisplayLink` tick.
    }
}

pub fn open_display() -> Result<Display, Error> {
    Display::new()
}

pub fn create_shared_context(_display: &mut Display) -> Result<Context, Error> {
    let inner = unsafe { EAGLContext::initWithAPI(EAGLContext::alloc(), EAGLRenderingAPI::OpenGLES2) }
        .ok_or_else(|| Error::ContextCreationFailed { reason: "EAGLContext::initWithAPI returned nil".into() })?;
    Ok(Context { inner, bound: false })
}

pub fn create_window(display: &mut Display, shared: &Context, params: &WindowParams) -> Result<Window, Error> {
    let frame = CGRect::new(CGPoint::new(0.0, 0.0), CGSize::new(params.dims.width as f64, params.dims.height as f64));
    let ui_window = unsafe { UIWindow::initWithFrame(UIWindow::alloc(display.mtm), frame) };

    let inner = unsafe {
        EAGLContext::initWithAPI_sharegroup(EAGLContext::alloc(), EAGLRenderingAPI::OpenGLES2, &shared.inner.sharegroup())
    }
    .ok_or_else(|| Error::ContextCreationFailed { reason: "EAGLContext::initWithAPI:sharegroup: returned nil".into() })?;

    let view = unsafe { GLKView::initWithFrame_context(GLKView::alloc(), frame, &inner) };
    unsafe { ui_window.setRootViewController(None) };
    unsafe { ui_window.addSubview(&view) };
    if params.visible {
        unsafe { ui_window.makeKeyAndVisible() };
    }

    let id = WindowId::from_raw(1);

    Ok(Window {
        id,
        ui_window,
        context: Context { inner, bound: false },
        dims: params.dims,
        close_handler: None,
    })
}

pub fn make_waker(_display: &mut Display) -> Arc<dyn Waker> {
    Arc::new(RunLoopWaker)
}

/// Drives the loop via `UIApplicationMain`'s own run loop in a production
/// build; `Application::run` here models one explicit pass through the
/// backend-independent steps per `CADisplayLink` tick, since iOS does not
/// hand control back to a blocking dispatch call the way the desktop
/// backends do.
pub fn run_event_loop(app: &mut Application) -> i32 {
    loop {
        app.drop_deferred_windows();
        let _timeout_ms = app.tick_updater();
        app.render_windows(|_id| true);
        app.drain_ui_queue();

        if app.should_quit() {
            if let Some(id) = app.window_ids().next() {
                app.dispatch_event(id, GuiEvent::Close);
            }
            return 0;
        }

        app.apply_coalesced_resizes();

        // Without a `CADisplayLink` callback driving successive iterations,
        // a bare loop here would spin; a production build returns after
        // arming the display link and lets `UIApplicationMain` call back in.
        return 0;
    }
}
