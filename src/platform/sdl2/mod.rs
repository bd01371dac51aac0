//! SDL2 fallback backend: usable on any desktop platform in place of the
//! native Wayland/X11/Win32/Cocoa glue, built directly on `sdl2`'s own
//! `SDL_GL_CreateContext`/`SDL_GL_SwapWindow` instead of `glutin` (`sdl2`
//! already owns context creation once its video subsystem is in charge of
//! the window).
//!
//! Grounded on `original_source/.../sdl` glue for the polling-loop shape and
//! the registered-custom-event wakeup this module's `Waker` mirrors via
//! `EventSubsystem::register_custom_event`/`push_custom_event`.

mod keymap;

use std::collections::HashMap;
use std::sync::Arc;

use sdl2::event::{Event, WindowEvent};
use sdl2::video::{GLContext, GLProfile, SwapInterval, Window as SdlWindow};
use sdl2::{EventPump, EventSubsystem, Sdl, VideoSubsystem};

use crate::app::Application;
use crate::context::NativeContext;
use crate::display::DisplayBackend;
use crate::dpi::{dots_per_inch, pixels_per_pp, LogicalSize};
use crate::error::Error;
use crate::event::{Action, CharacterProvider, CursorShape, GuiEvent, MouseButton};
use crate::queue::Waker;
use crate::window::{NativeWindow, WindowId, WindowParams};

/// SDL2 manages an arbitrary number of windows under one video subsystem.
pub const SINGLE_WINDOW: bool = false;

/// Pushed through `EventSubsystem::push_custom_event` to break `event_pump`
/// out of a blocking `wait_event_timeout` from another thread.
struct WakeEvent;

pub struct Display {
    _sdl: Sdl,
    video: VideoSubsystem,
    event_subsystem: EventSubsystem,
    event_pump: EventPump,
    screen_dims_px: (u32, u32),
    windows: HashMap<u32, WindowId>,
    /// Backs the hidden 1x1 window `create_shared_context` creates as a
    /// share source; SDL2 has no window-independent context, so this stays
    /// alive for the process's lifetime to keep that context valid.
    _shared_window: Option<SdlWindow>,
}

impl DisplayBackend for Display {
    type Cursor = CursorShape;

    fn new() -> Result<Self, Error> {
        let sdl = sdl2::init().map_err(|e| Error::DisplayUnavailable { reason: e })?;
        let video = sdl.video().map_err(|e| Error::DisplayUnavailable { reason: e })?;
        let event_subsystem = sdl.event().map_err(|e| Error::DisplayUnavailable { reason: e })?;
        event_subsystem
            .register_custom_event::<WakeEvent>()
            .map_err(|e| Error::DisplayUnavailable { reason: e.to_string() })?;
        let event_pump = sdl.event_pump().map_err(|e| Error::DisplayUnavailable { reason: e })?;

        let gl_attr = video.gl_attr();
        gl_attr.set_context_profile(GLProfile::GLES);
        gl_attr.set_context_version(2, 0);

        let bounds = video.display_bounds(0).map_err(|e| Error::DisplayUnavailable { reason: e })?;
        let screen_dims_px = (bounds.width(), bounds.height());

        Ok(Self {
            _sdl: sdl,
            video,
            event_subsystem,
            event_pump,
            screen_dims_px,
            windows: HashMap::new(),
            _shared_window: None,
        })
    }

    fn get_cursor(&mut self, shape: CursorShape) -> &CursorShape {
        Box::leak(Box::new(shape))
    }

    fn get_dots_per_inch(&self) -> f32 {
        self.video
            .display_dpi(0)
            .map(|(dpi, _, _)| dpi)
            .unwrap_or_else(|_| dots_per_inch(self.screen_dims_px, (self.screen_dims_px.0 as f32 / 96.0 * 25.4, self.screen_dims_px.1 as f32 / 96.0 * 25.4)))
    }

    fn get_pixels_per_pp(&self) -> f32 {
        let dpi = self.get_dots_per_inch();
        let size_mm = (self.screen_dims_px.0 as f32 / dpi * 25.4, self.screen_dims_px.1 as f32 / dpi * 25.4);
        pixels_per_pp(self.screen_dims_px, size_mm, None)
    }
}

pub struct Context {
    inner: GLContext,
}

impl NativeContext for Context {
    fn bind(&mut self) -> Result<(), Error> {
        // `gl_make_current` lives on `Window` in `sdl2`; the context itself
        // has no standalone bind call, so this is a no-op and
        // `Window::bind_rendering_context` does the real work.
        let _ = &self.inner;
        Ok(())
    }

    fn is_bound(&self) -> bool {
        true
    }

    fn swap(&mut self) {
        // Swapping is a `Window` method (`gl_swap_window`); see
        // `Window::swap_frame_buffers`.
    }

    fn set_vsync(&mut self, _enabled: bool) {
        // Vsync is process-wide in SDL2 (`VideoSubsystem::gl_set_swap_interval`),
        // set once in `open_display` rather than per context.
    }
}

pub struct Window {
    id: WindowId,
    sdl_window: SdlWindow,
    context: Context,
    dims: LogicalSize<u32>,
    fullscreen: bool,
    /// Position and size as of the last windowed->fullscreen transition,
    /// restored on the way back out since `FullscreenType::Off` alone
    /// leaves the window wherever the window manager last placed it.
    windowed_geometry: Option<((i32, i32), (u32, u32))>,
    close_handler: Option<Box<dyn FnMut()>>,
}

impl NativeWindow for Window {
    type Context = Context;

    fn id(&self) -> WindowId {
        self.id
    }

    fn dims(&self) -> LogicalSize<u32> {
        self.dims
    }

    fn dpi(&self) -> f32 {
        96.0 * self.scale_factor()
    }

    fn scale_factor(&self) -> f32 {
        let (pixel_w, _) = self.sdl_window.drawable_size();
        let (logical_w, _) = self.sdl_window.size();
        if logical_w == 0 {
            1.0
        } else {
            pixel_w as f32 / logical_w as f32
        }
    }

    fn bind_rendering_context(&mut self) -> Result<(), Error> {
        self.sdl_window
            .gl_make_current(&self.context.inner)
            .map_err(|e| Error::BindFailed { reason: e })
    }

    fn swap_frame_buffers(&mut self) {
        self.sdl_window.gl_swap_window();
    }

    fn set_vsync(&mut self, enabled: bool) {
        let subsystem = self.sdl_window.subsystem();
        let interval = if enabled { SwapInterval::VSync } else { SwapInterval::Immediate };
        let _ = subsystem.gl_set_swap_interval(interval);
    }

    fn set_mouse_cursor(&mut self, shape: CursorShape) {
        let system_cursor = match shape {
            CursorShape::None => return,
            CursorShape::Arrow => sdl2::mouse::SystemCursor::Arrow,
            CursorShape::LeftRightArrow | CursorShape::LeftSide | CursorShape::RightSide => sdl2::mouse::SystemCursor::SizeWE,
            CursorShape::UpDownArrow | CursorShape::TopSide | CursorShape::BottomSide => sdl2::mouse::SystemCursor::SizeNS,
            CursorShape::AllDirectionsArrow | CursorShape::Grab => sdl2::mouse::SystemCursor::SizeAll,
            CursorShape::TopLeftCorner | CursorShape::BottomRightCorner => sdl2::mouse::SystemCursor::SizeNWSE,
            CursorShape::TopRightCorner | CursorShape::BottomLeftCorner => sdl2::mouse::SystemCursor::SizeNESW,
            CursorShape::IndexFinger => sdl2::mouse::SystemCursor::Hand,
            CursorShape::Caret => sdl2::mouse::SystemCursor::IBeam,
        };
        if let Ok(cursor) = sdl2::mouse::Cursor::from_system(system_cursor) {
            cursor.set();
        }
    }

    fn set_mouse_cursor_visible(&mut self, visible: bool) {
        self.sdl_window.subsystem().sdl().mouse().show_cursor(visible);
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if fullscreen == self.fullscreen {
            return;
        }
        if fullscreen {
            self.windowed_geometry = Some((self.sdl_window.position(), self.sdl_window.size()));
            let _ = self.sdl_window.set_fullscreen(sdl2::video::FullscreenType::Desktop);
        } else {
            let _ = self.sdl_window.set_fullscreen(sdl2::video::FullscreenType::Off);
            if let Some((pos, size)) = self.windowed_geometry.take() {
                self.sdl_window.set_position(
                    sdl2::video::WindowPos::Positioned(pos.0),
                    sdl2::video::WindowPos::Positioned(pos.1),
                );
                let _ = self.sdl_window.set_size(size.0, size.1);
            }
        }
        self.fullscreen = fullscreen;
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
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

struct CustomEventWaker {
    event_subsystem: EventSubsystem,
}

unsafe impl Send for CustomEventWaker {}
unsafe impl Sync for CustomEventWaker {}

impl Waker for CustomEventWaker {
    fn wake(&self) {
        let _ = self.event_subsystem.push_custom_event(WakeEvent);
    }
}

pub fn open_display() -> Result<Display, Error> {
    Display::new()
}

pub fn create_shared_context(display: &mut Display) -> Result<Context, Error> {
    // SDL2 has no window-independent "root" GL context; the first window's
    // context stands in as the share source, matching the one-shared-context
    // role every other backend fills during `Application::new`, except the
    // surface it is bound to is a throwaway 1x1 window kept alive in
    // `Display` rather than exposed to callers.
    let window = display
        .video
        .window("winshim-shared", 1, 1)
        .opengl()
        .hidden()
        .build()
        .map_err(|e| Error::ContextCreationFailed { reason: e.to_string() })?;
    let inner = window
        .gl_create_context()
        .map_err(|e| Error::ContextCreationFailed { reason: e })?;
    display._shared_window = Some(window);
    Ok(Context { inner })
}

pub fn create_window(display: &mut Display, _shared: &Context, params: &WindowParams) -> Result<Window, Error> {
    let mut builder = display.video.window(&params.title, params.dims.width.max(1), params.dims.height.max(1));
    builder.opengl().position_centered().resizable();
    if !params.visible {
        builder.hidden();
    }
    let sdl_window = builder.build().map_err(|e| Error::WindowCreationFailed { reason: e.to_string() })?;

    let inner = sdl_window
        .gl_create_context()
        .map_err(|e| Error::ContextCreationFailed { reason: e })?;

    let id = WindowId::from_raw(sdl_window.id() as u64);
    display.windows.insert(sdl_window.id(), id);

    Ok(Window {
        id,
        sdl_window,
        context: Context { inner },
        dims: params.dims,
        fullscreen: params.fullscreen,
        windowed_geometry: None,
        close_handler: None,
    })
}

pub fn make_waker(display: &mut Display) -> Arc<dyn Waker> {
    Arc::new(CustomEventWaker { event_subsystem: display.event_subsystem.clone() })
}

enum Translated {
    MouseMove { pos: (f32, f32) },
    MouseButton { action: Action, pos: (f32, f32), button: MouseButton },
    MouseHover { is_hovered: bool },
    Wheel { pos: (f32, f32), button: MouseButton, clicks: u32 },
    Key { action: Action, key: crate::key::Key },
    CharacterInput { utf8: String },
    Resize { size: LogicalSize<u32> },
    Close,
}

fn sdl_button_to_enum(button: sdl2::mouse::MouseButton) -> MouseButton {
    match button {
        sdl2::mouse::MouseButton::Left => MouseButton::Left,
        sdl2::mouse::MouseButton::Middle => MouseButton::Middle,
        sdl2::mouse::MouseButton::Right => MouseButton::Right,
        sdl2::mouse::MouseButton::X1 => MouseButton::Side,
        sdl2::mouse::MouseButton::X2 => MouseButton::Extra,
        sdl2::mouse::MouseButton::Unknown => MouseButton::Middle,
    }
}

/// Drives the loop via `sdl2::EventPump::wait_event_timeout`, translating
/// each `sdl2::event::Event` into this crate's normalized vocabulary and
/// routing it by the `sdl2`-assigned window id recorded at creation time.
pub fn run_event_loop(app: &mut Application) -> i32 {
    loop {
        app.drop_deferred_windows();
        let timeout_ms = app.tick_updater();

        app.render_windows(|_id| true);

        let mut out: Vec<(WindowId, Translated)> = Vec::new();
        {
            // `Display` is reborrowed per batch rather than held across the
            // call into `app.dispatch_event`, since translating needs
            // `&mut Display` (for the window-id map) while dispatch needs
            // `&mut Application`.
            let display = app.display_mut();
            if let Some(event) = display.event_pump.wait_event_timeout(timeout_ms.min(1000)) {
                translate_event(display, event, &mut out);
                while let Some(event) = display.event_pump.poll_event() {
                    translate_event(display, event, &mut out);
                }
            }
        }

        app.drain_ui_queue();

        for (id, translated) in out {
            dispatch(app, id, translated);
        }

        if app.should_quit() {
            return 0;
        }

        app.apply_coalesced_resizes();
    }
}

fn translate_event(display: &mut Display, event: Event, out: &mut Vec<(WindowId, Translated)>) {
    match event {
        Event::Window { window_id, win_event, .. } => {
            let Some(&id) = display.windows.get(&window_id) else { return };
            match win_event {
                WindowEvent::Resized(w, h) | WindowEvent::SizeChanged(w, h) => {
                    out.push((id, Translated::Resize { size: LogicalSize::new(w.max(0) as u32, h.max(0) as u32) }));
                }
                WindowEvent::Enter => out.push((id, Translated::MouseHover { is_hovered: true })),
                WindowEvent::Leave => out.push((id, Translated::MouseHover { is_hovered: false })),
                WindowEvent::Close => out.push((id, Translated::Close)),
                _ => {}
            }
        }
        Event::MouseMotion { window_id, x, y, .. } => {
            let Some(&id) = display.windows.get(&window_id) else { return };
            out.push((id, Translated::MouseMove { pos: (x as f32, y as f32) }));
        }
        Event::MouseButtonDown { window_id, x, y, mouse_btn, .. } => {
            let Some(&id) = display.windows.get(&window_id) else { return };
            out.push((id, Translated::MouseButton { action: Action::Press, pos: (x as f32, y as f32), button: sdl_button_to_enum(mouse_btn) }));
        }
        Event::MouseButtonUp { window_id, x, y, mouse_btn, .. } => {
            let Some(&id) = display.windows.get(&window_id) else { return };
            out.push((id, Translated::MouseButton { action: Action::Release, pos: (x as f32, y as f32), button: sdl_button_to_enum(mouse_btn) }));
        }
        Event::MouseWheel { window_id, x, y, .. } => {
            let Some(&id) = display.windows.get(&window_id) else { return };
            if y != 0 {
                let button = if y > 0 { MouseButton::WheelUp } else { MouseButton::WheelDown };
                out.push((id, Translated::Wheel { pos: (0.0, 0.0), button, clicks: y.unsigned_abs() }));
            }
            if x != 0 {
                let button = if x > 0 { MouseButton::WheelRight } else { MouseButton::WheelLeft };
                out.push((id, Translated::Wheel { pos: (0.0, 0.0), button, clicks: x.unsigned_abs() }));
            }
        }
        Event::KeyDown { window_id, keycode: Some(keycode), repeat, .. } => {
            let Some(&id) = display.windows.get(&window_id) else { return };
            if !repeat {
                out.push((id, Translated::Key { action: Action::Press, key: keymap::keycode_to_key(keycode) }));
            }
        }
        Event::KeyUp { window_id, keycode: Some(keycode), .. } => {
            let Some(&id) = display.windows.get(&window_id) else { return };
            out.push((id, Translated::Key { action: Action::Release, key: keymap::keycode_to_key(keycode) }));
        }
        Event::TextInput { window_id, text, .. } => {
            let Some(&id) = display.windows.get(&window_id) else { return };
            out.push((id, Translated::CharacterInput { utf8: text }));
        }
        _ => {}
    }
}

fn dispatch(app: &mut Application, id: WindowId, translated: Translated) {
    match translated {
        Translated::MouseMove { pos } => {
            app.dispatch_event(id, GuiEvent::MouseMove { pos, pointer_id: crate::event::MOUSE_POINTER_ID });
        }
        Translated::MouseButton { action, pos, button } => {
            app.dispatch_event(id, GuiEvent::MouseButton { action, pos, button, pointer_id: crate::event::MOUSE_POINTER_ID });
        }
        Translated::MouseHover { is_hovered } => {
            app.dispatch_event(id, GuiEvent::MouseHover { is_hovered, pointer_id: crate::event::MOUSE_POINTER_ID });
        }
        Translated::Wheel { pos, button, clicks } => {
            for action in crate::event::wheel_clicks_to_actions(clicks) {
                app.dispatch_event(id, GuiEvent::MouseButton { action, pos, button, pointer_id: crate::event::MOUSE_POINTER_ID });
            }
        }
        Translated::Key { action, key } => {
            app.dispatch_event(id, GuiEvent::Key { action, key });
        }
        Translated::CharacterInput { utf8 } => {
            app.dispatch_event(id, GuiEvent::CharacterInput { provider: CharacterProvider::new(move || utf8) });
        }
        Translated::Resize { size } => {
            app.coalesce_resize(id, size);
        }
        Translated::Close => {
            app.request_close(id);
        }
    }
}
