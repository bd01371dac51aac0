//! X11/Xorg backend: `x11rb` connection and window, `glutin` GLX/EGL
//! context.
//!
//! Grounded on `original_source/.../linux/glue_xorg.cxx`: the
//! `DisplayWidthMM`/`DisplayHeightMM`-based DPI calculation, the
//! `XPending`/`XNextEvent` poll-then-drain loop shape, the `WM_DELETE_WINDOW`
//! `ClientMessage` close protocol, and auto-repeat `KeyRelease`/`KeyPress`
//! pair coalescing are carried over onto `x11rb` and this crate's normalized
//! event vocabulary instead of the original's direct `ruis` event dispatch.

mod keymap;

use std::collections::HashMap;
use std::io::{Read, Write};
use std::num::NonZeroU32;
use std::os::fd::AsRawFd;
use std::os::unix::net::UnixStream;
use std::sync::Arc;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext};
use glutin::display::{Display as GlutinDisplay, DisplayApiPreference};
use glutin::prelude::*;
use glutin::surface::{Surface as GlutinSurface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use raw_window_handle::{RawDisplayHandle, RawWindowHandle, XlibDisplayHandle, XlibWindowHandle};
use x11rb::connection::Connection as _;
use x11rb::protocol::xproto::{self, ConnectionExt as _};
use x11rb::protocol::Event as X11Event;
use x11rb::rust_connection::RustConnection;
use x11rb::wrapper::ConnectionExt as _;

use crate::context::{ApiVersion, NativeContext};
use crate::app::Application;
use crate::display::DisplayBackend;
use crate::dpi::{dots_per_inch, pixels_per_pp, LogicalSize};
use crate::error::Error;
use crate::event::{x11_button_number_to_enum, Action, CharacterProvider, CursorShape, GuiEvent, MOUSE_POINTER_ID};
use crate::queue::Waker;
use crate::window::{NativeWindow, WindowId, WindowParams};

pub const SINGLE_WINDOW: bool = false;

pub struct Display {
    conn: Arc<RustConnection>,
    screen_num: usize,
    gl_display: GlutinDisplay,
    wm_delete_window: xproto::Atom,
    net_wm_state: xproto::Atom,
    net_wm_state_fullscreen: xproto::Atom,
    cursor_cache: HashMap<CursorShape, u32>,
    dims_mm: (f32, f32),
    dims_px: (u32, u32),
    windows: HashMap<u32, WindowId>,
    pending_release: Option<(u32, u32)>,
    /// Read end of the self-pipe `make_waker`'s writer signals to break
    /// `poll_events` out of a blocking `poll(2)` wait from another thread.
    wake_reader: UnixStream,
    wake_writer: Arc<UnixStream>,
}

impl DisplayBackend for Display {
    type Cursor = u32;

    fn new() -> Result<Self, Error> {
        let (conn, screen_num) = RustConnection::connect(None)
            .map_err(|e| Error::DisplayUnavailable { reason: e.to_string() })?;
        let conn = Arc::new(conn);
        let screen = &conn.setup().roots[screen_num];
        let dims_mm = (screen.width_in_millimeters as f32, screen.height_in_millimeters as f32);
        let dims_px = (screen.width_in_pixels as u32, screen.height_in_pixels as u32);

        let wm_delete_window = conn
            .intern_atom(false, b"WM_DELETE_WINDOW")
            .map_err(|e| Error::DisplayUnavailable { reason: e.to_string() })?
            .reply()
            .map_err(|e| Error::DisplayUnavailable { reason: e.to_string() })?
            .atom;
        let net_wm_state = conn
            .intern_atom(false, b"_NET_WM_STATE")
            .map_err(|e| Error::DisplayUnavailable { reason: e.to_string() })?
            .reply()
            .map_err(|e| Error::DisplayUnavailable { reason: e.to_string() })?
            .atom;
        let net_wm_state_fullscreen = conn
            .intern_atom(false, b"_NET_WM_STATE_FULLSCREEN")
            .map_err(|e| Error::DisplayUnavailable { reason: e.to_string() })?
            .reply()
            .map_err(|e| Error::DisplayUnavailable { reason: e.to_string() })?
            .atom;

        let (wake_reader, wake_writer) = UnixStream::pair()
            .map_err(|e| Error::DisplayUnavailable { reason: e.to_string() })?;
        wake_reader
            .set_nonblocking(true)
            .map_err(|e| Error::DisplayUnavailable { reason: e.to_string() })?;

        let raw_display = RawDisplayHandle::Xlib(XlibDisplayHandle::new(
            std::ptr::NonNull::new(conn.stream().as_raw_fd() as *mut _),
            screen_num as i32,
        ));
        let gl_display = unsafe {
            GlutinDisplay::new(raw_display, DisplayApiPreference::Egl)
                .map_err(|e| Error::GraphicsApiUnsupported { reason: e.to_string() })?
        };

        Ok(Self {
            conn,
            screen_num,
            gl_display,
            wm_delete_window,
            net_wm_state,
            net_wm_state_fullscreen,
            cursor_cache: HashMap::new(),
            dims_mm,
            dims_px,
            windows: HashMap::new(),
            pending_release: None,
            wake_reader,
            wake_writer: Arc::new(wake_writer),
        })
    }

    fn get_cursor(&mut self, shape: CursorShape) -> &u32 {
        self.cursor_cache.entry(shape).or_insert(shape as u32)
    }

    fn get_dots_per_inch(&self) -> f32 {
        dots_per_inch(self.dims_px, self.dims_mm)
    }

    fn get_pixels_per_pp(&self) -> f32 {
        pixels_per_pp(self.dims_px, self.dims_mm, None)
    }
}

pub struct Context {
    inner: PossiblyCurrentContext,
    surface: Option<GlutinSurface<WindowSurface>>,
}

impl NativeContext for Context {
    fn bind(&mut self) -> Result<(), Error> {
        match &self.surface {
            Some(surface) => self
                .inner
                .make_current(surface)
                .map_err(|e| Error::BindFailed { reason: e.to_string() }),
            None => self
                .inner
                .make_current_surfaceless()
                .map_err(|e| Error::BindFailed { reason: e.to_string() }),
        }
    }

    fn is_bound(&self) -> bool {
        self.inner.is_current()
    }

    fn swap(&mut self) {
        if let Some(surface) = &self.surface {
            let _ = surface.swap_buffers(&self.inner);
        }
    }

    fn set_vsync(&mut self, enabled: bool) {
        if let Some(surface) = &self.surface {
            let interval = if enabled {
                SwapInterval::Wait(NonZeroU32::new(1).unwrap())
            } else {
                SwapInterval::DontWait
            };
            let _ = surface.set_swap_interval(&self.inner, interval);
        }
    }
}

pub struct Window {
    id: WindowId,
    xid: u32,
    conn: Arc<RustConnection>,
    root: u32,
    net_wm_state: xproto::Atom,
    net_wm_state_fullscreen: xproto::Atom,
    context: Context,
    dims: LogicalSize<u32>,
    fullscreen: bool,
    /// Window geometry as of the last windowed->fullscreen transition,
    /// restored via `configure_window` on the matching transition back.
    windowed_geometry: Option<(i16, i16, u16, u16)>,
    close_handler: Option<Box<dyn FnMut()>>,
}

/// Standard X cursor-font glyph indices (see `<X11/cursorfont.h>`); each
/// glyph's mask is the following even index.
fn cursor_font_glyph(shape: CursorShape) -> Option<u16> {
    Some(match shape {
        CursorShape::None => return None,
        CursorShape::Arrow => 68,
        CursorShape::LeftRightArrow | CursorShape::LeftSide | CursorShape::RightSide => 108,
        CursorShape::UpDownArrow | CursorShape::TopSide | CursorShape::BottomSide => 116,
        CursorShape::AllDirectionsArrow | CursorShape::Grab => 52,
        CursorShape::TopLeftCorner | CursorShape::BottomRightCorner => 134,
        CursorShape::TopRightCorner | CursorShape::BottomLeftCorner => 136,
        CursorShape::IndexFinger => 60,
        CursorShape::Caret => 152,
    })
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
        96.0
    }

    fn scale_factor(&self) -> f32 {
        1.0
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

    fn set_mouse_cursor(&mut self, shape: CursorShape) {
        let Some(glyph) = cursor_font_glyph(shape) else { return };
        match self.load_font_cursor(glyph) {
            Ok(cursor) => self.apply_cursor(cursor),
            Err(err) => log::warn!("failed to load X11 font cursor for window {:?}: {err}", self.id),
        }
    }

    fn set_mouse_cursor_visible(&mut self, visible: bool) {
        if visible {
            let aux = xproto::ChangeWindowAttributesAux::new().cursor(0);
            if let Err(err) = self.conn.change_window_attributes(self.xid, &aux) {
                log::warn!("failed to restore X11 cursor for window {:?}: {err}", self.id);
            }
            let _ = self.conn.flush();
            return;
        }
        match self.create_invisible_cursor() {
            Ok(cursor) => self.apply_cursor(cursor),
            Err(err) => log::warn!("failed to build an invisible X11 cursor for window {:?}: {err}", self.id),
        }
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if fullscreen == self.fullscreen {
            return;
        }
        if fullscreen {
            if let Ok(cookie) = self.conn.get_geometry(self.xid) {
                if let Ok(geom) = cookie.reply() {
                    self.windowed_geometry = Some((geom.x, geom.y, geom.width, geom.height));
                }
            }
        }

        let data = xproto::ClientMessageData::from([
            if fullscreen { 1u32 } else { 0u32 },
            self.net_wm_state_fullscreen,
            0,
            0,
            0,
        ]);
        let event = xproto::ClientMessageEvent {
            response_type: xproto::CLIENT_MESSAGE_EVENT,
            format: 32,
            sequence: 0,
            window: self.xid,
            type_: self.net_wm_state,
            data,
        };
        let mask = xproto::EventMask::SUBSTRUCTURE_NOTIFY | xproto::EventMask::SUBSTRUCTURE_REDIRECT;
        if let Err(err) = self.conn.send_event(false, self.root, mask, event) {
            log::warn!("failed to send _NET_WM_STATE_FULLSCREEN for window {:?}: {err}", self.id);
        }

        if !fullscreen {
            if let Some((x, y, width, height)) = self.windowed_geometry.take() {
                let aux = xproto::ConfigureWindowAux::new()
                    .x(x as i32)
                    .y(y as i32)
                    .width(width as u32)
                    .height(height as u32);
                if let Err(err) = self.conn.configure_window(self.xid, &aux) {
                    log::warn!("failed to restore windowed geometry for window {:?}: {err}", self.id);
                }
            }
        }
        let _ = self.conn.flush();
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

impl Window {
    fn apply_cursor(&self, cursor: u32) {
        let aux = xproto::ChangeWindowAttributesAux::new().cursor(cursor);
        if let Err(err) = self.conn.change_window_attributes(self.xid, &aux) {
            log::warn!("failed to apply X11 cursor for window {:?}: {err}", self.id);
        }
        let _ = self.conn.flush();
        let _ = self.conn.free_cursor(cursor);
    }

    fn load_font_cursor(&self, glyph: u16) -> Result<u32, x11rb::errors::ReplyOrIdError> {
        let font = self.conn.generate_id()?;
        self.conn.open_font(font, b"cursor")?;
        let cursor = self.conn.generate_id()?;
        self.conn
            .create_glyph_cursor(cursor, font, font, glyph as u16, glyph as u16 + 1, 0, 0, 0, 0xFFFF, 0xFFFF, 0xFFFF)?;
        self.conn.close_font(font)?;
        Ok(cursor)
    }

    /// A fully transparent cursor built from a 1x1 bitmap whose mask is left
    /// zeroed: the classic X11 "hide the cursor" idiom, since the protocol
    /// has no direct visibility toggle.
    fn create_invisible_cursor(&self) -> Result<u32, x11rb::errors::ReplyOrIdError> {
        let pixmap = self.conn.generate_id()?;
        self.conn.create_pixmap(1, pixmap, self.xid, 1, 1)?;
        let gc = self.conn.generate_id()?;
        self.conn.create_gc(gc, pixmap, &xproto::CreateGCAux::new().foreground(0))?;
        self.conn
            .poly_fill_rectangle(pixmap, gc, &[xproto::Rectangle { x: 0, y: 0, width: 1, height: 1 }])?;
        let cursor = self.conn.generate_id()?;
        self.conn
            .create_cursor(cursor, pixmap, pixmap, 0, 0, 0, 0, 0, 0, 0, 0)?;
        self.conn.free_pixmap(pixmap)?;
        self.conn.free_gc(gc)?;
        Ok(cursor)
    }
}

pub fn open_display() -> Result<Display, Error> {
    Display::new()
}

pub fn create_shared_context(display: &mut Display) -> Result<Context, Error> {
    let template = ConfigTemplateBuilder::new().build();
    let config = unsafe {
        display
            .gl_display
            .find_configs(template)
            .map_err(|e| Error::ContextCreationFailed { reason: e.to_string() })?
            .next()
            .ok_or_else(|| Error::ContextCreationFailed { reason: "no matching GLX/EGL config".into() })?
    };
    let attrs = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(glutin::context::Version::new(2, 0))))
        .build(None);
    let not_current = unsafe {
        display
            .gl_display
            .create_context(&config, &attrs)
            .map_err(|e| Error::ContextCreationFailed { reason: e.to_string() })?
    };
    let current = not_current
        .make_current_surfaceless()
        .map_err(|e| Error::ContextCreationFailed { reason: e.to_string() })?;
    Ok(Context { inner: current, surface: None })
}

pub fn create_window(display: &mut Display, shared: &Context, params: &WindowParams) -> Result<Window, Error> {
    let conn = &display.conn;
    let screen = &conn.setup().roots[display.screen_num];
    let xid = conn.generate_id().map_err(|e| Error::WindowCreationFailed { reason: e.to_string() })?;

    let values = xproto::CreateWindowAux::new().event_mask(
        xproto::EventMask::EXPOSURE
            | xproto::EventMask::KEY_PRESS
            | xproto::EventMask::KEY_RELEASE
            | xproto::EventMask::BUTTON_PRESS
            | xproto::EventMask::BUTTON_RELEASE
            | xproto::EventMask::POINTER_MOTION
            | xproto::EventMask::STRUCTURE_NOTIFY
            | xproto::EventMask::ENTER_WINDOW
            | xproto::EventMask::LEAVE_WINDOW,
    );

    conn.create_window(
        screen.root_depth,
        xid,
        screen.root,
        0,
        0,
        params.dims.width.max(1) as u16,
        params.dims.height.max(1) as u16,
        0,
        xproto::WindowClass::INPUT_OUTPUT,
        screen.root_visual,
        &values,
    )
    .map_err(|e| Error::WindowCreationFailed { reason: e.to_string() })?;

    conn.change_property8(
        xproto::PropMode::REPLACE,
        xid,
        xproto::AtomEnum::WM_NAME,
        xproto::AtomEnum::STRING,
        params.title.as_bytes(),
    )
    .map_err(|e| Error::WindowCreationFailed { reason: e.to_string() })?;

    conn.change_property32(
        xproto::PropMode::REPLACE,
        xid,
        conn.intern_atom(false, b"WM_PROTOCOLS").unwrap().reply().unwrap().atom,
        xproto::AtomEnum::ATOM,
        &[display.wm_delete_window],
    )
    .map_err(|e| Error::WindowCreationFailed { reason: e.to_string() })?;

    if params.visible {
        conn.map_window(xid).map_err(|e| Error::WindowCreationFailed { reason: e.to_string() })?;
    }
    conn.flush().map_err(|e| Error::WindowCreationFailed { reason: e.to_string() })?;

    let id = WindowId::from_raw(xid as u64);
    display.windows.insert(xid, id);

    let raw_window = RawWindowHandle::Xlib(XlibWindowHandle::new(xid as std::ffi::c_ulong));
    let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        raw_window,
        NonZeroU32::new(params.dims.width.max(1)).unwrap(),
        NonZeroU32::new(params.dims.height.max(1)).unwrap(),
    );

    let template = ConfigTemplateBuilder::new().build();
    let config = unsafe {
        display
            .gl_display
            .find_configs(template)
            .map_err(|e| Error::ContextCreationFailed { reason: e.to_string() })?
            .next()
            .ok_or_else(|| Error::ContextCreationFailed { reason: "no matching GLX/EGL config".into() })?
    };
    let gl_surface = unsafe {
        display
            .gl_display
            .create_window_surface(&config, &surface_attrs)
            .map_err(|e| Error::SurfaceCreationFailed { reason: e.to_string() })?
    };
    let version = params.api_version.resolved();
    let attrs = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::OpenGl(Some(glutin::context::Version::new(version.major, version.minor))))
        .with_sharing(&shared.inner)
        .build(None);
    let not_current = unsafe {
        display
            .gl_display
            .create_context(&config, &attrs)
            .map_err(|e| Error::ContextCreationFailed { reason: e.to_string() })?
    };
    let current = not_current
        .make_current(&gl_surface)
        .map_err(|e| Error::ContextCreationFailed { reason: e.to_string() })?;

    Ok(Window {
        id,
        xid,
        conn: display.conn.clone(),
        root: screen.root,
        net_wm_state: display.net_wm_state,
        net_wm_state_fullscreen: display.net_wm_state_fullscreen,
        context: Context { inner: current, surface: Some(gl_surface) },
        dims: params.dims,
        fullscreen: params.fullscreen,
        windowed_geometry: None,
        close_handler: None,
    })
}

struct SelfPipeWaker {
    writer: Arc<UnixStream>,
}

impl Waker for SelfPipeWaker {
    fn wake(&self) {
        let _ = (&*self.writer).write(&[0]);
    }
}

pub fn make_waker(display: &mut Display) -> Arc<dyn Waker> {
    Arc::new(SelfPipeWaker { writer: display.wake_writer.clone() })
}

/// Drives the loop: `XPending`/poll for native events, translate, then hand
/// off to `Application`'s backend-independent per-iteration steps. Mirrors
/// `original_source/.../glue_xorg.cxx`'s `XPending(...) > 0` poll-then-drain
/// loop, generalized to `X11Event` via `x11rb`.
pub fn run_event_loop(app: &mut Application) -> i32 {
    loop {
        app.drop_deferred_windows();
        let timeout_ms = app.tick_updater();

        app.render_windows(|_id| true);

        let events = match poll_events(app, timeout_ms) {
            Ok(events) => events,
            Err(code) => return code,
        };

        app.drain_ui_queue();

        for (id, event) in events {
            dispatch(app, id, event);
        }

        if app.should_quit() {
            return 0;
        }

        app.apply_coalesced_resizes();
    }
}

enum Translated {
    MouseMove { pos: (f32, f32) },
    MouseButton { action: Action, pos: (f32, f32), button: u32 },
    MouseHover { is_hovered: bool },
    Key { action: Action, keycode: u8 },
    CharacterInput { utf8: String },
    Resize { size: LogicalSize<u32> },
    Close,
}

fn poll_events(app: &mut Application, timeout_ms: u32) -> Result<Vec<(WindowId, Translated)>, i32> {
    let display = app.display_mut();
    let mut out = Vec::new();

    // Block in poll(2) on the X connection's fd and the wake-pipe's read
    // fd, bounded by `timeout_ms` (`u32::MAX` means wait indefinitely, i.e.
    // a `-1` poll timeout), instead of spinning on a non-blocking drain.
    let mut fds = [
        libc::pollfd { fd: display.conn.stream().as_raw_fd(), events: libc::POLLIN, revents: 0 },
        libc::pollfd { fd: display.wake_reader.as_raw_fd(), events: libc::POLLIN, revents: 0 },
    ];
    let timeout = if timeout_ms == u32::MAX { -1 } else { timeout_ms as i32 };
    let rc = unsafe { libc::poll(fds.as_mut_ptr(), fds.len() as libc::nfds_t, timeout) };
    if rc < 0 {
        let err = std::io::Error::last_os_error();
        if err.kind() != std::io::ErrorKind::Interrupted {
            log::warn!("poll on X11 connection failed: {err}");
        }
    }
    if fds[1].revents & libc::POLLIN != 0 {
        let mut buf = [0u8; 64];
        while matches!(display.wake_reader.read(&mut buf), Ok(n) if n > 0) {}
    }

    let mut raw = Vec::new();
    while let Some(event) = display.conn.poll_for_event().map_err(|_| 1)? {
        raw.push(event);
    }

    // Auto-repeat coalescing: a KeyRelease immediately followed by a
    // KeyPress of the same keycode at the same timestamp is the X server's
    // auto-repeat signal, not a real release/press pair; collapse the two
    // into a single character-input event.
    let mut i = 0;
    while i < raw.len() {
        if let (X11Event::KeyRelease(rel), Some(X11Event::KeyPress(press))) = (&raw[i], raw.get(i + 1)) {
            if rel.detail == press.detail && rel.time == press.time && rel.event == press.event {
                if let Some(&id) = display.windows.get(&rel.event) {
                    let key = keymap::keycode_to_key(rel.detail);
                    let utf8 = keymap::key_to_char(key).map(String::from).unwrap_or_default();
                    out.push((id, Translated::CharacterInput { utf8 }));
                }
                i += 2;
                continue;
            }
        }
        translate_event(display, raw[i].clone(), &mut out);
        i += 1;
    }
    Ok(out)
}

fn translate_event(display: &mut Display, event: X11Event, out: &mut Vec<(WindowId, Translated)>) {
    match event {
        X11Event::ButtonPress(e) => {
            if let Some(&id) = display.windows.get(&e.event) {
                out.push((id, Translated::MouseButton {
                    action: Action::Press,
                    pos: (e.event_x as f32, e.event_y as f32),
                    button: e.detail as u32,
                }));
            }
        }
        X11Event::ButtonRelease(e) => {
            if let Some(&id) = display.windows.get(&e.event) {
                out.push((id, Translated::MouseButton {
                    action: Action::Release,
                    pos: (e.event_x as f32, e.event_y as f32),
                    button: e.detail as u32,
                }));
            }
        }
        X11Event::MotionNotify(e) => {
            if let Some(&id) = display.windows.get(&e.event) {
                out.push((id, Translated::MouseMove { pos: (e.event_x as f32, e.event_y as f32) }));
            }
        }
        X11Event::EnterNotify(e) => {
            if let Some(&id) = display.windows.get(&e.event) {
                out.push((id, Translated::MouseHover { is_hovered: true }));
            }
        }
        X11Event::LeaveNotify(e) => {
            if let Some(&id) = display.windows.get(&e.event) {
                out.push((id, Translated::MouseHover { is_hovered: false }));
            }
        }
        X11Event::KeyPress(e) => {
            if let Some(&id) = display.windows.get(&e.event) {
                out.push((id, Translated::Key { action: Action::Press, keycode: e.detail }));
            }
        }
        X11Event::KeyRelease(e) => {
            if let Some(&id) = display.windows.get(&e.event) {
                out.push((id, Translated::Key { action: Action::Release, keycode: e.detail }));
            }
        }
        X11Event::ConfigureNotify(e) => {
            if let Some(&id) = display.windows.get(&e.window) {
                out.push((id, Translated::Resize { size: LogicalSize::new(e.width as u32, e.height as u32) }));
            }
        }
        X11Event::ClientMessage(e) => {
            if let Some(&id) = display.windows.get(&e.window) {
                let data = e.data.as_data32();
                if data.first().copied() == Some(display.wm_delete_window) {
                    out.push((id, Translated::Close));
                }
            }
        }
        _ => {}
    }
}

fn dispatch(app: &mut Application, id: WindowId, event: Translated) {
    match event {
        Translated::MouseMove { pos } => {
            app.dispatch_event(id, GuiEvent::MouseMove { pos, pointer_id: MOUSE_POINTER_ID });
        }
        Translated::MouseButton { action, pos, button } => {
            app.dispatch_event(id, GuiEvent::MouseButton {
                action,
                pos,
                button: x11_button_number_to_enum(button),
                pointer_id: MOUSE_POINTER_ID,
            });
        }
        Translated::MouseHover { is_hovered } => {
            app.dispatch_event(id, GuiEvent::MouseHover { is_hovered, pointer_id: MOUSE_POINTER_ID });
        }
        Translated::Key { action, keycode } => {
            app.dispatch_event(id, GuiEvent::Key { action, key: keymap::keycode_to_key(keycode) });
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
