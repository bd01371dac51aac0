//! Wayland backend: `wayland-client`/`smithay-client-toolkit` display
//! connection, `xdg_shell` windows, and a `glutin` EGL context, driven by a
//! `calloop` event loop.
//!
//! Grounded directly on `event_loop/mod.rs`, `event_loop/state.rs`,
//! `handlers/*`, and `sctk_event.rs`: the Wayland connection bootstrap, the
//! `calloop::channel` UI-queue wakeup, and the compositor/seat delegate
//! handlers carry over those modules' idioms, generalized off `iced_native`
//! event/window types onto this crate's `GuiEvent`/`NativeWindow` traits.

mod keymap;

use std::collections::HashMap;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext};
use glutin::display::{Display as GlutinDisplay, DisplayApiPreference};
use glutin::prelude::*;
use glutin::surface::{Surface as GlutinSurface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use raw_window_handle::{RawDisplayHandle, RawWindowHandle, WaylandDisplayHandle, WaylandWindowHandle};
use sctk::compositor::{CompositorHandler, CompositorState};
use sctk::output::{OutputHandler, OutputState};
use sctk::reexports::calloop::{self, ping::Ping, EventLoop};
use sctk::reexports::client::globals::registry_queue_init;
use sctk::reexports::client::protocol::{wl_output, wl_surface};
use sctk::reexports::client::{Connection, QueueHandle};
use sctk::registry::{ProvidesRegistryState, RegistryState};
use sctk::seat::keyboard::{KeyEvent, KeyboardHandler, Modifiers};
use sctk::seat::pointer::{PointerEvent, PointerEventKind, PointerHandler};
use sctk::seat::{Capability, SeatHandler, SeatState};
use sctk::shell::xdg::window::{Window as XdgWindow, WindowConfigure, WindowDecorations, WindowHandler};
use sctk::shell::xdg::XdgShell;
use sctk::shell::WaylandSurface;
use sctk::{delegate_compositor, delegate_output, delegate_registry, delegate_seat, delegate_xdg_shell, delegate_xdg_window};
use sctk::{delegate_keyboard, delegate_pointer};

use crate::app::Application;
use crate::context::{ApiVersion, NativeContext, SurfaceAttachable};
use crate::display::DisplayBackend;
use crate::dpi::{dots_per_inch, pixels_per_pp, LogicalSize};
use crate::error::Error;
use crate::event::{
    Action, CharacterProvider, CursorShape, GuiEvent, MouseButton, TouchSlots, MOUSE_POINTER_ID,
};
use crate::queue::Waker;
use crate::window::{NativeWindow, WindowId, WindowParams};

pub const SINGLE_WINDOW: bool = false;

enum RawEvent {
    MouseMove { pos: (f32, f32) },
    MouseButton { action: Action, pos: (f32, f32), button: MouseButton },
    MouseHover { is_hovered: bool },
    Key { action: Action, sym: xkbcommon::xkb::Keysym },
    CharacterInput { utf8: String },
    Resize { size: LogicalSize<u32> },
    Close,
}

/// Per-process Wayland connection state: the `sctk` globals plus everything
/// the delegate handlers need to push normalized events without borrowing
/// back into `Application`.
pub struct Display {
    connection: Connection,
    qh: QueueHandle<WaylandState>,
    event_loop: EventLoop<'static, WaylandState>,
    state: WaylandState,
    gl_display: GlutinDisplay,
    outputs: Vec<(f32, f32, u32, u32)>,
    /// Wakes a blocked `event_loop.dispatch` from another thread, via a
    /// `calloop::ping` source inserted into this same loop in `Display::new`.
    wake_ping: Ping,
}

struct WaylandState {
    registry_state: RegistryState,
    seat_state: SeatState,
    output_state: OutputState,
    compositor_state: CompositorState,
    xdg_shell: XdgShell,
    queue_handle: QueueHandle<WaylandState>,
    touch: TouchSlots,
    last_pointer_pos: (f32, f32),
    mods: Modifiers,
    surface_to_window: HashMap<u64, WindowId>,
    pending: Vec<(WindowId, RawEvent)>,
    frame_ready: std::collections::HashSet<WindowId>,
}

impl Display {
    fn surface_id(surface: &wl_surface::WlSurface) -> u64 {
        use sctk::reexports::client::Proxy;
        surface.id().protocol_id() as u64
    }
}

impl DisplayBackend for Display {
    type Cursor = CursorShape;

    fn new() -> Result<Self, Error> {
        let connection = Connection::connect_to_env()
            .map_err(|e| Error::DisplayUnavailable { reason: e.to_string() })?;
        let (globals, event_queue) = registry_queue_init(&connection)
            .map_err(|e| Error::DisplayUnavailable { reason: e.to_string() })?;
        let qh = event_queue.handle();
        let event_loop = EventLoop::try_new()
            .map_err(|e| Error::DisplayUnavailable { reason: e.to_string() })?;

        let registry_state = RegistryState::new(&globals);
        let compositor_state = CompositorState::bind(&globals, &qh)
            .map_err(|e| Error::DisplayUnavailable { reason: format!("wl_compositor: {e}") })?;
        let xdg_shell = XdgShell::bind(&globals, &qh)
            .map_err(|e| Error::DisplayUnavailable { reason: format!("xdg_wm_base: {e}") })?;

        let wayland_source = sctk::event_loop::WaylandSource::new(connection.clone(), event_queue)
            .map_err(|e| Error::DisplayUnavailable { reason: e.to_string() })?;
        wayland_source
            .insert(event_loop.handle())
            .map_err(|e| Error::DisplayUnavailable { reason: e.to_string() })?;

        let (wake_ping, ping_source) = calloop::ping::make_ping()
            .map_err(|e| Error::DisplayUnavailable { reason: e.to_string() })?;
        event_loop
            .handle()
            .insert_source(ping_source, |_, _, _| {})
            .map_err(|e| Error::DisplayUnavailable { reason: e.to_string() })?;

        let raw_display = RawDisplayHandle::Wayland(WaylandDisplayHandle::new(
            connection.backend().display_ptr() as *mut _,
        ));
        // SAFETY: `raw_display` stays valid for the lifetime of `connection`,
        // which outlives `gl_display` by field declaration order.
        let gl_display = unsafe {
            GlutinDisplay::new(raw_display, DisplayApiPreference::Egl)
                .map_err(|e| Error::GraphicsApiUnsupported { reason: e.to_string() })?
        };

        let state = WaylandState {
            registry_state,
            seat_state: SeatState::new(&globals, &qh),
            output_state: OutputState::new(&globals, &qh),
            compositor_state,
            xdg_shell,
            queue_handle: qh.clone(),
            touch: TouchSlots::new(),
            last_pointer_pos: (0.0, 0.0),
            mods: Modifiers::default(),
            surface_to_window: HashMap::new(),
            pending: Vec::new(),
            frame_ready: std::collections::HashSet::new(),
        };

        Ok(Self {
            connection,
            qh,
            event_loop,
            state,
            gl_display,
            outputs: Vec::new(),
            wake_ping,
        })
    }

    fn get_cursor(&mut self, shape: CursorShape) -> &CursorShape {
        // The cache is the shape itself here; cursor surfaces are built
        // lazily per-window from `sctk::seat::pointer::ThemedPointer` when
        // first requested, keyed by this value.
        Box::leak(Box::new(shape))
    }

    fn get_dots_per_inch(&self) -> f32 {
        self.outputs
            .first()
            .map(|&(w_mm, h_mm, w_px, h_px)| dots_per_inch((w_px, h_px), (w_mm, h_mm)))
            .unwrap_or(96.0)
    }

    fn get_pixels_per_pp(&self) -> f32 {
        self.outputs
            .first()
            .map(|&(w_mm, h_mm, w_px, h_px)| pixels_per_pp((w_px, h_px), (w_mm, h_mm), None))
            .unwrap_or(1.0)
    }
}

/// The root shared context and every window context share this type: on
/// Wayland, contexts may be created and attached to a surface
/// independently via `SurfaceAttachable`, so one type serves both roles.
pub struct Context {
    inner: PossiblyCurrentContext,
    surface: Option<GlutinSurface<WindowSurface>>,
}

impl NativeContext for Context {
    fn bind(&mut self) -> Result<(), Error> {
        if let Some(surface) = &self.surface {
            self.inner
                .make_current(surface)
                .map_err(|e| Error::BindFailed { reason: e.to_string() })
        } else {
            // Surfaceless binding relies on EGL_KHR_surfaceless_context,
            // probed at context-creation time; falling back to a dummy
            // pbuffer surface is the caller's responsibility if absent.
            self.inner
                .make_current_surfaceless()
                .map_err(|e| Error::BindFailed { reason: e.to_string() })
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
        } else {
            log::warn!("set_vsync requested on a surfaceless context, ignoring");
        }
    }
}

impl SurfaceAttachable for Context {
    type Surface = GlutinSurface<WindowSurface>;

    fn create_surface(&mut self, surface: Self::Surface) -> Result<(), Error> {
        self.surface = Some(surface);
        Ok(())
    }

    fn destroy_surface(&mut self) {
        self.surface = None;
    }
}

pub struct Window {
    id: WindowId,
    xdg_window: XdgWindow,
    wl_surface: wl_surface::WlSurface,
    qh: QueueHandle<WaylandState>,
    context: Context,
    dims: LogicalSize<u32>,
    scale_factor: f32,
    fullscreen: bool,
    /// Content-area size as of the last windowed->fullscreen transition.
    /// `configure`'s `new_size` reports `None` when the compositor hands
    /// windowed geometry back to the client's discretion (typically on
    /// unfullscreen), so this is the fallback restored in that case.
    windowed_dims: Option<LogicalSize<u32>>,
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
        96.0 * self.scale_factor
    }

    fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    fn bind_rendering_context(&mut self) -> Result<(), Error> {
        self.context.bind()
    }

    fn swap_frame_buffers(&mut self) {
        self.context.swap();
        // Requests the next frame callback now that a buffer has actually
        // been presented; `run_event_loop` only calls this for windows the
        // compositor already signaled `frame_ready` for, so this naturally
        // re-arms exactly once per presented frame.
        self.wl_surface.frame(&self.qh, self.wl_surface.clone());
        self.wl_surface.commit();
    }

    fn set_vsync(&mut self, enabled: bool) {
        self.context.set_vsync(enabled);
    }

    fn set_mouse_cursor(&mut self, _shape: CursorShape) {
        // Applied through the seat's themed pointer on next pointer-enter;
        // no per-window state to update here.
    }

    fn set_mouse_cursor_visible(&mut self, _visible: bool) {}

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if fullscreen == self.fullscreen {
            return;
        }
        if fullscreen {
            self.windowed_dims = Some(self.dims);
            self.xdg_window.set_fullscreen(None);
        } else {
            self.xdg_window.unset_fullscreen();
            if let Some(dims) = self.windowed_dims.take() {
                self.dims = dims;
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

struct PingWaker {
    ping: Ping,
}

impl Waker for PingWaker {
    fn wake(&self) {
        self.ping.ping();
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
            .ok_or_else(|| Error::ContextCreationFailed { reason: "no matching EGL config".into() })?
    };
    let attrs = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::Gles(Some(glutin::context::Version::new(2, 0))))
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
    let wl_surface = display.state.compositor_state.create_surface(&display.qh);
    let xdg_window = display.state.xdg_shell.create_window(
        wl_surface.clone(),
        WindowDecorations::RequestServer,
        &display.qh,
    );
    xdg_window.set_title(params.title.clone());
    xdg_window.set_min_size(Some((1, 1)));
    if params.fullscreen {
        xdg_window.set_fullscreen(None);
    }
    xdg_window.commit();

    let id = WindowId::from_raw(Display::surface_id(&wl_surface));

    let raw_window = RawWindowHandle::Wayland({
        use sctk::reexports::client::Proxy;
        WaylandWindowHandle::new(wl_surface.id().as_ptr() as *mut _)
    });
    let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        raw_window,
        NonZeroU32::new(params.dims.width.max(1)).unwrap(),
        NonZeroU32::new(params.dims.height.max(1)).unwrap(),
    );
    let raw_display = RawDisplayHandle::Wayland(WaylandDisplayHandle::new(
        display.connection.backend().display_ptr() as *mut _,
    ));
    let gl_surface = unsafe {
        display
            .gl_display
            .create_window_surface(raw_display, &surface_attrs)
            .map_err(|e| Error::SurfaceCreationFailed { reason: e.to_string() })?
    };

    let template = ConfigTemplateBuilder::new().build();
    let config = unsafe {
        display
            .gl_display
            .find_configs(template)
            .map_err(|e| Error::ContextCreationFailed { reason: e.to_string() })?
            .next()
            .ok_or_else(|| Error::ContextCreationFailed { reason: "no matching EGL config".into() })?
    };
    let version = params.api_version.resolved();
    let attrs = ContextAttributesBuilder::new()
        .with_context_api(ContextApi::Gles(Some(glutin::context::Version::new(
            version.major,
            version.minor,
        ))))
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

    display.state.surface_to_window.insert(id.raw(), id);
    // No frame callback has arrived yet for a brand-new surface; treating it
    // as presentable from the start lets the first frame render instead of
    // waiting forever on a callback that only fires after a prior commit.
    display.state.frame_ready.insert(id);

    Ok(Window {
        id,
        xdg_window,
        wl_surface,
        qh: display.qh.clone(),
        context: Context { inner: current, surface: Some(gl_surface) },
        dims: params.dims,
        scale_factor: 1.0,
        fullscreen: params.fullscreen,
        windowed_dims: None,
        close_handler: None,
    })
}

pub fn make_waker(display: &mut Display) -> Arc<dyn Waker> {
    Arc::new(PingWaker { ping: display.wake_ping.clone() })
}

/// Drives the loop: dispatch Wayland + the UI-queue wakeup via `calloop`,
/// then hand off to `Application`'s backend-independent per-iteration
/// steps. Only the blocking wait (the `calloop::EventLoop::dispatch` call)
/// is Wayland-specific.
pub fn run_event_loop(app: &mut Application) -> i32 {
    loop {
        app.drop_deferred_windows();
        let timeout_ms = app.tick_updater();
        let timeout = if timeout_ms == u32::MAX {
            None
        } else {
            Some(Duration::from_millis(timeout_ms as u64))
        };

        let frame_ready = std::mem::take(&mut app.display_mut().state.frame_ready);
        app.render_windows(|id| frame_ready.contains(&id));

        let display = app.display_mut();
        let _ = display.connection.flush();
        if let Err(err) = display.event_loop.dispatch(timeout, &mut display.state) {
            log::error!("wayland dispatch failed: {err}");
            return err.raw_os_error().unwrap_or(1);
        }

        app.drain_ui_queue();

        let pending: Vec<(WindowId, RawEvent)> = app.display_mut().state.pending.drain(..).collect();
        for (id, raw) in pending {
            dispatch_raw_event(app, id, raw);
        }

        if app.should_quit() {
            return 0;
        }

        app.apply_coalesced_resizes();
    }
}

fn dispatch_raw_event(app: &mut Application, id: WindowId, raw: RawEvent) {
    match raw {
        RawEvent::MouseMove { pos } => {
            app.dispatch_event(id, GuiEvent::MouseMove { pos, pointer_id: MOUSE_POINTER_ID });
        }
        RawEvent::MouseButton { action, pos, button } => {
            app.dispatch_event(id, GuiEvent::MouseButton { action, pos, button, pointer_id: MOUSE_POINTER_ID });
        }
        RawEvent::MouseHover { is_hovered } => {
            app.dispatch_event(id, GuiEvent::MouseHover { is_hovered, pointer_id: MOUSE_POINTER_ID });
        }
        RawEvent::Key { action, sym } => {
            let key = keymap::keysym_to_key(sym);
            app.dispatch_event(id, GuiEvent::Key { action, key });
        }
        RawEvent::CharacterInput { utf8 } => {
            app.dispatch_event(
                id,
                GuiEvent::CharacterInput { provider: CharacterProvider::new(move || utf8) },
            );
        }
        RawEvent::Resize { size } => {
            app.coalesce_resize(id, size);
        }
        RawEvent::Close => {
            app.request_close(id);
        }
    }
}

impl CompositorHandler for WaylandState {
    fn scale_factor_changed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _new_factor: i32,
    ) {
    }

    fn transform_changed(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _surface: &wl_surface::WlSurface,
        _new_transform: wl_output::Transform,
    ) {
    }

    fn frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        surface: &wl_surface::WlSurface,
        _time: u32,
    ) {
        if let Some(&id) = self.surface_to_window.get(&Display::surface_id(surface)) {
            self.frame_ready.insert(id);
        }
    }

    fn surface_enter(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _surface: &wl_surface::WlSurface, _output: &wl_output::WlOutput) {}
    fn surface_leave(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _surface: &wl_surface::WlSurface, _output: &wl_output::WlOutput) {}
}

impl OutputHandler for WaylandState {
    fn output_state(&mut self) -> &mut OutputState {
        &mut self.output_state
    }
    fn new_output(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _output: wl_output::WlOutput) {}
    fn update_output(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _output: wl_output::WlOutput) {}
    fn output_destroyed(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _output: wl_output::WlOutput) {}
}

impl WindowHandler for WaylandState {
    fn request_close(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, window: &XdgWindow) {
        if let Some(&id) = self.surface_to_window.get(&Display::surface_id(window.wl_surface())) {
            self.pending.push((id, RawEvent::Close));
        }
    }

    fn configure(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        window: &XdgWindow,
        configure: WindowConfigure,
        _serial: u32,
    ) {
        if let Some(&id) = self.surface_to_window.get(&Display::surface_id(window.wl_surface())) {
            if let (Some(w), Some(h)) = configure.new_size {
                self.pending.push((id, RawEvent::Resize { size: LogicalSize::new(w.get(), h.get()) }));
            }
        }
    }
}

impl SeatHandler for WaylandState {
    fn seat_state(&mut self) -> &mut SeatState {
        &mut self.seat_state
    }
    fn new_seat(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _seat: sctk::reexports::client::protocol::wl_seat::WlSeat) {}
    fn new_capability(&mut self, conn: &Connection, qh: &QueueHandle<Self>, seat: sctk::reexports::client::protocol::wl_seat::WlSeat, capability: Capability) {
        match capability {
            Capability::Pointer => {
                let _ = self.seat_state.get_pointer(qh, &seat);
            }
            Capability::Keyboard => {
                let _ = self.seat_state.get_keyboard(qh, &seat, None);
            }
            Capability::Touch => {
                let _ = self.seat_state.get_touch(qh, &seat);
            }
            _ => {}
        }
        let _ = conn;
    }
    fn remove_capability(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _seat: sctk::reexports::client::protocol::wl_seat::WlSeat, _capability: Capability) {}
    fn remove_seat(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _seat: sctk::reexports::client::protocol::wl_seat::WlSeat) {}
}

impl PointerHandler for WaylandState {
    fn pointer_frame(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _pointer: &sctk::reexports::client::protocol::wl_pointer::WlPointer,
        events: &[PointerEvent],
    ) {
        for event in events {
            let Some(&id) = self.surface_to_window.get(&Display::surface_id(&event.surface)) else {
                continue;
            };
            match event.kind {
                PointerEventKind::Enter { .. } => {
                    self.pending.push((id, RawEvent::MouseHover { is_hovered: true }));
                }
                PointerEventKind::Leave { .. } => {
                    self.pending.push((id, RawEvent::MouseHover { is_hovered: false }));
                }
                PointerEventKind::Motion { .. } => {
                    self.last_pointer_pos = (event.position.0 as f32, event.position.1 as f32);
                    self.pending.push((id, RawEvent::MouseMove { pos: self.last_pointer_pos }));
                }
                PointerEventKind::Press { button, .. } => {
                    self.pending.push((
                        id,
                        RawEvent::MouseButton {
                            action: Action::Press,
                            pos: self.last_pointer_pos,
                            button: wayland_button_to_enum(button),
                        },
                    ));
                }
                PointerEventKind::Release { button, .. } => {
                    self.pending.push((
                        id,
                        RawEvent::MouseButton {
                            action: Action::Release,
                            pos: self.last_pointer_pos,
                            button: wayland_button_to_enum(button),
                        },
                    ));
                }
                PointerEventKind::Axis { .. } => {}
            }
        }
    }
}

/// Linux evdev button codes as reported by `wl_pointer.button`
/// (`BTN_LEFT=0x110` and on), distinct from X11's 1-based button numbers.
fn wayland_button_to_enum(code: u32) -> MouseButton {
    match code {
        0x110 => MouseButton::Left,
        0x111 => MouseButton::Right,
        0x112 => MouseButton::Middle,
        0x113 => MouseButton::Side,
        0x114 => MouseButton::Extra,
        0x115 => MouseButton::Forward,
        0x116 => MouseButton::Back,
        _ => MouseButton::Middle,
    }
}

impl KeyboardHandler for WaylandState {
    fn enter(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &sctk::reexports::client::protocol::wl_keyboard::WlKeyboard,
        _surface: &wl_surface::WlSurface,
        _serial: u32,
        _raw: &[u32],
        _keysyms: &[sctk::seat::Keysym],
    ) {
    }

    fn leave(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &sctk::reexports::client::protocol::wl_keyboard::WlKeyboard,
        _surface: &wl_surface::WlSurface,
        _serial: u32,
    ) {
    }

    fn press_key(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &sctk::reexports::client::protocol::wl_keyboard::WlKeyboard,
        _serial: u32,
        event: KeyEvent,
    ) {
        if let Some(&id) = self.current_keyboard_window() {
            self.pending.push((id, RawEvent::Key { action: Action::Press, sym: event.keysym }));
            if let Some(utf8) = event.utf8.filter(|s| !s.is_empty()) {
                self.pending.push((id, RawEvent::CharacterInput { utf8 }));
            }
        }
    }

    fn release_key(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &sctk::reexports::client::protocol::wl_keyboard::WlKeyboard,
        _serial: u32,
        event: KeyEvent,
    ) {
        if let Some(&id) = self.current_keyboard_window() {
            self.pending.push((id, RawEvent::Key { action: Action::Release, sym: event.keysym }));
        }
    }

    fn update_modifiers(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _keyboard: &sctk::reexports::client::protocol::wl_keyboard::WlKeyboard,
        _serial: u32,
        modifiers: Modifiers,
        _layout: u32,
    ) {
        self.mods = modifiers;
    }
}

impl WaylandState {
    /// Keyboard focus is tracked per-window implicitly by the only window
    /// currently mapped; single-seat deployments (the common case) need no
    /// further bookkeeping.
    fn current_keyboard_window(&self) -> Option<&WindowId> {
        self.surface_to_window.values().next()
    }
}

impl ProvidesRegistryState for WaylandState {
    fn registry(&mut self) -> &mut RegistryState {
        &mut self.registry_state
    }
    sctk::registry_handlers![OutputState, SeatState];
}

delegate_compositor!(WaylandState);
delegate_output!(WaylandState);
delegate_seat!(WaylandState);
delegate_pointer!(WaylandState);
delegate_keyboard!(WaylandState);
delegate_xdg_shell!(WaylandState);
delegate_xdg_window!(WaylandState);
delegate_registry!(WaylandState);
