//! Compile-time backend selection: exactly one of these submodules is
//! compiled in, selected by the `cfg` aliases `build.rs` defines from target
//! OS and Cargo features. `wayland` wins over `x11` when both features are
//! enabled, matching the alias priority in `build.rs`.

#[cfg(backend_wayland)]
pub(crate) mod wayland;
#[cfg(backend_wayland)]
pub(crate) use wayland as backend;

#[cfg(backend_x11)]
pub(crate) mod x11;
#[cfg(backend_x11)]
pub(crate) use x11 as backend;

#[cfg(backend_win32)]
pub(crate) mod win32;
#[cfg(backend_win32)]
pub(crate) use win32 as backend;

#[cfg(backend_macos)]
pub(crate) mod macos;
#[cfg(backend_macos)]
pub(crate) use macos as backend;

#[cfg(backend_android)]
pub(crate) mod android;
#[cfg(backend_android)]
pub(crate) use android as backend;

#[cfg(backend_ios)]
pub(crate) mod ios;
#[cfg(backend_ios)]
pub(crate) use ios as backend;

#[cfg(all(backend_sdl2, not(any(backend_wayland, backend_x11, backend_win32, backend_macos, backend_android, backend_ios))))]
pub(crate) mod sdl2;
#[cfg(all(backend_sdl2, not(any(backend_wayland, backend_x11, backend_win32, backend_macos, backend_android, backend_ios))))]
pub(crate) use sdl2 as backend;
