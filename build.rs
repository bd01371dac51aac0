use cfg_aliases::cfg_aliases;

fn main() {
    cfg_aliases! {
        backend_wayland: { all(unix, not(target_os = "macos"), not(target_os = "android"), not(target_os = "ios"), feature = "wayland") },
        backend_x11: { all(unix, not(target_os = "macos"), not(target_os = "android"), not(target_os = "ios"), feature = "x11", not(feature = "wayland")) },
        backend_win32: { target_os = "windows" },
        backend_macos: { target_os = "macos" },
        backend_android: { target_os = "android" },
        backend_ios: { target_os = "ios" },
        backend_sdl2: { all(feature = "sdl2", not(target_os = "android"), not(target_os = "ios")) },
    }
}
