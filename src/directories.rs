//! Application directory discovery.

use crate::error::Error;

/// The three immutable application directories, computed once at startup.
/// Not created by this layer.
#[derive(Debug, Clone)]
pub struct Directories {
    pub cache: String,
    pub config: String,
    pub state: String,
}

impl Directories {
    /// Computes the application directories from `HOME`/`XDG_*` environment
    /// variables, suffixed by `app_name`. `HOME` is required; its absence is
    /// a fatal error.
    ///
    /// Layout: `<base>/<app_name>/` where `<base>` is the XDG value or its
    /// default (`~/.cache/`, `~/.config/`, `~/.local/state/`).
    pub fn discover(app_name: &str) -> Result<Self, Error> {
        let home = std::env::var("HOME").map_err(|_| Error::DisplayUnavailable {
            reason: "HOME environment variable is not set".to_string(),
        })?;

        let cache = xdg_base(&home, "XDG_CACHE_HOME", ".cache", app_name);
        let config = xdg_base(&home, "XDG_CONFIG_HOME", ".config", app_name);
        let state = xdg_base(&home, "XDG_STATE_HOME", ".local/state", app_name);

        Ok(Self {
            cache,
            config,
            state,
        })
    }
}

fn xdg_base(home: &str, env_var: &str, default_suffix: &str, app_name: &str) -> String {
    let base = std::env::var(env_var).unwrap_or_else(|_| format!("{home}/{default_suffix}"));
    format!("{}/{}/", base.trim_end_matches('/'), app_name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    #[test]
    fn defaults_when_xdg_vars_unset() {
        let _guard = ENV_LOCK.lock().unwrap();
        let prev_home = std::env::var("HOME").ok();
        std::env::remove_var("XDG_CACHE_HOME");
        std::env::remove_var("XDG_CONFIG_HOME");
        std::env::remove_var("XDG_STATE_HOME");
        std::env::set_var("HOME", "/home/tester");

        let dirs = Directories::discover("myapp").unwrap();
        assert_eq!(dirs.cache, "/home/tester/.cache/myapp/");
        assert_eq!(dirs.config, "/home/tester/.config/myapp/");
        assert_eq!(dirs.state, "/home/tester/.local/state/myapp/");

        match prev_home {
            Some(h) => std::env::set_var("HOME", h),
            None => std::env::remove_var("HOME"),
        }
    }

    #[test]
    fn xdg_vars_override_defaults() {
        let _guard = ENV_LOCK.lock().unwrap();
        let prev_home = std::env::var("HOME").ok();
        std::env::set_var("HOME", "/home/tester");
        std::env::set_var("XDG_CACHE_HOME", "/custom/cache");

        let dirs = Directories::discover("myapp").unwrap();
        assert_eq!(dirs.cache, "/custom/cache/myapp/");

        std::env::remove_var("XDG_CACHE_HOME");
        match prev_home {
            Some(h) => std::env::set_var("HOME", h),
            None => std::env::remove_var("HOME"),
        }
    }

    #[test]
    fn missing_home_is_fatal() {
        let _guard = ENV_LOCK.lock().unwrap();
        let prev_home = std::env::var("HOME").ok();
        std::env::remove_var("HOME");

        assert!(matches!(
            Directories::discover("myapp"),
            Err(Error::DisplayUnavailable { .. })
        ));

        if let Some(h) = prev_home {
            std::env::set_var("HOME", h);
        }
    }
}
