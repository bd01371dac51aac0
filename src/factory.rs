//! Process-wide application factory registration.
//!
//! User code registers exactly one factory at process load. `main` (or the
//! platform entry point) calls [`make_application`] to obtain the
//! application instance. Enforces single-registration with a fatal error on
//! conflict, matching a legacy requirement some UI toolkits impose on
//! their own global application state.

use std::sync::OnceLock;

use crate::app::Application;
use crate::error::Error;

/// A function from `(executable_name, args)` to either a constructed
/// application or `None` meaning "no GUI, exit 0".
pub type FactoryFn =
    Box<dyn Fn(&str, &[String]) -> Option<Application> + Send + Sync>;

static FACTORY: OnceLock<FactoryFn> = OnceLock::new();

/// Registers the single process-wide application factory. Must be called at
/// most once per process; a second call is a fatal
/// [`Error::FactoryAlreadyRegistered`].
pub struct ApplicationFactory;

impl ApplicationFactory {
    /// Registers `factory` as the process-wide application entry point.
    pub fn register(
        factory: impl Fn(&str, &[String]) -> Option<Application> + Send + Sync + 'static,
    ) -> Result<Self, Error> {
        FACTORY
            .set(Box::new(factory))
            .map_err(|_| Error::FactoryAlreadyRegistered)?;
        Ok(Self)
    }
}

/// Returns the registered factory, if any (does not invoke it).
pub fn application_factory() -> Option<&'static FactoryFn> {
    FACTORY.get()
}

/// Invokes the registered factory with the process's executable name and
/// remaining arguments, passed through verbatim. Fatal
/// [`Error::FactoryNotRegistered`] if no factory was registered first.
pub fn make_application(executable_name: &str, args: &[String]) -> Result<Option<Application>, Error> {
    let factory = application_factory().ok_or(Error::FactoryNotRegistered)?;
    Ok(factory(executable_name, args))
}

#[cfg(test)]
mod tests {
    // `FACTORY` is a process-wide `OnceLock`; only one test in this crate's
    // test binary may register it, so registration itself is exercised by
    // the scenario tests in `tests/` which run in a dedicated process via
    // `cfg(test)` isolation at the integration-test level. Here we only
    // check the error path that does not mutate global state.
    use super::*;

    #[test]
    fn make_application_without_registration_is_fatal() {
        // This test only holds if no other test in the same binary has
        // already registered a factory; run in its own integration test
        // binary (see tests/factory_registration.rs) to guarantee that.
        if application_factory().is_none() {
            assert!(matches!(
                make_application("app", &[]),
                Err(Error::FactoryNotRegistered)
            ));
        }
    }
}
