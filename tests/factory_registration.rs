//! Exercises `ApplicationFactory` registration in its own process: the
//! registry is a single process-wide `OnceLock`, so this lives in its own
//! integration-test binary (never alongside other tests that might also
//! register it) and drives the whole sequence from one `#[test]` function,
//! since `cargo test` may otherwise run sibling tests in the same binary
//! concurrently and race the registration order.

use winshim::{application_factory, make_application, ApplicationFactory, Error};

#[test]
fn registration_is_single_shot_and_wired_to_make_application() {
    assert!(application_factory().is_none());

    let first = ApplicationFactory::register(|exe, args| {
        assert_eq!(exe, "myapp");
        assert_eq!(args, &["--flag".to_string()]);
        None
    });
    assert!(first.is_ok());
    assert!(application_factory().is_some());

    let second = ApplicationFactory::register(|_exe, _args| None);
    assert!(matches!(second, Err(Error::FactoryAlreadyRegistered)));

    let result = make_application("myapp", &["--flag".to_string()]);
    assert!(matches!(result, Ok(None)));
}
