//! Global installation; kept in its own binary because it can only happen once.

use safeact_log::{Config, Fields, LogError};

#[test]
fn installs_once_then_reports_already_initialised() {
    let config = Config {
        fields: Fields {
            service: Some("safeact-test".into()),
            ..Fields::default()
        },
        ..Config::test()
    };

    let guard = safeact_log::init_with(config).unwrap();
    safeact_log::info!("inside the root span");
    assert!(tracing::dispatcher::has_been_set());

    let err = safeact_log::init().unwrap_err();
    assert_eq!(err, LogError::AlreadyInitialised);

    // init_test tolerates the existing subscriber
    drop(safeact_log::init_test());
    drop(guard);
}
