//! Overrides read from the process environment.
//!
//! Kept in its own test binary so no other test sees the variables.

use buildonaws_provider::config::{BACKEND_ADDRESS_ENV, SKIP_TLS_VALIDATION_ENV};
use buildonaws_provider::{ConfigError, ProviderConfig};

#[test]
fn test_process_env_overrides_config() {
    // SAFETY: the only test in this binary, so nothing reads the environment concurrently.
    unsafe {
        std::env::set_var(BACKEND_ADDRESS_ENV, "https://search.internal:9200");
        std::env::set_var(SKIP_TLS_VALIDATION_ENV, "yes");
    }

    let config = ProviderConfig::new()
        .with_backend_address("http://localhost:9200")
        .with_process_env()
        .unwrap();
    assert_eq!(config.backend_address(), "https://search.internal:9200");
    assert!(config.skip_tls_validation());

    unsafe { std::env::set_var(SKIP_TLS_VALIDATION_ENV, "maybe") };
    let err = ProviderConfig::new().with_process_env().unwrap_err();
    assert!(matches!(
        err,
        ConfigError::InvalidValue { ref key, ref value }
            if key == SKIP_TLS_VALIDATION_ENV && value == "maybe"
    ));

    unsafe {
        std::env::remove_var(BACKEND_ADDRESS_ENV);
        std::env::remove_var(SKIP_TLS_VALIDATION_ENV);
    }
    let config = ProviderConfig::new().with_process_env().unwrap();
    assert_eq!(config.backend_address(), "http://localhost:9200");
    assert!(!config.skip_tls_validation());
}
