use aspect_runtime::{Framework, FrameworkConfig, FrameworkError, Registries};

// The instance is process-wide, so the whole lifecycle runs in one test.
#[test]
fn test_init_once_then_get() {
    assert!(!Framework::is_initialized());
    assert!(matches!(
        Framework::instance(),
        Err(FrameworkError::NotInitialized)
    ));

    let config = FrameworkConfig::from_json(r#"{"name": "sponge"}"#).unwrap();
    let framework = Framework::init(config, Registries::new()).unwrap();
    assert_eq!(framework.name(), "sponge");
    assert!(Framework::is_initialized());

    let again = Framework::init(FrameworkConfig::default(), Registries::new());
    assert!(matches!(again, Err(FrameworkError::AlreadyInitialized)));

    let instance = Framework::instance().unwrap();
    assert!(std::ptr::eq(instance, framework));
    assert_eq!(instance.name(), "sponge");
}
