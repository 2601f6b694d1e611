use typed_bloom_rs::{
    BloomError, DeriverConfig, DeriverConfigBuilder, NullEncoding,
    TruncationPolicy,
    config::{ENV_NULL_ENCODING, ENV_TEXT_CAPACITY, ENV_TRUNCATION},
};

fn set(var: &str, value: &str) {
    // SAFETY: env access is confined to the single test in this binary
    unsafe { std::env::set_var(var, value) };
}

fn unset(var: &str) {
    // SAFETY: see `set`
    unsafe { std::env::remove_var(var) };
}

#[test]
fn test_builder_overrides() {
    let config = DeriverConfigBuilder::default()
        .text_capacity(64)
        .truncation(TruncationPolicy::Truncate)
        .null_encoding(NullEncoding::Empty)
        .build()
        .expect("valid builder");

    assert_eq!(config.text_capacity, 64);
    assert_eq!(config.truncation, TruncationPolicy::Truncate);
    assert_eq!(config.null_encoding, NullEncoding::Empty);
    assert!(config.validate().is_ok());
}

// Env vars are process-wide, so every env scenario lives in this one test.
#[test]
fn test_from_env() {
    for var in [ENV_TEXT_CAPACITY, ENV_TRUNCATION, ENV_NULL_ENCODING] {
        unset(var);
    }
    assert_eq!(DeriverConfig::from_env().unwrap(), DeriverConfig::default());

    set(ENV_TEXT_CAPACITY, "32");
    set(ENV_TRUNCATION, "truncate");
    set(ENV_NULL_ENCODING, "empty");
    let config = DeriverConfig::from_env().unwrap();
    assert_eq!(config.text_capacity, 32);
    assert_eq!(config.truncation, TruncationPolicy::Truncate);
    assert_eq!(config.null_encoding, NullEncoding::Empty);

    set(ENV_TEXT_CAPACITY, "0");
    assert!(matches!(
        DeriverConfig::from_env(),
        Err(BloomError::InvalidConfig(_))
    ));

    set(ENV_TEXT_CAPACITY, "lots");
    match DeriverConfig::from_env() {
        Err(BloomError::EnvParseError { var_name, value, .. }) => {
            assert_eq!(var_name, ENV_TEXT_CAPACITY);
            assert_eq!(value, "lots");
        }
        other => panic!("expected parse error, got {other:?}"),
    }

    unset(ENV_TEXT_CAPACITY);
    set(ENV_NULL_ENCODING, "nil");
    let err = DeriverConfig::from_env().unwrap_err();
    assert!(err.to_string().contains(ENV_NULL_ENCODING));

    for var in [ENV_TEXT_CAPACITY, ENV_TRUNCATION, ENV_NULL_ENCODING] {
        unset(var);
    }
}

#[test]
fn test_config_serializes_kebab_case() {
    let config = DeriverConfig::default();
    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["truncation"], "reject");
    assert_eq!(json["null_encoding"], "zero-block");
    assert_eq!(json["text_capacity"], 256);
}
