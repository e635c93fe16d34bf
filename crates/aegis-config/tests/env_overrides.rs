use figment::Jail;

use aegis_config::AegisConfig;

#[test]
fn env_vars_override_defaults() {
    Jail::expect_with(|jail| {
        jail.set_env("AEGIS_STRIPE__SECRET_KEY", "sk_test_from_env");
        jail.set_env("AEGIS_GENERAL__THROTTLE_MS", "250");

        let config: AegisConfig = AegisConfig::figment().extract().expect("config loads");
        assert_eq!(config.stripe.secret_key, "sk_test_from_env");
        assert_eq!(config.general.throttle_ms, 250);
        Ok(())
    });
}

#[test]
fn nested_sections_map_via_double_underscore() {
    Jail::expect_with(|jail| {
        jail.set_env("AEGIS_SERVER__BIND", "0.0.0.0:9000");
        jail.set_env("AEGIS_DATABASE__PATH", "/tmp/aegis-test.db");

        let config: AegisConfig = AegisConfig::figment().extract().expect("config loads");
        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert!(config.database.has_override());
        assert_eq!(config.database.path, "/tmp/aegis-test.db");
        Ok(())
    });
}
