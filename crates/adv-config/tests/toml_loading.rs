//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed file and env var manipulation.

use adv_config::AdvConfig;
use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use pretty_assertions::assert_eq;

#[test]
fn loads_all_sections_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "/var/lib/advocate/cases.db"

[crypto]
key = "AAECAwQFBgcICQoLDA0ODxAREhMUFRYXGBkaGxwdHh8="

[general]
default_limit = 10
"#,
        )?;

        let config: AdvConfig = Figment::from(Serialized::defaults(AdvConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.database.path, "/var/lib/advocate/cases.db");
        assert!(config.crypto.is_configured());
        assert_eq!(config.general.default_limit, 10);
        Ok(())
    });
}

#[test]
fn partial_toml_keeps_defaults() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = ":memory:"
"#,
        )?;

        let config: AdvConfig = Figment::from(Serialized::defaults(AdvConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert!(config.database.is_in_memory());
        assert!(!config.crypto.is_configured());
        assert_eq!(config.general.default_limit, 50);
        Ok(())
    });
}

#[test]
fn env_overrides_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[database]
path = "from-toml.db"
"#,
        )?;
        jail.set_env("ADVOCATE_DATABASE__PATH", "from-env.db");

        let config: AdvConfig = Figment::from(Serialized::defaults(AdvConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("ADVOCATE_").split("__"))
            .extract()?;

        assert_eq!(config.database.path, "from-env.db");
        Ok(())
    });
}

#[test]
fn project_local_config_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".advocate")?;
        jail.create_file(
            ".advocate/config.toml",
            r#"
[general]
default_limit = 7
"#,
        )?;

        let config = AdvConfig::load().expect("config loads");
        assert_eq!(config.general.default_limit, 7);
        Ok(())
    });
}

#[test]
fn wrong_type_is_an_error() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[general]
default_limit = "many"
"#,
        )?;

        let result: Result<AdvConfig, _> =
            Figment::from(Serialized::defaults(AdvConfig::default()))
                .merge(Toml::file("config.toml"))
                .extract();
        assert!(result.is_err());
        Ok(())
    });
}
