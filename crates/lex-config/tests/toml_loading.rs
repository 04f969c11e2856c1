//! Integration tests for TOML configuration loading.
//!
//! Uses figment::Jail for safe, sandboxed env var and file manipulation.

use figment::{
    Figment, Jail,
    providers::{Env, Format, Serialized, Toml},
};
use lex_config::LexConfig;

#[test]
fn loads_auth_and_llm_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[auth]
jwt_secret = "toml-secret"
token_ttl_secs = 3600
cookie_secure = true

[llm]
api_key = "sk-toml"
model = "gpt-4o"
assistant_id = "asst_123"
max_attempts = 3
poll_interval_ms = 250
"#,
        )?;

        let config: LexConfig = Figment::from(Serialized::defaults(LexConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.auth.jwt_secret, "toml-secret");
        assert_eq!(config.auth.token_ttl_secs, 3600);
        assert!(config.auth.cookie_secure);
        assert_eq!(config.auth.cookie_name, "lex_session");
        assert_eq!(config.llm.api_key, "sk-toml");
        assert_eq!(config.llm.model, "gpt-4o");
        assert!(config.llm.has_assistant());
        assert_eq!(config.llm.max_attempts, 3);
        assert_eq!(config.llm.poll_interval_ms, 250);
        assert_eq!(config.llm.max_polls, 60);
        Ok(())
    });
}

#[test]
fn loads_server_database_client_from_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[server]
bind = "0.0.0.0:8080"

[database]
path = ":memory:"

[client]
server_url = "https://lex.example.com"
poll_interval_secs = 5
"#,
        )?;

        let config: LexConfig = Figment::from(Serialized::defaults(LexConfig::default()))
            .merge(Toml::file("config.toml"))
            .extract()?;

        assert_eq!(config.server.socket_addr().unwrap().port(), 8080);
        assert!(config.database.is_in_memory());
        assert_eq!(config.client.server_url, "https://lex.example.com");
        assert_eq!(config.client.poll_interval_secs, 5);
        assert_eq!(config.client.max_polls, 100);
        Ok(())
    });
}

#[test]
fn env_beats_toml() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
[llm]
model = "from-toml"
"#,
        )?;
        jail.set_env("LEX_LLM__MODEL", "from-env");

        let config: LexConfig = Figment::from(Serialized::defaults(LexConfig::default()))
            .merge(Toml::file("config.toml"))
            .merge(Env::prefixed("LEX_").split("__"))
            .extract()?;

        assert_eq!(config.llm.model, "from-env");
        Ok(())
    });
}

#[test]
fn project_local_file_is_picked_up() {
    Jail::expect_with(|jail| {
        jail.create_dir(".lex")?;
        jail.create_file(
            ".lex/config.toml",
            r#"
[general]
default_limit = 7
"#,
        )?;

        let config = LexConfig::load().expect("config loads");
        assert_eq!(config.general.default_limit, 7);
        Ok(())
    });
}
