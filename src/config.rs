use anyhow::{Context, Result};
use chrono::FixedOffset;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default = "default_plugin_config")]
    pub plugin: PluginConfig,
    #[serde(default)]
    pub host: HostConfig,
    pub service: ServiceConfig,
    #[serde(default = "default_server_config")]
    pub server: ServerConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PluginConfig {
    /// Namespaces the plugin's routes under the host's `/plugins/` path.
    #[serde(default = "default_plugin_id")]
    pub id: String,
    /// External website opened by the channel header button.
    #[serde(default = "default_client_url")]
    pub client_url: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct HostConfig {
    /// The host's configured site URL, e.g. "https://chat.example/team"
    #[serde(default)]
    pub site_url: Option<String>,
    /// Bot account token used by the server binary against the host REST API
    #[serde(default)]
    pub bot_token: String,
    /// User id of the bot account that authors ephemeral posts and reactions
    #[serde(default)]
    pub bot_user_id: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    /// Base URL of the notification service, e.g. "http://localhost:8080"
    pub api_url: String,
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

impl ServiceConfig {
    /// Offset used when stamping notice start/end times.
    pub fn offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_hours * 3600)
            .with_context(|| format!("Invalid utc_offset_hours: {}", self.utc_offset_hours))
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,
}

/// The subset of configuration the client-side half needs.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub plugin_id: String,
    pub client_url: String,
}

fn default_plugin_id() -> String {
    "mbotc".to_string()
}

fn default_client_url() -> String {
    "https://www.mbotc.com".to_string()
}

fn default_utc_offset_hours() -> i32 {
    9
}

fn default_listen_addr() -> String {
    "127.0.0.1:8075".to_string()
}

fn default_plugin_config() -> PluginConfig {
    PluginConfig {
        id: default_plugin_id(),
        client_url: default_client_url(),
    }
}

fn default_server_config() -> ServerConfig {
    ServerConfig {
        listen_addr: default_listen_addr(),
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse config file")?;

        if config.plugin.id.trim().is_empty() {
            anyhow::bail!("plugin.id must not be empty");
        }
        reqwest::Url::parse(&config.service.api_url)
            .with_context(|| format!("Invalid service.api_url: {}", config.service.api_url))?;
        if let Some(site_url) = &config.host.site_url {
            reqwest::Url::parse(site_url)
                .with_context(|| format!("Invalid host.site_url: {}", site_url))?;
        }
        config.service.offset()?;

        Ok(config)
    }

    pub fn client(&self) -> ClientConfig {
        ClientConfig {
            plugin_id: self.plugin.id.clone(),
            client_url: self.plugin.client_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let config = Config::parse(
            r#"
[service]
api_url = "http://localhost:8080"
"#,
        )
        .unwrap();

        assert_eq!(config.plugin.id, "mbotc");
        assert_eq!(config.plugin.client_url, "https://www.mbotc.com");
        assert_eq!(config.host.site_url, None);
        assert_eq!(config.service.utc_offset_hours, 9);
        assert_eq!(config.server.listen_addr, "127.0.0.1:8075");
    }

    #[test]
    fn test_full_config() {
        let config = Config::parse(
            r#"
[plugin]
id = "com.example.notice"
client_url = "https://notice.example"

[host]
site_url = "https://chat.example/team"
bot_token = "tok"
bot_user_id = "bot1"

[service]
api_url = "http://svc:8080"
utc_offset_hours = -5

[server]
listen_addr = "0.0.0.0:9000"
"#,
        )
        .unwrap();

        assert_eq!(config.client().plugin_id, "com.example.notice");
        assert_eq!(config.client().client_url, "https://notice.example");
        assert_eq!(config.host.site_url.as_deref(), Some("https://chat.example/team"));
        assert_eq!(config.service.offset().unwrap().local_minus_utc(), -5 * 3600);
        assert_eq!(config.server.listen_addr, "0.0.0.0:9000");
    }

    #[test]
    fn test_missing_service_section_fails() {
        assert!(Config::parse("[plugin]\nid = \"x\"\n").is_err());
    }

    #[test]
    fn test_invalid_urls_rejected() {
        let bad_service = "[service]\napi_url = \"not a url\"\n";
        assert!(Config::parse(bad_service).is_err());

        let bad_site = "[host]\nsite_url = \"::\"\n[service]\napi_url = \"http://svc\"\n";
        assert!(Config::parse(bad_site).is_err());
    }

    #[test]
    fn test_out_of_range_offset_rejected() {
        let content = "[service]\napi_url = \"http://svc\"\nutc_offset_hours = 30\n";
        assert!(Config::parse(content).is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("mbotc-config-{}.toml", std::process::id()));
        std::fs::write(&path, "[service]\napi_url = \"http://svc\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.service.api_url, "http://svc");
        std::fs::remove_file(&path).ok();
    }
}
