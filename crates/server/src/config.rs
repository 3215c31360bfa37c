use serde::Deserialize;

use paraph_docusign::DocuSignConfig;

use crate::error::ServerError;

/// Top-level TOML configuration for the Paraph server.
///
/// Every section has defaults, so a missing config file is equivalent to an
/// empty one. DocuSign credentials additionally fall back to
/// `PARAPH_DOCUSIGN_*` environment variables when absent from the file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParaphConfig {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// DocuSign credentials and endpoint.
    #[serde(default)]
    pub docusign: DocuSignSection,
}

/// The `[server]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind host.
    #[serde(default = "default_host")]
    pub host: String,

    /// Bind port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Externally reachable base URL, used to build the callback URL the
    /// provider posts notifications to. Defaults to `http://{host}:{port}`.
    pub external_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            external_url: None,
        }
    }
}

impl ServerConfig {
    /// The address to bind the listener to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The externally reachable base URL, without a trailing slash.
    #[must_use]
    pub fn external_url(&self) -> String {
        self.external_url
            .clone()
            .map_or_else(
                || format!("http://{}:{}", self.host, self.port),
                |url| url.trim_end_matches('/').to_owned(),
            )
    }
}

fn default_host() -> String {
    "127.0.0.1".to_owned()
}

fn default_port() -> u16 {
    8080
}

/// The `[docusign]` section.
///
/// Each credential resolves from the TOML value first, then from the
/// corresponding `PARAPH_DOCUSIGN_*` environment variable. Resolution happens
/// once, at startup, into an explicit [`DocuSignConfig`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DocuSignSection {
    /// OAuth access token (`PARAPH_DOCUSIGN_ACCESS_TOKEN`).
    pub access_token: Option<String>,

    /// API account id (`PARAPH_DOCUSIGN_ACCOUNT_ID`).
    pub account_id: Option<String>,

    /// eSignature REST API base URL (`PARAPH_DOCUSIGN_BASE_URL`). Defaults
    /// to the demo environment.
    pub base_url: Option<String>,
}

impl DocuSignSection {
    /// Resolve the section into a client configuration.
    ///
    /// Fails when a required credential is set neither in the file nor in
    /// the environment.
    pub fn resolve(&self) -> Result<DocuSignConfig, ServerError> {
        let access_token = setting(&self.access_token, "PARAPH_DOCUSIGN_ACCESS_TOKEN")
            .ok_or_else(|| missing("docusign.access_token", "PARAPH_DOCUSIGN_ACCESS_TOKEN"))?;
        let account_id = setting(&self.account_id, "PARAPH_DOCUSIGN_ACCOUNT_ID")
            .ok_or_else(|| missing("docusign.account_id", "PARAPH_DOCUSIGN_ACCOUNT_ID"))?;

        let mut config = DocuSignConfig::new(access_token, account_id);
        if let Some(base_url) = setting(&self.base_url, "PARAPH_DOCUSIGN_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        Ok(config)
    }
}

fn setting(file_value: &Option<String>, env_key: &str) -> Option<String> {
    file_value
        .clone()
        .or_else(|| std::env::var(env_key).ok())
        .filter(|v| !v.is_empty())
}

fn missing(toml_key: &str, env_key: &str) -> ServerError {
    ServerError::Config(format!("{toml_key} is required (set it in the config file or via {env_key})"))
}
