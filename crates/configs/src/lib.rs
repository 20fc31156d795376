use anyhow::Result;
use serde::Deserialize;
use anyhow::anyhow;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub otp: OtpConfig,
    #[serde(default)]
    pub google: GoogleOAuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: "127.0.0.1".into(), port: 9090, worker_threads: Some(4) }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub url: String,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,
    #[serde(default)]
    pub sqlx_logging: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            max_connections: default_max_connections(),
            min_connections: default_min_connections(),
            connect_timeout_secs: default_connect_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
            acquire_timeout_secs: default_acquire_timeout(),
            sqlx_logging: false,
        }
    }
}

fn default_max_connections() -> u32 { 10 }
fn default_min_connections() -> u32 { 2 }
fn default_connect_timeout() -> u64 { 30 }
fn default_idle_timeout() -> u64 { 600 }
fn default_max_lifetime() -> u64 { 3600 }
fn default_acquire_timeout() -> u64 { 30 }

/// JWT signing settings. Access and refresh tokens use separate secrets.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub access_secret: String,
    #[serde(default)]
    pub refresh_secret: String,
    #[serde(default = "default_access_ttl")]
    pub access_ttl_secs: u64,
    #[serde(default = "default_refresh_ttl")]
    pub refresh_ttl_secs: u64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            access_secret: String::new(),
            refresh_secret: String::new(),
            access_ttl_secs: default_access_ttl(),
            refresh_ttl_secs: default_refresh_ttl(),
        }
    }
}

fn default_access_ttl() -> u64 { 3600 }
fn default_refresh_ttl() -> u64 { 7 * 24 * 3600 }

/// Twilio Verify credentials.
#[derive(Debug, Clone, Deserialize)]
pub struct OtpConfig {
    #[serde(default)]
    pub account_sid: String,
    #[serde(default)]
    pub auth_token: String,
    #[serde(default)]
    pub service_sid: String,
    #[serde(default = "default_otp_base_url")]
    pub base_url: String,
}

impl Default for OtpConfig {
    fn default() -> Self {
        Self {
            account_sid: String::new(),
            auth_token: String::new(),
            service_sid: String::new(),
            base_url: default_otp_base_url(),
        }
    }
}

fn default_otp_base_url() -> String { "https://verify.twilio.com".into() }

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleOAuthConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default = "default_redirect_url")]
    pub redirect_url: String,
    #[serde(default)]
    pub state: String,
    #[serde(default = "default_google_auth_url")]
    pub auth_url: String,
    #[serde(default = "default_google_token_url")]
    pub token_url: String,
    #[serde(default = "default_google_userinfo_url")]
    pub userinfo_url: String,
    #[serde(default = "default_google_scopes")]
    pub scopes: Vec<String>,
}

impl Default for GoogleOAuthConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            redirect_url: default_redirect_url(),
            state: String::new(),
            auth_url: default_google_auth_url(),
            token_url: default_google_token_url(),
            userinfo_url: default_google_userinfo_url(),
            scopes: default_google_scopes(),
        }
    }
}

fn default_redirect_url() -> String { "http://localhost:9090/user/callback-gl".into() }
fn default_google_auth_url() -> String { "https://accounts.google.com/o/oauth2/auth".into() }
fn default_google_token_url() -> String { "https://oauth2.googleapis.com/token".into() }
fn default_google_userinfo_url() -> String { "https://www.googleapis.com/oauth2/v2/userinfo".into() }
fn default_google_scopes() -> Vec<String> { vec!["https://www.googleapis.com/auth/userinfo.email".into()] }

/// Read `CONFIG_PATH` (default `config.toml`). `None` when the file is absent.
pub fn load_default() -> Result<Option<AppConfig>> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_optional(&path)
}

/// An absent file yields `None`. Any other read error and every parse error propagate.
pub fn load_optional(path: &str) -> Result<Option<AppConfig>> {
    match std::fs::read_to_string(path) {
        Ok(content) => load_from_str(&content).map(Some),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(anyhow!("failed to read config {path}: {e}")),
    }
}

pub fn load_from_str(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

fn env_or(key: &str, target: &mut String) {
    if target.trim().is_empty() {
        if let Ok(v) = std::env::var(key) {
            *target = v;
        }
    }
}

fn require(field: &str, value: &str, env_key: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(anyhow!("{field} is empty; set it in config.toml or {env_key}"));
    }
    Ok(())
}

impl AppConfig {
    /// Load `config.toml` (or `CONFIG_PATH`) when present, otherwise fall back
    /// to [`AppConfig::from_env`]. A file that exists but does not parse is an error.
    pub fn load_and_validate() -> Result<Self> {
        match load_default()? {
            Some(mut cfg) => {
                cfg.normalize_and_validate()?;
                Ok(cfg)
            }
            None => Self::from_env(),
        }
    }

    /// Defaults filled purely from environment variables.
    pub fn from_env() -> Result<Self> {
        let mut cfg = AppConfig::default();
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.normalize_from_env();
        self.database.validate()?;
        self.auth.normalize_from_env();
        self.auth.validate()?;
        self.otp.normalize_from_env();
        self.otp.validate()?;
        self.google.normalize_from_env();
        self.google.validate()?;
        Ok(())
    }
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if let Ok(host) = std::env::var("SERVER_HOST") {
            self.host = host;
        }
        if let Some(port) = std::env::var("SERVER_PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
            self.port = port;
        }
        if self.host.trim().is_empty() {
            self.host = "127.0.0.1".to_string();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        if let Some(w) = std::env::var("TOKIO_WORKER_THREADS").ok().and_then(|v| v.parse::<usize>().ok()) {
            self.worker_threads = Some(w);
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl DatabaseConfig {
    pub fn normalize_from_env(&mut self) {
        env_or("DATABASE_URL", &mut self.url);
    }

    pub fn validate(&self) -> Result<()> {
        if self.url.trim().is_empty() {
            return Err(anyhow!("database.url is empty; set it in config.toml or DATABASE_URL"));
        }
        let lower = self.url.to_lowercase();
        if !(lower.starts_with("postgresql://") || lower.starts_with("postgres://")) {
            return Err(anyhow!("database.url must start with postgresql:// or postgres://"));
        }
        if self.min_connections == 0 {
            return Err(anyhow!("database.min_connections must be >= 1"));
        }
        if self.max_connections < self.min_connections {
            return Err(anyhow!("database.max_connections must be >= min_connections"));
        }
        if self.connect_timeout_secs == 0 || self.acquire_timeout_secs == 0 {
            return Err(anyhow!("database timeouts must be positive"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn normalize_from_env(&mut self) {
        env_or("JWT_SECRET", &mut self.access_secret);
        env_or("JWT_REFRESH_SECRET", &mut self.refresh_secret);
        if self.refresh_secret.trim().is_empty() && !self.access_secret.trim().is_empty() {
            self.refresh_secret = format!("{}-refresh", self.access_secret);
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.access_secret.trim().is_empty() {
            return Err(anyhow!("auth.access_secret is empty; set it in config.toml or JWT_SECRET"));
        }
        if self.access_ttl_secs == 0 || self.refresh_ttl_secs == 0 {
            return Err(anyhow!("auth token ttl must be positive"));
        }
        Ok(())
    }
}

impl OtpConfig {
    pub fn normalize_from_env(&mut self) {
        env_or("TWILIO_ACCOUNT_SID", &mut self.account_sid);
        env_or("TWILIO_AUTH_TOKEN", &mut self.auth_token);
        env_or("TWILIO_SERVICE_SID", &mut self.service_sid);
    }

    pub fn validate(&self) -> Result<()> {
        require("otp.account_sid", &self.account_sid, "TWILIO_ACCOUNT_SID")?;
        require("otp.auth_token", &self.auth_token, "TWILIO_AUTH_TOKEN")?;
        require("otp.service_sid", &self.service_sid, "TWILIO_SERVICE_SID")?;
        if self.base_url.trim().is_empty() {
            return Err(anyhow!("otp.base_url is empty"));
        }
        Ok(())
    }
}

impl GoogleOAuthConfig {
    pub fn normalize_from_env(&mut self) {
        env_or("GOOGLE_CLIENT_ID", &mut self.client_id);
        env_or("GOOGLE_CLIENT_SECRET", &mut self.client_secret);
        env_or("OAUTH_STATE_STRING", &mut self.state);
        if let Ok(url) = std::env::var("GOOGLE_REDIRECT_URL") {
            self.redirect_url = url;
        }
    }

    /// The state string is the only CSRF guard on the callback, so it must be set.
    pub fn validate(&self) -> Result<()> {
        require("google.client_id", &self.client_id, "GOOGLE_CLIENT_ID")?;
        require("google.client_secret", &self.client_secret, "GOOGLE_CLIENT_SECRET")?;
        require("google.state", &self.state, "OAUTH_STATE_STRING")?;
        for (name, url) in [
            ("google.redirect_url", &self.redirect_url),
            ("google.auth_url", &self.auth_url),
            ("google.token_url", &self.token_url),
            ("google.userinfo_url", &self.userinfo_url),
        ] {
            if url.trim().is_empty() {
                return Err(anyhow!("{name} is empty"));
            }
        }
        Ok(())
    }
}
