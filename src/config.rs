//! Gateway configuration
//!
//! Every session-store call uses one fixed application/user identity
//! pair; visitors are distinguished by session id alone, not by user
//! identity (there is no authentication in front of this gateway).

/// Agent key used when the transport does not select one
pub const DEFAULT_AGENT_KEY: &str = "triage";

/// Configuration for a `ChatGateway`
///
/// ```ignore
/// let config = GatewayConfig::new("support-desk", "visitor")
///     .with_default_agent("triage");
/// ```
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Application name used for every session-store call
    pub app_name: String,

    /// User identity used for every session-store call
    pub user_id: String,

    /// Agent key used when a turn does not select one
    pub default_agent: String,
}

impl GatewayConfig {
    /// Create a configuration with the default agent key
    pub fn new(app_name: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            user_id: user_id.into(),
            default_agent: DEFAULT_AGENT_KEY.to_string(),
        }
    }

    /// Set the default agent key
    pub fn with_default_agent(mut self, key: impl Into<String>) -> Self {
        self.default_agent = key.into();
        self
    }
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self::new("chat-gateway", "visitor")
    }
}
