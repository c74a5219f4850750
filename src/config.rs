use crate::models::ProviderKind;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub cnpja_base_url: String,
    pub cnpjws_base_url: String,
    pub receitaws_base_url: String,
    pub brasilapi_base_url: String,
    pub cnpjbiz_base_url: String,
    /// Priority order the orchestrator walks through. Deterministic per
    /// deployment; defaults to authoritative APIs first, scraper last.
    pub provider_order: Vec<ProviderKind>,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            cnpja_base_url: base_url_from_env("CNPJA_BASE_URL", "https://open.cnpja.com")?,
            cnpjws_base_url: base_url_from_env("CNPJWS_BASE_URL", "https://publica.cnpj.ws")?,
            receitaws_base_url: base_url_from_env(
                "RECEITAWS_BASE_URL",
                "https://www.receitaws.com.br",
            )?,
            brasilapi_base_url: base_url_from_env(
                "BRASILAPI_BASE_URL",
                "https://brasilapi.com.br",
            )?,
            cnpjbiz_base_url: base_url_from_env("CNPJBIZ_BASE_URL", "https://cnpj.biz")?,
            provider_order: provider_order_from_env()?,
        };

        // Log successful configuration load
        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Server Port: {}", config.port);
        tracing::debug!(
            "Provider order: {}",
            config
                .provider_order
                .iter()
                .map(|p| p.to_string())
                .collect::<Vec<_>>()
                .join(",")
        );

        Ok(config)
    }
}

fn base_url_from_env(var: &str, default: &str) -> anyhow::Result<String> {
    match std::env::var(var) {
        Err(_) => Ok(default.to_string()),
        Ok(url) => {
            if url.trim().is_empty() {
                anyhow::bail!("{} cannot be empty", var);
            }
            if !url.starts_with("http://") && !url.starts_with("https://") {
                anyhow::bail!("{} must start with http:// or https://", var);
            }
            Ok(url.trim_end_matches('/').to_string())
        }
    }
}

/// Parses `PROVIDER_ORDER` as a comma-separated list of provider names.
///
/// The list must be non-empty and free of duplicates; unknown names are a
/// startup error rather than a silently skipped entry.
fn provider_order_from_env() -> anyhow::Result<Vec<ProviderKind>> {
    let raw = match std::env::var("PROVIDER_ORDER") {
        Err(_) => return Ok(ProviderKind::default_order()),
        Ok(raw) => raw,
    };

    let mut order = Vec::new();
    for token in raw.split(',').filter(|t| !t.trim().is_empty()) {
        let kind: ProviderKind = token
            .parse()
            .map_err(|e| anyhow::anyhow!("PROVIDER_ORDER: {}", e))?;
        if order.contains(&kind) {
            anyhow::bail!("PROVIDER_ORDER lists '{}' more than once", kind);
        }
        order.push(kind);
    }

    if order.is_empty() {
        anyhow::bail!("PROVIDER_ORDER cannot be empty");
    }

    Ok(order)
}
