use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Public registry data for one company, as known by whichever source
/// answered the lookup.
///
/// Every attribute except `success` is a plain string: providers map absent
/// fields to the empty string so consumers never see a null. When `success`
/// is false the record exists purely to communicate failure — `trade_name`
/// carries a human-readable reason and `source` labels what failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyRecord {
    /// Fantasy name (nome fantasia).
    pub trade_name: String,
    /// Legal name (razão social).
    pub legal_name: String,
    /// Phone number(s), comma-separated when the source lists several.
    pub phone: String,
    /// Email address(es).
    pub email: String,
    /// Formatted address, street through CEP.
    pub address: String,
    /// Registration status (situação cadastral).
    pub registration_status: String,
    /// Size classification (porte).
    pub company_size: String,
    /// Legal nature (natureza jurídica).
    pub legal_nature: String,
    /// Principal economic activity, CNAE code and description.
    pub main_activity: String,
    /// Declared capital (capital social).
    pub share_capital: String,
    /// Founding date (data de abertura).
    pub founded: String,
    /// Which provider answered.
    pub source: String,
    pub success: bool,
}

impl CompanyRecord {
    /// Builds the record returned when a lookup cannot produce data.
    pub fn failure(reason: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            trade_name: reason.into(),
            source: source.into(),
            success: false,
            ..Self::default()
        }
    }

    /// Best display name: trade name first, legal name as fallback.
    pub fn display_name(&self) -> &str {
        if !self.trade_name.is_empty() {
            &self.trade_name
        } else {
            &self.legal_name
        }
    }
}

/// The registered data sources, in no particular order.
///
/// The priority order actually used by a deployment lives in
/// `Config::provider_order`; this type only names the sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    /// CNPJá open API (open.cnpja.com).
    Cnpja,
    /// CNPJ.ws public API (publica.cnpj.ws).
    CnpjWs,
    /// ReceitaWS (receitaws.com.br).
    ReceitaWs,
    /// BrasilAPI (brasilapi.com.br).
    BrasilApi,
    /// cnpj.biz HTML directory page (scraped).
    CnpjBiz,
}

impl ProviderKind {
    /// Canonical priority order: authoritative APIs first, scraper last.
    pub fn default_order() -> Vec<ProviderKind> {
        vec![
            ProviderKind::Cnpja,
            ProviderKind::CnpjWs,
            ProviderKind::ReceitaWs,
            ProviderKind::BrasilApi,
            ProviderKind::CnpjBiz,
        ]
    }
}

impl fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProviderKind::Cnpja => "cnpja",
            ProviderKind::CnpjWs => "cnpjws",
            ProviderKind::ReceitaWs => "receitaws",
            ProviderKind::BrasilApi => "brasilapi",
            ProviderKind::CnpjBiz => "cnpjbiz",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ProviderKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cnpja" => Ok(ProviderKind::Cnpja),
            "cnpjws" | "cnpj.ws" => Ok(ProviderKind::CnpjWs),
            "receitaws" => Ok(ProviderKind::ReceitaWs),
            "brasilapi" => Ok(ProviderKind::BrasilApi),
            "cnpjbiz" | "cnpj.biz" => Ok(ProviderKind::CnpjBiz),
            other => Err(format!("unknown provider '{}'", other)),
        }
    }
}
