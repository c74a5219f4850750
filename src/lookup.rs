//! Fallback orchestration across the registered providers.
//!
//! One lookup walks the configured provider order sequentially and stops at
//! the first adapter that produces a usable record. Worst-case latency is
//! the sum of the adapter timeouts; the common case is a single call.

use crate::config::Config;
use crate::document;
use crate::errors::{AppError, ProviderUnavailable};
use crate::models::{CompanyRecord, ProviderKind};
use crate::providers::{
    BrasilApiService, CnpjBizService, CnpjWsService, CnpjaService, ReceitaWsService,
};
use reqwest::Client;
use std::time::Duration;

/// Failure wording shown to users, kept in the product's language.
const INVALID_REASON: &str = "CNPJ inválido: informe 14 dígitos";
const INVALID_SOURCE: &str = "Validação";
const EXHAUSTED_REASON: &str = "CNPJ não encontrado em nenhuma fonte";
const EXHAUSTED_SOURCE: &str = "Todas as APIs falharam";

/// Looks up a CNPJ across all configured providers.
///
/// Holds one `reqwest::Client`; adapters set their own tighter per-request
/// timeouts. Cheap to clone, safe for concurrent lookups.
#[derive(Clone)]
pub struct LookupService {
    config: Config,
    client: Client,
}

impl LookupService {
    pub fn new(config: Config) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| {
                AppError::ExternalApiError(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Resolves a raw, possibly punctuated identifier to a [`CompanyRecord`].
    ///
    /// Never fails: invalid input and provider exhaustion both come back as
    /// failure records with `success == false` and a human-readable reason.
    pub async fn lookup(&self, raw: &str) -> CompanyRecord {
        if !document::is_valid_cnpj(raw) {
            tracing::warn!("Rejected identifier before any network call: {:?}", raw);
            return CompanyRecord::failure(INVALID_REASON, INVALID_SOURCE);
        }

        let cnpj = document::clean_cnpj(raw);
        tracing::info!("Looking up CNPJ {}", document::format_cnpj(&cnpj));

        for kind in &self.config.provider_order {
            match self.fetch_from(*kind, &cnpj).await {
                Ok(record) => {
                    tracing::info!(
                        "✓ {} answered for {} ({})",
                        record.source,
                        cnpj,
                        record.display_name()
                    );
                    return record;
                }
                Err(reason) => {
                    tracing::warn!("Provider {} unavailable for {}: {}", kind, cnpj, reason);
                }
            }
        }

        tracing::error!("All providers exhausted for {}", cnpj);
        CompanyRecord::failure(EXHAUSTED_REASON, EXHAUSTED_SOURCE)
    }

    async fn fetch_from(
        &self,
        kind: ProviderKind,
        cnpj: &str,
    ) -> Result<CompanyRecord, ProviderUnavailable> {
        let client = self.client.clone();
        match kind {
            ProviderKind::Cnpja => CnpjaService::new(&self.config, client).fetch(cnpj).await,
            ProviderKind::CnpjWs => CnpjWsService::new(&self.config, client).fetch(cnpj).await,
            ProviderKind::ReceitaWs => {
                ReceitaWsService::new(&self.config, client).fetch(cnpj).await
            }
            ProviderKind::BrasilApi => {
                BrasilApiService::new(&self.config, client).fetch(cnpj).await
            }
            ProviderKind::CnpjBiz => CnpjBizService::new(&self.config, client).fetch(cnpj).await,
        }
    }
}
