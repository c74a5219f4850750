//! Provider adapters for the public CNPJ data sources.
//!
//! Each adapter issues one outbound GET to its source, maps the source's
//! native payload into a [`CompanyRecord`], and absorbs every transport or
//! payload problem into [`ProviderUnavailable`]. Adapters hold no state
//! beyond a shared HTTP client and the configured base URL, so one instance
//! per lookup is fine.

use crate::config::Config;
use crate::document;
use crate::errors::ProviderUnavailable;
use crate::models::CompanyRecord;
use reqwest::{header, Client, StatusCode};
use scraper::{Html, Selector};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

/// Sent to every provider; CNPJá and cnpj.biz block default library agents.
const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

const CNPJA_TIMEOUT: Duration = Duration::from_secs(15);
const CNPJWS_TIMEOUT: Duration = Duration::from_secs(15);
const RECEITAWS_TIMEOUT: Duration = Duration::from_secs(10);
const BRASILAPI_TIMEOUT: Duration = Duration::from_secs(10);
const CNPJBIZ_TIMEOUT: Duration = Duration::from_secs(10);

/// Turns a 200/429/other status triage into the shared adapter contract.
fn check_status(status: StatusCode) -> Result<(), ProviderUnavailable> {
    match status {
        StatusCode::OK => Ok(()),
        StatusCode::TOO_MANY_REQUESTS => Err(ProviderUnavailable::RateLimited),
        other => Err(ProviderUnavailable::Status(other.as_u16())),
    }
}

/// Joins non-empty address components with ", ".
fn join_parts(parts: Vec<String>) -> String {
    parts
        .into_iter()
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Renders a numeric capital in Brazilian currency form: `R$ 1.234.567,89`.
fn format_capital_brl(value: f64) -> String {
    let formatted = format!("{:.2}", value);
    let (whole, cents) = match formatted.split_once('.') {
        Some(parts) => parts,
        None => (formatted.as_str(), "00"),
    };

    let mut grouped = String::new();
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(c);
    }

    format!("R$ {},{}", grouped, cents)
}

/// Capital fields arrive as numbers from some sources and strings from
/// others; render numerics in BRL form and keep unparseable strings as-is.
fn capital_from_value(value: &Value) -> String {
    match value {
        Value::Number(n) => n.as_f64().map(format_capital_brl).unwrap_or_default(),
        Value::String(s) => s
            .parse::<f64>()
            .map(format_capital_brl)
            .unwrap_or_else(|_| s.clone()),
        _ => String::new(),
    }
}

// ============ CNPJá API Pública ============

#[derive(Debug, Deserialize)]
struct CnpjaOffice {
    alias: Option<String>,
    name: Option<String>,
    founded: Option<String>,
    address: Option<CnpjaAddress>,
    status: Option<CnpjaStatus>,
    #[serde(rename = "mainActivity")]
    main_activity: Option<CnpjaActivity>,
    size: Option<CnpjaSize>,
    #[serde(default)]
    registrations: Vec<CnpjaRegistration>,
    #[serde(default)]
    phones: Vec<CnpjaPhone>,
    #[serde(default)]
    emails: Vec<CnpjaEmail>,
}

#[derive(Debug, Deserialize)]
struct CnpjaAddress {
    street: Option<String>,
    number: Option<String>,
    district: Option<String>,
    city: Option<String>,
    state: Option<String>,
    zip: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CnpjaStatus {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CnpjaActivity {
    id: Option<i64>,
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CnpjaSize {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CnpjaRegistration {
    equity: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct CnpjaPhone {
    #[serde(default)]
    area: String,
    #[serde(default)]
    number: String,
}

#[derive(Debug, Deserialize)]
struct CnpjaEmail {
    #[serde(default)]
    address: String,
}

/// CNPJá open API (5 lookups/minute, no registration).
pub struct CnpjaService {
    client: Client,
    base_url: String,
}

impl CnpjaService {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client,
            base_url: config.cnpja_base_url.clone(),
        }
    }

    pub async fn fetch(&self, cnpj: &str) -> Result<CompanyRecord, ProviderUnavailable> {
        let url = format!("{}/office/{}", self.base_url, cnpj);
        tracing::debug!("CNPJá: GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, BROWSER_USER_AGENT)
            .header(header::ACCEPT, "application/json")
            .timeout(CNPJA_TIMEOUT)
            .send()
            .await
            .map_err(ProviderUnavailable::from_transport)?;

        check_status(response.status())?;

        let office: CnpjaOffice = response
            .json()
            .await
            .map_err(|e| ProviderUnavailable::MalformedPayload(e.to_string()))?;

        map_cnpja_office(office)
    }
}

fn map_cnpja_office(office: CnpjaOffice) -> Result<CompanyRecord, ProviderUnavailable> {
    let alias = office.alias.unwrap_or_default();
    let name = office.name.unwrap_or_default();
    if alias.trim().is_empty() && name.trim().is_empty() {
        return Err(ProviderUnavailable::InsufficientData);
    }

    let trade_name = if alias.trim().is_empty() {
        name.clone()
    } else {
        alias
    };

    let address = office
        .address
        .map(|addr| {
            let mut parts = vec![
                addr.street.unwrap_or_default(),
                addr.number.unwrap_or_default(),
                addr.district.unwrap_or_default(),
                addr.city.unwrap_or_default(),
                addr.state.unwrap_or_default(),
            ];
            if let Some(zip) = addr.zip.filter(|z| !z.is_empty()) {
                parts.push(format!("CEP: {}", zip));
            }
            join_parts(parts)
        })
        .unwrap_or_default();

    let registration_status = office
        .status
        .and_then(|s| s.text)
        .map(|text| {
            if text == "ATIVA" {
                "Ativa".to_string()
            } else {
                text
            }
        })
        .unwrap_or_default();

    let main_activity = office
        .main_activity
        .map(|activity| match (activity.id, activity.text) {
            (Some(id), Some(text)) => format!("{} - {}", id, text),
            (None, Some(text)) => text,
            (Some(id), None) => id.to_string(),
            (None, None) => String::new(),
        })
        .unwrap_or_default();

    let share_capital = office
        .registrations
        .first()
        .and_then(|r| r.equity)
        .map(format_capital_brl)
        .unwrap_or_default();

    let phone = join_parts(
        office
            .phones
            .iter()
            .map(|p| format!("{}{}", p.area, p.number))
            .collect(),
    );

    let email = join_parts(office.emails.into_iter().map(|e| e.address).collect());

    Ok(CompanyRecord {
        trade_name,
        legal_name: name,
        phone,
        email,
        address,
        registration_status,
        company_size: office.size.and_then(|s| s.text).unwrap_or_default(),
        legal_nature: String::new(),
        main_activity,
        share_capital,
        founded: office.founded.unwrap_or_default(),
        source: "CNPJá API Pública".to_string(),
        success: true,
    })
}

// ============ CNPJ.ws API Pública ============

#[derive(Debug, Deserialize)]
struct CnpjWsCompany {
    razao_social: Option<String>,
    capital_social: Option<Value>,
    porte: Option<CnpjWsPorte>,
    natureza_juridica: Option<CnpjWsNatureza>,
    estabelecimento: Option<CnpjWsEstabelecimento>,
}

#[derive(Debug, Deserialize)]
struct CnpjWsPorte {
    descricao: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CnpjWsNatureza {
    descricao: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CnpjWsEstabelecimento {
    nome_fantasia: Option<String>,
    ddd1: Option<String>,
    telefone1: Option<String>,
    correio_eletronico: Option<String>,
    situacao_cadastral: Option<String>,
    data_inicio_atividade: Option<String>,
    atividade_principal: Option<CnpjWsAtividade>,
    logradouro: Option<String>,
    numero: Option<String>,
    bairro: Option<String>,
    cep: Option<String>,
    cidade: Option<CnpjWsCidade>,
    estado: Option<CnpjWsEstado>,
}

#[derive(Debug, Deserialize)]
struct CnpjWsAtividade {
    subclasse: Option<String>,
    descricao: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CnpjWsCidade {
    nome: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CnpjWsEstado {
    sigla: Option<String>,
}

/// CNPJ.ws public API (3 lookups/minute).
pub struct CnpjWsService {
    client: Client,
    base_url: String,
}

impl CnpjWsService {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client,
            base_url: config.cnpjws_base_url.clone(),
        }
    }

    pub async fn fetch(&self, cnpj: &str) -> Result<CompanyRecord, ProviderUnavailable> {
        let url = format!("{}/cnpj/{}", self.base_url, cnpj);
        tracing::debug!("CNPJ.ws: GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, BROWSER_USER_AGENT)
            .header(header::ACCEPT, "application/json")
            .timeout(CNPJWS_TIMEOUT)
            .send()
            .await
            .map_err(ProviderUnavailable::from_transport)?;

        check_status(response.status())?;

        let company: CnpjWsCompany = response
            .json()
            .await
            .map_err(|e| ProviderUnavailable::MalformedPayload(e.to_string()))?;

        map_cnpjws_company(company)
    }
}

fn map_cnpjws_company(company: CnpjWsCompany) -> Result<CompanyRecord, ProviderUnavailable> {
    let legal_name = company.razao_social.unwrap_or_default();
    let est = company.estabelecimento;

    let trade_name = est
        .as_ref()
        .and_then(|e| e.nome_fantasia.clone())
        .filter(|n| !n.trim().is_empty())
        .unwrap_or_else(|| legal_name.clone());

    if trade_name.trim().is_empty() && legal_name.trim().is_empty() {
        return Err(ProviderUnavailable::InsufficientData);
    }

    let (phone, email, address, registration_status, main_activity, founded) = est
        .map(|e| {
            let phone = format!(
                "{}{}",
                e.ddd1.unwrap_or_default(),
                e.telefone1.unwrap_or_default()
            );
            let email = e.correio_eletronico.unwrap_or_default();

            let mut parts = vec![
                e.logradouro.unwrap_or_default(),
                e.numero.unwrap_or_default(),
                e.bairro.unwrap_or_default(),
                e.cidade.and_then(|c| c.nome).unwrap_or_default(),
                e.estado.and_then(|s| s.sigla).unwrap_or_default(),
            ];
            if let Some(cep) = e.cep.filter(|c| !c.is_empty()) {
                parts.push(format!("CEP: {}", cep));
            }

            let main_activity = e
                .atividade_principal
                .map(|a| match (a.subclasse, a.descricao) {
                    (Some(code), Some(text)) => format!("{} - {}", code, text),
                    (Some(code), None) => code,
                    (None, Some(text)) => text,
                    (None, None) => String::new(),
                })
                .unwrap_or_default();

            (
                phone,
                email,
                join_parts(parts),
                e.situacao_cadastral.unwrap_or_default(),
                main_activity,
                e.data_inicio_atividade.unwrap_or_default(),
            )
        })
        .unwrap_or_default();

    Ok(CompanyRecord {
        trade_name,
        legal_name,
        phone,
        email,
        address,
        registration_status,
        company_size: company.porte.and_then(|p| p.descricao).unwrap_or_default(),
        legal_nature: company
            .natureza_juridica
            .and_then(|n| n.descricao)
            .unwrap_or_default(),
        main_activity,
        share_capital: company
            .capital_social
            .map(|v| capital_from_value(&v))
            .unwrap_or_default(),
        founded,
        source: "CNPJ.ws API Pública".to_string(),
        success: true,
    })
}

// ============ ReceitaWS ============

#[derive(Debug, Deserialize)]
struct ReceitaWsCompany {
    status: Option<String>,
    fantasia: Option<String>,
    nome: Option<String>,
    telefone: Option<String>,
    email: Option<String>,
    logradouro: Option<String>,
    numero: Option<String>,
    bairro: Option<String>,
    municipio: Option<String>,
    uf: Option<String>,
    cep: Option<String>,
    situacao: Option<String>,
    abertura: Option<String>,
    porte: Option<String>,
    natureza_juridica: Option<String>,
    capital_social: Option<Value>,
    #[serde(default)]
    atividade_principal: Vec<ReceitaWsAtividade>,
}

#[derive(Debug, Deserialize)]
struct ReceitaWsAtividade {
    code: Option<String>,
    text: Option<String>,
}

/// ReceitaWS (60 lookups/minute).
pub struct ReceitaWsService {
    client: Client,
    base_url: String,
}

impl ReceitaWsService {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client,
            base_url: config.receitaws_base_url.clone(),
        }
    }

    pub async fn fetch(&self, cnpj: &str) -> Result<CompanyRecord, ProviderUnavailable> {
        let url = format!("{}/v1/cnpj/{}", self.base_url, cnpj);
        tracing::debug!("ReceitaWS: GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(RECEITAWS_TIMEOUT)
            .send()
            .await
            .map_err(ProviderUnavailable::from_transport)?;

        check_status(response.status())?;

        let company: ReceitaWsCompany = response
            .json()
            .await
            .map_err(|e| ProviderUnavailable::MalformedPayload(e.to_string()))?;

        map_receitaws_company(company)
    }
}

fn map_receitaws_company(company: ReceitaWsCompany) -> Result<CompanyRecord, ProviderUnavailable> {
    // ReceitaWS answers 200 with {"status": "ERROR"} for unknown documents.
    if company.status.as_deref() != Some("OK") {
        return Err(ProviderUnavailable::InsufficientData);
    }

    let fantasia = company.fantasia.unwrap_or_default();
    let nome = company.nome.unwrap_or_default();
    if fantasia.trim().is_empty() && nome.trim().is_empty() {
        return Err(ProviderUnavailable::InsufficientData);
    }

    let trade_name = if fantasia.trim().is_empty() {
        nome.clone()
    } else {
        fantasia
    };

    let mut parts = vec![
        company.logradouro.unwrap_or_default(),
        company.numero.unwrap_or_default(),
        company.bairro.unwrap_or_default(),
        company.municipio.unwrap_or_default(),
        company.uf.unwrap_or_default(),
    ];
    if let Some(cep) = company.cep.filter(|c| !c.is_empty()) {
        parts.push(format!("CEP: {}", cep));
    }

    let main_activity = company
        .atividade_principal
        .into_iter()
        .next()
        .map(|a| match (a.code, a.text) {
            (Some(code), Some(text)) => format!("{} - {}", code, text),
            (Some(code), None) => code,
            (None, Some(text)) => text,
            (None, None) => String::new(),
        })
        .unwrap_or_default();

    Ok(CompanyRecord {
        trade_name,
        legal_name: nome,
        phone: company.telefone.unwrap_or_default(),
        email: company.email.unwrap_or_default(),
        address: join_parts(parts),
        registration_status: company.situacao.unwrap_or_default(),
        company_size: company.porte.unwrap_or_default(),
        legal_nature: company.natureza_juridica.unwrap_or_default(),
        main_activity,
        share_capital: company
            .capital_social
            .map(|v| capital_from_value(&v))
            .unwrap_or_default(),
        founded: company.abertura.unwrap_or_default(),
        source: "ReceitaWS".to_string(),
        success: true,
    })
}

// ============ BrasilAPI ============

#[derive(Debug, Deserialize)]
struct BrasilApiCompany {
    nome_fantasia: Option<String>,
    razao_social: Option<String>,
    ddd_telefone_1: Option<String>,
    email: Option<String>,
    logradouro: Option<String>,
    numero: Option<String>,
    bairro: Option<String>,
    municipio: Option<String>,
    uf: Option<String>,
    cep: Option<String>,
    descricao_situacao_cadastral: Option<String>,
    cnae_fiscal: Option<i64>,
    cnae_fiscal_descricao: Option<String>,
    porte: Option<String>,
    natureza_juridica: Option<String>,
    capital_social: Option<f64>,
    data_inicio_atividade: Option<String>,
}

/// BrasilAPI (no published rate limit).
pub struct BrasilApiService {
    client: Client,
    base_url: String,
}

impl BrasilApiService {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client,
            base_url: config.brasilapi_base_url.clone(),
        }
    }

    pub async fn fetch(&self, cnpj: &str) -> Result<CompanyRecord, ProviderUnavailable> {
        let url = format!("{}/api/cnpj/v1/{}", self.base_url, cnpj);
        tracing::debug!("BrasilAPI: GET {}", url);

        let response = self
            .client
            .get(&url)
            .timeout(BRASILAPI_TIMEOUT)
            .send()
            .await
            .map_err(ProviderUnavailable::from_transport)?;

        check_status(response.status())?;

        let company: BrasilApiCompany = response
            .json()
            .await
            .map_err(|e| ProviderUnavailable::MalformedPayload(e.to_string()))?;

        map_brasilapi_company(company)
    }
}

fn map_brasilapi_company(company: BrasilApiCompany) -> Result<CompanyRecord, ProviderUnavailable> {
    let fantasia = company.nome_fantasia.unwrap_or_default();
    let razao = company.razao_social.unwrap_or_default();
    if fantasia.trim().is_empty() && razao.trim().is_empty() {
        return Err(ProviderUnavailable::InsufficientData);
    }

    let trade_name = if fantasia.trim().is_empty() {
        razao.clone()
    } else {
        fantasia
    };

    let mut parts = vec![
        company.logradouro.unwrap_or_default(),
        company.numero.unwrap_or_default(),
        company.bairro.unwrap_or_default(),
        company.municipio.unwrap_or_default(),
        company.uf.unwrap_or_default(),
    ];
    if let Some(cep) = company.cep.filter(|c| !c.is_empty()) {
        parts.push(format!("CEP: {}", cep));
    }

    let main_activity = match (company.cnae_fiscal, company.cnae_fiscal_descricao) {
        (Some(code), Some(text)) => format!("{} - {}", code, text),
        (Some(code), None) => code.to_string(),
        (None, Some(text)) => text,
        (None, None) => String::new(),
    };

    Ok(CompanyRecord {
        trade_name,
        legal_name: razao,
        phone: company.ddd_telefone_1.unwrap_or_default(),
        email: company.email.unwrap_or_default(),
        address: join_parts(parts),
        registration_status: company.descricao_situacao_cadastral.unwrap_or_default(),
        company_size: company.porte.unwrap_or_default(),
        legal_nature: company.natureza_juridica.unwrap_or_default(),
        main_activity,
        share_capital: company
            .capital_social
            .map(format_capital_brl)
            .unwrap_or_default(),
        founded: company.data_inicio_atividade.unwrap_or_default(),
        source: "BrasilAPI".to_string(),
        success: true,
    })
}

// ============ cnpj.biz (scraped fallback) ============

/// Contact details scraped from a cnpj.biz company page.
#[derive(Debug, Default, PartialEq, Eq)]
struct PageContacts {
    name: String,
    phone: String,
    email: String,
}

/// cnpj.biz directory page, scraped rather than queried.
///
/// The page links the company phone as a `tel:` anchor and the email as a
/// `mailto:` anchor, with the display name in the first heading.
pub struct CnpjBizService {
    client: Client,
    base_url: String,
}

impl CnpjBizService {
    pub fn new(config: &Config, client: Client) -> Self {
        Self {
            client,
            base_url: config.cnpjbiz_base_url.clone(),
        }
    }

    pub async fn fetch(&self, cnpj: &str) -> Result<CompanyRecord, ProviderUnavailable> {
        let url = format!("{}/{}", self.base_url, cnpj);
        tracing::debug!("cnpj.biz: GET {}", url);

        let response = self
            .client
            .get(&url)
            .header(header::USER_AGENT, BROWSER_USER_AGENT)
            .timeout(CNPJBIZ_TIMEOUT)
            .send()
            .await
            .map_err(ProviderUnavailable::from_transport)?;

        check_status(response.status())?;

        let body = response
            .text()
            .await
            .map_err(|e| ProviderUnavailable::MalformedPayload(e.to_string()))?;

        let contacts = parse_company_page(&body);
        if contacts.name.is_empty() && contacts.phone.is_empty() && contacts.email.is_empty() {
            return Err(ProviderUnavailable::InsufficientData);
        }

        let phone = if contacts.phone.is_empty() {
            String::new()
        } else {
            document::normalize_br_phone(&contacts.phone).unwrap_or(contacts.phone)
        };

        Ok(CompanyRecord {
            trade_name: contacts.name,
            phone,
            email: contacts.email,
            source: "cnpj.biz".to_string(),
            success: true,
            ..CompanyRecord::default()
        })
    }
}

fn parse_company_page(html: &str) -> PageContacts {
    let document = Html::parse_document(html);
    let tel_selector = Selector::parse(r#"a[href^="tel:"]"#).unwrap();
    let mailto_selector = Selector::parse(r#"a[href^="mailto:"]"#).unwrap();
    let heading_selector = Selector::parse("h1").unwrap();

    let phone = document
        .select(&tel_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| href.trim_start_matches("tel:").trim().to_string())
        .unwrap_or_default();

    let email = document
        .select(&mailto_selector)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(|href| href.trim_start_matches("mailto:").trim().to_string())
        .unwrap_or_default();

    let name = document
        .select(&heading_selector)
        .next()
        .map(|h| h.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    PageContacts { name, phone, email }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_capital_brl() {
        assert_eq!(format_capital_brl(0.0), "R$ 0,00");
        assert_eq!(format_capital_brl(1000.0), "R$ 1.000,00");
        assert_eq!(format_capital_brl(1234567.89), "R$ 1.234.567,89");
        assert_eq!(format_capital_brl(50.5), "R$ 50,50");
    }

    #[test]
    fn test_capital_from_value_handles_both_shapes() {
        assert_eq!(capital_from_value(&json!(1000.0)), "R$ 1.000,00");
        assert_eq!(capital_from_value(&json!("65000000.00")), "R$ 65.000.000,00");
        assert_eq!(capital_from_value(&json!("n/a")), "n/a");
        assert_eq!(capital_from_value(&json!(null)), "");
    }

    #[test]
    fn test_join_parts_skips_empty_components() {
        let joined = join_parts(vec![
            "Rua Voluntários da Franca".to_string(),
            "1465".to_string(),
            String::new(),
            "Franca".to_string(),
            "SP".to_string(),
        ]);
        assert_eq!(joined, "Rua Voluntários da Franca, 1465, Franca, SP");
        assert_eq!(join_parts(vec![]), "");
    }

    #[test]
    fn test_map_cnpja_office_full_payload() {
        let office: CnpjaOffice = serde_json::from_value(json!({
            "alias": "MAGAZINE LUIZA",
            "name": "MAGAZINE LUIZA S/A",
            "founded": "1992-03-10",
            "address": {
                "street": "Rua Voluntarios da Franca",
                "number": "1465",
                "district": "Centro",
                "city": "Franca",
                "state": "SP",
                "zip": "14400490"
            },
            "status": {"text": "ATIVA"},
            "mainActivity": {"id": 4713004, "text": "Lojas de departamentos"},
            "size": {"text": "Demais"},
            "registrations": [{"equity": 12500000.0}],
            "phones": [{"area": "11", "number": "35041155"}],
            "emails": [{"address": "ri@magazineluiza.com.br"}]
        }))
        .unwrap();

        let record = map_cnpja_office(office).unwrap();
        assert!(record.success);
        assert_eq!(record.trade_name, "MAGAZINE LUIZA");
        assert_eq!(record.legal_name, "MAGAZINE LUIZA S/A");
        assert_eq!(record.registration_status, "Ativa");
        assert_eq!(record.main_activity, "4713004 - Lojas de departamentos");
        assert_eq!(record.share_capital, "R$ 12.500.000,00");
        assert_eq!(record.phone, "1135041155");
        assert_eq!(record.email, "ri@magazineluiza.com.br");
        assert!(record.address.ends_with("CEP: 14400490"));
        assert_eq!(record.source, "CNPJá API Pública");
    }

    #[test]
    fn test_map_cnpja_office_without_name_is_unavailable() {
        let office: CnpjaOffice = serde_json::from_value(json!({})).unwrap();
        assert_eq!(
            map_cnpja_office(office).unwrap_err(),
            ProviderUnavailable::InsufficientData
        );
    }

    #[test]
    fn test_map_cnpjws_reads_establishment_fields() {
        let company: CnpjWsCompany = serde_json::from_value(json!({
            "razao_social": "MAGAZINE LUIZA S/A",
            "capital_social": "12500000.00",
            "porte": {"descricao": "Demais"},
            "natureza_juridica": {"descricao": "Sociedade Anônima Aberta"},
            "estabelecimento": {
                "nome_fantasia": "MAGAZINE LUIZA",
                "ddd1": "11",
                "telefone1": "35041155",
                "correio_eletronico": "ri@magazineluiza.com.br",
                "situacao_cadastral": "Ativa",
                "data_inicio_atividade": "1992-03-10",
                "atividade_principal": {
                    "subclasse": "4713004",
                    "descricao": "Lojas de departamentos"
                },
                "logradouro": "Rua Voluntarios da Franca",
                "numero": "1465",
                "bairro": "Centro",
                "cep": "14400490",
                "cidade": {"nome": "Franca"},
                "estado": {"sigla": "SP"}
            }
        }))
        .unwrap();

        let record = map_cnpjws_company(company).unwrap();
        assert_eq!(record.trade_name, "MAGAZINE LUIZA");
        assert_eq!(record.phone, "1135041155");
        assert_eq!(record.legal_nature, "Sociedade Anônima Aberta");
        assert_eq!(record.share_capital, "R$ 12.500.000,00");
        assert!(record.address.contains("Franca, SP"));
        assert_eq!(record.source, "CNPJ.ws API Pública");
    }

    #[test]
    fn test_map_receitaws_rejects_status_error() {
        let company: ReceitaWsCompany = serde_json::from_value(json!({
            "status": "ERROR",
            "message": "CNPJ inválido"
        }))
        .unwrap();
        assert_eq!(
            map_receitaws_company(company).unwrap_err(),
            ProviderUnavailable::InsufficientData
        );
    }

    #[test]
    fn test_map_receitaws_ok_payload() {
        let company: ReceitaWsCompany = serde_json::from_value(json!({
            "status": "OK",
            "fantasia": "MAGAZINE LUIZA",
            "nome": "MAGAZINE LUIZA S/A",
            "telefone": "(11) 3504-1155",
            "email": "ri@magazineluiza.com.br",
            "logradouro": "Rua Voluntarios da Franca",
            "numero": "1465",
            "bairro": "Centro",
            "municipio": "Franca",
            "uf": "SP",
            "cep": "14.400-490",
            "situacao": "ATIVA",
            "abertura": "10/03/1992",
            "porte": "DEMAIS",
            "natureza_juridica": "205-4 - Sociedade Anônima Aberta",
            "capital_social": "12500000.00",
            "atividade_principal": [
                {"code": "47.13-0-04", "text": "Lojas de departamentos"}
            ]
        }))
        .unwrap();

        let record = map_receitaws_company(company).unwrap();
        assert_eq!(record.trade_name, "MAGAZINE LUIZA");
        assert_eq!(
            record.main_activity,
            "47.13-0-04 - Lojas de departamentos"
        );
        assert_eq!(record.company_size, "DEMAIS");
        assert_eq!(record.source, "ReceitaWS");
    }

    #[test]
    fn test_map_brasilapi_payload() {
        let company: BrasilApiCompany = serde_json::from_value(json!({
            "nome_fantasia": "",
            "razao_social": "MAGAZINE LUIZA S/A",
            "ddd_telefone_1": "1635121155",
            "email": null,
            "logradouro": "Rua Voluntarios da Franca",
            "numero": "1465",
            "bairro": "Centro",
            "municipio": "Franca",
            "uf": "SP",
            "cep": "14400490",
            "descricao_situacao_cadastral": "ATIVA",
            "cnae_fiscal": 4713004,
            "cnae_fiscal_descricao": "Lojas de departamentos",
            "porte": "DEMAIS",
            "natureza_juridica": "Sociedade Anônima Aberta",
            "capital_social": 12500000.0,
            "data_inicio_atividade": "1992-03-10"
        }))
        .unwrap();

        let record = map_brasilapi_company(company).unwrap();
        // Empty fantasy name falls back to the legal name
        assert_eq!(record.trade_name, "MAGAZINE LUIZA S/A");
        assert_eq!(record.email, "");
        assert_eq!(record.main_activity, "4713004 - Lojas de departamentos");
        assert_eq!(record.share_capital, "R$ 12.500.000,00");
        assert_eq!(record.source, "BrasilAPI");
    }

    #[test]
    fn test_parse_company_page_extracts_contacts() {
        let html = r#"
            <html><body>
                <h1>MAGAZINE LUIZA S/A</h1>
                <p><a href="tel:+551135041155">Telefone</a></p>
                <p><a href="mailto:ri@magazineluiza.com.br">Email</a></p>
            </body></html>
        "#;
        let contacts = parse_company_page(html);
        assert_eq!(contacts.name, "MAGAZINE LUIZA S/A");
        assert_eq!(contacts.phone, "+551135041155");
        assert_eq!(contacts.email, "ri@magazineluiza.com.br");
    }

    #[test]
    fn test_parse_company_page_missing_elements_yield_empty_fields() {
        let html = "<html><body><h1>EMPRESA XYZ</h1></body></html>";
        let contacts = parse_company_page(html);
        assert_eq!(contacts.name, "EMPRESA XYZ");
        assert!(contacts.phone.is_empty());
        assert!(contacts.email.is_empty());

        let empty = parse_company_page("<html><body><p>nada aqui</p></body></html>");
        assert_eq!(empty, PageContacts::default());
    }
}
