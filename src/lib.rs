//! CNPJ Lookup API Library
//!
//! This library provides the core functionality for the CNPJ lookup API:
//! identifier normalization, provider adapters for the public registry
//! sources (CNPJá, CNPJ.ws, ReceitaWS, BrasilAPI, cnpj.biz), the fallback
//! orchestrator, and the HTTP handlers.
//!
//! # Modules
//!
//! - `config`: Configuration management.
//! - `document`: CNPJ normalization, validation, and formatting.
//! - `errors`: Error handling types.
//! - `handlers`: HTTP request handlers.
//! - `lookup`: Fallback orchestration across providers.
//! - `models`: Core data models.
//! - `providers`: Provider adapters (one per external source).

pub mod config;
pub mod document;
pub mod errors;
pub mod handlers;
pub mod lookup;
pub mod models;
pub mod providers;
