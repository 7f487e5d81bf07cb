// src/builders/mod.rs

//! Builders for configured issuers.

pub mod issuer_builder;

pub use issuer_builder::SasTokenIssuerBuilder;
