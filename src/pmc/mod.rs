//! PMC (PubMed Central) integration: PDF download and on-disk persistence.

pub mod client;
pub mod storage;

pub use client::PmcClient;
pub use storage::PdfStorage;
