//! Fetching cocina documents from the repository service.

mod client;
mod response;

pub use client::DsaClient;
pub use response::ObjectResponse;
