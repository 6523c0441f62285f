//! TLS configuration for HTTPS deployments behind a private CA.
//!
//! When `OPSPILOT_CA_CERT` points at a PEM bundle, the HTTP client trusts
//! only the certificates in that bundle. Without it the client falls back to
//! reqwest's bundled web PKI roots.

use std::path::Path;

use rustls::ClientConfig;

use crate::Result;

/// Builds a [`ClientConfig`] whose root store contains only the CA
/// certificates found in the PEM file at `path`.
///
/// # Errors
///
/// Returns [`OpsPilotError::Tls`](crate::OpsPilotError::Tls) if the file
/// cannot be read, does not parse, or contains no usable certificate.
pub fn build_tls_config(path: &Path) -> Result<ClientConfig> {
    let pem = std::fs::read(path).map_err(|e| {
        crate::OpsPilotError::Tls(format!("failed to read CA file {}: {e}", path.display()))
    })?;

    let certs: Vec<_> = rustls_pemfile::certs(&mut &pem[..])
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| crate::OpsPilotError::Tls(format!("failed to parse CA PEM: {e}")))?;

    let mut root_store = rustls::RootCertStore::empty();
    let (added, _ignored) = root_store.add_parsable_certificates(certs);
    if added == 0 {
        return Err(crate::OpsPilotError::Tls(format!(
            "no CA certificates found in {}",
            path.display()
        )));
    }

    let config = ClientConfig::builder()
        .with_root_certificates(root_store)
        .with_no_client_auth();

    Ok(config)
}
