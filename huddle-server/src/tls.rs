use crate::config::TlsPaths;
use crate::error::TlsError;
use axum_server::tls_rustls::RustlsConfig;
use rustls::pki_types::{CertificateDer, PrivateKeyDer};
use rustls_pemfile::{Item, certs, read_one};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;
use tracing::info;

fn open(path: &Path) -> Result<BufReader<File>, TlsError> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|source| TlsError::Io {
            path: path.to_path_buf(),
            source,
        })
}

/// Certificate chain from a PEM file, leaf first.
pub fn load_certs(path: &Path) -> Result<Vec<CertificateDer<'static>>, TlsError> {
    let mut reader = open(path)?;

    let chain: Vec<CertificateDer<'static>> = certs(&mut reader)
        .collect::<Result<_, _>>()
        .map_err(|source| TlsError::Pem {
            path: path.to_path_buf(),
            source,
        })?;

    if chain.is_empty() {
        return Err(TlsError::NoCertificates(path.to_path_buf()));
    }
    Ok(chain)
}

/// First PKCS#1, PKCS#8 or SEC1 key in a PEM file.
pub fn load_private_key(path: &Path) -> Result<PrivateKeyDer<'static>, TlsError> {
    let mut reader = open(path)?;

    loop {
        match read_one(&mut reader) {
            Ok(Some(Item::Pkcs1Key(key))) => return Ok(key.into()),
            Ok(Some(Item::Pkcs8Key(key))) => return Ok(key.into()),
            Ok(Some(Item::Sec1Key(key))) => return Ok(key.into()),
            Ok(Some(_)) => {}
            Ok(None) => return Err(TlsError::NoPrivateKey(path.to_path_buf())),
            Err(source) => {
                return Err(TlsError::Pem {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }
}

/// Server-side TLS settings for the HTTPS listener.
///
/// Only HTTP/1.1 is offered so WebSocket upgrades keep working.
pub fn rustls_config(paths: &TlsPaths) -> Result<RustlsConfig, TlsError> {
    let chain = load_certs(&paths.cert)?;
    let key = load_private_key(&paths.key)?;

    let mut config = rustls::ServerConfig::builder()
        .with_no_client_auth()
        .with_single_cert(chain, key)?;
    config.alpn_protocols = vec![b"http/1.1".to_vec()];

    info!("Loaded TLS certificate from {}", paths.cert.display());
    Ok(RustlsConfig::from_config(Arc::new(config)))
}
