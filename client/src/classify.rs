//! Mapping of transport errors onto outcome classifications

use std::error::Error as StdError;

use stress_bench_core::ErrorKind;

/// Classify a reqwest error
///
/// reqwest keeps resolver and TLS details in the source chain. Its own
/// message carries the request URL and is not inspected.
pub fn classify_reqwest_error(err: &reqwest::Error) -> ErrorKind {
    if err.is_timeout() {
        return ErrorKind::Timeout;
    }

    if let Some(kind) = classify_message(&source_chain_text(err.source())) {
        return kind;
    }

    if err.is_connect() {
        return ErrorKind::Connect;
    }
    if err.is_body() || err.is_decode() {
        return ErrorKind::Body;
    }

    ErrorKind::Other
}

/// Classify by message for the cases reqwest has no predicate for
pub(crate) fn classify_message(chain: &str) -> Option<ErrorKind> {
    if chain.contains("dns error") || chain.contains("failed to lookup address") {
        return Some(ErrorKind::Dns);
    }
    if chain.contains("tls") || chain.contains("certificate") || chain.contains("handshake") {
        return Some(ErrorKind::Tls);
    }
    if chain.contains("timed out") {
        return Some(ErrorKind::Timeout);
    }
    None
}

/// Lower-cased messages of `first` and everything below it
pub(crate) fn source_chain_text(first: Option<&(dyn StdError + 'static)>) -> String {
    let mut parts = Vec::new();
    let mut source = first;
    while let Some(inner) = source {
        parts.push(inner.to_string());
        source = inner.source();
    }
    parts.join(": ").to_ascii_lowercase()
}
