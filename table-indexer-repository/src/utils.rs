//! Utility functions for the table indexer repository.

use url::Url;

use crate::errors::IndexAdapterError;

/// Build the URL of a search node from a configured host entry.
///
/// Hosts that already carry a scheme (`https://search.internal:9443`) are
/// used as-is. A bare `host:port` gets the scheme prefixed. A bare host gets
/// both the scheme and `port`. The scheme is `https` when `secure` is set.
///
/// # Returns
///
/// * `Ok(Url)` - The parsed node URL
/// * `Err(IndexAdapterError::ConnectionError)` - If the host cannot be parsed
///
/// # Example
///
/// ```
/// use table_indexer_repository::parse_host_url;
///
/// let url = parse_host_url("localhost", 9200, false).expect("valid host");
/// assert_eq!(url.as_str(), "http://localhost:9200/");
/// ```
pub fn parse_host_url(host: &str, port: u16, secure: bool) -> Result<Url, IndexAdapterError> {
    let host = host.trim();
    if host.is_empty() {
        return Err(IndexAdapterError::connection("Host cannot be empty"));
    }

    let scheme = if secure { "https" } else { "http" };
    let candidate = if host.contains("://") {
        host.to_string()
    } else if host.contains(':') {
        format!("{}://{}", scheme, host)
    } else {
        format!("{}://{}:{}", scheme, host, port)
    };

    Url::parse(&candidate)
        .map_err(|e| IndexAdapterError::connection(format!("Invalid host '{}': {}", host, e)))
}

/// Validate an index name before any request is made.
pub fn validate_index_name(name: &str) -> Result<(), IndexAdapterError> {
    if name.trim().is_empty() {
        return Err(IndexAdapterError::validation("Index name cannot be empty"));
    }
    Ok(())
}
