//! Cookie Management Infrastructure
//!
//! Reading the session cookie on the server and re-assembling a `Cookie`
//! header when a server-rendered page calls the API on the user's behalf.

use axum::http::{HeaderMap, HeaderValue, header};

/// Extract a cookie value from headers
///
/// Only the first `Cookie` header is inspected. Returns `None` when the
/// header is missing, is not valid ASCII, or does not carry `name`.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(header::COOKIE)?
        .to_str()
        .ok()?
        .split(';')
        .find_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;

            if key == name {
                Some(value.to_string())
            } else {
                None
            }
        })
}

/// All `name=value` pairs from every `Cookie` header, in order
pub fn cookie_pairs(headers: &HeaderMap) -> Vec<(String, String)> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .flat_map(|v| v.split(';'))
        .filter_map(|cookie| {
            let (key, value) = cookie.trim().split_once('=')?;
            if key.is_empty() {
                return None;
            }
            Some((key.to_string(), value.to_string()))
        })
        .collect()
}

/// Join pairs back into a single `Cookie` header value
///
/// Returns `None` for an empty jar or when a pair contains bytes that are
/// not allowed in a header.
pub fn join_cookie_header<K, V>(pairs: &[(K, V)]) -> Option<HeaderValue>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    if pairs.is_empty() {
        return None;
    }
    let joined = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", k.as_ref(), v.as_ref()))
        .collect::<Vec<_>>()
        .join("; ");
    HeaderValue::from_str(&joined).ok()
}
