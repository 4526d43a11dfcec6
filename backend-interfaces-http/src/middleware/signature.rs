use axum::http::HeaderMap;

pub const SIGNATURE_HEADER: &str = "X-Razorpay-Signature";

/// Raw header value; `None` when absent, empty or not visible ASCII.
pub fn extract_signature(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(SIGNATURE_HEADER)?.to_str().ok()?;
    if value.is_empty() {
        return None;
    }
    Some(value)
}
