use actix_web::HttpRequest;

/// Proxy headers consulted in priority order before falling back to the
/// socket address.
const FORWARD_HEADERS: [&str; 2] = ["x-forwarded-for", "x-real-ip"];

/// Resolves the originating client IP for the submission stamp. Takes the
/// first hop of a forwarded chain, falls back to the peer address, then to
/// "unknown"; IPv4-mapped-IPv6 prefixes are stripped.
pub fn resolve_client_ip(req: &HttpRequest) -> String {
    for name in FORWARD_HEADERS {
        if let Some(value) = req.headers().get(name).and_then(|v| v.to_str().ok()) {
            if let Some(first) = value.split(',').map(str::trim).find(|s| !s.is_empty()) {
                return strip_mapped_prefix(first).to_string();
            }
        }
    }

    req.peer_addr()
        .map(|addr| strip_mapped_prefix(&addr.ip().to_string()).to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

fn strip_mapped_prefix(ip: &str) -> &str {
    ip.strip_prefix("::ffff:").unwrap_or(ip)
}
