//! HTTP utility functions for extracting request information.

use actix_web::HttpRequest;
use std::net::IpAddr;

/// Extract the caller's IP address.
///
/// The first entry of `X-Forwarded-For` wins when it parses as an IP address;
/// otherwise the transport-level peer address is used.
pub fn extract_client_ip(req: &HttpRequest) -> Option<IpAddr> {
    let forwarded = req
        .headers()
        .get("X-Forwarded-For")
        .and_then(|h| h.to_str().ok())
        .and_then(|value| value.split(',').next())
        .and_then(|first| first.trim().parse::<IpAddr>().ok());

    forwarded.or_else(|| req.peer_addr().map(|addr| addr.ip()))
}

/// Extract user agent from request headers
pub fn extract_user_agent(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get("User-Agent")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use std::net::SocketAddr;

    #[test]
    fn test_forwarded_for_first_entry_wins() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "41.66.28.10, 10.0.0.1"))
            .peer_addr("127.0.0.1:4000".parse::<SocketAddr>().unwrap())
            .to_http_request();

        assert_eq!(extract_client_ip(&req), Some("41.66.28.10".parse().unwrap()));
    }

    #[test]
    fn test_falls_back_to_peer_address() {
        let req = TestRequest::default()
            .peer_addr("203.0.113.9:5555".parse::<SocketAddr>().unwrap())
            .to_http_request();

        assert_eq!(extract_client_ip(&req), Some("203.0.113.9".parse().unwrap()));
    }

    #[test]
    fn test_garbage_forwarded_for_uses_peer_address() {
        let req = TestRequest::default()
            .insert_header(("X-Forwarded-For", "not-an-ip"))
            .peer_addr("203.0.113.9:5555".parse::<SocketAddr>().unwrap())
            .to_http_request();

        assert_eq!(extract_client_ip(&req), Some("203.0.113.9".parse().unwrap()));
    }

    #[test]
    fn test_no_address_available() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(extract_client_ip(&req), None);
    }

    #[test]
    fn test_extract_user_agent() {
        let req = TestRequest::default()
            .insert_header(("User-Agent", "MeteoSran/1.0"))
            .to_http_request();
        assert_eq!(extract_user_agent(&req).as_deref(), Some("MeteoSran/1.0"));
    }
}
