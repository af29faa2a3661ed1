//! Rate-limit detection

use http::StatusCode;

use mirror_proxy::UpstreamResponse;

/// Body phrases the upstream uses when throttling.
///
/// Purely textual heuristic: if the upstream rewords these messages the
/// detector goes quiet and rate-limited responses pass through as plain
/// 403s. That is an accepted limitation, not something to paper over
/// with looser matching.
const RATE_LIMIT_SIGNATURES: [&str; 2] = ["API rate limit exceeded", "abuse detection mechanism"];

/// Whether a response is the upstream telling us to back off.
pub fn is_rate_limited(response: &UpstreamResponse) -> bool {
    if response.status != StatusCode::FORBIDDEN {
        return false;
    }

    let body = response.body_text();
    RATE_LIMIT_SIGNATURES.iter().any(|sig| body.contains(sig))
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use http::HeaderMap;

    fn response(status: StatusCode, body: &'static str) -> UpstreamResponse {
        UpstreamResponse {
            status,
            headers: HeaderMap::new(),
            body: Bytes::from_static(body.as_bytes()),
        }
    }

    #[test]
    fn test_quota_message_detected() {
        let resp = response(
            StatusCode::FORBIDDEN,
            "{\"message\": \"API rate limit exceeded for 10.0.0.1.\"}",
        );
        assert!(is_rate_limited(&resp));
    }

    #[test]
    fn test_abuse_message_detected() {
        let resp = response(
            StatusCode::FORBIDDEN,
            "{\"message\": \"You have triggered an abuse detection mechanism.\"}",
        );
        assert!(is_rate_limited(&resp));
    }

    #[test]
    fn test_plain_forbidden_is_not_rate_limited() {
        let resp = response(StatusCode::FORBIDDEN, "{\"message\": \"Must have admin rights\"}");
        assert!(!is_rate_limited(&resp));
    }

    #[test]
    fn test_matching_body_with_other_status_is_ignored() {
        let resp = response(
            StatusCode::TOO_MANY_REQUESTS,
            "{\"message\": \"API rate limit exceeded\"}",
        );
        assert!(!is_rate_limited(&resp));
    }
}
