use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use etag_cache::{decide, Decision, Fingerprinted, CACHE_TTL_SECS};
use serde::Serialize;

/// A JSON body served with its entity tag, or a bare 304
pub struct CachedJson<T>(pub Decision<T>);

impl<T> CachedJson<T> {
    /// Answer a read, honoring the request's `If-None-Match`
    pub fn conditional(headers: &HeaderMap, current: Fingerprinted<T>) -> Self {
        let if_none_match = headers
            .get(header::IF_NONE_MATCH)
            .and_then(|v| v.to_str().ok());
        Self(decide(if_none_match, current))
    }

    /// Always send the body, as after a write
    pub fn fresh(current: Fingerprinted<T>) -> Self {
        Self(Decision::Send(current))
    }
}

impl<T: Serialize> IntoResponse for CachedJson<T> {
    fn into_response(self) -> Response {
        let cache_control = format!("public, max-age={CACHE_TTL_SECS}");
        match self.0 {
            Decision::NotModified { fingerprint } => (
                StatusCode::NOT_MODIFIED,
                [
                    (header::ETAG, fingerprint),
                    (header::CACHE_CONTROL, cache_control),
                ],
            )
                .into_response(),
            Decision::Send(entry) => {
                let (value, fingerprint) = entry.into_parts();
                (
                    StatusCode::OK,
                    [
                        (header::ETAG, fingerprint),
                        (header::CACHE_CONTROL, cache_control),
                    ],
                    Json(value),
                )
                    .into_response()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn entry() -> Fingerprinted<Vec<u32>> {
        Fingerprinted::new(vec![1, 2, 3]).unwrap()
    }

    #[tokio::test]
    async fn test_send_sets_headers_and_body() {
        let current = entry();
        let response = CachedJson::conditional(&HeaderMap::new(), current.clone()).into_response();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::ETAG],
            current.fingerprint()
        );
        assert_eq!(
            response.headers()[header::CACHE_CONTROL],
            "public, max-age=300"
        );
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"[1,2,3]");
    }

    #[tokio::test]
    async fn test_matching_header_is_not_modified() {
        let current = entry();
        let mut headers = HeaderMap::new();
        headers.insert(
            header::IF_NONE_MATCH,
            HeaderValue::from_str(current.fingerprint()).unwrap(),
        );

        let response = CachedJson::conditional(&headers, current).into_response();
        assert_eq!(response.status(), StatusCode::NOT_MODIFIED);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert!(body.is_empty());
    }

    #[test]
    fn test_fresh_ignores_request_headers() {
        let current = entry();
        assert!(matches!(
            CachedJson::fresh(current).0,
            Decision::Send(_)
        ));
    }
}
