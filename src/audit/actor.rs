//! Actor resolution
//!
//! Priority: `user` query parameter → `x-user` header → "anonymous"

use axum::http::HeaderMap;

use super::ANONYMOUS_ACTOR;

const USER_PARAM: &str = "user";
const USER_HEADER: &str = "x-user";

/// Resolve the acting identity from the raw query string and headers.
/// Always returns a non-empty value.
pub fn resolve_actor(query: Option<&str>, headers: &HeaderMap) -> String {
    if let Some(user) = query.and_then(user_param) {
        return user;
    }

    headers
        .get(USER_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.trim().is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| ANONYMOUS_ACTOR.to_string())
}

fn user_param(query: &str) -> Option<String> {
    url::form_urlencoded::parse(query.as_bytes())
        .find(|(key, _)| key == USER_PARAM)
        .map(|(_, value)| value.into_owned())
        .filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with_user(user: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(USER_HEADER, HeaderValue::from_static(user));
        headers
    }

    #[test]
    fn test_query_param_wins_over_header() {
        let headers = headers_with_user("bob");
        assert_eq!(resolve_actor(Some("user=alice"), &headers), "alice");
    }

    #[test]
    fn test_header_when_no_query_param() {
        let headers = headers_with_user("bob");
        assert_eq!(resolve_actor(None, &headers), "bob");
        assert_eq!(resolve_actor(Some("page=2"), &headers), "bob");
    }

    #[test]
    fn test_anonymous_when_no_signal() {
        assert_eq!(resolve_actor(None, &HeaderMap::new()), "anonymous");
    }

    #[test]
    fn test_empty_values_fall_through() {
        let headers = headers_with_user("  ");
        assert_eq!(resolve_actor(Some("user="), &headers), "anonymous");

        let headers = headers_with_user("carol");
        assert_eq!(resolve_actor(Some("user=&x=1"), &headers), "carol");
    }

    #[test]
    fn test_resolved_value_is_stored_as_given() {
        assert_eq!(resolve_actor(Some("user=%20alice"), &HeaderMap::new()), " alice");

        let headers = headers_with_user("bob ");
        assert_eq!(resolve_actor(None, &headers), "bob ");
    }

    #[test]
    fn test_query_param_is_percent_decoded() {
        assert_eq!(
            resolve_actor(Some("user=j%C3%BCrgen+k"), &HeaderMap::new()),
            "jürgen k"
        );
    }
}
