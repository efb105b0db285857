//! CSRF token lookup for requests to the analysis server.

use percent_encoding::percent_decode_str;

use super::platform;

/// Hidden input rendered by the server-side page shell.
pub const CSRF_INPUT_ID: &str = "csrf-token";
pub const CSRF_COOKIE_NAME: &str = "csrftoken";
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Token from the hidden page field, falling back to the `csrftoken` cookie.
pub fn csrf_token() -> Option<String> {
    if let Some(value) = platform::input_value(CSRF_INPUT_ID) {
        return Some(value);
    }
    platform::document_cookies().and_then(|cookies| token_from_cookies(&cookies, CSRF_COOKIE_NAME))
}

/// Find `name=value` in a `document.cookie` string and URL-decode the value.
pub fn token_from_cookies(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .map(str::trim)
        .find_map(|cookie| cookie.strip_prefix(name)?.strip_prefix('='))
        .map(|value| percent_decode_str(value).decode_utf8_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn picks_the_named_cookie() {
        let jar = "sessionid=abc; csrftoken=Tok3n; theme=dark";
        assert_eq!(
            token_from_cookies(jar, CSRF_COOKIE_NAME).as_deref(),
            Some("Tok3n")
        );
    }

    #[test]
    fn prefix_collisions_are_not_matches() {
        let jar = "csrftoken_legacy=old; csrftoken=new";
        assert_eq!(token_from_cookies(jar, "csrftoken").as_deref(), Some("new"));
    }

    #[test]
    fn values_are_url_decoded_without_plus_folding() {
        let jar = "csrftoken=a%2Fb+c";
        assert_eq!(token_from_cookies(jar, "csrftoken").as_deref(), Some("a/b+c"));
    }

    #[test]
    fn padding_and_stray_percents_survive_decoding() {
        let jar = "csrftoken=abc%3D%3D";
        assert_eq!(token_from_cookies(jar, "csrftoken").as_deref(), Some("abc=="));
        let jar = "csrftoken=50%zz";
        assert_eq!(token_from_cookies(jar, "csrftoken").as_deref(), Some("50%zz"));
    }

    #[test]
    fn missing_cookie_is_none() {
        assert_eq!(token_from_cookies("", "csrftoken"), None);
        assert_eq!(token_from_cookies("other=1", "csrftoken"), None);
    }
}
