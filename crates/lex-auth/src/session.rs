//! Session token transport: cookie and `Authorization` header handling.
//!
//! Browsers carry the token in an HTTP-only cookie; the CLI sends it as a
//! bearer header. Both are accepted on every authenticated route.

/// Pull a session token out of request headers.
///
/// The named cookie wins; otherwise `Authorization: Bearer <token>`. Blank
/// values are treated as absent.
#[must_use]
pub fn extract_token(
    cookie_header: Option<&str>,
    authorization_header: Option<&str>,
    cookie_name: &str,
) -> Option<String> {
    let from_cookie = cookie_header.and_then(|header| {
        header.split(';').find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name.trim() == cookie_name)
                .then(|| value.trim().trim_matches('"'))
                .filter(|v| !v.is_empty())
        })
    });
    if let Some(token) = from_cookie {
        return Some(token.to_string());
    }

    authorization_header
        .and_then(|header| {
            let (scheme, token) = header.trim().split_once(' ')?;
            scheme.eq_ignore_ascii_case("bearer").then(|| token.trim())
        })
        .filter(|t| !t.is_empty())
        .map(String::from)
}

/// `Set-Cookie` value installing a session token.
#[must_use]
pub fn session_cookie(name: &str, token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie =
        format!("{name}={token}; Max-Age={max_age_secs}; Path=/; HttpOnly; SameSite=Lax");
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// `Set-Cookie` value that removes the session cookie.
#[must_use]
pub fn clear_cookie(name: &str, secure: bool) -> String {
    session_cookie(name, "", 0, secure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::cookie_only(Some("lex_session=abc"), None, Some("abc"))]
    #[case::among_others(Some("theme=dark; lex_session=abc; lang=pt"), None, Some("abc"))]
    #[case::bearer_only(None, Some("Bearer xyz"), Some("xyz"))]
    #[case::bearer_lowercase(None, Some("bearer xyz"), Some("xyz"))]
    #[case::cookie_wins(Some("lex_session=abc"), Some("Bearer xyz"), Some("abc"))]
    #[case::blank_cookie_falls_back(Some("lex_session="), Some("Bearer xyz"), Some("xyz"))]
    #[case::other_cookie(Some("session=abc"), None, None)]
    #[case::basic_auth(None, Some("Basic dXNlcjpwdw=="), None)]
    #[case::blank_bearer(None, Some("Bearer   "), None)]
    #[case::nothing(None, None, None)]
    fn extraction(
        #[case] cookie: Option<&str>,
        #[case] auth: Option<&str>,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(
            extract_token(cookie, auth, "lex_session").as_deref(),
            expected
        );
    }

    #[test]
    fn session_cookie_attributes() {
        let cookie = session_cookie("lex_session", "tok", 3600, false);
        assert_eq!(
            cookie,
            "lex_session=tok; Max-Age=3600; Path=/; HttpOnly; SameSite=Lax"
        );
        assert!(session_cookie("lex_session", "tok", 3600, true).ends_with("; Secure"));
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let cookie = clear_cookie("lex_session", false);
        assert!(cookie.starts_with("lex_session=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
