//! Shared utility functions for link label derivation.

use std::sync::LazyLock;

use percent_encoding::percent_decode_str;
use regex::Regex;

/// URL scheme followed by its colon (RFC 3986 `scheme ":"`).
static SCHEME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*:").unwrap());

/// Last element of a slash-separated path.
///
/// Trailing slashes are ignored. An empty path yields `"."` and a path made
/// only of slashes yields `"/"`.
#[must_use]
pub(crate) fn path_base(path: &str) -> &str {
    if path.is_empty() {
        return ".";
    }
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }
    match trimmed.rfind('/') {
        Some(pos) => &trimmed[pos + 1..],
        None => trimmed,
    }
}

/// Extract the host (with port, if any) from an absolute URL.
///
/// Returns an empty string when the URL has no authority component, e.g.
/// `http:relative` or `httpdocs/page`. Userinfo is dropped and percent
/// escapes in the host are decoded.
///
/// # Errors
///
/// Returns a description of the problem for control characters, characters
/// not allowed in a host, malformed percent escapes, or a non-numeric port.
pub(crate) fn url_host(url: &str) -> Result<String, String> {
    if url.chars().any(char::is_control) {
        return Err("invalid control character in URL".to_owned());
    }

    let Some(scheme) = SCHEME_RE.find(url) else {
        return Ok(String::new());
    };
    let Some(rest) = url[scheme.end()..].strip_prefix("//") else {
        return Ok(String::new());
    };

    let authority = rest
        .find(['/', '?', '#'])
        .map_or(rest, |end| &rest[..end]);
    let host = authority
        .rfind('@')
        .map_or(authority, |at| &authority[at + 1..]);

    if let Some(c) = host.chars().find(|&c| !is_host_char(c)) {
        return Err(format!("invalid character {c:?} in host name"));
    }
    validate_escapes(host)?;
    validate_port(host)?;

    percent_decode_str(host)
        .decode_utf8()
        .map(std::borrow::Cow::into_owned)
        .map_err(|e| format!("invalid host encoding: {e}"))
}

/// Characters permitted in a host, including the port and IPv6 brackets.
fn is_host_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '.'
                | '_'
                | '~'
                | '!'
                | '$'
                | '&'
                | '\''
                | '('
                | ')'
                | '*'
                | '+'
                | ','
                | ';'
                | '='
                | ':'
                | '['
                | ']'
                | '%'
        )
        || !c.is_ascii()
}

fn validate_escapes(host: &str) -> Result<(), String> {
    let bytes = host.as_bytes();
    for (i, _) in host.match_indices('%') {
        let valid = bytes.len() > i + 2
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit();
        if !valid {
            let end = (i + 3).min(host.len());
            let escape = host.get(i..end).unwrap_or(&host[i..]);
            return Err(format!("invalid URL escape {escape:?}"));
        }
    }
    Ok(())
}

fn validate_port(host: &str) -> Result<(), String> {
    // Colons inside IPv6 brackets are not port separators.
    let tail = match host.rfind(']') {
        Some(close) => &host[close + 1..],
        None => host,
    };
    let Some(colon) = tail.rfind(':') else {
        return Ok(());
    };
    let port = &tail[colon + 1..];
    if port.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(format!("invalid port {:?} after host", &tail[colon..]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_base_file() {
        assert_eq!(path_base("docs/guide/intro.pdf"), "intro.pdf");
    }

    #[test]
    fn test_path_base_no_slash() {
        assert_eq!(path_base("file.zip"), "file.zip");
    }

    #[test]
    fn test_path_base_trailing_slash() {
        assert_eq!(path_base("docs/guide/"), "guide");
    }

    #[test]
    fn test_path_base_empty_and_root() {
        assert_eq!(path_base(""), ".");
        assert_eq!(path_base("///"), "/");
    }

    #[test]
    fn test_url_host_basic() {
        assert_eq!(
            url_host("http://www.example.com/page").unwrap(),
            "www.example.com"
        );
    }

    #[test]
    fn test_url_host_keeps_port_drops_userinfo() {
        assert_eq!(
            url_host("https://user:pw@example.com:8080/x?y#z").unwrap(),
            "example.com:8080"
        );
    }

    #[test]
    fn test_url_host_query_ends_authority() {
        assert_eq!(url_host("https://example.com?q=1").unwrap(), "example.com");
    }

    #[test]
    fn test_url_host_ipv6() {
        assert_eq!(url_host("http://[::1]:3000/").unwrap(), "[::1]:3000");
    }

    #[test]
    fn test_url_host_without_authority() {
        assert_eq!(url_host("http:relative/path").unwrap(), "");
        assert_eq!(url_host("httpdocs/page.html").unwrap(), "");
    }

    #[test]
    fn test_url_host_decodes_escapes() {
        assert_eq!(url_host("http://ex%61mple.com/").unwrap(), "example.com");
    }

    #[test]
    fn test_url_host_rejects_space() {
        let err = url_host("http://exa mple.com").unwrap_err();
        assert!(err.contains("invalid character"), "{err}");
    }

    #[test]
    fn test_url_host_rejects_bad_port() {
        let err = url_host("http://example.com:http/").unwrap_err();
        assert!(err.contains("invalid port"), "{err}");
    }

    #[test]
    fn test_url_host_rejects_bad_escape() {
        let err = url_host("http://example%zz.com").unwrap_err();
        assert!(err.contains("invalid URL escape"), "{err}");
    }

    #[test]
    fn test_url_host_rejects_control_characters() {
        assert!(url_host("http://example.com/\u{7f}").is_err());
    }
}
