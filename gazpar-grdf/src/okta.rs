//! State-token extraction from the portal entry page.
//!
//! The entry page bootstraps its Okta widget from a server-rendered
//! `var oktaData = {...};` assignment inside a script block. The object
//! literal is not valid JSON (it embeds functions and `\xHH` escapes), so
//! the token is scraped with regexes rather than parsed. The output is an
//! opaque string consumed once as the first state handle of the handshake.

use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

use crate::error::ExtractionError;

// ============================================================================
// Regex Patterns
// ============================================================================

/// Script blocks, body captured.
static SCRIPT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<script[^>]*>(.*?)</script>").expect("Invalid regex")
});

/// The oktaData object-literal assignment.
static OKTA_DATA_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)var\s+oktaData\s*=\s*(\{.*?\});").expect("Invalid regex")
});

/// The stateToken field inside the decoded literal.
static STATE_TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#""stateToken"\s*:\s*"([^"]+)""#).expect("Invalid regex")
});

/// JavaScript `\xHH` and `\uHHHH` escapes.
static JS_ESCAPE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\\x([0-9a-fA-F]{2})|\\u([0-9a-fA-F]{4})").expect("Invalid regex")
});

// ============================================================================
// Extraction
// ============================================================================

/// Extracts the Okta state token from the entry page markup.
///
/// Pure function of the input text; no side effects.
///
/// # Errors
///
/// Returns a distinct [`ExtractionError`] case when the script block is
/// absent, the `oktaData` assignment cannot be located, or the decoded
/// literal carries no non-empty `stateToken` field.
pub fn extract_state_token(html: &str) -> Result<String, ExtractionError> {
    let script = SCRIPT_RE
        .captures_iter(html)
        .map(|c| c.get(1).map_or("", |m| m.as_str()))
        .find(|body| body.contains("oktaData"))
        .ok_or(ExtractionError::ScriptBlockNotFound)?;

    let literal = OKTA_DATA_RE
        .captures(script)
        .and_then(|c| c.get(1))
        .ok_or(ExtractionError::OktaDataNotFound)?
        .as_str();

    let decoded = decode_js_escapes(literal);

    let token = STATE_TOKEN_RE
        .captures(&decoded)
        .and_then(|c| c.get(1))
        .ok_or(ExtractionError::StateTokenMissing)?
        .as_str()
        .to_owned();

    debug!(len = token.len(), "Extracted state token from entry page");
    Ok(token)
}

/// Decodes `\xHH` and `\uHHHH` escape sequences in script text.
///
/// Sequences that do not map to a valid character are left untouched.
fn decode_js_escapes(text: &str) -> String {
    JS_ESCAPE_RE
        .replace_all(text, |caps: &Captures<'_>| {
            let hex = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str());
            u32::from_str_radix(hex, 16)
                .ok()
                .and_then(char::from_u32)
                .map_or_else(|| caps[0].to_string(), String::from)
        })
        .into_owned()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn entry_page(script_body: &str) -> String {
        format!(
            "<!DOCTYPE html><html><head><title>Connexion</title>\
             <script src=\"/assets/okta.js\"></script></head>\
             <body><div id=\"okta-login-container\"></div>\
             <script type=\"text/javascript\">{script_body}</script>\
             </body></html>"
        )
    }

    #[test]
    fn test_extracts_token() {
        let page = entry_page(
            r#"var oktaData = {"signIn":{"consent":{}},"stateToken":"abc123","isMobile":false};"#,
        );
        assert_eq!(extract_state_token(&page).unwrap(), "abc123");
    }

    #[test]
    fn test_extracts_token_with_hex_escapes() {
        // The portal escapes dashes and tildes inside the literal.
        let page = entry_page(
            r#"var oktaData = {"stateToken":"00kYtY\x2DKW9A\x2DQyvpA\x7EdemoToken"};"#,
        );
        assert_eq!(
            extract_state_token(&page).unwrap(),
            "00kYtY-KW9A-QyvpA~demoToken"
        );
    }

    #[test]
    fn test_extracts_token_with_unicode_escapes() {
        let page = entry_page(r#"var oktaData = {"stateToken":"\u0074ok\u002Den"};"#);
        assert_eq!(extract_state_token(&page).unwrap(), "tok-en");
    }

    #[test]
    fn test_missing_script_block() {
        let err = extract_state_token("<html><body>maintenance</body></html>").unwrap_err();
        assert_eq!(err, ExtractionError::ScriptBlockNotFound);
    }

    #[test]
    fn test_script_without_okta_data() {
        let page = entry_page("window.analytics = {};");
        assert_eq!(
            extract_state_token(&page).unwrap_err(),
            ExtractionError::ScriptBlockNotFound
        );
    }

    #[test]
    fn test_okta_data_mentioned_but_not_assigned() {
        let page = entry_page("console.log(oktaData);");
        assert_eq!(
            extract_state_token(&page).unwrap_err(),
            ExtractionError::OktaDataNotFound
        );
    }

    #[test]
    fn test_missing_token_field() {
        let page = entry_page(r#"var oktaData = {"signIn":{"baseUrl":"https://example"}};"#);
        assert_eq!(
            extract_state_token(&page).unwrap_err(),
            ExtractionError::StateTokenMissing
        );
    }

    #[test]
    fn test_empty_token_is_an_error() {
        let page = entry_page(r#"var oktaData = {"stateToken":""};"#);
        assert_eq!(
            extract_state_token(&page).unwrap_err(),
            ExtractionError::StateTokenMissing
        );
    }

    #[test]
    fn test_decode_leaves_invalid_escapes() {
        assert_eq!(decode_js_escapes(r"a\xZZb"), r"a\xZZb");
        // Lone surrogates decode to no character and stay as-is.
        assert_eq!(decode_js_escapes(r"a\uD800b"), r"a\uD800b");
        assert_eq!(decode_js_escapes(r"plain"), "plain");
    }
}
