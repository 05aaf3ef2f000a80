//! Discovery of the public subscription key.
//!
//! The vendor's own frontend embeds its API key in an app settings script.
//! The site root names the script; the script holds a frozen JSON object
//! with the key.

use crate::error::{ClientError, Result};
use regex::Regex;
use reqwest::StatusCode;
use std::sync::OnceLock;
use tracing::{debug, error};

const API_KEY_FIELD: &str = "ocpApimSubscriptionKey";

fn settings_path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#""appSettingsFilePath":"([^"]+)""#).expect("settings path regex is valid")
    })
}

fn settings_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?s)Object.freeze\((\{.*\})\)").expect("settings object regex is valid")
    })
}

/// Path of the app settings script referenced by the site root, relative to
/// the site. The leading `~/` is dropped.
pub fn extract_settings_path(html: &str) -> Option<String> {
    let path = settings_path_regex().captures(html)?.get(1)?.as_str();
    Some(path.strip_prefix("~/").unwrap_or(path).to_string())
}

/// The subscription key from the app settings script.
pub fn extract_api_key(script: &str) -> Result<String> {
    let settings = settings_regex()
        .captures(script)
        .and_then(|captures| captures.get(1))
        .ok_or_else(|| ClientError::Credentials("no settings object in app settings".into()))?;

    let settings: serde_json::Value = serde_json::from_str(settings.as_str())?;
    settings
        .get(API_KEY_FIELD)
        .and_then(|key| key.as_str())
        .map(str::to_string)
        .ok_or_else(|| ClientError::Credentials("malformed app settings".into()))
}

/// Fetch the subscription key the public site uses.
///
/// `site_url` is the site root, normally `https://www.systembolaget.se`.
pub async fn discover_api_key(http: &reqwest::Client, site_url: &str) -> Result<String> {
    let site_url = site_url.trim_end_matches('/');

    debug!(url = site_url, "fetching site root");
    let root = fetch_text(http, site_url).await?;
    let path = extract_settings_path(&root).ok_or_else(|| {
        error!("unable to find app settings script path");
        ClientError::Credentials("unable to identify app settings script path".into())
    })?;

    let script_url = format!("{site_url}/{path}");
    debug!(url = %script_url, "fetching app settings");
    let script = fetch_text(http, &script_url).await?;

    extract_api_key(&script)
}

async fn fetch_text(http: &reqwest::Client, url: &str) -> Result<String> {
    let response = http.get(url).send().await.map_err(|e| {
        error!(url, error = %e, "request failed");
        e
    })?;

    let status = response.status();
    if status != StatusCode::OK {
        error!(url, status = status.as_u16(), "got unexpected status code");
        return Err(ClientError::UnexpectedStatus {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
        });
    }

    Ok(response.text().await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settings_path_from_root_page() {
        let html = r#"<script>window.__config = {"appSettingsFilePath":"~/appsettings.v3.js","locale":"sv"};</script>"#;
        assert_eq!(
            extract_settings_path(html).as_deref(),
            Some("appsettings.v3.js")
        );
    }

    #[test]
    fn settings_path_without_tilde() {
        let html = r#"{"appSettingsFilePath":"static/settings.js"}"#;
        assert_eq!(
            extract_settings_path(html).as_deref(),
            Some("static/settings.js")
        );
    }

    #[test]
    fn settings_path_missing() {
        assert!(extract_settings_path("<html></html>").is_none());
    }

    #[test]
    fn api_key_from_multiline_script() {
        let script = "window.AppSettings = Object.freeze({\n  \"ocpApimSubscriptionKey\": \"abc123\",\n  \"env\": \"prod\"\n});";
        assert_eq!(extract_api_key(script).unwrap(), "abc123");
    }

    #[test]
    fn script_without_settings_object() {
        let err = extract_api_key("console.log('nothing here')").unwrap_err();
        assert!(matches!(err, ClientError::Credentials(_)));
    }

    #[test]
    fn settings_without_key() {
        let err = extract_api_key(r#"Object.freeze({"env": "prod"})"#).unwrap_err();
        assert!(matches!(err, ClientError::Credentials(_)));

        let err = extract_api_key(r#"Object.freeze({"ocpApimSubscriptionKey": 42})"#).unwrap_err();
        assert!(matches!(err, ClientError::Credentials(_)));
    }

    #[test]
    fn settings_that_are_not_json() {
        let err = extract_api_key("Object.freeze({ key: 'value' })").unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
