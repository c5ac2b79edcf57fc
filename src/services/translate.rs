// src/services/translate.rs

//! Machine translation of issue text.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::{AppError, Result};

/// A text translation backend.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String>;
}

/// Translator using the public Google Translate web endpoint.
pub struct GoogleTranslator {
    client: Client,
    endpoint: String,
}

impl GoogleTranslator {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(&self, text: &str, source: &str, target: &str) -> Result<String> {
        let url = url::Url::parse_with_params(
            &self.endpoint,
            &[("client", "gtx"), ("sl", source), ("tl", target), ("dt", "t")],
        )?;
        log::debug!(
            "Translating {} characters {} -> {}",
            text.chars().count(),
            source,
            target
        );

        let body = self
            .client
            .post(url)
            .form(&[("q", text)])
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        let value: Value = serde_json::from_str(&body)?;
        join_segments(&value)
    }
}

/// Join the translated segments of a `translate_a/single` response.
///
/// The response is a nested array whose first element lists
/// `[translated, original, ...]` per sentence.
fn join_segments(value: &Value) -> Result<String> {
    let segments = value
        .get(0)
        .and_then(Value::as_array)
        .ok_or_else(|| AppError::translation("response has no segment list"))?;

    Ok(segments
        .iter()
        .filter_map(|segment| segment.get(0).and_then(Value::as_str))
        .collect())
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_join_segments() {
        let value = json!([
            [["안녕하세요. ", "Hello. ", null, null, 10], ["세계", "World", null, null, 10]],
            null,
            "en"
        ]);
        assert_eq!(join_segments(&value).unwrap(), "안녕하세요. 세계");
    }

    #[test]
    fn test_join_segments_rejects_unexpected_shape() {
        let err = join_segments(&json!({"error": "quota"})).unwrap_err();
        assert!(matches!(err, AppError::Translation(_)));
    }

    #[tokio::test]
    async fn test_translate_posts_text() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/translate_a/single")
                .query_param("sl", "en")
                .query_param("tl", "ko")
                .query_param("client", "gtx");
            then.status(200)
                .body(r#"[[["날짜: 2024-01-09","Date: 2024-01-09",null,null,10]],null,"en"]"#);
        });

        let translator = GoogleTranslator::new(Client::new(), server.url("/translate_a/single"));
        let translated = translator
            .translate("Date: 2024-01-09", "en", "ko")
            .await
            .unwrap();

        mock.assert();
        assert_eq!(translated, "날짜: 2024-01-09");
    }

    #[tokio::test]
    async fn test_translate_http_failure_propagates() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/translate_a/single");
            then.status(429);
        });

        let translator = GoogleTranslator::new(Client::new(), server.url("/translate_a/single"));
        let err = translator.translate("x", "en", "ko").await.unwrap_err();
        assert!(matches!(err, AppError::Http(_)));
    }
}
