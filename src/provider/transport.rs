use crate::provider::document::Document;
use crate::provider::error::ClientError;
use tracing::error;

/// URL 을 받아 응답 본문을 돌려주는 전송 계층
pub trait Transport {
    fn get(&self, url: &str) -> Result<String, ClientError>;
}

/// 응답 본문을 문서 트리로 변환하는 파서
pub trait ResponseParser {
    fn parse(&self, body: &str) -> Result<Document, ClientError>;
}

/// `reqwest` 블로킹 클라이언트 하나를 재사용하는 전송 계층
///
/// # Note
/// HTTP 상태 코드는 검사하지 않는다. 400 응답이라도 본문이 있다면 그대로 반환하며
/// API 에러 여부는 호출자가 문서의 `error` 필드로 판단해야 한다.
#[derive(Clone)]
pub struct HttpTransport {
    client: reqwest::blocking::Client,
}

impl HttpTransport {
    pub fn new() -> Result<Self, ClientError> {
        let client = reqwest::blocking::Client::builder()
            .build()
            .map_err(|e| ClientError::InitializationFailed(e.to_string()))?;

        Ok(Self { client })
    }
}

impl Transport for HttpTransport {
    fn get(&self, url: &str) -> Result<String, ClientError> {
        let parsed = reqwest::Url::parse(url)
            .map_err(|e| request_failed(url, e))?;

        let response = self.client.get(parsed)
            .send()
            .map_err(|e| request_failed(url, e))?;
        let response_text = response.text()
            .map_err(|e| request_failed(url, e))?;

        Ok(response_text)
    }
}

fn request_failed<E: std::fmt::Debug + std::fmt::Display>(url: &str, e: E) -> ClientError {
    let url = redact_key(url);
    error!("HTTP 요청 중 에러가 발생 하였습니다. => {} ({:?})", url, e);
    ClientError::RequestFailed { url, reason: e.to_string() }
}

/// 로그와 에러에 API 키가 남지 않도록 `key` 파라미터 값을 가린다.
pub(crate) fn redact_key(url: &str) -> String {
    match url.find("&key=") {
        Some(pos) => format!("{}&key=***", &url[..pos]),
        None => url.to_owned(),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl ResponseParser for JsonParser {
    fn parse(&self, body: &str) -> Result<Document, ClientError> {
        serde_json::from_str(body)
            .map(Document::new)
            .map_err(|e| {
                error!("응답 JSON 파싱 중 에러가 발생 하였습니다. => {}", e);
                ClientError::ResponseParseFailed { body: body.to_owned() }
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_parser_returns_document_tree() {
        let document = JsonParser.parse(r#"{"kind":"books#volumes","totalItems":0}"#).unwrap();

        assert_eq!(document["kind"], "books#volumes");
        assert_eq!(document.total_items(), 0);
    }

    #[test]
    fn json_parser_embeds_body_in_error() {
        let body = r#"{"kind":"books#volumes","totalIt"#;
        let err = JsonParser.parse(body).unwrap_err();

        let message = err.to_string();
        assert!(message.starts_with("Failed to parse JSON response:"));
        assert!(message.ends_with(body));
    }

    #[test]
    fn html_body_is_a_decode_failure() {
        let err = JsonParser.parse("<html>Service Unavailable</html>").unwrap_err();

        assert!(matches!(err, ClientError::ResponseParseFailed { body } if body.contains("Service Unavailable")));
    }

    #[test]
    fn redact_key_hides_the_credential() {
        assert_eq!(
            redact_key("https://host/volumes?q=rust&startIndex=0&maxResults=40&key=SECRET"),
            "https://host/volumes?q=rust&startIndex=0&maxResults=40&key=***"
        );
        assert_eq!(redact_key("https://host/volumes?q=rust"), "https://host/volumes?q=rust");
    }

    #[test]
    fn invalid_url_is_a_transport_failure() {
        let transport = HttpTransport::new().unwrap();
        let err = transport.get("not a url").unwrap_err();

        assert!(matches!(err, ClientError::RequestFailed { .. }));
        assert_eq!(err.to_string(), "Failed to get data from URL");
    }
}
