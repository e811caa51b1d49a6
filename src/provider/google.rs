use crate::provider::document::Document;
use crate::provider::error::ClientError;
use crate::provider::query::{Page, Qualifier, SearchRequest};
use crate::provider::transport::{redact_key, HttpTransport, JsonParser, ResponseParser, Transport};
use tracing::{debug, warn};

/// Google Books 도서 검색 API 엔드포인트 URL
pub const VOLUMES_ENDPOINT: &'static str = "https://www.googleapis.com/books/v1/volumes";

/// 기본 전송 계층과 JSON 파서를 사용하는 클라이언트
pub type GoogleBooksClient = BookClient<HttpTransport, JsonParser>;

/// Google Books 도서 검색 클라이언트
///
/// # Description
/// 하나의 전송 핸들을 생성 시점에 확보하여 모든 요청에서 재사용한다.
/// 응답 본문은 요청마다 지역 값으로만 다루며 인스턴스에 보관하지 않으므로,
/// 한 요청의 결과가 다음 요청에 영향을 주지 않는다.
///
/// 전송 계층과 파서는 [`Transport`], [`ResponseParser`] 로 주입 받으므로 테스트에서는
/// [`BookClient::with_parts`] 로 대역을 넣을 수 있다.
pub struct BookClient<T, P> {
    api_key: String,
    endpoint: String,
    transport: Option<T>,
    parser: P,
}

impl GoogleBooksClient {
    /// API 키를 지정하여 생성한다. 전송 핸들 생성에 실패하면 바로 에러를 반환한다.
    pub fn new<S: Into<String>>(api_key: S) -> Result<Self, ClientError> {
        let transport = HttpTransport::new()?;
        Ok(Self::with_parts(api_key, transport, JsonParser))
    }

    /// API 키 없이 생성한다. 키는 [`BookClient::set_api_key`] 로 나중에 설정한다.
    pub fn without_key() -> Result<Self, ClientError> {
        Self::new(String::new())
    }

    /// 해제된 전송 핸들을 다시 확보한다.
    pub fn init_transport(&mut self) -> Result<(), ClientError> {
        self.transport = Some(HttpTransport::new()?);
        Ok(())
    }
}

impl<T: Transport, P: ResponseParser> BookClient<T, P> {
    pub fn with_parts<S: Into<String>>(api_key: S, transport: T, parser: P) -> Self {
        Self {
            api_key: api_key.into(),
            endpoint: VOLUMES_ENDPOINT.to_owned(),
            transport: Some(transport),
            parser,
        }
    }

    pub fn with_endpoint<S: Into<String>>(mut self, endpoint: S) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn set_api_key<S: Into<String>>(&mut self, api_key: S) {
        self.api_key = api_key.into();
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn is_initialized(&self) -> bool {
        self.transport.is_some()
    }

    /// 전송 핸들을 해제한다. 이후 요청은 [`ClientError::NotInitialized`] 로 실패한다.
    pub fn release(&mut self) {
        self.transport = None;
    }

    pub fn attach_transport(&mut self, transport: T) {
        self.transport = Some(transport);
    }

    pub fn search_by_term(&self, term: &str, page: Page) -> Result<Document, ClientError> {
        let request = SearchRequest::builder()
            .term(term)
            .page(page)
            .build()?;
        self.search(&request)
    }

    pub fn search_by_subject(&self, term: &str, subject: &str, page: Page) -> Result<Document, ClientError> {
        self.search_qualified(term, Qualifier::Subject, subject, page)
    }

    pub fn search_by_title(&self, term: &str, title: &str, page: Page) -> Result<Document, ClientError> {
        self.search_qualified(term, Qualifier::Title, title, page)
    }

    pub fn search_by_author(&self, term: &str, author: &str, page: Page) -> Result<Document, ClientError> {
        self.search_qualified(term, Qualifier::Author, author, page)
    }

    /// ISBN 으로 검색한다. 일반 검색어 없이 `isbn:` 조건만 전송한다.
    pub fn search_by_isbn(&self, isbn: &str, page: Page) -> Result<Document, ClientError> {
        self.search_qualified("", Qualifier::Isbn, isbn, page)
    }

    fn search_qualified(&self, term: &str, qualifier: Qualifier, value: &str, page: Page) -> Result<Document, ClientError> {
        let request = SearchRequest::builder()
            .term(term)
            .qualifier(qualifier, value)
            .page(page)
            .build()?;
        self.search(&request)
    }

    /// 요청을 전송하고 응답을 문서로 변환한다.
    ///
    /// 응답 본문이 비어 있으면 에러 없이 빈 문서를 반환한다.
    pub fn search(&self, request: &SearchRequest) -> Result<Document, ClientError> {
        let response = self.fetch(request)?;
        if response.is_empty() {
            return Ok(Document::empty());
        }

        let document = self.decode(&response)?;
        if let Some(api_error) = document.api_error() {
            warn!("검색 API 가 에러를 반환 하였습니다. => {}", api_error);
        }

        Ok(document)
    }

    /// `<endpoint>?q=<조건>&startIndex=<n>&maxResults=<m>&key=<API 키>`
    ///
    /// 페이지 정보는 `q` 와 별개의 파라미터로 전송한다.
    /// `'` 의 치환 결과(`&#39;`)에 들어 있는 `#` 은 URL 프래그먼트 시작으로 해석 되므로 `%23` 으로 바꿔 보낸다.
    pub fn request_url(&self, request: &SearchRequest) -> String {
        format!(
            "{}?q={}{}&key={}",
            self.endpoint,
            request.query_fragment().replace('#', "%23"),
            request.pagination_suffix(),
            self.api_key
        )
    }

    pub fn fetch(&self, request: &SearchRequest) -> Result<String, ClientError> {
        let transport = self.transport.as_ref().ok_or(ClientError::NotInitialized)?;

        let url = self.request_url(request);
        debug!("GET {}", redact_key(&url));

        transport.get(&url)
    }

    pub fn decode(&self, response: &str) -> Result<Document, ClientError> {
        self.parser.parse(response)
    }
}
