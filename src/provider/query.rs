use crate::provider::error::RequestError;

pub const DEFAULT_START_INDEX: u32 = 0;
pub const DEFAULT_MAX_RESULTS: u32 = 40;

/// 검색어를 쿼리 문자열에 넣을 수 있는 형태로 치환한다.
///
/// # Description
/// 공백은 `+` 로, HTML 특수 문자(`&`, `<`, `>`, `"`, `'`)는 엔티티로 치환하며 그 외의 문자는 그대로 둔다.
/// RFC 3986 퍼센트 인코딩이 아니므로 `/`, `:`, `?` 등은 치환 되지 않는다.
///
/// 이미 치환된 문자열을 다시 넣으면 `&` 가 한번 더 치환 된다.
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            ' ' => escaped.push('+'),
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// 검색 범위를 특정 필드로 한정하는 한정자
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Qualifier {
    Subject,
    Title,
    Author,
    Isbn,
}

impl Qualifier {
    pub fn prefix(&self) -> &'static str {
        match self {
            Qualifier::Subject => "subject:",
            Qualifier::Title => "intitle:",
            Qualifier::Author => "inauthor:",
            Qualifier::Isbn => "isbn:",
        }
    }
}

/// 조회 시작 위치와 최대 조회 수
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub start_index: u32,
    pub max_results: u32,
}

impl Page {
    pub fn new(start_index: u32, max_results: u32) -> Self {
        Self { start_index, max_results }
    }
}

impl Default for Page {
    fn default() -> Self {
        Self {
            start_index: DEFAULT_START_INDEX,
            max_results: DEFAULT_MAX_RESULTS,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchRequest {
    term: String,
    qualifier: Option<(Qualifier, String)>,
    page: Page,
}

impl SearchRequest {
    pub fn builder() -> SearchRequestBuilder {
        SearchRequestBuilder::new()
    }

    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn qualifier(&self) -> Option<(Qualifier, &str)> {
        self.qualifier.as_ref().map(|(q, v)| (*q, v.as_str()))
    }

    pub fn start_index(&self) -> u32 {
        self.page.start_index
    }

    pub fn max_results(&self) -> u32 {
        self.page.max_results
    }

    /// `q` 파라미터에 들어갈 치환된 검색 조건
    ///
    /// 한정자가 있으면 `<검색어>+<prefix><값>`, 검색어가 비어 있으면 `<prefix><값>` 형태가 된다.
    pub fn query_fragment(&self) -> String {
        let term = escape(&self.term);
        match &self.qualifier {
            None => term,
            Some((qualifier, value)) if term.is_empty() => {
                format!("{}{}", qualifier.prefix(), escape(value))
            }
            Some((qualifier, value)) => {
                format!("{}+{}{}", term, qualifier.prefix(), escape(value))
            }
        }
    }

    pub fn pagination_suffix(&self) -> String {
        format!("&startIndex={}&maxResults={}", self.page.start_index, self.page.max_results)
    }
}

#[derive(Default)]
pub struct SearchRequestBuilder {
    term: Option<String>,
    qualifier: Option<(Qualifier, String)>,
    page: Page,
}

impl SearchRequestBuilder {
    pub fn new() -> Self {
        SearchRequestBuilder::default()
    }

    pub fn term<S: Into<String>>(mut self, term: S) -> Self {
        self.term = Some(term.into());
        self
    }

    pub fn qualifier<S: Into<String>>(mut self, qualifier: Qualifier, value: S) -> Self {
        self.qualifier = Some((qualifier, value.into()));
        self
    }

    pub fn page(mut self, page: Page) -> Self {
        self.page = page;
        self
    }

    pub fn start_index(mut self, start_index: u32) -> Self {
        self.page.start_index = start_index;
        self
    }

    pub fn max_results(mut self, max_results: u32) -> Self {
        self.page.max_results = max_results;
        self
    }

    pub fn build(self) -> Result<SearchRequest, RequestError> {
        let term = self.term.unwrap_or_default();
        if term.is_empty() && self.qualifier.is_none() {
            return Err(RequestError::InvalidParameter("term or qualifier is required".to_string()));
        }

        if self.page.max_results == 0 {
            return Err(RequestError::InvalidParameter("maxResults must be greater than 0".to_string()));
        }

        Ok(SearchRequest {
            term,
            qualifier: self.qualifier,
            page: self.page,
        })
    }
}
