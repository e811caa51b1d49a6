use chrono::NaiveDate;
use serde_json::Value;
use std::fmt;
use std::fmt::Formatter;
use std::ops::Index;

static NULL: Value = Value::Null;

/// 검색 API 응답을 파싱한 문서 트리
///
/// # Description
/// 응답 JSON 을 별도의 스키마 없이 그대로 보관한다. 정상 응답과 API 에러 응답(`error` 객체)이
/// 같은 타입으로 표현 되므로 호출자는 [`Document::api_error`]로 에러 여부를 확인해야 한다.
///
/// 없는 키로 인덱싱 하면 패닉 대신 `null` 을 돌려준다.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Document(Value);

impl Document {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// 응답 본문이 비어 있을 때 반환되는 빈 문서 (`null`)
    pub fn empty() -> Self {
        Self(Value::Null)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_null()
    }

    /// 검색된 총 도서 수로 필드가 없거나 숫자가 아니면 0
    pub fn total_items(&self) -> i64 {
        self.0["totalItems"].as_i64().unwrap_or(0)
    }

    /// 검색된 도서 목록
    ///
    /// `items` 필드가 없으면 (`totalItems` 가 0 인 응답) 빈 이터레이터를 반환한다.
    pub fn items(&self) -> impl Iterator<Item = Volume<'_>> {
        self.0["items"]
            .as_array()
            .into_iter()
            .flatten()
            .map(Volume)
    }

    pub fn api_error(&self) -> Option<ApiError> {
        let error = self.0.get("error")?;
        Some(ApiError {
            code: error["code"].as_i64().unwrap_or(0),
            message: error["message"].as_str().unwrap_or_default().to_owned(),
        })
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl Index<&str> for Document {
    type Output = Value;

    fn index(&self, key: &str) -> &Self::Output {
        self.0.get(key).unwrap_or(&NULL)
    }
}

/// 응답 본문에 포함된 API 수준의 에러 (잘못된 키, 할당량 초과 등)
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    pub code: i64,
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "API error {}: {}", self.code, self.message)
    }
}

/// `items` 배열의 도서 한 건에 대한 읽기 전용 뷰
#[derive(Debug, Clone, Copy)]
pub struct Volume<'a>(&'a Value);

impl<'a> Volume<'a> {
    fn info(&self) -> &'a Value {
        &self.0["volumeInfo"]
    }

    fn text(&self, key: &str) -> &'a str {
        self.info()[key].as_str().unwrap_or_default()
    }

    fn list(&self, key: &str) -> Vec<&'a str> {
        self.info()[key]
            .as_array()
            .map(|values| values.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    pub fn id(&self) -> &'a str {
        self.0["id"].as_str().unwrap_or_default()
    }

    pub fn title(&self) -> &'a str {
        self.text("title")
    }

    pub fn authors(&self) -> Vec<&'a str> {
        self.list("authors")
    }

    pub fn publisher(&self) -> &'a str {
        self.text("publisher")
    }

    /// API 가 내려준 출판일 원문 (`2004`, `2004-05`, `2004-05-01` 등)
    pub fn published_date(&self) -> &'a str {
        self.text("publishedDate")
    }

    /// 출판일이 연-월-일 모두 있는 경우에만 날짜로 변환한다.
    pub fn published_on(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.published_date(), "%Y-%m-%d").ok()
    }

    pub fn description(&self) -> &'a str {
        self.text("description")
    }

    pub fn page_count(&self) -> Option<i64> {
        self.info()["pageCount"].as_i64()
    }

    pub fn categories(&self) -> Vec<&'a str> {
        self.list("categories")
    }

    pub fn average_rating(&self) -> Option<f64> {
        self.info()["averageRating"].as_f64()
    }

    pub fn ratings_count(&self) -> Option<i64> {
        self.info()["ratingsCount"].as_i64()
    }

    pub fn thumbnail(&self) -> &'a str {
        self.info()["imageLinks"]["thumbnail"].as_str().unwrap_or_default()
    }

    pub fn preview_link(&self) -> &'a str {
        self.text("previewLink")
    }

    pub fn info_link(&self) -> &'a str {
        self.text("infoLink")
    }

    pub fn canonical_volume_link(&self) -> &'a str {
        self.text("canonicalVolumeLink")
    }
}

impl fmt::Display for Volume<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "----------------------------------------")?;
        writeln!(f, "Title: {}", self.title())?;
        writeln!(f, "Authors: {}", self.authors().join(", "))?;
        writeln!(f, "Publisher: {}", self.publisher())?;
        writeln!(f, "Published Date: {}", self.published_date())?;
        writeln!(f, "Description: {}", self.description())?;
        writeln!(f, "Page Count: {}", self.page_count().unwrap_or(0))?;
        writeln!(f, "Categories: {}", self.categories().join(", "))?;
        writeln!(f, "Average Rating: {}", self.average_rating().unwrap_or(0.0))?;
        writeln!(f, "Ratings Count: {}", self.ratings_count().unwrap_or(0))?;
        writeln!(f, "Image Link: {}", self.thumbnail())?;
        writeln!(f, "Preview Link: {}", self.preview_link())?;
        writeln!(f, "Info Link: {}", self.info_link())?;
        write!(f, "Canonical Volume Link: {}", self.canonical_volume_link())
    }
}
