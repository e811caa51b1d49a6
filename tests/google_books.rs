use google_books_rust::provider::{ClientError, GoogleBooksClient, Page};
use mockito::Matcher;

const NO_BOOKS_FOUND: &str = r#"{"kind":"books#volumes","totalItems":0}"#;

const ONE_BOOK: &str = r#"{"kind":"books#volumes","totalItems":1,"items":[{
    "id":"nggnmAEACAAJ",
    "volumeInfo":{"title":"The Stranger","authors":["Albert Camus"],"publishedDate":"1989-03-13"}
}]}"#;

const INVALID_KEY_MESSAGE: &str = r#"{"error":{"code":400,"message":"API key not valid. Please pass a valid API key.",
"status":"INVALID_ARGUMENT"}}"#;

fn client(server: &mockito::Server, key: &str) -> GoogleBooksClient {
    GoogleBooksClient::new(key)
        .unwrap()
        .with_endpoint(format!("{}/books/v1/volumes", server.url()))
}

#[test]
fn isbn_search_returns_volume() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/books/v1/volumes")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "isbn:9780679720218".into()),
            Matcher::UrlEncoded("startIndex".into(), "0".into()),
            Matcher::UrlEncoded("maxResults".into(), "40".into()),
            Matcher::UrlEncoded("key".into(), "NoEmptyKey".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(ONE_BOOK)
        .create();

    let books = client(&server, "NoEmptyKey")
        .search_by_isbn("9780679720218", Page::default())
        .unwrap();

    mock.assert();
    assert!(books.total_items() > 0);
    assert!(!books["items"][0]["volumeInfo"]["title"].as_str().unwrap().is_empty());
    assert_eq!(books.items().next().unwrap().title(), "The Stranger");
}

#[test]
fn escaped_subject_search_with_no_results() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/books/v1/volumes")
        .match_query(Matcher::Any)
        .with_body(NO_BOOKS_FOUND)
        .create();

    let books = client(&server, "NoEmptyKey")
        .search_by_subject("http://www.example.com/v1/Fiction", "science", Page::default())
        .unwrap();

    mock.assert();
    assert_eq!(books.total_items(), 0);
    assert_eq!(books.items().count(), 0);
}

#[test]
fn bad_request_body_is_returned_as_document() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/books/v1/volumes")
        .match_query(Matcher::UrlEncoded("key".into(), "".into()))
        .with_status(400)
        .with_body(INVALID_KEY_MESSAGE)
        .create();

    let books = client(&server, "")
        .search_by_title("Terra", "Os pilares da terra", Page::default())
        .unwrap();

    mock.assert();
    assert_eq!(books["error"]["code"], 400);
    assert_eq!(books.api_error().unwrap().code, 400);
}

#[test]
fn empty_body_yields_empty_document() {
    let mut server = mockito::Server::new();
    let _mock = server.mock("GET", "/books/v1/volumes")
        .match_query(Matcher::Any)
        .with_body("")
        .create();

    let books = client(&server, "NoEmptyKey")
        .search_by_term("rust", Page::default())
        .unwrap();

    assert!(books.is_empty());
}

#[test]
fn truncated_body_is_a_decode_failure() {
    let mut server = mockito::Server::new();
    let _mock = server.mock("GET", "/books/v1/volumes")
        .match_query(Matcher::Any)
        .with_body(r#"{"kind":"books#volumes","tot"#)
        .create();

    let err = client(&server, "NoEmptyKey")
        .search_by_author("general term", "UnknownAuthor", Page::default())
        .unwrap_err();

    assert!(err.to_string().starts_with("Failed to parse JSON response:"));
    assert!(err.to_string().contains(r#"{"kind":"books#volumes","tot"#));
}

#[test]
fn unreachable_endpoint_is_a_transport_failure() {
    let client = GoogleBooksClient::new("NoEmptyKey")
        .unwrap()
        .with_endpoint("http://127.0.0.1:1/books/v1/volumes");

    let err = client.search_by_subject("general term", "terror", Page::default()).unwrap_err();

    assert!(matches!(err, ClientError::RequestFailed { .. }));
    assert_eq!(err.to_string(), "Failed to get data from URL");
}

#[test]
fn released_client_can_be_reinitialized() {
    let mut server = mockito::Server::new();
    let _mock = server.mock("GET", "/books/v1/volumes")
        .match_query(Matcher::Any)
        .with_body(NO_BOOKS_FOUND)
        .expect(1)
        .create();

    let mut client = client(&server, "NoEmptyKey");
    client.release();
    assert!(!client.is_initialized());
    assert!(matches!(
        client.search_by_term("rust", Page::default()),
        Err(ClientError::NotInitialized)
    ));

    client.init_transport().unwrap();
    assert_eq!(client.search_by_term("rust", Page::default()).unwrap().total_items(), 0);
}

#[test]
fn apostrophe_keeps_key_and_pagination_on_the_wire() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/books/v1/volumes")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("startIndex".into(), "0".into()),
            Matcher::UrlEncoded("maxResults".into(), "40".into()),
            Matcher::UrlEncoded("key".into(), "SECRET".into()),
        ]))
        .with_body(NO_BOOKS_FOUND)
        .create();

    let books = client(&server, "SECRET")
        .search_by_title("fantasy", "Ender's Game", Page::default())
        .unwrap();

    mock.assert();
    assert_eq!(books.total_items(), 0);
}

#[test]
fn html_special_characters_reach_the_server_as_entities() {
    let mut server = mockito::Server::new();
    // `&amp;` 의 `&` 는 그대로 전송 되므로 서버는 `q` 를 첫 `&` 까지만 받는다.
    let mock = server.mock("GET", "/books/v1/volumes")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("q".into(), "Tom ".into()),
            Matcher::Regex("amp;\\+Jerry".into()),
            Matcher::Regex("%2339;s".into()),
            Matcher::UrlEncoded("startIndex".into(), "20".into()),
            Matcher::UrlEncoded("maxResults".into(), "10".into()),
            Matcher::UrlEncoded("key".into(), "SECRET".into()),
        ]))
        .with_body(NO_BOOKS_FOUND)
        .create();

    client(&server, "SECRET")
        .search_by_term("Tom & Jerry's", Page::new(20, 10))
        .unwrap();

    mock.assert();
}
