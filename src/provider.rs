pub mod document;
pub mod error;
pub mod google;
pub mod query;
pub mod shared;
pub mod transport;

pub use document::{ApiError, Document, Volume};
pub use error::{ClientError, RequestError};
pub use google::{BookClient, GoogleBooksClient};
pub use query::{Page, Qualifier, SearchRequest};
pub use transport::{HttpTransport, JsonParser, ResponseParser, Transport};
