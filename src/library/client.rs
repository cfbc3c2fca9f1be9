//! Book search and personal library store

use crate::error::{BookshelfError, BookshelfResult};
use crate::library::book::Book;
use crate::library::transport::{ApiRequest, ApiResponse, Method, Transport};
use crate::session::SessionManager;
use parking_lot::RwLock;
use serde::Serialize;
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Search results are cut to this many entries
pub const SEARCH_RESULT_LIMIT: usize = 10;

pub const SEARCH_ERROR: &str = "Error searching books";
pub const LIBRARY_ERROR: &str = "Error loading library";
pub const SAVE_ERROR: &str = "Error saving book";
pub const UPDATE_ERROR: &str = "Error updating book";
pub const DELETE_ERROR: &str = "Error deleting book";

/// Progress of the most recent operation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RequestState {
    pub is_loading: bool,
    pub error_message: Option<String>,
}

/// Everything the client holds, as one consistent copy
#[derive(Debug, Clone, Default, Serialize)]
pub struct LibraryState {
    pub last_searches: Vec<Value>,
    pub search_results: Vec<Book>,
    pub my_library: Vec<Book>,
    pub request: RequestState,
}

/// Result-assigning reads whose responses are ordered by issue time
#[derive(Debug, Clone, Copy)]
enum Read {
    LastSearches,
    Search,
    MyLibrary,
}

/// Client for the books API that caches the last response of each read.
///
/// Mutations never touch the cached collections; call
/// [`fetch_my_library`](Self::fetch_my_library) to observe their effect.
/// When reads of the same kind overlap, the response of the most recently
/// issued one wins and older responses are dropped.
pub struct LibraryClient {
    transport: Arc<dyn Transport>,
    session: Arc<SessionManager>,
    base_url: String,
    state: RwLock<LibraryState>,
    last_searches_seq: AtomicU64,
    search_seq: AtomicU64,
    library_seq: AtomicU64,
}

impl LibraryClient {
    pub fn new(
        transport: Arc<dyn Transport>,
        session: Arc<SessionManager>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            session,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            state: RwLock::new(LibraryState::default()),
            last_searches_seq: AtomicU64::new(0),
            search_seq: AtomicU64::new(0),
            library_seq: AtomicU64::new(0),
        }
    }

    /// Load the recent-searches list.
    ///
    /// Failures are logged only: the list and the request state are left
    /// as they were.
    pub async fn fetch_last_searches(&self) {
        let seq = self.issue(Read::LastSearches);
        let outcome = self.get_json::<Vec<Value>>("/last-search", Vec::new()).await;

        if !self.is_current(Read::LastSearches, seq) {
            debug!("Discarding stale last-search response");
            return;
        }

        match outcome {
            Ok(entries) => self.state.write().last_searches = entries,
            Err(e) => warn!("Failed to fetch last searches: {}", e),
        }
    }

    /// Search the catalogue. Keeps at most [`SEARCH_RESULT_LIMIT`] results.
    ///
    /// A `{"message": ...}` body is a rejection from the service: the message
    /// becomes the error and the results are cleared.
    pub async fn search_books(&self, query: &str) {
        let seq = self.issue(Read::Search);
        self.begin();

        let outcome = self
            .get_json::<Value>("/search", vec![("q".to_string(), query.to_string())])
            .await
            .and_then(|value| {
                parse_search(value).map_err(|reason| self.decode_error("/search", reason))
            });

        if !self.is_current(Read::Search, seq) {
            debug!("Discarding stale search response for {:?}", query);
            return;
        }
        self.finish_search(query, outcome);
    }

    /// Load the signed-in user's library
    pub async fn fetch_my_library(&self) {
        let seq = self.issue(Read::MyLibrary);
        self.begin();

        let outcome = self.get_json::<Vec<Book>>("/my-library", Vec::new()).await;

        if !self.is_current(Read::MyLibrary, seq) {
            debug!("Discarding stale library response");
            return;
        }
        self.finish_library(outcome);
    }

    /// Add a book to the library
    pub async fn save_book(&self, book: &Book) -> BookshelfResult<()> {
        self.begin();
        let result = self
            .send(Method::Post, "/my-library", Vec::new(), Some(book.as_json().clone()))
            .await;
        self.finish_mutation(result, SAVE_ERROR)
    }

    /// Replace a library entry
    pub async fn update_book(&self, book_id: &str, book: &Book) -> BookshelfResult<()> {
        self.begin();
        let path = format!("/my-library/{}", encode_segment(book_id));
        let result = self
            .send(Method::Put, &path, Vec::new(), Some(book.as_json().clone()))
            .await;
        self.finish_mutation(result, UPDATE_ERROR)
    }

    /// Remove a library entry
    pub async fn delete_book(&self, book_id: &str) -> BookshelfResult<()> {
        self.begin();
        let path = format!("/my-library/{}", encode_segment(book_id));
        let result = self.send(Method::Delete, &path, Vec::new(), None).await;
        self.finish_mutation(result, DELETE_ERROR)
    }

    /// Copy of the whole store
    pub fn snapshot(&self) -> LibraryState {
        self.state.read().clone()
    }

    pub fn search_results(&self) -> Vec<Book> {
        self.state.read().search_results.clone()
    }

    pub fn my_library(&self) -> Vec<Book> {
        self.state.read().my_library.clone()
    }

    pub fn last_searches(&self) -> Vec<Value> {
        self.state.read().last_searches.clone()
    }

    pub fn request_state(&self) -> RequestState {
        self.state.read().request.clone()
    }

    fn begin(&self) {
        let mut state = self.state.write();
        state.request.is_loading = true;
        state.request.error_message = None;
    }

    fn finish_search(&self, query: &str, outcome: BookshelfResult<SearchOutcome>) {
        let mut state = self.state.write();
        match outcome {
            Ok(SearchOutcome::Found(books)) => state.search_results = books,
            Ok(SearchOutcome::Rejected(message)) => {
                debug!("Search for {:?} rejected: {}", query, message);
                state.request.error_message = Some(message);
                state.search_results.clear();
            }
            Err(e) => {
                error!("{}: {}", SEARCH_ERROR, e);
                state.request.error_message = Some(SEARCH_ERROR.to_string());
            }
        }
        state.request.is_loading = false;
    }

    fn finish_library(&self, outcome: BookshelfResult<Vec<Book>>) {
        let mut state = self.state.write();
        match outcome {
            Ok(books) => state.my_library = books,
            Err(e) => {
                error!("{}: {}", LIBRARY_ERROR, e);
                state.request.error_message = Some(LIBRARY_ERROR.to_string());
            }
        }
        state.request.is_loading = false;
    }

    fn finish_mutation(
        &self,
        result: BookshelfResult<ApiResponse>,
        message: &str,
    ) -> BookshelfResult<()> {
        let mut state = self.state.write();
        state.request.is_loading = false;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                error!("{}: {}", message, e);
                state.request.error_message = Some(message.to_string());
                Err(e)
            }
        }
    }

    fn counter(&self, read: Read) -> &AtomicU64 {
        match read {
            Read::LastSearches => &self.last_searches_seq,
            Read::Search => &self.search_seq,
            Read::MyLibrary => &self.library_seq,
        }
    }

    fn issue(&self, read: Read) -> u64 {
        self.counter(read).fetch_add(1, Ordering::SeqCst) + 1
    }

    fn is_current(&self, read: Read, seq: u64) -> bool {
        self.counter(read).load(Ordering::SeqCst) == seq
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn decode_error(&self, path: &str, reason: impl std::fmt::Display) -> BookshelfError {
        BookshelfError::decode(self.url(path), reason)
    }

    /// One round trip; non-2xx statuses become `Api` errors
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> BookshelfResult<ApiResponse> {
        let request = ApiRequest {
            method,
            url: self.url(path),
            query,
            authorization: self.session.authorization(),
            body,
        };

        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(BookshelfError::Api {
                status: response.status,
                body: response.body,
            });
        }
        Ok(response)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: Vec<(String, String)>,
    ) -> BookshelfResult<T> {
        let response = self.send(Method::Get, path, query, None).await?;
        serde_json::from_str(&response.body).map_err(|e| self.decode_error(path, e))
    }
}

#[derive(Debug)]
enum SearchOutcome {
    Found(Vec<Book>),
    Rejected(String),
}

/// Interpret a search body: a result array, or an object carrying `message`
fn parse_search(value: Value) -> Result<SearchOutcome, String> {
    match value {
        Value::Array(items) => Ok(SearchOutcome::Found(
            items
                .into_iter()
                .take(SEARCH_RESULT_LIMIT)
                .map(Book::from_json)
                .collect(),
        )),
        Value::Object(mut fields) => match fields.remove("message") {
            Some(Value::String(message)) if !message.is_empty() => {
                Ok(SearchOutcome::Rejected(message))
            }
            Some(other) if is_truthy(&other) => Ok(SearchOutcome::Rejected(other.to_string())),
            _ => Err("expected a result array".to_string()),
        },
        _ => Err("expected a result array".to_string()),
    }
}

/// `false`, `0`, `""` and `null` carry no message
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Percent-encode `segment` so it stays a single path segment
fn encode_segment(segment: &str) -> String {
    let mut encoded = String::with_capacity(segment.len());
    for byte in segment.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::StaticAuthenticator;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;
    use std::collections::{HashMap, VecDeque};
    use tokio::sync::{mpsc, oneshot};

    const BASE: &str = "http://books.test/api/books";

    /// Replies from a fixed script and records every request
    #[derive(Default)]
    struct ScriptedTransport {
        replies: Mutex<VecDeque<BookshelfResult<ApiResponse>>>,
        requests: Mutex<Vec<ApiRequest>>,
    }

    impl ScriptedTransport {
        fn replying(replies: Vec<BookshelfResult<ApiResponse>>) -> Arc<Self> {
            Arc::new(Self {
                replies: Mutex::new(replies.into()),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<ApiRequest> {
            self.requests.lock().clone()
        }
    }

    #[async_trait]
    impl Transport for ScriptedTransport {
        async fn send(&self, request: ApiRequest) -> BookshelfResult<ApiResponse> {
            let url = request.url.clone();
            self.requests.lock().push(request);
            self.replies
                .lock()
                .pop_front()
                .unwrap_or_else(|| Err(BookshelfError::transport(url, "no scripted reply")))
        }
    }

    /// Holds each search until the test releases it
    struct GatedTransport {
        gates: Mutex<HashMap<String, (oneshot::Receiver<()>, ApiResponse)>>,
        arrived: mpsc::UnboundedSender<String>,
    }

    #[async_trait]
    impl Transport for GatedTransport {
        async fn send(&self, request: ApiRequest) -> BookshelfResult<ApiResponse> {
            let query = request.query_param("q").unwrap_or_default().to_string();
            let gate = self.gates.lock().remove(&query);
            let (release, response) = gate.expect("request without a gate");
            self.arrived.send(query).unwrap();
            release.await.unwrap();
            Ok(response)
        }
    }

    fn session(signed_in: bool) -> Arc<SessionManager> {
        let manager = SessionManager::new(
            Arc::new(MemoryStore::new()),
            Box::new(StaticAuthenticator::default()),
        );
        if signed_in {
            assert!(manager.login("admin", "1234"));
        }
        Arc::new(manager)
    }

    fn client(transport: Arc<dyn Transport>) -> LibraryClient {
        LibraryClient::new(transport, session(true), BASE)
    }

    fn books(n: usize) -> Value {
        Value::Array(
            (0..n)
                .map(|i| json!({"id": i.to_string(), "title": format!("Book {i}")}))
                .collect(),
        )
    }

    fn refused() -> BookshelfResult<ApiResponse> {
        Err(BookshelfError::transport(BASE, "connection refused"))
    }

    #[tokio::test]
    async fn search_truncates_to_ten() {
        let transport = ScriptedTransport::replying(vec![Ok(ApiResponse::json(&books(15)))]);
        let client = client(transport.clone());

        client.search_books("tolkien").await;

        let state = client.snapshot();
        assert_eq!(state.search_results.len(), 10);
        assert_eq!(state.search_results[9].title(), Some("Book 9"));
        assert_eq!(state.request, RequestState::default());

        let request = &transport.requests()[0];
        assert_eq!(request.method, Method::Get);
        assert_eq!(request.url, format!("{BASE}/search"));
        assert_eq!(request.query_param("q"), Some("tolkien"));
        assert_eq!(request.authorization, "Basic YWRtaW46MTIzNA==");
    }

    #[tokio::test]
    async fn search_keeps_short_results() {
        let transport = ScriptedTransport::replying(vec![Ok(ApiResponse::json(&books(3)))]);
        let client = client(transport);

        client.search_books("le guin").await;

        assert_eq!(client.search_results().len(), 3);
    }

    #[tokio::test]
    async fn search_message_envelope_is_rejection() {
        let transport = ScriptedTransport::replying(vec![
            Ok(ApiResponse::json(&books(4))),
            Ok(ApiResponse::json(&json!({"message": "x"}))),
        ]);
        let client = client(transport);

        client.search_books("first").await;
        client.search_books("second").await;

        let state = client.snapshot();
        assert_eq!(state.request.error_message.as_deref(), Some("x"));
        assert!(state.search_results.is_empty());
        assert!(!state.request.is_loading);
    }

    #[tokio::test]
    async fn search_failure_sets_error_and_keeps_results() {
        let transport = ScriptedTransport::replying(vec![
            Ok(ApiResponse::json(&books(2))),
            refused(),
        ]);
        let client = client(transport);

        client.search_books("a").await;
        client.search_books("b").await;

        let state = client.snapshot();
        assert_eq!(state.request.error_message.as_deref(), Some(SEARCH_ERROR));
        assert!(!state.request.is_loading);
        assert_eq!(state.search_results.len(), 2);
    }

    #[tokio::test]
    async fn search_non_array_is_failure() {
        let transport =
            ScriptedTransport::replying(vec![Ok(ApiResponse::json(&json!({"total": 0})))]);
        let client = client(transport);

        client.search_books("a").await;

        assert_eq!(
            client.request_state().error_message.as_deref(),
            Some(SEARCH_ERROR)
        );
    }

    #[tokio::test]
    async fn new_search_clears_previous_error() {
        let transport = ScriptedTransport::replying(vec![
            refused(),
            Ok(ApiResponse::json(&books(1))),
        ]);
        let client = client(transport);

        client.search_books("a").await;
        assert!(client.request_state().error_message.is_some());

        client.search_books("b").await;
        assert_eq!(client.request_state(), RequestState::default());
    }

    #[tokio::test]
    async fn unauthenticated_calls_still_send_header() {
        let transport = ScriptedTransport::replying(vec![Ok(ApiResponse::new(401, "denied"))]);
        let client = LibraryClient::new(transport.clone(), session(false), BASE);

        client.fetch_my_library().await;

        assert_eq!(transport.requests()[0].authorization, "Basic ");
        assert_eq!(
            client.request_state().error_message.as_deref(),
            Some(LIBRARY_ERROR)
        );
    }

    #[tokio::test]
    async fn fetch_library_replaces_collection() {
        let transport = ScriptedTransport::replying(vec![
            Ok(ApiResponse::json(&books(5))),
            Ok(ApiResponse::json(&books(2))),
        ]);
        let client = client(transport.clone());

        client.fetch_my_library().await;
        client.fetch_my_library().await;

        assert_eq!(client.my_library().len(), 2);
        assert_eq!(transport.requests()[1].url, format!("{BASE}/my-library"));
        assert!(!client.request_state().is_loading);
    }

    #[tokio::test]
    async fn last_searches_failure_is_silent() {
        let transport = ScriptedTransport::replying(vec![
            Ok(ApiResponse::json(&json!(["dune", "emma"]))),
            Ok(ApiResponse::new(500, "boom")),
        ]);
        let client = client(transport.clone());

        client.fetch_last_searches().await;
        client.fetch_last_searches().await;

        let state = client.snapshot();
        assert_eq!(state.last_searches, vec![json!("dune"), json!("emma")]);
        assert_eq!(state.request, RequestState::default());
        assert_eq!(transport.requests()[0].url, format!("{BASE}/last-search"));
    }

    #[tokio::test]
    async fn save_failure_records_and_reraises() {
        let transport = ScriptedTransport::replying(vec![refused()]);
        let client = client(transport);

        let err = client
            .save_book(&Book::new("Dune", None))
            .await
            .unwrap_err();

        assert!(matches!(err, BookshelfError::Transport { .. }));
        let state = client.request_state();
        assert_eq!(state.error_message.as_deref(), Some(SAVE_ERROR));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn save_does_not_touch_library() {
        let transport = ScriptedTransport::replying(vec![
            Ok(ApiResponse::json(&books(1))),
            Ok(ApiResponse::new(201, "")),
        ]);
        let client = client(transport.clone());

        client.fetch_my_library().await;
        client
            .save_book(&Book::new("Dune", Some("Frank Herbert".to_string())))
            .await
            .unwrap();

        assert_eq!(client.my_library().len(), 1);

        let request = &transport.requests()[1];
        assert_eq!(request.method, Method::Post);
        assert_eq!(request.url, format!("{BASE}/my-library"));
        assert_eq!(
            request.body,
            Some(json!({"title": "Dune", "author": "Frank Herbert"}))
        );
    }

    #[tokio::test]
    async fn update_and_delete_target_book_path() {
        let transport = ScriptedTransport::replying(vec![
            Ok(ApiResponse::new(200, "{}")),
            Ok(ApiResponse::new(204, "")),
        ]);
        let client = client(transport.clone());

        client
            .update_book("b-7", &Book::new("Emma", None))
            .await
            .unwrap();
        client.delete_book("b-7").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].method, Method::Put);
        assert_eq!(requests[0].url, format!("{BASE}/my-library/b-7"));
        assert_eq!(requests[1].method, Method::Delete);
        assert_eq!(requests[1].url, format!("{BASE}/my-library/b-7"));
        assert!(requests[1].body.is_none());
        assert_eq!(client.request_state(), RequestState::default());
    }

    #[tokio::test]
    async fn book_id_is_one_path_segment() {
        let transport = ScriptedTransport::replying(vec![
            Ok(ApiResponse::new(200, "{}")),
            Ok(ApiResponse::new(204, "")),
            Ok(ApiResponse::new(204, "")),
        ]);
        let client = client(transport.clone());
        let key = Book::from_json(json!({"key": "/works/OL45883W", "title": "Dune"}))
            .id()
            .unwrap();

        client.update_book(&key, &Book::new("Dune", None)).await.unwrap();
        client.delete_book(&key).await.unwrap();
        client.delete_book("a?b#c d%").await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].url, format!("{BASE}/my-library/%2Fworks%2FOL45883W"));
        assert_eq!(requests[1].url, format!("{BASE}/my-library/%2Fworks%2FOL45883W"));
        assert_eq!(requests[2].url, format!("{BASE}/my-library/a%3Fb%23c%20d%25"));
        assert!(requests[2].query.is_empty());
    }

    #[test]
    fn encode_segment_keeps_unreserved() {
        assert_eq!(encode_segment("b-7_x.y~z"), "b-7_x.y~z");
        assert_eq!(encode_segment("Ñ"), "%C3%91");
    }

    #[tokio::test]
    async fn update_rejected_status_is_reraised() {
        let transport = ScriptedTransport::replying(vec![Ok(ApiResponse::new(404, "missing"))]);
        let client = client(transport);

        let err = client
            .update_book("nope", &Book::new("Emma", None))
            .await
            .unwrap_err();

        assert!(matches!(err, BookshelfError::Api { status: 404, .. }));
        assert_eq!(
            client.request_state().error_message.as_deref(),
            Some(UPDATE_ERROR)
        );
    }

    #[tokio::test]
    async fn delete_failure_is_reraised() {
        let transport = ScriptedTransport::replying(vec![refused()]);
        let client = client(transport);

        assert!(client.delete_book("b-1").await.is_err());
        let state = client.request_state();
        assert_eq!(state.error_message.as_deref(), Some(DELETE_ERROR));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn base_url_trailing_slash_is_ignored() {
        let transport = ScriptedTransport::replying(vec![Ok(ApiResponse::json(&books(0)))]);
        let client = LibraryClient::new(transport.clone(), session(true), format!("{BASE}/"));

        client.fetch_my_library().await;

        assert_eq!(transport.requests()[0].url, format!("{BASE}/my-library"));
    }

    #[tokio::test]
    async fn stale_search_response_is_discarded() {
        let (old_tx, old_rx) = oneshot::channel();
        let (new_tx, new_rx) = oneshot::channel();
        let (arrived_tx, mut arrived) = mpsc::unbounded_channel();

        let mut gates = HashMap::new();
        gates.insert("old".to_string(), (old_rx, ApiResponse::json(&books(7))));
        gates.insert("new".to_string(), (new_rx, ApiResponse::json(&books(2))));
        let transport = Arc::new(GatedTransport {
            gates: Mutex::new(gates),
            arrived: arrived_tx,
        });
        let client = Arc::new(client(transport));

        let old = tokio::spawn({
            let client = client.clone();
            async move { client.search_books("old").await }
        });
        assert_eq!(arrived.recv().await.as_deref(), Some("old"));

        let new = tokio::spawn({
            let client = client.clone();
            async move { client.search_books("new").await }
        });
        assert_eq!(arrived.recv().await.as_deref(), Some("new"));

        // The newer search completes first, the older one lands afterwards
        new_tx.send(()).unwrap();
        new.await.unwrap();
        old_tx.send(()).unwrap();
        old.await.unwrap();

        let state = client.snapshot();
        assert_eq!(state.search_results.len(), 2);
        assert!(!state.request.is_loading);
    }

    #[test]
    fn parse_search_variants() {
        assert!(matches!(
            parse_search(json!([])),
            Ok(SearchOutcome::Found(b)) if b.is_empty()
        ));
        assert!(matches!(
            parse_search(json!({"message": "No results"})),
            Ok(SearchOutcome::Rejected(m)) if m == "No results"
        ));
        assert!(parse_search(json!({"message": ""})).is_err());
        assert!(parse_search(json!({"message": null})).is_err());
        assert!(parse_search(json!({"message": false})).is_err());
        assert!(parse_search(json!({"message": 0})).is_err());
        assert!(parse_search(json!({"message": 0.0})).is_err());
        assert!(matches!(
            parse_search(json!({"message": true})),
            Ok(SearchOutcome::Rejected(m)) if m == "true"
        ));
        assert!(matches!(
            parse_search(json!({"message": {"code": 3}})),
            Ok(SearchOutcome::Rejected(m)) if m == r#"{"code":3}"#
        ));
        assert!(parse_search(json!("text")).is_err());
    }
}
