use std::sync::Arc;

use async_trait::async_trait;
use quiz_core::model::Quiz;
use services::{
    FetchError, QuizCatalog, RefreshError, RefreshService, RemoteQuizSource, SessionLauncher,
    SettingsService,
};
use storage::repository::{
    CatalogRepository, InMemoryRepository, SettingsRepository, StorageError,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

const FEED: &str = r#"[
  {"title": "World Geography", "desc": "Places",
   "questions": [
     {"text": "Capital of France?", "answer": "Paris", "answers": ["London", "Paris", "Rome"]},
     {"text": "Longest river?", "answer": "Amazon", "answers": ["Nile", "Danube"]}
   ]},
  {"title": "Film Classics", "desc": "Movies",
   "questions": [
     {"text": "Who directed Jaws?", "answer": "Spielberg", "answers": ["Lucas", "Spielberg"]}
   ]}
]"#;

/// Serve exactly one HTTP response on a random local port.
async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = vec![0_u8; 4096];
        let _ = stream.read(&mut buf).await.unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        let _ = stream.shutdown().await;
    });
    (format!("http://{addr}/questions.json"), handle)
}

fn local_source() -> RemoteQuizSource {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    RemoteQuizSource::with_client(client)
}

struct Harness {
    catalog: Arc<QuizCatalog>,
    repo: InMemoryRepository,
    service: RefreshService,
}

async fn harness(endpoint: &str, snapshots: Option<Arc<dyn CatalogRepository>>) -> Harness {
    build_harness(endpoint, snapshots, true).await
}

async fn build_harness(
    endpoint: &str,
    snapshots: Option<Arc<dyn CatalogRepository>>,
    reachable: bool,
) -> Harness {
    let repo = InMemoryRepository::new();
    let settings = Arc::new(SettingsService::new(Arc::new(repo.clone())));
    settings.set_endpoint(endpoint).await.unwrap();
    let catalog = Arc::new(QuizCatalog::with_defaults().unwrap());
    let snapshots: Arc<dyn CatalogRepository> = match snapshots {
        Some(snapshots) => snapshots,
        None => Arc::new(repo.clone()),
    };
    let service = RefreshService::new(
        Arc::clone(&catalog),
        local_source(),
        settings,
        snapshots,
        Arc::new(move || reachable),
    );
    Harness {
        catalog,
        repo,
        service,
    }
}

#[tokio::test]
async fn refresh_replaces_catalog_and_saves_snapshot() {
    let (endpoint, server) = serve_once("200 OK", FEED).await;
    let h = harness(&endpoint, None).await;

    let outcome = h.service.refresh().await.unwrap();
    server.await.unwrap();

    assert_eq!(outcome.quiz_count, 2);
    assert!(outcome.snapshot_saved);

    let titles: Vec<String> = h.catalog.list().iter().map(|q| q.title().to_owned()).collect();
    assert_eq!(titles, ["World Geography", "Film Classics"]);
    let geography = h.catalog.get(0).unwrap();
    assert_eq!(geography.questions()[0].correct_option_index(), 1);
    assert_eq!(geography.questions()[1].correct_option_index(), 0);

    let saved = h.repo.load_catalog().await.unwrap().unwrap();
    assert_eq!(saved, *h.catalog.list());
}

#[tokio::test]
async fn non_success_status_keeps_previous_catalog() {
    let (endpoint, server) = serve_once("404 Not Found", "missing").await;
    let h = harness(&endpoint, None).await;
    let before = h.catalog.list();

    let err = h.service.refresh().await.unwrap_err();
    server.await.unwrap();

    match err {
        RefreshError::Fetch(FetchError::BadResponseStatus(status)) => {
            assert_eq!(status.as_u16(), 404);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(h.catalog.list(), before);
    assert!(h.repo.load_catalog().await.unwrap().is_none());
}

#[tokio::test]
async fn empty_and_malformed_bodies_are_distinguished() {
    let (endpoint, server) = serve_once("200 OK", "").await;
    let empty = local_source().fetch(&endpoint).await.unwrap_err();
    server.await.unwrap();
    assert!(matches!(empty, FetchError::EmptyBody));

    let (endpoint, server) = serve_once("200 OK", r#"{"quizzes": []}"#).await;
    let malformed = local_source().fetch(&endpoint).await.unwrap_err();
    server.await.unwrap();
    assert!(matches!(malformed, FetchError::MalformedPayload(_)));
}

#[tokio::test]
async fn refused_connection_is_not_connected() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = local_source()
        .fetch(&format!("http://{addr}/questions.json"))
        .await
        .unwrap_err();
    assert!(matches!(err, FetchError::NotConnected));
}

struct ReadOnlySnapshots;

#[async_trait]
impl CatalogRepository for ReadOnlySnapshots {
    async fn load_catalog(&self) -> Result<Option<Vec<Quiz>>, StorageError> {
        Ok(None)
    }

    async fn save_catalog(&self, _quizzes: &[Quiz]) -> Result<(), StorageError> {
        Err(StorageError::Io("read-only".into()))
    }
}

#[tokio::test]
async fn failed_snapshot_write_still_swaps_catalog() {
    let (endpoint, server) = serve_once("200 OK", FEED).await;
    let h = harness(&endpoint, Some(Arc::new(ReadOnlySnapshots))).await;

    let outcome = h.service.refresh().await.unwrap();
    server.await.unwrap();

    assert!(!outcome.snapshot_saved);
    assert_eq!(h.catalog.len(), 2);
}

#[tokio::test]
async fn session_in_progress_ignores_refresh() {
    let (endpoint, server) = serve_once("200 OK", FEED).await;
    let h = harness(&endpoint, None).await;
    let launcher = SessionLauncher::new(Arc::clone(&h.catalog));

    let mut session = launcher.start(0).unwrap();
    session.select(2).unwrap();
    session.submit().unwrap();

    h.service.refresh().await.unwrap();
    server.await.unwrap();

    assert_eq!(session.quiz().title(), "Mathematics");
    session.advance().unwrap();
    assert_eq!(
        session.current_question().unwrap().text(),
        "Medium: What is 12 ÷ 4 × 2?"
    );
    assert_eq!(launcher.start(0).unwrap().quiz().title(), "World Geography");
}

#[tokio::test]
async fn launch_refresh_pulls_feed_when_online() {
    let (endpoint, server) = serve_once("200 OK", FEED).await;
    let h = harness(&endpoint, None).await;

    let outcome = h.service.refresh_on_launch().await.unwrap();
    server.await.unwrap();

    assert_eq!(outcome.quiz_count, 2);
    assert_eq!(h.catalog.get(1).unwrap().title(), "Film Classics");
}

#[tokio::test]
async fn launch_refresh_failure_keeps_local_quizzes() {
    let (endpoint, server) = serve_once("500 Internal Server Error", "oops").await;
    let h = harness(&endpoint, None).await;
    let before = h.catalog.list();

    assert!(h.service.refresh_on_launch().await.is_none());
    server.await.unwrap();

    assert_eq!(h.catalog.list(), before);
}

#[tokio::test]
async fn launch_refresh_offline_sends_no_request() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/questions.json", listener.local_addr().unwrap());
    let h = build_harness(&endpoint, None, false).await;

    assert!(h.service.refresh_on_launch().await.is_none());

    let accepted =
        tokio::time::timeout(std::time::Duration::from_millis(100), listener.accept()).await;
    assert!(accepted.is_err(), "no connection should have been made");
    assert_eq!(h.catalog.len(), 3);
}

#[tokio::test]
async fn check_now_saves_endpoint_then_refreshes() {
    let h = harness("https://unused.example/q.json", None).await;
    let (endpoint, server) = serve_once("200 OK", FEED).await;

    let outcome = h.service.check_now(&endpoint).await.unwrap();
    server.await.unwrap();

    assert_eq!(outcome.quiz_count, 2);
    let saved = h.repo.get_settings().await.unwrap().unwrap();
    assert_eq!(saved.endpoint(), endpoint);
    assert_eq!(h.catalog.get(0).unwrap().title(), "World Geography");
}

#[tokio::test]
async fn check_now_rejects_bad_endpoint_before_fetching() {
    let h = harness("https://unused.example/q.json", None).await;
    let before = h.catalog.list();

    let err = h.service.check_now("ftp://example.com/q.json").await.unwrap_err();

    assert!(matches!(err, RefreshError::Settings(_)));
    let saved = h.repo.get_settings().await.unwrap().unwrap();
    assert_eq!(saved.endpoint(), "https://unused.example/q.json");
    assert_eq!(h.catalog.list(), before);
}
