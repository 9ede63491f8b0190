use quiz_core::defaults::default_quizzes;
use quiz_core::model::{SourceSettings, SourceSettingsDraft};
use storage::repository::{SettingsRepository, Storage};
use storage::sqlite::SqliteRepository;

#[tokio::test]
async fn sqlite_settings_start_empty_and_round_trip() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_settings?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    assert!(repo.get_settings().await.unwrap().is_none());

    let custom = SourceSettingsDraft::with_endpoint("https://quiz.example/feed.json")
        .validate()
        .unwrap();
    repo.save_settings(&custom).await.unwrap();
    assert_eq!(repo.get_settings().await.unwrap(), Some(custom));

    repo.save_settings(&SourceSettings::default()).await.unwrap();
    let reset = repo.get_settings().await.unwrap().unwrap();
    assert!(reset.is_default());
}

#[tokio::test]
async fn migrations_are_idempotent() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("first migrate");
    repo.migrate().await.expect("second migrate");

    let applied: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM schema_migrations")
        .fetch_one(repo.pool())
        .await
        .unwrap();
    assert_eq!(applied.0, 1);
}

#[tokio::test]
async fn storage_combines_sqlite_settings_and_file_snapshot() {
    let snapshot = std::env::temp_dir().join(format!(
        "quiz_storage_combined_{}.json",
        std::process::id()
    ));
    let _ = std::fs::remove_file(&snapshot);

    let storage = Storage::sqlite(
        "sqlite:file:memdb_combined?mode=memory&cache=shared",
        &snapshot,
    )
    .await
    .expect("open storage");

    assert!(storage.catalog.load_catalog().await.unwrap().is_none());

    let quizzes = default_quizzes().unwrap();
    storage.catalog.save_catalog(&quizzes).await.unwrap();
    let loaded = storage.catalog.load_catalog().await.unwrap().unwrap();
    assert_eq!(loaded, quizzes);

    let _ = std::fs::remove_file(&snapshot);
}
