use chrono::Duration;
use quiz_core::model::{Question, QuestionSet};
use quiz_core::time::fixed_now;
use storage::repository::{QuestionCacheRepository, Storage};
use storage::sqlite::SqliteRepository;

fn build_set() -> QuestionSet {
    QuestionSet::new(vec![
        Question::new(
            "perro",
            vec!["いぬ".into(), "ねこ".into(), "とり".into()],
            "いぬ",
            "Animales",
        )
        .unwrap(),
        Question::new(
            "madre",
            vec!["はは".into(), "ちち".into()],
            "はは",
            "Familia",
        )
        .unwrap(),
    ])
}

#[tokio::test]
async fn sqlite_roundtrip_preserves_question_order_and_timestamp() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_cache_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");

    let set = build_set();
    repo.store_set("remote", &set, fixed_now()).await.unwrap();

    let cached = repo.load_set("remote").await.unwrap().expect("cached set");
    assert_eq!(cached.key, "remote");
    assert_eq!(cached.set, set);
    assert_eq!(cached.fetched_at, fixed_now());
    assert_eq!(cached.set.filter_category("familia").len(), 1);
}

#[tokio::test]
async fn sqlite_store_overwrites_existing_key() {
    let storage = Storage::sqlite("sqlite:file:memdb_cache_overwrite?mode=memory&cache=shared")
        .await
        .expect("storage");
    let cache = storage.question_cache;

    cache.store_set("remote", &build_set(), fixed_now()).await.unwrap();
    let later = fixed_now() + Duration::hours(1);
    let smaller = QuestionSet::new(build_set().into_questions().into_iter().take(1).collect());
    cache.store_set("remote", &smaller, later).await.unwrap();

    let cached = cache.load_set("remote").await.unwrap().unwrap();
    assert_eq!(cached.set.len(), 1);
    assert_eq!(cached.fetched_at, later);
}

#[tokio::test]
async fn sqlite_missing_key_and_clear() {
    let repo = SqliteRepository::connect("sqlite:file:memdb_cache_clear?mode=memory&cache=shared")
        .await
        .expect("connect");
    repo.migrate().await.expect("migrate");
    // Running migrations twice is a no-op.
    repo.migrate().await.expect("migrate again");

    assert!(repo.load_set("nothing").await.unwrap().is_none());
    repo.store_set("remote", &build_set(), fixed_now()).await.unwrap();
    assert!(repo.clear("remote").await.unwrap());
    assert!(!repo.clear("remote").await.unwrap());
    assert!(repo.load_set("remote").await.unwrap().is_none());
}
