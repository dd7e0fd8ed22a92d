use std::collections::HashSet;
use std::sync::Arc;

use shortcut_generator::{RandomGenerator, RandomGeneratorSettings, ALPHABET};
use shortcut_storage::{InMemoryRepository, Repository, SqliteRepository, SqliteSettings};
use shortcut_store::{
    Alias, AliasStore, AliasStoreService, CreateParams, ErrorKind, StoreError, StoreSettings,
};
use tempfile::TempDir;

fn alias(s: &str) -> Alias {
    Alias::new(s).unwrap()
}

fn generator(length: usize) -> RandomGenerator {
    RandomGenerator::new(RandomGeneratorSettings::builder().length(length).build()).unwrap()
}

fn memory_store() -> AliasStoreService<InMemoryRepository, RandomGenerator> {
    AliasStoreService::new(InMemoryRepository::new(), generator(6))
}

async fn sqlite_store() -> (TempDir, AliasStoreService<SqliteRepository, RandomGenerator>) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.db");
    let settings = SqliteSettings::builder()
        .database_url(format!("sqlite://{}", path.display()))
        .build();
    let repo = SqliteRepository::connect(&settings).await.unwrap();
    (dir, AliasStoreService::new(repo, generator(6)))
}

async fn scenario<S: AliasStore>(store: &S) {
    let created = store
        .create(CreateParams::with_alias("https://example.com", alias("ex1")))
        .await
        .unwrap();
    assert_eq!(created.id, 1);

    assert_eq!(
        store.resolve(&alias("ex1")).await.unwrap(),
        "https://example.com"
    );

    let err = store
        .create(CreateParams::with_alias("https://other.com", alias("ex1")))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::AliasExists);
    assert_eq!(
        store.resolve(&alias("ex1")).await.unwrap(),
        "https://example.com"
    );

    store.delete(&alias("ex1")).await.unwrap();

    let err = store.resolve(&alias("ex1")).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));
    let err = store.delete(&alias("ex1")).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(_)));

    let recreated = store
        .create(CreateParams::with_alias("https://other.com", alias("ex1")))
        .await
        .unwrap();
    assert!(recreated.id > created.id);
    assert_eq!(
        store.resolve(&alias("ex1")).await.unwrap(),
        "https://other.com"
    );
}

async fn generated_aliases_are_unique<S: AliasStore>(store: &S) {
    let mut seen = HashSet::new();

    for i in 0..200 {
        let url = format!("https://example.com/{i}");
        let created = store.create(CreateParams::new(url.clone())).await.unwrap();

        assert_eq!(created.alias.as_str().len(), 6);
        assert!(created
            .alias
            .as_str()
            .bytes()
            .all(|b| ALPHABET.contains(&b)));
        assert!(seen.insert(created.alias.clone()), "duplicate alias");
        assert_eq!(store.resolve(&created.alias).await.unwrap(), url);
    }
}

#[tokio::test]
async fn scenario_in_memory() {
    scenario(&memory_store()).await;
}

#[tokio::test]
async fn scenario_sqlite() {
    let (_dir, store) = sqlite_store().await;
    scenario(&store).await;
}

#[tokio::test]
async fn generated_aliases_in_memory() {
    generated_aliases_are_unique(&memory_store()).await;
}

#[tokio::test]
async fn generated_aliases_sqlite() {
    let (_dir, store) = sqlite_store().await;
    generated_aliases_are_unique(&store).await;
}

#[tokio::test]
async fn never_created_alias_is_not_found() {
    let (_dir, store) = sqlite_store().await;

    assert_eq!(
        store.resolve(&alias("ghost")).await.unwrap_err().kind(),
        ErrorKind::NotFound
    );
    assert_eq!(
        store.delete(&alias("ghost")).await.unwrap_err().kind(),
        ErrorKind::NotFound
    );
}

#[tokio::test]
async fn tiny_alias_space_exhausts() {
    // Every one-character alias is taken, so each candidate collides.
    let repo = InMemoryRepository::new();
    for &b in ALPHABET.iter() {
        let taken = Alias::new_unchecked((b as char).to_string());
        repo.insert(&taken, "https://taken.example").await.unwrap();
    }

    let settings = StoreSettings::builder().max_attempts(3).build();
    let store = AliasStoreService::with_settings(repo, generator(1), settings).unwrap();

    let err = store
        .create(CreateParams::new("https://example.com"))
        .await
        .unwrap_err();
    assert!(matches!(err, StoreError::AliasSpaceExhausted { attempts: 3 }));
    assert!(err.kind().is_transient());
}

#[tokio::test]
async fn concurrent_explicit_creates_have_one_winner() {
    let (_dir, store) = sqlite_store().await;
    let store = Arc::new(store);
    let mut handles = vec![];

    for i in 0..8 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .create(CreateParams::with_alias(
                    format!("https://example{i}.com"),
                    alias("race"),
                ))
                .await
        }));
    }

    let mut winners = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => winners += 1,
            Err(err) => assert_eq!(err.kind(), ErrorKind::AliasExists),
        }
    }
    assert_eq!(winners, 1);
}

#[tokio::test]
async fn concurrent_generated_creates_all_succeed() {
    let store = Arc::new(memory_store());
    let mut handles = vec![];

    for i in 0..64 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .create(CreateParams::new(format!("https://example{i}.com")))
                .await
                .unwrap()
        }));
    }

    let mut aliases = HashSet::new();
    for handle in handles {
        aliases.insert(handle.await.unwrap().alias);
    }
    assert_eq!(aliases.len(), 64);
    assert_eq!(store.repository().len(), 64);
}
