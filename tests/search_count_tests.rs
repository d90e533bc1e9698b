//! Search popularity counting and the trending list.

use marquee::domain::MovieId;
use marquee::models::Movie;
use marquee::services::{SearchCountTracker, TrendingQuery};
use marquee::store::{MemoryRowStore, StoreError};
use serde_json::{Map, Value, json};
use std::sync::Arc;
use std::time::Duration;

const TABLE: &str = "metrics";
const IMAGE_BASE: &str = "https://image.tmdb.org/t/p/w500";

fn movie(id: i64, title: &str) -> Movie {
    Movie {
        id: MovieId::new(id),
        title: title.to_string(),
        poster_path: Some("/x.jpg".to_string()),
        ..Movie::default()
    }
}

fn tracker(store: &Arc<MemoryRowStore>) -> SearchCountTracker {
    SearchCountTracker::new(store.clone(), TABLE, IMAGE_BASE)
}

fn columns(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object"),
    }
}

async fn seed_term(store: &MemoryRowStore, id: &str, term: &str, count: i64) {
    store
        .seed(
            TABLE,
            id,
            columns(json!({
                "searchTerm": term,
                "count": count,
                "title": term.to_uppercase(),
                "movie_id": count,
                "poster_path": ""
            })),
        )
        .await;
}

#[tokio::test]
async fn first_search_creates_one_record() {
    let store = Arc::new(MemoryRowStore::new());
    let tracker = tracker(&store);

    tracker
        .record_search("batman", &movie(100, "Batman"))
        .await
        .unwrap();

    let rows = store.rows(TABLE).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("searchTerm"), Some(&json!("batman")));
    assert_eq!(rows[0].get("count"), Some(&json!(1)));
    assert_eq!(rows[0].get("movie_id"), Some(&json!(100)));
    assert_eq!(rows[0].get("title"), Some(&json!("Batman")));
    assert_eq!(
        rows[0].get("poster_path"),
        Some(&json!("https://image.tmdb.org/t/p/w500/x.jpg"))
    );
    assert_eq!(store.writes(), 1);
}

#[tokio::test]
async fn repeat_searches_increment_the_count() {
    let store = Arc::new(MemoryRowStore::new());
    let tracker = tracker(&store);
    let batman = movie(100, "Batman");

    for _ in 0..4 {
        tracker.record_search("batman", &batman).await.unwrap();
    }

    let rows = store.rows(TABLE).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("count"), Some(&json!(4)));
    // One write per call.
    assert_eq!(store.writes(), 4);
}

#[tokio::test]
async fn increment_keeps_the_original_display_fields() {
    let store = Arc::new(MemoryRowStore::new());
    let tracker = tracker(&store);

    tracker
        .record_search("batman", &movie(100, "Batman"))
        .await
        .unwrap();
    tracker
        .record_search("batman", &movie(414_906, "The Batman"))
        .await
        .unwrap();

    let rows = store.rows(TABLE).await;
    assert_eq!(rows[0].get("title"), Some(&json!("Batman")));
    assert_eq!(rows[0].get("movie_id"), Some(&json!(100)));
}

#[tokio::test]
async fn missing_count_is_treated_as_zero() {
    let store = Arc::new(MemoryRowStore::new());
    store
        .seed(
            TABLE,
            "legacy",
            columns(json!({"searchTerm": "dune", "movie_id": 438_631, "title": "Dune"})),
        )
        .await;

    tracker(&store)
        .record_search("dune", &movie(438_631, "Dune"))
        .await
        .unwrap();

    let rows = store.rows(TABLE).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("count"), Some(&json!(1)));
}

#[tokio::test]
async fn duplicate_terms_update_the_first_row() {
    let store = Arc::new(MemoryRowStore::new());
    seed_term(&store, "first", "alien", 3).await;
    seed_term(&store, "second", "alien", 8).await;

    tracker(&store)
        .record_search("alien", &movie(348, "Alien"))
        .await
        .unwrap();

    let rows = store.rows(TABLE).await;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].get("count"), Some(&json!(4)));
    assert_eq!(rows[1].get("count"), Some(&json!(8)));
}

#[tokio::test]
async fn store_errors_are_returned_unchanged() {
    let store = Arc::new(MemoryRowStore::new());
    store.set_unavailable(true);

    let err = tracker(&store)
        .record_search("batman", &movie(100, "Batman"))
        .await
        .unwrap_err();

    assert!(matches!(err, StoreError::Api { status: 503, .. }));
}

#[tokio::test]
async fn concurrent_searches_on_one_tracker_do_not_lose_counts() {
    let store = Arc::new(MemoryRowStore::new().with_latency(Duration::from_millis(2)));
    let tracker = Arc::new(tracker(&store));
    let batman = Arc::new(movie(100, "Batman"));

    let mut handles = Vec::new();
    for _ in 0..5 {
        let tracker = Arc::clone(&tracker);
        let batman = Arc::clone(&batman);
        handles.push(tokio::spawn(async move {
            tracker.record_search("batman", &batman).await
        }));
    }

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let rows = store.rows(TABLE).await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get("count"), Some(&json!(5)));
}

#[tokio::test]
async fn trending_returns_top_five_by_count() {
    let store = Arc::new(MemoryRowStore::new());
    for (id, term, count) in [
        ("a", "alien", 3),
        ("b", "batman", 9),
        ("c", "cars", 1),
        ("d", "dune", 9),
        ("e", "elf", 4),
        ("f", "fargo", 7),
        ("g", "gattaca", 2),
    ] {
        seed_term(&store, id, term, count).await;
    }

    let trending = TrendingQuery::new(store.clone(), TABLE)
        .list_trending()
        .await
        .unwrap();

    let counts: Vec<i64> = trending.iter().map(|r| r.count).collect();
    assert_eq!(counts, vec![9, 9, 7, 4, 3]);
    assert_eq!(trending[0].search_term, "batman");
    assert_eq!(trending[0].title, "BATMAN");
}

#[tokio::test]
async fn trending_reflects_recorded_searches() {
    let store = Arc::new(MemoryRowStore::new());
    let tracker = tracker(&store);

    for _ in 0..3 {
        tracker.record_search("dune", &movie(438_631, "Dune")).await.unwrap();
    }
    tracker.record_search("up", &movie(14_160, "Up")).await.unwrap();

    let trending = TrendingQuery::new(store.clone(), TABLE)
        .list_trending()
        .await
        .unwrap();

    assert_eq!(trending.len(), 2);
    assert_eq!(trending[0].search_term, "dune");
    assert_eq!(trending[0].count, 3);
    assert_eq!(trending[0].movie_id, MovieId::new(438_631));
    assert_eq!(trending[1].count, 1);
}

#[tokio::test]
async fn trending_is_none_when_the_store_fails() {
    let store = Arc::new(MemoryRowStore::new());
    let trending = TrendingQuery::new(store.clone(), TABLE);

    assert_eq!(trending.list_trending().await, Some(vec![]));

    store.set_unavailable(true);
    assert_eq!(trending.list_trending().await, None);
}

#[tokio::test]
async fn blank_search_terms_are_not_recorded() {
    let store = Arc::new(MemoryRowStore::new());
    let tracker = tracker(&store);

    tracker.record_search("", &movie(100, "Batman")).await.unwrap();
    tracker.record_search("   ", &movie(100, "Batman")).await.unwrap();

    assert!(store.rows(TABLE).await.is_empty());
    assert_eq!(store.reads(), 0);
    assert_eq!(store.writes(), 0);
}
