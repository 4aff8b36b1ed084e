//! Integration tests for bookgraph against a live Neo4j instance (with the
//! APOC and GDS plugins for the period/similarity tests).
//!
//! Run with: cargo test --package bookgraph --test integration -- --ignored
//!
//! Skipped automatically if Neo4j is not available.

use bookgraph::{GraphClient, GraphConfig, GraphError};

async fn connect_or_skip() -> Option<GraphClient> {
    let config = GraphConfig::default();
    match GraphClient::connect(&config).await {
        Ok(client) => Some(client),
        Err(e) => {
            eprintln!("Skipping integration test (Neo4j not available): {e}");
            None
        }
    }
}

async fn wipe(client: &GraphClient) {
    let q = neo4rs::query("MATCH (n) DETACH DELETE n");
    let _ = client.inner().run(q).await;
}

async fn count_readers(client: &GraphClient, name: &str, surname: &str) -> i64 {
    let q = neo4rs::query(
        "MATCH (r:Reader {name: $name, surname: $surname}) RETURN count(r) AS cnt",
    )
    .param("name", name.to_string())
    .param("surname", surname.to_string());
    let mut stream = client.inner().execute(q).await.unwrap();
    let row = stream.next().await.unwrap().unwrap();
    row.get::<i64>("cnt").unwrap()
}

/// Seed a small library: one author, one publisher, two books, two readers.
async fn seed_small_library(client: &GraphClient) {
    client.create_author("Lucy", "Montgomery").await.unwrap();
    client.create_publisher("PWN").await.unwrap();
    client
        .create_book(
            "Ania z Zielonego wzgórza",
            1908,
            "obyczajowe",
            "Lucy",
            "Montgomery",
            "PWN",
        )
        .await
        .unwrap();
    client
        .create_book("Ania z Avonlea", 1909, "obyczajowe", "Lucy", "Montgomery", "PWN")
        .await
        .unwrap();
    client.create_reader("Jan", "Kowalski").await.unwrap();
    client.create_reader("Julia", "Kamyk").await.unwrap();
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_reader_create_delete_round_trip() {
    let Some(client) = connect_or_skip().await else {
        return;
    };

    client.create_reader("Alicja", "Polaszewska").await.unwrap();
    assert_eq!(count_readers(&client, "Alicja", "Polaszewska").await, 1);

    client.delete_reader("Alicja", "Polaszewska").await.unwrap();
    assert_eq!(count_readers(&client, "Alicja", "Polaszewska").await, 0);
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_author_books_lists_created_titles() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    wipe(&client).await;
    seed_small_library(&client).await;

    let titles = client.author_books("Lucy", "Montgomery").await.unwrap();
    assert_eq!(titles.len(), 2);
    assert!(titles.contains(&"Ania z Zielonego wzgórza".to_string()));
    assert!(titles.contains(&"Ania z Avonlea".to_string()));

    wipe(&client).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_rating_feeds_co_read_and_top_rated() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    wipe(&client).await;
    seed_small_library(&client).await;

    client
        .rate_book("Jan", "Kowalski", 9.0, "Ania z Zielonego wzgórza")
        .await
        .unwrap();
    client
        .rate_book("Julia", "Kamyk", 8.5, "Ania z Zielonego wzgórza")
        .await
        .unwrap();
    client
        .rate_book("Julia", "Kamyk", 10.0, "Ania z Avonlea")
        .await
        .unwrap();

    let co = client.co_read("Ania z Zielonego wzgórza").await.unwrap();
    assert_eq!(co.len(), 1);
    assert_eq!(co[0].title, "Ania z Avonlea");
    assert_eq!(co[0].occurrences, 1);

    let top = client.top_rated_books().await.unwrap();
    assert!(!top.is_empty());
    assert_eq!(top[0].title, "Ania z Avonlea");
    assert!((top[0].mean_mark - 10.0).abs() < f64::EPSILON);

    wipe(&client).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_books_by_year_and_category_orders_by_year() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    wipe(&client).await;
    seed_small_library(&client).await;

    let matches = client
        .books_by_year_and_category(1900, 1910, "obyczajowe")
        .await
        .unwrap();
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].year, 1908);
    assert_eq!(matches[1].year, 1909);

    let none = client
        .books_by_year_and_category(1900, 1910, "fantasy")
        .await
        .unwrap();
    assert!(none.is_empty());

    wipe(&client).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j"]
async fn test_publisher_book_counts() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    wipe(&client).await;
    seed_small_library(&client).await;

    let counts = client.publisher_book_counts().await.unwrap();
    assert_eq!(counts.len(), 1);
    assert_eq!(counts[0].publisher, "PWN");
    assert_eq!(counts[0].books, 2);

    wipe(&client).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j with APOC"]
async fn test_literary_period_assignment() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    wipe(&client).await;
    seed_small_library(&client).await;

    let rows = client.assign_literary_periods().await.unwrap();
    assert_eq!(rows.len(), 2);
    // Both seeded books fall in 1890..1918.
    for row in &rows {
        assert_eq!(row.period, "Młoda Polska");
    }

    let described = client.literary_period_descriptions().await.unwrap();
    assert_eq!(described.len(), 2);
    for row in &described {
        assert!(row.description.as_deref().unwrap_or("").contains("Młoda Polska"));
    }

    wipe(&client).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j with GDS"]
async fn test_similarity_pipeline_produces_report_and_drops_projection() {
    let Some(client) = connect_or_skip().await else {
        return;
    };
    wipe(&client).await;
    seed_small_library(&client).await;

    client
        .rate_book("Jan", "Kowalski", 9.0, "Ania z Zielonego wzgórza")
        .await
        .unwrap();
    client
        .rate_book("Julia", "Kamyk", 8.5, "Ania z Zielonego wzgórza")
        .await
        .unwrap();

    let report = client.similar_readers("Jan", "Kowalski").await.unwrap();
    assert!(report.knn.nodes_compared > 0);
    assert!(report.recommendations.len() <= 5);

    // The named projection must be gone afterwards.
    let q = neo4rs::query("CALL gds.graph.exists('read_books') YIELD exists RETURN exists");
    let mut stream = client.inner().execute(q).await.unwrap();
    let row = stream.next().await.unwrap().unwrap();
    assert!(!row.get::<bool>("exists").unwrap());

    wipe(&client).await;
}

#[tokio::test]
#[ignore = "requires live Neo4j with GDS"]
async fn test_failing_write_statement_surfaces_one_query_error() {
    let Some(client) = connect_or_skip().await else {
        return;
    };

    // Make sure no projection is left over from an earlier run, then drop
    // again through the catalog: the store rejects dropping a projection
    // that does not exist, so this drives a write statement to failure on
    // a connected client. The caller must observe exactly one error (the
    // logged-then-reraised store failure), not a silent no-op.
    let cleanup = neo4rs::query("CALL gds.graph.drop('read_books', false) YIELD graphName");
    let _ = client.inner().run(cleanup).await;

    let bound = bookgraph::catalog::bind(&bookgraph::catalog::SIMILARITY_DROP, vec![]).unwrap();
    let err = client.execute(bound).await.err().unwrap();
    assert!(matches!(err, GraphError::Query(_)));
}

#[tokio::test]
async fn test_unreachable_store_surfaces_connection_error() {
    // No listener on this port: connect must fail with a Connection error,
    // not hang or panic.
    let config = GraphConfig {
        uri: "bolt://127.0.0.1:1".to_string(),
        ..GraphConfig::default()
    };
    let err = GraphClient::connect(&config).await.err().unwrap();
    assert!(matches!(err, GraphError::Connection(_)));
}
