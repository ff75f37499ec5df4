use crate::helpers::{TestApi, ok_body, row};
use claims::assert_ok;
use wiremock::matchers::path;
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn cached_standings_are_fetched_once() {
    // Arrange
    let app = TestApi::spawn().await;
    let dir = tempfile::tempdir().expect("Failed to create a temporary directory");
    let cache_dir = dir.path().join("codeforces");
    Mock::given(path("/contest.standings"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ok_body(566, vec![row("tourist", Some(3500), 1, 10.)])),
        )
        .expect(1)
        .mount(&app.server)
        .await;

    // Act
    let first = assert_ok!(app.fetch_cached(566, &cache_dir).await);
    let second = assert_ok!(app.fetch_cached(566, &cache_dir).await);

    // Assert
    assert!(cache_dir.join("566_1_500.json").exists());
    assert_eq!(first.participants, second.participants);
    assert_eq!(second.contest.name, "Codeforces Round #566");
}

#[tokio::test]
async fn failed_fetches_leave_no_cache_entry() {
    // Arrange
    let app = TestApi::spawn().await;
    let dir = tempfile::tempdir().expect("Failed to create a temporary directory");
    Mock::given(path("/contest.standings"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&app.server)
        .await;

    // Act
    let result = app.fetch_cached(566, dir.path()).await;

    // Assert
    assert!(result.is_err());
    assert!(!dir.path().join("566_1_500.json").exists());
}
