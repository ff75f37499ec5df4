use crate::helpers::{TestApi, ok_body, row};
use cf_predict::data_processing::FetchError;
use cf_predict::predict::predict;
use claims::{assert_err, assert_none, assert_ok, assert_some};
use fake::Fake;
use fake::faker::number::en::NumberWithFormat;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[tokio::test]
async fn fetch_requests_the_first_500_rows() {
    // Arrange
    let app = TestApi::spawn().await;
    Mock::given(method("GET"))
        .and(path("/contest.standings"))
        .and(query_param("contestId", "566"))
        .and(query_param("from", "1"))
        .and(query_param("count", "500"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(566, vec![])))
        .expect(1)
        .mount(&app.server)
        .await;

    // Act
    let standings = assert_ok!(app.fetch(566).await);

    // Assert
    assert_eq!(standings.contest.id, 566);
    assert_eq!(standings.contest.name, "Codeforces Round #566");
    assert!(standings.participants.is_empty());
}

#[tokio::test]
async fn fetch_returns_typed_participants_in_source_order() {
    // Arrange
    let app = TestApi::spawn().await;
    let rows = vec![
        row("tourist", Some(3500), 1, 5000.),
        row("newbie", None, 2, 4000.),
        row("Petr", Some(3100), 3, 3500.),
    ];
    Mock::given(path("/contest.standings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(566, rows)))
        .mount(&app.server)
        .await;

    // Act
    let standings = assert_ok!(app.fetch(566).await);

    // Assert
    let handles: Vec<&str> = standings.preview_handles(10).collect();
    assert_eq!(handles, vec!["tourist", "newbie", "Petr"]);
    assert_eq!(standings.participants[1].rating, None);
    assert_eq!(standings.participants[2].rating, Some(3100));
    assert_eq!(standings.participants[2].raw_rank, 3);
}

#[tokio::test]
async fn failed_api_status_surfaces_the_comment() {
    // Arrange
    let app = TestApi::spawn().await;
    let contest_id: String = NumberWithFormat("9#####").fake();
    let comment = format!("contestId: Contest with id {} not found", contest_id);
    Mock::given(path("/contest.standings"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "status": "FAILED", "comment": comment })),
        )
        .mount(&app.server)
        .await;

    // Act
    let err = assert_err!(app.fetch(contest_id.parse().unwrap()).await);

    // Assert
    match err {
        FetchError::Api { comment: got } => assert_eq!(got, comment),
        other => panic!("Expected an API error, got {:?}", other),
    }
}

#[tokio::test]
async fn non_success_http_status_is_a_fetch_error() {
    // Arrange
    let app = TestApi::spawn().await;
    Mock::given(path("/contest.standings"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&app.server)
        .await;

    // Act
    let err = assert_err!(app.fetch(566).await);

    // Assert
    assert!(matches!(err, FetchError::HttpStatus(503)));
    assert_eq!(err.to_string(), "Failed to fetch data. HTTP Status Code: 503");
}

#[tokio::test]
async fn malformed_bodies_are_schema_errors() {
    // Arrange
    let app = TestApi::spawn().await;
    let test_cases = vec![
        (serde_json::json!({ "result": {} }), "missing status"),
        (
            serde_json::json!({ "status": "OK", "result": { "rows": [] } }),
            "missing contest",
        ),
        (
            ok_body(566, vec![row("a", Some(1500), 1, 1.), row("a", Some(1500), 2, 0.)]),
            "duplicate handle",
        ),
    ];

    for (body, description) in test_cases {
        app.server.reset().await;
        Mock::given(path("/contest.standings"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&app.server)
            .await;

        // Act
        let err = assert_err!(app.fetch(566).await);

        // Assert
        assert!(
            matches!(err, FetchError::Schema(_)),
            "The fetch did not fail with a schema error when the payload had {}.",
            description
        );
    }
}

#[tokio::test]
async fn fetched_standings_yield_a_prediction() {
    // Arrange
    let app = TestApi::spawn().await;
    let rows = vec![
        row("A", Some(3000), 1, 100.),
        row("guest", None, 2, 75.),
        row("B", Some(1000), 3, 50.),
    ];
    Mock::given(path("/contest.standings"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_body(566, rows)))
        .mount(&app.server)
        .await;

    // Act
    let standings = assert_ok!(app.fetch(566).await);

    // Assert
    let prediction = assert_some!(predict(&standings, "A"));
    assert_eq!(prediction.actual_rank, 1);
    assert_eq!(prediction.field_size, 2);
    assert_eq!(prediction.rounded_delta(), 20);
    assert_eq!(prediction.rounded_new_rating(), 3020);

    assert_none!(predict(&standings, "guest"));
    assert_none!(predict(&standings, "absent"));
}
