/// Everything that can go wrong while obtaining a contest's standings.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Connection error: is Codeforces.com down? ({0})")]
    Transport(#[from] reqwest::Error),
    #[error("Failed to fetch data. HTTP Status Code: {0}")]
    HttpStatus(u16),
    #[error("API returned an error: {comment}")]
    Api { comment: String },
    #[error("Codeforces API response doesn't match the expected schema: {0}")]
    Schema(String),
    #[error("Failed to access the standings cache")]
    CacheIo(#[from] std::io::Error),
    #[error("Standings cache holds malformed JSON")]
    CacheJson(#[from] serde_json::Error),
}
