#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("Not enough questions to generate {requested}. Got {found}.")]
    InsufficientBank { requested: usize, found: usize },
    #[error("{0}")]
    Generation(String),
    #[error("{0}")]
    InvalidBank(String),
    // Froms
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}
