#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid parameter: {0}")]
    InitParam(String),
    #[error("cannot detect language: {0}")]
    CantDetect(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
