use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("candidate #{position} has non-positive weight {weight}")]
    InvalidWeight { position: usize, weight: f64 },

    #[error("cannot sample {requested} winners")]
    InvalidArgument { requested: isize },

    #[error("uniform value {value} is outside of [0, 1)")]
    InvalidUniform { value: f64 },

    #[error("invalid candidate `{0}`, expected name=weight")]
    InvalidCandidate(String),

    #[error("failed to write report: {0}")]
    Report(String),
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Report(err.to_string())
    }
}
