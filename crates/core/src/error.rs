use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    #[error("Invalid settings path '{path}': must have at least two levels, got {segments}")]
    InvalidPath { path: String, segments: usize },
}

pub type Result<T> = std::result::Result<T, CoreError>;
