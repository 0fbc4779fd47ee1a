use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("cannot access {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("scene file ended early, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("line {line}: expected {expected}, found `{token}`")]
    InvalidToken {
        line: usize,
        token: String,
        expected: &'static str,
    },

    #[error("invalid scene: {0}")]
    InvalidScene(String),

    #[error("failed to encode image: {0}")]
    Image(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, RenderError>;
