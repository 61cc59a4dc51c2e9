use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ResiteError>;

#[derive(Debug, Error)]
pub enum ResiteError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Bad restriction site table: {0}")]
    Csv(#[from] csv::Error),
}

impl ResiteError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ResiteError::Io {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = ResiteError::io(
            "missing.fa",
            std::io::Error::new(std::io::ErrorKind::NotFound, "No such file"),
        );
        assert_eq!(err.to_string(), "missing.fa: No such file");
    }
}
