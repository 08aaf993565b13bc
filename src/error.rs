use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatrustError {
    #[error("Dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },
    #[error("Index ({row}, {col}) out of range for a {num_rows}x{num_cols} matrix")]
    IndexOutOfRange {
        row: usize,
        col: usize,
        num_rows: usize,
        num_cols: usize,
    },
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
    #[error("Singular matrix: {0}")]
    SingularMatrix(String),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[cfg(feature = "io")]
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl MatrustError {
    pub fn dimension_mismatch(expected: (usize, usize), actual: (usize, usize)) -> Self {
        Self::DimensionMismatch { expected, actual }
    }

    pub fn index_out_of_range(row: usize, col: usize, shape: (usize, usize)) -> Self {
        Self::IndexOutOfRange {
            row,
            col,
            num_rows: shape.0,
            num_cols: shape.1,
        }
    }

    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn singular(msg: impl Into<String>) -> Self {
        Self::SingularMatrix(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, MatrustError>;
