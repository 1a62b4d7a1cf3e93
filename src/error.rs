use std::fmt;

/// Row/column extent of a matrix, used in error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub rows: usize,
    pub cols: usize,
}

impl Shape {
    pub fn new(rows: usize, cols: usize) -> Shape {
        Shape { rows, cols }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Every failure the library can report.
///
/// All of them are fatal to the operation that raised them; the training loop
/// propagates them to its caller instead of skipping the offending batch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Operands of a binary operation have incompatible dimensions.
    #[error("shape mismatch in {op}: {left} vs {right}")]
    ShapeMismatch {
        op: &'static str,
        left: Shape,
        right: Shape,
    },

    /// Element access outside the declared bounds.
    #[error("index ({row}, {col}) out of range for {shape} matrix")]
    IndexOutOfRange { row: usize, col: usize, shape: Shape },

    /// Row slice `[start, end)` does not fit in the matrix.
    #[error("row range {start}..{end} out of range for matrix with {rows} rows")]
    RowRangeOutOfRange { start: usize, end: usize, rows: usize },

    /// Unknown activation/loss/initializer name, bad hyper-parameter or malformed file header.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Logarithm requested for a value below the numeric floor.
    #[error("log undefined for value {value} (below 1e-7)")]
    DomainError { value: f64 },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidArgument(msg.into())
    }

    pub(crate) fn shape(op: &'static str, left: Shape, right: Shape) -> Self {
        Error::ShapeMismatch { op, left, right }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
