use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire classifier module.
pub type Result<T> = std::result::Result<T, ClassifierErr>;

/// The classifier module's error type.
#[derive(Debug)]
pub enum ClassifierErr {
    ShapeMismatch {
        a: &'static str,
        b: &'static str,
        got: usize,
        expected: usize,
    },
    EmptyBatch,
}

impl Display for ClassifierErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ClassifierErr::ShapeMismatch {
                a,
                b,
                got,
                expected,
            } => {
                format!(
                    "There's a size mismatch between {a} and {b}, got {got} and expected {expected}"
                )
            }
            ClassifierErr::EmptyBatch => {
                "The given batch is empty, there's nothing to average over".to_string()
            }
        };

        write!(f, "{s}")
    }
}

impl Error for ClassifierErr {}
