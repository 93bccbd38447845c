use std::{
    error::Error,
    fmt::{self, Display},
};

/// The result type used in the entire crate.
pub type Result<T> = std::result::Result<T, TrainErr>;

/// The crate's error type.
#[derive(Debug, Clone, PartialEq)]
pub enum TrainErr {
    /// A hyperparameter or input set is unusable, detected before training starts.
    InvalidConfiguration(String),
    /// Two sizes that must agree do not.
    DimensionMismatch {
        what: &'static str,
        got: usize,
        expected: usize,
    },
    /// A label outside of `{0, 1}`.
    InvalidLabel { index: usize, value: f32 },
    /// A sampling distribution could not be built from the given parameters.
    Distribution(String),
    /// A configuration file could not be read.
    Io(String),
    /// A configuration file is not valid JSON for the expected type.
    Parse(String),
}

impl TrainErr {
    pub(crate) fn invalid_config<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}

impl Display for TrainErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrainErr::InvalidConfiguration(msg) => write!(f, "invalid configuration: {msg}"),
            TrainErr::DimensionMismatch {
                what,
                got,
                expected,
            } => write!(
                f,
                "dimension mismatch for {what}: got {got}, expected {expected}"
            ),
            TrainErr::InvalidLabel { index, value } => {
                write!(f, "sample {index} has label {value}, expected 0 or 1")
            }
            TrainErr::Distribution(msg) => write!(f, "invalid distribution: {msg}"),
            TrainErr::Io(msg) => write!(f, "io error: {msg}"),
            TrainErr::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl Error for TrainErr {}

impl From<rand_distr::NormalError> for TrainErr {
    fn from(value: rand_distr::NormalError) -> Self {
        Self::Distribution(value.to_string())
    }
}

impl From<rand::distr::uniform::Error> for TrainErr {
    fn from(value: rand::distr::uniform::Error) -> Self {
        Self::Distribution(value.to_string())
    }
}

impl From<serde_json::Error> for TrainErr {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_mismatch_message_names_both_sizes() {
        let err = TrainErr::DimensionMismatch {
            what: "batch features",
            got: 3,
            expected: 5,
        };

        assert_eq!(
            err.to_string(),
            "dimension mismatch for batch features: got 3, expected 5"
        );
    }
}
