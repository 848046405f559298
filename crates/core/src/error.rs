use thiserror::Error;

use crate::model::{LoadError, ResultError, ValidationError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error(transparent)]
    Result(#[from] ResultError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn layer_errors_convert_and_keep_their_message() {
        let err: Error = ValidationError::MissingCandidateName.into();
        assert_eq!(err.to_string(), "Name is required to start the test.");

        let err: Error = LoadError::Malformed("eof".into()).into();
        assert!(matches!(err, Error::Load(_)));
    }
}
