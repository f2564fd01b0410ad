use thiserror::Error;

/// Error type for job submission and persistence.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JobError {
    /// No job record exists for the given identifier
    #[error("Job not found: {0}")]
    NotFound(String),

    /// The job repository failed to read or write a record
    #[error("Job storage error: {0}")]
    Storage(String),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for JobError {
    fn from(err: String) -> Self {
        JobError::Other(err)
    }
}

impl From<&str> for JobError {
    fn from(err: &str) -> Self {
        JobError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let errors = vec![
            (
                JobError::NotFound("a1b2".to_string()),
                "Job not found: a1b2",
            ),
            (
                JobError::Storage("connection lost".to_string()),
                "Job storage error: connection lost",
            ),
            (JobError::Other("other".to_string()), "other"),
        ];

        for (error, expected) in errors {
            assert_eq!(error.to_string(), expected);
        }
    }
}
