//! Error types for feature onboarding.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors a plugin may return from `execute_internal`.
///
/// None of these escape the execution wrapper: they are converted into a
/// failed [`crate::FeatureOnboardingResult`].
#[derive(Debug, Error)]
pub enum FeatureOnboardingError {
    /// The onboarding context is missing required scope
    #[error("Invalid onboarding context: {reason}")]
    InvalidContext {
        /// Reason the context was rejected
        reason: String,
    },

    /// Data-store access failed
    #[error("Repository error: {message}")]
    Repository {
        /// Error message
        message: String,
        /// Source error from the data store
        #[source]
        source: Option<BoxError>,
    },

    /// A whole seeding category could not be processed
    #[error("Seeding failed for {category}: {message}")]
    Seeding {
        /// Seeded category name
        category: String,
        /// Error message
        message: String,
    },

    /// Internal error
    #[error("Internal error: {message}")]
    Internal {
        /// Error message
        message: String,
        /// Source error
        #[source]
        source: Option<BoxError>,
    },
}

impl FeatureOnboardingError {
    /// Create an invalid-context error.
    #[must_use]
    pub fn invalid_context(reason: impl Into<String>) -> Self {
        Self::InvalidContext {
            reason: reason.into(),
        }
    }

    /// Create a repository error with a message only.
    #[must_use]
    pub fn repository(message: impl Into<String>) -> Self {
        Self::Repository {
            message: message.into(),
            source: None,
        }
    }

    /// Create a repository error with a source error.
    #[must_use]
    pub fn repository_with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Repository {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a seeding error for a category.
    #[must_use]
    pub fn seeding(category: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Seeding {
            category: category.into(),
            message: message.into(),
        }
    }

    /// Create an internal error with a message only.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            source: None,
        }
    }
}
