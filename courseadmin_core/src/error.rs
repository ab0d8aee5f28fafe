use sea_orm::DbErr;
use thiserror::Error;
use zel_core::prelude::ResourceError;

/// Rejected input at create/update time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{entity}: `{field}` is required")]
    MissingField {
        entity: &'static str,
        field: &'static str,
    },

    #[error("unknown module status `{0}` (expected published, coming_soon or locked)")]
    InvalidStatus(String),

    #[error("{entity} {id} does not exist")]
    MissingParent { entity: &'static str, id: String },
}

#[derive(Debug, Error)]
pub enum RepoError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("data store unavailable")]
    Transport(#[from] DbErr),
}

impl RepoError {
    pub(crate) fn not_found(entity: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

pub type RepoResult<T> = Result<T, RepoError>;

impl From<RepoError> for ResourceError {
    fn from(error: RepoError) -> Self {
        match error {
            RepoError::Transport(error) => ResourceError::infra(error),
            error => ResourceError::app(error),
        }
    }
}

/// Fails with `MissingField` when a required text field is empty or whitespace.
pub(crate) fn require_text(
    entity: &'static str,
    field: &'static str,
    value: &str,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField { entity, field });
    }
    Ok(())
}

/// Same as [`require_text`] for patch fields, where `None` means "leave as is".
pub(crate) fn require_patch_text(
    entity: &'static str,
    field: &'static str,
    value: Option<&String>,
) -> Result<(), ValidationError> {
    match value {
        Some(value) => require_text(entity, field, value),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_text_is_missing() {
        assert_eq!(
            require_text("module", "title", "   "),
            Err(ValidationError::MissingField {
                entity: "module",
                field: "title"
            })
        );
        assert!(require_text("module", "title", "Intro").is_ok());
    }

    #[test]
    fn absent_patch_field_is_accepted() {
        assert!(require_patch_text("flashcard", "answer", None).is_ok());
        assert!(require_patch_text("flashcard", "answer", Some(&String::new())).is_err());
    }

    #[test]
    fn not_found_message_names_entity() {
        let err = RepoError::not_found("quiz", "abc");
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "quiz not found: abc");
    }
}
