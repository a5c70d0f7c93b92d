use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {entity} with {field}={value}")]
    NotFound {
        entity: &'static str,
        field: &'static str,
        value: String,
    },

    #[error("Validation: {0}")]
    Validation(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Duplicate horse: {0}")]
    DuplicateHorse(String),

    #[error("Stable '{stable}' is full ({current}/{capacity})")]
    StableFull {
        stable: String,
        current: u64,
        capacity: i32,
    },

    #[error("Storage error: {0}")]
    Storage(String),
}

impl DomainError {
    pub fn not_found(entity: &'static str, id: i32) -> Self {
        DomainError::NotFound {
            entity,
            field: "id",
            value: id.to_string(),
        }
    }

    /// Whether the request was well-formed but violates a business
    /// invariant (name clash, duplicate horse, full stable).
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            DomainError::Conflict(_) | DomainError::DuplicateHorse(_) | DomainError::StableFull { .. }
        )
    }
}

impl From<sea_orm::DbErr> for DomainError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::Storage(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum InfraError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
}

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflict_variants_are_grouped() {
        assert!(DomainError::Conflict("Stable 'North'".into()).is_conflict());
        assert!(DomainError::DuplicateHorse("Arrow".into()).is_conflict());
        assert!(DomainError::StableFull {
            stable: "North".into(),
            current: 2,
            capacity: 2
        }
        .is_conflict());
        assert!(!DomainError::Validation("age".into()).is_conflict());
        assert!(!DomainError::not_found("Horse", 7).is_conflict());
    }

    #[test]
    fn not_found_message() {
        let e = DomainError::not_found("Stable", 42);
        assert_eq!(e.to_string(), "Not found: Stable with id=42");
    }

    #[test]
    fn stable_full_message() {
        let e = DomainError::StableFull {
            stable: "North".into(),
            current: 3,
            capacity: 3,
        };
        assert_eq!(e.to_string(), "Stable 'North' is full (3/3)");
    }
}
