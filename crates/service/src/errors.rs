use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn is_not_found(&self) -> bool { matches!(self, ServiceError::NotFound(_)) }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(m) => ServiceError::Validation(m),
            ModelError::NotFound(entity) => ServiceError::not_found(entity),
            ModelError::Db(m) => ServiceError::Db(m),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_not_found_stays_distinguishable() {
        let e: ServiceError = ModelError::NotFound("user").into();
        assert!(e.is_not_found());
        assert_eq!(e.to_string(), "not found: user not found");

        let e: ServiceError = ModelError::Db("boom".into()).into();
        assert!(!e.is_not_found());
    }
}
