// Validation outcome types shared by the reservation policy and handlers

/// A single failed rule. `field` names the input the message is about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

/// Ordered collection of failed rules. Empty means the input is acceptable.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(ValidationError {
            field: field.to_string(),
            message: message.into(),
        });
    }

    /// Appends the other result's errors after this one's, keeping order.
    pub fn merge(&mut self, other: ValidationResult) {
        self.errors.extend(other.errors);
    }

    /// The message shown to the user when only one can be displayed.
    pub fn primary_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }

    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    #[cfg(test)]
    pub fn has_error_for(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }
}

pub trait Validator<T> {
    fn validate(&self, data: &T) -> ValidationResult;
}
