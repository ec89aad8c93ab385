//! Typed form schemas and validation.
//!
//! Raw form payloads are validated into typed records before any state
//! mutation or network call. Validation failures carry field-level
//! messages so the host can mark the offending inputs.

use std::str::FromStr;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use agrolink_core::{Email, Role};

/// Minimum password length accepted at registration.
const MIN_PASSWORD_LENGTH: usize = 6;

/// One field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Form field name (e.g., "email").
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// A form failed validation; no mutation or request was made.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("validation failed: {}", .errors.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

impl ValidationError {
    fn from_errors(errors: Vec<FieldError>) -> Result<(), Self> {
        if errors.is_empty() {
            Ok(())
        } else {
            Err(Self { errors })
        }
    }
}

// =============================================================================
// Login
// =============================================================================

/// Raw login form payload.
#[derive(Debug, Default)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub role: String,
}

/// Validated login credentials ready for the auth service.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    pub email: Email,
    pub password: SecretString,
    pub role: Role,
}

impl LoginForm {
    /// Validate into typed credentials.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` with one entry per failing field.
    pub fn validate(self) -> Result<LoginCredentials, ValidationError> {
        let mut errors = Vec::new();

        let email = required_email("email", &self.email, &mut errors);
        if self.password.is_empty() {
            errors.push(FieldError::new("password", "This field is required"));
        }
        let role = required_role("role", &self.role, &mut errors);

        ValidationError::from_errors(errors)?;
        // Both are Some once no errors were recorded.
        match (email, role) {
            (Some(email), Some(role)) => Ok(LoginCredentials {
                email,
                password: SecretString::from(self.password),
                role,
            }),
            _ => unreachable!("fields validated above"),
        }
    }
}

// =============================================================================
// Registration
// =============================================================================

/// Raw registration form payload.
#[derive(Debug, Default)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    pub full_name: String,
    pub role: String,
    pub phone: String,
    pub location: String,
    pub business_name: String,
    pub business_type: String,
    pub address: String,
}

/// Validated registration payload ready for the auth service.
#[derive(Debug, Clone)]
pub struct RegistrationRequest {
    pub email: Email,
    pub password: SecretString,
    pub full_name: String,
    pub role: Role,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub business_name: Option<String>,
    pub business_type: Option<String>,
    pub address: Option<String>,
}

impl RegisterForm {
    /// Validate into a typed registration request.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` with one entry per failing field.
    pub fn validate(self) -> Result<RegistrationRequest, ValidationError> {
        let mut errors = Vec::new();

        let email = required_email("email", &self.email, &mut errors);

        if self.password.is_empty() {
            errors.push(FieldError::new("password", "This field is required"));
        } else if self.password.len() < MIN_PASSWORD_LENGTH {
            errors.push(FieldError::new(
                "password",
                format!("Password must be at least {MIN_PASSWORD_LENGTH} characters"),
            ));
        }
        if self.confirm_password != self.password {
            errors.push(FieldError::new("confirm_password", "Passwords do not match"));
        }

        let full_name = self.full_name.trim();
        if full_name.is_empty() {
            errors.push(FieldError::new("full_name", "This field is required"));
        }

        let role = required_role("role", &self.role, &mut errors);
        if let Some(role) = role
            && !role.self_registerable()
        {
            errors.push(FieldError::new("role", "Invalid role selected"));
        }

        ValidationError::from_errors(errors)?;
        match (email, role) {
            (Some(email), Some(role)) => Ok(RegistrationRequest {
                email,
                password: SecretString::from(self.password),
                full_name: full_name.to_owned(),
                role,
                phone: optional(self.phone),
                location: optional(self.location),
                business_name: optional(self.business_name),
                business_type: optional(self.business_type),
                address: optional(self.address),
            }),
            _ => unreachable!("fields validated above"),
        }
    }
}

// =============================================================================
// Shipping
// =============================================================================

/// Raw checkout shipping form payload.
#[derive(Debug, Default)]
pub struct ShippingForm {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub location: String,
    pub note: String,
}

/// Validated shipping details attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingDetails {
    pub full_name: String,
    pub phone: String,
    pub address: String,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl ShippingForm {
    /// Validate into typed shipping details.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` with one entry per failing field.
    pub fn validate(self) -> Result<ShippingDetails, ValidationError> {
        let mut errors = Vec::new();

        for (field, value) in [
            ("full_name", &self.full_name),
            ("phone", &self.phone),
            ("address", &self.address),
            ("location", &self.location),
        ] {
            if value.trim().is_empty() {
                errors.push(FieldError::new(field, "This field is required"));
            }
        }

        ValidationError::from_errors(errors)?;
        Ok(ShippingDetails {
            full_name: self.full_name.trim().to_owned(),
            phone: self.phone.trim().to_owned(),
            address: self.address.trim().to_owned(),
            location: self.location.trim().to_owned(),
            note: optional(self.note),
        })
    }
}

// =============================================================================
// Shared helpers
// =============================================================================

fn required_email(field: &'static str, value: &str, errors: &mut Vec<FieldError>) -> Option<Email> {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "This field is required"));
        return None;
    }
    match Email::parse(value.trim()) {
        Ok(email) => Some(email),
        Err(e) => {
            errors.push(FieldError::new(field, e.to_string()));
            None
        }
    }
}

fn required_role(field: &'static str, value: &str, errors: &mut Vec<FieldError>) -> Option<Role> {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "This field is required"));
        return None;
    }
    match Role::from_str(value.trim()) {
        Ok(role) => Some(role),
        Err(_) => {
            errors.push(FieldError::new(field, "Invalid role selected"));
            None
        }
    }
}

fn optional(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}

/// Expose a password for transport to the auth service.
///
/// Centralized so password exposure sites are easy to audit.
#[must_use]
pub fn expose_password(password: &SecretString) -> &str {
    password.expose_secret()
}
