use std::fmt;
use std::str::FromStr;

use uuid::Uuid;

use crate::user::errors::EmailError;
use crate::user::errors::NameError;
use crate::user::errors::PasswordError;
use crate::user::errors::UserIdError;

/// User aggregate entity.
///
/// Carries the password hash, so it never leaves the service boundary;
/// responses are built from [`UserProfile`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: DisplayName,
    pub email: EmailAddress,
    pub password_hash: String,
}

impl User {
    /// Project the user onto its public fields.
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// User without credentials.
///
/// The only user shape handed to callers outside the domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: UserId,
    pub name: DisplayName,
    pub email: EmailAddress,
}

/// User unique identifier type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub Uuid);

impl UserId {
    /// Generate a new random user ID.
    ///
    /// # Returns
    /// UserId with random UUID v4
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a user ID from string.
    ///
    /// # Errors
    /// * `InvalidFormat` - String is not a valid UUID
    pub fn from_string(s: &str) -> Result<Self, UserIdError> {
        Uuid::parse_str(s)
            .map(UserId)
            .map_err(|e| UserIdError::InvalidFormat(e.to_string()))
    }
}

impl Default for UserId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name value type
///
/// Surrounding whitespace is trimmed; the result must be 1-64 characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayName(String);

impl DisplayName {
    const MAX_LENGTH: usize = 64;

    /// Create a new valid display name.
    ///
    /// # Errors
    /// * `Empty` - Name is blank
    /// * `TooLong` - Name longer than 64 characters
    pub fn new(name: String) -> Result<Self, NameError> {
        let name = name.trim();
        let length = name.chars().count();

        if length == 0 {
            Err(NameError::Empty)
        } else if length > Self::MAX_LENGTH {
            Err(NameError::TooLong {
                max: Self::MAX_LENGTH,
                actual: length,
            })
        } else {
            Ok(Self(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DisplayName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Email address type
///
/// Trimmed and lower-cased on construction, so two addresses differing only
/// in case are the same account. Format is validated with an RFC 5322 parser.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Create a new normalised email address.
    ///
    /// # Errors
    /// * `InvalidFormat` - Email does not conform to RFC 5322
    pub fn new(email: String) -> Result<Self, EmailError> {
        let email = email.trim().to_lowercase();

        email_address::EmailAddress::from_str(&email)
            .map(|_| EmailAddress(email))
            .map_err(|e| EmailError::InvalidFormat(e.to_string()))
    }

    /// Get email as string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Plaintext password supplied by a caller.
///
/// Kept only long enough to hash or verify. `Debug` never prints the value.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(String);

impl Password {
    /// # Errors
    /// * `Empty` - Password is the empty string
    pub fn new(password: String) -> Result<Self, PasswordError> {
        if password.is_empty() {
            return Err(PasswordError::Empty);
        }
        Ok(Self(password))
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(<redacted>)")
    }
}

/// Command to register a new user with domain types
#[derive(Debug)]
pub struct RegisterUserCommand {
    pub name: DisplayName,
    pub email: EmailAddress,
    pub password: Password,
}

impl RegisterUserCommand {
    /// Construct a new register command.
    ///
    /// # Arguments
    /// * `name` - Validated display name
    /// * `email` - Normalised email address
    /// * `password` - Plain text password (will be hashed by service)
    pub fn new(name: DisplayName, email: EmailAddress, password: Password) -> Self {
        Self {
            name,
            email,
            password,
        }
    }
}

/// Login attempt.
///
/// Raw strings on purpose: a malformed email must fail the same way as an
/// unknown one, so validation happens inside the service.
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for LoginCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCommand")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Outcome of a successful registration or login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthSession {
    pub profile: UserProfile,
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalised() {
        let email = EmailAddress::new("  Alice@Example.COM ".to_string()).unwrap();
        assert_eq!(email.as_str(), "alice@example.com");
    }

    #[test]
    fn test_invalid_email_rejected() {
        assert!(EmailAddress::new("not-an-email".to_string()).is_err());
        assert!(EmailAddress::new("".to_string()).is_err());
    }

    #[test]
    fn test_display_name_trimmed() {
        let name = DisplayName::new("  A  ".to_string()).unwrap();
        assert_eq!(name.as_str(), "A");
    }

    #[test]
    fn test_display_name_bounds() {
        assert_eq!(DisplayName::new("   ".to_string()), Err(NameError::Empty));
        assert!(DisplayName::new("x".repeat(64)).is_ok());
        assert_eq!(
            DisplayName::new("x".repeat(65)),
            Err(NameError::TooLong {
                max: 64,
                actual: 65
            })
        );
    }

    #[test]
    fn test_password_debug_redacted() {
        let password = Password::new("hunter2".to_string()).unwrap();
        assert!(!format!("{:?}", password).contains("hunter2"));
        assert_eq!(Password::new(String::new()), Err(PasswordError::Empty));
    }

    #[test]
    fn test_profile_drops_hash() {
        let user = User {
            id: UserId::new(),
            name: DisplayName::new("A".to_string()).unwrap(),
            email: EmailAddress::new("a@x.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
        };

        let profile = user.profile();
        assert_eq!(profile.id, user.id);
        assert_eq!(profile.email.as_str(), "a@x.com");
        assert!(!format!("{:?}", profile).contains("argon2"));
    }
}
