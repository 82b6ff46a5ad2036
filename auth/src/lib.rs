//! Authentication primitives for the account service.
//!
//! - Password hashing and verification (Argon2id, PHC strings)
//! - Identity tokens: HS256 JWTs binding a subject for a fixed validity window
//!
//! Nothing here touches storage or HTTP; the service owns those concerns and
//! adapts these types at its own boundaries.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! assert!(!hasher.verify("not_my_password", &hash).unwrap());
//! ```
//!
//! ## Identity Tokens
//! ```
//! use auth::TokenAuthority;
//!
//! let authority = TokenAuthority::new(b"secret_key_at_least_32_bytes_long!");
//! let token = authority.issue("user123").unwrap();
//! let claims = authority.verify(&token).unwrap();
//! assert_eq!(claims.sub, "user123");
//! ```

pub mod password;
pub mod token;

pub use password::PasswordError;
pub use password::PasswordHasher;
pub use token::Claims;
pub use token::TokenAuthority;
pub use token::TokenError;
pub use token::TOKEN_VALIDITY_HOURS;
