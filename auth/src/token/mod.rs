pub mod authority;
pub mod claims;
pub mod errors;

pub use authority::TokenAuthority;
pub use authority::TOKEN_VALIDITY_HOURS;
pub use claims::Claims;
pub use errors::TokenError;
