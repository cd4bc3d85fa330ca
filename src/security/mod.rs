pub mod cookie;
pub mod password;
pub mod token;

pub use cookie::{AUTH_COOKIE, CookieSettings};
pub use password::{hash_password, verify_password};
pub use token::{Claims, TOKEN_TTL_DAYS, TokenKeys};
