//! Authentication core
//!
//! Stateless session primitives shared by the user service:
//! - Password hashing (Argon2id)
//! - Signed session tokens with typed claims (HS256 JWT)
//! - Bearer-token authorization of protected calls
//! - Login and refresh coordination
//!
//! Nothing in this crate performs I/O or logs; every failure is returned to
//! the caller.
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
//! ```
//!
//! ## Session Tokens
//! ```
//! use auth::{TokenCodec, TokenKind};
//! use chrono::Duration;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec.issue("alice@example.com", TokenKind::Access, Duration::minutes(5)).unwrap();
//! let claims = codec.parse(&token).unwrap();
//! assert_eq!(claims.subject(), "alice@example.com");
//! ```
//!
//! ## Complete Authentication Flow
//! ```
//! use auth::{Authenticator, TokenCodec, TokenLifetimes};
//!
//! let auth = Authenticator::new(
//!     TokenCodec::new(b"secret_key_at_least_32_bytes_long!"),
//!     TokenLifetimes::default(),
//! );
//!
//! // Register: hash password
//! let hash = auth.hash_password("password123").unwrap();
//!
//! // Login: verify and issue the token pair
//! let pair = auth.authenticate("password123", &hash, "alice@example.com").unwrap();
//!
//! // Protected call: authorize with the access token
//! let header = format!("Bearer {}", pair.access_token);
//! let claims = auth.authorize(Some(&header)).unwrap();
//! assert_eq!(claims.subject(), "alice@example.com");
//!
//! // Later: trade the refresh token for a new access token
//! let access = auth.refresh(&pair.refresh_token).unwrap();
//! assert!(!access.is_empty());
//! ```

pub mod authenticator;
pub mod guard;
pub mod jwt;
pub mod password;

// Re-export commonly used items
pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authenticator::LifetimesError;
pub use authenticator::TokenLifetimes;
pub use authenticator::TokenPair;
pub use jwt::TokenClaims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use jwt::TokenKind;
pub use password::HashingError;
pub use password::PasswordHasher;
