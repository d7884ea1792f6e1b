//! Authentication primitives for the SSO service.
//!
//! - Password hashing (Argon2id)
//! - App-scoped JWT issuance and verification (HS256, one secret per app)
//!
//! The service crate defines its own ports and errors and adapts these
//! implementations, keeping the crypto free of storage and transport concerns.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("correct horse battery").unwrap();
//! assert!(hasher.verify("correct horse battery", &hash).unwrap());
//! assert!(!hasher.verify("wrong horse battery", &hash).unwrap());
//! ```
//!
//! ## App-scoped tokens
//! ```
//! use auth::TokenIssuer;
//! use chrono::Duration;
//!
//! let issuer = TokenIssuer::new();
//! let token = issuer
//!     .issue(1, 7, b"app_seven_secret", Duration::hours(1))
//!     .unwrap();
//!
//! let claims = issuer.verify(&token, 7, b"app_seven_secret").unwrap();
//! assert_eq!((claims.sub, claims.app), (1, 7));
//! assert!(issuer.verify(&token, 7, b"someone_elses_secret").is_err());
//! ```

pub mod issuer;
pub mod jwt;
pub mod password;

pub use issuer::TokenIssuer;
pub use jwt::AppClaims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use password::PasswordError;
pub use password::PasswordHasher;
