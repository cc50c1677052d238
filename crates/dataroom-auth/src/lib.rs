//! # dataroom-auth
//!
//! Authentication primitives for Dataroom: stateless JWT access/refresh
//! tokens and Argon2id password hashing. Session identity is carried
//! entirely in the token; there is no server-side session store.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, JwtDecoder, JwtEncoder};
pub use password::PasswordHasher;
