//! Credential adapters: bcrypt password hashing and JWT bearer tokens.

mod bcrypt_password_hasher;
mod jwt_token_service;

pub use bcrypt_password_hasher::{BCRYPT_COST_RANGE, BcryptPasswordHasher, DEFAULT_BCRYPT_COST};
pub use jwt_token_service::JwtTokenService;
