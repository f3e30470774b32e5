//! Security service for fork-back.
//!
//! Two concerns live here: the password hashing material stored per account
//! ([`password`]) and the signed bearer tokens handed out on login ([`jwt`]).
//! Both are thin wrappers over external primitives — `sha2` and
//! `jsonwebtoken` do the actual cryptography.

pub mod jwt;
pub mod password;

pub use jwt::{AccessToken, Claims, TokenIssuer};
pub use password::{HASH_TYPE_SHA256, build_security, generate_salt, sha256_hex, verify_hash};
