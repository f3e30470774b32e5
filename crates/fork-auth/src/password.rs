//! Password hashing material.
//!
//! The wire contract is fixed: clients hash `password + salt` with the
//! algorithm named by the account's `hashType` tag and submit the hex digest;
//! the server only ever compares precomputed hashes. SHA-256 is the single
//! supported algorithm, so the tag exists for forward compatibility rather
//! than negotiation.

use rand::Rng;
use sha2::{Digest, Sha256};

use fork_core::AccountSecurity;

/// Algorithm tag stored alongside every hash.
pub const HASH_TYPE_SHA256: &str = "SHA256";

const SALT_CHARS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
const SALT_LENGTH: usize = 80;

/// Generates a fresh 80-character salt from `[A-Z0-9]`.
///
/// # Examples
///
/// ```
/// use fork_auth::generate_salt;
///
/// let salt = generate_salt();
/// assert_eq!(salt.len(), 80);
/// assert!(salt.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
/// ```
pub fn generate_salt() -> String {
	let mut rng = rand::thread_rng();
	(0..SALT_LENGTH)
		.map(|_| SALT_CHARS[rng.gen_range(0..SALT_CHARS.len())] as char)
		.collect()
}

/// Lowercase hex SHA-256 digest of `input`.
///
/// # Examples
///
/// ```
/// use fork_auth::sha256_hex;
///
/// assert_eq!(
///     sha256_hex("abc"),
///     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
/// );
/// ```
pub fn sha256_hex(input: &str) -> String {
	let digest = Sha256::digest(input.as_bytes());
	digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Builds the stored security record for a new account from its initial
/// password, exactly as a client would compute the login hash later.
pub fn build_security(password: &str) -> AccountSecurity {
	let salt = generate_salt();
	let hash = sha256_hex(&format!("{password}{salt}"));
	AccountSecurity {
		hash,
		hash_type: HASH_TYPE_SHA256.to_string(),
		salt,
	}
}

/// Compares a submitted hash against the stored record.
pub fn verify_hash(security: &AccountSecurity, submitted_hash: &str) -> bool {
	security.hash == submitted_hash
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn salt_has_fixed_length_and_alphabet() {
		let salt = generate_salt();
		assert_eq!(salt.len(), SALT_LENGTH);
		assert!(salt.bytes().all(|b| SALT_CHARS.contains(&b)));
	}

	#[test]
	fn salts_are_not_repeated() {
		assert_ne!(generate_salt(), generate_salt());
	}

	#[test]
	fn sha256_known_vector() {
		// RFC 6234 test vector for "abc"
		assert_eq!(
			sha256_hex("abc"),
			"ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
		);
	}

	#[test]
	fn built_security_verifies_the_client_side_computation() {
		let security = build_security("margo");
		let client_hash = sha256_hex(&format!("margo{}", security.salt));

		assert_eq!(security.hash_type, HASH_TYPE_SHA256);
		assert!(verify_hash(&security, &client_hash));
		assert!(!verify_hash(&security, &sha256_hex("margo")));
	}
}
