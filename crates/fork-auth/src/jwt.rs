//! Signed bearer tokens.
//!
//! Tokens are HS256 with a fixed issuer/audience pair and a 60-minute
//! validity window. Signature and claim checks are delegated to
//! `jsonwebtoken`; this module only pins the deployment constants and maps
//! failures onto the shared error taxonomy.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use fork_core::{Account, AccountRole, Error, Result};

/// Issuer claim on every access token.
pub const JWT_ISSUER: &str = "ForkSecurity";
/// Audience claim on every access token.
pub const JWT_AUDIENCE: &str = "Fork-Back";
/// Access token validity window in minutes.
pub const JWT_ACCESS_MINUTES: i64 = 60;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
	/// Account id, stringified.
	pub sub: String,
	pub role: AccountRole,
	/// Account login (email).
	pub upn: String,
	pub given_name: String,
	pub family_name: String,
	pub iss: String,
	pub aud: String,
	pub iat: i64,
	pub exp: i64,
}

/// An issued token together with its expiry instant.
#[derive(Debug, Clone)]
pub struct AccessToken {
	pub token: String,
	pub valid_to: DateTime<Utc>,
}

/// Issues and validates access tokens for one signing key.
pub struct TokenIssuer {
	encoding_key: EncodingKey,
	decoding_key: DecodingKey,
	validation: Validation,
}

impl TokenIssuer {
	/// Creates an issuer from the shared HS256 secret.
	///
	/// # Examples
	///
	/// ```
	/// use fork_auth::TokenIssuer;
	///
	/// let issuer = TokenIssuer::new(b"test-signing-key");
	/// ```
	pub fn new(secret: &[u8]) -> Self {
		let mut validation = Validation::new(Algorithm::HS256);
		validation.set_issuer(&[JWT_ISSUER]);
		validation.set_audience(&[JWT_AUDIENCE]);

		Self {
			encoding_key: EncodingKey::from_secret(secret),
			decoding_key: DecodingKey::from_secret(secret),
			validation,
		}
	}

	/// Issues a token for `account`, valid for the fixed window from `now`.
	pub fn issue(&self, account: &Account, now: DateTime<Utc>) -> Result<AccessToken> {
		let valid_to = now + Duration::minutes(JWT_ACCESS_MINUTES);
		let claims = Claims {
			sub: account.id.to_string(),
			role: account.role,
			upn: account.login.clone(),
			given_name: account.first_name.clone(),
			family_name: account.last_name.clone(),
			iss: JWT_ISSUER.to_string(),
			aud: JWT_AUDIENCE.to_string(),
			iat: now.timestamp(),
			exp: valid_to.timestamp(),
		};

		let token = encode(&Header::default(), &claims, &self.encoding_key)
			.map_err(|e| Error::Unauthorized(e.to_string()))?;

		Ok(AccessToken { token, valid_to })
	}

	/// Verifies signature, expiry, issuer, and audience, returning the claims.
	pub fn verify(&self, token: &str) -> Result<Claims> {
		decode::<Claims>(token, &self.decoding_key, &self.validation)
			.map(|data| data.claims)
			.map_err(|e| Error::Unauthorized(e.to_string()))
	}
}
