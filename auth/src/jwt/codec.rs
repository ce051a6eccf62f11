use chrono::Duration;
use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::TokenClaims;
use super::claims::TokenKind;
use super::errors::TokenError;

/// Tokens are always signed and verified with this algorithm; a token whose
/// header names anything else is rejected before its signature is checked.
const ALGORITHM: Algorithm = Algorithm::HS256;

/// Signs and parses session tokens with a single symmetric secret.
///
/// The secret is injected at construction and never exposed again; share the
/// codec (usually behind an `Arc`) rather than the secret.
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    has_secret: bool,
}

impl TokenCodec {
    /// Create a codec keyed with `secret`.
    ///
    /// An empty secret is accepted here but every later `issue`/`parse`
    /// fails with `MissingSecret`.
    ///
    /// # Arguments
    /// * `secret` - Symmetric signing key
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(ALGORITHM);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            has_secret: !secret.is_empty(),
        }
    }

    /// Issue a signed token of `kind` for `subject`, valid for `ttl`.
    ///
    /// # Arguments
    /// * `subject` - Identity the token is bound to
    /// * `kind` - Access or refresh
    /// * `ttl` - Validity window starting now
    ///
    /// # Returns
    /// Compact JWS string (`header.payload.signature`)
    ///
    /// # Errors
    /// * `MissingSecret` - Codec was built without a secret
    /// * `SigningFailed` - Token encoding failed or the expiry is out of range
    pub fn issue(&self, subject: &str, kind: TokenKind, ttl: Duration) -> Result<String, TokenError> {
        self.encode(&TokenClaims::new(subject, kind, ttl)?)
    }

    /// Sign prepared claims.
    ///
    /// # Arguments
    /// * `claims` - Claims to sign as-is
    ///
    /// # Returns
    /// Compact JWS string
    ///
    /// # Errors
    /// * `MissingSecret` - Codec was built without a secret
    /// * `SigningFailed` - Token encoding failed
    pub fn encode(&self, claims: &TokenClaims) -> Result<String, TokenError> {
        if !self.has_secret {
            return Err(TokenError::MissingSecret);
        }

        encode(&Header::new(ALGORITHM), claims, &self.encoding_key)
            .map_err(|e| TokenError::SigningFailed(e.to_string()))
    }

    /// Verify a token and return its claims.
    ///
    /// # Arguments
    /// * `token` - Compact JWS string
    ///
    /// # Returns
    /// Decoded claims of a correctly signed, unexpired token
    ///
    /// # Errors
    /// * `MissingSecret` - Codec was built without a secret
    /// * `Invalid` - Malformed token, bad signature, unexpected algorithm or
    ///   claims that do not match `TokenClaims` exactly
    /// * `Expired` - Signature is valid but `exp` is not in the future
    pub fn parse(&self, token: &str) -> Result<TokenClaims, TokenError> {
        if !self.has_secret {
            return Err(TokenError::MissingSecret);
        }

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })?;

        // jsonwebtoken still accepts `exp == now`
        if token_data.claims.is_expired(Utc::now().timestamp()) {
            return Err(TokenError::Expired);
        }

        Ok(token_data.claims)
    }
}
