use crate::authenticator::AuthenticationError;
use crate::jwt::TokenClaims;
use crate::jwt::TokenCodec;
use crate::jwt::TokenKind;

const BEARER_SCHEME: &str = "Bearer";

/// Extract the token from an `Authorization` header value.
///
/// The value must be the `Bearer` scheme (any case), one space, and a
/// non-empty token with no further whitespace.
///
/// # Errors
/// * `MissingToken` - Header absent or not in `Bearer <token>` form
pub fn bearer_token(header: Option<&str>) -> Result<&str, AuthenticationError> {
    let (scheme, token) = header
        .and_then(|value| value.split_once(' '))
        .ok_or(AuthenticationError::MissingToken)?;

    if !scheme.eq_ignore_ascii_case(BEARER_SCHEME)
        || token.is_empty()
        || token.contains(char::is_whitespace)
    {
        return Err(AuthenticationError::MissingToken);
    }

    Ok(token)
}

/// Gate for protected operations.
///
/// Authorization depends only on the token's signed content and the clock;
/// no session or user state is consulted.
///
/// # Errors
/// * `MissingToken` - No usable bearer token in the header
/// * `Token` - Token is invalid or expired
/// * `WrongTokenKind` - A refresh token was presented
/// * `NotAuthorized` - The token's authorization flag is unset
pub fn authorize(
    codec: &TokenCodec,
    header: Option<&str>,
) -> Result<TokenClaims, AuthenticationError> {
    let token = bearer_token(header)?;
    let claims = codec.parse(token)?;

    if claims.kind != TokenKind::Access {
        return Err(AuthenticationError::WrongTokenKind {
            expected: TokenKind::Access,
            found: claims.kind,
        });
    }

    if !claims.authorized {
        return Err(AuthenticationError::NotAuthorized);
    }

    Ok(claims)
}
