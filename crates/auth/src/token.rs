//! Signed session tokens.

use folio_core::auth::{AuthError, Claims};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};

/// HS256 encoder/decoder for [`Claims`].
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl TokenCodec {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);

        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }

    pub fn encode(&self, claims: &Claims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| AuthError::Crypto(e.to_string()))
    }

    /// Verifies the signature and claim shape.
    ///
    /// Expiry is left to the caller via [`Claims::is_expired`] so that an
    /// expired token still identifies the session to log out.
    pub fn decode(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use folio_core::auth::new_session;

    use super::*;

    fn claims_expiring_in(ttl: Duration) -> Claims {
        let now = Utc::now();
        Claims::for_session(&new_session(9, now - Duration::hours(1), ttl))
    }

    #[test]
    fn round_trips_valid_claims() {
        let codec = TokenCodec::new("secret");
        let claims = claims_expiring_in(Duration::days(2));

        let token = codec.encode(&claims).unwrap();

        assert_eq!(codec.decode(&token).unwrap(), claims);
    }

    #[test]
    fn expired_token_still_decodes_its_claims() {
        let codec = TokenCodec::new("secret");
        let token = codec.encode(&claims_expiring_in(Duration::minutes(30))).unwrap();

        let claims = codec.decode(&token).unwrap();
        assert!(claims.is_expired(Utc::now()));
    }

    #[test]
    fn garbled_token_is_invalid() {
        let codec = TokenCodec::new("secret");
        assert!(matches!(
            codec.decode("not.a.token"),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn token_signed_with_another_secret_is_invalid() {
        let token = TokenCodec::new("other")
            .encode(&claims_expiring_in(Duration::days(2)))
            .unwrap();

        assert!(matches!(
            TokenCodec::new("secret").decode(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }
}
