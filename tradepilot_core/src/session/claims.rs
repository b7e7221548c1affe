use chrono::Utc;
use jsonwebtoken::{decode, DecodingKey, Validation};

use super::dto::Claims;

/// Decode the claims payload of a bearer token without verifying the
/// signature. The client holds no key material; the server is the
/// verifier. Expiry is also not enforced here, callers compare `exp`
/// against the clock at point of use.
pub fn decode_claims(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::default();
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.set_required_spec_claims::<&str>(&[]);
    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}

/// Whether the token's `exp` claim has passed. A token that fails to
/// decode is NOT expired: undecodable tokens already fail the
/// authentication check on their own, and reporting them as expired
/// here would mask that failure mode.
pub fn is_expired(token: &str) -> bool {
    match decode_claims(token) {
        Ok(claims) => claims.exp <= Utc::now().timestamp(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn mint(exp: i64) -> String {
        let claims = Claims {
            user_id: 42,
            username: "satoshi".to_string(),
            local_currency: "USD".to_string(),
            exp,
            iat: Utc::now().timestamp(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn decodes_claims_without_key() {
        let token = mint(Utc::now().timestamp() + 3600);
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.username, "satoshi");
        assert_eq!(claims.local_currency, "USD");
    }

    #[test]
    fn expired_token_still_decodes() {
        let token = mint(Utc::now().timestamp() - 3600);
        assert!(decode_claims(&token).is_ok());
        assert!(is_expired(&token));
    }

    #[test]
    fn future_exp_is_not_expired() {
        let token = mint(Utc::now().timestamp() + 3600);
        assert!(!is_expired(&token));
    }

    #[test]
    fn malformed_token_is_not_expired() {
        assert!(decode_claims("not-a-token").is_err());
        assert!(!is_expired("not-a-token"));
        assert!(!is_expired(""));
        assert!(!is_expired("a.b.c"));
    }
}
