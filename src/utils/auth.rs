use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::env;

/// Session marker minted at login. Carries the office scope every module
/// reads. There is no expiry: the marker is trusted until logout clears the
/// cookie.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // office id
    pub office_code: String,
    pub admin_name: String,
    pub role: String,
    pub iat: i64,
}

impl Claims {
    pub fn new(office_id: String, office_code: String, admin_name: String, role: String) -> Self {
        Self {
            sub: office_id,
            office_code,
            admin_name,
            role,
            iat: Utc::now().timestamp(),
        }
    }
}

pub fn create_token(claims: &Claims) -> Result<String, jsonwebtoken::errors::Error> {
    let secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
}

pub fn verify_token(token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

    // No exp claim on the marker, so expiry validation is off
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.required_spec_claims.clear();

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_secret() {
        env::set_var("JWT_SECRET", "test-secret");
    }

    #[test]
    fn token_round_trips_the_session_fields() {
        set_secret();
        let claims = Claims::new(
            "9".to_string(),
            "DEL01".to_string(),
            "Asha".to_string(),
            "Admin".to_string(),
        );
        let token = create_token(&claims).unwrap();
        let decoded = verify_token(&token).unwrap();
        assert_eq!(decoded.sub, "9");
        assert_eq!(decoded.office_code, "DEL01");
        assert_eq!(decoded.admin_name, "Asha");
        assert_eq!(decoded.role, "Admin");
    }

    #[test]
    fn tampered_token_is_rejected() {
        set_secret();
        let claims = Claims::new(
            "9".to_string(),
            "DEL01".to_string(),
            "Asha".to_string(),
            "Admin".to_string(),
        );
        let mut token = create_token(&claims).unwrap();
        token.push('x');
        assert!(verify_token(&token).is_err());
    }

    #[test]
    fn garbage_is_rejected() {
        set_secret();
        assert!(verify_token("not-a-token").is_err());
    }
}
