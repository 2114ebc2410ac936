//! JWT Token Handler
//! Mission: Issue and verify admin tokens with no hidden state

use crate::auth::models::{Claims, ADMIN_ROLE};
use anyhow::{bail, Context, Result};
use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use tracing::debug;

/// Token issuer/verifier for the single admin identity.
///
/// Fully determined by the injected secret, lifetime, and admin email;
/// tests construct handlers with arbitrary values.
pub struct JwtHandler {
    secret: String,
    expire_minutes: i64,
    admin_email: String,
}

impl JwtHandler {
    pub fn new(secret: String, expire_minutes: i64, admin_email: String) -> Self {
        Self {
            secret,
            expire_minutes,
            admin_email,
        }
    }

    /// Issue a signed token for the admin identity.
    pub fn issue_token(&self) -> Result<String> {
        let expiration = Utc::now()
            .checked_add_signed(chrono::Duration::minutes(self.expire_minutes))
            .context("Invalid timestamp")?
            .timestamp() as usize;

        let claims = Claims {
            sub: self.admin_email.clone(),
            role: ADMIN_ROLE.to_string(),
            exp: expiration,
        };

        debug!(
            "Issuing admin token for {}, expires in {}m",
            self.admin_email, self.expire_minutes
        );

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .context("Failed to generate JWT")
    }

    /// Verify signature and expiry, then confirm the claims name the
    /// configured admin. The claim checks reject structurally valid tokens
    /// for any other identity; forgery is already ruled out by the signature.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::default();
        validation.leeway = 0; // expiry is a hard boundary

        let decoded = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation,
        )
        .context("Invalid or expired token")?;

        let claims = decoded.claims;
        if claims.role != ADMIN_ROLE || claims.sub != self.admin_email {
            bail!("Token does not belong to the configured admin");
        }

        debug!("Validated admin token for {}", claims.sub);

        Ok(claims)
    }
}
