//! JWT verification

use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use std::{fs, sync::Arc};

use super::token::{Claims, TokenValidator};
use crate::{config::JwtConfig, error::Error};

fn config_error(message: String) -> Error {
    Error::Config(Box::new(figment::Error::from(message)))
}

/// Verifies bearer tokens against a single key
#[derive(Clone)]
pub struct JwtAuth {
    decoding_key: Arc<DecodingKey>,
    validation: Validation,
}

impl JwtAuth {
    /// Build a verifier from configuration
    pub fn new(config: &JwtConfig) -> Result<Self, Error> {
        let algorithm = parse_algorithm(&config.algorithm)?;

        let key_bytes = match (&config.secret, &config.key_path) {
            (Some(secret), _) if is_hmac(algorithm) => secret.as_bytes().to_vec(),
            (_, Some(path)) => fs::read(path).map_err(|e| {
                config_error(format!(
                    "Failed to read JWT key from path '{}': {}",
                    path.display(),
                    e
                ))
            })?,
            _ => {
                return Err(config_error(format!(
                    "JWT {} needs {}",
                    config.algorithm,
                    if is_hmac(algorithm) {
                        "jwt.secret or jwt.key_path"
                    } else {
                        "a PEM public key at jwt.key_path"
                    }
                )))
            }
        };

        let decoding_key = match algorithm {
            Algorithm::RS256 | Algorithm::RS384 | Algorithm::RS512 => {
                DecodingKey::from_rsa_pem(&key_bytes)?
            }
            Algorithm::ES256 | Algorithm::ES384 => DecodingKey::from_ec_pem(&key_bytes)?,
            _ => DecodingKey::from_secret(&key_bytes),
        };

        let mut validation = Validation::new(algorithm);
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }
        if let Some(audience) = &config.audience {
            validation.set_audience(&[audience]);
        }

        Ok(Self {
            decoding_key: Arc::new(decoding_key),
            validation,
        })
    }

    /// HS256 verifier for a shared secret
    pub fn from_secret(secret: &[u8]) -> Self {
        Self {
            decoding_key: Arc::new(DecodingKey::from_secret(secret)),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl TokenValidator for JwtAuth {
    fn validate_token(&self, token: &str) -> Result<Claims, Error> {
        let token_data = decode::<Claims>(token, &self.decoding_key, &self.validation)?;
        Ok(token_data.claims)
    }
}

fn is_hmac(algorithm: Algorithm) -> bool {
    matches!(
        algorithm,
        Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512
    )
}

fn parse_algorithm(name: &str) -> Result<Algorithm, Error> {
    match name.to_uppercase().as_str() {
        "RS256" => Ok(Algorithm::RS256),
        "RS384" => Ok(Algorithm::RS384),
        "RS512" => Ok(Algorithm::RS512),
        "ES256" => Ok(Algorithm::ES256),
        "ES384" => Ok(Algorithm::ES384),
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        alg => Err(config_error(format!("Unsupported JWT algorithm: {}", alg))),
    }
}
