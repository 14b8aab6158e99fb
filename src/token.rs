//! Bearer tokens.
//!
//! A token is the JWT signing input `base64url(header).base64url(claims)` for
//! the `none` algorithm. It carries no signature, so anyone can mint one:
//! treat it as an identity hint, not as proof of authentication. Deployments
//! that rely on it for access control need a signed algorithm and a key.

use crate::store::User;
use base64ct::{Base64UrlUnpadded, Encoding};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ALGORITHM: &str = "none";

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("invalid token format")]
    Format,
    #[error("invalid base64url encoding")]
    Base64,
    #[error("invalid json")]
    Json(#[from] serde_json::Error),
    #[error("unsupported algorithm: {0}")]
    UnsupportedAlg(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Header {
    pub alg: String,
    pub typ: String,
}

impl Default for Header {
    fn default() -> Self {
        Self {
            alg: ALGORITHM.to_string(),
            typ: "JWT".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub login: String,
}

fn b64e_json<T: Serialize>(value: &T) -> Result<String, TokenError> {
    let json = serde_json::to_vec(value)?;
    Ok(Base64UrlUnpadded::encode_string(&json))
}

fn b64d_json<T: for<'de> Deserialize<'de>>(s: &str) -> Result<T, TokenError> {
    let bytes = Base64UrlUnpadded::decode_vec(s).map_err(|_| TokenError::Base64)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Encode `user.login` into a token.
///
/// # Errors
/// Returns [`TokenError::Json`] if the header or claims fail to serialize.
pub fn issue(user: &User) -> Result<String, TokenError> {
    let header = b64e_json(&Header::default())?;
    let claims = b64e_json(&Claims {
        login: user.login.clone(),
    })?;

    Ok(format!("{header}.{claims}"))
}

/// Read the claims back out of a token. Accepts an empty trailing signature
/// segment (`h.c.`) as well as the two-segment form produced by [`issue`].
///
/// # Errors
/// Returns an error if the token is not a well-formed `none` token.
pub fn decode(token: &str) -> Result<Claims, TokenError> {
    let mut parts = token.split('.');
    let (Some(header), Some(claims)) = (parts.next(), parts.next()) else {
        return Err(TokenError::Format);
    };

    match (parts.next(), parts.next()) {
        (None | Some(""), None) => {}
        _ => return Err(TokenError::Format),
    }

    let header: Header = b64d_json(header)?;
    if header.alg != ALGORITHM {
        return Err(TokenError::UnsupportedAlg(header.alg));
    }

    b64d_json(claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_decodes_to_login() -> Result<(), TokenError> {
        let token = issue(&User::new("alice"))?;
        let claims = decode(&token)?;
        assert_eq!(
            claims,
            Claims {
                login: "alice".to_string()
            }
        );
        Ok(())
    }

    #[test]
    fn issued_token_matches_none_signing_input() -> Result<(), TokenError> {
        let token = issue(&User::new("alice"))?;
        // {"alg":"none","typ":"JWT"} . {"login":"alice"}
        assert_eq!(
            token,
            "eyJhbGciOiJub25lIiwidHlwIjoiSldUIn0.eyJsb2dpbiI6ImFsaWNlIn0"
        );
        Ok(())
    }

    #[test]
    fn claims_contain_only_login() -> Result<(), TokenError> {
        let token = issue(&User::new("alice"))?;
        let payload = token.split('.').nth(1).ok_or(TokenError::Format)?;
        let value: serde_json::Value = b64d_json(payload)?;
        assert_eq!(value, serde_json::json!({ "login": "alice" }));
        Ok(())
    }

    #[test]
    fn decode_accepts_empty_signature_segment() -> Result<(), TokenError> {
        let token = format!("{}.", issue(&User::new("bob"))?);
        assert_eq!(decode(&token)?.login, "bob");
        Ok(())
    }

    #[test]
    fn decode_rejects_signed_tokens() -> Result<(), TokenError> {
        let header = b64e_json(&Header {
            alg: "HS256".to_string(),
            typ: "JWT".to_string(),
        })?;
        let claims = b64e_json(&Claims {
            login: "mallory".to_string(),
        })?;
        let result = decode(&format!("{header}.{claims}"));
        assert!(matches!(result, Err(TokenError::UnsupportedAlg(alg)) if alg == "HS256"));

        let with_signature = format!("{}.c2ln", issue(&User::new("mallory"))?);
        assert!(matches!(decode(&with_signature), Err(TokenError::Format)));
        Ok(())
    }

    #[test]
    fn decode_rejects_garbage() {
        assert!(matches!(decode("nodots"), Err(TokenError::Format)));
        assert!(matches!(decode("a.b.c.d"), Err(TokenError::Format)));
        assert!(matches!(decode("!!!.???"), Err(TokenError::Base64)));
    }
}
