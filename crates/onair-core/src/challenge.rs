use hmac::{Hmac, Mac};
use serde::Serialize;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Body of the endpoint URL validation reply.
///
/// Zoom delivers `payload.plainToken` once when the webhook endpoint is
/// registered; the endpoint proves ownership of the shared secret by echoing
/// the token alongside its hex-encoded HMAC-SHA256.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChallengeResponse {
    pub plain_token: String,
    pub encrypted_token: String,
}

/// Compute the challenge response for a validation event.
///
/// Pure and deterministic: `encrypted_token` is the hex HMAC-SHA256 of
/// `plain_token` keyed by `secret`, for every input including empty strings.
pub fn challenge_response(plain_token: &str, secret: &str) -> ChallengeResponse {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("infallible: HMAC-SHA256 accepts keys of any length");
    mac.update(plain_token.as_bytes());
    ChallengeResponse {
        plain_token: plain_token.to_string(),
        encrypted_token: hex::encode(mac.finalize().into_bytes()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_vector() {
        let resp = challenge_response("abc123", "s3cret");
        assert_eq!(resp.plain_token, "abc123");
        assert_eq!(
            resp.encrypted_token,
            "c769096b4d5745c128ffb221dc2e2d5cb38b4a1cae423cf413b12cbef730bc57"
        );
    }

    #[test]
    fn empty_token_and_secret() {
        let resp = challenge_response("", "");
        assert_eq!(resp.plain_token, "");
        assert_eq!(
            resp.encrypted_token,
            "b613679a0814d9ec772f95d778c35fc5ff1697c493715653c6c712144292c5ad"
        );
    }

    #[test]
    fn deterministic() {
        assert_eq!(
            challenge_response("tok", "key"),
            challenge_response("tok", "key")
        );
    }

    #[test]
    fn serializes_with_camel_case_keys() {
        let resp = challenge_response("abc123", "s3cret");
        let json = serde_json::to_value(&resp).unwrap();
        assert!(json.get("plainToken").is_some());
        assert!(json.get("encryptedToken").is_some());
    }
}
