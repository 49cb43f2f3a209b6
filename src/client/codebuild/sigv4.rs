//! AWS Signature Version 4 for JSON-protocol requests.
//!
//! Only what a `POST /` with a JSON body needs: no query string and
//! a fixed set of signed headers.

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use super::AwsCredentials;
use crate::NotifierError;

type HmacSha256 = Hmac<Sha256>;

pub(super) const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// The headers (besides `Authorization`) that a signed request must carry.
#[derive(Debug, PartialEq, Eq)]
pub(super) struct SignedHeaders {
    /// Value of the `X-Amz-Date` header.
    pub amz_date: String,
    /// Value of the `Authorization` header.
    pub authorization: String,
}

/// What is being signed.
pub(super) struct SigningRequest<'a> {
    pub host: &'a str,
    pub content_type: &'a str,
    pub target: &'a str,
    pub payload: &'a [u8],
    pub region: &'a str,
    pub service: &'a str,
}

fn hmac(key: &[u8], data: &[u8]) -> Result<Vec<u8>, NotifierError> {
    let mut mac = HmacSha256::new_from_slice(key)?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Derive the key used to sign requests on the given date (`YYYYMMDD`).
pub(super) fn signing_key(
    secret_access_key: &str,
    date: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>, NotifierError> {
    let k_date = hmac(format!("AWS4{secret_access_key}").as_bytes(), date.as_bytes())?;
    let k_region = hmac(&k_date, region.as_bytes())?;
    let k_service = hmac(&k_region, service.as_bytes())?;
    hmac(&k_service, b"aws4_request")
}

/// Sign a `POST /` request at the given time.
pub(super) fn sign(
    request: &SigningRequest<'_>,
    credentials: &AwsCredentials,
    now: DateTime<Utc>,
) -> Result<SignedHeaders, NotifierError> {
    let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
    let date = now.format("%Y%m%d").to_string();

    // header names must be lowercase and sorted
    let mut headers = vec![
        ("content-type", request.content_type),
        ("host", request.host),
        ("x-amz-date", amz_date.as_str()),
        ("x-amz-target", request.target),
    ];
    if let Some(token) = &credentials.session_token {
        headers.push(("x-amz-security-token", token.as_str()));
    }
    headers.sort_by_key(|(name, _)| *name);
    let canonical_headers: String = headers
        .iter()
        .map(|(name, value)| format!("{name}:{}\n", value.trim()))
        .collect();
    let signed_headers = headers
        .iter()
        .map(|(name, _)| *name)
        .collect::<Vec<_>>()
        .join(";");

    let canonical_request = format!(
        "POST\n/\n\n{canonical_headers}\n{signed_headers}\n{}",
        hex::encode(Sha256::digest(request.payload))
    );
    let scope = format!(
        "{date}/{}/{}/aws4_request",
        request.region, request.service
    );
    let string_to_sign = format!(
        "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
        hex::encode(Sha256::digest(canonical_request.as_bytes()))
    );
    let key = signing_key(
        &credentials.secret_access_key,
        &date,
        request.region,
        request.service,
    )?;
    let signature = hex::encode(hmac(&key, string_to_sign.as_bytes())?);
    Ok(SignedHeaders {
        authorization: format!(
            "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
            credentials.access_key_id
        ),
        amz_date,
    })
}

#[cfg(test)]
mod test {
    use super::{SigningRequest, sign, signing_key};
    use crate::client::AwsCredentials;
    use chrono::{TimeZone, Utc};

    #[test]
    fn derived_key() {
        // the published example of deriving a signing key
        let key = signing_key(
            "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY",
            "20120215",
            "us-east-1",
            "iam",
        )
        .unwrap();
        assert_eq!(
            hex::encode(key),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
    }

    fn request(payload: &[u8]) -> SigningRequest<'_> {
        SigningRequest {
            host: "codebuild.us-west-2.amazonaws.com",
            content_type: "application/x-amz-json-1.1",
            target: "CodeBuild_20161006.BatchGetProjects",
            payload,
            region: "us-west-2",
            service: "codebuild",
        }
    }

    fn credentials(session_token: Option<&str>) -> AwsCredentials {
        AwsCredentials {
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".to_string(),
            session_token: session_token.map(str::to_string),
        }
    }

    #[test]
    fn authorization_layout() {
        let now = Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap();
        let signed = sign(&request(b"{}"), &credentials(None), now).unwrap();
        assert_eq!(signed.amz_date, "20150830T123600Z");
        let prefix = "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20150830/us-west-2/codebuild/aws4_request, \
            SignedHeaders=content-type;host;x-amz-date;x-amz-target, Signature=";
        assert!(signed.authorization.starts_with(prefix));
        let signature = &signed.authorization[prefix.len()..];
        assert_eq!(signature.len(), 64);
        assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn signature_covers_payload_and_token() {
        let now = Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap();
        let base = sign(&request(b"{}"), &credentials(None), now).unwrap();
        assert_eq!(base, sign(&request(b"{}"), &credentials(None), now).unwrap());

        let other_payload = sign(&request(b"{\"names\":[]}"), &credentials(None), now).unwrap();
        assert_ne!(base.authorization, other_payload.authorization);

        let with_token = sign(&request(b"{}"), &credentials(Some("session")), now).unwrap();
        assert!(
            with_token
                .authorization
                .contains("SignedHeaders=content-type;host;x-amz-date;x-amz-security-token;x-amz-target,")
        );
    }

    #[test]
    fn known_signature() {
        // signed independently with botocore's SigV4Auth
        let request = SigningRequest {
            host: "codebuild.us-east-1.amazonaws.com",
            content_type: "application/x-amz-json-1.1",
            target: "CodeBuild_20161006.BatchGetProjects",
            payload: br#"{"names":["my-build"]}"#,
            region: "us-east-1",
            service: "codebuild",
        };
        let now = Utc.with_ymd_and_hms(2026, 10, 17, 20, 4, 59).unwrap();
        let signed = sign(&request, &credentials(Some("session-token")), now).unwrap();
        assert_eq!(signed.amz_date, "20261017T200459Z");
        assert_eq!(
            signed.authorization,
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20261017/us-east-1/codebuild/aws4_request, \
            SignedHeaders=content-type;host;x-amz-date;x-amz-security-token;x-amz-target, \
            Signature=4d4d3693796343f2fba5bfd86931a9828a9e61e215580237d560d20867b7b0c9"
        );
    }
}
