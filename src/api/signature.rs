use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Maximum allowed distance, in seconds, between the request timestamp and now.
pub const FRESHNESS_WINDOW_SECS: i64 = 300;

/// Verify a Slack request signature.
///
/// Both headers must be present, the timestamp must lie within
/// [`FRESHNESS_WINDOW_SECS`] of `now` (either direction), and the
/// `v0=<hex>` signature must equal `HMAC-SHA256(secret, "v0:{ts}:{body}")`
/// rendered as lowercase hex. The comparison is constant-time.
#[must_use]
pub fn verify_slack_signature(
    timestamp: Option<&str>,
    signature: Option<&str>,
    body: &[u8],
    signing_secret: &str,
    now: i64,
) -> bool {
    let (Some(timestamp), Some(signature)) = (timestamp, signature) else {
        warn!("Missing Slack signature headers");
        return false;
    };

    let Ok(ts) = timestamp.trim().parse::<i64>() else {
        warn!("Unparsable Slack request timestamp");
        return false;
    };

    // The timestamp header is unauthenticated, so the distance must not overflow.
    if now.abs_diff(ts) > FRESHNESS_WINDOW_SECS.unsigned_abs() {
        warn!("Timestamp out of range, potential replay attack");
        return false;
    }

    let Some(expected) = expected_signature(timestamp, body, signing_secret) else {
        return false;
    };

    // Exact string match: a re-cased hex digit is a different signature.
    if bool::from(expected.as_bytes().ct_eq(signature.as_bytes())) {
        true
    } else {
        warn!("Slack signature verification failed");
        false
    }
}

fn expected_signature(timestamp: &str, body: &[u8], signing_secret: &str) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(signing_secret.as_bytes()).ok()?;
    mac.update(b"v0:");
    mac.update(timestamp.as_bytes());
    mac.update(b":");
    mac.update(body);
    Some(format!("v0={}", hex::encode(mac.finalize().into_bytes())))
}

/// Compute the `v0=<hex>` signature Slack would send for `body`.
#[must_use]
pub fn compute_signature(timestamp: &str, body: &[u8], signing_secret: &str) -> String {
    expected_signature(timestamp, body, signing_secret).unwrap_or_default()
}
