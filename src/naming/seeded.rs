//! Deterministic, key-derived identifier generation.
//!
//! Every function here seeds a private ChaCha8 stream from a namespaced
//! key string (`"<kind>:<suffix>"`). The same (kind, suffix) pair always
//! reproduces the same output, and two kinds sharing one suffix never
//! draw from the same stream, so a validator can reconstruct expected
//! identifiers later from only the persisted suffix.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

use crate::naming::grammar::{
    self, NameGrammar, LOWER, LOWER_DIGITS, LOWER_DIGITS_DASH, LOWER_DIGITS_DASH_UNDERSCORE,
    PUBSUB_BODY, ROLE_BODY, SINK_BODY,
};
use crate::naming::pools;

/// Derives a private random stream from a namespaced key string.
pub fn stream_for(key: &str) -> ChaCha8Rng {
    let digest = Sha256::digest(key.as_bytes());
    ChaCha8Rng::from_seed(digest.into())
}

fn ranged(key: &str, min_len: usize, max_len: usize, body: &'static str) -> String {
    let mut rng = stream_for(key);
    let grammar = NameGrammar {
        min_len,
        max_len,
        start: LOWER,
        body,
        end: LOWER_DIGITS,
    };
    grammar.generate(&mut rng)
}

/// Globally-unique bucket name derived from the suffix.
pub fn bucket_name(suffix: &str) -> String {
    ranged(&format!("bucket:{suffix}"), 10, 20, LOWER_DIGITS_DASH)
}

/// Service account id without type-revealing prefixes.
pub fn service_account_id(suffix: &str) -> String {
    ranged(
        &format!("service-account:{suffix}"),
        8,
        20,
        LOWER_DIGITS_DASH,
    )
}

/// Artifact Registry repository id.
pub fn artifact_repository_id(suffix: &str) -> String {
    ranged(&format!("artifact-repo:{suffix}"), 6, 18, LOWER_DIGITS_DASH)
}

/// Pub/Sub topic id; `goog` is a reserved prefix for this kind.
pub fn pubsub_topic_id(suffix: &str) -> String {
    let mut rng = stream_for(&format!("pubsub-topic:{suffix}"));
    let grammar = NameGrammar {
        min_len: 6,
        max_len: 20,
        start: LOWER,
        body: PUBSUB_BODY,
        end: LOWER_DIGITS,
    };
    let name = grammar.generate(&mut rng);
    grammar::avoid_prefix(name, "goog", &mut rng, LOWER)
}

/// Pub/Sub subscription id; `goog` is a reserved prefix for this kind.
pub fn pubsub_subscription_id(suffix: &str) -> String {
    let mut rng = stream_for(&format!("pubsub-subscription:{suffix}"));
    let grammar = NameGrammar {
        min_len: 6,
        max_len: 20,
        start: LOWER,
        body: PUBSUB_BODY,
        end: LOWER_DIGITS,
    };
    let name = grammar.generate(&mut rng);
    grammar::avoid_prefix(name, "goog", &mut rng, LOWER)
}

/// Cloud Scheduler job name.
pub fn scheduler_job_name(suffix: &str) -> String {
    ranged(
        &format!("scheduler-job:{suffix}"),
        6,
        20,
        LOWER_DIGITS_DASH_UNDERSCORE,
    )
}

/// Secret Manager secret id.
pub fn secret_id(suffix: &str) -> String {
    ranged(
        &format!("secret:{suffix}"),
        8,
        24,
        LOWER_DIGITS_DASH_UNDERSCORE,
    )
}

/// Secret payload derived from the task nonce.
pub fn secret_payload(nonce: &str) -> String {
    let mut rng = stream_for(&format!("secret-payload:{nonce}"));
    pools::random_text(&mut rng, 16, 24)
}

/// Logging sink name.
pub fn logging_sink_name(suffix: &str) -> String {
    ranged(&format!("logging-sink:{suffix}"), 8, 24, SINK_BODY)
}

/// DNS managed zone name.
pub fn dns_zone_name(suffix: &str) -> String {
    ranged(&format!("dns-zone:{suffix}"), 6, 14, LOWER_DIGITS_DASH)
}

/// Custom IAM role id.
pub fn custom_role_id(suffix: &str) -> String {
    ranged(&format!("custom-role:{suffix}"), 8, 24, ROLE_BODY)
}

/// Token a compute instance's startup script must write, derived from
/// the task nonce so the validator can re-derive it.
pub fn instance_token(nonce: &str) -> String {
    let mut rng = stream_for(&format!("instance-token:{nonce}"));
    pools::random_text(&mut rng, 12, 20)
}
