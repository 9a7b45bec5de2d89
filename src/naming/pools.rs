//! Fixed operational value pools and ambient pickers.
//!
//! Pools are intentionally small, cheap and low-risk: budget regions,
//! micro machine sizes, narrow permissions. Requesters can complete a
//! task without heavy spend and the validator never needs write access.
//! All pickers take an explicit random source; nothing here touches
//! process-wide randomness.

use rand::{Rng, RngExt};

use crate::naming::grammar::{self, NameGrammar, LOWER_DIGITS};

/// Cheap regions and the zones available in each.
pub const REGION_TO_ZONES: &[(&str, &[&str])] = &[
    (
        "us-central1",
        &["us-central1-a", "us-central1-b", "us-central1-c", "us-central1-f"],
    ),
    ("us-east1", &["us-east1-b", "us-east1-c", "us-east1-d"]),
    (
        "europe-west1",
        &["europe-west1-b", "europe-west1-c", "europe-west1-d"],
    ),
];

/// Budget machine types that still apply plans comfortably.
pub const CHEAP_MACHINE_TYPES: &[&str] = &["e2-micro", "e2-small", "e2-medium"];

/// Specific bucket regions only; multi-regions like "EU" are ambiguous
/// in rendered instructions.
pub const BUCKET_LOCATIONS: &[&str] = &[
    "US-CENTRAL1",
    "US-EAST1",
    "US-WEST1",
    "EUROPE-WEST1",
    "ASIA-SOUTHEAST1",
];

pub const BUCKET_STORAGE_CLASSES: &[&str] = &["STANDARD", "NEARLINE", "COLDLINE"];

pub const ARTIFACT_LOCATIONS: &[&str] = &[
    "us-central1",
    "us-east1",
    "us-west1",
    "europe-west1",
    "asia-southeast1",
];

pub const ARTIFACT_FORMATS: &[&str] = &["DOCKER", "PYTHON"];

pub const PUBSUB_RETENTION_WINDOWS: &[&str] = &["600s", "900s", "1200s"];
pub const PUBSUB_ACK_DEADLINES: &[i64] = &[10, 20, 30, 60];

pub const SCHEDULER_JOB_SCHEDULES: &[&str] =
    &["*/5 * * * *", "*/10 * * * *", "*/15 * * * *", "0 * * * *"];

pub const LOGGING_FILTERS: &[&str] = &[
    "resource.type=\"gce_instance\"",
    "severity=\"ERROR\"",
    "resource.type=\"cloud_function\"",
    "logName=\"projects/PROJECT_ID/logs/syslog\"",
];

pub const DNS_RECORD_TYPES: &[&str] = &["A", "CNAME", "TXT", "MX"];
pub const DNS_RECORD_TTLS: &[i64] = &[300, 600, 1800, 3600];

pub const CUSTOM_ROLE_PERMISSION_SETS: &[&[&str]] = &[
    &["storage.objects.get"],
    &["storage.objects.list", "storage.objects.get"],
    &["compute.instances.get"],
    &["pubsub.topics.list", "pubsub.topics.get"],
];

const STARTUP_SCRIPT_TEMPLATES: &[&str] = &[
    "#!/bin/bash\nset -euo pipefail\necho '{token}' > /var/tmp/acore-token\n",
    "#!/bin/bash\nprintf '{token}' > /var/tmp/acore-token\n",
    "#!/bin/bash\n/usr/bin/env echo '{token}' > /var/tmp/acore-token\n",
];

/// Declarative description of a firewall posture.
#[derive(Debug, Clone, Copy)]
pub struct FirewallProfile {
    pub label: &'static str,
    pub direction: &'static str,
    pub priority: i64,
    pub allow_protocol: &'static str,
    pub allow_ports: &'static [&'static str],
    pub disabled: bool,
    description_template: &'static str,
}

impl FirewallProfile {
    /// Renders the human-readable description for a token.
    pub fn describe(&self, token: &str) -> String {
        self.description_template.replace("{token}", token)
    }
}

pub const FIREWALL_PROFILES: &[FirewallProfile] = &[
    FirewallProfile {
        label: "ssh",
        direction: "INGRESS",
        priority: 1000,
        allow_protocol: "tcp",
        allow_ports: &["22"],
        disabled: false,
        description_template: "Allow SSH only for {token}",
    },
    FirewallProfile {
        label: "http",
        direction: "INGRESS",
        priority: 1001,
        allow_protocol: "tcp",
        allow_ports: &["80"],
        disabled: false,
        description_template: "Allow HTTP only for {token}",
    },
    FirewallProfile {
        label: "icmp",
        direction: "INGRESS",
        priority: 1002,
        allow_protocol: "icmp",
        allow_ports: &[],
        disabled: false,
        description_template: "Allow ICMP echo for {token}",
    },
];

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &'a [&'a str]) -> &'a str {
    pool[rng.random_range(0..pool.len())]
}

/// Short hex suffix for nonces and resource name seeds.
pub fn new_suffix<R: Rng + ?Sized>(rng: &mut R, length: usize) -> String {
    const HEX: &[u8] = b"0123456789abcdef";
    (0..length.max(2))
        .map(|_| HEX[rng.random_range(0..HEX.len())] as char)
        .collect()
}

/// Chooses a cheap region and one of its zones.
pub fn pick_region_and_zone<R: Rng + ?Sized>(rng: &mut R) -> (&'static str, &'static str) {
    let (region, zones) = REGION_TO_ZONES[rng.random_range(0..REGION_TO_ZONES.len())];
    (region, zones[rng.random_range(0..zones.len())])
}

/// Returns a low-cost machine profile.
pub fn pick_machine_type<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, CHEAP_MACHINE_TYPES)
}

pub fn bucket_location<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, BUCKET_LOCATIONS)
}

pub fn bucket_storage_class<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, BUCKET_STORAGE_CLASSES)
}

pub fn artifact_location<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, ARTIFACT_LOCATIONS)
}

pub fn artifact_format<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, ARTIFACT_FORMATS)
}

pub fn pubsub_retention_window<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, PUBSUB_RETENTION_WINDOWS)
}

pub fn pubsub_ack_deadline<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    PUBSUB_ACK_DEADLINES[rng.random_range(0..PUBSUB_ACK_DEADLINES.len())]
}

pub fn scheduler_job_schedule<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, SCHEDULER_JOB_SCHEDULES)
}

pub fn logging_filter<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, LOGGING_FILTERS)
}

pub fn dns_record_type<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    pick(rng, DNS_RECORD_TYPES)
}

pub fn dns_record_ttl<R: Rng + ?Sized>(rng: &mut R) -> i64 {
    DNS_RECORD_TTLS[rng.random_range(0..DNS_RECORD_TTLS.len())]
}

/// Record data appropriate for the record type.
pub fn dns_record_data<R: Rng + ?Sized>(record_type: &str, rng: &mut R) -> Vec<String> {
    match record_type {
        "A" => vec![format!("192.0.2.{}", rng.random_range(1..=254))],
        "CNAME" => vec!["example.com.".to_string()],
        "TXT" => vec![txt_rrdata(rng)],
        "MX" => vec!["10 mail.example.com.".to_string()],
        _ => vec!["192.0.2.1".to_string()],
    }
}

pub fn custom_role_permissions<R: Rng + ?Sized>(rng: &mut R) -> Vec<String> {
    let set = CUSTOM_ROLE_PERMISSION_SETS[rng.random_range(0..CUSTOM_ROLE_PERMISSION_SETS.len())];
    set.iter().map(|p| p.to_string()).collect()
}

/// Safe object name that doesn't encode the resource type.
pub fn bucket_object_name<R: Rng + ?Sized>(rng: &mut R, extension: &str) -> String {
    let base = NameGrammar {
        min_len: 8,
        max_len: 16,
        start: grammar::LOWER,
        body: grammar::LOWER_DIGITS_DASH,
        end: LOWER_DIGITS,
    }
    .generate(rng);
    format!("{base}.{}", extension.trim_start_matches('.'))
}

/// A /24 block under the private 10.0.0.0/8 range.
pub fn random_cidr_block<R: Rng + ?Sized>(rng: &mut R) -> String {
    let second = rng.random_range(10..=200);
    let third = rng.random_range(0..=240);
    format!("10.{second}.{third}.0/24")
}

pub fn random_firewall_profile<R: Rng + ?Sized>(rng: &mut R) -> FirewallProfile {
    FIREWALL_PROFILES[rng.random_range(0..FIREWALL_PROFILES.len())]
}

/// Neutral label for display and description fields; no type hints.
pub fn random_label<R: Rng + ?Sized>(rng: &mut R, min_len: usize, max_len: usize) -> String {
    NameGrammar {
        min_len,
        max_len,
        start: grammar::LOWER,
        body: LOWER_DIGITS,
        end: LOWER_DIGITS,
    }
    .generate(rng)
}

/// Neutral short text payload, letters and digits only.
pub fn random_text<R: Rng + ?Sized>(rng: &mut R, min_len: usize, max_len: usize) -> String {
    let length = rng.random_range(min_len..=max_len);
    const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Quoted TXT record payload.
pub fn txt_rrdata<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("\"{}\"", random_text(rng, 6, 12))
}

/// DNS label suitable for zone and record names.
pub fn dns_label<R: Rng + ?Sized>(rng: &mut R, min_len: usize, max_len: usize) -> String {
    NameGrammar::rfc1035(min_len, max_len).generate(rng)
}

/// Renders a startup script requesters must keep verbatim.
pub fn startup_script<R: Rng + ?Sized>(token: &str, rng: &mut R) -> String {
    let template = STARTUP_SCRIPT_TEMPLATES[rng.random_range(0..STARTUP_SCRIPT_TEMPLATES.len())];
    template.replace("{token}", token)
}
