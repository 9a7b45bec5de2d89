//! Naming and value generation for synthetic deployment tasks.
//!
//! Two generation modes exist:
//!
//! 1. **Deterministic** ([`seeded`]) — a private ChaCha8 stream is derived
//!    from a namespaced key string (`"<kind>:<suffix>"`), so the same kind
//!    and suffix always reproduce the same identifier without storing it,
//!    and different kinds sharing one suffix never draw from the same
//!    stream.
//! 2. **Ambient** ([`pools`]) — values that never need reconstruction
//!    (machine sizes, regions, schedules) are drawn from whatever random
//!    source the caller threads in. There is no process-wide RNG.

pub mod grammar;
pub mod pools;
pub mod seeded;

pub use grammar::NameGrammar;
pub use pools::FirewallProfile;
