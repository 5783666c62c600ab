//! Shared primitive types used across the desk.

/// A monetary amount in the local currency (TRY).
pub type Lira = f64;

/// A scenario's display name. It doubles as the scenario's identity
/// in the list; the policy layer deliberately does not enforce
/// uniqueness.
pub type ScenarioName = String;
