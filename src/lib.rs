//! cfdist: inventory of AWS CloudFront distributions
//!
//! Lists distributions (or looks one up by id) and resolves the requested
//! columns into records, calling `GetDistribution` and
//! `ListTagsForResource` only when a requested column needs them.

pub mod aws;
pub mod config;
pub mod distribution;
pub mod error;
pub mod output;

#[cfg(test)]
mod testing;

/// Version injected at compile time via CFDIST_VERSION env var (set by CI/CD),
/// or "dev" for local builds.
pub const VERSION: &str = match option_env!("CFDIST_VERSION") {
    Some(v) => v,
    None => "dev",
};
