//! AWS API interaction module
//!
//! This module provides the transport for talking to CloudFront through the
//! AWS SDK, and the session handle the distribution core is built on.
//!
//! # Module Structure
//!
//! - [`client`] - CloudFront client implementing [`session::DistributionApi`]
//! - [`document`] - SDK output types to `serde_json::Value` documents
//! - [`session`] - Shared config loading and the session passed to fetchers
//! - [`arn`] - ARN parsing and akas
//!
//! # Example
//!
//! ```ignore
//! use cfdist::aws::session::{open_session, SessionConfig};
//!
//! async fn example() -> anyhow::Result<()> {
//!     let session = open_session(&SessionConfig {
//!         region: Some("us-east-1".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//!     println!("{}", session.region());
//!     Ok(())
//! }
//! ```

pub mod arn;
pub mod client;
pub mod document;
pub mod session;
