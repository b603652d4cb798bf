//! Acknowledgement lists for apps, built from CocoaPods settings bundles and
//! Swift Package Manager `Package.resolved` files, with license backfill from
//! the GitHub API.

pub mod acknow;
pub mod backfill;
pub mod bundle;
pub mod cocoapods;
pub mod config;
pub mod decoder;
pub mod github;
pub mod resolver;
pub mod sort;
pub mod swift;

pub use acknow::{Acknow, AcknowList};
