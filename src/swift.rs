//! Swift Package Manager support
//!
//! Handles:
//! - Decoding Package.resolved (v1 and v2 schemas) into acknowledgements

mod resolved;

pub use resolved::{PACKAGE_RESOLVED_EXTENSION, PACKAGE_RESOLVED_NAME, PackageDecoder};
