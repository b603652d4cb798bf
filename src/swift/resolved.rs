//! Package.resolved decoding
//!
//! Every pin becomes one acknowledgement titled after the package, with the
//! repository URL kept for license backfill. Manifests carry no license text.
//!
//! v1 format (older):
//! ```json
//! {
//!   "object": {
//!     "pins": [{
//!       "package": "PackageName",
//!       "repositoryURL": "https://github.com/...",
//!       "state": { "revision": "...", "version": "1.0.0" }
//!     }]
//!   },
//!   "version": 1
//! }
//! ```
//!
//! v2 format (Swift 5.6+):
//! ```json
//! {
//!   "pins": [{
//!     "identity": "package-name",
//!     "kind": "remoteSourceControl",
//!     "location": "https://github.com/...",
//!     "state": { "revision": "...", "version": "1.0.0" }
//!   }],
//!   "version": 2
//! }
//! ```
//!
//! v3 adds a top-level `originHash` and is otherwise identical to v2, so the v2
//! schema accepts it.

use crate::acknow::{Acknow, AcknowList};
use crate::decoder::{AcknowDecoder, Attempt, DecodeError, first_success};
use serde::Deserialize;
use ureq::http::Uri;

pub const PACKAGE_RESOLVED_NAME: &str = "Package";
pub const PACKAGE_RESOLVED_EXTENSION: &str = "resolved";

const FORMAT: &str = "Package.resolved";

/// Decoder for Swift Package Manager `Package.resolved` files.
#[derive(Debug, Default, Clone, Copy)]
pub struct PackageDecoder;

impl AcknowDecoder for PackageDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<AcknowList, DecodeError> {
        const ATTEMPTS: [Attempt<Vec<Acknow>>; 2] = [decode_v1, decode_v2];
        let acknowledgements = first_success(FORMAT, bytes, &ATTEMPTS)?;
        Ok(AcknowList::from_acknowledgements(acknowledgements))
    }
}

fn decode_v1(bytes: &[u8]) -> Result<Vec<Acknow>, DecodeError> {
    let resolved: PackageResolvedV1 =
        serde_json::from_slice(bytes).map_err(|e| DecodeError::malformed(FORMAT, e))?;

    if resolved.version != 1 {
        return Err(unsupported_version(resolved.version));
    }

    Ok(resolved
        .object
        .pins
        .into_iter()
        .map(|pin| Acknow::new(pin.package).with_repository(parse_repository(&pin.repository_url)))
        .collect())
}

fn decode_v2(bytes: &[u8]) -> Result<Vec<Acknow>, DecodeError> {
    let resolved: PackageResolvedV2 =
        serde_json::from_slice(bytes).map_err(|e| DecodeError::malformed(FORMAT, e))?;

    if !matches!(resolved.version, 2 | 3) {
        return Err(unsupported_version(resolved.version));
    }

    Ok(resolved
        .pins
        .into_iter()
        .map(|pin| Acknow::new(pin.identity).with_repository(parse_repository(&pin.location)))
        .collect())
}

fn unsupported_version(version: u32) -> DecodeError {
    DecodeError::malformed(FORMAT, format!("unsupported version {version}"))
}

/// Keep a repository location only if it is an absolute URL.
fn parse_repository(location: &str) -> Option<String> {
    let uri: Uri = location.parse().ok()?;
    (uri.scheme().is_some() && uri.host().is_some()).then(|| location.to_string())
}

// v1 format structures
#[derive(Deserialize)]
struct PackageResolvedV1 {
    object: ObjectV1,
    version: u32,
}

#[derive(Deserialize)]
struct ObjectV1 {
    pins: Vec<PinV1>,
}

#[derive(Deserialize)]
struct PinV1 {
    package: String,
    #[serde(rename = "repositoryURL")]
    repository_url: String,
}

// v2 format structures
#[derive(Deserialize)]
struct PackageResolvedV2 {
    pins: Vec<PinV2>,
    version: u32,
}

#[derive(Deserialize)]
struct PinV2 {
    identity: String,
    location: String,
}
