//! Shared contract for acknowledgement file decoders
//!
//! Each supported file format implements [`AcknowDecoder`]. Formats with several
//! historical schemas decode through [`first_success`], an ordered ladder of
//! candidate parsers.

use crate::acknow::AcknowList;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Malformed {format} input: {reason}")]
    MalformedInput {
        format: &'static str,
        reason: String,
    },
}

impl DecodeError {
    pub fn malformed(format: &'static str, reason: impl ToString) -> Self {
        DecodeError::MalformedInput {
            format,
            reason: reason.to_string(),
        }
    }
}

/// Turns the raw bytes of one file format into an [`AcknowList`].
///
/// Decoders never sort; ordering is applied once after all sources are merged.
pub trait AcknowDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<AcknowList, DecodeError>;
}

/// One candidate schema parser.
pub type Attempt<T> = fn(&[u8]) -> Result<T, DecodeError>;

/// Run `attempts` in order and return the first success.
///
/// When every attempt fails, the last failure is returned.
pub fn first_success<T>(
    format: &'static str,
    bytes: &[u8],
    attempts: &[Attempt<T>],
) -> Result<T, DecodeError> {
    let mut last = DecodeError::malformed(format, "no schema to try");
    for attempt in attempts {
        match attempt(bytes) {
            Ok(value) => return Ok(value),
            Err(err) => {
                tracing::debug!("{format} schema attempt failed: {err}");
                last = err;
            }
        }
    }
    Err(last)
}
