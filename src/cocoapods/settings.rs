//! Settings-bundle decoding
//!
//! CocoaPods writes acknowledgements as an iOS Settings bundle:
//!
//! ```xml
//! <dict>
//!   <key>PreferenceSpecifiers</key>
//!   <array>
//!     <dict><key>FooterText</key><string>header</string>...</dict>
//!     <dict><key>Title</key><string>AcknowList</string>
//!           <key>FooterText</key><string>license body</string>
//!           <key>License</key><string>MIT</string>...</dict>
//!     <dict><key>FooterText</key><string>footer</string>...</dict>
//!   </array>
//! </dict>
//! ```
//!
//! The first and last specifiers hold the header and footer; every specifier in
//! between is one acknowledgement. Rows are told apart by position only.

use super::text::filter_premature_line_breaks;
use crate::acknow::{Acknow, AcknowList};
use crate::decoder::{AcknowDecoder, DecodeError};
use serde::Deserialize;

pub const PLIST_EXTENSION: &str = "plist";

const FORMAT: &str = "settings bundle";

/// Decoder for CocoaPods acknowledgements plists, binary or XML.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlistDecoder;

impl AcknowDecoder for PlistDecoder {
    fn decode(&self, bytes: &[u8]) -> Result<AcknowList, DecodeError> {
        let bundle: SettingsBundle =
            plist::from_bytes(bytes).map_err(|e| DecodeError::malformed(FORMAT, e))?;
        Ok(bundle.into_list())
    }
}

#[derive(Deserialize)]
struct SettingsBundle {
    #[serde(rename = "PreferenceSpecifiers", default)]
    preference_specifiers: Vec<Specifier>,
}

#[derive(Deserialize)]
struct Specifier {
    #[serde(rename = "Title")]
    title: Option<String>,
    #[serde(rename = "FooterText")]
    footer_text: Option<String>,
    #[serde(rename = "License")]
    license: Option<String>,
}

impl SettingsBundle {
    fn into_list(self) -> AcknowList {
        let mut specifiers = self.preference_specifiers;
        if specifiers.len() < 2 {
            return AcknowList::default();
        }

        // Length checked above, both pops succeed.
        let footer = specifiers.pop().and_then(|s| s.footer_text);
        let header = specifiers.remove(0).footer_text;

        let acknowledgements = specifiers
            .into_iter()
            .filter_map(Specifier::into_acknow)
            .collect();

        AcknowList::new(header, acknowledgements, footer)
    }
}

impl Specifier {
    fn into_acknow(self) -> Option<Acknow> {
        let title = self.title.filter(|t| !t.is_empty());
        let (Some(title), Some(text)) = (title, self.footer_text) else {
            tracing::debug!("skipping settings bundle row without title or text");
            return None;
        };

        let mut acknow = Acknow::new(title).with_license(self.license);
        acknow.text = Some(filter_premature_line_breaks(&text));
        Some(acknow)
    }
}
