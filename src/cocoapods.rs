//! CocoaPods support
//!
//! Handles:
//! - Decoding `Pods-<App>-acknowledgements.plist` settings bundles
//! - Recognizing the header and footer texts CocoaPods writes by default
//! - License text cleanup and link detection

mod settings;
mod text;

pub use settings::{PLIST_EXTENSION, PlistDecoder};
pub use text::{filter_premature_line_breaks, first_link};

pub const DEFAULT_HEADER_TEXT: &str =
    "This application makes use of the following third party libraries:";
pub const DEFAULT_FOOTER_TEXT: &str = "Generated by CocoaPods - https://cocoapods.org";
pub const DEFAULT_FOOTER_TEXT_LEGACY: &str = "Generated by CocoaPods - http://cocoapods.org";

/// Header text as written in a settings bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeaderText {
    /// The stock CocoaPods sentence, not worth showing.
    Default,
    Empty,
    Custom(String),
}

/// Footer text as written in a settings bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FooterText {
    /// The "Generated by CocoaPods" line; callers show a localized variant.
    Default,
    Empty,
    Custom(String),
}

pub fn classify_header(header: &str) -> HeaderText {
    match header {
        DEFAULT_HEADER_TEXT => HeaderText::Default,
        "" => HeaderText::Empty,
        custom => HeaderText::Custom(custom.to_string()),
    }
}

pub fn classify_footer(footer: &str) -> FooterText {
    match footer {
        DEFAULT_FOOTER_TEXT | DEFAULT_FOOTER_TEXT_LEGACY => FooterText::Default,
        "" => FooterText::Empty,
        custom => FooterText::Custom(custom.to_string()),
    }
}
