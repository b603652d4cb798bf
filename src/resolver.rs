//! Default acknowledgement sources
//!
//! Looks for the files dependency managers generate inside an application
//! bundle, decodes whichever are present and merges them:
//!
//! - `<prefix>-<bundle name>-acknowledgements.plist` (CocoaPods), falling back
//!   to the legacy `<prefix>-acknowledgements.plist`
//! - `Package.resolved` (Swift Package Manager)
//!
//! Missing or undecodable sources are never errors. They are logged and
//! treated as "nothing to show".

use crate::acknow::AcknowList;
use crate::bundle::{ResourceBundle, bundle_name};
use crate::cocoapods::{
    FooterText, HeaderText, PLIST_EXTENSION, PlistDecoder, classify_footer, classify_header,
};
use crate::config::Config;
use crate::decoder::AcknowDecoder;
use crate::sort::sorted;
use crate::swift::{PACKAGE_RESOLVED_EXTENSION, PACKAGE_RESOLVED_NAME, PackageDecoder};

/// Candidate settings-bundle names, most specific first.
pub fn plist_names<B: ResourceBundle + ?Sized>(bundle: &B, prefix: &str) -> Vec<String> {
    let mut names = Vec::with_capacity(2);
    if let Some(name) = bundle_name(bundle) {
        names.push(format!("{prefix}-{name}-acknowledgements"));
    }
    names.push(format!("{prefix}-acknowledgements"));
    names
}

/// The CocoaPods acknowledgements bundled with the app, if any.
pub fn default_plist<B: ResourceBundle + ?Sized>(bundle: &B, prefix: &str) -> Option<AcknowList> {
    let names = plist_names(bundle, prefix);
    let (name, bytes) = names.iter().find_map(|name| {
        bundle
            .resource(name, PLIST_EXTENSION)
            .map(|bytes| (name, bytes))
    })?;

    decode_source(&PlistDecoder, name, PLIST_EXTENSION, &bytes)
}

/// The Swift Package Manager acknowledgements bundled with the app, if any.
pub fn default_package<B: ResourceBundle + ?Sized>(bundle: &B) -> Option<AcknowList> {
    let bytes = bundle.resource(PACKAGE_RESOLVED_NAME, PACKAGE_RESOLVED_EXTENSION)?;
    decode_source(
        &PackageDecoder,
        PACKAGE_RESOLVED_NAME,
        PACKAGE_RESOLVED_EXTENSION,
        &bytes,
    )
}

/// All default sources, merged. CocoaPods header and footer take precedence.
///
/// Returns `None` when the bundle has no usable source.
pub fn default_acknowledgements<B: ResourceBundle + ?Sized>(
    bundle: &B,
    config: &Config,
) -> Option<AcknowList> {
    let plist = default_plist(bundle, &config.plist_prefix);
    let package = default_package(bundle);

    match (plist, package) {
        (Some(plist), Some(package)) => Some(plist + package),
        (Some(list), None) | (None, Some(list)) => Some(list),
        (None, None) => {
            tracing::warn!(
                "No acknowledgements found. Add `{}-<App>-acknowledgements.plist` or `{}.{}` to the app resources.",
                config.plist_prefix,
                PACKAGE_RESOLVED_NAME,
                PACKAGE_RESOLVED_EXTENSION
            );
            None
        }
    }
}

/// Decode several named settings bundles and merge them in the given order.
pub fn load_named<B: ResourceBundle + ?Sized>(bundle: &B, names: &[&str]) -> Option<AcknowList> {
    names
        .iter()
        .filter_map(|name| {
            let Some(bytes) = bundle.resource(name, PLIST_EXTENSION) else {
                tracing::warn!("`{name}.{PLIST_EXTENSION}` not found");
                return None;
            };
            decode_source(&PlistDecoder, name, PLIST_EXTENSION, &bytes)
        })
        .reduce(|merged, list| merged + list)
}

/// Prepare a merged list for display.
///
/// Stock CocoaPods headers are dropped, the stock footer is swapped for the
/// configured localized text, integrator overrides win over both, and entries
/// are sorted by title.
pub fn presentable(list: AcknowList, config: &Config) -> AcknowList {
    let header_text = config.header_text.clone().or_else(|| {
        match list.header_text.as_deref().map(classify_header) {
            Some(HeaderText::Custom(header)) => Some(header),
            _ => None,
        }
    });

    let footer_text = config.footer_text.clone().or_else(|| {
        match list.footer_text.as_deref().map(classify_footer) {
            Some(FooterText::Default) => Some(config.cocoapods_footer.clone()),
            Some(FooterText::Custom(footer)) => Some(footer),
            _ => None,
        }
    });

    sorted(
        AcknowList::new(header_text, list.acknowledgements, footer_text),
        config.locale.as_deref(),
    )
}

fn decode_source<D: AcknowDecoder>(
    decoder: &D,
    name: &str,
    extension: &str,
    bytes: &[u8],
) -> Option<AcknowList> {
    match decoder.decode(bytes) {
        Ok(list) => {
            tracing::debug!(
                "Loaded {} acknowledgements from {name}.{extension}",
                list.len()
            );
            Some(list)
        }
        Err(err) => {
            tracing::warn!("Failed to decode {name}.{extension}: {err}");
            None
        }
    }
}
