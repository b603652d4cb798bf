//! Title ordering for acknowledgement lists
//!
//! Titles are compared with Unicode collation rather than byte order, so
//! "Émoji" sorts next to "Emoji" and case does not split the list in two.
//! Sorting is stable: equal titles keep their relative order.

use crate::acknow::AcknowList;
use icu_collator::{Collator, CollatorOptions};
use icu_locid::Locale;
use std::cmp::Ordering;

/// Sort a merged list by title.
///
/// `locale` is a BCP-47 tag selecting collation rules; `None` uses the root
/// collation, which gives the same result everywhere for ASCII titles.
pub fn sorted(mut list: AcknowList, locale: Option<&str>) -> AcknowList {
    match collator(locale) {
        Some(collator) => list
            .acknowledgements
            .sort_by(|a, b| collator.compare(&a.title, &b.title)),
        None => list
            .acknowledgements
            .sort_by(|a, b| fallback_compare(&a.title, &b.title)),
    }
    list
}

fn collator(tag: Option<&str>) -> Option<Collator> {
    let locale = match tag.map(str::parse::<Locale>) {
        Some(Ok(locale)) => locale,
        Some(Err(err)) => {
            tracing::warn!("Ignoring invalid locale {:?}: {err}", tag.unwrap_or_default());
            Locale::UND
        }
        None => Locale::UND,
    };

    match Collator::try_new(&(&locale).into(), CollatorOptions::new()) {
        Ok(collator) => Some(collator),
        Err(err) => {
            tracing::warn!("Collation unavailable for {locale}, using plain ordering: {err}");
            None
        }
    }
}

fn fallback_compare(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}
