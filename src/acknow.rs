//! Acknowledgement data model
//!
//! An [`Acknow`] is one dependency's attribution record. An [`AcknowList`] is
//! what a decoder produces and what the presentation layer consumes: an
//! ordered list of entries plus optional header and footer texts.

use serde::Serialize;
use std::ops::Add;

/// A single acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Acknow {
    /// Display name, for instance the pod or package name.
    pub title: String,

    /// Full license or attribution body, when the source data embeds one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Short license label, for instance "MIT".
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license: Option<String>,

    /// Source-control location, used to backfill a missing `text`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
}

impl Acknow {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: None,
            license: None,
            repository: None,
        }
    }

    pub fn with_license(mut self, license: Option<String>) -> Self {
        self.license = license;
        self
    }

    pub fn with_repository(mut self, repository: Option<String>) -> Self {
        self.repository = repository;
        self
    }

    /// Returns a replacement carrying the same title, license and repository,
    /// with `text` set.
    pub fn with_text(&self, text: impl Into<String>) -> Self {
        Self {
            title: self.title.clone(),
            text: Some(text.into()),
            license: self.license.clone(),
            repository: self.repository.clone(),
        }
    }
}

/// A list of acknowledgements, with optional header and footer texts.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AcknowList {
    pub header_text: Option<String>,
    pub acknowledgements: Vec<Acknow>,
    pub footer_text: Option<String>,
}

impl AcknowList {
    pub fn new(
        header_text: Option<String>,
        acknowledgements: Vec<Acknow>,
        footer_text: Option<String>,
    ) -> Self {
        Self {
            header_text,
            acknowledgements,
            footer_text,
        }
    }

    /// A list with entries only, as produced by manifest formats.
    pub fn from_acknowledgements(acknowledgements: Vec<Acknow>) -> Self {
        Self {
            header_text: None,
            acknowledgements,
            footer_text: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.acknowledgements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.acknowledgements.len()
    }

    /// Find the first entry with the given title.
    pub fn position(&self, title: &str) -> Option<usize> {
        self.acknowledgements.iter().position(|a| a.title == title)
    }

    /// Returns the list with the entry at `index` swapped for `acknow`.
    ///
    /// The swap only happens when the stored entry still has the same title, so a
    /// late completion cannot overwrite an unrelated entry after the list changed.
    pub fn replacing(mut self, index: usize, acknow: Acknow) -> Self {
        if let Some(slot) = self.acknowledgements.get_mut(index)
            && slot.title == acknow.title
        {
            *slot = acknow;
        }
        self
    }
}

impl Add for AcknowList {
    type Output = AcknowList;

    fn add(self, rhs: AcknowList) -> AcknowList {
        let mut acknowledgements = self.acknowledgements;
        acknowledgements.extend(rhs.acknowledgements);
        AcknowList {
            header_text: self.header_text.or(rhs.header_text),
            acknowledgements,
            footer_text: self.footer_text.or(rhs.footer_text),
        }
    }
}
