//! Output formatting for JSON and text modes
//!
//! Provides types for structured output that can be serialized to JSON
//! for machine-readable output, or displayed as text for human consumption.

use acknowlist::cocoapods::first_link;
use acknowlist::{Acknow, AcknowList};
use serde::Serialize;

/// A list with the link a UI opens when its footer is tapped
#[derive(Debug, Serialize)]
pub struct ListResult<'a> {
    #[serde(flatten)]
    pub list: &'a AcknowList,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer_link: Option<String>,
}

impl<'a> ListResult<'a> {
    pub fn new(list: &'a AcknowList) -> Self {
        Self {
            list,
            footer_link: list.footer_text.as_deref().and_then(first_link),
        }
    }
}

/// Result of a show operation
#[derive(Debug, Serialize)]
pub struct ShowResult<'a> {
    #[serde(flatten)]
    pub acknow: &'a Acknow,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fetched: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Print a list the way a table view would lay it out
pub fn print_list(list: &AcknowList) {
    if let Some(header) = &list.header_text {
        println!("{}\n", header);
    }

    if list.is_empty() {
        println!("No acknowledgements.");
    }

    for acknow in &list.acknowledgements {
        match &acknow.license {
            Some(license) => println!("  {} [{}]", acknow.title, license),
            None => println!("  {}", acknow.title),
        }
    }

    if let Some(footer) = &list.footer_text {
        println!("\n{}", footer);
    }
}

/// Print one acknowledgement's detail view
pub fn print_acknow(acknow: &Acknow) {
    println!("{}", acknow.title);
    if let Some(license) = &acknow.license {
        println!("License: {}", license);
    }
    println!();

    match (&acknow.text, &acknow.repository) {
        (Some(text), _) => println!("{}", text),
        (None, Some(repository)) => println!("{}", repository),
        (None, None) => println!("No license text available."),
    }
}

pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Error serializing JSON: {}", e);
            std::process::exit(1);
        }
    }
}
