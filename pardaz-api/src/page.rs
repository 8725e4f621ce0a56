//! Page identifiers and parse errors.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when parsing identifiers coming from outside the model
/// (CLI arguments, persisted JSON keys).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown page: {0}")]
    UnknownPage(String),

    #[error("unknown component tag: {0}")]
    UnknownComponent(String),

    #[error("invalid {field} value: {value}")]
    InvalidWrapperValue { field: &'static str, value: String },
}

/// One of the fixed public pages of the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageId {
    Home,
    About,
    Services,
    Solutions,
    Portfolio,
    Blog,
    Contact,
}

impl PageId {
    /// All pages, in navigation order.
    pub const ALL: [PageId; 7] = [
        PageId::Home,
        PageId::About,
        PageId::Services,
        PageId::Solutions,
        PageId::Portfolio,
        PageId::Blog,
        PageId::Contact,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PageId::Home => "home",
            PageId::About => "about",
            PageId::Services => "services",
            PageId::Solutions => "solutions",
            PageId::Portfolio => "portfolio",
            PageId::Blog => "blog",
            PageId::Contact => "contact",
        }
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PageId {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PageId::ALL
            .into_iter()
            .find(|page| page.as_str() == s)
            .ok_or_else(|| ParseError::UnknownPage(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_names_round_trip() {
        for page in PageId::ALL {
            assert_eq!(page.as_str().parse::<PageId>().unwrap(), page);
        }
    }

    #[test]
    fn test_unknown_page_is_rejected() {
        assert_eq!(
            "admin".parse::<PageId>(),
            Err(ParseError::UnknownPage("admin".to_string()))
        );
        assert!("Home".parse::<PageId>().is_err());
    }

    #[test]
    fn test_page_serializes_lowercase() {
        let json = serde_json::to_string(&PageId::Solutions).unwrap();
        assert_eq!(json, "\"solutions\"");
    }
}
