//! Pagination tokens threaded between successive List/Entitlements/Grants calls

use crate::error::ConnectorError;
use serde::{Deserialize, Serialize};

/// Opaque page cursor handed back by the host sync engine.
///
/// The token is the decimal page index extracted from the upstream
/// "next page" URL on the previous call; an empty or absent token means the
/// first page. `size` is a page-size hint that upstream may ignore.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageToken {
    pub token: Option<String>,
    pub size: Option<u64>,
}

impl PageToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            size: None,
        }
    }

    /// First page of a listing.
    pub fn first() -> Self {
        Self::default()
    }

    /// Decode the token into an upstream page index. Page 0 asks upstream
    /// for its default (first) page.
    pub fn page_number(&self) -> Result<u64, ConnectorError> {
        match self.token.as_deref() {
            None | Some("") => Ok(0),
            Some(raw) => raw.parse::<u64>().map_err(|_| ConnectorError::IdentifierParse {
                value: raw.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_token_is_first_page() {
        assert_eq!(PageToken::first().page_number().unwrap(), 0);
        assert_eq!(PageToken::new("").page_number().unwrap(), 0);
    }

    #[test]
    fn test_numeric_token_decodes() {
        assert_eq!(PageToken::new("3").page_number().unwrap(), 3);
    }

    #[test]
    fn test_non_numeric_token_is_rejected() {
        let err = PageToken::new("page-three").page_number().unwrap_err();
        assert!(matches!(err, ConnectorError::IdentifierParse { .. }));
    }
}
