//! # Request ID Tracking
//!
//! Identifiers attached to every HTTP request and echoed in responses.
//! Uses CUID2 for collision-resistant, URL-safe identifiers.

use std::str::FromStr;

/// Header carrying the request ID in both directions.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// A request ID type using CUID2.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(String);

impl RequestId {
    /// Generate a new random request ID using CUID2.
    #[inline]
    pub fn new() -> Self { Self(cuid2::create_id()) }

    /// Accept a client supplied ID, or `None` when it is not a plausible identifier.
    pub fn from_header(value: &str) -> Option<Self> { value.trim().parse().ok() }

    /// Get the request ID as a string.
    #[inline]
    pub fn as_str(&self) -> &str { &self.0 }

    /// Consume and return the inner string.
    #[inline]
    pub fn into_string(self) -> String { self.0 }
}

impl Default for RequestId {
    #[inline]
    fn default() -> Self { Self::new() }
}

impl FromStr for RequestId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let valid_len = (8 ..= 64).contains(&s.len());
        if valid_len &&
            s.chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            Ok(Self(s.to_string()))
        }
        else {
            Err("Invalid request ID format".to_string())
        }
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}", self.0) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_id_new() {
        let id = RequestId::new();
        assert!(id.as_str().len() >= 20);
        assert!(id.as_str().chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_request_id_from_str() {
        let cuid = "k192v2g4w3zq8h6j5k1";
        let id: RequestId = cuid.parse().unwrap();
        assert_eq!(id.as_str(), cuid);
    }

    #[test]
    fn test_request_id_from_str_invalid() {
        assert!("short".parse::<RequestId>().is_err());
        assert!("invalid!@#chars-here".parse::<RequestId>().is_err());
    }

    #[test]
    fn test_from_header_trims() {
        let id = RequestId::from_header("  upstream-proxy-1234  ").unwrap();
        assert_eq!(id.as_str(), "upstream-proxy-1234");
    }

    #[test]
    fn test_request_id_display() {
        let id = RequestId::new();
        assert_eq!(format!("{}", id), id.as_str());
        assert_eq!(id.clone().into_string(), id.to_string());
    }
}
