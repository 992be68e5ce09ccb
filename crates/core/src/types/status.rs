//! Status and kind enums for store media.

use serde::{Deserialize, Serialize};

/// Kind of a normalized media item.
///
/// Always derived from the shape of the source record, never supplied by
/// callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Video => write!(f, "video"),
        }
    }
}

impl std::str::FromStr for MediaKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "image" => Ok(Self::Image),
            "video" => Ok(Self::Video),
            _ => Err(format!("invalid media kind: {s}")),
        }
    }
}

/// Processing status of a file in the store's file library.
///
/// Maps to Shopify's `FileStatus` values. Aggregation does not filter on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileStatus {
    /// File has been uploaded but not yet processed.
    Uploaded,
    /// File is being processed.
    Processing,
    /// File is ready to be displayed.
    Ready,
    /// File processing has failed.
    Failed,
    /// A status this client does not know about yet.
    #[default]
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Uploaded => write!(f, "UPLOADED"),
            Self::Processing => write!(f, "PROCESSING"),
            Self::Ready => write!(f, "READY"),
            Self::Failed => write!(f, "FAILED"),
            Self::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_media_kind_roundtrip_str() {
        assert_eq!("image".parse::<MediaKind>().unwrap(), MediaKind::Image);
        assert_eq!("video".parse::<MediaKind>().unwrap(), MediaKind::Video);
        assert!("audio".parse::<MediaKind>().is_err());
        assert_eq!(MediaKind::Video.to_string(), "video");
    }

    #[test]
    fn test_file_status_unknown_fallback() {
        let status: FileStatus = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(status, FileStatus::Unknown);

        let status: FileStatus = serde_json::from_str("\"READY\"").unwrap();
        assert_eq!(status, FileStatus::Ready);
    }
}
