use crate::error::CheckerError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Inclusive [min, max] acceptable rate band, in messages per second.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateRange {
    pub min: f64,
    pub max: f64,
}

impl RateRange {
    pub fn new(min: f64, max: f64) -> Result<Self, CheckerError> {
        if min > max {
            return Err(CheckerError::Config(format!(
                "invalid frequency range [{}, {}]: min must not exceed max",
                min, max
            )));
        }
        Ok(RateRange { min, max })
    }

    pub fn contains(&self, rate: f64) -> bool {
        rate >= self.min && rate <= self.max
    }
}

impl Default for RateRange {
    /// No lower bound (approximated by -1) and no upper bound (approximated
    /// by the largest representable value).
    fn default() -> Self {
        RateRange {
            min: -1.0,
            max: f64::MAX,
        }
    }
}

/// One declared topic requirement: an exact name or regular expression,
/// plus the rate band its matches must satisfy.
#[derive(Debug, Clone, PartialEq)]
pub struct RequirementEntry {
    pub pattern: String,
    pub range: RateRange,
}

/// On-disk topic list document.
///
/// ```yaml
/// topics:
///   - name: /imu
///     hz_range: [50, 150]
///   - name: /camera.*
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicListDoc {
    pub topics: Vec<TopicDecl>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicDecl {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hz_range: Option<[f64; 2]>,
}

/// Build the ordered requirement sequence from a YAML topic list file.
///
/// Entries without an `hz_range` fall back to `default_range`. Insertion
/// order is preserved, duplicate patterns included; each duplicate is
/// evaluated independently.
pub fn from_topic_list(
    path: &Path,
    default_range: RateRange,
) -> Result<Vec<RequirementEntry>, CheckerError> {
    let text = fs::read_to_string(path).map_err(|e| {
        CheckerError::Config(format!("failed to read topic list {}: {}", path.display(), e))
    })?;
    let doc: TopicListDoc = serde_yaml::from_str(&text).map_err(|e| {
        CheckerError::Config(format!("failed to parse topic list {}: {}", path.display(), e))
    })?;
    from_doc(doc, default_range)
}

pub fn from_doc(
    doc: TopicListDoc,
    default_range: RateRange,
) -> Result<Vec<RequirementEntry>, CheckerError> {
    doc.topics
        .into_iter()
        .map(|decl| {
            let range = match decl.hz_range {
                Some([min, max]) => RateRange::new(min, max)?,
                None => default_range,
            };
            Ok(RequirementEntry {
                pattern: decl.name,
                range,
            })
        })
        .collect()
}

/// Build a one-entry requirement sequence from a single pattern.
pub fn from_single_pattern(pattern: &str, default_range: RateRange) -> Vec<RequirementEntry> {
    vec![RequirementEntry {
        pattern: pattern.to_string(),
        range: default_range,
    }]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE_LIST: &str = "topics:\n  - name: /imu\n    hz_range: [50, 150]\n  - name: /camera.*\n  - name: /imu\n    hz_range: [10, 20]\n";

    fn write_list(contents: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(contents.as_bytes()).unwrap();
        f
    }

    #[test]
    fn test_topic_list_order_and_defaults() {
        let f = write_list(SAMPLE_LIST);
        let default_range = RateRange::default();
        let entries = from_topic_list(f.path(), default_range).unwrap();

        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].pattern, "/imu");
        assert_eq!(entries[0].range, RateRange { min: 50.0, max: 150.0 });
        assert_eq!(entries[1].pattern, "/camera.*");
        assert_eq!(entries[1].range, default_range);
        // duplicate pattern kept, with its own range
        assert_eq!(entries[2].pattern, "/imu");
        assert_eq!(entries[2].range, RateRange { min: 10.0, max: 20.0 });
    }

    #[test]
    fn test_topic_list_missing_name_is_config_error() {
        let f = write_list("topics:\n  - hz_range: [1, 2]\n");
        let err = from_topic_list(f.path(), RateRange::default()).unwrap_err();
        assert!(matches!(err, CheckerError::Config(_)));
    }

    #[test]
    fn test_topic_list_malformed_yaml_is_config_error() {
        let f = write_list("topics: [a, {b\n");
        let err = from_topic_list(f.path(), RateRange::default()).unwrap_err();
        assert!(matches!(err, CheckerError::Config(_)));
    }

    #[test]
    fn test_topic_list_missing_file_is_config_error() {
        let err =
            from_topic_list(Path::new("/nonexistent/topics.yaml"), RateRange::default())
                .unwrap_err();
        assert!(matches!(err, CheckerError::Config(_)));
    }

    #[test]
    fn test_inverted_range_is_config_error() {
        let f = write_list("topics:\n  - name: /imu\n    hz_range: [300, 200]\n");
        let err = from_topic_list(f.path(), RateRange::default()).unwrap_err();
        assert!(matches!(err, CheckerError::Config(_)));
    }

    #[test]
    fn test_single_pattern_entry() {
        let range = RateRange::new(5.0, 10.0).unwrap();
        let entries = from_single_pattern("/odom", range);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].pattern, "/odom");
        assert_eq!(entries[0].range, range);
    }

    #[test]
    fn test_document_round_trip() {
        let doc = TopicListDoc {
            topics: vec![
                TopicDecl {
                    name: "/imu".to_string(),
                    hz_range: Some([50.0, 150.0]),
                },
                TopicDecl {
                    name: "/camera.*".to_string(),
                    hz_range: None,
                },
            ],
        };

        let text = serde_yaml::to_string(&doc).unwrap();
        let reparsed: TopicListDoc = serde_yaml::from_str(&text).unwrap();
        assert_eq!(reparsed, doc);

        let default_range = RateRange::default();
        let entries = from_doc(doc, default_range).unwrap();
        let entries_again = from_doc(reparsed, default_range).unwrap();
        assert_eq!(entries, entries_again);
    }

    #[test]
    fn test_rate_range_contains() {
        let range = RateRange::new(50.0, 150.0).unwrap();
        assert!(range.contains(50.0));
        assert!(range.contains(150.0));
        assert!(!range.contains(49.9));
        assert!(!range.contains(150.1));

        // the default band accepts any finite non-negative rate
        let default_range = RateRange::default();
        assert!(default_range.contains(0.0));
        assert!(default_range.contains(1e9));
    }
}
