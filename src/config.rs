use crate::error::CheckerError;
use crate::requirements::{self, RateRange, RequirementEntry};
use std::path::PathBuf;
use tracing::info;

/// Where the requirement list comes from, resolved once at startup.
#[derive(Debug, Clone)]
pub enum TopicSource {
    /// YAML document listing topics and optional frequency requirements.
    TopicList(PathBuf),
    /// Single topic name or regular expression with the default range.
    SinglePattern(String),
}

/// Immutable configuration for one check invocation.
///
/// Passed by reference into the pipeline, so repeated runs (the benchmark
/// harness) share nothing mutable.
#[derive(Debug, Clone)]
pub struct CheckConfig {
    pub bag_file: PathBuf,
    pub topic_source: TopicSource,
    pub check_frequency: bool,
    pub default_range: RateRange,
}

impl CheckConfig {
    pub fn resolve(
        bag_file: PathBuf,
        topic_list: Option<PathBuf>,
        topics: Option<String>,
        check_frequency: bool,
        default_range: RateRange,
    ) -> Result<Self, CheckerError> {
        let topic_source = match (topic_list, topics) {
            (Some(path), _) => {
                info!("using topic list {}", path.display());
                TopicSource::TopicList(path)
            }
            (None, Some(pattern)) => {
                info!("checking topics matching pattern {}", pattern);
                TopicSource::SinglePattern(pattern)
            }
            (None, None) => {
                return Err(CheckerError::Config(
                    "give a topic list file or a topic pattern to check".to_string(),
                ))
            }
        };

        if check_frequency {
            info!("including check for frequency requirements");
        }

        Ok(CheckConfig {
            bag_file,
            topic_source,
            check_frequency,
            default_range,
        })
    }

    /// Build the ordered requirement sequence for this configuration.
    pub fn requirements(&self) -> Result<Vec<RequirementEntry>, CheckerError> {
        match &self.topic_source {
            TopicSource::TopicList(path) => {
                requirements::from_topic_list(path, self.default_range)
            }
            TopicSource::SinglePattern(pattern) => {
                Ok(requirements::from_single_pattern(pattern, self.default_range))
            }
        }
    }
}
