use crate::bag::{self, BagFacts, TopicFact};
use crate::config::CheckConfig;
use crate::error::CheckerError;
use crate::report::{EntryReport, Report, ReportLine, Status};
use crate::requirements::{RateRange, RequirementEntry};
use regex::Regex;
use tracing::{info, warn};

/// Full pipeline for one check: build requirements, read bag metadata,
/// match and score every entry, assemble the report.
pub fn check_bag(config: &CheckConfig) -> Result<Report, CheckerError> {
    let entries = config.requirements()?;
    let facts = bag::read_metadata(&config.bag_file)?;
    info!("rosbag duration = {} s", facts.duration_seconds);
    run_check(&entries, &facts, config.check_frequency)
}

/// Score every requirement entry against the bag facts, in entry order.
///
/// A zero-duration bag makes every rate undefined, so the whole check fails
/// fast instead of reporting misleading numbers. An invalid pattern only
/// fails its own entry.
pub fn run_check(
    entries: &[RequirementEntry],
    facts: &BagFacts,
    check_frequency: bool,
) -> Result<Report, CheckerError> {
    if facts.duration_seconds == 0.0 {
        return Err(CheckerError::ZeroDuration);
    }

    let mut out = Vec::with_capacity(entries.len());
    for entry in entries {
        match match_topics(&entry.pattern, &facts.topics) {
            Err(err) => {
                warn!("{}", err);
                out.push(EntryReport::pattern_error(&entry.pattern, err.to_string()));
            }
            Ok(matched) if matched.is_empty() => {
                out.push(EntryReport::not_found(&entry.pattern));
            }
            Ok(matched) => {
                let lines = matched
                    .into_iter()
                    .map(|topic| {
                        evaluate(topic, facts.duration_seconds, entry.range, check_frequency)
                    })
                    .collect();
                out.push(EntryReport {
                    pattern: entry.pattern.clone(),
                    error: None,
                    lines,
                });
            }
        }
    }

    Ok(Report { entries: out })
}

/// Present topics whose full name matches the pattern, in bag order.
///
/// The pattern is anchored so it must cover the entire topic name; an exact
/// name without regex metacharacters therefore behaves as a literal.
fn match_topics<'a>(
    pattern: &str,
    topics: &'a [TopicFact],
) -> Result<Vec<&'a TopicFact>, CheckerError> {
    let re = Regex::new(&format!("^(?:{})$", pattern)).map_err(|source| {
        CheckerError::Pattern {
            pattern: pattern.to_string(),
            source,
        }
    })?;
    Ok(topics.iter().filter(|t| re.is_match(&t.name)).collect())
}

/// Compute the observed rate for one matched topic and classify it.
fn evaluate(
    topic: &TopicFact,
    duration_seconds: f64,
    range: RateRange,
    check_frequency: bool,
) -> ReportLine {
    let rate = topic.message_count as f64 / duration_seconds;
    let status = if topic.message_count == 0 {
        Status::Empty
    } else if !check_frequency {
        Status::Healthy
    } else if !range.contains(rate) {
        Status::OutOfRange
    } else {
        Status::Healthy
    };

    ReportLine {
        name: topic.name.clone(),
        message_count: topic.message_count,
        rate,
        status,
    }
}
