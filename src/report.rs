use colored::{ColoredString, Colorize};
use serde::Serialize;

/// Classification of one matched topic against its rate requirement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Messages present and, when frequency checking is on, inside the band.
    Healthy,
    /// Messages present but the observed rate falls outside the band.
    OutOfRange,
    /// No messages: a matched topic with count zero, or a pattern that
    /// matched no topic at all.
    Empty,
}

/// One rendered line: a matched topic, or the synthetic fallback line for a
/// pattern that matched nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportLine {
    pub name: String,
    pub message_count: u64,
    pub rate: f64,
    pub status: Status,
}

/// All lines produced for one requirement entry, in match order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EntryReport {
    pub pattern: String,
    /// Set when the pattern failed to compile; the entry still renders as a
    /// single failing line so the rest of the report is unaffected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub lines: Vec<ReportLine>,
}

impl EntryReport {
    /// Fallback block for a pattern that matched no present topic.
    pub fn not_found(pattern: &str) -> Self {
        EntryReport {
            pattern: pattern.to_string(),
            error: None,
            lines: vec![ReportLine {
                name: pattern.to_string(),
                message_count: 0,
                rate: 0.0,
                status: Status::Empty,
            }],
        }
    }

    pub fn pattern_error(pattern: &str, error: String) -> Self {
        EntryReport {
            error: Some(error),
            ..EntryReport::not_found(pattern)
        }
    }
}

/// Final check result: one entry block per declared requirement, in
/// declaration order. Purely derived from the bag facts and requirements.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub entries: Vec<EntryReport>,
}

impl Report {
    /// True when every line is healthy.
    pub fn all_healthy(&self) -> bool {
        self.entries
            .iter()
            .flat_map(|e| &e.lines)
            .all(|l| l.status == Status::Healthy)
    }

    /// Color-coded console text, one block per line in the shape
    /// `Statistics for topic <name> / Message count = <n>, Message frequency = <hz>`.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for entry in &self.entries {
            for line in &entry.lines {
                let text = format!(
                    "Statistics for topic {}\nMessage count = {}, Message frequency = {}",
                    line.name, line.message_count, line.rate
                );
                out.push_str(&format!("{}\n\n", paint(line.status, &text)));
            }
        }
        out
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn paint(status: Status, text: &str) -> ColoredString {
    match status {
        Status::Healthy => text.green(),
        Status::OutOfRange => text.yellow(),
        Status::Empty => text.red(),
    }
}
