//! CSV index of generated tutorials

use crate::analyzer::TutorialIdea;
use crate::output::filename::tutorial_filename;

const HEADER: [&str; 8] = [
    "Number",
    "Title",
    "Difficulty",
    "Estimated Time",
    "Estimated Cost",
    "Summary",
    "Prerequisites",
    "Filename",
];

/// Quotes a field when it contains a comma, quote, CR or LF
///
/// Inner quotes are doubled.
pub fn escape_csv(value: &str) -> String {
    if value.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Renders the index: a header line, then one row per tutorial
///
/// Lines are joined with `\n` and there is no trailing newline.
pub fn generate_csv(tutorials: &[TutorialIdea]) -> String {
    let mut lines = Vec::with_capacity(tutorials.len() + 1);
    lines.push(HEADER.join(","));

    for (index, tutorial) in tutorials.iter().enumerate() {
        let row = [
            (index + 1).to_string(),
            escape_csv(&tutorial.title),
            escape_csv(tutorial.difficulty_label()),
            escape_csv(&tutorial.estimated_time),
            tutorial.estimated_cost.to_string(),
            escape_csv(&tutorial.summary),
            escape_csv(&tutorial.prerequisites.join("; ")),
            escape_csv(&tutorial_filename(&tutorial.title, index)),
        ];
        lines.push(row.join(","));
    }

    lines.join("\n")
}
