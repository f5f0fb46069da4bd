//! Markdown generation
//!
//! This module renders the per-tutorial scaffold handed back to callers and
//! the README that accompanies a bundle written to disk.

use crate::analyzer::TutorialIdea;
use crate::pipeline::GenerationResult;
use chrono::{DateTime, Utc};

/// Renders the writing scaffold for one tutorial
///
/// # Layout
///
/// - title and metadata block (difficulty, time, cost)
/// - overview (the summary)
/// - prerequisites as a checklist
/// - learning objectives
/// - one section per outline entry, its topics as TODO bullets
/// - resources
pub fn render_scaffold(tutorial: &TutorialIdea) -> String {
    let mut md = String::new();

    md.push_str(&format!("# {}\n\n", tutorial.title));

    let difficulty = match tutorial.difficulty_label() {
        "" => "Unspecified",
        label => label,
    };
    md.push_str(&format!("**Difficulty:** {}  \n", difficulty));
    md.push_str(&format!(
        "**Estimated Time:** {}  \n",
        tutorial.estimated_time
    ));
    md.push_str(&format!(
        "**Estimated Cost:** ${}\n\n",
        tutorial.estimated_cost
    ));

    md.push_str("## Overview\n\n");
    md.push_str(&format!("{}\n\n", tutorial.summary));

    if !tutorial.prerequisites.is_empty() {
        md.push_str("## Prerequisites\n\n");
        for prerequisite in &tutorial.prerequisites {
            md.push_str(&format!("- [ ] {}\n", prerequisite));
        }
        md.push('\n');
    }

    if !tutorial.learning_objectives.is_empty() {
        md.push_str("## What You'll Learn\n\n");
        for objective in &tutorial.learning_objectives {
            md.push_str(&format!("- {}\n", objective));
        }
        md.push('\n');
    }

    for (number, section) in tutorial.outline.iter().enumerate() {
        md.push_str(&format!("## {}. {}\n\n", number + 1, section.title));
        if !section.description.is_empty() {
            md.push_str(&format!("{}\n\n", section.description));
        }
        for topic in &section.topics {
            md.push_str(&format!("- TODO: {}\n", topic));
        }
        if !section.topics.is_empty() {
            md.push('\n');
        }
    }

    if !tutorial.resources.is_empty() {
        md.push_str("## Resources\n\n");
        for resource in &tutorial.resources {
            md.push_str(&format!("- {}\n", resource));
        }
        md.push('\n');
    }

    md
}

/// Renders the README written next to a bundle of scaffolds
pub fn render_readme(
    source_url: &str,
    generated_at: DateTime<Utc>,
    result: &GenerationResult,
) -> String {
    let mut md = String::new();

    md.push_str("# Tutorial Scaffolds\n\n");
    md.push_str(&format!("Generated from: {}\n", source_url));
    md.push_str(&format!(
        "Generated at: {}\n\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    md.push_str("## Statistics\n\n");
    md.push_str(&format!("- Pages Crawled: {}\n", result.stats.pages_crawled));
    md.push_str(&format!(
        "- Tutorials Generated: {}\n",
        result.stats.tutorials_generated
    ));
    md.push_str(&format!(
        "- Total Estimated Cost: {}\n\n",
        result.stats.total_estimated_cost
    ));

    md.push_str("## Files\n\n");
    md.push_str("- tutorial-index.csv\n");
    for (number, file) in result.files.iter().enumerate() {
        md.push_str(&format!(
            "{}. {} - {}\n",
            number + 1,
            file.filename,
            file.tutorial.title
        ));
    }
    md.push('\n');

    md.push_str("## Next Steps\n\n");
    md.push_str("1. Review tutorial-index.csv for an overview\n");
    md.push_str("2. Pick the tutorials worth developing\n");
    md.push_str("3. Expand each scaffold into a full tutorial\n");
    md.push_str("4. Test every code example\n");

    md
}
