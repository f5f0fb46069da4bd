//! Instruction prompt for one analysis batch

use crate::crawler::{truncate_chars, CrawledPage};

const INSTRUCTIONS: &str = "You write hands-on technical tutorials for developers. \
Read the documentation pages below and propose 3-5 tutorials that would teach a \
specific, practical skill. Prefer focused topics over broad surveys.";

const SCHEMA: &str = r#"For each tutorial provide:
1. An actionable title, e.g. "Building a REST API with Express.js"
2. A summary of 2-3 sentences
3. A difficulty: Beginner, Intermediate or Advanced
4. An estimated completion time, e.g. "2 hours"
5. 3-5 prerequisites
6. 3-5 learning objectives
7. An outline of 5-8 sections, each with a title, a short description and 2-4 topics
8. 2-3 documentation URLs taken from the pages above

Reply with a JSON array in exactly this shape:

```json
[
  {
    "title": "Tutorial Title",
    "summary": "Brief summary...",
    "difficulty": "Beginner|Intermediate|Advanced",
    "estimatedTime": "X hours",
    "prerequisites": ["prereq1", "prereq2"],
    "learningObjectives": ["objective1", "objective2"],
    "outline": [
      {
        "title": "Section 1",
        "description": "What this section covers",
        "topics": ["topic1", "topic2"]
      }
    ],
    "resources": ["url1", "url2"]
  }
]
```

Return only the JSON array."#;

/// Builds the prompt for one batch of pages
///
/// Each page contributes its URL, title, comma-joined headings and the first
/// `preview_chars` characters of its content.
pub fn build_prompt(pages: &[CrawledPage], preview_chars: usize) -> String {
    let context = pages
        .iter()
        .enumerate()
        .map(|(idx, page)| {
            let mut block = String::new();
            block.push_str(&format!("Page {}:\n", idx + 1));
            block.push_str(&format!("URL: {}\n", page.url));
            block.push_str(&format!("Title: {}\n", page.title));
            block.push_str(&format!("Headings: {}\n", page.headings.join(", ")));
            block.push_str(&format!(
                "Content preview: {}...\n",
                truncate_chars(&page.content, preview_chars)
            ));
            block
        })
        .collect::<Vec<_>>()
        .join("\n---\n");

    format!("{INSTRUCTIONS}\n\n{context}\n{SCHEMA}")
}
