//! Structured problem statements
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::Error;
use crate::extract::{TextMode, deep_text, normalize_whitespace, own_text};
use crate::locate::{find_all, find_first, matches};
use crate::markup::{Document, NodeRef};

/// Class of the container holding the whole statement.
const STATEMENT_CLASS: &str = "problem-statement";
/// Class of the block with the title and limits. The statement body is the element after it.
const HEADER_CLASS: &str = "header";
const TITLE_CLASS: &str = "title";
const TIME_LIMIT_CLASS: &str = "time-limit";
const MEMORY_LIMIT_CLASS: &str = "memory-limit";
const INPUT_FILE_CLASS: &str = "input-file";
const OUTPUT_FILE_CLASS: &str = "output-file";
const INPUT_SPECIFICATION_CLASS: &str = "input-specification";
const OUTPUT_SPECIFICATION_CLASS: &str = "output-specification";
const NOTE_CLASS: &str = "note";
/// Class of the heading inside a section, e.g. "Input" or "Note".
const SECTION_TITLE_CLASS: &str = "section-title";
const SAMPLE_INPUT_CLASS: &str = "input";
const SAMPLE_OUTPUT_CLASS: &str = "output";
/// Class of the sidebar entries holding the problem tags and the difficulty rating.
const TAG_CLASS: &str = "tag-box";

/// Elements whose text is rendered as a paragraph of its own.
const BLOCK_TAGS: &[&str] = &[
    "p",
    "div",
    "pre",
    "ul",
    "ol",
    "table",
    "center",
    "blockquote",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
];

/// A problem statement as presented on a Codeforces problem page.
///
/// Every field that cannot be found in the page is left empty.
///
/// # HTML Source
/// Parsed from the `<div class="problem-statement">` element, or from the whole document if there
/// is none
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Problem {
    /// The problem title, including its index
    ///
    /// Examples: `A. Next Round`
    ///
    /// Parsed from the first `<div class="title">` element
    pub title: String,

    /// The time limit per test
    ///
    /// Examples: `2 seconds`
    ///
    /// Parsed from the direct text of `<div class="time-limit">`
    pub time_limit: String,

    /// The memory limit per test
    ///
    /// Examples: `256 megabytes`
    ///
    /// Parsed from the direct text of `<div class="memory-limit">`
    pub memory_limit: String,

    /// Where the input is read from, usually `standard input`
    pub input_file: String,

    /// Where the output is written to, usually `standard output`
    pub output_file: String,

    /// The legend, one paragraph per block separated by blank lines
    ///
    /// Parsed from the element that follows `<div class="header">`
    pub statement: String,

    /// Description of the input format
    pub input_specification: String,

    /// Description of the output format
    pub output_specification: String,

    /// Example tests, in the order they appear
    pub samples: Vec<Sample>,

    /// Explanation of the examples, if any
    pub note: String,

    /// Topic tags, in the order they appear
    ///
    /// Examples: `implementation`, `*special problem`
    ///
    /// Parsed from `<span class="tag-box">` elements anywhere on the page, except the rating
    pub tags: Vec<String>,

    /// The difficulty rating
    ///
    /// Parsed from the `<span class="tag-box">` whose text is `*` followed by a number, e.g. `*800`
    pub difficulty: Option<u32>,
}

/// An example test.
///
/// # HTML Source
/// Parsed from the `<pre>` elements of paired `<div class="input">` and `<div class="output">`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Sample {
    /// Input fed to the solution
    pub input: String,
    /// Expected output
    pub output: String,
}

impl Problem {
    /// Parses a problem page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if `html` is empty or not text. Missing fields are not errors.
    pub fn from_html(html: impl AsRef<str>) -> Result<Problem, Error> {
        let document = Document::parse_str(html.as_ref())?;

        Ok(Problem::from_document(&document))
    }

    /// Extracts a problem from a parsed page.
    #[must_use]
    pub fn from_document(document: &Document) -> Problem {
        let root = Some(document.root());
        let scope = find_first(root, "div", Some(STATEMENT_CLASS)).or(root);
        let property = |class| own_text(find_first(scope, "div", Some(class)), TextMode::Filtered);
        let section = |class| paragraphs(find_first(scope, "div", Some(class)));
        let body = find_first(scope, "div", Some(HEADER_CLASS)).and_then(NodeRef::next_element_sibling);
        let (tags, difficulty) = tag_boxes(root);

        Problem {
            title: property(TITLE_CLASS),
            time_limit: property(TIME_LIMIT_CLASS),
            memory_limit: property(MEMORY_LIMIT_CLASS),
            input_file: property(INPUT_FILE_CLASS),
            output_file: property(OUTPUT_FILE_CLASS),
            statement: paragraphs(body),
            input_specification: section(INPUT_SPECIFICATION_CLASS),
            output_specification: section(OUTPUT_SPECIFICATION_CLASS),
            samples: samples(scope),
            note: section(NOTE_CLASS),
            tags,
            difficulty,
        }
    }

    /// Returns the time limit in milliseconds, if it has a recognizable unit.
    ///
    /// `"2 seconds"` is `2000`, `"0.5 seconds"` is `500` and `"250 milliseconds"` is `250`.
    #[must_use]
    pub fn time_limit_ms(&self) -> Option<u32> {
        let (amount, unit) = split_quantity(&self.time_limit)?;
        let factor = match unit.as_str() {
            "second" | "seconds" | "sec" | "s" => 1000.0,
            "millisecond" | "milliseconds" | "ms" => 1.0,
            _ => return None,
        };

        to_u32(amount * factor)
    }

    /// Returns the memory limit in megabytes, if it has a recognizable unit.
    ///
    /// `"256 megabytes"` is `256` and `"1 gigabyte"` is `1024`.
    #[must_use]
    pub fn memory_limit_mb(&self) -> Option<u32> {
        let (amount, unit) = split_quantity(&self.memory_limit)?;
        let factor = match unit.as_str() {
            "kilobyte" | "kilobytes" | "kb" => 1.0 / 1024.0,
            "megabyte" | "megabytes" | "mb" => 1.0,
            "gigabyte" | "gigabytes" | "gb" => 1024.0,
            _ => return None,
        };

        to_u32(amount * factor)
    }
}

/// Splits `"<amount> <unit>"` into a number and a lowercased unit.
fn split_quantity(text: &str) -> Option<(f64, String)> {
    let mut parts = text.split_whitespace();
    let amount = parts.next()?.parse::<f64>().ok()?;
    let unit = parts.next()?.to_ascii_lowercase();

    Some((amount, unit))
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u32(value: f64) -> Option<u32> {
    let value = value.round();

    (value.is_finite() && (0.0..=f64::from(u32::MAX)).contains(&value)).then_some(value as u32)
}

/// Renders the children of `node` as paragraphs separated by blank lines.
///
/// Block elements become paragraphs of their own, runs of inline content between them are joined
/// into one. Section headings are skipped.
fn paragraphs(node: Option<NodeRef<'_>>) -> String {
    let Some(node) = node else {
        return String::new();
    };

    let mut blocks = Vec::new();
    let mut inline = String::new();

    for child in node.children() {
        if matches(child, "div", Some(SECTION_TITLE_CLASS)) {
            continue;
        }

        match child.tag_name() {
            Some("pre") => {
                push_block(&mut blocks, normalize_whitespace(&inline));
                inline.clear();
                push_block(&mut blocks, preformatted(Some(child)).trim_end().to_string());
            }
            Some(tag) if BLOCK_TAGS.contains(&tag) => {
                push_block(&mut blocks, normalize_whitespace(&inline));
                inline.clear();
                push_block(&mut blocks, normalize_whitespace(&flowing_text(child)));
            }
            _ => inline.push_str(&flowing_text(child)),
        }
    }

    push_block(&mut blocks, normalize_whitespace(&inline));

    blocks.join("\n\n")
}

/// Returns the text of the subtree at `node` in document order, with every `<br>` read as a space.
fn flowing_text(node: NodeRef<'_>) -> String {
    let mut text = String::new();

    for descendant in node.descendants() {
        if let Some(content) = descendant.text() {
            text.push_str(content);
        } else if descendant.tag_name() == Some("br") {
            text.push(' ');
        }
    }

    text
}

fn push_block(blocks: &mut Vec<String>, block: String) {
    if !block.is_empty() {
        blocks.push(block);
    }
}

/// Returns the text of a `<pre>` element with its line structure intact.
///
/// Line breaks may be encoded as `<br>` elements or as one `<div>` per line. Trailing whitespace
/// is stripped from every line, and a non-empty result always ends with a newline.
fn preformatted(node: Option<NodeRef<'_>>) -> String {
    let Some(node) = node else {
        return String::new();
    };

    let mut text = String::new();

    for child in node.children() {
        match child.tag_name() {
            Some("br") => text.push('\n'),
            Some("div") => {
                text.push_str(&deep_text(Some(child), TextMode::Raw));
                text.push('\n');
            }
            _ => text.push_str(&deep_text(Some(child), TextMode::Raw)),
        }
    }

    let mut lines: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .skip_while(|line| line.is_empty())
        .collect();

    while lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    if lines.is_empty() {
        return String::new();
    }

    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// Collects the tag boxes of the page, splitting off the `*NNN` difficulty rating.
fn tag_boxes(root: Option<NodeRef<'_>>) -> (Vec<String>, Option<u32>) {
    let mut tags = Vec::new();
    let mut difficulty = None;

    for node in find_all(root, "span", Some(TAG_CLASS)) {
        let text = deep_text(Some(node), TextMode::Filtered);

        match text.strip_prefix('*').and_then(|rating| rating.parse().ok()) {
            Some(rating) if difficulty.is_none() => difficulty = Some(rating),
            Some(_) => {}
            None if !text.is_empty() => tags.push(text),
            None => {}
        }
    }

    (tags, difficulty)
}

/// Pairs every sample input block with the output block that follows it.
fn samples(scope: Option<NodeRef<'_>>) -> Vec<Sample> {
    let inputs = find_all(scope, "div", Some(SAMPLE_INPUT_CLASS));
    let outputs = find_all(scope, "div", Some(SAMPLE_OUTPUT_CLASS));

    inputs
        .into_iter()
        .zip(outputs)
        .map(|(input, output)| Sample {
            input: preformatted(find_first(Some(input), "pre", None)),
            output: preformatted(find_first(Some(output), "pre", None)),
        })
        .collect()
}
