//! Line-oriented brief renderer.
//!
//! Each line is first classified on its own ([`Line`]), then fed to a
//! [`BlockParser`] whose state is one of `Default`, `InList`, `InTable` or
//! `InCodeBlock`. Open lists and tables collect their rows inside the state
//! and become a [`Block`] when an incompatible line arrives or input ends.

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use crate::inline::{convert_spans, escape_html};

static HEADING: Lazy<Regex> = Lazy::new(|| compile(r"^(#{1,4})\s+(.+)$"));
static ORDINAL: Lazy<Regex> = Lazy::new(|| compile(r"^\d+\.\s+(.+)$"));
static SEPARATOR_CELL: Lazy<Regex> = Lazy::new(|| compile(r"^[-:]+$"));
static RULE: Lazy<Regex> = Lazy::new(|| compile(r"^[-*_]{3,}$"));

#[expect(clippy::expect_used, reason = "patterns are literals checked by tests")]
fn compile(pattern: &str) -> Regex {
    Regex::new(pattern).expect("brief pattern is valid")
}

/// A rendered block. Text fields already hold converted, escaped markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    Heading { level: usize, text: String },
    Table { header: Vec<String>, rows: Vec<Vec<String>> },
    List { ordered: bool, items: Vec<String> },
    Quote(String),
    Rule,
    Paragraph(String),
    Code(Vec<String>),
}

/// What a single line is, independent of the current state.
#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Fence,
    Blank,
    Heading { level: usize, text: &'a str },
    Separator,
    Row(Vec<&'a str>),
    Item { ordered: bool, text: &'a str },
    Quote(&'a str),
    Rule,
    Text { text: &'a str, indented: bool },
}

impl<'a> Line<'a> {
    fn classify(line: &'a str) -> Self {
        let trimmed = line.trim_start();

        if trimmed.starts_with("```") {
            return Self::Fence;
        }
        if trimmed.is_empty() {
            return Self::Blank;
        }
        if let Some(caps) = HEADING.captures(line) {
            if let (Some(marks), Some(text)) = (caps.get(1), caps.get(2)) {
                return Self::Heading {
                    level: marks.as_str().len(),
                    text: text.as_str().trim(),
                };
            }
        }
        if trimmed.starts_with('|') {
            let cells = split_cells(trimmed);
            let separator = cells
                .iter()
                .filter(|cell| !cell.is_empty())
                .all(|cell| SEPARATOR_CELL.is_match(cell));
            return if separator {
                Self::Separator
            } else {
                Self::Row(cells)
            };
        }
        if let Some(text) = trimmed
            .strip_prefix("- ")
            .or_else(|| trimmed.strip_prefix("* "))
        {
            return Self::Item {
                ordered: false,
                text: text.trim(),
            };
        }
        if let Some(text) = ORDINAL.captures(trimmed).and_then(|caps| caps.get(1)) {
            return Self::Item {
                ordered: true,
                text: text.as_str().trim(),
            };
        }
        if let Some(text) = trimmed.strip_prefix('>') {
            return Self::Quote(text.trim());
        }
        if RULE.is_match(trimmed) {
            return Self::Rule;
        }

        Self::Text {
            text: trimmed,
            indented: trimmed.len() != line.len(),
        }
    }
}

/// Cells between the leading `|` and an optional trailing `|`.
fn split_cells(row: &str) -> Vec<&str> {
    let inner = row.strip_prefix('|').unwrap_or(row);
    let inner = inner.strip_suffix('|').unwrap_or(inner);
    inner.split('|').map(str::trim).collect()
}

#[derive(Debug, Default)]
enum State {
    #[default]
    Default,
    InList {
        ordered: bool,
        items: Vec<String>,
    },
    InTable {
        header: Vec<String>,
        rows: Vec<Vec<String>>,
    },
    InCodeBlock(Vec<String>),
}

#[derive(Debug, Default)]
struct BlockParser {
    state: State,
    blocks: Vec<Block>,
}

impl BlockParser {
    fn feed(&mut self, raw: &str) {
        let line = raw.trim_end();
        let kind = Line::classify(line);

        if let State::InCodeBlock(lines) = &mut self.state {
            if kind == Line::Fence {
                self.close();
            } else {
                lines.push(escape_html(line));
            }
            return;
        }

        match kind {
            Line::Fence => {
                self.close();
                self.state = State::InCodeBlock(Vec::new());
            }
            Line::Blank | Line::Separator => {}
            Line::Heading { level, text } => {
                self.close();
                self.blocks.push(Block::Heading {
                    level,
                    text: convert_spans(text),
                });
            }
            Line::Row(cells) => {
                let cells: Vec<String> = cells.into_iter().map(convert_spans).collect();
                if let State::InTable { rows, .. } = &mut self.state {
                    rows.push(cells);
                } else {
                    self.close();
                    self.state = State::InTable {
                        header: cells,
                        rows: Vec::new(),
                    };
                }
            }
            Line::Item { ordered, text } => {
                let item = convert_spans(text);
                if let State::InList { items, .. } = &mut self.state {
                    items.push(item);
                } else {
                    self.close();
                    self.state = State::InList {
                        ordered,
                        items: vec![item],
                    };
                }
            }
            Line::Text {
                text,
                indented: true,
            } if matches!(self.state, State::InList { .. }) => {
                if let State::InList { items, .. } = &mut self.state {
                    if let Some(last) = items.last_mut() {
                        last.push(' ');
                        last.push_str(&convert_spans(text));
                    }
                }
            }
            Line::Quote(text) => self.push(Block::Quote(convert_spans(text))),
            Line::Rule => self.push(Block::Rule),
            Line::Text { text, .. } => self.push(Block::Paragraph(convert_spans(text))),
        }
    }

    fn push(&mut self, block: Block) {
        self.close();
        self.blocks.push(block);
    }

    /// Emit whatever the current state has collected and return to `Default`.
    fn close(&mut self) {
        match std::mem::take(&mut self.state) {
            State::Default => {}
            State::InList { ordered, items } => self.blocks.push(Block::List { ordered, items }),
            State::InTable { header, rows } => self.blocks.push(Block::Table { header, rows }),
            State::InCodeBlock(lines) => self.blocks.push(Block::Code(lines)),
        }
    }

    fn finish(mut self) -> Vec<Block> {
        if matches!(self.state, State::InCodeBlock(_)) {
            debug!("brief ended inside a code block");
        }
        self.close();
        self.blocks
    }
}

/// Parse a brief document into blocks.
#[must_use]
pub fn parse_blocks(markdown: &str) -> Vec<Block> {
    let mut parser = BlockParser::default();
    for line in markdown.lines() {
        parser.feed(line);
    }
    parser.finish()
}

/// Write blocks as HTML, one block element per line.
#[must_use]
pub fn to_html(blocks: &[Block]) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(blocks.len());

    for block in blocks {
        match block {
            Block::Heading { level, text } => parts.push(format!("<h{level}>{text}</h{level}>")),
            Block::Table { header, rows } => {
                parts.push("<table>".to_string());
                parts.push(table_row("th", header));
                parts.extend(rows.iter().map(|row| table_row("td", row)));
                parts.push("</table>".to_string());
            }
            Block::List { ordered, items } => {
                let tag = if *ordered { "ol" } else { "ul" };
                parts.push(format!("<{tag}>"));
                parts.extend(items.iter().map(|item| format!("<li>{item}</li>")));
                parts.push(format!("</{tag}>"));
            }
            Block::Quote(text) => parts.push(format!("<blockquote>{text}</blockquote>")),
            Block::Rule => parts.push("<hr>".to_string()),
            Block::Paragraph(text) => parts.push(format!("<p>{text}</p>")),
            Block::Code(lines) => parts.push(format!("<pre><code>{}</code></pre>", lines.join("\n"))),
        }
    }

    parts.join("\n")
}

fn table_row(tag: &str, cells: &[String]) -> String {
    let mut row = cells.iter().fold(String::from("<tr>"), |mut row, cell| {
        row.push_str(&format!("<{tag}>{cell}</{tag}>"));
        row
    });
    row.push_str("</tr>");
    row
}

/// Render a brief document to HTML.
#[must_use]
pub fn render(markdown: &str) -> String {
    to_html(&parse_blocks(markdown))
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = "## Heading\n| A | B |\n|---|---|\n| 1 | 2 |\n- item one\n- item two\n";

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_fixture_blocks_in_order() {
        assert_eq!(
            parse_blocks(FIXTURE),
            vec![
                Block::Heading {
                    level: 2,
                    text: "Heading".to_string()
                },
                Block::Table {
                    header: strings(&["A", "B"]),
                    rows: vec![strings(&["1", "2"])],
                },
                Block::List {
                    ordered: false,
                    items: strings(&["item one", "item two"]),
                },
            ]
        );
    }

    #[test]
    fn test_fixture_html_closes_table_before_list() {
        let html = render(FIXTURE);
        assert_eq!(
            html,
            "<h2>Heading</h2>\n<table>\n<tr><th>A</th><th>B</th></tr>\n<tr><td>1</td><td>2</td></tr>\n</table>\n<ul>\n<li>item one</li>\n<li>item two</li>\n</ul>"
        );
    }

    #[test]
    fn test_code_block_is_verbatim_and_escaped() {
        let blocks = parse_blocks("```\n# not a heading\n<b>**x**</b>\n```\nafter");
        assert_eq!(
            blocks,
            vec![
                Block::Code(strings(&["# not a heading", "&lt;b&gt;**x**&lt;/b&gt;"])),
                Block::Paragraph("after".to_string()),
            ]
        );
    }

    #[test]
    fn test_unterminated_code_block_closes_at_end() {
        assert_eq!(
            parse_blocks("```\nlet x = 1;"),
            vec![Block::Code(strings(&["let x = 1;"]))]
        );
    }

    #[test]
    fn test_blank_lines_keep_list_open() {
        let blocks = parse_blocks("- one\n\n- two\nplain");
        assert_eq!(
            blocks,
            vec![
                Block::List {
                    ordered: false,
                    items: strings(&["one", "two"]),
                },
                Block::Paragraph("plain".to_string()),
            ]
        );
    }

    #[test]
    fn test_indented_line_continues_list_item() {
        let blocks = parse_blocks("- first\n  wrapped *text*\n- second");
        assert_eq!(
            blocks,
            vec![Block::List {
                ordered: false,
                items: strings(&["first wrapped <em>text</em>", "second"]),
            }]
        );
    }

    #[test]
    fn test_ordered_list() {
        let blocks = parse_blocks("1. alpha\n2. beta");
        assert_eq!(
            blocks,
            vec![Block::List {
                ordered: true,
                items: strings(&["alpha", "beta"]),
            }]
        );
        assert!(to_html(&blocks).starts_with("<ol>"));
    }

    #[test]
    fn test_list_then_table_do_not_interleave() {
        let blocks = parse_blocks("- a\n| x |\n- b");
        assert_eq!(blocks.len(), 3);
        assert!(matches!(blocks[0], Block::List { .. }));
        assert!(matches!(blocks[1], Block::Table { .. }));
        assert!(matches!(blocks[2], Block::List { .. }));
    }

    #[test]
    fn test_heading_levels_and_spans() {
        let blocks = parse_blocks("# **Top**\n#### four\n##### five");
        assert_eq!(
            blocks,
            vec![
                Block::Heading {
                    level: 1,
                    text: "<strong>Top</strong>".to_string()
                },
                Block::Heading {
                    level: 4,
                    text: "four".to_string()
                },
                Block::Paragraph("##### five".to_string()),
            ]
        );
    }

    #[test]
    fn test_quote_rule_and_paragraph() {
        let html = render("> note `this`\n---\n***\nbody <i>");
        assert_eq!(
            html,
            "<blockquote>note <code>this</code></blockquote>\n<hr>\n<hr>\n<p>body &lt;i&gt;</p>"
        );
    }

    #[test]
    fn test_separator_row_emits_nothing() {
        let blocks = parse_blocks("|:---|---:|\n| h |");
        assert_eq!(
            blocks,
            vec![Block::Table {
                header: strings(&["h"]),
                rows: vec![],
            }]
        );
    }

    #[test]
    fn test_table_cells_convert_spans() {
        let blocks = parse_blocks("| Name | State |\n| **a** | ~~old~~ |");
        assert_eq!(
            blocks,
            vec![Block::Table {
                header: strings(&["Name", "State"]),
                rows: vec![strings(&["<strong>a</strong>", "<del>old</del>"])],
            }]
        );
    }

    #[test]
    fn test_script_in_paragraph_is_not_live() {
        let html = render("<script>alert(1)</script>");
        assert_eq!(html, "<p>&lt;script&gt;alert(1)&lt;/script&gt;</p>");
    }

    #[test]
    fn test_empty_input_renders_nothing() {
        assert!(parse_blocks("").is_empty());
        assert_eq!(render("\n\n"), "");
    }
}
