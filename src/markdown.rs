//! Markdown to Notion block conversion.
//!
//! Line-oriented: headings, fenced code, list items, quotes, and dividers map
//! to their block types; everything else accumulates into paragraphs flushed
//! on blank lines. Inline markup is passed through as plain text.

use regex::Regex;
use serde::Serialize;

/// Notion rejects rich-text fragments longer than 2000 characters; longer
/// content is split across fragments.
const TEXT_CHUNK_LIMIT: usize = 2000;

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Block {
    object: &'static str,
    #[serde(flatten)]
    content: BlockContent,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type")]
enum BlockContent {
    #[serde(rename = "heading_1")]
    Heading1 { heading_1: RichTextBody },
    #[serde(rename = "heading_2")]
    Heading2 { heading_2: RichTextBody },
    #[serde(rename = "heading_3")]
    Heading3 { heading_3: RichTextBody },
    #[serde(rename = "paragraph")]
    Paragraph { paragraph: RichTextBody },
    #[serde(rename = "bulleted_list_item")]
    BulletedListItem { bulleted_list_item: RichTextBody },
    #[serde(rename = "numbered_list_item")]
    NumberedListItem { numbered_list_item: RichTextBody },
    #[serde(rename = "quote")]
    Quote { quote: RichTextBody },
    #[serde(rename = "code")]
    Code { code: CodeBody },
    #[serde(rename = "divider")]
    Divider { divider: EmptyBody },
}

#[derive(Serialize, Debug, Clone, PartialEq)]
struct RichTextBody {
    rich_text: Vec<RichText>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
struct CodeBody {
    rich_text: Vec<RichText>,
    language: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
struct EmptyBody {}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RichText {
    #[serde(rename = "type")]
    kind: &'static str,
    text: TextContent,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
struct TextContent {
    content: String,
}

/// Plain text split into Notion-sized rich-text fragments.
pub fn rich_text(text: &str) -> Vec<RichText> {
    chunks(text)
        .into_iter()
        .map(|content| RichText {
            kind: "text",
            text: TextContent { content },
        })
        .collect()
}

fn chunks(text: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    let mut count = 0;

    for c in text.chars() {
        if count == TEXT_CHUNK_LIMIT {
            out.push(std::mem::take(&mut current));
            count = 0;
        }
        current.push(c);
        count += 1;
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

impl Block {
    fn with_content(content: BlockContent) -> Self {
        Self {
            object: "block",
            content,
        }
    }

    pub fn paragraph(text: &str) -> Self {
        Self::with_content(BlockContent::Paragraph {
            paragraph: RichTextBody {
                rich_text: rich_text(text),
            },
        })
    }

    pub fn heading(level: usize, text: &str) -> Self {
        let body = RichTextBody {
            rich_text: rich_text(text),
        };
        Self::with_content(match level {
            1 => BlockContent::Heading1 { heading_1: body },
            2 => BlockContent::Heading2 { heading_2: body },
            _ => BlockContent::Heading3 { heading_3: body },
        })
    }

    pub fn heading_2(text: &str) -> Self {
        Self::heading(2, text)
    }

    pub fn bulleted_item(text: &str) -> Self {
        Self::with_content(BlockContent::BulletedListItem {
            bulleted_list_item: RichTextBody {
                rich_text: rich_text(text),
            },
        })
    }

    pub fn numbered_item(text: &str) -> Self {
        Self::with_content(BlockContent::NumberedListItem {
            numbered_list_item: RichTextBody {
                rich_text: rich_text(text),
            },
        })
    }

    pub fn quote(text: &str) -> Self {
        Self::with_content(BlockContent::Quote {
            quote: RichTextBody {
                rich_text: rich_text(text),
            },
        })
    }

    pub fn code(text: &str, language: &str) -> Self {
        Self::with_content(BlockContent::Code {
            code: CodeBody {
                rich_text: rich_text(text),
                language: if language.is_empty() {
                    "plain text".to_string()
                } else {
                    language.to_string()
                },
            },
        })
    }

    pub fn divider() -> Self {
        Self::with_content(BlockContent::Divider {
            divider: EmptyBody {},
        })
    }
}

/// Convert an issue body into Notion blocks. Empty input yields no blocks.
pub fn markdown_to_blocks(markdown: &str) -> Vec<Block> {
    let heading = Regex::new(r"^(#{1,6})\s+(.*)$").unwrap();
    let numbered = Regex::new(r"^\d+[.)]\s+(.*)$").unwrap();
    let rule = Regex::new(r"^(-{3,}|\*{3,}|_{3,})\s*$").unwrap();

    let mut blocks = Vec::new();
    let mut paragraph: Vec<&str> = Vec::new();
    // (language, accumulated lines) while inside a fence
    let mut fence: Option<(String, Vec<&str>)> = None;

    for line in markdown.lines() {
        if let Some((language, lines)) = fence.as_mut() {
            if line.trim_start().starts_with("```") {
                blocks.push(Block::code(&lines.join("\n"), language));
                fence = None;
            } else {
                lines.push(line);
            }
            continue;
        }

        let trimmed = line.trim_end();

        if let Some(rest) = trimmed.trim_start().strip_prefix("```") {
            flush_paragraph(&mut blocks, &mut paragraph);
            fence = Some((rest.trim().to_string(), Vec::new()));
        } else if trimmed.is_empty() {
            flush_paragraph(&mut blocks, &mut paragraph);
        } else if let Some(caps) = heading.captures(trimmed) {
            flush_paragraph(&mut blocks, &mut paragraph);
            blocks.push(Block::heading(caps[1].len(), &caps[2]));
        } else if rule.is_match(trimmed) {
            flush_paragraph(&mut blocks, &mut paragraph);
            blocks.push(Block::divider());
        } else if let Some(item) = bullet_text(trimmed) {
            flush_paragraph(&mut blocks, &mut paragraph);
            blocks.push(Block::bulleted_item(item));
        } else if let Some(caps) = numbered.captures(trimmed) {
            flush_paragraph(&mut blocks, &mut paragraph);
            blocks.push(Block::numbered_item(&caps[1]));
        } else if let Some(rest) = trimmed.strip_prefix('>') {
            flush_paragraph(&mut blocks, &mut paragraph);
            blocks.push(Block::quote(rest.trim_start()));
        } else {
            paragraph.push(trimmed);
        }
    }

    // Unterminated fence: emit what accumulated
    if let Some((language, lines)) = fence {
        blocks.push(Block::code(&lines.join("\n"), &language));
    }
    flush_paragraph(&mut blocks, &mut paragraph);

    blocks
}

fn flush_paragraph(blocks: &mut Vec<Block>, paragraph: &mut Vec<&str>) {
    if paragraph.is_empty() {
        return;
    }
    let text = paragraph.join("\n");
    paragraph.clear();
    if !text.trim().is_empty() {
        blocks.push(Block::paragraph(&text));
    }
}

fn bullet_text(line: &str) -> Option<&str> {
    line.strip_prefix("- ")
        .or_else(|| line.strip_prefix("* "))
        .or_else(|| line.strip_prefix("+ "))
}
