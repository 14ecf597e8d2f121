//! Preparation pass run once on a fetched tree, before any transform.

use crate::model::Block;
use crate::types::flatten_plain_text;

/// Turns source code into display markup.
pub trait CodeHighlighter: Send + Sync {
    fn highlight(&self, language: &str, source: &str) -> String;
}

/// Escapes the source and wraps each line in `<span class="line">`.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainHighlighter;

impl CodeHighlighter for PlainHighlighter {
    fn highlight(&self, _language: &str, source: &str) -> String {
        source
            .lines()
            .map(|line| format!("<span class=\"line\">{}</span>", html_escape::encode_text(line)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Returns a copy of `blocks` where every code block, at any depth, carries
/// its highlighted markup. The input is left untouched.
pub fn prepare_blocks(blocks: &[Block], highlighter: &dyn CodeHighlighter) -> Vec<Block> {
    blocks
        .iter()
        .map(|block| prepare_block(block, highlighter))
        .collect()
}

fn prepare_block(block: &Block, highlighter: &dyn CodeHighlighter) -> Block {
    let mut prepared = if block.children().is_empty() {
        block.clone()
    } else {
        block.with_children(prepare_blocks(block.children(), highlighter))
    };

    if let Block::Code(code) = &mut prepared {
        let source = flatten_plain_text(&code.content.rich_text);
        code.highlighted = Some(highlighter.highlight(&code.language, &source));
    }
    prepared
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Upper;

    impl CodeHighlighter for Upper {
        fn highlight(&self, language: &str, source: &str) -> String {
            format!("{}:{}", language, source.to_uppercase())
        }
    }

    fn highlighted(block: &Block) -> Option<&str> {
        match block {
            Block::Code(code) => code.highlighted.as_deref(),
            _ => None,
        }
    }

    #[test]
    fn plain_highlighter_escapes_and_splits_lines() {
        let html = PlainHighlighter.highlight("rust", "a < b\nfn x() {}");
        assert_eq!(
            html,
            "<span class=\"line\">a &lt; b</span>\n<span class=\"line\">fn x() {}</span>"
        );
    }

    #[test]
    fn nested_code_blocks_are_prepared_without_touching_input() {
        let source = vec![
            Block::code("top", "rust", "let x = 1;"),
            Block::toggle("t", "more", vec![Block::code("inner", "sql", "select 1")]),
        ];

        let prepared = prepare_blocks(&source, &Upper);

        assert_eq!(highlighted(&prepared[0]), Some("rust:LET X = 1;"));
        assert_eq!(highlighted(&prepared[1].children()[0]), Some("sql:SELECT 1"));
        assert_eq!(highlighted(&source[0]), None);
        assert_eq!(highlighted(&source[1].children()[0]), None);
    }
}
