// src/config.rs
use crate::constants::NOTION_MAX_FETCH_DEPTH;
use crate::error::AppError;
use crate::types::{ApiKey, NotionId};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// What kind of page the input is rendered as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PageKind {
    /// Blog post with a table of contents
    Article,
    /// Short "today I learned" entry
    Til,
    /// Slide deck, one slide per section
    Presentation,
    /// Cocktail recipe with Ingredients and Method sections
    Recipe,
}

/// Parsed command-line input.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct CommandLineInput {
    /// Notion page URL or ID (e.g., "https://www.notion.so/...")
    #[arg(required_unless_present = "from_json")]
    pub notion_input: Option<String>,

    /// Render a page dump (JSON page object with inlined blocks) instead of fetching
    #[arg(long, value_name = "PATH", conflicts_with = "notion_input")]
    pub from_json: Option<PathBuf>,

    /// Page kind to render
    #[arg(short, long, value_enum, default_value_t = PageKind::Article)]
    pub kind: PageKind,

    /// Output file for the HTML document (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum block nesting depth fetched from Notion
    #[arg(long, default_value_t = 10, value_parser = clap::value_parser!(u8).range(1..=NOTION_MAX_FETCH_DEPTH as i64))]
    pub depth: u8,

    /// Heading text that marks a slide without showing it (repeatable)
    #[arg(long = "hidden-heading", value_name = "TEXT")]
    pub hidden_headings: Vec<String>,

    /// Hide headings that start with a hidden token rather than equal it
    #[arg(long, default_value_t = false)]
    pub prefix_hidden: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

/// Where the page comes from.
#[derive(Debug, Clone)]
pub enum ContentOrigin {
    Notion { id: NotionId, api_key: ApiKey },
    JsonDump(PathBuf),
}

/// Resolved pipeline configuration, validated and ready to drive all stages.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub origin: ContentOrigin,
    pub kind: PageKind,
    pub output_file: Option<PathBuf>,
    pub depth: u8,
    pub hidden_headings: Vec<String>,
    pub prefix_hidden: bool,
    pub verbose: bool,
}

impl PipelineConfig {
    /// Resolves a configuration from CLI input and the environment.
    pub fn resolve(cli: CommandLineInput) -> Result<Self, AppError> {
        Self::resolve_with_key(cli, std::env::var("NOTION_API_KEY").ok())
    }

    /// Same as [`resolve`](Self::resolve) with the API key supplied by the
    /// caller. The key is only required when fetching from Notion.
    pub fn resolve_with_key(cli: CommandLineInput, api_key: Option<String>) -> Result<Self, AppError> {
        let origin = match (cli.from_json, cli.notion_input) {
            (Some(path), _) => ContentOrigin::JsonDump(path),
            (None, Some(input)) => {
                let api_key = api_key.ok_or_else(|| {
                    AppError::MissingConfiguration(
                        "NOTION_API_KEY environment variable not set".to_string(),
                    )
                })?;
                ContentOrigin::Notion {
                    id: NotionId::parse(&input)?,
                    api_key: ApiKey::new(api_key)?,
                }
            }
            (None, None) => {
                return Err(AppError::MissingConfiguration(
                    "either a Notion page or --from-json is required".to_string(),
                ))
            }
        };

        Ok(PipelineConfig {
            origin,
            kind: cli.kind,
            output_file: cli.output,
            depth: cli.depth,
            hidden_headings: cli.hidden_headings,
            prefix_hidden: cli.prefix_hidden,
            verbose: cli.verbose,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = "https://www.notion.so/Talk-550e8400e29b41d4a716446655440000";

    fn parse(args: &[&str]) -> CommandLineInput {
        CommandLineInput::try_parse_from(std::iter::once("notion2html").chain(args.iter().copied()))
            .unwrap()
    }

    #[test]
    fn json_dump_needs_no_api_key() {
        let cli = parse(&["--from-json", "page.json", "--kind", "recipe"]);
        let config = PipelineConfig::resolve_with_key(cli, None).unwrap();

        assert!(matches!(config.origin, ContentOrigin::JsonDump(ref p) if p == &PathBuf::from("page.json")));
        assert_eq!(config.kind, PageKind::Recipe);
        assert_eq!(config.depth, 10);
    }

    #[test]
    fn notion_input_requires_api_key() {
        let err = PipelineConfig::resolve_with_key(parse(&[PAGE]), None).unwrap_err();
        assert!(matches!(err, AppError::MissingConfiguration(_)));

        let config =
            PipelineConfig::resolve_with_key(parse(&[PAGE]), Some("secret_abcdefghijklmnop".into()))
                .unwrap();
        match config.origin {
            ContentOrigin::Notion { id, .. } => {
                assert_eq!(id.as_str(), "550e8400e29b41d4a716446655440000")
            }
            other => panic!("unexpected origin {:?}", other),
        }
    }

    #[test]
    fn hidden_headings_repeat() {
        let cli = parse(&[
            "--from-json",
            "deck.json",
            "--kind",
            "presentation",
            "--hidden-heading",
            "-",
            "--hidden-heading",
            "~",
            "--prefix-hidden",
        ]);
        let config = PipelineConfig::resolve_with_key(cli, None).unwrap();
        assert_eq!(config.hidden_headings, vec!["-", "~"]);
        assert!(config.prefix_hidden);
    }

    #[test]
    fn input_and_dump_conflict() {
        let result = CommandLineInput::try_parse_from(["notion2html", PAGE, "--from-json", "x.json"]);
        assert!(result.is_err());
        assert!(CommandLineInput::try_parse_from(["notion2html"]).is_err());
        assert!(CommandLineInput::try_parse_from(["notion2html", PAGE, "--depth", "0"]).is_err());
    }
}
