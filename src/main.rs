//! storyforge CLI entry point.
//!
//! Parses command-line arguments and runs the three-stage generation pipeline.

use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use storyforge::config::LlmConfig;
use storyforge::error::{Result, StoryforgeError};
use storyforge::llm::{ChatClient, ChatCompleter, OfflineClient};
use storyforge::output::{print_error, print_header, print_info, print_run_summary};
use storyforge::pipeline::Pipeline;

/// Story used when the command line provides none, so a bare `storyforge`
/// still demonstrates the full pipeline.
const DEFAULT_USER_STORY: &str =
    "As a user, I want to create an account so that I can sign in and manage my profile.";

#[derive(Parser)]
#[command(name = "storyforge")]
#[command(
    version,
    about = "Turn a user story into a specification, code and tests via staged model calls",
    after_help = "EXAMPLES:
    # Generate from a story given inline
    storyforge \"As a user, I want to track my reading list\"

    # Read the story from a file, write the project somewhere else
    storyforge --story-file story.txt --root out/demo

    # No network: run entirely on the built-in fallback output
    storyforge --offline

ENVIRONMENT:
    STORYFORGE_API_BASE_URL   Chat completions base URL (required unless --offline)
    STORYFORGE_API_KEY        Bearer token (required unless --offline)
    STORYFORGE_MODEL          Model name (default: gpt-4o-mini)
    STORYFORGE_TIMEOUT_SECS   Request timeout in seconds (default: 90)
    STORYFORGE_MAX_RETRIES    Retries after a failed request (default: 2)"
)]
struct Cli {
    /// User story to implement (defaults to a small account-management demo)
    story: Option<String>,

    /// Read the user story from a file instead of the command line
    #[arg(long, value_name = "FILE", conflicts_with = "story")]
    story_file: Option<PathBuf>,

    /// Directory the generated project is written to
    #[arg(long, default_value = "generated")]
    root: PathBuf,

    /// Skip the network entirely and use the built-in fallback output
    #[arg(long)]
    offline: bool,

    /// Show stage timing instead of spinners (useful for debugging)
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    print_header();

    if let Err(e) = run(cli) {
        print_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let story = resolve_story(&cli)?;

    if cli.offline {
        print_info("Offline mode: every stage uses its built-in fallback output");
        execute(OfflineClient, &cli, &story)
    } else {
        let config = LlmConfig::from_env()?;
        let client = ChatClient::new(&config)?;
        execute(client, &cli, &story)
    }
}

fn execute<C: ChatCompleter>(client: C, cli: &Cli, story: &str) -> Result<()> {
    let started = Instant::now();
    let pipeline = Pipeline::new(client, &cli.root).with_verbose(cli.verbose);
    let result = pipeline.run(story)?;
    print_run_summary(&result, &cli.root, started.elapsed());
    Ok(())
}

fn resolve_story(cli: &Cli) -> Result<String> {
    let raw = match (&cli.story, &cli.story_file) {
        (Some(story), _) => story.clone(),
        (None, Some(path)) => {
            if !path.exists() {
                return Err(StoryforgeError::StoryFileNotFound(path.clone()));
            }
            std::fs::read_to_string(path)?
        }
        (None, None) => DEFAULT_USER_STORY.to_string(),
    };

    let story = raw.trim();
    if story.is_empty() {
        return Err(StoryforgeError::EmptyStory);
    }
    Ok(story.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_no_args_uses_defaults() {
        let cli = Cli::try_parse_from(["storyforge"]).unwrap();
        assert!(cli.story.is_none());
        assert!(cli.story_file.is_none());
        assert_eq!(cli.root, PathBuf::from("generated"));
        assert!(!cli.offline);
        assert!(!cli.verbose);
    }

    #[test]
    fn test_positional_story_is_captured() {
        let cli = Cli::try_parse_from(["storyforge", "As a user, I want reminders"]).unwrap();
        assert_eq!(cli.story.as_deref(), Some("As a user, I want reminders"));
    }

    #[test]
    fn test_story_and_story_file_conflict() {
        let result = Cli::try_parse_from([
            "storyforge",
            "inline story",
            "--story-file",
            "story.txt",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_offline_and_root_flags() {
        let cli =
            Cli::try_parse_from(["storyforge", "--offline", "--root", "out/demo"]).unwrap();
        assert!(cli.offline);
        assert_eq!(cli.root, PathBuf::from("out/demo"));
    }

    #[test]
    fn test_resolve_story_defaults_without_input() {
        let cli = Cli::try_parse_from(["storyforge"]).unwrap();
        assert_eq!(resolve_story(&cli).unwrap(), DEFAULT_USER_STORY);
    }

    #[test]
    fn test_resolve_story_rejects_blank_input() {
        let cli = Cli::try_parse_from(["storyforge", "   \n  "]).unwrap();
        let err = resolve_story(&cli).unwrap_err();
        assert!(matches!(err, StoryforgeError::EmptyStory));
    }

    #[test]
    fn test_resolve_story_reads_and_trims_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("story.txt");
        fs::write(&path, "  As a user, I want invoices emailed monthly.\n").unwrap();

        let cli =
            Cli::try_parse_from(["storyforge", "--story-file", path.to_str().unwrap()]).unwrap();
        assert_eq!(
            resolve_story(&cli).unwrap(),
            "As a user, I want invoices emailed monthly."
        );
    }

    #[test]
    fn test_resolve_story_missing_file_is_reported() {
        let cli = Cli::try_parse_from([
            "storyforge",
            "--story-file",
            "/definitely/not/here/story.txt",
        ])
        .unwrap();
        let err = resolve_story(&cli).unwrap_err();
        assert!(matches!(err, StoryforgeError::StoryFileNotFound(_)));
    }
}
