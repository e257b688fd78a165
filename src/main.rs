use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use crossterm::event::KeyEventKind;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;

mod ai;
mod app;
mod config;
mod error;
mod models;
mod render;
mod tui;
mod validation;

use ai::{Analyzer, GeminiTransport};
use app::App;
use config::Config;
use models::MediaFile;
use tui::{draw, handle_key_event};
use validation::validate_post_url;

#[derive(Debug, PartialEq, Eq)]
enum Headless {
    Url(String),
    Media(PathBuf),
}

#[derive(Debug, Default, PartialEq, Eq)]
struct CliArgs {
    headless: Option<Headless>,
    as_json: bool,
}

/// `--url <link>` / `--media <path>` run one analysis; `--json` may appear anywhere.
fn parse_args(args: &[String]) -> anyhow::Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        let job = match arg.as_str() {
            "--json" => {
                cli.as_json = true;
                continue;
            }
            flag @ ("--url" | "--media") => {
                let value = iter
                    .next()
                    .filter(|v| !v.starts_with("--"))
                    .with_context(|| format!("{flag} needs a value"))?;
                if flag == "--url" {
                    Headless::Url(value.clone())
                } else {
                    Headless::Media(PathBuf::from(value))
                }
            }
            other => anyhow::bail!("unknown argument: {other}"),
        };

        if cli.headless.replace(job).is_some() {
            anyhow::bail!("only one of --url or --media may be given");
        }
    }

    Ok(cli)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging (only show warnings and errors by default)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse command line arguments
    let args: Vec<String> = std::env::args().collect();
    let CliArgs { headless, as_json } = parse_args(&args)?;

    // Load configuration
    let config = Config::load()
        .context("failed to load configuration")?
        .with_env_overrides();

    if let Some(job) = headless {
        return run_headless(&config, job, as_json).await;
    }

    let mut app = App::new(&config)?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
    }

    Ok(())
}

async fn run_headless(config: &Config, job: Headless, as_json: bool) -> anyhow::Result<()> {
    let transport = GeminiTransport::from_config(config)?;
    let analyzer = Analyzer::new(transport, config.model.clone());

    match job {
        Headless::Url(input) => {
            let url = validate_post_url(&input)?;
            let post = analyzer.extract_post_info(url).await;
            if as_json {
                println!("{}", serde_json::to_string_pretty(&post)?);
            } else {
                for line in render::post_lines(&post, config.wrap_width) {
                    println!("{line}");
                }
            }
        }
        Headless::Media(path) => {
            let media = MediaFile::load(&path)
                .await
                .with_context(|| format!("failed to read {}", path.display()))?;
            let result = analyzer
                .analyze_media(&media)
                .await
                .with_context(|| format!("failed to analyze {}", media.name))?;
            if as_json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                println!("{} ({})", media.name, media.describe());
                println!();
                for line in render::analysis_lines(&result, config.wrap_width) {
                    println!("{line}");
                }
            }
        }
    }

    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        // Poll for completed analysis results
        app.poll_results();

        // Poll for events with timeout to allow async operations
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if let Some(action) = handle_key_event(key, app.show_help, app.alert.is_some())
                    {
                        if app.handle_action(action) {
                            return Ok(());
                        }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("instaflow")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn no_arguments_starts_tui() {
        assert_eq!(parse_args(&args(&[])).unwrap(), CliArgs::default());
    }

    #[test]
    fn json_flag_in_any_position() {
        let expected = CliArgs {
            headless: Some(Headless::Url("https://www.instagram.com/p/ABC123/".to_string())),
            as_json: true,
        };
        assert_eq!(
            parse_args(&args(&["--json", "--url", "https://www.instagram.com/p/ABC123/"])).unwrap(),
            expected
        );
        assert_eq!(
            parse_args(&args(&["--url", "https://www.instagram.com/p/ABC123/", "--json"])).unwrap(),
            expected
        );
    }

    #[test]
    fn media_path_is_parsed() {
        let cli = parse_args(&args(&["--media", "clip.mp4"])).unwrap();
        assert_eq!(cli.headless, Some(Headless::Media(PathBuf::from("clip.mp4"))));
        assert!(!cli.as_json);
    }

    #[test]
    fn missing_value_is_rejected() {
        let err = parse_args(&args(&["--url"])).unwrap_err();
        assert!(err.to_string().contains("--url needs a value"));
        assert!(parse_args(&args(&["--media", "--json"])).is_err());
    }

    #[test]
    fn unknown_or_repeated_flags_are_rejected() {
        assert!(parse_args(&args(&["--refresh"])).is_err());
        assert!(parse_args(&args(&["--url", "a", "--media", "b.png"])).is_err());
    }
}
