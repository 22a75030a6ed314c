use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use colored::Colorize;
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing_subscriber::EnvFilter;

use audiofeed::config::{DEFAULT_HOME_URL, DEFAULT_SEARCH_URL};
use audiofeed::display::{format_duration, sorted_by_order, strip_html};
use audiofeed::{
    ApiConfig, ContentItem, ContentSource, HomeFeed, HomeState, HttpContentSource, ReqwestClient,
    Search, SearchOptions, SearchState, Section,
};

// Emoji with fallback for terminals without Unicode support
static HEADPHONES: Emoji<'_, '_> = Emoji("🎧 ", "[i] ");
static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "[~] ");
static FAILURE: Emoji<'_, '_> = Emoji("❌ ", "[!] ");
static PAGES: Emoji<'_, '_> = Emoji("📄 ", "");

/// Browse the home feed and search audio content
#[derive(Parser, Debug)]
#[command(name = "audiofeed")]
#[command(about = "Browse the home feed and search podcasts, episodes, audiobooks and articles")]
#[command(version)]
struct Args {
    /// Home sections endpoint
    #[arg(long, global = true, default_value = DEFAULT_HOME_URL)]
    home_url: String,

    /// Search endpoint
    #[arg(long, global = true, default_value = DEFAULT_SEARCH_URL)]
    search_url: String,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    timeout: u64,

    /// Log requests and pipeline decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the home feed
    Home {
        /// Number of pages to load and merge
        #[arg(short, long, default_value = "1")]
        pages: u32,
    },

    /// Search for content
    Search {
        /// Query to search for
        #[arg(required_unless_present = "interactive")]
        query: Option<String>,

        /// Read query updates from stdin, one per line
        #[arg(short, long)]
        interactive: bool,

        /// Quiet period before a query is searched, in milliseconds
        #[arg(long, default_value = "200")]
        debounce_ms: u64,
    },
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "audiofeed=debug"
    } else {
        "audiofeed=warn"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {wide_msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.enable_steady_tick(Duration::from_millis(100));
    bar.set_message(message.to_string());
    bar
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars.saturating_sub(3)).collect();
        format!("{}...", head.trim_end())
    }
}

fn kind_label(item: &ContentItem) -> String {
    match item {
        ContentItem::Podcast(p) => format!("[podcast · {} episodes · {}]", p.episode_count, p.language),
        ContentItem::Episode(e) => match e.number {
            Some(number) => format!("[episode #{}]", number),
            None => "[episode]".to_string(),
        },
        ContentItem::AudioBook(b) => format!("[audiobook · {}]", b.language),
        ContentItem::AudioArticle(_) => "[article]".to_string(),
    }
}

fn render_item(item: &ContentItem) {
    let mut line = format!("  {} {}", kind_label(item).cyan(), item.name().bold());
    if let Some(byline) = item.byline() {
        line.push_str(&format!(" · {}", byline.yellow()));
    }
    let duration = item.duration_seconds();
    if duration > 0 {
        line.push_str(&format!(" {}", format_duration(duration).dimmed()));
    }
    println!("{line}");

    let description = strip_html(item.description());
    if !description.is_empty() {
        println!("      {}", truncate(&description, 90).dimmed());
    }
}

fn render_sections(sections: &[Section]) {
    for section in sorted_by_order(sections) {
        println!(
            "\n{} {}",
            section.name.bold().green(),
            format!("({}, {} items)", section.layout.as_str(), section.content.len()).dimmed()
        );
        for item in &section.content {
            render_item(item);
        }
    }
}

fn render_search(query: &str, state: &SearchState) {
    if let Some(error) = &state.error {
        println!("\n{FAILURE}{} {}", "Search failed:".red().bold(), error.red());
        return;
    }

    println!(
        "\n{SEARCH}{} results for {}",
        state.total_results.to_string().cyan().bold(),
        format!("\"{query}\"").bold()
    );
    render_sections(&state.sections);
}

async fn wait_home(updates: &mut watch::Receiver<HomeState>) -> Result<HomeState> {
    let state = updates
        .wait_for(|s| !s.is_loading && !s.is_loading_more)
        .await
        .context("Home feed stopped unexpectedly")?;
    Ok(state.clone())
}

async fn run_home(source: Arc<dyn ContentSource>, pages: u32) -> Result<()> {
    let feed = HomeFeed::new(source);
    let mut updates = feed.subscribe();
    let progress = spinner("Loading home feed...");

    feed.load_initial();
    let mut state = wait_home(&mut updates).await?;

    while state.error.is_none() && state.has_next_page && state.current_page < pages {
        let before = state.current_page;
        progress.set_message(format!("Loading page {}...", before + 1));
        feed.load_more();
        state = wait_home(&mut updates).await?;
        if state.current_page == before {
            break;
        }
    }
    progress.finish_and_clear();

    if state.sections.is_empty()
        && let Some(error) = &state.error
    {
        bail!("Failed to load home feed: {error}");
    }

    println!("\n{HEADPHONES}{}", "Home".bold().magenta());
    render_sections(&state.sections);

    if let Some(error) = &state.error {
        println!("\n{FAILURE}{}", error.red());
    }
    println!(
        "\n{PAGES}Page {} of {}{}",
        state.current_page.to_string().cyan(),
        state.total_pages.to_string().cyan(),
        if state.has_next_page {
            " (more available)".dimmed().to_string()
        } else {
            String::new()
        }
    );

    Ok(())
}

async fn run_search(source: Arc<dyn ContentSource>, query: &str, options: SearchOptions) -> Result<()> {
    let min_len = options.min_query_len;
    if query.trim().chars().count() < min_len {
        bail!("Query must be at least {min_len} characters");
    }

    let search = Search::new(source, options);
    let mut updates = search.subscribe();
    let progress = spinner(&format!("Searching \"{}\"...", query.trim()));

    search.update_query(query);
    let state = updates
        .wait_for(|s| s.search_performed && !s.is_loading)
        .await
        .context("Search stopped unexpectedly")?
        .clone();
    progress.finish_and_clear();

    render_search(query.trim(), &state);
    if state.error.is_some() {
        std::process::exit(1);
    }
    Ok(())
}

async fn run_interactive(source: Arc<dyn ContentSource>, options: SearchOptions) -> Result<()> {
    let settle_after = options.debounce + Duration::from_millis(50);
    let search = Search::new(source, options);
    let mut updates = search.subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!(
        "{SEARCH}{}",
        "Type a query and press enter; an empty line clears. Ctrl-D to quit.".dimmed()
    );

    loop {
        tokio::select! {
            line = lines.next_line() => {
                match line.context("Failed to read stdin")? {
                    Some(line) => search.update_query(line),
                    None => break,
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = updates.borrow_and_update().clone();
                if state.is_loading {
                    println!("{}", format!("Searching \"{}\"...", search.query().trim()).dimmed());
                } else if state.search_performed {
                    render_search(search.query().trim(), &state);
                }
            }
        }
    }

    // input closed: let a query typed just before EOF settle
    tokio::time::sleep(settle_after).await;
    if search.state().is_loading {
        let state = updates
            .wait_for(|s| !s.is_loading)
            .await
            .context("Search stopped unexpectedly")?
            .clone();
        render_search(search.query().trim(), &state);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = ApiConfig {
        home_url: args.home_url,
        search_url: args.search_url,
        timeout: Duration::from_secs(args.timeout),
    };
    let client = ReqwestClient::with_timeout(config.timeout).context("Failed to build HTTP client")?;
    let source: Arc<dyn ContentSource> = Arc::new(HttpContentSource::new(client, config));

    match args.command {
        Command::Home { pages } => run_home(source, pages.max(1)).await,
        Command::Search {
            query,
            interactive,
            debounce_ms,
        } => {
            let options = SearchOptions {
                debounce: Duration::from_millis(debounce_ms),
                ..Default::default()
            };
            if interactive {
                run_interactive(source, options).await
            } else {
                let query = query.context("A query is required unless --interactive is set")?;
                run_search(source, &query, options).await
            }
        }
    }
}
