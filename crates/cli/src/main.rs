use anyhow::{Context, Result, anyhow};
use browse::{BrowseSession, MovieCard};
use catalog::PageSize;
use clap::{Parser, Subcommand};
use colored::Colorize;
use omdb_client::{OmdbConfig, SearchClient};

/// ReelShelf - Movie Browsing Widget
#[derive(Parser)]
#[command(name = "reel-shelf")]
#[command(about = "Browse, filter, and vote on a seeded movie catalog", long_about = None)]
struct Cli {
    /// API key for the remote movie search (only the `search` command needs it)
    #[arg(long, env = "OMDB_API_KEY")]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one page of the catalog
    Show {
        /// Category to filter by (repeatable); none means show everything
        #[arg(long = "category")]
        categories: Vec<String>,

        /// 1-based page number
        #[arg(long, default_value = "1")]
        page: usize,

        /// Records per page (4, 8, or 12)
        #[arg(long, default_value = "4", value_parser = parse_page_size)]
        page_size: PageSize,
    },

    /// List the categories present in the catalog
    Categories,

    /// Search the remote movie API by title
    Search {
        /// Free-text title search term
        #[arg(long)]
        term: String,

        /// Import the hits into the catalog under this category and show them
        #[arg(long)]
        import_as: Option<String>,
    },
}

fn parse_page_size(raw: &str) -> Result<PageSize, String> {
    let value: usize = raw
        .parse()
        .map_err(|_| format!("'{}' is not a number", raw))?;
    PageSize::try_from(value).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let mut session = BrowseSession::new();

    // Dispatch to appropriate command handler
    match cli.command {
        Commands::Show {
            categories,
            page,
            page_size,
        } => handle_show(&mut session, categories, page, page_size),
        Commands::Categories => handle_categories(&session),
        Commands::Search { term, import_as } => {
            let api_key = cli.api_key.ok_or_else(|| {
                anyhow!("An API key is required: pass --api-key or set OMDB_API_KEY")
            })?;
            let client = SearchClient::new(OmdbConfig::new(api_key))
                .context("Failed to build the search client")?;
            session = session.with_search_client(client);
            handle_search(&mut session, term, import_as).await?
        }
    }

    Ok(())
}

/// Handle the 'show' command
fn handle_show(
    session: &mut BrowseSession,
    categories: Vec<String>,
    page: usize,
    page_size: PageSize,
) {
    session.set_selected_categories(categories);
    session.set_page_size(page_size);
    session.set_page(page);

    println!(
        "{}",
        format!(
            "Page {} of {}:",
            session.store().page(),
            session.store().page_count()
        )
        .bold()
        .blue()
    );

    let cards = session.visible_page();
    if cards.is_empty() {
        println!("{}", "Nothing on this page.".yellow());
        return;
    }
    for card in &cards {
        print_card(card);
    }
    if session.store().has_next_page() {
        println!("(pass --page {} for more)", session.store().page() + 1);
    }
}

/// Handle the 'categories' command
fn handle_categories(session: &BrowseSession) {
    println!("{}", "Categories:".bold().blue());
    for category in session.categories() {
        let count = session
            .store()
            .records()
            .iter()
            .filter(|record| record.category == category)
            .count();
        println!("{}{} ({} movie(s))", "• ".green(), category, count);
    }
}

/// Handle the 'search' command
async fn handle_search(
    session: &mut BrowseSession,
    term: String,
    import_as: Option<String>,
) -> Result<()> {
    let hits = session.search(&term).await?;

    println!(
        "{}",
        format!("Search results for '{}':", term).bold().blue()
    );
    if hits.is_empty() {
        println!("{}", "No matches found.".yellow());
    }
    for hit in &hits {
        println!("{}{} ({}) [{}]", "• ".green(), hit.title, hit.year, hit.imdb_id);
    }

    if let Some(category) = import_as {
        let added = session.import_matching(&term, &category).await?;
        println!(
            "{} Imported {} new record(s) under '{}'",
            "✓".green(),
            added,
            category
        );

        session.set_selected_categories([category]);
        for card in session.visible_page() {
            print_card(&card);
        }
    }
    Ok(())
}

/// Helper function to format and print one movie card
fn print_card(card: &MovieCard) {
    println!(
        "{} ({}) {}",
        card.title.bold(),
        card.year,
        format!("[{}]", card.category).cyan()
    );
    println!("   poster: {}", card.poster);
    println!(
        "   👍 {}  👎 {}  {}",
        card.likes,
        card.dislikes,
        approval_bar(card.approval_pct)
    );
}

/// Ten-segment approval gauge; renders empty when nobody has voted.
fn approval_bar(pct: u8) -> String {
    let filled = (pct as usize) / 10;
    format!(
        "{}{} {:>3}%",
        "█".repeat(filled).green(),
        "░".repeat(10 - filled),
        pct
    )
}
