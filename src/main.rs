use clap::{Parser, Subcommand};
use std::io::Write;
use std::time::Duration;
use tabled::settings::Style;
use tabled::Table;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wealthx_console::config::AppConfig;
use wealthx_console::jobs::market_refresh::MarketFeed;
use wealthx_console::jobs::ticker_refresh::TickerFeed;
use wealthx_console::pages::admin::{AdminPage, AdminPhase};
use wealthx_console::pages::landing::{subscribe_newsletter, LandingView};
use wealthx_console::pages::Notice;
use wealthx_console::services::market_api::MarketApiService;
use wealthx_console::AppServices;

#[derive(Parser)]
#[command(name = "wealthx-console", version, about = "Terminal console for the WealthX investment platform")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Live market dashboard: global stats, trending coins, top-coin table
    Market {
        /// Number of coins to list
        #[arg(long)]
        limit: Option<u32>,
        /// Refresh period in seconds
        #[arg(long)]
        interval: Option<u64>,
        /// Fetch once, render, exit
        #[arg(long)]
        once: bool,
    },
    /// Scrolling price ticker strip
    Ticker {
        /// Number of coins in the strip
        #[arg(long)]
        limit: Option<u32>,
        /// Fetch once, render, exit
        #[arg(long)]
        once: bool,
    },
    /// Show the public investment plans
    Schemes,
    /// Subscribe an email address to the newsletter
    Subscribe { email: String },
    /// Manage investment schemes (interactive, password gated)
    Admin,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,wealthx_console=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env();
    let services = AppServices::from_config(&config);
    let cli = Cli::parse();

    match cli.command {
        Command::Market {
            limit,
            interval,
            once,
        } => {
            let limit = limit.unwrap_or(config.top_coins_limit);
            let period = interval
                .map(Duration::from_secs)
                .unwrap_or(config.refresh_interval);
            run_market(services.market.clone(), limit, period, once).await;
        }
        Command::Ticker { limit, once } => {
            let limit = limit.unwrap_or(config.ticker_coins_limit);
            run_ticker(services.market.clone(), limit, config.refresh_interval, once).await;
        }
        Command::Schemes => run_schemes(&services).await,
        Command::Subscribe { email } => {
            let notice = subscribe_newsletter(&services.site, &email).await;
            print_notice(&notice);
        }
        Command::Admin => run_admin(&services).await,
    }
}

async fn run_market(api: MarketApiService, limit: u32, period: Duration, once: bool) {
    let feed = MarketFeed::new(api, limit, period);

    if once {
        feed.refresh_now().await;
        render_market(&feed, period);
        return;
    }

    let handle = feed.start();
    println!("Loading market data...");

    let mut render_tick = tokio::time::interval(Duration::from_secs(1));
    let mut last_rendered = None;
    let mut was_refreshing = false;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = render_tick.tick() => {
                if feed.is_loading() {
                    continue;
                }
                if feed.is_refreshing() && !was_refreshing {
                    println!("Refreshing...");
                }
                was_refreshing = feed.is_refreshing();
                let updated = feed.last_updated();
                if updated.is_some() && updated != last_rendered {
                    last_rendered = updated;
                    render_market(&feed, period);
                }
            }
        }
    }
    drop(handle);
    println!();
}

fn render_market(feed: &MarketFeed, period: Duration) {
    let cards = feed.stat_cards();
    if !cards.is_empty() {
        let line: Vec<String> = cards
            .iter()
            .map(|card| match &card.change {
                Some(change) => format!("{}: {} ({})", card.label, card.value, change),
                None => format!("{}: {}", card.label, card.value),
            })
            .collect();
        println!("{}", line.join("  |  "));
    }

    let trending = feed.trending_labels();
    if !trending.is_empty() {
        println!("Trending: {}", trending.join("  ·  "));
    }

    let rows = feed.table_rows();
    if rows.is_empty() {
        println!("No market data available.");
    } else {
        let mut table = Table::new(rows);
        table.with(Style::rounded());
        println!("{table}");
    }
    println!(
        "Data provided by CoinGecko API · auto-refreshes every {}s",
        period.as_secs()
    );
}

async fn run_ticker(api: MarketApiService, limit: u32, period: Duration, once: bool) {
    let feed = TickerFeed::new(api, limit, period);

    if once {
        feed.poll_once().await;
        if let Some(line) = feed.strip_line() {
            println!("{line}");
        }
        return;
    }

    let handle = feed.start();
    let mut render_tick = tokio::time::interval(Duration::from_secs(1));
    let mut last_line: Option<String> = None;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = render_tick.tick() => {
                let line = feed.strip_line();
                if line.is_some() && line != last_line {
                    println!("{}", line.as_deref().unwrap_or_default());
                    last_line = line;
                }
            }
        }
    }
    drop(handle);
    println!();
}

async fn run_schemes(services: &AppServices) {
    println!("Loading investment plans...");
    let mut view = LandingView::new();
    view.load(&services.schemes, &services.site).await;

    let cards = view.cards();
    if cards.is_empty() {
        println!("No investment plans available right now.");
    }
    for card in cards {
        let tag = if card.popular { "  [POPULAR]" } else { "" };
        println!("{}{}", card.title, tag);
        println!("  {}  ·  {}", card.returns, card.duration);
        println!("  {}  ·  {}", card.min, card.max);
        if !card.description.is_empty() {
            println!("  {}", card.description);
        }
        println!();
    }
    println!("Invest now: {}", view.telegram_link());
}

type InputLines = Lines<BufReader<Stdin>>;

async fn prompt(lines: &mut InputLines, text: &str) -> Option<String> {
    print!("{text}");
    std::io::stdout().flush().ok();
    match lines.next_line().await {
        Ok(Some(line)) => Some(line.trim().to_string()),
        _ => None,
    }
}

fn print_notice(notice: &Notice) {
    match notice {
        Notice::Success(message) => println!("✔ {message}"),
        Notice::Info(message) => println!("• {message}"),
        Notice::Error(message) => println!("✖ {message}"),
    }
}

fn print_notices(page: &mut AdminPage) {
    for notice in page.take_notices() {
        print_notice(&notice);
    }
}

fn render_scheme_table(page: &AdminPage) {
    let rows = page.rows();
    if rows.is_empty() {
        println!("No schemes found. Create your first one!");
        return;
    }
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    println!("{table}");
}

async fn run_admin(services: &AppServices) {
    let mut page = AdminPage::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("Admin Panel · enter password to manage schemes ('quit' to exit)");
    'session: loop {
        while !page.is_authenticated() {
            let Some(password) = prompt(&mut lines, "Password: ").await else {
                return;
            };
            if password == "quit" {
                return;
            }
            if password.is_empty() {
                continue;
            }
            page.login(&services.schemes, &password).await;
            print_notices(&mut page);
        }

        render_scheme_table(&page);
        println!("Commands: list · add · edit <n> · delete <n> · refresh · logout · quit");

        loop {
            let Some(input) = prompt(&mut lines, "admin> ").await else {
                return;
            };
            let mut parts = input.split_whitespace();
            let command = parts.next().unwrap_or("");
            let argument = parts.next();

            match command {
                "" => {}
                "list" => render_scheme_table(&page),
                "refresh" => {
                    page.refresh_schemes(&services.schemes).await;
                    print_notices(&mut page);
                    render_scheme_table(&page);
                }
                "add" => {
                    page.open_create();
                    run_form(&mut page, services, &mut lines).await;
                }
                "edit" => match resolve_row(&page, argument) {
                    Some(id) => {
                        page.open_edit(&id);
                        run_form(&mut page, services, &mut lines).await;
                    }
                    None => println!("usage: edit <row #>"),
                },
                "delete" => match resolve_row(&page, argument) {
                    Some(id) => {
                        let confirmed = matches!(
                            prompt(&mut lines, "Are you sure you want to delete this scheme? (y/N): ").await,
                            Some(answer) if answer.eq_ignore_ascii_case("y")
                        );
                        page.delete_scheme(&services.schemes, &id, confirmed).await;
                        print_notices(&mut page);
                        if confirmed {
                            render_scheme_table(&page);
                        }
                    }
                    None => println!("usage: delete <row #>"),
                },
                "logout" => {
                    page.logout();
                    println!("Logged out.");
                    continue 'session;
                }
                "quit" => return,
                other => println!("unknown command: {other}"),
            }
        }
    }
}

fn resolve_row(page: &AdminPage, argument: Option<&str>) -> Option<String> {
    let index: usize = argument?.parse().ok()?;
    page.schemes()
        .get(index.checked_sub(1)?)
        .map(|scheme| scheme.id.clone())
}

/// Prompt every form field, submit, and repeat until the form closes or
/// the admin cancels. Kept input stays in the form between attempts.
async fn run_form(page: &mut AdminPage, services: &AppServices, lines: &mut InputLines) {
    loop {
        if !fill_form(page, lines).await {
            page.cancel_form();
            println!("Cancelled.");
            return;
        }
        page.submit_form(&services.schemes).await;
        print_notices(page);
        if !matches!(page.phase(), AdminPhase::FormOpen { .. }) {
            render_scheme_table(page);
            return;
        }
    }
}

/// Prompt each field, empty input keeping the shown value. Returns false
/// when the admin cancels or input ends.
async fn fill_form(page: &mut AdminPage, lines: &mut InputLines) -> bool {
    println!("Fill the scheme fields (empty keeps the shown value, 'cancel' aborts):");
    let Some(form) = page.form_mut() else {
        return false;
    };

    let text_fields: [(&str, &mut String); 6] = [
        ("Title", &mut form.title),
        ("Min investment (INR)", &mut form.min_investment),
        ("Max investment (INR)", &mut form.max_investment),
        ("Return %", &mut form.return_percentage),
        ("Duration (months)", &mut form.duration_months),
        ("Description", &mut form.description),
    ];
    for (label, value) in text_fields {
        let Some(input) = prompt(lines, &format!("{} [{}]: ", label, value)).await else {
            return false;
        };
        if input == "cancel" {
            return false;
        }
        if !input.is_empty() {
            *value = input;
        }
    }

    let flags: [(&str, &mut bool); 2] = [
        ("Popular", &mut form.is_popular),
        ("Active", &mut form.is_active),
    ];
    for (label, value) in flags {
        let shown = if *value { "y" } else { "n" };
        let Some(input) = prompt(lines, &format!("{} (y/n) [{}]: ", label, shown)).await else {
            return false;
        };
        match input.to_ascii_lowercase().as_str() {
            "" => {}
            "cancel" => return false,
            "y" | "yes" => *value = true,
            "n" | "no" => *value = false,
            _ => {}
        }
    }
    true
}
