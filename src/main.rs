//! caddy-sites
//!
//! Command-line front end for the site block codec.
//!
//! # Architecture Overview
//!
//! ```text
//!   sites dir ──▶ store ──▶ codec::parse ──▶ SiteRecord ──▶ listings / JSON
//!                                              │
//!   JSON / templates ─────────────────────────┘
//!                                              ▼
//!                                        codec::generate ──▶ block text ──▶ store
//! ```

use std::error::Error;
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Parser, Subcommand};

use caddy_sites::config::{load_config_with, AppConfig, ConfigOverrides};
use caddy_sites::observability::init_logging;
use caddy_sites::site::{clean_domains, filter_sites, template, SiteRecord, Snippet};
use caddy_sites::store::{SiteEvent, SiteStore, SiteWatcher};
use caddy_sites::{generate, parse};

#[derive(Parser)]
#[command(name = "caddy-sites")]
#[command(about = "Parse, generate and manage Caddy site blocks", long_about = None)]
struct Cli {
    /// Configuration file (TOML).
    #[arg(short, long, env = "CADDY_SITES_CONFIG")]
    config: Option<PathBuf>,

    /// Override the sites directory.
    #[arg(long)]
    sites_dir: Option<PathBuf>,

    /// Override the log level.
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a site file and print the record as JSON
    Parse {
        file: PathBuf,
        /// Identity used when the block has no domains (defaults to the file stem)
        #[arg(long)]
        identity: Option<String>,
    },
    /// Generate a site block from a JSON record ("-" reads stdin)
    Generate { record: PathBuf },
    /// Check that a site file survives a parse/generate round trip
    Check { file: PathBuf },
    /// List sites
    List {
        #[arg(long)]
        tag: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// List all tags in use
    Tags,
    /// Show site counters
    Stats,
    /// List service templates
    Templates,
    /// List known snippets
    Snippets,
    /// Create a site, from a template or from the configured defaults
    New {
        #[arg(long)]
        template: Option<String>,
        /// Domains, comma or space separated
        #[arg(long, required = true)]
        domain: Vec<String>,
        #[arg(long)]
        host: Option<String>,
        /// Backend port when no template is given
        #[arg(long, default_value = "80")]
        port: String,
        /// Write into the sites directory instead of printing
        #[arg(long)]
        write: bool,
    },
    /// Watch the sites directory and report changes
    Watch,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        sites_dir: cli.sites_dir,
        log_level: cli.log_level,
    };
    let config = load_config_with(cli.config.as_deref(), &overrides)?;
    init_logging(&config.observability)?;

    let store = SiteStore::new(config.paths.sites_dir());

    match cli.command {
        Commands::Parse { file, identity } => {
            let identity = identity.unwrap_or_else(|| file_stem(&file));
            let mut site = parse(&fs::read_to_string(&file)?, &identity);
            site.filepath = Some(file);
            println!("{}", serde_json::to_string_pretty(&site)?);
        }
        Commands::Generate { record } => {
            let site: SiteRecord = serde_json::from_str(&read_input(&record)?)?;
            print!("{}", generate(&site));
        }
        Commands::Check { file } => check(&file)?,
        Commands::List { tag, search, json } => {
            let sites = store.list();
            let shown = filter_sites(&sites, search.as_deref(), tag.as_deref());
            if json {
                println!("{}", serde_json::to_string_pretty(&shown)?);
            } else {
                for site in shown {
                    print_site_line(site);
                }
            }
        }
        Commands::Tags => {
            for tag in store.all_tags() {
                println!("{}", tag);
            }
        }
        Commands::Stats => {
            println!("{}", serde_json::to_string_pretty(&store.stats())?);
        }
        Commands::Templates => {
            for t in template::TEMPLATES {
                println!("{:<18} {:<20} {}", t.id, t.category.label(), t.description);
            }
        }
        Commands::Snippets => {
            for snippet in Snippet::ALL {
                println!("{:<18} {:<18} {}", snippet.as_str(), snippet.label(), snippet.description());
            }
        }
        Commands::New {
            template,
            domain,
            host,
            port,
            write,
        } => new_site(&config, &store, template.as_deref(), &domain, host, &port, write)?,
        Commands::Watch => watch(&config, &store).await?,
    }

    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

fn read_input(path: &Path) -> std::io::Result<String> {
    if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        Ok(buf)
    } else {
        fs::read_to_string(path)
    }
}

fn print_site_line(site: &SiteRecord) {
    let tags = if site.tags.is_empty() {
        String::new()
    } else {
        format!(" [{}]", site.tags.join(", "))
    };
    println!(
        "{} {:<40} {}{}",
        site.access().icon(),
        site.domains_string(),
        site.target_url(),
        tags
    );
}

fn check(file: &Path) -> Result<(), Box<dyn Error>> {
    let identity = file_stem(file);
    let first = generate(&parse(&fs::read_to_string(file)?, &identity));
    let second = generate(&parse(&first, &identity));

    if first != second {
        tracing::warn!(file = %file.display(), "Round trip is not stable");
        return Err(format!("{}: regenerated text changes on a second pass", file.display()).into());
    }
    println!("{}: ok", file.display());
    print!("{}", first);
    Ok(())
}

fn new_site(
    config: &AppConfig,
    store: &SiteStore,
    template_id: Option<&str>,
    domains: &[String],
    host: Option<String>,
    port: &str,
    write: bool,
) -> Result<(), Box<dyn Error>> {
    let domains: Vec<String> = domains.iter().flat_map(|d| clean_domains(d)).collect();

    let mut site = match template_id {
        Some(id) => {
            let preset = template::find(id).ok_or_else(|| format!("unknown template: {}", id))?;
            preset.instantiate(domains, config.defaults.target_host.clone())
        }
        None => config.defaults.new_site(domains, port),
    };
    if let Some(host) = host {
        site.target_host = host;
    }
    if write {
        let path = store.create(&mut site)?;
        println!("{}", path.display());
    } else {
        print!("{}", generate(&site));
    }
    Ok(())
}

async fn watch(config: &AppConfig, store: &SiteStore) -> Result<(), Box<dyn Error>> {
    let poll = Duration::from_secs(config.watch.poll_interval_secs);
    let (watcher, mut events) = SiteWatcher::new(store.sites_dir(), poll);
    let _guard = watcher.run()?;

    loop {
        tokio::select! {
            Some(event) = events.recv() => match event {
                SiteEvent::Updated(site) => print_site_line(&site),
                SiteEvent::Removed(path) => println!("removed {}", path.display()),
            },
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Stopping watcher");
                break;
            }
        }
    }
    Ok(())
}
