//! Veestributes command-line client.
//!
//! Thin front end over the client library: signs in, lists releases and
//! analytics, uploads tracks. Notifications are printed to stderr as they
//! appear. Logging goes to stderr through `env_logger` (`RUST_LOG`).

use clap::{Parser, Subcommand};
use log::debug;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use veestributes_client::config::{self, apply_env_overrides, load_config_file};
use veestributes_client::models::{FilePart, ReleaseUpload};
use veestributes_client::validation::{login_form, signup_form};
use veestributes_client::{ApiClient, ClientConfig, ClientContext, Form, RequestError, Theme};

/// Veestributes - music distribution from the terminal
#[derive(Parser)]
#[command(name = "veestributes")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Settings file (default: ~/.config/veestributes/settings.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and store the session token
    Login {
        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Create an account
    Signup {
        #[arg(long)]
        firstname: String,

        #[arg(long)]
        lastname: String,

        #[arg(short, long)]
        email: String,

        #[arg(short, long)]
        password: String,
    },

    /// Sign out and forget the stored token
    Logout,

    /// Show the signed-in account
    Profile,

    /// List your releases
    Releases,

    /// Show one release with its files
    Release {
        /// Release id
        id: u64,
    },

    /// Show streams, earnings and recent activity
    Analytics,

    /// Upload a track
    Upload {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        artist: String,

        #[arg(long)]
        album: Option<String>,

        #[arg(short, long)]
        genre: String,

        /// Release date (YYYY-MM-DD)
        #[arg(long)]
        release_date: String,

        #[arg(long)]
        description: Option<String>,

        /// Comma-separated tags
        #[arg(long)]
        tags: Option<String>,

        /// Target platform (repeatable)
        #[arg(long = "platform")]
        platforms: Vec<String>,

        /// Audio file (mp3, wav, flac, aac, ogg)
        #[arg(long)]
        audio: PathBuf,

        /// Cover artwork (jpg, png, gif; up to 10 MB)
        #[arg(long)]
        artwork: Option<PathBuf>,
    },

    /// Show or switch the color theme
    Theme {
        /// toggle, dark or light (default: show the current theme)
        #[arg(value_parser = ["toggle", "dark", "light"])]
        mode: Option<String>,
    },

    /// Check that the server is up
    Health,

    /// Platform-wide listings (admin accounts only)
    Admin {
        #[command(subcommand)]
        listing: AdminListing,
    },
}

#[derive(Subcommand)]
enum AdminListing {
    /// All accounts
    Users,

    /// The latest 100 releases across all accounts
    Releases,
}

fn load_settings(cli: &Cli) -> Result<ClientConfig, String> {
    let path = cli
        .config
        .clone()
        .or_else(|| config::config_dir().map(|dir| dir.join("settings.json")));

    let mut config = match path {
        Some(path) if path.exists() => load_config_file(&path)?,
        _ => ClientConfig::default(),
    };
    config = apply_env_overrides(config)?;
    if let Some(base_url) = &cli.base_url {
        config.base_url = base_url.clone();
        config
            .validate()
            .map_err(|e| format!("Invalid configuration: {}", e))?;
    }
    Ok(config)
}

fn submit(mut form: Form, values: &[(&str, &str)]) -> Form {
    for (name, value) in values {
        form.input(name, *value);
    }
    form
}

fn describe(err: RequestError) -> String {
    if err.is_unauthorized() {
        format!("{} (sign in with `veestributes login`)", err)
    } else {
        err.to_string()
    }
}

fn read_file(field: &str, path: &Path) -> Result<FilePart, String> {
    FilePart::from_path(field, path).map_err(|e| e.to_string())
}

async fn run(cli: Cli) -> Result<(), String> {
    let config = load_settings(&cli)?;
    debug!("Using API at {}", config.base_url);

    let context = ClientContext::open(config).map_err(|e| e.to_string())?;
    context
        .notifications()
        .add_listener(|n| eprintln!("[{}] {}", n.level, n.message));

    let client = ApiClient::new(context).map_err(|e| e.to_string())?;

    match cli.command {
        Commands::Login { email, password } => {
            let mut form = submit(
                login_form(),
                &[("email", email.as_str()), ("password", password.as_str())],
            );
            let auth = client.login_with(&mut form).await.map_err(describe)?;
            if let Some(user) = auth.user {
                println!("Signed in as {} <{}>", user.name, user.email);
            }
        }
        Commands::Signup {
            firstname,
            lastname,
            email,
            password,
        } => {
            let mut form = submit(
                signup_form(),
                &[
                    ("firstname", firstname.as_str()),
                    ("lastname", lastname.as_str()),
                    ("email", email.as_str()),
                    ("password", password.as_str()),
                ],
            );
            client.signup_with(&mut form).await.map_err(describe)?;
        }
        Commands::Logout => {
            client.logout().await.map_err(describe)?;
            println!("Signed out");
        }
        Commands::Profile => {
            let user = client.profile().await.map_err(describe)?;
            println!("{} <{}>", user.name, user.email);
            if user.is_admin {
                println!("Administrator");
            }
        }
        Commands::Releases => {
            let releases = client.releases().await.map_err(describe)?;
            if releases.is_empty() {
                println!("No releases yet");
            }
            for r in releases {
                println!(
                    "{:>6}  {} - {}  [{}]  {} streams  ${:.2}",
                    r.id, r.artist, r.title, r.status, r.streams, r.earnings
                );
            }
        }
        Commands::Release { id } => {
            let detail = client.release(id).await.map_err(describe)?;
            let r = &detail.release;
            println!("{} - {} ({})", r.artist, r.title, r.status);
            if let Some(date) = r.release_date {
                println!("Release date: {}", date);
            }
            let platforms = detail.platform_list();
            if !platforms.is_empty() {
                println!("Platforms: {}", platforms.join(", "));
            }
            for file in &detail.files {
                println!("  {} ({}, {} bytes)", file.filename, file.file_type, file.file_size);
            }
        }
        Commands::Analytics => {
            let analytics = client.analytics().await.map_err(describe)?;
            println!("Releases: {}", analytics.total_releases);
            println!("Streams:  {}", analytics.total_streams);
            println!("Earnings: ${:.2}", analytics.total_earnings);
            println!("Growth:   {:+.1}%", analytics.monthly_growth);
            for (label, value) in analytics.chart_points() {
                println!("  {:<8} {}", label, value);
            }
            for item in &analytics.recent_activity {
                println!("  {} ({})", item.description, item.time);
            }
        }
        Commands::Upload {
            title,
            artist,
            album,
            genre,
            release_date,
            description,
            tags,
            platforms,
            audio,
            artwork,
        } => {
            let upload = ReleaseUpload {
                title,
                artist,
                album,
                genre,
                release_date,
                description,
                tags,
                platforms,
                audio: read_file(ReleaseUpload::AUDIO_FIELD, &audio)?,
                artwork: artwork
                    .as_deref()
                    .map(|path| read_file(ReleaseUpload::ARTWORK_FIELD, path))
                    .transpose()?,
            };
            let response = client.upload_release(&upload).await.map_err(describe)?;
            println!("Release id: {}", response.release_id);
        }
        Commands::Admin { listing } => match listing {
            AdminListing::Users => {
                for user in client.admin_users().await.map_err(describe)? {
                    let role = if user.is_admin { "admin" } else { "artist" };
                    println!("{:>6}  {} <{}>  [{}]", user.id, user.name, user.email, role);
                }
            }
            AdminListing::Releases => {
                for r in client.admin_releases().await.map_err(describe)? {
                    println!(
                        "{:>6}  {} - {}  [{}]  {}  {} streams",
                        r.id, r.artist, r.title, r.status, r.user_email, r.streams
                    );
                }
            }
        },
        Commands::Health => {
            let health = client.health().await.map_err(describe)?;
            println!("{}", health.status);
        }
        Commands::Theme { mode } => {
            let context = client.context();
            let theme = match mode.as_deref() {
                None => context.theme(),
                Some("toggle") => context.toggle_theme().map_err(|e| e.to_string())?,
                Some(value) => {
                    let theme = Theme::parse(value)
                        .ok_or_else(|| format!("Unknown theme: {}", value))?;
                    context.set_theme(theme).map_err(|e| e.to_string())?;
                    theme
                }
            };
            println!("{}", theme);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::from(1)
        }
    }
}
