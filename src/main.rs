//! Binary entrypoint for the gamecoin CLI.
//!
//! Commands:
//! - `init` - write a starter `config.toml` and sample game assets
//! - `balance <user>` / `win <user> <amount>` - read or adjust a balance
//! - `daily <user> [--lucky N]` - claim the daily reward
//! - `guess <user> <n> <pick>` - play one guess round; `guess-table` prints prices
//! - `luck <user>` - guess-game luck and play count
//! - `show <user>` - dump the stored record as JSON
//! - `emoji`, `story`, `keys <template>`, `tally <ballots...>` - text game helpers
//!
//! See the library crate docs for module-level details: `gamecoin::`.
use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use log::{info, warn};
use std::path::Path;

use gamecoin::config::Config;
use gamecoin::economy::{self, SledUserStore};
use gamecoin::games;

#[derive(Parser)]
#[command(name = "gamecoin")]
#[command(about = "Coin economy and mini-game helpers for chat bots")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration and sample asset files
    Init,
    /// Show a user's balance
    Balance { user: String },
    /// Add (or with a negative amount, remove) coins
    Win {
        user: String,
        #[arg(allow_hyphen_values = true)]
        amount: String,
    },
    /// Claim the daily reward
    Daily {
        user: String,
        /// Lucky number 1-100 for a shot at the jackpot (0 = no guess)
        #[arg(short, long, default_value_t = 0)]
        lucky: u32,
    },
    /// Play one round of guess-the-number
    Guess {
        user: String,
        /// Range size: the secret number is drawn from 1..=n
        n: usize,
        /// Your guess
        pick: u32,
    },
    /// Print the guess-game price list
    GuessTable,
    /// Show guess-game luck and play count
    Luck { user: String },
    /// Dump a user's stored record as JSON
    Show { user: String },
    /// Print a random emoji string
    Emoji,
    /// Print a random mad-lib template and the words it asks for
    Story,
    /// List the placeholder keys of a mad-lib template
    Keys { template: String },
    /// Count ballots and announce the winner
    Tally {
        #[arg(required = true)]
        ballots: Vec<String>,
    },
}

const SAMPLE_EMOJI: &str = "😀\n🎲\n🐍\n🦀\n🌵\n🍕\n🚀\n🎸\n🐙\n🌈\n";
const SAMPLE_MADLIBS: &str = "{name#1} found a {adjective} {noun} behind the {place}.\\n{name#1} was {emotion}.\n\
The {animal} would not stop {verb} until the {noun} was {adjective}.\n";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config early to configure logging (Init writes the config instead)
    let pre_config = match cli.command {
        Commands::Init => None,
        _ => Config::load(&cli.config).await.ok(),
    };
    init_logging(&pre_config, cli.verbose);

    let config = match pre_config {
        Some(config) => config,
        None => {
            if !matches!(cli.command, Commands::Init) {
                warn!("Could not load {}; using default configuration", cli.config);
            }
            Config::default()
        }
    };

    match cli.command {
        Commands::Init => init(&cli.config).await?,
        Commands::Balance { user } => {
            let store = open_store(&config)?;
            let coin = economy::balance(&store, &user)?;
            println!("{} has {}", user, coin.with_symbol());
        }
        Commands::Win { user, amount } => {
            let store = open_store(&config)?;
            let amount = economy::parse_amount(&amount)?;
            let coin = economy::apply_delta(&store, &user, amount)?;
            info!("win: {} {:+.2}", user, amount);
            println!("{} now has {}", user, coin.with_symbol());
        }
        Commands::Daily { user, lucky } => {
            let store = open_store(&config)?;
            let reward = config.economy.daily_reward()?;
            let outcome = reward.claim(&store, &user, lucky, Utc::now(), &mut rand::thread_rng())?;
            println!("{}", outcome);
        }
        Commands::Guess { user, n, pick } => {
            let store = open_store(&config)?;
            let outcome = economy::play_guess(&store, &user, n, pick, &mut rand::thread_rng())?;
            println!("{}", outcome.message());
        }
        Commands::GuessTable => {
            println!("{}", economy::render_guess_table());
        }
        Commands::Luck { user } => {
            let store = open_store(&config)?;
            let (luck, plays) = economy::luck_and_plays(&store, &user)?;
            println!("{}: luck {:.3} over {} plays", user, luck, plays);
        }
        Commands::Show { user } => {
            let store = open_store(&config)?;
            let record = economy::UserStore::get(&store, &user)?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Emoji => {
            let list = games::load_emoji_list(Path::new(&config.assets.emoji_list))?;
            println!("{}", games::emoji_string(&list, &mut rand::thread_rng())?);
        }
        Commands::Story => {
            let stories = games::load_stories(Path::new(&config.assets.madlibs))?;
            let story = games::random_story(&stories, &mut rand::thread_rng())
                .ok_or_else(|| anyhow!("No stories in {}", config.assets.madlibs))?;
            println!("{}", story);
            println!("Needs: {}", games::story_keys(story).join(", "));
        }
        Commands::Keys { template } => {
            for key in games::story_keys(&template) {
                println!("{}", key);
            }
        }
        Commands::Tally { ballots } => match games::tally(&ballots) {
            Some((winner, votes)) => println!("{} wins with {} vote(s)", winner, votes),
            None => println!("No votes cast"),
        },
    }

    Ok(())
}

fn open_store(config: &Config) -> Result<SledUserStore> {
    let path = config.storage.user_db_path();
    SledUserStore::open(&path)
        .map_err(|e| anyhow!("Failed to open user store {}: {}", path.display(), e))
}

async fn init(config_path: &str) -> Result<()> {
    info!("Initializing new gamecoin configuration");
    let cfg = Config::default();
    let serialized = toml::to_string_pretty(&cfg)?;
    tokio::fs::write(config_path, serialized).await?;
    info!("Configuration file created at {}", config_path);

    tokio::fs::create_dir_all(&cfg.storage.data_dir).await?;
    for (path, sample) in [
        (&cfg.assets.emoji_list, SAMPLE_EMOJI),
        (&cfg.assets.madlibs, SAMPLE_MADLIBS),
    ] {
        let path = Path::new(path);
        if path.exists() {
            info!("Keeping existing {}", path.display());
            continue;
        }
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(path, sample).await?;
        info!("Wrote sample asset {}", path.display());
    }
    println!("Initialized. Edit {} to customize.", config_path);
    Ok(())
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .and_then(|cfg| cfg.logging.level.parse().ok())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);
    let log_file = config.as_ref().and_then(|cfg| cfg.logging.file.clone());
    let file = log_file.and_then(|path| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });
    if let Some(f) = file {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // Echo to the console only when someone is watching
        let is_tty = atty::is(atty::Stream::Stderr);
        builder.format(move |fmt, record| {
            let ts = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if is_tty {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            let ts = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            writeln!(fmt, "{} [{}] {}", ts, record.level(), record.args())
        });
    }
    let _ = builder.try_init();
}
