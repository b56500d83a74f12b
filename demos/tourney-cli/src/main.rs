//! `tourney-cli`: drive the tourney client from a terminal.
//!
//! Usage:
//!   tourney-cli [--api-url <url>] <command>
//!
//! The token survives between invocations, so `login` once and the other
//! commands run as that user until `logout` (or until the server stops
//! accepting the token).

use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tourney::prelude::*;

#[derive(Parser, Debug)]
#[command(name = "tourney-cli", about = "Tournament manager client")]
struct Cli {
    /// API root, including the version segment.
    #[arg(long, global = true, env = "TOURNEY_API_URL")]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Log in and remember the token.
    Login { email: String, password: String },
    /// Create an account and log into it.
    Register {
        name: String,
        email: String,
        password: String,
    },
    /// Revoke the token and forget it.
    Logout,
    /// Show the logged-in user.
    Whoami,
    /// List tournaments.
    Tournaments,
    /// List matches, optionally for one tournament.
    Matches {
        #[arg(long)]
        tournament: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    tourney::init_tracing();
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), TourneyError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_url {
        config = config.base_url(url);
    }
    let client = TourneyClient::connect(config).await?;
    let session = client.session();

    match cli.command {
        Command::Login { email, password } => {
            session.login(&email, &password).await?;
            report_user(&session.snapshot());
        }
        Command::Register {
            name,
            email,
            password,
        } => {
            session.register(&name, &email, &password, &password).await?;
            report_user(&session.snapshot());
        }
        Command::Logout => {
            session.logout().await;
            println!("Logged out.");
        }
        Command::Whoami => {
            let user = session.require_user()?;
            println!("{} <{}> ({})", user.name, user.email, user.id);
        }
        Command::Tournaments => {
            for t in client.tournaments().get_all().await? {
                println!(
                    "{:>6}  {:<30} {:<20} {} to {}  {}/{}  {}",
                    t.id.to_string(),
                    t.name,
                    t.game,
                    t.start_date,
                    t.end_date,
                    t.players_count,
                    t.max_players,
                    t.status
                );
            }
        }
        Command::Matches { tournament } => {
            let matches = match tournament {
                Some(id) => client.matches().get_for_tournament(TournamentId(id)).await?,
                None => client.matches().get_all().await?,
            };
            for m in matches {
                let score = match (m.player1_score, m.player2_score) {
                    (Some(a), Some(b)) => format!("{a}-{b}"),
                    _ => "-".to_string(),
                };
                println!(
                    "{:>6}  {} vs {}  {}  {}",
                    m.id.to_string(),
                    m.player1_name(),
                    m.player2_name(),
                    score,
                    m.status
                );
            }
        }
    }
    Ok(())
}

fn report_user(session: &Session) {
    match (&session.user, &session.error) {
        (Some(user), _) => println!("Logged in as {} <{}>.", user.name, user.email),
        (None, Some(error)) => eprintln!("Token issued, but: {error}"),
        (None, None) => println!("Token issued."),
    }
}
