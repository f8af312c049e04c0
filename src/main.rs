use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use log::error;

use lognest::db::{establish_connection_pool, get_connection, run_migrations};
use lognest::models::config::ServerConfig;

#[derive(Parser)]
#[command(name = "lognest", version, about = "Build-log blogging API")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default).
    Serve,
    /// Apply pending database migrations.
    Migrate {
        /// Revert every migration before applying them again.
        #[arg(long)]
        fresh: bool,
    },
}

fn migrate(config: &ServerConfig, fresh: bool) -> std::io::Result<()> {
    let pool = establish_connection_pool(&config.database_url).map_err(std::io::Error::other)?;
    let mut conn = get_connection(&pool).map_err(std::io::Error::other)?;
    let applied = run_migrations(&mut conn, fresh).map_err(std::io::Error::other)?;
    log::info!("Database is up to date ({applied} migration(s) applied)");
    Ok(())
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let server_config = match ServerConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load server config: {e}");
            std::process::exit(1);
        }
    };

    match Cli::parse().command.unwrap_or(Command::Serve) {
        Command::Serve => lognest::run(server_config).await,
        Command::Migrate { fresh } => migrate(&server_config, fresh),
    }
}
