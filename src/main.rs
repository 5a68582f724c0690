use std::io::{self, Read};
use std::path::PathBuf;
use std::sync::Arc;

use bagvote::api::{ApiClient, ApiError, NewUser};
use bagvote::config::{ClientConfig, ConfigError};
use bagvote::guard::{NavigationError, NavigationGuard};
use bagvote::routes;
use bagvote::session::{FileStore, SessionContext};
use clap::{Args, Parser, Subcommand};
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Api(#[from] ApiError),
    #[error("{0}")]
    Navigation(#[from] NavigationError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("payload must be a JSON object")]
    PayloadNotObject,
    #[error("failed to read payload from stdin: {0}")]
    Stdin(#[from] io::Error),
}

#[derive(Parser, Debug)]
#[command(name = "bagvote", about = "Bag configurator API and session CLI")]
struct Cli {
    /// Overrides `BAGVOTE_API_BASE_URL`.
    #[arg(long)]
    api_base_url: Option<String>,

    /// Overrides `BAGVOTE_SESSION_PATH`.
    #[arg(long)]
    session_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Forget the stored session.
    Logout,
    /// Show the stored session.
    Whoami,
    /// Run the navigation guard for a path and print where it lands.
    Navigate {
        path: String,
        #[arg(long)]
        from: Option<String>,
    },
    #[command(flatten)]
    Api(ApiCommand),
}

/// Commands that talk to the API.
#[derive(Subcommand, Debug)]
enum ApiCommand {
    /// Sign in and store the session.
    Login {
        email: String,
        #[arg(long, env = "BAGVOTE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account. Does not sign in.
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "BAGVOTE_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long, help = "Additional fields as a JSON object, or - for stdin")]
        extra: Option<String>,
    },
    /// Ping the API so a sleeping instance starts up.
    Wake,
    Bag(BagCommand),
}

#[derive(Args, Debug)]
struct BagCommand {
    #[command(subcommand)]
    command: BagSubcommand,
}

#[derive(Subcommand, Debug)]
enum BagSubcommand {
    List,
    Get {
        bag_id: String,
    },
    Create {
        #[arg(long, help = "JSON object, or - for stdin")]
        data: String,
    },
    Update {
        bag_id: String,
        #[arg(long, help = "JSON object, or - for stdin")]
        data: String,
    },
    Vote {
        bag_id: String,
    },
    /// Bags created by the signed-in user.
    Mine,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        match &e {
            CliError::Api(api) => eprintln!("error [{}]: {e}", api.error_code()),
            _ => eprintln!("error: {e}"),
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = cli.api_base_url.as_deref() {
        config = config.with_api_base_url(url)?;
    }
    if let Some(path) = cli.session_path {
        config.session_path = path;
    }

    let session = SessionContext::new(Arc::new(FileStore::new(&config.session_path)));

    match cli.command {
        Command::Logout => {
            ApiClient::new(&config, session)?.logout();
            Ok(())
        }
        Command::Whoami => {
            let state = session.load();
            print_json(&json!({
                "authenticated": state.token.is_some(),
                "user": state.user,
            }))
        }
        Command::Navigate { path, from } => run_navigate(session, &path, from.as_deref()),
        Command::Api(command) => {
            let client = ApiClient::new(&config, session)?;
            run_api(&client, command).await
        }
    }
}

fn run_navigate(session: SessionContext, path: &str, from: Option<&str>) -> Result<(), CliError> {
    let guard = NavigationGuard::new(session);
    let from = from.and_then(routes::resolve);
    let location = guard.navigate(path, from.as_ref())?;
    print_json(&json!({
        "route": location.name.as_str(),
        "path": location.path(),
        "redirected": routes::resolve(path).as_ref() != Some(&location),
    }))
}

async fn run_api(client: &ApiClient, command: ApiCommand) -> Result<(), CliError> {
    match command {
        ApiCommand::Login { email, password } => {
            let data = client.login(&email, &password).await?;
            print_json(&json!({ "user": data.get("user") }))
        }
        ApiCommand::Register {
            first_name,
            last_name,
            email,
            password,
            extra,
        } => {
            let extra = match extra.as_deref().map(read_payload).transpose()? {
                Some(Value::Object(fields)) => fields,
                _ => Map::new(),
            };
            let user = NewUser {
                first_name,
                last_name,
                email,
                password,
                extra,
            };
            print_json(&client.register(&user).await?)
        }
        ApiCommand::Wake => {
            client.wake_up_api().await;
            Ok(())
        }
        ApiCommand::Bag(bag) => run_bag(client, bag).await,
    }
}

async fn run_bag(client: &ApiClient, bag: BagCommand) -> Result<(), CliError> {
    match bag.command {
        BagSubcommand::List => print_json(&client.get_all_bags().await?),
        BagSubcommand::Get { bag_id } => print_json(&client.get_bag_by_id(&bag_id).await?),
        BagSubcommand::Create { data } => {
            let payload = read_payload(&data)?;
            print_json(&client.create_bag(&payload).await?)
        }
        BagSubcommand::Update { bag_id, data } => {
            let payload = read_payload(&data)?;
            print_json(&client.update_bag(&bag_id, &payload).await?)
        }
        BagSubcommand::Vote { bag_id } => print_json(&client.vote_for_bag(&bag_id).await?),
        BagSubcommand::Mine => print_json(&Value::Array(client.get_my_bags().await?)),
    }
}

fn read_payload(data: &str) -> Result<Value, CliError> {
    if data == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return parse_payload(&buf);
    }
    parse_payload(data)
}

fn parse_payload(raw: &str) -> Result<Value, CliError> {
    let value = serde_json::from_str::<Value>(raw.trim())?;
    if !value.is_object() {
        return Err(CliError::PayloadNotObject);
    }
    Ok(value)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
