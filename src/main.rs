//! askdb - Ask your SQLite database questions in plain English.

use std::str::FromStr;

use tracing::{error, info};

use askdb::agent::SqlAgent;
use askdb::chat;
use askdb::cli::Cli;
use askdb::config::Config;
use askdb::error::{AskdbError, Result};
use askdb::format::render_response;
use askdb::llm::{create_client, LlmProvider};
use askdb::query::QueryExecutor;
use askdb::{logging, schema};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init();

    if let Err(e) = run().await {
        error!("{}: {}", e.category(), e);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse_args();
    let config = Config::load_from_file(&cli.config_path())?;

    // CLI arguments take precedence over the config file
    let database_path = cli
        .database
        .clone()
        .unwrap_or_else(|| config.database.path.clone());
    let schema_file = cli.schema.clone().or(config.database.schema_file.clone());

    let provider_name = cli
        .llm
        .clone()
        .unwrap_or_else(|| config.llm.provider.clone());
    let provider = LlmProvider::from_str(&provider_name).map_err(|e| AskdbError::config(e))?;
    let model = cli.model.clone().or_else(|| config.llm.model.clone());

    info!(
        database = %database_path.display(),
        provider = provider.as_str(),
        "Starting askdb"
    );

    let client = create_client(provider, cli.api_key.clone(), model)?;
    let executor = QueryExecutor::new(&database_path);
    let schema_text = schema::load_schema(&executor, schema_file.as_deref()).await?;
    let agent = SqlAgent::new(client, &database_path, schema_text);

    match &cli.question {
        Some(question) => {
            let response = agent.ask(question, !cli.no_explanation).await;

            if cli.json {
                let json = serde_json::to_string_pretty(&response)
                    .map_err(|e| AskdbError::internal(format!("Failed to encode response: {e}")))?;
                println!("{json}");
            } else {
                println!("{}", render_response(&response, cli.max_rows));
            }

            if !response.is_success() {
                std::process::exit(1);
            }
            Ok(())
        }
        None => chat::run_chat(agent, cli.max_rows).await,
    }
}
