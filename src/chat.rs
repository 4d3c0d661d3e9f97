//! Interactive chat session.
//!
//! Reads questions from stdin, answers them through the agent, and handles
//! a small set of slash-commands for help and introspection.

use std::io::Write as _;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::agent::SqlAgent;
use crate::error::{AskdbError, Result};
use crate::format::render_response;

const WELCOME: &str = r#"
================================================================================
                askdb - Natural Language Database Query Tool
================================================================================

Ask questions about your database in plain English!

Examples:
  - What are the top 10 products by revenue?
  - Show me customers who spent more than $50,000
  - Which employees have processed the most orders?

Commands:
  /help     - Show this help message
  /examples - Show example questions
  /schema   - Show database schema
  /quit     - Exit the program
================================================================================
"#;

const EXAMPLES: &str = r#"
================================================================================
Example Questions
================================================================================

Sales Analysis:
  - What are the top 5 customers by total spending?
  - Show me monthly revenue for the last 6 months
  - What's the average order value?

Customer Analysis:
  - How many active customers do we have?
  - Which customers haven't ordered in 6 months?
  - What's the customer distribution by country?

Inventory:
  - Which products are low on stock?
  - Show me products that have never been ordered
  - What's the total inventory value?

================================================================================
"#;

/// A recognized slash-command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatCommand {
    Help,
    Examples,
    Schema,
    Quit,
    Unknown(String),
}

/// Parses a slash-command from input, if it is one.
///
/// Returns None for ordinary questions.
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return None;
    }

    Some(match trimmed.to_lowercase().as_str() {
        "/help" => ChatCommand::Help,
        "/examples" => ChatCommand::Examples,
        "/schema" => ChatCommand::Schema,
        "/quit" | "/exit" | "/q" => ChatCommand::Quit,
        _ => ChatCommand::Unknown(trimmed.to_string()),
    })
}

/// Runs the interactive chat loop until `/quit` or end of input.
pub async fn run_chat(agent: SqlAgent, max_rows: usize) -> Result<()> {
    println!("{WELCOME}");

    let stdin = BufReader::new(tokio::io::stdin());
    let mut lines = stdin.lines();

    loop {
        print!("Ask a question (or /help): ");
        std::io::stdout()
            .flush()
            .map_err(|e| AskdbError::internal(format!("Failed to flush stdout: {e}")))?;

        let line = lines
            .next_line()
            .await
            .map_err(|e| AskdbError::internal(format!("Failed to read input: {e}")))?;

        let Some(line) = line else {
            // End of input behaves like /quit
            println!("\nGoodbye!");
            return Ok(());
        };

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        match parse_command(input) {
            Some(ChatCommand::Quit) => {
                println!("\nGoodbye!");
                return Ok(());
            }
            Some(ChatCommand::Help) => println!("{WELCOME}"),
            Some(ChatCommand::Examples) => println!("{EXAMPLES}"),
            Some(ChatCommand::Schema) => {
                println!("\n{}\n", agent.schema());
            }
            Some(ChatCommand::Unknown(cmd)) => {
                println!("Unknown command: {cmd}");
                println!("Try /help for available commands\n");
            }
            None => {
                let response = agent.ask(input, true).await;
                println!("\n{}", render_response(&response, max_rows));
            }
        }
    }
}
