use std::io::Write;
use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use storefront_assistant::error::SubmitError;
use storefront_assistant::llm_client::LlmClient;
use storefront_assistant::utils::{generate_integration_key, product_line};
use storefront_assistant::{
    Assistant, AssistantOptions, ChatMessage, Config, Conversation, FixtureStore,
};

const HELP: &str = "\
Commands:
  help    show this message
  clear   start a new conversation
  keygen  generate an Odoo integration key
  quit    exit
Anything else is sent to the assistant.";

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("storefront_assistant=info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn print_assistant(message: &ChatMessage) {
    println!("\u{001b}[96mAssistant:\u{001b}[0m {}", message.text);
    if let Some(products) = &message.related_products {
        for product in products {
            println!("\u{001b}[35m  ▌ {}\u{001b}[0m", product_line(product));
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = Config::from_env().context("failed to load configuration")?;
    let llm = LlmClient::new(&config)?;
    let assistant = Assistant::with_real_client(
        llm,
        Arc::new(FixtureStore::sample()),
        AssistantOptions::from_config(&config),
    );
    let conversation = Conversation::new(assistant);

    conversation.open();
    for message in conversation.messages() {
        print_assistant(&message);
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("\u{001b}[93mYou:\u{001b}[0m ");
        std::io::stdout().flush()?;

        let Some(input) = lines.next_line().await? else {
            break;
        };

        match input.trim() {
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "clear" => {
                conversation.clear()?;
                conversation.open();
                for message in conversation.messages() {
                    print_assistant(&message);
                }
            }
            "keygen" => {
                println!("\u{001b}[92m{}\u{001b}[0m", generate_integration_key());
                println!(
                    "\u{001b}[90mThis key is only shown once. Paste it into Odoo under \
                     Settings > Technical > System Parameters.\u{001b}[0m"
                );
            }
            text => match conversation.submit(text).await {
                Ok(reply) => print_assistant(&reply),
                Err(SubmitError::EmptyMessage) => {}
                Err(e) => eprintln!("Error: {e}"),
            },
        }
    }
    Ok(())
}
