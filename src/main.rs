use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use tripchat::application::ports::{ChatGateway, IdentityStore};
use tripchat::application::services::{
    ConversationFilter, ConversationStore, MessageFilter, MessageStore, SortKey,
};
use tripchat::config::Settings;
use tripchat::domain::{ConversationDraft, ConversationId, Message, MessageDraft, UserIdentity};
use tripchat::infrastructure::gateway::HttpChatGateway;
use tripchat::infrastructure::identity::FileIdentityStore;
use tripchat::infrastructure::observability::{TracingConfig, init_tracing};

#[derive(Parser, Debug)]
#[command(author, version, about = "Trip-planning chat client")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List past trips.
    List {
        #[arg(long, default_value = "-updatedAt", allow_hyphen_values = true)]
        sort: SortKey,
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show one trip by id.
    Show { id: String },
    /// Print a trip's transcript.
    History { id: String },
    /// Send a message; omit --chat to start a new trip.
    Send {
        #[arg(long)]
        chat: Option<String>,
        #[arg(required = true)]
        prompt: Vec<String>,
    },
    /// Reserve the next trip id without contacting the assistant.
    New {
        #[arg(long)]
        title: Option<String>,
    },
    /// Delete a trip.
    Delete { id: String },
    /// Store the claims carried by an ID token.
    Login {
        #[arg(long)]
        id_token: String,
    },
    /// Forget the stored identity.
    Logout,
    /// Print the stored identity.
    Whoami,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let (settings, environment) = Settings::load().context("Failed to load settings")?;
    init_tracing(TracingConfig::from_settings(&settings.logging, environment));

    let identity_store = FileIdentityStore::new(settings.identity.path.clone());

    match &args.command {
        Command::Login { id_token } => {
            let identity = UserIdentity::from_id_token(id_token)?;
            identity_store.save(&identity).await?;
            println!("Signed in as {}", identity.email.as_deref().unwrap_or(&identity.sub));
            return Ok(());
        }
        Command::Logout => {
            identity_store.clear().await?;
            println!("Signed out");
            return Ok(());
        }
        _ => {}
    }

    let identity = identity_store
        .load()
        .await
        .context("No signed-in user; run `tripchat login` first")?;

    let gateway: Arc<dyn ChatGateway> = Arc::new(HttpChatGateway::new(&settings.gateway)?);
    let conversations = ConversationStore::new(Arc::clone(&gateway), identity.clone());
    let messages = MessageStore::new(Arc::clone(&gateway), identity.clone());

    match args.command {
        Command::List { sort, limit } => {
            for conversation in conversations.list(sort, limit).await {
                let marker = if conversation.synthesized { " (placeholder)" } else { "" };
                println!("{:>6}  {}{}", conversation.id, conversation.title, marker);
            }
        }
        Command::Show { id } => {
            let found = conversations.filter(&ConversationFilter::by_id(id.as_str())).await;
            match found.first() {
                Some(c) => println!(
                    "{}  {}  updated {}",
                    c.id,
                    c.title,
                    c.updated_at.as_deref().unwrap_or("-")
                ),
                None => println!("No trip {}", id),
            }
        }
        Command::History { id } => {
            for message in messages.filter(&MessageFilter::by_conversation(id.as_str())).await {
                print_message(&message);
            }
        }
        Command::Send { chat, prompt } => {
            let draft = MessageDraft::user(prompt.join(" "), chat.map(ConversationId::from));
            let outcome = messages.create(draft).await;
            if let Some(id) = &outcome.user.conversation_id {
                println!("[trip {}]", id);
            }
            match &outcome.assistant {
                Some(reply) => {
                    if let Some(title) = reply.metadata.title() {
                        println!("Title: {}", title);
                    }
                    print_message(reply);
                }
                None => eprintln!("No reply from the assistant; your message was kept."),
            }
        }
        Command::New { title } => {
            let draft = ConversationDraft {
                title,
                ..ConversationDraft::default()
            };
            let conversation = conversations.create(draft).await;
            println!("{}  {}", conversation.id, conversation.title);
        }
        Command::Delete { id } => {
            let deleted = conversations.delete(&ConversationId::from(id.as_str())).await?;
            println!("{}", if deleted { "Deleted" } else { "Backend refused delete" });
        }
        Command::Whoami => {
            println!("{}", serde_json::to_string_pretty(&identity)?);
        }
        Command::Login { .. } | Command::Logout => {}
    }

    Ok(())
}

fn print_message(message: &Message) {
    println!(
        "{} [{}] {}",
        message.created_at.format("%Y-%m-%d %H:%M"),
        message.sender,
        message.content
    );
    let flights = message.metadata.flight_ids();
    let hotels = message.metadata.hotel_ids();
    if !flights.is_empty() || !hotels.is_empty() {
        println!("    flights: {}  hotels: {}", flights.len(), hotels.len());
    }
}
