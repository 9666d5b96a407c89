//! Interactive chat loop over the store assistant.

use crate::output;
use clearflow_application::ChatService;
use clearflow_domain::Locale;
use colored::Colorize;
use std::io::{BufRead, Write};

/// Seed assistant message for a fresh session, per locale.
pub fn default_greeting(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Hi! How can we help you today?",
        Locale::Ar => "مرحبا! كيف يمكننا مساعدتك اليوم؟",
    }
}

/// Run the chat loop until EOF or `/quit`.
pub async fn run(mut chat: ChatService) -> anyhow::Result<()> {
    println!();
    println!("{}", "Store assistant (/help for commands)".dimmed());
    println!();

    let stdin = std::io::stdin();
    loop {
        print!(">>> ");
        std::io::stdout().flush()?;

        let Some(line) = stdin.lock().lines().next() else {
            println!("Bye!");
            break;
        };
        let line = line?;
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('/') {
            if handle_command(&mut chat, command) {
                break;
            }
            continue;
        }

        match chat.send(line).await {
            Ok(reply) => {
                println!("{} {}", "store:".yellow().bold(), reply);
            }
            Err(e) => {
                // The question stays in the thread; only the reply failed.
                eprintln!("{} {}", "send failed:".red(), e);
            }
        }
    }

    Ok(())
}

/// Returns true when the loop should exit.
fn handle_command(chat: &mut ChatService, command: &str) -> bool {
    let mut parts = command.split_whitespace();
    match parts.next() {
        Some("quit") | Some("q") => return true,
        Some("new") => {
            chat.new_session();
            if let Some(session) = chat.sessions().active_session() {
                output::print_message(&session.messages[0]);
            }
        }
        Some("history") => {
            for session in chat.sessions().registry().by_recent_activity() {
                println!(
                    "  {:<36} {}  {}",
                    session.title,
                    session.last_activity.format("%Y-%m-%d %H:%M"),
                    format!("[{}]", session.id).dimmed()
                );
            }
        }
        Some("switch") => match parts.next() {
            Some(id) => {
                chat.sessions_mut().switch_session(id);
                if let Some(session) = chat.sessions().active_session() {
                    println!("{} {}", "Switched to:".cyan().bold(), session.title);
                    for message in &session.messages {
                        output::print_message(message);
                    }
                }
            }
            None => eprintln!("usage: /switch <session-id>"),
        },
        Some("delete") => match parts.next() {
            Some(id) => chat.sessions_mut().delete_session(id),
            None => eprintln!("usage: /delete <session-id>"),
        },
        Some("help") => {
            println!("  /history           list conversations");
            println!("  /switch <id>       open a conversation");
            println!("  /delete <id>       delete a conversation");
            println!("  /quit              exit");
        }
        _ => eprintln!("Unknown command; /help lists commands."),
    }
    false
}
