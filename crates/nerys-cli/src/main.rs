//! Readline REPL that drives a widget session against a live service.
//!
//! This is a development surface: it consumes the same render command stream
//! a DOM binding would, and prints it to the terminal.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use nerys_application::{RenderCommand, SessionController};
use nerys_core::config::WidgetConfig;
use nerys_core::markup::{Block, Inline};
use nerys_core::profile::LeadForm;
use nerys_core::transcript::MessageRole;
use nerys_infrastructure::{NerysPaths, TomlProfileRepository};
use nerys_interaction::HttpAssistantClient;

#[derive(Parser, Debug)]
#[command(name = "nerys", about = "Property-assistant chat REPL")]
struct Args {
    /// Base URL of the assistant service API.
    #[arg(long, default_value = "http://localhost:8000/api/v1")]
    api_base: String,
    /// Language code forwarded to the service.
    #[arg(long, default_value = "en")]
    lang: String,
    /// Timeout bound for outbound calls, in milliseconds.
    #[arg(long, default_value_t = 15_000)]
    timeout_ms: u64,
    /// Greeting seeded as the first assistant message.
    #[arg(long)]
    greeting: Option<String>,
}

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: vec![
                "/export".to_string(),
                "/lead".to_string(),
                "/agent".to_string(),
                "/lang".to_string(),
                "/toggle".to_string(),
                "/quit".to_string(),
            ],
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for CliHelper {}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = WidgetConfig {
        api_base: args.api_base,
        timeout_ms: args.timeout_ms,
        language: args.lang,
        greeting: args.greeting,
        ..WidgetConfig::default()
    };

    let transport = Arc::new(HttpAssistantClient::new(&config)?);
    let repository = Arc::new(TomlProfileRepository::new()?);
    let (controller, mut commands) = SessionController::new(config, transport, repository).await;
    let controller = Arc::new(controller);

    // Render task: apply the command stream to the terminal.
    let renderer = tokio::spawn(async move {
        while let Some(command) = commands.recv().await {
            print_command(command);
        }
    });

    let helper = CliHelper::new();
    let mut rl = Editor::new()?;
    rl.set_helper(Some(helper));

    println!("{}", "=== Nerys chat ===".bright_magenta().bold());
    println!(
        "{}",
        "Type a message, '/export' for a PDF summary, '/lead Name, email, phone' to leave details, '/quit' to exit."
            .bright_black()
    );
    println!();

    controller.open().await;

    loop {
        let readline = rl.readline(">> ");

        match readline {
            Ok(line) => {
                let trimmed = line.trim().to_string();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&trimmed);

                match trimmed.split_whitespace().next().unwrap_or_default() {
                    "/quit" | "/exit" => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                    "/export" => controller.request_export().await,
                    "/agent" => controller.contact_agent().await,
                    "/toggle" => {
                        if controller.is_open().await {
                            controller.close().await;
                        } else {
                            controller.open().await;
                        }
                    }
                    "/lang" => {
                        let code = trimmed.trim_start_matches("/lang").trim();
                        if code.is_empty() {
                            println!("{}", "Usage: /lang <code>".bright_black());
                        } else {
                            controller.set_language(code).await;
                        }
                    }
                    "/lead" => {
                        let rest = trimmed.trim_start_matches("/lead").trim();
                        controller.submit_lead(parse_lead_form(rest)).await;
                    }
                    _ => controller.send(&trimmed).await,
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted)
            | Err(rustyline::error::ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Readline error: {:?}", err).red());
                break;
            }
        }
    }

    drop(controller);
    renderer.abort();
    Ok(())
}

/// Parses `Name, email[, phone]` into a lead form.
fn parse_lead_form(input: &str) -> LeadForm {
    let mut parts = input.splitn(3, ',').map(str::trim);
    LeadForm {
        full_name: parts.next().unwrap_or_default().to_string(),
        email: parts.next().unwrap_or_default().to_string(),
        phone: parts
            .next()
            .filter(|phone| !phone.is_empty())
            .map(str::to_string),
    }
}

fn print_command(command: RenderCommand) {
    match command {
        RenderCommand::PanelVisible { visible } => {
            let label = if visible { "[panel open]" } else { "[panel closed]" };
            println!("{}", label.bright_black());
        }
        RenderCommand::AppendMessage { role, blocks, .. } => match role {
            MessageRole::User => {}
            MessageRole::Assistant => print_blocks(&blocks),
        },
        RenderCommand::SetTyping { on } => {
            if on {
                println!("{}", "assistant is typing…".bright_black());
            }
        }
        RenderCommand::SetQuickReplies { labels } => {
            if !labels.is_empty() {
                let row = labels
                    .iter()
                    .map(|label| format!("[{}]", label))
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("{}", row.cyan());
            }
        }
        RenderCommand::ShowPropertyResults { results } => {
            for result in results {
                println!("  {}", result.title.bold());
                let summary = result.summary_line();
                if !summary.is_empty() {
                    println!("  {}", summary);
                }
                if let Some(location) = &result.location {
                    println!("  {}", location);
                }
                println!("  {}", result.price_label().green());
                println!();
            }
        }
        RenderCommand::ShowLeadPrompt => {
            println!(
                "{}",
                "Leave your details with '/lead Name, email, phone' (or keep chatting)."
                    .bright_yellow()
            );
        }
        RenderCommand::DismissLeadPrompt => {}
        RenderCommand::LeadFormError { message } => println!("{}", message.red()),
        RenderCommand::Notice { message } => println!("{}", message.yellow()),
        RenderCommand::SaveDocument { file_name, bytes } => {
            let path = NerysPaths::download_dir().join(&file_name);
            match std::fs::write(&path, &bytes) {
                Ok(()) => println!("{}", format!("Saved {}", path.display()).green()),
                Err(err) => eprintln!("{}", format!("Failed to save {}: {}", file_name, err).red()),
            }
        }
        RenderCommand::ComposeEmail { to, subject, body } => {
            println!("{}", format!("mailto:{}?subject={}", to, subject).cyan());
            for line in body.lines() {
                println!("  {}", line.bright_black());
            }
        }
    }
}

fn print_blocks(blocks: &[Block]) {
    for block in blocks {
        match block {
            Block::Paragraph { spans } => println!("{}", render_spans(spans)),
            Block::ParagraphBreak => println!(),
            Block::List { ordered, items } => {
                for (index, item) in items.iter().enumerate() {
                    let marker = if *ordered {
                        format!("{}.", index + 1)
                    } else {
                        "-".to_string()
                    };
                    println!("  {} {}", marker, render_spans(item));
                }
            }
        }
    }
}

fn render_spans(spans: &[Inline]) -> String {
    spans
        .iter()
        .map(|span| match span {
            Inline::Text { text } => unescape(text).bright_blue().to_string(),
            Inline::Strong { text } => unescape(text).bright_blue().bold().to_string(),
            Inline::Emphasis { text } => unescape(text).bright_blue().italic().to_string(),
        })
        .collect()
}

/// Blocks carry DOM-escaped text; undo that for terminal display.
fn unescape(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}
