// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `troika shell` command implementation.
//!
//! Interactive REPL with readline history, streaming output, and slash
//! commands for routing overrides. Each query is routed to a tier, dispatched
//! against that tier's own conversation history, and the assistant response
//! is recorded back into the same history. A failed dispatch rolls the
//! recorded user turn back so no tier keeps an unanswered user turn.

use std::io::Write;
use std::sync::Arc;

use colored::Colorize;
use futures::StreamExt;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{info, warn};

use troika_config::model::TroikaConfig;
use troika_core::types::{ChatRequest, Tier};
use troika_core::{ProviderAdapter, TroikaError};
use troika_ollama::OllamaClient;
use troika_router::{Router, RoutingDecision, Session};

use crate::status::model_statuses;

/// What the command dispatcher decided about one input line.
enum CommandAction {
    /// The line was a recognized command and has been handled.
    Handled,
    /// The line was an exit command.
    Exit,
    /// The line is a chat query.
    Query,
}

/// Runs the `troika shell` interactive REPL.
pub async fn run_shell(config: TroikaConfig) -> Result<(), TroikaError> {
    let provider: Arc<dyn ProviderAdapter> = Arc::new(OllamaClient::new(&config.ollama)?);

    println!("{}", "troika".bold().green());
    println!(
        "Routing: {}. Type {} for commands, {} to exit.\n",
        if config.routing.model_assist {
            "model-assisted"
        } else {
            "rule-based"
        },
        "/status".yellow(),
        "/bye".yellow(),
    );

    // One-time availability report; the shell still starts when the backend
    // is down so the user can fix it and retry.
    report_availability(&config, provider.as_ref()).await;

    let router = Router::with_provider(config.routing.clone(), provider.clone());
    let mut session = Session::new();

    let mut rl = DefaultEditor::new()
        .map_err(|e| TroikaError::Internal(format!("failed to initialize readline: {e}")))?;

    let prompt = format!("{}> ", config.agent.name.green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(&line);

                match handle_command(trimmed, &config, provider.as_ref(), &mut session).await {
                    CommandAction::Exit => break,
                    CommandAction::Handled => continue,
                    CommandAction::Query => {}
                }

                if let Err(e) =
                    handle_query(&config, provider.as_ref(), &router, &mut session, trimmed).await
                {
                    eprintln!("{}: {e}", "error".red());
                    if let TroikaError::Dispatch { model, .. } = &e {
                        eprintln!(
                            "{}",
                            format!("make sure `{model}` is available on the backend (ollama list)")
                                .dimmed()
                        );
                    }
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                // Ctrl+C / Ctrl+D
                break;
            }
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    println!("{}", "goodbye".dimmed());
    Ok(())
}

/// Handles slash commands; returns `Query` for anything else.
async fn handle_command(
    input: &str,
    config: &TroikaConfig,
    provider: &dyn ProviderAdapter,
    session: &mut Session,
) -> CommandAction {
    let lower = input.to_lowercase();
    match lower.as_str() {
        "/bye" | "/quit" | "/exit" => return CommandAction::Exit,
        "/fast" => {
            session.set_forced_tier(Tier::Fast);
            announce_forced(&config.routing.fast_model, Tier::Fast);
        }
        "/normal" => {
            session.set_forced_tier(Tier::Normal);
            announce_forced(&config.routing.normal_model, Tier::Normal);
        }
        "/strong" => {
            session.set_forced_tier(Tier::Strong);
            announce_forced(&config.routing.strong_model, Tier::Strong);
        }
        "/auto" => {
            session.consume_forced_tier();
            session.set_fixed_temperature(None);
            println!("{}", "-> automatic routing enabled".dimmed());
        }
        "/status" => {
            let mode = if config.routing.model_assist {
                "model-assisted"
            } else {
                "rule-based"
            };
            println!("{}", format!("-> routing mode: {mode}").dimmed());
            match session.fixed_temperature() {
                Some(t) => println!("{}", format!("-> fixed temperature: {t}").dimmed()),
                None => println!("{}", "-> temperature: automatic".dimmed()),
            }
        }
        "/models" => match provider.list_models().await {
            Ok(models) if models.is_empty() => println!("No models found"),
            Ok(models) => println!("Available models: {}", models.join(", ")),
            Err(e) => eprintln!("{}: {e}", "error".red()),
        },
        "/clear" => {
            session.reset();
            println!("{}", "-> conversation cleared".dimmed());
        }
        _ if lower == "/temp" || lower.starts_with("/temp ") => match parse_temp_arg(input) {
            Some(t) => {
                session.set_fixed_temperature(Some(t));
                println!("{}", format!("-> fixed temperature: {t}").dimmed());
            }
            None => println!("{}", "-> usage: /temp 0.7".dimmed()),
        },
        _ => return CommandAction::Query,
    }
    CommandAction::Handled
}

/// Parse the argument of `/temp <x>`, clamped to [0, 1].
fn parse_temp_arg(input: &str) -> Option<f32> {
    input
        .split_whitespace()
        .nth(1)?
        .parse::<f32>()
        .ok()
        .map(|t| t.clamp(0.0, 1.0))
}

fn announce_forced(model: &str, tier: Tier) {
    println!(
        "{}",
        format!("-> next query will use {model} ({tier})").dimmed()
    );
}

/// Routes one query, dispatches it against the chosen tier's history, and
/// records (or rolls back) the turn.
async fn handle_query(
    config: &TroikaConfig,
    provider: &dyn ProviderAdapter,
    router: &Router,
    session: &mut Session,
    input: &str,
) -> Result<(), TroikaError> {
    let decision = router
        .route(input, session, config.routing.model_assist)
        .await;

    println!(
        "{}",
        format!(
            "[{} | {} | temp={:.1}] {}",
            decision.tier, decision.model, decision.temperature, decision.rationale
        )
        .dimmed()
    );

    // The just-recorded user turn is included in the dispatched history.
    let request = ChatRequest {
        model: decision.model.clone(),
        messages: session.history(decision.tier).to_vec(),
        temperature: decision.temperature,
    };

    let mut stream = match provider.chat_stream(request).await {
        Ok(stream) => stream,
        Err(e) => {
            session.rollback_last_user_turn(decision.tier);
            return Err(dispatch_error(&decision, e));
        }
    };

    let mut full_response = String::new();
    while let Some(chunk) = stream.next().await {
        match chunk {
            Ok(chunk) => {
                if !chunk.content.is_empty() {
                    print!("{}", chunk.content);
                    std::io::stdout().flush().ok();
                    full_response.push_str(&chunk.content);
                }
                if chunk.done {
                    break;
                }
            }
            Err(e) => {
                println!();
                session.rollback_last_user_turn(decision.tier);
                return Err(dispatch_error(&decision, e));
            }
        }
    }
    println!();

    session.record_assistant_turn(decision.tier, full_response);
    info!(tier = %decision.tier, model = %decision.model, "turn complete");
    Ok(())
}

/// Wrap a provider error as a dispatch failure naming the tier and model.
fn dispatch_error(decision: &RoutingDecision, e: TroikaError) -> TroikaError {
    TroikaError::Dispatch {
        tier: decision.tier,
        model: decision.model.clone(),
        message: e.to_string(),
    }
}

/// Report backend reachability and configured model availability once at
/// startup.
async fn report_availability(config: &TroikaConfig, provider: &dyn ProviderAdapter) {
    match provider.list_models().await {
        Ok(installed) => {
            let statuses = model_statuses(config, &installed);
            let missing: Vec<_> = statuses.iter().filter(|s| !s.available).collect();
            if missing.is_empty() {
                return;
            }
            println!("{}", "Missing models. Run:".yellow());
            for status in missing {
                println!("  ollama pull {}", status.model);
                warn!(role = %status.role, model = %status.model, "configured model not installed");
            }
            println!();
        }
        Err(e) => {
            eprintln!(
                "{}",
                format!(
                    "backend unreachable at {} ({e}); start it with `ollama serve`",
                    config.ollama.base_url
                )
                .yellow()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_temp_arg_accepts_valid_values() {
        assert_eq!(parse_temp_arg("/temp 0.3"), Some(0.3));
        assert_eq!(parse_temp_arg("/temp 1"), Some(1.0));
    }

    #[test]
    fn parse_temp_arg_clamps_out_of_range() {
        assert_eq!(parse_temp_arg("/temp 2.5"), Some(1.0));
        assert_eq!(parse_temp_arg("/temp -1"), Some(0.0));
    }

    #[test]
    fn parse_temp_arg_rejects_garbage() {
        assert_eq!(parse_temp_arg("/temp"), None);
        assert_eq!(parse_temp_arg("/temp warm"), None);
    }
}
