// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end routing tests: route -> dispatch -> record/rollback, driven
//! through the public APIs against the mock provider.

use std::sync::Arc;

use futures::StreamExt;

use troika_config::model::RoutingConfig;
use troika_core::types::{ChatRequest, Role, Tier};
use troika_core::ProviderAdapter;
use troika_router::{Router, Session};
use troika_test_utils::MockProvider;

fn routing_config() -> RoutingConfig {
    RoutingConfig {
        fast_model: "quick-tutor".into(),
        normal_model: "balanced-tutor".into(),
        strong_model: "deep-tutor".into(),
        ..RoutingConfig::default()
    }
}

/// Dispatch one routed query against the provider and record the outcome
/// the way the shell does: assistant turn on success, rollback on failure.
async fn run_turn(
    router: &Router,
    provider: &dyn ProviderAdapter,
    session: &mut Session,
    query: &str,
    use_model_assist: bool,
) -> Result<Tier, ()> {
    let decision = router.route(query, session, use_model_assist).await;

    let request = ChatRequest {
        model: decision.model.clone(),
        messages: session.history(decision.tier).to_vec(),
        temperature: decision.temperature,
    };

    match provider.chat_stream(request).await {
        Ok(stream) => {
            let chunks: Vec<_> = stream.collect().await;
            let mut text = String::new();
            for chunk in chunks {
                match chunk {
                    Ok(c) => text.push_str(&c.content),
                    Err(_) => {
                        session.rollback_last_user_turn(decision.tier);
                        return Err(());
                    }
                }
            }
            session.record_assistant_turn(decision.tier, text);
            Ok(decision.tier)
        }
        Err(_) => {
            session.rollback_last_user_turn(decision.tier);
            Err(())
        }
    }
}

#[tokio::test]
async fn successful_turn_records_both_sides_in_one_tier() {
    let provider = MockProvider::with_responses(vec!["Hello! How can I help?".into()]);
    let router = Router::new(routing_config());
    let mut session = Session::new();

    let tier = run_turn(&router, &provider, &mut session, "hi", false)
        .await
        .unwrap();

    assert_eq!(tier, Tier::Fast);
    let history = session.history(Tier::Fast);
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].role, Role::User);
    assert_eq!(history[0].content, "hi");
    assert_eq!(history[1].role, Role::Assistant);
    assert_eq!(history[1].content, "Hello! How can I help?");
    assert!(session.history(Tier::Normal).is_empty());
    assert!(session.history(Tier::Strong).is_empty());
}

#[tokio::test]
async fn failed_dispatch_leaves_history_unchanged() {
    let provider = MockProvider::failing("connection refused");
    let router = Router::new(routing_config());
    let mut session = Session::new();

    // Seed a completed exchange first.
    session.record_user_turn(Tier::Fast, "hi");
    session.record_assistant_turn(Tier::Fast, "hello");
    let len_before = session.history(Tier::Fast).len();

    let result = run_turn(&router, &provider, &mut session, "thanks", false).await;

    assert!(result.is_err());
    assert_eq!(session.history(Tier::Fast).len(), len_before);
}

#[tokio::test]
async fn forced_tier_applies_to_exactly_one_turn() {
    let provider =
        MockProvider::with_responses(vec!["strong answer".into(), "fast answer".into()]);
    let router = Router::new(routing_config());
    let mut session = Session::new();

    session.set_forced_tier(Tier::Strong);

    let first = run_turn(&router, &provider, &mut session, "hi", false)
        .await
        .unwrap();
    assert_eq!(first, Tier::Strong);

    let second = run_turn(&router, &provider, &mut session, "hi", false)
        .await
        .unwrap();
    assert_eq!(second, Tier::Fast);

    assert_eq!(session.history(Tier::Strong).len(), 2);
    assert_eq!(session.history(Tier::Fast).len(), 2);
}

#[tokio::test]
async fn conversation_context_grows_within_a_tier() {
    let provider = MockProvider::with_responses(vec!["one".into(), "two".into()]);
    let router = Router::new(routing_config());
    let mut session = Session::new();

    run_turn(&router, &provider, &mut session, "hi", false)
        .await
        .unwrap();
    run_turn(&router, &provider, &mut session, "thanks", false)
        .await
        .unwrap();

    // Both queries classified fast; the second dispatch saw the first
    // exchange plus the new user turn.
    let history = session.history(Tier::Fast);
    assert_eq!(history.len(), 4);
    assert_eq!(history[3].content, "two");
}

#[tokio::test]
async fn model_assisted_turn_uses_aux_decision_then_dispatches() {
    let aux_provider = MockProvider::with_responses(vec![
        r#"{"difficulty": "strong", "temperature": 0.4, "reason": "proof"}"#.into(),
    ]);
    let router = Router::with_provider(routing_config(), Arc::new(aux_provider));
    let chat_provider = MockProvider::with_responses(vec!["QED".into()]);
    let mut session = Session::new();

    let decision = router
        .route("prove the halting problem is undecidable", &mut session, true)
        .await;
    assert_eq!(decision.tier, Tier::Strong);
    assert_eq!(decision.model, "deep-tutor");

    let request = ChatRequest {
        model: decision.model.clone(),
        messages: session.history(decision.tier).to_vec(),
        temperature: decision.temperature,
    };
    let text = chat_provider.chat(request).await.unwrap();
    session.record_assistant_turn(decision.tier, text);

    let history = session.history(Tier::Strong);
    assert_eq!(history.len(), 2);
    assert_eq!(history[1].content, "QED");
}
