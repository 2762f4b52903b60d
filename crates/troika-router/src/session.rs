// SPDX-FileCopyrightText: 2026 Troika Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-conversation session state.
//!
//! A [`Session`] owns one independent conversation history per tier plus
//! the transient override state (forced tier, fixed temperature). Histories
//! are never shared or merged across tiers, so each tier's model only ever
//! sees the turns that were routed to it.
//!
//! A session serves one conversation and is processed one query at a time;
//! there is no internal synchronization. Hosts serving multiple sessions
//! must serialize access per session.

use troika_core::types::{ConversationTurn, Role, Tier};

/// Session state: three tier histories plus override state.
#[derive(Debug, Default)]
pub struct Session {
    histories: [Vec<ConversationTurn>; 3],
    forced_tier: Option<Tier>,
    fixed_temperature: Option<f32>,
}

/// Index of a tier's history slot.
const fn slot(tier: Tier) -> usize {
    match tier {
        Tier::Fast => 0,
        Tier::Normal => 1,
        Tier::Strong => 2,
    }
}

impl Session {
    /// Create an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// The conversation history for one tier, oldest turn first.
    pub fn history(&self, tier: Tier) -> &[ConversationTurn] {
        &self.histories[slot(tier)]
    }

    /// Append a user turn to `tier`'s history.
    pub fn record_user_turn(&mut self, tier: Tier, content: impl Into<String>) {
        self.histories[slot(tier)].push(ConversationTurn::user(content));
    }

    /// Append an assistant turn to `tier`'s history.
    pub fn record_assistant_turn(&mut self, tier: Tier, content: impl Into<String>) {
        self.histories[slot(tier)].push(ConversationTurn::assistant(content));
    }

    /// Remove the most recent turn from `tier`'s history if it is a user
    /// turn.
    ///
    /// Used when dispatch fails after the user turn was recorded, so the
    /// history never keeps an orphaned, unanswered user turn. A no-op when
    /// the history is empty or its last turn is an assistant turn.
    pub fn rollback_last_user_turn(&mut self, tier: Tier) {
        let history = &mut self.histories[slot(tier)];
        if history.last().is_some_and(|turn| turn.role == Role::User) {
            history.pop();
        }
    }

    /// Force the next routing decision to `tier`. One-shot: consumed by the
    /// next call to [`consume_forced_tier`](Self::consume_forced_tier).
    pub fn set_forced_tier(&mut self, tier: Tier) {
        self.forced_tier = Some(tier);
    }

    /// Take and clear the forced tier, if set.
    pub fn consume_forced_tier(&mut self) -> Option<Tier> {
        self.forced_tier.take()
    }

    /// Pin (or with `None`, clear) the temperature used for every decision.
    /// Unlike the forced tier, this persists until explicitly cleared.
    pub fn set_fixed_temperature(&mut self, temperature: Option<f32>) {
        self.fixed_temperature = temperature;
    }

    /// The pinned temperature, if any. Non-consuming.
    pub fn fixed_temperature(&self) -> Option<f32> {
        self.fixed_temperature
    }

    /// Clear all three histories. Override state is unaffected.
    pub fn reset(&mut self) {
        for history in &mut self.histories {
            history.clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn histories_are_isolated_per_tier() {
        let mut session = Session::new();
        session.record_user_turn(Tier::Fast, "hi");

        assert_eq!(session.history(Tier::Fast).len(), 1);
        assert!(session.history(Tier::Normal).is_empty());
        assert!(session.history(Tier::Strong).is_empty());
    }

    #[test]
    fn turns_append_in_order() {
        let mut session = Session::new();
        session.record_user_turn(Tier::Normal, "question");
        session.record_assistant_turn(Tier::Normal, "answer");

        let history = session.history(Tier::Normal);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].role, Role::User);
        assert_eq!(history[1].role, Role::Assistant);
        assert_eq!(history[1].content, "answer");
    }

    #[test]
    fn rollback_removes_trailing_user_turn() {
        let mut session = Session::new();
        session.record_user_turn(Tier::Strong, "failed question");
        session.rollback_last_user_turn(Tier::Strong);
        assert!(session.history(Tier::Strong).is_empty());
    }

    #[test]
    fn rollback_is_noop_on_empty_history() {
        let mut session = Session::new();
        session.rollback_last_user_turn(Tier::Fast);
        assert!(session.history(Tier::Fast).is_empty());
    }

    #[test]
    fn rollback_is_noop_when_last_turn_is_assistant() {
        let mut session = Session::new();
        session.record_user_turn(Tier::Normal, "question");
        session.record_assistant_turn(Tier::Normal, "answer");
        session.rollback_last_user_turn(Tier::Normal);
        assert_eq!(session.history(Tier::Normal).len(), 2);
    }

    #[test]
    fn forced_tier_is_one_shot() {
        let mut session = Session::new();
        session.set_forced_tier(Tier::Strong);
        assert_eq!(session.consume_forced_tier(), Some(Tier::Strong));
        assert_eq!(session.consume_forced_tier(), None);
    }

    #[test]
    fn fixed_temperature_persists_until_cleared() {
        let mut session = Session::new();
        session.set_fixed_temperature(Some(0.3));
        assert_eq!(session.fixed_temperature(), Some(0.3));
        assert_eq!(session.fixed_temperature(), Some(0.3));

        session.set_fixed_temperature(None);
        assert_eq!(session.fixed_temperature(), None);
    }

    #[test]
    fn reset_clears_histories_but_not_overrides() {
        let mut session = Session::new();
        session.record_user_turn(Tier::Fast, "hi");
        session.record_user_turn(Tier::Strong, "prove it");
        session.set_forced_tier(Tier::Normal);
        session.set_fixed_temperature(Some(0.4));

        session.reset();

        for tier in Tier::ALL {
            assert!(session.history(tier).is_empty());
        }
        assert_eq!(session.consume_forced_tier(), Some(Tier::Normal));
        assert_eq!(session.fixed_temperature(), Some(0.4));
    }
}
