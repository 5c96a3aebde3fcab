//! Two-player life point tracker with a shared undo/redo log.
//!
//! Both counters and the history live in one [`LifeTracker`] so undo replays
//! mutations across players in the exact order they happened. Damage floors
//! at zero, heals are unbounded, and only `reset_all` bypasses the history.

use std::fmt;
use std::num::NonZeroU32;
use std::str::FromStr;

use serde::Serialize;
use tracing::{debug, trace};

use crate::error::TrackerError;
use crate::game::history::{History, HistoryEntry};
use crate::game::rules::STARTING_LIFE_POINTS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PlayerId {
    Player1,
    Player2,
}

impl PlayerId {
    pub const ALL: [PlayerId; 2] = [PlayerId::Player1, PlayerId::Player2];

    /// Wire name used in form parameters and element ids.
    pub fn as_str(self) -> &'static str {
        match self {
            PlayerId::Player1 => "player1",
            PlayerId::Player2 => "player2",
        }
    }

    /// Display name shown on the board.
    pub fn label(self) -> &'static str {
        match self {
            PlayerId::Player1 => "Player 1",
            PlayerId::Player2 => "Player 2",
        }
    }

    fn index(self) -> usize {
        match self {
            PlayerId::Player1 => 0,
            PlayerId::Player2 => 1,
        }
    }
}

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PlayerId {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "player1" => Ok(PlayerId::Player1),
            "player2" => Ok(PlayerId::Player2),
            other => Err(TrackerError::UnknownPlayer(other.to_string())),
        }
    }
}

/// Read-only view handed to the presentation layer.
#[derive(Debug, Serialize)]
pub struct TrackerSnapshot<'a> {
    pub player1: u32,
    pub player2: u32,
    pub can_undo: bool,
    pub can_redo: bool,
    pub history: &'a [HistoryEntry],
    pub redo: &'a [HistoryEntry],
}

#[derive(Debug, Clone)]
pub struct LifeTracker {
    life_points: [u32; 2],
    history: History,
}

impl Default for LifeTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl LifeTracker {
    pub fn new() -> Self {
        Self {
            life_points: [STARTING_LIFE_POINTS; 2],
            history: History::new(),
        }
    }

    pub fn life_points(&self, player: PlayerId) -> u32 {
        self.life_points[player.index()]
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Subtract `amount`, stopping at zero. The recorded entry holds the
    /// clamped result, so the applied delta may be smaller than requested.
    pub fn apply_damage(&mut self, player: PlayerId, amount: NonZeroU32) -> HistoryEntry {
        let current = self.life_points(player);
        self.commit(player, current.saturating_sub(amount.get()))
    }

    pub fn apply_heal(&mut self, player: PlayerId, amount: NonZeroU32) -> HistoryEntry {
        let current = self.life_points(player);
        self.commit(player, current.saturating_add(amount.get()))
    }

    /// Undoable: records `current -> STARTING_LIFE_POINTS` even when unchanged.
    pub fn reset_player(&mut self, player: PlayerId) -> HistoryEntry {
        self.commit(player, STARTING_LIFE_POINTS)
    }

    /// Restore both players and purge undo/redo. Cannot itself be undone.
    pub fn reset_all(&mut self) {
        self.life_points = [STARTING_LIFE_POINTS; 2];
        self.history.clear();
        debug!(target: "lifepoint_server::tracker", "reset all players, history purged");
    }

    pub fn undo(&mut self) -> Option<HistoryEntry> {
        let Some(entry) = self.history.undo() else {
            trace!(target: "lifepoint_server::tracker", "undo ignored: history empty");
            return None;
        };
        self.life_points[entry.player.index()] = entry.previous_value;
        debug!(
            target: "lifepoint_server::tracker",
            player = %entry.player,
            restored = entry.previous_value,
            "undo"
        );
        Some(entry)
    }

    pub fn redo(&mut self) -> Option<HistoryEntry> {
        let Some(entry) = self.history.redo() else {
            trace!(target: "lifepoint_server::tracker", "redo ignored: nothing undone");
            return None;
        };
        self.life_points[entry.player.index()] = entry.new_value;
        debug!(
            target: "lifepoint_server::tracker",
            player = %entry.player,
            restored = entry.new_value,
            "redo"
        );
        Some(entry)
    }

    pub fn snapshot(&self) -> TrackerSnapshot<'_> {
        TrackerSnapshot {
            player1: self.life_points(PlayerId::Player1),
            player2: self.life_points(PlayerId::Player2),
            can_undo: self.can_undo(),
            can_redo: self.can_redo(),
            history: self.history.entries(),
            redo: self.history.undone(),
        }
    }

    // Single write path for every undoable mutation.
    fn commit(&mut self, player: PlayerId, new_value: u32) -> HistoryEntry {
        let entry = HistoryEntry {
            player,
            previous_value: self.life_points(player),
            new_value,
        };
        self.life_points[player.index()] = new_value;
        self.history.record(entry);
        debug!(
            target: "lifepoint_server::tracker",
            player = %player,
            previous = entry.previous_value,
            new = entry.new_value,
            depth = self.history.entries().len(),
            "life points changed"
        );
        entry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn amt(n: u32) -> NonZeroU32 {
        NonZeroU32::new(n).unwrap()
    }

    #[test]
    fn starts_at_8000_with_empty_history() {
        let t = LifeTracker::new();
        assert_eq!(t.life_points(PlayerId::Player1), 8000);
        assert_eq!(t.life_points(PlayerId::Player2), 8000);
        assert!(!t.can_undo());
        assert!(!t.can_redo());
    }

    #[test]
    fn damage_only_touches_target_player() {
        let mut t = LifeTracker::new();
        t.apply_damage(PlayerId::Player1, amt(100));
        assert_eq!(t.life_points(PlayerId::Player1), 7900);
        assert_eq!(t.life_points(PlayerId::Player2), 8000);
    }

    #[test]
    fn damage_accumulates() {
        let mut t = LifeTracker::new();
        t.apply_damage(PlayerId::Player1, amt(500));
        t.apply_damage(PlayerId::Player1, amt(300));
        assert_eq!(t.life_points(PlayerId::Player1), 7200);
    }

    #[test]
    fn damage_floors_at_zero() {
        let mut t = LifeTracker::new();
        for _ in 0..9 {
            t.apply_damage(PlayerId::Player1, amt(1000));
        }
        assert_eq!(t.life_points(PlayerId::Player1), 0);
    }

    #[test]
    fn clamped_damage_records_actual_values() {
        let mut t = LifeTracker::new();
        t.apply_damage(PlayerId::Player2, amt(7500));
        let entry = t.apply_damage(PlayerId::Player2, amt(1000));
        assert_eq!(
            entry,
            HistoryEntry {
                player: PlayerId::Player2,
                previous_value: 500,
                new_value: 0,
            }
        );
    }

    #[test]
    fn heal_has_no_ceiling() {
        let mut t = LifeTracker::new();
        t.apply_heal(PlayerId::Player1, amt(99_999));
        assert_eq!(t.life_points(PlayerId::Player1), 107_999);
    }

    #[test]
    fn heal_saturates_instead_of_wrapping() {
        let mut t = LifeTracker::new();
        for _ in 0..50_000 {
            t.apply_heal(PlayerId::Player1, amt(99_999));
        }
        assert_eq!(t.life_points(PlayerId::Player1), u32::MAX);
    }

    #[test]
    fn reset_player_is_undoable() {
        let mut t = LifeTracker::new();
        t.apply_damage(PlayerId::Player1, amt(1000));
        t.apply_damage(PlayerId::Player2, amt(1000));
        let entry = t.reset_player(PlayerId::Player1);
        assert_eq!(entry.previous_value, 7000);
        assert_eq!(entry.new_value, 8000);
        assert_eq!(t.life_points(PlayerId::Player1), 8000);
        assert_eq!(t.life_points(PlayerId::Player2), 7000);

        t.undo();
        assert_eq!(t.life_points(PlayerId::Player1), 7000);
    }

    #[test]
    fn reset_player_at_start_still_records() {
        let mut t = LifeTracker::new();
        t.reset_player(PlayerId::Player2);
        assert_eq!(t.history().entries().len(), 1);
    }

    #[test]
    fn reset_all_purges_history() {
        let mut t = LifeTracker::new();
        t.apply_damage(PlayerId::Player1, amt(1000));
        t.apply_damage(PlayerId::Player2, amt(1000));
        t.undo();
        t.reset_all();

        assert_eq!(t.life_points(PlayerId::Player1), 8000);
        assert_eq!(t.life_points(PlayerId::Player2), 8000);
        assert!(!t.can_undo());
        assert!(!t.can_redo());
        assert_eq!(t.undo(), None);
        assert_eq!(t.life_points(PlayerId::Player1), 8000);
    }

    #[test]
    fn undo_replays_across_players_in_order() {
        let mut t = LifeTracker::new();
        t.apply_damage(PlayerId::Player1, amt(300));
        t.apply_damage(PlayerId::Player2, amt(500));
        t.apply_damage(PlayerId::Player1, amt(200));

        t.undo();
        assert_eq!(t.life_points(PlayerId::Player1), 7700);
        assert_eq!(t.life_points(PlayerId::Player2), 7500);
        t.undo();
        assert_eq!(t.life_points(PlayerId::Player2), 8000);
        t.undo();
        assert_eq!(t.life_points(PlayerId::Player1), 8000);
        assert!(!t.can_undo());
    }

    #[test]
    fn redo_reapplies_new_value() {
        let mut t = LifeTracker::new();
        t.apply_heal(PlayerId::Player2, amt(700));
        t.undo();
        assert_eq!(t.life_points(PlayerId::Player2), 8000);
        let entry = t.redo().unwrap();
        assert_eq!(entry.new_value, 8700);
        assert_eq!(t.life_points(PlayerId::Player2), 8700);
        assert!(t.can_undo());
        assert!(!t.can_redo());
    }

    #[test]
    fn new_mutation_discards_redo_chain() {
        let mut t = LifeTracker::new();
        t.apply_damage(PlayerId::Player1, amt(100));
        t.apply_damage(PlayerId::Player1, amt(100));
        t.undo();
        t.undo();
        assert!(t.can_redo());

        t.apply_heal(PlayerId::Player2, amt(100));
        assert!(!t.can_redo());
        assert_eq!(t.redo(), None);
        assert_eq!(t.life_points(PlayerId::Player1), 8000);
    }

    #[test]
    fn undo_redo_on_empty_are_noops() {
        let mut t = LifeTracker::new();
        assert_eq!(t.undo(), None);
        assert_eq!(t.redo(), None);
        assert_eq!(t.life_points(PlayerId::Player1), 8000);
    }

    #[test]
    fn player_id_parses_wire_names() {
        assert_eq!("player1".parse::<PlayerId>().unwrap(), PlayerId::Player1);
        assert_eq!("player2".parse::<PlayerId>().unwrap(), PlayerId::Player2);
        assert!(matches!(
            "player3".parse::<PlayerId>(),
            Err(TrackerError::UnknownPlayer(_))
        ));
    }

    #[test]
    fn snapshot_serializes_wire_names() {
        let mut t = LifeTracker::new();
        t.apply_damage(PlayerId::Player2, amt(400));
        let json = serde_json::to_value(t.snapshot()).unwrap();
        assert_eq!(json["player1"], 8000);
        assert_eq!(json["player2"], 7600);
        assert_eq!(json["can_undo"], true);
        assert_eq!(json["can_redo"], false);
        assert_eq!(json["history"][0]["player"], "player2");
        assert_eq!(json["history"][0]["previous_value"], 8000);
        assert_eq!(json["history"][0]["new_value"], 7600);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Damage(PlayerId, u32),
        Heal(PlayerId, u32),
        Reset(PlayerId),
        ResetAll,
        Undo,
        Redo,
    }

    fn player() -> impl Strategy<Value = PlayerId> {
        prop_oneof![Just(PlayerId::Player1), Just(PlayerId::Player2)]
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            4 => (player(), 1u32..=99_999).prop_map(|(p, a)| Op::Damage(p, a)),
            2 => (player(), 1u32..=99_999).prop_map(|(p, a)| Op::Heal(p, a)),
            1 => player().prop_map(Op::Reset),
            1 => Just(Op::ResetAll),
            3 => Just(Op::Undo),
            2 => Just(Op::Redo),
        ]
    }

    fn run(t: &mut LifeTracker, op: &Op) -> Option<HistoryEntry> {
        match *op {
            Op::Damage(p, a) => Some(t.apply_damage(p, amt(a))),
            Op::Heal(p, a) => Some(t.apply_heal(p, amt(a))),
            Op::Reset(p) => Some(t.reset_player(p)),
            Op::ResetAll => {
                t.reset_all();
                None
            }
            Op::Undo => t.undo(),
            Op::Redo => t.redo(),
        }
    }

    proptest! {
        #[test]
        fn mutations_record_exactly_one_entry(ops in prop::collection::vec(op(), 0..64)) {
            let mut t = LifeTracker::new();
            for op in &ops {
                let before = t.history().entries().len();
                run(&mut t, op);
                let after = t.history().entries().len();
                match op {
                    Op::Damage(..) | Op::Heal(..) | Op::Reset(_) => {
                        prop_assert_eq!(after, before + 1);
                        prop_assert!(!t.can_redo());
                    }
                    Op::ResetAll => prop_assert_eq!(after, 0),
                    Op::Undo | Op::Redo => prop_assert!(after.abs_diff(before) <= 1),
                }
            }
        }

        #[test]
        fn undo_then_redo_is_inverse(
            prefix in prop::collection::vec(op(), 0..32),
            last in op(),
        ) {
            let mut t = LifeTracker::new();
            for op in &prefix {
                run(&mut t, op);
            }
            if matches!(last, Op::Damage(..) | Op::Heal(..) | Op::Reset(_)) {
                let entry = run(&mut t, &last).unwrap();
                let before = entry.previous_value;
                let after = t.life_points(entry.player);

                t.undo();
                prop_assert_eq!(t.life_points(entry.player), before);
                t.redo();
                prop_assert_eq!(t.life_points(entry.player), after);
            }
        }

        #[test]
        fn damage_clamps_when_exceeding_current(prefix in prop::collection::vec(op(), 0..32), p in player(), extra in 0u32..1000) {
            let mut t = LifeTracker::new();
            for op in &prefix {
                run(&mut t, op);
            }
            let current = t.life_points(p);
            let Some(amount) = current.checked_add(extra).and_then(NonZeroU32::new) else {
                return Ok(());
            };
            let entry = t.apply_damage(p, amount);
            prop_assert_eq!(entry.previous_value, current);
            prop_assert_eq!(entry.new_value, 0);
            prop_assert_eq!(t.life_points(p), 0);
        }

        #[test]
        fn undo_all_returns_to_last_reset(ops in prop::collection::vec(op(), 0..64)) {
            let mut t = LifeTracker::new();
            for op in &ops {
                run(&mut t, op);
            }
            while t.undo().is_some() {}
            // Everything since the last reset_all (or start) unwinds to 8000.
            prop_assert_eq!(t.life_points(PlayerId::Player1), STARTING_LIFE_POINTS);
            prop_assert_eq!(t.life_points(PlayerId::Player2), STARTING_LIFE_POINTS);
        }
    }
}
