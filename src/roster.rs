#![warn(clippy::all, clippy::pedantic)]

//! The room's player roster. Presentation data owned by the room view; the
//! engine only ever touches the current player's score.

use bevy_ecs::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankTier {
    Gold,
    Platinum,
    Diamond,
    Master,
}

impl RankTier {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            RankTier::Gold => "Gold",
            RankTier::Platinum => "Platinum",
            RankTier::Diamond => "Diamond",
            RankTier::Master => "Master",
        }
    }
}

#[derive(Debug, Clone)]
pub struct PlayerEntry {
    pub id: u32,
    pub name: String,
    pub score: u32,
    pub rank: RankTier,
    pub is_current: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct Roster {
    pub players: Vec<PlayerEntry>,
}

impl Roster {
    /// The mock opponents every room starts with, plus the current player.
    #[must_use]
    pub fn seeded() -> Self {
        let entry = |id, name: &str, score, rank, is_current| PlayerEntry {
            id,
            name: name.to_string(),
            score,
            rank,
            is_current,
        };
        Self {
            players: vec![
                entry(1, "tetrixKing", 1250, RankTier::Diamond, false),
                entry(2, "blockmaster", 980, RankTier::Gold, false),
                entry(3, "tetrixPro", 750, RankTier::Master, false),
                entry(4, "You", 500, RankTier::Platinum, true),
            ],
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<&PlayerEntry> {
        self.players.iter().find(|p| p.is_current)
    }

    /// Per-lock bonus credited to the current player.
    pub fn award_current(&mut self, points: u32) {
        if let Some(player) = self.players.iter_mut().find(|p| p.is_current) {
            player.score += points;
        }
    }

    /// Restart zeroes the current player only; opponents keep their scores.
    pub fn reset_current(&mut self) {
        if let Some(player) = self.players.iter_mut().find(|p| p.is_current) {
            player.score = 0;
        }
    }

    /// Players ordered by score, highest first, for the side panel.
    #[must_use]
    pub fn standings(&self) -> Vec<&PlayerEntry> {
        let mut sorted: Vec<&PlayerEntry> = self.players.iter().collect();
        sorted.sort_by(|a, b| b.score.cmp(&a.score));
        sorted
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self::seeded()
    }
}
