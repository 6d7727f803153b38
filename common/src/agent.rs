use std::collections::BTreeSet;

use log::debug;
use rand::Rng;
use rand::prelude::IndexedRandom;

use crate::cell::{Cell, all_cells};
use crate::knowledge::KnowledgeBase;
use crate::sentence::Sentence;

/// A knowledge-based minesweeper player.
///
/// Feeds every reveal into its [`KnowledgeBase`] and picks the next cell to
/// probe: a cell proven safe when one is available, a random guess otherwise.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Agent {
    pub(crate) knowledge: KnowledgeBase,
}

impl Agent {
    pub fn new(height: usize, width: usize) -> Self {
        Agent {
            knowledge: KnowledgeBase::new(height, width),
        }
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.knowledge
    }

    pub fn mines(&self) -> &BTreeSet<Cell> {
        self.knowledge.mines()
    }

    pub fn safes(&self) -> &BTreeSet<Cell> {
        self.knowledge.safes()
    }

    pub fn moves_made(&self) -> &BTreeSet<Cell> {
        self.knowledge.moves_made()
    }

    pub fn sentences(&self) -> &[Sentence] {
        self.knowledge.sentences()
    }

    /// Called once per reveal with the number of mines around `cell`.
    pub fn add_knowledge(&mut self, cell: Cell, count: u8) {
        self.knowledge.add_knowledge(cell, count);
    }

    /// The lowest known-safe cell that has not been played yet.
    pub fn make_safe_move(&self) -> Option<Cell> {
        self.safes().difference(self.moves_made()).next().copied()
    }

    /// A uniformly random cell that is neither played nor a known mine.
    pub fn make_random_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Cell> {
        let candidates: Vec<Cell> = all_cells(self.knowledge.height(), self.knowledge.width())
            .filter(|cell| !self.moves_made().contains(cell) && !self.mines().contains(cell))
            .collect();
        candidates.choose(rng).copied()
    }

    /// Prefers a safe move and falls back to a random one.
    pub fn choose_move<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Cell> {
        if let Some(cell) = self.make_safe_move() {
            debug!("playing safe move {cell}");
            return Some(cell);
        }
        let guess = self.make_random_move(rng);
        if let Some(cell) = guess {
            debug!("no safe move known, guessing {cell}");
        }
        guess
    }
}
