use std::collections::{BTreeSet, HashSet};

use itertools::{Itertools, iproduct};
use log::{debug, trace, warn};

use crate::cell::Cell;
use crate::sentence::Sentence;

/// Everything the agent has learned during one game.
///
/// Holds the sentences gathered from each reveal together with the cells
/// already confirmed as mines or as safe, and the cells that were played.
/// A cell never appears in both `mines` and `safes`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct KnowledgeBase {
    height: usize,
    width: usize,
    moves_made: BTreeSet<Cell>,
    mines: BTreeSet<Cell>,
    safes: BTreeSet<Cell>,
    /// Sentences in the order they were learned. Resolved sentences shrink
    /// to `{} = 0` but are never removed.
    knowledge: Vec<Sentence>,
}

impl KnowledgeBase {
    pub fn new(height: usize, width: usize) -> Self {
        KnowledgeBase {
            height,
            width,
            moves_made: BTreeSet::new(),
            mines: BTreeSet::new(),
            safes: BTreeSet::new(),
            knowledge: Vec::new(),
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn moves_made(&self) -> &BTreeSet<Cell> {
        &self.moves_made
    }

    pub fn mines(&self) -> &BTreeSet<Cell> {
        &self.mines
    }

    pub fn safes(&self) -> &BTreeSet<Cell> {
        &self.safes
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.knowledge
    }

    /// Records `cell` as a mine and removes it from every sentence.
    pub fn mark_mine(&mut self, cell: Cell) {
        assert!(
            !self.safes.contains(&cell),
            "cell {cell} is already known to be safe"
        );
        if self.mines.insert(cell) {
            debug!("marked {cell} as a mine");
        }
        for sentence in &mut self.knowledge {
            sentence.mark_mine(cell);
        }
    }

    /// Records `cell` as safe and removes it from every sentence.
    pub fn mark_safe(&mut self, cell: Cell) {
        assert!(
            !self.mines.contains(&cell),
            "cell {cell} is already known to be a mine"
        );
        if self.safes.insert(cell) {
            debug!("marked {cell} as safe");
        }
        for sentence in &mut self.knowledge {
            sentence.mark_safe(cell);
        }
    }

    /// Incorporates a revealed cell together with the number of mines around it.
    ///
    /// This runs one propagation pass and one subset-elimination pass. Sentences
    /// derived here that would immediately resolve are only acted on by the next
    /// call, so a single reveal may not surface every possible deduction.
    pub fn add_knowledge(&mut self, cell: Cell, count: u8) {
        self.moves_made.insert(cell);
        self.mark_safe(cell);

        let mut known_mines = 0;
        let mut undetermined = Vec::new();
        for neighbor in cell.neighbors(self.height, self.width) {
            if self.mines.contains(&neighbor) {
                known_mines += 1;
            } else if !self.safes.contains(&neighbor) {
                undetermined.push(neighbor);
            }
        }

        match usize::from(count).checked_sub(known_mines) {
            Some(remaining) if remaining <= undetermined.len() => {
                let sentence = Sentence::new(undetermined, remaining);
                trace!("learned {sentence} from {cell}");
                self.knowledge.push(sentence);
            }
            _ => warn!(
                "count {count} at {cell} contradicts {known_mines} known mines among {} open neighbors",
                undetermined.len()
            ),
        }

        self.propagate();
        self.infer_new_sentences();
    }

    /// Marks the cells of every sentence that is now fully determined.
    ///
    /// Marking updates all sentences in place, including ones already visited
    /// during this pass.
    fn propagate(&mut self) {
        for i in 0..self.knowledge.len() {
            if let Some(mines) = self.knowledge[i].known_mines().cloned() {
                for cell in mines {
                    self.mark_mine(cell);
                }
            }
            if let Some(safes) = self.knowledge[i].known_safes().cloned() {
                for cell in safes {
                    self.mark_safe(cell);
                }
            }
        }
    }

    /// Derives `B - A` for every pair of distinct sentences where `A` is a
    /// subset of `B`, keeping only sentences not already known.
    ///
    /// Returns the number of sentences added.
    pub fn infer_new_sentences(&mut self) -> usize {
        let present: HashSet<&Sentence> = self.knowledge.iter().collect();

        let derived: Vec<Sentence> = iproduct!(self.knowledge.iter(), self.knowledge.iter())
            .filter(|(subset, superset)| {
                subset != superset && subset.cells().is_subset(superset.cells())
            })
            .filter_map(|(subset, superset)| {
                let sentence = subset.subtract_from(superset);
                if sentence.is_none() {
                    warn!("{subset} is inconsistent with {superset}");
                }
                sentence
            })
            .filter(|sentence| !present.contains(sentence))
            .unique()
            .collect();

        for sentence in &derived {
            debug!("inferred {sentence}");
        }
        let added = derived.len();
        self.knowledge.extend(derived);
        added
    }
}
