//! Test-only SAT check that the agent never deduces more than the revealed
//! numbers entail.

use std::collections::HashMap;

use itertools::Itertools;
use varisat::{CnfFormula, ExtendFormula, Lit, Solver};

use crate::cell::{Cell, all_cells};
use crate::game::{Game, Tile};

/// Panics unless every cell the agent holds as a mine (or as safe) is forced
/// to be one by the numbers revealed so far.
pub fn assert_deductions_entailed(game: &Game) {
    let (height, width) = (game.config.height, game.config.width);
    let mut solver = Solver::new();
    let mut formula = CnfFormula::new();
    let mut vars: HashMap<Cell, Lit> = HashMap::new();

    for cell in all_cells(height, width) {
        vars.insert(cell, Lit::from_var(solver.new_var(), true));
    }

    for cell in all_cells(height, width) {
        let Some(Tile::Revealed(count)) = game.tile(cell) else {
            continue;
        };
        // A revealed cell is never a mine.
        formula.add_clause(&[!vars[&cell]]);

        let lits: Vec<Lit> = cell.neighbors(height, width).map(|n| vars[&n]).collect();
        encode_exactly_k(&mut formula, &lits, usize::from(count));
    }
    solver.add_formula(&formula);
    assert!(solver.solve().unwrap(), "revealed numbers are unsatisfiable");

    for cell in game.agent().mines() {
        solver.assume(&[!vars[cell]]);
        assert!(!solver.solve().unwrap(), "{cell} is not forced to be a mine");
    }
    for cell in game.agent().safes() {
        solver.assume(&[vars[cell]]);
        assert!(!solver.solve().unwrap(), "{cell} is not forced to be safe");
    }
}

/// Naive "exactly k" encoding; neighborhoods never exceed eight literals.
fn encode_exactly_k(formula: &mut CnfFormula, lits: &[Lit], k: usize) {
    if k > lits.len() {
        formula.add_clause(&[]);
        return;
    }
    // At most k: no k + 1 of them are all mines.
    for combo in lits.iter().copied().combinations(k + 1) {
        let clause: Vec<Lit> = combo.iter().map(|&lit| !lit).collect();
        formula.add_clause(&clause);
    }
    // At least k: no n - k + 1 of them are all safe.
    if k > 0 {
        for combo in lits.iter().copied().combinations(lits.len() - k + 1) {
            formula.add_clause(&combo);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;

    #[test]
    fn test_exactly_k_leaves_symmetric_cells_open() {
        // Exactly one mine between two cells forces neither of them
        let mut solver = Solver::new();
        let a = Lit::from_var(solver.new_var(), true);
        let b = Lit::from_var(solver.new_var(), true);
        let mut formula = CnfFormula::new();
        encode_exactly_k(&mut formula, &[a, b], 1);
        solver.add_formula(&formula);

        solver.assume(&[a]);
        assert!(solver.solve().unwrap());
        solver.assume(&[!a]);
        assert!(solver.solve().unwrap());
        solver.assume(&[a, b]);
        assert!(!solver.solve().unwrap());
    }

    #[test]
    #[should_panic(expected = "is not forced to be a mine")]
    fn test_oracle_rejects_unforced_mine() {
        // 1x3 board, mine at (0, 2). Revealing (0, 0) shows 0, which says
        // nothing about (0, 2).
        let board = Board::with_mines(1, 3, [Cell::new(0, 2)]).unwrap();
        let mut game = Game::from_board(board);
        game.reveal_cell(Cell::new(0, 0)).unwrap();
        assert_deductions_entailed(&game);

        game.agent.knowledge.mark_mine(Cell::new(0, 2));
        assert_deductions_entailed(&game);
    }
}
