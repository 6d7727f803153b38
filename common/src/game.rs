use log::info;
use rand::Rng;

use crate::agent::Agent;
use crate::board::Board;
use crate::cell::{Cell, all_cells};
use crate::config::GameConfig;
use crate::error::BoardError;

/// The visible state of a single cell on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Tile {
    Hidden,
    Revealed(u8), // The u8 is the number of adjacent mines.
}

/// Represents the current state of the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum GameState {
    Playing,
    Won,
    Lost,
}

/// One game in progress: the hidden board, what has been revealed so far,
/// and the agent learning from every reveal.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Game {
    pub config: GameConfig,
    board: Board,
    pub(crate) agent: Agent,
    /// `tiles[row][col]`, what a player sees.
    tiles: Vec<Vec<Tile>>,
    pub game_state: GameState,
}

impl Game {
    pub fn new<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self, BoardError> {
        Ok(Self::from_board(Board::random(config, rng)?))
    }

    /// Starts a game on a board whose mines are already placed.
    pub fn from_board(board: Board) -> Self {
        let config = GameConfig::new(board.height(), board.width(), board.mines().len());
        Game {
            config,
            agent: Agent::new(config.height, config.width),
            tiles: vec![vec![Tile::Hidden; config.width]; config.height],
            board,
            game_state: GameState::Playing,
        }
    }

    /// Deserializes a game state from bytes.
    pub fn deserialize(bts: &[u8]) -> anyhow::Result<Self> {
        Ok(bcs::from_bytes(bts)?)
    }

    /// Serializes the game state to bytes.
    pub fn serialize(&self) -> anyhow::Result<Vec<u8>> {
        Ok(bcs::to_bytes(self)?)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    pub fn tiles(&self) -> &[Vec<Tile>] {
        &self.tiles
    }

    pub fn tile(&self, cell: Cell) -> Option<Tile> {
        self.tiles.get(cell.row)?.get(cell.col).copied()
    }

    /// Whether the agent has flagged `cell` as a mine.
    pub fn is_flagged(&self, cell: Cell) -> bool {
        self.agent.mines().contains(&cell)
    }

    /// Reveals `at`, feeding the result to the agent.
    ///
    /// Returns `Ok(false)` when the cell held a mine, which loses the game.
    /// Revealing an already revealed cell does nothing.
    pub fn reveal_cell(&mut self, at: Cell) -> anyhow::Result<bool> {
        // --- 1. Pre-checks ---
        let is_mine = self.board.is_mine(at)?;
        if self.tile(at) != Some(Tile::Hidden) {
            return Ok(true);
        }
        if self.game_state != GameState::Playing {
            anyhow::bail!("game_ended");
        }

        // --- 2. Outcome of the reveal ---
        if is_mine {
            info!("revealed a mine at {at}");
            self.game_state = GameState::Lost;
            return Ok(false);
        }

        // --- 3. Reveal and Learn ---
        let count = self.board.nearby_mines(at)?;
        self.tiles[at.row][at.col] = Tile::Revealed(count);
        self.agent.add_knowledge(at, count);
        self.board.set_mines_found(self.agent.mines().iter().copied());

        // --- 4. Check for Win Condition ---
        if self.check_win_condition() {
            info!("all mines located");
            self.game_state = GameState::Won;
        }

        Ok(true)
    }

    /// The game is won once every mine is flagged or every mine-free cell is revealed.
    pub fn check_win_condition(&self) -> bool {
        self.board.won()
            || all_cells(self.config.height, self.config.width)
                .filter(|cell| !self.board.mines().contains(cell))
                .all(|cell| self.tile(cell) != Some(Tile::Hidden))
    }

    /// Lets the agent pick a cell and reveals it.
    ///
    /// Returns the cell played, or `None` if the agent had no move left.
    pub fn step<R: Rng + ?Sized>(&mut self, rng: &mut R) -> anyhow::Result<Option<Cell>> {
        if self.game_state != GameState::Playing {
            anyhow::bail!("game_ended");
        }
        let Some(cell) = self.agent.choose_move(rng) else {
            return Ok(None);
        };
        self.reveal_cell(cell)?;
        Ok(Some(cell))
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;
    use crate::oracle::assert_deductions_entailed;

    #[test]
    fn test_game_initialization() {
        // Test that a new game is properly initialized with correct dimensions and state
        let mut rng = StdRng::seed_from_u64(0);
        let game = Game::new(GameConfig::new(5, 4, 3), &mut rng).unwrap();
        assert_eq!(game.config, GameConfig::new(5, 4, 3));
        assert_eq!(game.game_state, GameState::Playing);
        assert_eq!(game.board().mines().len(), 3);

        // Verify all cells start as hidden
        assert_eq!(game.tiles().len(), 5);
        for row in game.tiles() {
            assert_eq!(row.len(), 4);
            assert!(row.iter().all(|tile| *tile == Tile::Hidden));
        }
    }

    #[test]
    fn test_game_initialization_too_many_mines() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = Game::new(GameConfig::new(3, 3, 9), &mut rng).unwrap_err();
        assert_eq!(err, BoardError::InvalidConfiguration { mines: 9, cells: 9 });
    }

    #[test]
    fn test_reveal_flags_forced_mine_and_wins() {
        // 1x2 board, mine at (0, 1)
        let board = Board::with_mines(1, 2, [Cell::new(0, 1)]).unwrap();
        let mut game = Game::from_board(board);

        assert!(game.reveal_cell(Cell::new(0, 0)).unwrap());
        assert_eq!(game.tile(Cell::new(0, 0)), Some(Tile::Revealed(1)));
        assert!(game.is_flagged(Cell::new(0, 1)));
        assert_eq!(game.game_state, GameState::Won);
    }

    #[test]
    fn test_step_after_win_is_rejected() {
        // 1x2 board, mine at (0, 1): one reveal flags the mine and wins
        let board = Board::with_mines(1, 2, [Cell::new(0, 1)]).unwrap();
        let mut game = Game::from_board(board);
        let mut rng = StdRng::seed_from_u64(4);

        game.reveal_cell(Cell::new(0, 0)).unwrap();
        assert_eq!(game.game_state, GameState::Won);

        // The agent has nothing left, and the finished game takes no more steps
        assert_eq!(game.agent().choose_move(&mut rng), None);
        assert!(game.step(&mut rng).is_err());
        assert_eq!(game.game_state, GameState::Won);
    }

    #[test]
    fn test_hitting_mine() {
        let board = Board::with_mines(2, 2, [Cell::new(1, 1)]).unwrap();
        let mut game = Game::from_board(board);

        assert!(!game.reveal_cell(Cell::new(1, 1)).unwrap());
        assert_eq!(game.game_state, GameState::Lost);

        // Nothing more can be revealed once the game is over
        assert!(game.reveal_cell(Cell::new(0, 0)).is_err());
        assert!(game.step(&mut StdRng::seed_from_u64(1)).is_err());
    }

    #[test]
    fn test_reveal_twice_is_noop() {
        let board = Board::with_mines(3, 3, [Cell::new(2, 2)]).unwrap();
        let mut game = Game::from_board(board);

        game.reveal_cell(Cell::new(1, 1)).unwrap();
        let sentences = game.agent().sentences().len();
        assert!(game.reveal_cell(Cell::new(1, 1)).unwrap());
        assert_eq!(game.agent().sentences().len(), sentences);
    }

    #[test]
    fn test_reveal_out_of_range() {
        let board = Board::with_mines(2, 2, [Cell::new(0, 0)]).unwrap();
        let mut game = Game::from_board(board);
        assert!(game.reveal_cell(Cell::new(0, 2)).is_err());
        assert_eq!(game.game_state, GameState::Playing);
    }

    #[test]
    fn test_zero_opening_solves_by_deduction() {
        // 3x3 board with a single mine at (2, 2)
        let board = Board::with_mines(3, 3, [Cell::new(2, 2)]).unwrap();
        let mut game = Game::from_board(board);
        let mut rng = StdRng::seed_from_u64(42);

        game.reveal_cell(Cell::new(0, 0)).unwrap();
        let safes = game.agent().safes();
        for cell in [Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)] {
            assert!(safes.contains(&cell));
        }

        while game.game_state == GameState::Playing {
            let cell = game.step(&mut rng).unwrap().unwrap();
            assert_ne!(cell, Cell::new(2, 2));
        }

        assert_eq!(game.game_state, GameState::Won);
        assert!(game.is_flagged(Cell::new(2, 2)));
        assert!(!game.agent().moves_made().contains(&Cell::new(2, 2)));
    }

    #[test]
    fn test_serialize_roundtrip_keeps_knowledge() {
        let board = Board::with_mines(3, 3, [Cell::new(2, 2)]).unwrap();
        let mut game = Game::from_board(board);
        game.reveal_cell(Cell::new(0, 0)).unwrap();

        let restored = Game::deserialize(&game.serialize().unwrap()).unwrap();
        assert_eq!(restored.agent(), game.agent());
        assert_eq!(restored.board(), game.board());
        assert_eq!(restored.tiles(), game.tiles());
        assert_eq!(restored.game_state, game.game_state);
    }

    #[test]
    fn test_deserialize_garbage_fails() {
        assert!(Game::deserialize(&[0xff, 0x01]).is_err());
    }

    #[test]
    fn test_autoplay_deductions_are_sound() {
        // Play full games and check every deduction against the hidden board
        // and against what the revealed numbers actually entail.
        for seed in 0..12 {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut game = Game::new(GameConfig::default(), &mut rng).unwrap();

            while game.game_state == GameState::Playing {
                let Some(cell) = game.step(&mut rng).unwrap() else {
                    break;
                };
                let agent = game.agent();

                assert!(agent.mines().is_disjoint(agent.safes()));
                assert!(agent.mines().is_subset(game.board().mines()));
                assert!(agent.safes().is_disjoint(game.board().mines()));
                if game.game_state != GameState::Lost {
                    assert!(agent.moves_made().contains(&cell));
                }
            }

            assert_ne!(game.game_state, GameState::Playing);
            assert_deductions_entailed(&game);
        }
    }
}
