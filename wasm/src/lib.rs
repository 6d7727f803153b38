use minesweeper_ai as ms;
use wasm_bindgen::prelude::*;

fn load(bts: &[u8]) -> Result<ms::Game, String> {
    ms::Game::deserialize(bts).map_err(|e| e.to_string())
}

fn store(game: &ms::Game) -> Result<Vec<u8>, String> {
    game.serialize().map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn create_game(height: u8, width: u8, mines: u8) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let config = ms::GameConfig::new(height as usize, width as usize, mines as usize);
    let game = ms::Game::new(config, &mut rand::rng()).map_err(|e| e.to_string())?;
    store(&game)
}

/// 0 = playing, 1 = won, 2 = lost.
#[wasm_bindgen]
pub fn game_status(bts: Vec<u8>) -> Result<u8, String> {
    console_error_panic_hook::set_once();

    let game = load(&bts)?;
    Ok(match game.game_state {
        ms::GameState::Playing => 0,
        ms::GameState::Won => 1,
        ms::GameState::Lost => 2,
    })
}

#[wasm_bindgen]
pub fn choose_cell(bts: Vec<u8>, row: usize, col: usize) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let mut game = load(&bts)?;
    let res = game
        .reveal_cell(ms::Cell::new(row, col))
        .map_err(|e| e.to_string())?;
    let mut xs = store(&game)?;
    xs.push(if res { 0 } else { 1 });
    Ok(xs)
}

/// Lets the agent play one move. The last byte is 0 if a move was made,
/// 1 if the agent had nothing left to play.
#[wasm_bindgen]
pub fn ai_step(bts: Vec<u8>) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let mut game = load(&bts)?;
    let played = game.step(&mut rand::rng()).map_err(|e| e.to_string())?;
    let mut xs = store(&game)?;
    xs.push(if played.is_some() { 0 } else { 1 });
    Ok(xs)
}

/// Row-major tiles: -1 hidden, -2 flagged by the agent, otherwise the mine count.
#[wasm_bindgen]
pub fn get_tiles(bts: Vec<u8>) -> Result<Vec<i8>, String> {
    console_error_panic_hook::set_once();

    let game = load(&bts)?;
    Ok(game
        .tiles()
        .iter()
        .enumerate()
        .flat_map(|(row, tiles)| {
            let game = &game;
            tiles.iter().enumerate().map(move |(col, tile)| match tile {
                ms::Tile::Hidden if game.is_flagged(ms::Cell::new(row, col)) => -2,
                ms::Tile::Hidden => -1,
                ms::Tile::Revealed(n) => *n as i8,
            })
        })
        .collect())
}
