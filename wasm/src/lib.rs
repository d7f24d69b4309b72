use minefill as mf;
use rand::SeedableRng;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn parse_board(text: String) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let board = mf::Board::parse(&text).map_err(|e| e.to_string())?;
    board.serialize().map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn solve_board(bts: Vec<u8>, seed: u64) -> Result<Vec<u8>, String> {
    console_error_panic_hook::set_once();

    let board = mf::Board::deserialize(&bts).map_err(|e| e.to_string())?;
    let mut graph = mf::Graph::from_board(&board);
    let options = mf::SolveOptions::for_graph(&graph);
    let mut rng = rand::rngs::SmallRng::seed_from_u64(seed);
    mf::solve(&mut graph, options, &mut rng).map_err(|e| e.to_string())?;
    graph.to_board().serialize().map_err(|e| e.to_string())
}

#[wasm_bindgen]
pub fn board_score(bts: Vec<u8>) -> Result<u32, String> {
    console_error_panic_hook::set_once();

    let board = mf::Board::deserialize(&bts).map_err(|e| e.to_string())?;
    Ok(mf::Graph::from_board(&board).error_score())
}

#[wasm_bindgen]
pub fn render_board(bts: Vec<u8>) -> Result<String, String> {
    console_error_panic_hook::set_once();

    let board = mf::Board::deserialize(&bts).map_err(|e| e.to_string())?;
    Ok(board.to_string())
}
