use chess_rules::{utils::perft, Board, Color, Difficulty, Game};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rand::{rngs::StdRng, SeedableRng};

fn all_legal_moves(board: &mut Board) -> usize {
    board.legal_moves_for(Color::White).len() + board.legal_moves_for(Color::Black).len()
}

fn attacked_pieces(board: &Board) -> usize {
    board
        .pieces(Color::White)
        .filter(|(square, _)| board.is_square_attacked(*square, Color::Black))
        .count()
}

fn random_game(max_plies: usize) -> Game {
    let mut rng = StdRng::seed_from_u64(7);
    let mut game = Game::new();
    for _ in 0..max_plies {
        if game.ai_move(Difficulty::Easy, &mut rng).is_err() || game.status().is_finished() {
            break;
        }
    }
    game
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let mut board = Board::standard();
    c.bench_function("legal moves from start", |b| {
        b.iter(|| all_legal_moves(black_box(&mut board)))
    });
    let middle_game = random_game(30);
    c.bench_function("attacked pieces in middle game", |b| {
        b.iter(|| attacked_pieces(black_box(middle_game.board())))
    });
    let game = Game::new();
    c.bench_function("perft 2", |b| b.iter(|| perft(black_box(&game), 2)));
    c.bench_function("random game 40 plies", |b| {
        b.iter(|| random_game(black_box(40)))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
