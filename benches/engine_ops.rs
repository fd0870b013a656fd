use criterion::{black_box, criterion_group, criterion_main, Criterion};
use blockfall::core::{shape, Board, GameSession};
use blockfall::types::{Direction, PieceKind};

fn bench_collides(c: &mut Criterion) {
    let mut board = Board::new();
    for y in 12..20 {
        for x in 0..9 {
            board.fill(x, y);
        }
    }
    let t = shape(PieceKind::T);

    c.bench_function("collides_t_all_columns", |b| {
        b.iter(|| {
            let mut hits = 0u32;
            for x in -1..9i8 {
                for y in 0..19i8 {
                    hits += board.collides(black_box(t.rotation(1)), t.width, x, y) as u32;
                }
            }
            hits
        })
    });
}

fn bench_move_and_rotate(c: &mut Criterion) {
    let mut session = GameSession::with_seed(12345);
    session.start();

    c.bench_function("move_piece", |b| {
        b.iter(|| {
            session.move_piece(black_box(Direction::Left));
            session.move_piece(black_box(Direction::Right));
        })
    });

    c.bench_function("rotate", |b| {
        b.iter(|| {
            session.rotate();
        })
    });
}

fn bench_drop_lock(c: &mut Criterion) {
    let mut session = GameSession::with_seed(12345);
    session.start();

    c.bench_function("drop_and_lock", |b| {
        b.iter(|| {
            session.drop_piece();
            if session.game_over() {
                session.restart();
            }
            session.drain_transitions().count()
        })
    });
}

fn bench_clear_4_rows(c: &mut Criterion) {
    c.bench_function("clear_4_rows", |b| {
        b.iter(|| {
            let mut board = Board::new();
            for y in 16..20 {
                for x in 0..10 {
                    board.fill(x, y);
                }
            }
            let full = board.full_rows();
            board.remove_rows(black_box(&full));
            board
        })
    });
}

fn bench_tick(c: &mut Criterion) {
    let mut session = GameSession::with_seed(12345);
    session.start();

    c.bench_function("tick_16ms", |b| {
        b.iter(|| {
            session.tick(black_box(16));
            if session.game_over() {
                session.restart();
            }
            session.drain_transitions().count()
        })
    });
}

criterion_group!(
    benches,
    bench_collides,
    bench_move_and_rotate,
    bench_drop_lock,
    bench_clear_4_rows,
    bench_tick
);
criterion_main!(benches);
