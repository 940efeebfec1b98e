use chess_notation::prelude::*;
use proptest::prelude::*;

const KINDS: [PieceKind; 6] = [
    PieceKind::Pawn,
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
];

fn square() -> impl Strategy<Value = Square> {
    (0i8..8, 0i8..8).prop_map(|(f, r)| Square::new(f, r).unwrap())
}

fn maybe_piece() -> impl Strategy<Value = Option<Piece>> {
    proptest::option::of((0usize..6, any::<bool>()).prop_map(|(k, white)| {
        let color = if white {
            PieceColor::White
        } else {
            PieceColor::Black
        };
        Piece::new(KINDS[k], color)
    }))
}

/// Logs from the parsers show up under `cargo test -- --nocapture` with
/// `RUST_LOG=chess_notation=trace`.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

proptest! {
    #[test]
    fn fen_decoder_never_panics(input in "\\PC{0,80}") {
        let _ = parse_fen(&input);
    }

    #[test]
    fn fen_invalid_rune_points_at_the_rune(input in "[1-8pnbrqkPNBRQK/]{0,20}[xyz@#][1-8/]{0,20}") {
        if let Err(FenError::InvalidRune { at, rune }) = parse_fen(&input) {
            prop_assert_eq!(input.chars().nth(at), Some(rune));
        }
    }

    #[test]
    fn pgn_parser_never_panics(input in "[\\[\\]\"a-hRNBQKOx0-9=+#.{}() \n-]{0,60}") {
        init_tracing();
        let _ = parse_pgn(&input);
    }

    #[test]
    fn syntax_errors_point_inside_the_input(input in "[a-hRNBQKOxz0-9=+#.{}()$!? -]{0,60}") {
        if let Err(PgnError::San(SanError::InvalidSyntax { at, .. })) = parse_pgn(&input) {
            prop_assert!(at < input.chars().count());
        }
    }

    #[test]
    fn set_never_touches_the_receiver(sq in square(), piece in maybe_piece()) {
        let start = Position::starting();
        let changed = start.set(sq, piece);
        prop_assert_eq!(start, Position::starting());
        prop_assert_eq!(changed.get(sq), piece);
        for other in Square::all().filter(|s| *s != sq) {
            prop_assert_eq!(changed.get(other), start.get(other));
        }
    }

    #[test]
    fn apply_never_touches_the_receiver(from in square(), to in square()) {
        let start = Position::starting();
        let _ = start.apply(Move::new(from, to));
        prop_assert_eq!(start, Position::starting());
    }
}

#[test]
fn moves_serialize_for_api_layers() {
    init_tracing();
    let parsed = parse_pgn("1. e4 e5 2. Nf3 Nc6").unwrap();
    let json = serde_json::to_value(&parsed.moves).unwrap();

    assert_eq!(json[0]["from"], "e2");
    assert_eq!(json[0]["to"], "e4");
    assert_eq!(json[0]["en_passant"], false);
    assert_eq!(json[0]["castle"], false);
    assert!(json[0]["promotion"].is_null());

    let back: Vec<Move> = serde_json::from_value(json).unwrap();
    assert_eq!(back, parsed.moves);
}

#[test]
fn promotion_serializes_with_kind_and_color() {
    let start = parse_fen("7k/P7/8/8/8/8/8/K7").unwrap();
    let moves = parse_san_moves(start, "1. a8=Q+").unwrap();
    let json = serde_json::to_value(moves[0]).unwrap();
    assert_eq!(json["promotion"]["kind"], "Queen");
    assert_eq!(json["promotion"]["color"], "White");
}

#[test]
fn off_board_square_is_rejected_on_deserialize() {
    assert!(serde_json::from_str::<Square>("\"i9\"").is_err());
    assert_eq!(serde_json::from_str::<Square>("\"c3\"").unwrap(), "c3".parse().unwrap());
}
