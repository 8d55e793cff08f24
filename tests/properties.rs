//! Invariants over random play.

use patience::{
    DrawMode, FOUNDATION_SIZE, Klondike, KlondikeOptions, Move, Rank, SeededSource, Suit,
};
use proptest::prelude::*;

fn assert_invariants(game: &Klondike) {
    game.verify_closure().unwrap();

    for suit in Suit::ALL {
        let foundation = game.foundation(suit).cards();
        assert!(foundation.len() <= FOUNDATION_SIZE);
        for (card, rank) in foundation.iter().zip(Rank::ALL) {
            assert_eq!(card.suit(), suit);
            assert_eq!(card.rank(), rank);
        }
    }

    for column in 0..7 {
        let pile = game.tableau(column).unwrap();
        if !pile.is_empty() {
            assert!(pile.face_up_count() > 0, "column {column} top is face-down");
        }
    }
    assert_eq!(game.stock().face_up_count(), 0);
    assert_eq!(game.talon().face_down_count(), 0);

    // from_layout re-validates every pile shape
    Klondike::from_layout(*game.options(), game.layout()).unwrap();
}

fn draw_mode() -> impl Strategy<Value = DrawMode> {
    prop_oneof![Just(DrawMode::One), Just(DrawMode::Three)]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn random_play_preserves_invariants(
        seed in any::<u64>(),
        draw in draw_mode(),
        choices in prop::collection::vec(any::<usize>(), 1..300),
    ) {
        let mut game = Klondike::new(KlondikeOptions::default().with_draw(draw));
        game.deal_from(&mut SeededSource::new(seed)).unwrap();
        assert_invariants(&game);

        for choice in choices {
            let moves = game.legal_moves();
            if moves.is_empty() {
                break;
            }
            let mv = moves[choice % moves.len()];
            game.apply(mv).unwrap();
            assert_invariants(&game);
        }
    }

    #[test]
    fn rejected_moves_leave_the_game_unchanged(
        seed in any::<u64>(),
        from in 0usize..9,
        to in 0usize..9,
        count in 0usize..14,
    ) {
        let mut game = Klondike::new(KlondikeOptions::default());
        game.deal_from(&mut SeededSource::new(seed)).unwrap();
        let before = game.clone();

        let legal = game.can_move_cards(from, to, count);
        let applied = game.apply(Move::TableauToTableau { from, to, count });
        prop_assert_eq!(legal, applied.is_ok());
        if !legal {
            prop_assert_eq!(&game, &before);
        }
    }
}
