use golf_caddie::model::HoleScores;
use golf_caddie::score::{
    HandicapRound, MAX_HANDICAP_ROUNDS, differential, differentials_to_use, handicap_index,
};

/// 18 holes adding up to `total`.
fn card(total: i32) -> HoleScores {
    let mut slots = [Some(total / 18); 18];
    for slot in slots.iter_mut().take((total % 18) as usize) {
        *slot = slot.map(|s| s + 1);
    }
    HoleScores::from_slots(slots)
}

fn rounds<'a>(cards: &'a [HoleScores], rating: f64, slope: i32) -> Vec<HandicapRound<'a>> {
    cards
        .iter()
        .map(|scores| HandicapRound {
            scores,
            rating,
            slope,
        })
        .collect()
}

#[test]
fn test2_card_helper_adds_up() {
    let total: i32 = card(97).filled().map(|(_, s)| s).sum();
    assert_eq!(total, 97);
}

#[test]
fn test2_ladder() {
    assert_eq!(differentials_to_use(1), 1);
    assert_eq!(differentials_to_use(2), 1);
    assert_eq!(differentials_to_use(3), 2);
    assert_eq!(differentials_to_use(4), 2);
    assert_eq!(differentials_to_use(5), 2);
    assert_eq!(differentials_to_use(6), 3);
    assert_eq!(differentials_to_use(7), 3);
    assert_eq!(differentials_to_use(8), 8);
    assert_eq!(differentials_to_use(9), 8);
    assert_eq!(differentials_to_use(20), 8);
}

#[test]
fn test2_single_round_differential() {
    assert!((differential(90, 72.0, 113) - 18.0).abs() < 1e-9);
    let cards = [card(90)];
    let index = handicap_index(&rounds(&cards, 72.0, 113)).unwrap();
    assert!((index.index - 18.0).abs() < 1e-9);
    assert_eq!(index.differentials_used, 1);
    assert_eq!(index.eligible_rounds, 1);
}

#[test]
fn test2_best_two_of_four() {
    let cards = [card(95), card(80), card(90), card(85)];
    let index = handicap_index(&rounds(&cards, 72.0, 113)).unwrap();
    // differentials 8, 13, 18, 23 -> mean of 8 and 13
    assert!((index.index - 10.5).abs() < 1e-9);
    assert_eq!(index.differentials_used, 2);
    assert_eq!(index.eligible_rounds, 4);
}

#[test]
fn test2_slope_scales_and_rounds_to_tenth() {
    let cards = [card(90)];
    // 20 * 113 / 130 = 17.38...
    let index = handicap_index(&rounds(&cards, 70.0, 130)).unwrap();
    assert!((index.index - 17.4).abs() < 1e-9);
}

#[test]
fn test2_under_rating_goes_negative() {
    let cards = [card(70)];
    let index = handicap_index(&rounds(&cards, 72.0, 113)).unwrap();
    assert!((index.index + 2.0).abs() < 1e-9);
}

#[test]
fn test2_ineligible_rounds_are_skipped() {
    let mut partial = card(80);
    partial.set(golf_caddie::model::HoleNumber::new(18).unwrap(), None);
    let cards = [partial, card(90)];
    let index = handicap_index(&rounds(&cards, 72.0, 113)).unwrap();
    assert_eq!(index.eligible_rounds, 1);
    assert!((index.index - 18.0).abs() < 1e-9);

    let flat = [card(90)];
    assert!(handicap_index(&rounds(&flat, 72.0, 0)).is_none());
    assert!(handicap_index(&[]).is_none());
}

#[test]
fn test2_only_the_most_recent_twenty_count() {
    let mut cards = vec![card(100); MAX_HANDICAP_ROUNDS];
    // older rounds, past the cap
    cards.extend(vec![card(72); 5]);
    let index = handicap_index(&rounds(&cards, 72.0, 113)).unwrap();
    assert_eq!(index.eligible_rounds, MAX_HANDICAP_ROUNDS);
    assert_eq!(index.differentials_used, 8);
    assert!((index.index - 28.0).abs() < 1e-9);
}
