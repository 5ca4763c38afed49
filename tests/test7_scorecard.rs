mod common;

use chrono::{TimeZone, Utc};
use golf_caddie::error::RenderError;
use golf_caddie::model::{Course, HoleNumber, HoleScores, OwnerId, Round};
use golf_caddie::view::scorecard::{CARD_HEIGHT, CARD_WIDTH, render_scorecard_png};

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

fn course() -> Course {
    Course {
        course_id: 1,
        name: "Torrey Pines (South) with a name long enough to need trimming".to_string(),
        pars: common::par_72(),
        rating: 74.6,
        slope: 136,
    }
}

fn round(scores: [i32; 18], is_complete: bool) -> Round {
    Round {
        round_id: 7,
        course_id: 1,
        owner_id: OwnerId::mint(),
        date_played: Utc.with_ymd_and_hms(2026, 5, 1, 14, 30, 0).unwrap(),
        hole_scores: HoleScores::from_slots(scores.map(Some)),
        is_complete,
    }
}

fn birdie_first() -> [i32; 18] {
    let mut offsets = [0; 18];
    offsets[0] = -1;
    offsets[17] = 2;
    common::scores_from_offsets(&common::par_72(), offsets)
}

#[test]
fn test7_png_of_fixed_size() {
    let png = render_scorecard_png(&round(birdie_first(), true), &course()).unwrap();
    assert_eq!(&png[..8], &PNG_SIGNATURE);

    let img = image::load_from_memory(&png).unwrap().to_rgb8();
    assert_eq!(img.width(), CARD_WIDTH);
    assert_eq!(img.height(), CARD_HEIGHT);
}

#[test]
fn test7_deterministic() {
    let course = course();
    let a = render_scorecard_png(&round(birdie_first(), true), &course).unwrap();
    let b = render_scorecard_png(&round(birdie_first(), true), &course).unwrap();
    assert_eq!(a, b);

    let other = render_scorecard_png(&round(common::bogey_round(4), true), &course).unwrap();
    assert_ne!(a, other);
}

#[test]
fn test7_score_cells_coloured_by_result() {
    let png = render_scorecard_png(&round(birdie_first(), true), &course()).unwrap();
    let img = image::load_from_memory(&png).unwrap().to_rgb8();

    // score column starts at x=360; hole 1 row at y=180, hole 2 at y=220
    let birdie = img.get_pixel(365, 185);
    let par = img.get_pixel(365, 225);
    assert_ne!(birdie, par);
    assert_eq!(par.0, [255, 255, 255]);
    assert!(birdie.0[0] > birdie.0[2], "birdie cell should be red: {birdie:?}");
}

#[test]
fn test7_incomplete_round_is_rejected() {
    let mut r = round(birdie_first(), false);
    assert!(matches!(
        render_scorecard_png(&r, &course()),
        Err(RenderError::Incomplete(7))
    ));

    r.is_complete = true;
    r.hole_scores.set(HoleNumber::new(10).unwrap(), None);
    assert!(matches!(
        render_scorecard_png(&r, &course()),
        Err(RenderError::Incomplete(7))
    ));
}
