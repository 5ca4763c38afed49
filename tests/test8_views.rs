mod common;

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use scraper::{Html, Selector};

use golf_caddie::caddie::Advice;
use golf_caddie::model::{
    Achievement, Club, ClubYardages, Course, EarnedAchievement, FieldError, HoleNumber,
    HoleScores, OwnerId, Round, RoundWithCourse,
};
use golf_caddie::score::handicap_for_rounds;
use golf_caddie::view::Notice;
use golf_caddie::view::achievements::render_achievements;
use golf_caddie::view::advice::{AdviceForm, render_shot_advice};
use golf_caddie::view::rounds::{render_round_card, render_round_list, render_round_page};
use golf_caddie::view::yardages::{render_input_yardages, render_view_yardages};

fn sel(s: &str) -> Selector {
    Selector::parse(s).unwrap()
}

fn entry(scores: HoleScores, is_complete: bool) -> RoundWithCourse {
    RoundWithCourse {
        round: Round {
            round_id: 11,
            course_id: 3,
            owner_id: OwnerId::mint(),
            date_played: Utc.with_ymd_and_hms(2026, 6, 14, 9, 0, 0).unwrap(),
            hole_scores: scores,
            is_complete,
        },
        course: Course {
            course_id: 3,
            name: "Cedar <Ridge>".to_string(),
            pars: common::par_72(),
            rating: 72.0,
            slope: 113,
        },
    }
}

#[test]
fn test8_round_page_in_progress() {
    let mut scores = HoleScores::default();
    scores.set(HoleNumber::new(1).unwrap(), Some(3));
    scores.set(HoleNumber::new(2).unwrap(), Some(6));
    let page = render_round_page(&[], &entry(scores, false)).into_string();
    let doc = Html::parse_document(&page);

    let title = doc.select(&sel("h1")).next().unwrap().text().collect::<String>();
    assert_eq!(title, "Cedar <Ridge> - 2026-06-14");

    let rows: Vec<_> = doc.select(&sel("table.round-holes tbody tr")).collect();
    // 18 holes plus OUT, IN and TOTAL
    assert_eq!(rows.len(), 21);
    assert_eq!(rows[0].value().attr("class"), Some("birdie"));
    assert_eq!(rows[1].value().attr("class"), Some("double-bogey"));
    assert_eq!(rows[2].value().attr("class"), Some("hole"));

    let forms: Vec<_> = doc.select(&sel("form.hole-form")).collect();
    assert_eq!(forms.len(), 18);
    assert_eq!(
        forms[2].value().attr("hx-post"),
        Some("/rounds/11/holes/3")
    );
    // next unplayed hole gets focus
    let focused: Vec<_> = doc.select(&sel("input[autofocus]")).collect();
    assert_eq!(focused.len(), 1);

    let to_par = doc.select(&sel("dd.to-par")).next().unwrap().text().collect::<String>();
    assert_eq!(to_par, "+1");
    assert!(doc.select(&sel(".scorecard img")).next().is_none());
}

#[test]
fn test8_completed_round_links_scorecard() {
    let scores = HoleScores::from_slots(common::bogey_round(0).map(Some));
    let card = render_round_card(&entry(scores, true), &[Notice::success("Round complete!")])
        .into_string();
    let doc = Html::parse_fragment(&card);

    assert!(doc.select(&sel("form.hole-form")).next().is_none());
    let img = doc.select(&sel(".scorecard img")).next().unwrap();
    assert_eq!(img.value().attr("src"), Some("/rounds/11/scorecard.png"));
    let notice = doc.select(&sel("p.notice-success")).next().unwrap();
    assert_eq!(notice.text().collect::<String>(), "Round complete!");
    let total: Vec<String> = doc
        .select(&sel("tr.total td"))
        .map(|td| td.text().collect())
        .collect();
    assert_eq!(total, vec!["72", "72"]);
}

#[test]
fn test8_round_list_shows_handicap() {
    let done = entry(HoleScores::from_slots(common::bogey_round(18).map(Some)), true);
    let rounds = vec![done];
    let handicap = handicap_for_rounds(&rounds);
    let page = render_round_list(&[], &rounds, handicap.as_ref(), &[]).into_string();
    let doc = Html::parse_document(&page);

    let value = doc
        .select(&sel(".handicap-value"))
        .next()
        .unwrap()
        .text()
        .collect::<String>();
    assert_eq!(value, "18.0");
    assert_eq!(doc.select(&sel("table.rounds tbody tr")).count(), 1);
    // no courses, so no start form
    assert!(doc.select(&sel("form.start-round")).next().is_none());

    let empty = render_round_list(&[], &[], None, &[]).into_string();
    assert!(empty.contains("N/A"));
}

#[test]
fn test8_shot_advice_form_echoes_input_and_errors() {
    let form = AdviceForm {
        context: "Behind a <tree>".to_string(),
        distance_to_hole: "abc".to_string(),
    };
    let errors = [FieldError::new(
        "distance_to_hole",
        "Invalid 'Distance to Hole' input. Please enter a number.",
    )];
    let page = render_shot_advice(&[], &form, &errors, None, false).into_string();
    let doc = Html::parse_document(&page);

    let textarea = doc.select(&sel("textarea#context")).next().unwrap();
    assert_eq!(textarea.text().collect::<String>(), "Behind a <tree>");
    let distance = doc.select(&sel("input#distance_to_hole")).next().unwrap();
    assert_eq!(distance.value().attr("value"), Some("abc"));
    assert_eq!(doc.select(&sel("p.field-error")).count(), 1);
    assert!(doc.select(&sel("a[href='/input_yardages']")).next().is_some());
    assert!(doc.select(&sel("section.advice")).next().is_none());
    let form = doc.select(&sel("form")).next().unwrap();
    assert_eq!(form.value().attr("enctype"), Some("multipart/form-data"));
}

#[test]
fn test8_advice_html_is_embedded() {
    let advice = Advice {
        html: "<p>Take <strong>one more club</strong>.</p>".to_string(),
        is_error: false,
    };
    let page =
        render_shot_advice(&[], &AdviceForm::default(), &[], Some(&advice), true).into_string();
    let doc = Html::parse_document(&page);
    let strong = doc.select(&sel("section.advice strong")).next().unwrap();
    assert_eq!(strong.text().collect::<String>(), "one more club");
    assert!(doc.select(&sel("a[href='/input_yardages']")).next().is_none());
}

#[test]
fn test8_yardage_pages() {
    let mut yardages = ClubYardages::new();
    yardages.insert(Club::PitchingWedge, 115);
    yardages.insert(Club::Driver, 245);

    let page = render_view_yardages(&[], &yardages).into_string();
    let doc = Html::parse_document(&page);
    let clubs: Vec<String> = doc
        .select(&sel("table.yardages tbody tr td:first-child"))
        .map(|td| td.text().collect())
        .collect();
    assert_eq!(clubs, vec!["Driver", "Pitching Wedge"]);

    let mut values = HashMap::new();
    values.insert("lob_wedge".to_string(), "600".to_string());
    let errors = [FieldError::new("lob_wedge", "too far")];
    let page = render_input_yardages(&[], &values, &errors).into_string();
    let doc = Html::parse_document(&page);
    assert_eq!(doc.select(&sel("form.yardage-form input")).count(), Club::ALL.len());
    let lob = doc.select(&sel("input#lob_wedge")).next().unwrap();
    assert_eq!(lob.value().attr("value"), Some("600"));
    assert_eq!(doc.select(&sel("span.field-error")).count(), 1);
}

#[test]
fn test8_achievements_mark_earned() {
    let first = Achievement {
        achievement_id: 1,
        name: "First Round".to_string(),
        description: "Complete your first 18-hole round.".to_string(),
        icon: "⛳".to_string(),
    };
    let eagle = Achievement {
        achievement_id: 2,
        name: "First Eagle".to_string(),
        description: "Score two or more under par on a hole.".to_string(),
        icon: "🦅".to_string(),
    };
    let earned = [EarnedAchievement {
        achievement: first.clone(),
        awarded_at: Utc.with_ymd_and_hms(2026, 7, 4, 18, 0, 0).unwrap(),
    }];
    let page = render_achievements(&[], &[first, eagle], &earned).into_string();
    let doc = Html::parse_document(&page);

    assert_eq!(doc.select(&sel("li.badge.earned")).count(), 1);
    assert_eq!(doc.select(&sel("li.badge.locked")).count(), 1);
    let awarded = doc.select(&sel("p.awarded")).next().unwrap();
    assert_eq!(awarded.text().collect::<String>(), "Earned 2026-07-04");
}
