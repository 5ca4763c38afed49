mod common;

use std::collections::HashMap;

use golf_caddie::model::{Club, OwnerId, parse_new_course, parse_yardage_form};
use golf_caddie::storage::Storage;

fn form(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
        .collect()
}

#[test]
fn test5_yardage_form_sets_and_clears() {
    let changes = parse_yardage_form(&form(&[
        ("driver", "250"),
        ("7_iron", " 150 "),
        ("sand_wedge", ""),
    ]))
    .unwrap();
    assert_eq!(changes.len(), Club::ALL.len());
    let driver = changes.iter().find(|c| c.club == Club::Driver).unwrap();
    assert_eq!(driver.yards, Some(250));
    let seven = changes.iter().find(|c| c.club == Club::SevenIron).unwrap();
    assert_eq!(seven.yards, Some(150));
    let sand = changes.iter().find(|c| c.club == Club::SandWedge).unwrap();
    assert_eq!(sand.yards, None);
}

#[test]
fn test5_yardage_form_rejects_whole_submission() {
    let errors = parse_yardage_form(&form(&[
        ("driver", "250"),
        ("3_wood", "lots"),
        ("putter", "500"),
        ("lob_wedge", "0"),
    ]))
    .unwrap_err();
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["3_wood", "lob_wedge", "putter"]);
    assert!(errors[0].message.contains("3 Wood"));
    assert!(errors[2].message.contains("between 1 and 499"));
}

#[tokio::test]
async fn test5_upsert_and_delete() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = common::setup_test_context("").await?;
    assert!(ctx.storage.club_yardages(&ctx.owner).await?.is_empty());

    let first = parse_yardage_form(&form(&[
        ("putter", "5"),
        ("driver", "240"),
        ("pitching_wedge", "110"),
    ]))
    .unwrap();
    ctx.storage.save_club_yardages(&ctx.owner, &first).await?;

    let saved = ctx.storage.club_yardages(&ctx.owner).await?;
    let order: Vec<Club> = saved.iter().map(|(c, _)| c).collect();
    assert_eq!(order, vec![Club::Driver, Club::PitchingWedge, Club::Putter]);

    // driver updated, wedge left blank so cleared
    let second = parse_yardage_form(&form(&[("driver", "255"), ("putter", "5")])).unwrap();
    ctx.storage.save_club_yardages(&ctx.owner, &second).await?;
    let saved = ctx.storage.club_yardages(&ctx.owner).await?;
    assert_eq!(saved.len(), 2);
    assert_eq!(saved.get(Club::Driver), Some(255));
    assert_eq!(saved.get(Club::PitchingWedge), None);

    // scoped per owner
    let other = OwnerId::mint();
    assert!(ctx.storage.club_yardages(&other).await?.is_empty());
    Ok(())
}

#[test]
fn test5_course_form_defaults_and_errors() {
    let course = parse_new_course(&form(&[
        ("name", "  Riverside  "),
        ("pars", "4,4,3,5,4,4,3,5,4,4,3,5,4,4,3,5,4,4"),
        ("rating", ""),
        ("slope", ""),
    ]))
    .unwrap();
    assert_eq!(course.name, "Riverside");
    assert!((course.rating - 72.0).abs() < f64::EPSILON);
    assert_eq!(course.slope, 113);

    let errors = parse_new_course(&form(&[
        ("name", ""),
        ("pars", "4,4,3"),
        ("rating", "120"),
        ("slope", "40"),
    ]))
    .unwrap_err();
    let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
    assert_eq!(fields, vec!["name", "pars", "rating", "slope"]);
}
