mod common;

use common::StubCaddie;
use golf_caddie::caddie::{
    AdviceKind, CADDIE_PERSONA, Evidence, ImageData, NO_IMAGE_NOTICE, NO_YARDAGES_NOTICE,
    SHOT_ADVICE_MAX_TOKENS, SWING_ANALYSIS_MAX_TOKENS, SWING_INSTRUCTOR_PERSONA,
    compose_shot_advice, compose_swing_analysis, consult, parse_data_url, parse_target_distance,
    render_markdown,
};
use golf_caddie::error::CompletionError;
use golf_caddie::model::{Club, ClubYardages};

fn png() -> ImageData {
    ImageData::new("image/png", vec![0x89, b'P', b'N', b'G']).unwrap()
}

#[test]
fn test6_evidence_variants() {
    assert_eq!(Evidence::from_parts(None, None), Evidence::None);
    assert_eq!(
        Evidence::from_parts(Some("   ".to_string()), None),
        Evidence::None
    );
    assert!(matches!(
        Evidence::from_parts(Some("rough".to_string()), None),
        Evidence::Text(ref t) if t == "rough"
    ));
    assert!(matches!(
        Evidence::from_parts(None, Some(png())),
        Evidence::Image(_)
    ));
    let both = Evidence::from_parts(Some(" rough ".to_string()), Some(png()));
    assert_eq!(both.text(), Some("rough"));
    assert!(both.image().is_some());
}

#[test]
fn test6_shot_advice_sections_in_order() {
    let mut yardages = ClubYardages::new();
    yardages.insert(Club::SevenIron, 150);
    yardages.insert(Club::Driver, 250);
    let evidence = Evidence::from_parts(Some("Ball in the left rough".to_string()), None);

    let request = compose_shot_advice(&evidence, &yardages, Some(152));
    assert_eq!(request.system, CADDIE_PERSONA);
    assert_eq!(request.max_tokens, SHOT_ADVICE_MAX_TOKENS);
    assert!(request.image.is_none());

    let text = &request.user_text;
    let yards = text.find("Your Club Yardages:").unwrap();
    let driver = text.find("- Driver: 250 yards").unwrap();
    let seven = text.find("- 7 Iron: 150 yards").unwrap();
    let context = text.find("Ball in the left rough").unwrap();
    let distance = text.find("Distance to target: 152 yards.").unwrap();
    let no_image = text.find(NO_IMAGE_NOTICE).unwrap();
    assert!(yards < driver && driver < seven);
    assert!(seven < context && context < distance && distance < no_image);
}

#[test]
fn test6_shot_advice_without_yardages_or_distance() {
    let evidence = Evidence::from_parts(None, Some(png()));
    let request = compose_shot_advice(&evidence, &ClubYardages::new(), None);
    assert!(request.user_text.starts_with(NO_YARDAGES_NOTICE));
    assert!(!request.user_text.contains("Distance to target"));
    assert!(!request.user_text.contains(NO_IMAGE_NOTICE));
    assert_eq!(request.image, Some(png()));
}

#[test]
fn test6_swing_analysis_uses_instructor() {
    let evidence = Evidence::from_parts(Some("slicing my driver".to_string()), None);
    let request = compose_swing_analysis(&evidence);
    assert_eq!(request.system, SWING_INSTRUCTOR_PERSONA);
    assert_eq!(request.max_tokens, SWING_ANALYSIS_MAX_TOKENS);
    assert!(request.user_text.contains("slicing my driver"));
    assert!(request.user_text.contains(NO_IMAGE_NOTICE));
}

#[test]
fn test6_target_distance() {
    assert_eq!(parse_target_distance("").unwrap(), None);
    assert_eq!(parse_target_distance(" 145 ").unwrap(), Some(145));
    assert_eq!(parse_target_distance("1").unwrap(), Some(1));
    assert_eq!(parse_target_distance("999").unwrap(), Some(999));
    for bad in ["0", "1000", "-5", "12.5", "far"] {
        let err = parse_target_distance(bad).unwrap_err();
        assert_eq!(err.field, "distance_to_hole", "{bad}");
    }
}

#[test]
fn test6_camera_data_url() {
    let image = parse_data_url("data:image/jpeg;base64,AQID").unwrap();
    assert_eq!(image.mime, "image/jpeg");
    assert_eq!(image.bytes, vec![1, 2, 3]);
    assert_eq!(image.to_data_url(), "data:image/jpeg;base64,AQID");

    assert!(parse_data_url("data:text/plain;base64,AQID").is_none());
    assert!(parse_data_url("data:image/png;base64,!!!").is_none());
    assert!(parse_data_url("").is_none());
    assert!(ImageData::new("application/pdf", vec![1]).is_none());
    assert!(ImageData::new("image/png", vec![]).is_none());
}

#[test]
fn test6_markdown_escapes_raw_html() {
    let html = render_markdown("**Club:** 7 iron\n\n<script>alert('x')</script>\n\n- aim left");
    assert!(html.contains("<strong>Club:</strong>"));
    assert!(html.contains("<li>aim left</li>"));
    assert!(!html.contains("<script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[tokio::test]
async fn test6_consult_renders_markdown() {
    let caddie = StubCaddie::answering("Hit a **smooth 8 iron**.");
    let request = compose_shot_advice(&Evidence::None, &ClubYardages::new(), None);
    let advice = consult(&caddie, AdviceKind::ShotAdvice, &request).await;
    assert!(!advice.is_error);
    assert!(advice.html.contains("<strong>smooth 8 iron</strong>"));
    assert_eq!(caddie.calls(), 1);
    assert_eq!(caddie.seen.lock().unwrap()[0], request);
}

#[tokio::test]
async fn test6_consult_failure_is_flagged_once() {
    let caddie = StubCaddie::failing(CompletionError::Provider {
        status: 429,
        body: "<b>slow down</b>".to_string(),
    });
    let request = compose_swing_analysis(&Evidence::None);
    let advice = consult(&caddie, AdviceKind::SwingAnalysis, &request).await;
    assert!(advice.is_error);
    assert!(advice.html.contains("caddie-error"));
    assert!(advice.html.contains("429"));
    assert!(!advice.html.contains("<b>"));
    assert_eq!(caddie.calls(), 1);
}
