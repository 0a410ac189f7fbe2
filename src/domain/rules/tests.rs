// Unit tests for business rules

use std::path::{Path, PathBuf};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::*;

fn context(segments: Vec<Segment>) -> RunContext {
    RunContext::new("/videos/talk.mp4", Some("2024-06-01".to_string()), segments)
}

#[test]
fn test_validator_rejects_inverted_range() {
    let err = SegmentValidator::validate(0, &Segment::from_seconds(10, 10, "A"), 100.0).unwrap_err();
    assert_eq!(
        err,
        DomainError::InvalidRange {
            position: 1,
            start: 10,
            end: 10
        }
    );

    let err = SegmentValidator::validate(2, &Segment::from_seconds(20, 5, "A"), 100.0).unwrap_err();
    assert!(matches!(err, DomainError::InvalidRange { position: 3, .. }));
}

#[test]
fn test_validator_rejects_end_past_duration() {
    let err = SegmentValidator::validate(0, &Segment::from_seconds(0, 121, "A"), 120.5).unwrap_err();
    assert_eq!(
        err,
        DomainError::RangeExceedsSource {
            position: 1,
            end: 121,
            duration: 120.5
        }
    );
}

#[test]
fn test_validator_accepts_end_equal_to_duration() {
    assert!(SegmentValidator::validate(0, &Segment::from_seconds(100, 120, "tail"), 120.0).is_ok());
}

#[test]
fn test_validator_rejects_blank_names() {
    for name in ["", "   ", "\t\n"] {
        let err = SegmentValidator::validate(1, &Segment::from_seconds(0, 10, name), 60.0).unwrap_err();
        assert_eq!(err, DomainError::MissingName { position: 2 });
    }
}

#[test]
fn test_validator_checks_range_before_name() {
    let err = SegmentValidator::validate(0, &Segment::from_seconds(5, 1, ""), 60.0).unwrap_err();
    assert!(matches!(err, DomainError::InvalidRange { .. }));
}

#[test]
fn test_file_name_replaces_separators() {
    assert_eq!(
        OutputNaming::file_name("2024-01-02", "Intro/Part 1"),
        "[2024-01-02] Intro-Part 1.mp4"
    );
    assert_eq!(
        OutputNaming::file_name("2024-01-02", "a\\b/c"),
        "[2024-01-02] a-b-c.mp4"
    );
}

#[test]
fn test_file_name_sanitizes_date_label() {
    assert_eq!(OutputNaming::file_name("1/2/24", " Intro "), "[1-2-24] Intro.mp4");
    assert_eq!(OutputNaming::folder_name("1/2/24"), "segments_1-2-24");
}

#[test]
fn test_output_folder_is_sibling_of_source() {
    let folder = OutputNaming::output_folder(Path::new("/videos/talk.mp4"), "2024-06-01");
    assert_eq!(folder, PathBuf::from("/videos/segments_2024-06-01"));

    let folder = OutputNaming::output_folder(Path::new("talk.mp4"), "2024-06-01");
    assert_eq!(folder, PathBuf::from("segments_2024-06-01"));
}

#[test]
fn test_plan_preserves_order_and_names() {
    let ctx = context(vec![
        Segment::from_seconds(0, 10, "A"),
        Segment::from_seconds(10, 30, " B "),
        Segment::from_seconds(5, 120, "Intro/Part 1"),
    ]);

    let plan = SegmentPlanner::plan(&ctx, 120.0).unwrap();

    assert_eq!(plan.len(), 3);
    assert_eq!(plan.output_folder, PathBuf::from("/videos/segments_2024-06-01"));
    let names: Vec<_> = plan
        .output_paths()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    assert_eq!(
        names,
        vec![
            "[2024-06-01] A.mp4",
            "[2024-06-01] B.mp4",
            "[2024-06-01] Intro-Part 1.mp4"
        ]
    );
    assert_eq!(plan.segments[1].segment.name, "B");
    assert_eq!(plan.segments[2].index, 2);
}

#[test]
fn test_plan_is_deterministic() {
    let ctx = context(vec![Segment::from_seconds(0, 10, "A")]);
    let first = SegmentPlanner::plan(&ctx, 60.0).unwrap();
    let second = SegmentPlanner::plan(&ctx, 60.0).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_plan_fails_on_first_bad_segment() {
    let ctx = context(vec![
        Segment::from_seconds(0, 10, "A"),
        Segment::from_seconds(10, 500, "B"),
        Segment::from_seconds(30, 20, "C"),
    ]);
    let err = SegmentPlanner::plan(&ctx, 120.0).unwrap_err();
    assert!(matches!(err, DomainError::RangeExceedsSource { position: 2, .. }));
}

#[test]
fn test_plan_rejects_empty_segment_list() {
    let err = SegmentPlanner::plan(&context(vec![]), 120.0).unwrap_err();
    assert_eq!(err, DomainError::NoSegments);
}
