use lock_trace::aggregator::{
    global_stats, latest_finish, makespan, segment, segment_all, thread_work, Segment,
};
use lock_trace::parser::{load_value, Observation, State, ThreadTrace, TraceDocument};
use lock_trace::validator::validate;
use pretty_assertions::assert_eq;
use serde_json::json;

fn well_formed_document() -> TraceDocument {
    load_value(&json!({
        "unit": "Cycles",
        "end": 40,
        "threads": [
            { "start": 0,  "samples": [[0, 0], [3, 1], [5, 0], [40, 3]] },
            { "start": 4,  "samples": [[4, 0], [10, 1], [18, 0], [31, 3]] },
            { "start": 6,  "samples": [[6, 1], [9, 0], [12, 1], [20, 0], [38, 3]] },
            { "start": 11, "samples": [[11, 0], [39, 3]] }
        ]
    }))
    .unwrap()
}

#[test]
fn test_reference_scenario() {
    let doc = load_value(&json!({
        "unit": "Cycles",
        "end": 12,
        "threads": [{ "start": 2, "samples": [[2, 0], [5, 1], [9, 0], [12, 3]] }]
    }))
    .unwrap();

    let segments = segment(&doc.threads[0]);
    assert_eq!(
        segments,
        vec![
            Segment::new(0, 2, State::Unregistered),
            Segment::new(2, 3, State::Unlocked),
            Segment::new(5, 4, State::Locked),
            Segment::new(9, 3, State::Unlocked),
        ]
    );
    assert_eq!(thread_work(&segments), 6);

    let stats = global_stats(&doc);
    assert_eq!(stats.makespan, 12);
    assert_eq!(stats.efficiency, 0.5);
}

#[test]
fn test_segments_cover_from_zero() {
    let doc = well_formed_document();

    for thread in &doc.threads {
        let segments = segment(thread);
        assert_eq!(segments[0].left, 0);
        for pair in segments.windows(2) {
            assert_eq!(pair[0].left + pair[0].duration, pair[1].left);
        }
        let last = segments.last().unwrap();
        assert_eq!(last.left + last.duration, thread.last_at().unwrap());
    }
}

#[test]
fn test_work_within_coverage() {
    for segments in segment_all(&well_formed_document()) {
        let covered: i64 = segments.iter().map(|s| s.duration).sum();
        assert!(thread_work(&segments) <= covered);
    }
}

#[test]
fn test_efficiency_bounded_for_well_formed_trace() {
    let doc = well_formed_document();
    assert!(validate(&doc).is_empty());

    let stats = global_stats(&doc);
    assert!(stats.efficiency >= 0.0);
    assert!(stats.efficiency <= 1.0);
    assert_eq!(stats.makespan, 40);
    assert_eq!(stats.latest_finish, 40);
}

#[test]
fn test_parallel_segmentation_keeps_thread_order() {
    let doc = well_formed_document();
    let parallel = segment_all(&doc);
    let sequential: Vec<Vec<Segment>> = doc.threads.iter().map(segment).collect();
    assert_eq!(parallel, sequential);
}

#[test]
fn test_makespan_definitions_diverge() {
    // Thread 0 exits before thread 1: the orchestrator convention is broken
    let doc = TraceDocument {
        unit: "Cycles".to_string(),
        end: 20,
        sample_size: None,
        threads: vec![
            ThreadTrace::new(
                0,
                vec![
                    Observation::new(0, State::Unlocked),
                    Observation::new(8, State::Finished),
                ],
            ),
            ThreadTrace::new(
                1,
                vec![
                    Observation::new(1, State::Unlocked),
                    Observation::new(20, State::Finished),
                ],
            ),
        ],
    };

    assert_eq!(makespan(&doc), 8);
    assert_eq!(latest_finish(&doc), 20);
}

#[test]
fn test_suspect_document_still_aggregates() {
    let doc = load_value(&json!({
        "unit": "Cycles",
        "threads": [
            { "start": -2, "samples": [[0, 0], [6, 0], [4, 1], [9, 3]] }
        ]
    }))
    .unwrap();

    assert_eq!(validate(&doc).len(), 3);

    // Durations are taken as given, including the negative one
    let segments = segment(&doc.threads[0]);
    assert_eq!(
        segments,
        vec![
            Segment::new(-2, 6, State::Unlocked),
            Segment::new(4, -2, State::Unlocked),
            Segment::new(2, 5, State::Locked),
        ]
    );
    assert_eq!(global_stats(&doc).total_work, 4);
}

#[test]
fn test_extreme_timestamps_do_not_overflow() {
    let doc = load_value(&json!({
        "unit": "ms",
        "threads": [
            { "start": 0, "samples": [[i64::MIN, 0], [i64::MAX, 3]] }
        ]
    }))
    .unwrap();

    let segments = segment(&doc.threads[0]);
    assert_eq!(segments, vec![Segment::new(0, i64::MAX, State::Unlocked)]);

    let stats = global_stats(&doc);
    assert_eq!(stats.total_work, i64::MAX);
    assert_eq!(stats.makespan, i64::MAX);
    assert_eq!(stats.efficiency, 1.0);
}
