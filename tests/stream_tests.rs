use prv_tables::utils::config::ParserConfig;
use prv_tables::{parse_file, ParseError};
use std::io::Write;
use tempfile::NamedTempFile;

const HEADER: &str = "#Paraver (17/02/2020 at 11:37):1857922_ns:1(4):1:2(2:1,2:1)";

fn write_trace(lines: &[&str]) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file.flush().unwrap();
    file
}

/// A small but representative record mix: STATE and COMM lines plus EVENT
/// lines with one and with several packed pairs.
fn sample_lines() -> Vec<&'static str> {
    vec![
        "1:1:1:1:1:0:16552587:1",
        "2:1:1:1:1:4717288:50000003:4",
        "3:1:1:1:1:500:510:2:1:2:1:600:610:8192:77",
        "2:1:1:2:1:4717288:40:3:41:0:42:7",
        "1:2:1:2:1:100:200:7",
        "2:2:1:2:1:200:40:1",
        "3:2:1:2:1:700:710:1:1:1:1:800:810:4096:12",
    ]
}

fn small_config(max_batch_bytes: usize) -> ParserConfig {
    ParserConfig {
        max_batch_bytes,
        initial_elements: 60,
        micro_batch_lines: 3,
    }
}

/// Default-shaped config with a pre-allocation small enough for tests
fn test_config() -> ParserConfig {
    ParserConfig {
        initial_elements: 3_000,
        micro_batch_lines: 100,
        ..ParserConfig::default()
    }
}

#[test]
fn row_counts_match_per_line_expansion() {
    let file = write_trace(&sample_lines());
    let tables = parse_file(file.path(), &test_config()).unwrap();

    assert_eq!(tables.states.num_rows(), 2);
    // 1 + 3 + 1 events from the three EVENT lines
    assert_eq!(tables.events.num_rows(), 5);
    assert_eq!(tables.comms.num_rows(), 2);
    assert_eq!(tables.skipped_lines, 0);
}

#[test]
fn batch_boundaries_do_not_change_the_output() {
    let file = write_trace(&sample_lines());

    // One big batch, then tiny byte budgets that force a batch per line:
    // the resulting tables must be identical.
    let whole = parse_file(file.path(), &test_config()).unwrap();
    for budget in [1, 16, 40, 100] {
        let split = parse_file(file.path(), &small_config(budget)).unwrap();
        assert_eq!(split.states, whole.states, "budget {budget}");
        assert_eq!(split.events, whole.events, "budget {budget}");
        assert_eq!(split.comms, whole.comms, "budget {budget}");
    }
}

#[test]
fn output_preserves_input_order() {
    let file = write_trace(&[
        "1:1:1:1:1:0:10:1",
        "1:1:1:1:1:10:20:2",
        "1:1:1:1:1:20:30:3",
    ]);
    let tables = parse_file(file.path(), &small_config(1)).unwrap();

    assert_eq!(tables.states.num_rows(), 3);
    assert_eq!(tables.states.row(0)[6], 1);
    assert_eq!(tables.states.row(1)[6], 2);
    assert_eq!(tables.states.row(2)[6], 3);
}

#[test]
fn event_rows_preserve_pair_order_within_a_line() {
    let file = write_trace(&["2:1:1:1:1:999:40:3:41:0:42:7"]);
    let tables = parse_file(file.path(), &test_config()).unwrap();

    assert_eq!(tables.events.num_rows(), 3);
    assert_eq!(tables.events.row(0), &[1, 1, 1, 1, 999, 40, 3]);
    assert_eq!(tables.events.row(1), &[1, 1, 1, 1, 999, 41, 0]);
    assert_eq!(tables.events.row(2), &[1, 1, 1, 1, 999, 42, 7]);
}

#[test]
fn unknown_record_kinds_are_skipped() {
    let file = write_trace(&[
        "c:1:2:3:4",
        "1:1:1:1:1:0:10:1",
        "8:5:5",
    ]);
    let tables = parse_file(file.path(), &test_config()).unwrap();

    assert_eq!(tables.states.num_rows(), 1);
    assert_eq!(tables.skipped_lines, 2);
}

#[test]
fn malformed_record_aborts_with_position() {
    let file = write_trace(&[
        "1:1:1:1:1:0:10:1",
        "1:1:1:1:1:0:10",
        "1:1:1:1:1:20:30:3",
    ]);
    let err = parse_file(file.path(), &test_config()).unwrap_err();

    match err {
        ParseError::MalformedRecord {
            line_number, line, ..
        } => {
            // Header is line 1, so the bad record sits on line 3.
            assert_eq!(line_number, 3);
            assert_eq!(line, "1:1:1:1:1:0:10");
        }
        other => panic!("expected MalformedRecord, got {other:?}"),
    }
}

#[test]
fn missing_file_is_an_io_error() {
    let err = parse_file("/does/not/exist.prv", &test_config()).unwrap_err();
    assert!(matches!(err, ParseError::Io(_)));
}

#[test]
fn header_only_trace_yields_empty_tables() {
    let file = write_trace(&[]);
    let tables = parse_file(file.path(), &test_config()).unwrap();

    assert!(tables.states.is_empty());
    assert!(tables.events.is_empty());
    assert!(tables.comms.is_empty());
}

#[test]
fn tiny_buffers_survive_many_grows() {
    // Enough EVENT expansion to overflow a 60-element pre-allocation many
    // times over; growth must never drop or duplicate rows.
    let mut lines = Vec::new();
    for i in 0..500 {
        lines.push(format!("2:1:1:1:1:{}:40:{}:41:{}", i, i, i * 2));
    }
    let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let file = write_trace(&refs);

    let tables = parse_file(file.path(), &small_config(256)).unwrap();
    assert_eq!(tables.events.num_rows(), 1000);
    for i in 0..500 {
        assert_eq!(tables.events.row(i * 2), &[1, 1, 1, 1, i as i64, 40, i as i64]);
        assert_eq!(
            tables.events.row(i * 2 + 1),
            &[1, 1, 1, 1, i as i64, 41, (i * 2) as i64]
        );
    }
}
