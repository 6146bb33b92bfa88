//! Tests for the flat metric reorder

use rstest::rstest;

use dashlayout::domain::{move_metric, relocate, Metric};

fn metrics() -> Vec<Metric> {
    vec![Metric::new("m1"), Metric::new("m2"), Metric::new("m3")]
}

fn ids(metrics: &[Metric]) -> Vec<&str> {
    metrics.iter().map(|m| m.id.as_str()).collect()
}

#[test]
fn given_target_out_of_bounds_when_moving_metric_then_unchanged() {
    let input = metrics();
    assert_eq!(move_metric(&input, 0, 5), input);
}

#[test]
fn given_last_metric_moved_to_front_when_moving_metric_then_rotates() {
    let moved = move_metric(&metrics(), 2, 0);
    assert_eq!(ids(&moved), vec!["m3", "m1", "m2"]);
}

#[rstest]
#[case(0, 1)]
#[case(1, 2)]
#[case(2, 1)]
#[case(0, 2)]
fn given_in_range_indices_when_relocating_then_output_is_permutation(
    #[case] from: isize,
    #[case] to: isize,
) {
    let input = metrics();
    let out = relocate(&input, from, to);

    assert_eq!(out.len(), input.len());
    assert_eq!(out[to as usize], input[from as usize]);
    let mut sorted = ids(&out);
    sorted.sort_unstable();
    assert_eq!(sorted, ids(&input));
}

#[rstest]
#[case(-1)]
#[case(3)]
#[case(isize::MAX)]
fn given_invalid_target_when_relocating_then_returns_input(#[case] to: isize) {
    let input = metrics();
    assert_eq!(relocate(&input, 1, to), input);
}
