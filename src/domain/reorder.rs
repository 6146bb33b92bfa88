//! Flat list reorder, no nesting awareness.

use tracing::trace;

use crate::domain::entities::Metric;

/// Move the element at `from` to `to`, returning a new sequence.
///
/// Indices are signed because drop offsets computed by callers may go
/// negative. Either index out of range returns the input unchanged.
pub fn relocate<T: Clone>(sequence: &[T], from: isize, to: isize) -> Vec<T> {
    let len = sequence.len();
    let (Ok(from), Ok(to)) = (usize::try_from(from), usize::try_from(to)) else {
        return sequence.to_vec();
    };
    if from >= len || to >= len {
        trace!(from, to, len, "relocate out of range");
        return sequence.to_vec();
    }

    let mut out = sequence.to_vec();
    let moved = out.remove(from);
    out.insert(to, moved);
    out
}

/// Reorder the companion metric list.
pub fn move_metric(metrics: &[Metric], from: isize, to: isize) -> Vec<Metric> {
    relocate(metrics, from, to)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 2, vec!['b', 'c', 'a'])]
    #[case(2, 0, vec!['c', 'a', 'b'])]
    #[case(1, 1, vec!['a', 'b', 'c'])]
    #[case(0, 3, vec!['a', 'b', 'c'])]
    #[case(0, -1, vec!['a', 'b', 'c'])]
    #[case(-1, 0, vec!['a', 'b', 'c'])]
    #[case(5, 0, vec!['a', 'b', 'c'])]
    fn given_sequence_when_relocating_then_matches(
        #[case] from: isize,
        #[case] to: isize,
        #[case] expected: Vec<char>,
    ) {
        let input = vec!['a', 'b', 'c'];
        assert_eq!(relocate(&input, from, to), expected);
        assert_eq!(input, vec!['a', 'b', 'c']);
    }

    #[test]
    fn given_empty_sequence_when_relocating_then_empty() {
        let empty: Vec<u8> = Vec::new();
        assert!(relocate(&empty, 0, 0).is_empty());
    }
}
