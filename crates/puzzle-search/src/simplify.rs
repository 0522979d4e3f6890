//! Removal of immediately reversed move pairs from a solution path.
//!
//! The check is purely syntactic: a move cancels its predecessor only when
//! [`ReversibleMove::reverses`] says its parameters are the predecessor's,
//! swapped. Other redundancy (longer detours, semantically equivalent moves)
//! is left alone.

use crate::problem::{Path, ReversibleMove};

/// Drop every adjacent pair where the second move reverses the first.
///
/// Pairs that become adjacent after a removal are checked too, so the result
/// contains no reversed pair and `simplify(&simplify(p)) == simplify(p)`.
pub fn simplify<M: ReversibleMove + Clone>(path: &[M]) -> Path<M> {
    let mut kept: Path<M> = Vec::with_capacity(path.len());
    for mv in path {
        match kept.last() {
            Some(previous) if mv.reverses(previous) => {
                kept.pop();
            }
            _ => kept.push(mv.clone()),
        }
    }
    kept
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swapped_pair_removed() {
        assert_eq!(simplify(&[(0, 1), (2, 0), (0, 2), (1, 2)]), vec![(0, 1), (1, 2)]);
    }

    #[test]
    fn test_nested_reversals_collapse() {
        // (1,2)/(2,1) only become adjacent once (0,2)/(2,0) is gone.
        let path: [(u8, u8); 4] = [(1, 2), (0, 2), (2, 0), (2, 1)];
        assert!(simplify(&path).is_empty());
    }

    #[test]
    fn test_repeated_move_is_not_a_reversal() {
        let path = [(0, 2), (0, 2), (1, 0)];
        assert_eq!(simplify(&path), path.to_vec());
    }

    #[test]
    fn test_simplify_is_idempotent() {
        let paths: [&[(u8, u8)]; 4] = [
            &[],
            &[(0, 1), (1, 0), (1, 0)],
            &[(2, 1), (1, 1), (1, 1), (1, 2), (0, 2)],
            &[(0, 2), (2, 1), (1, 0), (0, 1), (1, 2), (2, 0)],
        ];
        for path in paths {
            let once = simplify(path);
            assert_eq!(simplify(&once), once);
        }
    }
}
