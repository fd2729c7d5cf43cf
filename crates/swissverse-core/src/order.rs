//! Order value assignment for `display_order`-ranked rows.
//!
//! New rows get a value that sorts them into place without renumbering
//! anything else: append takes max + 1, insert-between takes the midpoint of
//! its neighbors, head/tail insertions step off by a fixed offset. Repeated
//! midpoint insertion between the same neighbors eventually exhausts f64
//! precision; `between` reports that as `None` so the caller can renumber the
//! scope (see `rebalanced`) and retry.

/// Order assigned to the first row of an empty scope.
pub const BASELINE: f64 = 1.0;

/// Offset used for head/tail insertion and for rebalanced sequences.
pub const STEP: f64 = 10.0;

/// Order value for a row appended to a scope whose current maximum is `max`.
pub fn append_after(max: Option<f64>) -> f64 {
    match max {
        Some(m) => m + 1.0,
        None => BASELINE,
    }
}

/// Order value for a row inserted between two neighbors.
///
/// `None` neighbors mean head or tail insertion. Returns `None` only when
/// both neighbors exist and the midpoint is no longer strictly between them
/// (precision exhausted); the scope must be rebalanced before retrying.
pub fn between(left: Option<f64>, right: Option<f64>) -> Option<f64> {
    match (left, right) {
        (Some(a), Some(b)) => {
            let mid = (a + b) / 2.0;
            if a < mid && mid < b {
                Some(mid)
            } else {
                None
            }
        }
        (Some(a), None) => Some(a + STEP),
        (None, Some(b)) => Some(b - STEP),
        (None, None) => Some(BASELINE),
    }
}

/// Fresh order values for a scope of `n` rows: 10, 20, 30, …
pub fn rebalanced(n: usize) -> impl Iterator<Item = f64> {
    (1..=n).map(|i| i as f64 * STEP)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_on_empty_scope_uses_baseline() {
        assert_eq!(append_after(None), BASELINE);
    }

    #[test]
    fn appends_are_strictly_increasing() {
        let mut max = None;
        let mut orders = Vec::new();
        for _ in 0..20 {
            let next = append_after(max);
            orders.push(next);
            max = Some(next);
        }
        assert!(orders.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn midpoint_lands_between_neighbors() {
        assert_eq!(between(Some(1.0), Some(3.0)), Some(2.0));
        let v = between(Some(2.0), Some(2.5)).unwrap();
        assert!(2.0 < v && v < 2.5);
    }

    #[test]
    fn tail_insert_steps_past_last() {
        assert_eq!(between(Some(3.0), None), Some(13.0));
    }

    #[test]
    fn head_insert_steps_before_first() {
        assert_eq!(between(None, Some(3.0)), Some(-7.0));
    }

    #[test]
    fn empty_scope_insert_uses_baseline() {
        assert_eq!(between(None, None), Some(BASELINE));
    }

    #[test]
    fn repeated_midpoints_eventually_collapse() {
        let mut left = 1.0;
        let right = 2.0;
        let mut depth = 0;
        loop {
            match between(Some(left), Some(right)) {
                Some(mid) => {
                    assert!(left < mid && mid < right);
                    left = mid;
                    depth += 1;
                    assert!(depth < 200, "expected collapse within f64 mantissa depth");
                }
                None => break,
            }
        }
        assert!(depth >= 50);
    }

    #[test]
    fn rebalanced_is_strictly_increasing_from_step() {
        let orders: Vec<f64> = rebalanced(4).collect();
        assert_eq!(orders, vec![10.0, 20.0, 30.0, 40.0]);
    }
}
