use std::cmp::Ordering;

/// A macro to measure the evaluation time of an expression. Wraps an
/// expression, and outputs the value of the expression while logging the
/// elapsed time at the given level.
#[macro_export]
macro_rules! timed {
    ($label:expr, $ex:expr) => {
        timed!($label, log::Level::Debug, $ex)
    };
    ($label:expr, $log_level:expr, $ex:expr) => {{
        let now = std::time::Instant::now();
        let value = $ex;
        let elapsed = now.elapsed();
        log::log!($log_level, "{} took {} ms", $label, elapsed.as_millis());
        value
    }};
}

/// Compare two `PartialOrd` values dangerously. If the partial comparison
/// fails (returns `None`), this will panic. This is useful if you have floats
/// that you know for a fact will not be `NaN`.
pub fn cmp_unwrap<T: PartialOrd>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap()
}

/// Calculate the number of cells in a full hexagonal grid of the given
/// radius. Radius 0 means 1 cell, 1 is 7 cells, 2 is 19, etc. Negative radii
/// hold no cells at all.
pub fn hexagon_len(radius: i32) -> usize {
    if radius < 0 {
        return 0;
    }
    // We'll always have 3r^2+3r+1 cells (a reduction of a geometric sum).
    // f(0) = 1, and we add 6r cells for every step after that, so:
    // 1, (+6) 7, (+12) 19, (+18) 37, ...
    let r = radius as usize;
    3 * r * r + 3 * r + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hexagon_len() {
        assert_eq!(hexagon_len(-1), 0);
        assert_eq!(hexagon_len(0), 1);
        assert_eq!(hexagon_len(1), 7);
        assert_eq!(hexagon_len(2), 19);
        assert_eq!(hexagon_len(10), 331);
    }
}
