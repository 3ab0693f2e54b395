//! Edit-script bisection.
//!
//! [`bisect`] finds the length of the shortest edit script between the two
//! sides of a [`RangePair`] and a point on an optimal edit path, using the
//! linear-space bidirectional diagonal search of Myers' "An O(ND) Difference
//! Algorithm and Its Variations" (1986), section 4b.
//!
//! The common prefix and suffix are stripped before the search so that the
//! returned split always makes progress: either it sits behind a non-empty
//! common prefix, in front of a non-empty common suffix, or strictly inside a
//! core that both starts and ends with a difference.

use crate::cursor::{Cursor, DocPair, RangePair};
use crate::diff::oracle::units_equal;

/// Where the driver should split a range pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MiddleSnake<'a> {
    /// The two sides are identical.
    Identical,
    /// The two sides share no unit.
    Disjoint,
    /// A point on an optimal edit path; the snake through it is found by
    /// extending in both directions.
    Split(DocPair<'a>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bisection<'a> {
    /// Length of the shortest edit script (insertions plus deletions)
    pub edit_len: usize,
    pub snake: MiddleSnake<'a>,
}

/// Diagonal-indexed furthest-reaching `x` values
struct Frontier {
    offset: isize,
    cells: Vec<usize>,
}

impl Frontier {
    fn new(max_d: usize) -> Self {
        Self {
            offset: max_d as isize + 1,
            cells: vec![0; 2 * max_d + 3],
        }
    }

    fn get(&self, k: isize) -> usize {
        self.cells[(k + self.offset) as usize]
    }

    fn set(&mut self, k: isize, x: usize) {
        self.cells[(k + self.offset) as usize] = x;
    }
}

/// Units compared by index into pre-collected position lists
struct Sides<'s, 'a> {
    old: &'s [Cursor<'a>],
    new: &'s [Cursor<'a>],
}

impl Sides<'_, '_> {
    fn eq(&self, x: usize, y: usize) -> bool {
        units_equal(&self.old[x], &self.new[y])
    }

    /// Length of the common run starting at `(x, y)` and bounded by `(n, m)`.
    fn run_forward(&self, mut x: usize, mut y: usize, n: usize, m: usize) -> usize {
        let start = x;
        while x < n && y < m && self.eq(x, y) {
            x += 1;
            y += 1;
        }
        x - start
    }

    /// Length of the common run ending just before `(x, y)` and bounded by `(lo_x, lo_y)`.
    fn run_backward(&self, mut x: usize, mut y: usize, lo_x: usize, lo_y: usize) -> usize {
        let start = x;
        while x > lo_x && y > lo_y && self.eq(x - 1, y - 1) {
            x -= 1;
            y -= 1;
        }
        start - x
    }
}

/// Compute the edit length and a split point for `pair`.
pub fn bisect<'a>(pair: &RangePair<'a>) -> Bisection<'a> {
    let old = pair.old.positions();
    let new = pair.new.positions();
    let (n, m) = (old.len(), new.len());
    let sides = Sides {
        old: &old,
        new: &new,
    };

    let prefix = sides.run_forward(0, 0, n, m);
    if prefix == n && prefix == m {
        return Bisection {
            edit_len: 0,
            snake: MiddleSnake::Identical,
        };
    }
    let suffix = sides.run_backward(n, m, prefix, prefix);

    let at = |x: usize, y: usize| {
        DocPair::new(
            old.get(x).copied().unwrap_or(pair.old.to),
            new.get(y).copied().unwrap_or(pair.new.to),
        )
    };

    let (core_n, core_m) = (n - prefix - suffix, m - prefix - suffix);
    let core = if core_n == 0 || core_m == 0 {
        None
    } else {
        middle_snake(&sides, prefix, n - suffix, prefix, m - suffix)
            .filter(|&(d, _, _)| d < core_n + core_m)
    };

    match core {
        Some((edit_len, x, y)) => Bisection {
            edit_len,
            snake: MiddleSnake::Split(at(prefix + x, prefix + y)),
        },
        None => {
            let edit_len = core_n + core_m;
            let snake = if prefix > 0 {
                MiddleSnake::Split(at(0, 0))
            } else if suffix > 0 {
                MiddleSnake::Split(at(n - suffix, m - suffix))
            } else {
                MiddleSnake::Disjoint
            };
            Bisection { edit_len, snake }
        }
    }
}

/// Bidirectional search over `old[x0..x1]` against `new[y0..y1]`.
///
/// Returns the edit length `d` and a point `(x, y)` relative to `(x0, y0)`
/// that lies on an optimal path.
fn middle_snake(
    sides: &Sides<'_, '_>,
    x0: usize,
    x1: usize,
    y0: usize,
    y1: usize,
) -> Option<(usize, usize, usize)> {
    let n = x1 - x0;
    let m = y1 - y0;
    let delta = n as isize - m as isize;
    let odd = delta & 1 != 0;
    let max_d = (n + m + 1) / 2 + 1;

    let mut vf = Frontier::new(max_d);
    let mut vb = Frontier::new(max_d);

    for d in 0..max_d as isize {
        // forward sweep
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vf.get(k - 1) < vf.get(k + 1)) {
                vf.get(k + 1)
            } else {
                vf.get(k - 1) + 1
            };
            let y = (x as isize - k) as usize;
            let (sx, sy) = (x, y);
            if x < n && y < m {
                x += sides.run_forward(x0 + x, y0 + y, x1, y1);
            }
            vf.set(k, x);
            if odd && (k - delta).abs() <= d - 1 && vf.get(k) + vb.get(delta - k) >= n {
                return Some(((2 * d - 1) as usize, sx, sy));
            }
        }

        // backward sweep; x and y count from the far corner
        for k in (-d..=d).rev().step_by(2) {
            let mut x = if k == -d || (k != d && vb.get(k - 1) < vb.get(k + 1)) {
                vb.get(k + 1)
            } else {
                vb.get(k - 1) + 1
            };
            let mut y = (x as isize - k) as usize;
            if x < n && y < m {
                let run = sides.run_backward(x1 - x, y1 - y, x0, y0);
                x += run;
                y += run;
            }
            vb.set(k, x);
            if !odd && (k - delta).abs() <= d && vb.get(k) + vf.get(delta - k) >= n {
                return Some(((2 * d) as usize, n - x, m - y));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Text;

    fn bisect_plain(old: &str, new: &str) -> (usize, Option<(usize, usize)>) {
        let old = Text::from_plain(old);
        let new = Text::from_plain(new);
        let pair = RangePair::whole(&old, &new);
        let result = bisect(&pair);
        let split = match result.snake {
            MiddleSnake::Split(p) => Some((p.old.pos(), p.new.pos())),
            _ => None,
        };
        (result.edit_len, split)
    }

    #[test]
    fn test_identical() {
        let old = Text::from_plain("same\ntext");
        let new = Text::from_plain("same\ntext");
        let result = bisect(&RangePair::whole(&old, &new));
        assert_eq!(result.edit_len, 0);
        assert_eq!(result.snake, MiddleSnake::Identical);
    }

    #[test]
    fn test_disjoint() {
        let old = Text::from_plain("abc");
        let new = Text::from_plain("xy");
        let result = bisect(&RangePair::whole(&old, &new));
        assert_eq!(result.edit_len, 5);
        assert_eq!(result.snake, MiddleSnake::Disjoint);
    }

    #[test]
    fn test_pure_insertion_splits_at_prefix() {
        assert_eq!(bisect_plain("ab", "abcd"), (2, Some((0, 0))));
    }

    #[test]
    fn test_leading_insertion_splits_at_suffix() {
        assert_eq!(bisect_plain("cd", "abcd"), (2, Some((0, 2))));
    }

    #[test]
    fn test_classic_example_edit_length() {
        // Myers' paper example: D = 5
        let (d, split) = bisect_plain("abcabba", "cbabac");
        assert_eq!(d, 5);
        assert!(split.is_some());
    }

    #[test]
    fn test_substitution_in_the_middle() {
        let (d, split) = bisect_plain("the cat sat", "the dog sat");
        assert_eq!(d, 6);
        assert_eq!(split, Some((0, 0)));
    }

    #[test]
    fn test_core_split_is_strictly_inside() {
        let old = Text::from_plain("xaby");
        let new = Text::from_plain("zabw");
        let pair = RangePair::whole(&old, &new);
        let result = bisect(&pair);

        assert_eq!(result.edit_len, 4);
        match result.snake {
            MiddleSnake::Split(p) => {
                assert!(p.old > pair.old.from || p.new > pair.new.from);
                assert!(p.old < pair.old.to || p.new < pair.new.to);
            }
            other => panic!("expected a split, got {:?}", other),
        }
    }
}
