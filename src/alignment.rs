//! Needleman-Wunsch global alignment with affine gaps (Gotoh).
//!
//! Gap penalties are given as the values added to the score, so they are
//! normally negative: a gap of length `k` costs `gap_open + (k - 1) * gap_extend`.

use crate::matrix::ScoringMatrix;

pub const GAP: u8 = b'-';

/// Very low score for unreachable cells, far enough from `i32::MIN` that
/// adding penalties cannot overflow.
const NEG_INF: i32 = i32::MIN / 4;

/// Two gap-padded sequences of equal length plus the alignment score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalAlignment {
    pub score: i32,
    pub aligned_a: String,
    pub aligned_b: String,
}

impl GlobalAlignment {
    /// The aligned pair as a two-element array, the shape the identity
    /// scorer consumes.
    pub fn pair(&self) -> [&str; 2] {
        [&self.aligned_a, &self.aligned_b]
    }
}

/// The three DP states. `Up` consumes `a` against a gap, `Left` consumes
/// `b` against a gap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Diagonal,
    Up,
    Left,
}

pub struct NeedlemanWunsch<S: ScoringMatrix> {
    scoring: S,
    gap_open: i32,
    gap_extend: i32,
}

impl<S: ScoringMatrix> NeedlemanWunsch<S> {
    pub fn new(scoring: S, gap_open: i32, gap_extend: i32) -> Self {
        Self {
            scoring,
            gap_open,
            gap_extend,
        }
    }

    /// Aligns `a` against `b` end to end.
    ///
    /// Ties are resolved in the order diagonal, up, left, both when filling
    /// the matrices and when picking the final state, so the result is
    /// deterministic.
    pub fn align(&self, a: &str, b: &str) -> GlobalAlignment {
        let a = a.as_bytes();
        let b = b.as_bytes();
        let (n, m) = (a.len(), b.len());
        let width = m + 1;
        let cells = (n + 1) * width;

        // Best score ending in each state, and the state it came from.
        let mut diag = vec![NEG_INF; cells];
        let mut up = vec![NEG_INF; cells];
        let mut left = vec![NEG_INF; cells];
        let mut diag_from = vec![State::Diagonal; cells];
        let mut up_from = vec![State::Diagonal; cells];
        let mut left_from = vec![State::Diagonal; cells];

        diag[0] = 0;
        for i in 1..=n {
            up[i * width] = self.gap_open + (i as i32 - 1) * self.gap_extend;
            up_from[i * width] = if i == 1 { State::Diagonal } else { State::Up };
        }
        for j in 1..=m {
            left[j] = self.gap_open + (j as i32 - 1) * self.gap_extend;
            left_from[j] = if j == 1 { State::Diagonal } else { State::Left };
        }

        for i in 1..=n {
            for j in 1..=m {
                let here = i * width + j;

                let prev = here - width - 1;
                let (best, from) = best_of(diag[prev], up[prev], left[prev]);
                diag[here] = best + self.scoring.score(a[i - 1], b[j - 1]);
                diag_from[here] = from;

                let prev = here - width;
                let (best, from) = best_of(
                    diag[prev] + self.gap_open,
                    up[prev] + self.gap_extend,
                    left[prev] + self.gap_open,
                );
                up[here] = best;
                up_from[here] = from;

                let prev = here - 1;
                let (best, from) = best_of(
                    diag[prev] + self.gap_open,
                    up[prev] + self.gap_open,
                    left[prev] + self.gap_extend,
                );
                left[here] = best;
                left_from[here] = from;
            }
        }

        let last = cells - 1;
        let (score, mut state) = best_of(diag[last], up[last], left[last]);

        let mut aligned_a = Vec::with_capacity(n + m);
        let mut aligned_b = Vec::with_capacity(n + m);
        let (mut i, mut j) = (n, m);
        while i > 0 || j > 0 {
            let here = i * width + j;
            match state {
                State::Diagonal => {
                    aligned_a.push(a[i - 1]);
                    aligned_b.push(b[j - 1]);
                    state = diag_from[here];
                    i -= 1;
                    j -= 1;
                }
                State::Up => {
                    aligned_a.push(a[i - 1]);
                    aligned_b.push(GAP);
                    state = up_from[here];
                    i -= 1;
                }
                State::Left => {
                    aligned_a.push(GAP);
                    aligned_b.push(b[j - 1]);
                    state = left_from[here];
                    j -= 1;
                }
            }
        }
        aligned_a.reverse();
        aligned_b.reverse();

        GlobalAlignment {
            score,
            aligned_a: String::from_utf8_lossy(&aligned_a).into_owned(),
            aligned_b: String::from_utf8_lossy(&aligned_b).into_owned(),
        }
    }
}

#[inline]
fn best_of(diagonal: i32, up: i32, left: i32) -> (i32, State) {
    if diagonal >= up && diagonal >= left {
        (diagonal, State::Diagonal)
    } else if up >= left {
        (up, State::Up)
    } else {
        (left, State::Left)
    }
}
