//! Edit-distance primitives.
//!
//! Both functions work on `char`s rather than bytes, so a multi-byte
//! character counts as a single edit.

/// A contiguous slice of the text that best aligns with a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    /// Edits needed to turn the query into `text[start..end]`
    pub distance: usize,
    /// First char offset of the window
    pub start: usize,
    /// One past the last char offset of the window
    pub end: usize,
}

impl Window {
    /// Length of the window in chars.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// True if the window covers no text.
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Calculate optimal string alignment distance between two strings.
///
/// This is Levenshtein distance extended with adjacent transpositions
/// ("dosa" -> "dsoa" costs 1, not 2). A substring may not be edited twice.
///
/// # Arguments
/// * `a` - First string
/// * `b` - Second string
///
/// # Returns
/// Number of single-character edits needed to transform a into b
pub fn osa_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    osa_distance_chars(&a_chars, &b_chars)
}

pub(crate) fn osa_distance_chars(a: &[char], b: &[char]) -> usize {
    let m = a.len();
    let n = b.len();

    if m == 0 { return n; }
    if n == 0 { return m; }

    // Three rows: the transposition step looks two rows back
    let mut prev2: Vec<usize> = vec![0; n + 1];
    let mut prev: Vec<usize> = (0..=n).collect();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;
        for j in 1..=n {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut best = (prev[j] + 1)
                .min(curr[j - 1] + 1)
                .min(prev[j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(prev2[j - 2] + 1);
            }
            curr[j] = best;
        }
        std::mem::swap(&mut prev2, &mut prev);
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

/// Find the window of `text` that `query` matches with the fewest edits.
///
/// Semi-global alignment: the query must be consumed entirely, but the
/// match may start and end anywhere in the text. Among windows with the
/// same distance the leftmost start wins.
///
/// # Example
/// ```
/// use cookbuddy_search::best_window;
///
/// let window = best_window("dosa", "masala dosa");
/// assert_eq!(window.distance, 0);
/// assert_eq!((window.start, window.end), (7, 11));
/// ```
pub fn best_window(query: &str, text: &str) -> Window {
    let q_chars: Vec<char> = query.chars().collect();
    let t_chars: Vec<char> = text.chars().collect();
    best_window_chars(&q_chars, &t_chars)
}

pub(crate) fn best_window_chars(query: &[char], text: &[char]) -> Window {
    let m = query.len();
    let n = text.len();

    // Cells carry (distance, window start); tuple ordering makes ties
    // resolve towards the leftmost start.
    let mut prev2: Vec<(usize, usize)> = vec![(0, 0); n + 1];
    let mut prev: Vec<(usize, usize)> = (0..=n).map(|j| (0, j)).collect();
    let mut curr: Vec<(usize, usize)> = vec![(0, 0); n + 1];

    for i in 1..=m {
        curr[0] = (i, 0);
        for j in 1..=n {
            let cost = usize::from(query[i - 1] != text[j - 1]);
            let (up, up_start) = prev[j];
            let (left, left_start) = curr[j - 1];
            let (diag, diag_start) = prev[j - 1];

            let mut best = (up + 1, up_start)
                .min((left + 1, left_start))
                .min((diag + cost, diag_start));
            if i > 1 && j > 1 && query[i - 1] == text[j - 2] && query[i - 2] == text[j - 1] {
                let (swap, swap_start) = prev2[j - 2];
                best = best.min((swap + 1, swap_start));
            }
            curr[j] = best;
        }
        std::mem::swap(&mut prev2, &mut prev);
        std::mem::swap(&mut prev, &mut curr);
    }

    let (distance, start) = prev[0];
    let first = Window { distance, start, end: 0 };

    prev.iter()
        .enumerate()
        .skip(1)
        .fold(first, |best, (end, &(distance, start))| {
            if (distance, start) < (best.distance, best.start) {
                Window { distance, start, end }
            } else {
                best
            }
        })
}
