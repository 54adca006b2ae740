use crate::entry::Entry;

/// Spacing between consecutive locked scores. Wide enough that the small
/// usage-based adjustments an external ranker applies can never reorder the
/// entries.
const SCORE_STEP: i64 = 10_000;

/// Pins the presentation order of `entries` by overwriting their scores.
///
/// Entry `i` of `n` gets score `(n - i) * 10_000`, strictly decreasing in
/// input order, and its usage counter is cleared so selection-history boosts
/// start from zero.
pub fn lock_order(entries: &mut [Entry]) {
    let count = entries.len() as i64;
    for (index, entry) in entries.iter_mut().enumerate() {
        entry.score = (count - index as i64) * SCORE_STEP;
        entry.selected_count = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scores_decrease_in_input_order() {
        let mut entries = vec![
            Entry {
                title: "first".into(),
                ..Entry::default()
            },
            Entry {
                title: "second".into(),
                ..Entry::default()
            },
            Entry {
                title: "third".into(),
                ..Entry::default()
            },
        ];
        lock_order(&mut entries);
        let scores: Vec<i64> = entries.iter().map(|entry| entry.score).collect();
        assert_eq!(scores, vec![30_000, 20_000, 10_000]);
    }

    #[test]
    fn existing_scores_and_counters_are_reset() {
        let mut entries = vec![
            Entry {
                score: 7,
                selected_count: 42,
                ..Entry::default()
            },
            Entry {
                score: -3,
                selected_count: 9,
                ..Entry::default()
            },
        ];
        lock_order(&mut entries);
        assert_eq!(entries[0].score, 20_000);
        assert_eq!(entries[1].score, 10_000);
        assert!(entries.iter().all(|entry| entry.selected_count == 0));
    }

    #[test]
    fn empty_slice_is_fine() {
        lock_order(&mut []);
    }
}
