use std::cmp::Ordering;

/// Shared sort-and-slice helper behind every bounded top-N selection in the
/// engine (top rated players, top ranked players, best counted events).
///
/// The sort is stable, so callers get a deterministic result by supplying a
/// total comparator with an explicit tie-break; items the comparator leaves
/// equal keep their input order.
pub fn top_n_by<T, F>(items: &[T], n: usize, compare: F) -> Vec<T>
where
    T: Clone,
    F: FnMut(&T, &T) -> Ordering
{
    let mut sorted = items.to_vec();
    sorted.sort_by(compare);
    sorted.truncate(n);
    sorted
}

#[cfg(test)]
mod tests {
    use super::top_n_by;

    #[test]
    fn selects_highest_first_with_descending_comparator() {
        let values = vec![3.0, 1.0, 4.0, 1.5, 9.0];
        let top = top_n_by(&values, 3, |a: &f64, b: &f64| b.partial_cmp(a).unwrap());

        assert_eq!(top, vec![9.0, 4.0, 3.0]);
    }

    #[test]
    fn n_larger_than_input_returns_everything() {
        let values = vec![2, 1];
        let top = top_n_by(&values, 10, |a, b| a.cmp(b));

        assert_eq!(top, vec![1, 2]);
    }

    #[test]
    fn equal_keys_keep_input_order() {
        let values = vec![(1, 5.0), (2, 5.0), (3, 5.0)];
        let top = top_n_by(&values, 2, |a, b| b.1.partial_cmp(&a.1).unwrap());

        assert_eq!(top, vec![(1, 5.0), (2, 5.0)]);
    }
}
