//! Click-origin analytics
//!
//! Turns a link's referrer map into a ranked, renderable sequence.

/// Ranks referrer entries by click count, descending.
///
/// Pure function: no side effects, no network access. The sort is stable,
/// so entries with equal counts keep the relative order they had in the
/// input; given the same traversal order of the underlying map the result
/// is always the same.
///
/// # Examples
///
/// ```
/// use trimlink::links::analytics::rank;
///
/// let entries = vec![
///     ("google".to_string(), 5),
///     ("direct".to_string(), 5),
///     ("twitter".to_string(), 2),
/// ];
/// let ranked = rank(&entries);
/// assert_eq!(ranked[0].0, "google");
/// assert_eq!(ranked[1].0, "direct");
/// assert_eq!(ranked[2].0, "twitter");
/// ```
pub fn rank(entries: &[(String, u64)]) -> Vec<(String, u64)> {
    let mut ranked = entries.to_vec();
    // sort_by is stable: ties keep their input order.
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
}
