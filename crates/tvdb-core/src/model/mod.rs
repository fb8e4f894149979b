//! Entity model for the catalog
//!
//! The hierarchy is ownership-based: a [`Search`] owns its [`Show`]s, a show
//! owns its [`Season`]s, a season its [`Episode`]s. Identifying fields
//! (series id, season and episode numbers) live in each entity's attribute
//! map, so no entity needs a back-reference to its parent.

pub mod actor;
pub mod banner;
pub mod episode;
pub mod search;
pub mod season;
pub mod show;

pub use actor::Actor;
pub use banner::Banner;
pub use episode::Episode;
pub use search::Search;
pub use season::Season;
pub use show::Show;

use std::ops::{Bound, RangeBounds};

/// Clamp a range to `[0, len]` element positions. Out-of-range bounds
/// saturate instead of erroring, so a fully out-of-range slice is empty.
pub(crate) fn clamp_range<R: RangeBounds<usize>>(range: R, len: usize) -> (usize, usize) {
    let start = match range.start_bound() {
        Bound::Included(&s) => s,
        Bound::Excluded(&s) => s.saturating_add(1),
        Bound::Unbounded => 0,
    }
    .min(len);

    let end = match range.end_bound() {
        Bound::Included(&e) => e.saturating_add(1),
        Bound::Excluded(&e) => e,
        Bound::Unbounded => len,
    }
    .min(len);

    (start, end.max(start))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_range() {
        assert_eq!(clamp_range(1..3, 5), (1, 3));
        assert_eq!(clamp_range(.., 5), (0, 5));
        assert_eq!(clamp_range(2.., 5), (2, 5));
        assert_eq!(clamp_range(..=2, 5), (0, 3));
        assert_eq!(clamp_range(4..100, 5), (4, 5));
        assert_eq!(clamp_range(10..20, 5), (5, 5));
        // Inverted after clamping collapses to empty
        assert_eq!(clamp_range(3..1, 5), (3, 3));
    }
}
