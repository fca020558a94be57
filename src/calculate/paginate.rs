//! "Load more" pagination over a ranked leaderboard.

use serde::Serialize;

use super::CalculateError;

/// Rows visible before any "load more".
pub const INITIAL_ROWS: usize = 6;

/// Rows added per "load more".
pub const ROWS_PER_LOAD: usize = 10;

/// Prefix-window paginator. Built once at startup from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    initial_rows: usize,
    rows_per_load: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self {
            initial_rows: INITIAL_ROWS,
            rows_per_load: ROWS_PER_LOAD,
        }
    }
}

impl Paginator {
    /// Create a paginator, rejecting zero-sized pages.
    pub fn new(initial_rows: usize, rows_per_load: usize) -> Result<Self, CalculateError> {
        if initial_rows == 0 {
            return Err(CalculateError::InvalidPageSize(
                "initial rows must be greater than 0".to_string(),
            ));
        }
        if rows_per_load == 0 {
            return Err(CalculateError::InvalidPageSize(
                "rows per load must be greater than 0".to_string(),
            ));
        }

        Ok(Self {
            initial_rows,
            rows_per_load,
        })
    }

    pub fn initial_rows(&self) -> usize {
        self.initial_rows
    }

    pub fn rows_per_load(&self) -> usize {
        self.rows_per_load
    }

    /// Requested row count after `loads` presses of "load more".
    pub fn loaded_after(&self, loads: usize) -> usize {
        self.initial_rows
            .saturating_add(loads.saturating_mul(self.rows_per_load))
    }

    /// Requested row count after one more "load more" from `loaded`.
    pub fn load_more(&self, loaded: usize) -> usize {
        loaded.max(self.initial_rows).saturating_add(self.rows_per_load)
    }

    /// Take the visible prefix of `ranked`. `loaded` is the row count the client has
    /// asked for; it never drops below the initial window and is clamped to the length.
    pub fn paginate<T: Clone>(&self, ranked: &[T], loaded: usize) -> Page<T> {
        let total_count = ranked.len();
        let visible_count = loaded.max(self.initial_rows).min(total_count);

        Page {
            visible: ranked[..visible_count].to_vec(),
            has_more: visible_count < total_count,
            remaining_count: total_count - visible_count,
            visible_count,
            total_count,
        }
    }
}

/// The visible prefix of a ranked sequence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub visible: Vec<T>,
    pub has_more: bool,
    pub remaining_count: usize,
    pub visible_count: usize,
    pub total_count: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let p = Paginator::default();
        assert_eq!(p.initial_rows(), 6);
        assert_eq!(p.rows_per_load(), 10);
    }

    #[test]
    fn test_rejects_zero_sizes() {
        assert!(Paginator::new(0, 10).is_err());
        assert!(Paginator::new(6, 0).is_err());
        assert!(Paginator::new(1, 1).is_ok());
    }

    #[test]
    fn test_initial_window() {
        let ranked: Vec<u32> = (1..=20).collect();
        let page = Paginator::default().paginate(&ranked, 0);

        assert_eq!(page.visible, vec![1, 2, 3, 4, 5, 6]);
        assert!(page.has_more);
        assert_eq!(page.remaining_count, 14);
        assert_eq!(page.total_count, 20);
    }

    #[test]
    fn test_load_more_clamps_to_length() {
        let p = Paginator::default();
        let ranked: Vec<u32> = (1..=20).collect();

        let loaded = p.load_more(6);
        assert_eq!(loaded, 16);
        let page = p.paginate(&ranked, loaded);
        assert_eq!(page.visible_count, 16);
        assert_eq!(page.remaining_count, 4);

        let page = p.paginate(&ranked, p.load_more(loaded));
        assert_eq!(page.visible_count, 20);
        assert!(!page.has_more);
        assert_eq!(page.remaining_count, 0);
    }

    #[test]
    fn test_empty_sequence() {
        let page = Paginator::default().paginate::<u32>(&[], 6);
        assert!(page.visible.is_empty());
        assert!(!page.has_more);
        assert_eq!(page.remaining_count, 0);
    }

    #[test]
    fn test_shorter_than_initial_window() {
        let ranked = vec!["a", "b", "c"];
        let page = Paginator::default().paginate(&ranked, 6);
        assert_eq!(page.visible_count, 3);
        assert!(!page.has_more);
    }

    #[test]
    fn test_pagination_monotonic_and_stable() {
        let p = Paginator::default();
        let ranked: Vec<u32> = (1..=45).collect();

        let mut previous: Vec<u32> = Vec::new();
        for loads in 0..6 {
            let page = p.paginate(&ranked, p.loaded_after(loads));
            assert!(previous.len() <= page.visible.len());
            assert_eq!(&page.visible[..previous.len()], previous.as_slice());
            assert_eq!(page.visible_count + page.remaining_count, page.total_count);
            previous = page.visible;
        }
        assert_eq!(previous.len(), 45);
    }
}
