//! Tip selections and substitution combinations.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::RunnerNo;

/// A tipster's selection for one race: a main runner and an optional substitute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tip {
    pub main: RunnerNo,
    #[serde(default)]
    pub alt: Option<RunnerNo>,
}

impl Tip {
    /// A tip without a substitute.
    pub fn main(main: RunnerNo) -> Self {
        Self { main, alt: None }
    }

    /// A tip with a substitute.
    pub fn with_alt(main: RunnerNo, alt: RunnerNo) -> Self {
        Self {
            main,
            alt: Some(alt),
        }
    }

    /// The runner this tip counts towards in consensus: the substitute if any, else the main.
    pub fn counted_runner(&self) -> RunnerNo {
        self.alt.unwrap_or(self.main)
    }

    /// The main/substitute pair, if a substitute was given.
    pub fn combination(&self) -> Option<SubTipCombination> {
        self.alt.map(|alt| SubTipCombination {
            main: self.main,
            alt,
        })
    }
}

impl fmt::Display for Tip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.alt {
            Some(alt) => write!(f, "{} s{}", self.main, alt),
            None => write!(f, "{}", self.main),
        }
    }
}

/// An ordered main-to-substitute pair. `(5, 2)` and `(2, 5)` are different combinations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubTipCombination {
    pub main: RunnerNo,
    pub alt: RunnerNo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counted_runner_prefers_alt() {
        assert_eq!(Tip::with_alt(5, 2).counted_runner(), 2);
        assert_eq!(Tip::main(7).counted_runner(), 7);
    }

    #[test]
    fn test_combination_is_order_sensitive() {
        let a = Tip::with_alt(5, 2).combination().unwrap();
        let b = Tip::with_alt(2, 5).combination().unwrap();
        assert_ne!(a, b);
        assert!(Tip::main(5).combination().is_none());
    }

    #[test]
    fn test_tip_display() {
        assert_eq!(Tip::main(4).to_string(), "4");
        assert_eq!(Tip::with_alt(4, 11).to_string(), "4 s11");
    }

    #[test]
    fn test_tip_deserialize_null_alt() {
        let tip: Tip = serde_json::from_str(r#"{"main": 3, "alt": null}"#).unwrap();
        assert_eq!(tip, Tip::main(3));

        let tip: Tip = serde_json::from_str(r#"{"main": 3}"#).unwrap();
        assert_eq!(tip, Tip::main(3));
    }
}
