//! TOML rule-table files.
//!
//! ```toml
//! states = ["fluid", "particle"]
//!
//! [[rules]]
//! from = [0, 1, "horizontal"]
//! to = [1, 0, "horizontal"]
//! rate = 0.1
//! label = "left motion"
//! ```
//!
//! Pair states are written as `[tail, head, orientation]` triples. Every
//! rule goes through the same validation as [`RuleTable::new`].

use crate::rule::RuleSpec;
use crate::table::RuleTable;
use celllab_core::{ConfigError, Orientation, PairState, StateDict};
use serde::Deserialize;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TableFile {
    states: Vec<String>,
    #[serde(default)]
    rules: Vec<RuleRecord>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct RuleRecord {
    from: (u8, u8, Orientation),
    to: (u8, u8, Orientation),
    rate: f64,
    #[serde(default)]
    label: String,
}

impl From<RuleRecord> for RuleSpec {
    fn from(r: RuleRecord) -> Self {
        RuleSpec::new(
            PairState::from(r.from),
            PairState::from(r.to),
            r.rate,
            r.label,
        )
    }
}

impl RuleTable {
    /// Parse and validate a rule table written in TOML.
    ///
    /// Syntax and shape errors become [`ConfigError::Parse`]; everything
    /// else is reported exactly as [`RuleTable::new`] would.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let file: TableFile = toml::from_str(text).map_err(|e| ConfigError::Parse {
            detail: e.to_string(),
        })?;
        let states = StateDict::new(file.states)?;
        RuleTable::new(states, file.rules.into_iter().map(RuleSpec::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use celllab_core::NodeState;
    use celllab_core::Orientation::{Horizontal, Vertical};

    const RIVER: &str = r#"
states = ["fluid", "particle"]

[[rules]]
from = [0, 1, "horizontal"]
to = [1, 0, "horizontal"]
rate = 0.1
label = "left motion"

[[rules]]
from = [1, 0, "horizontal"]
to = [0, 1, "horizontal"]
rate = 9.9
label = "right motion"

[[rules]]
from = [0, 1, "vertical"]
to = [1, 0, "vertical"]
rate = 10.55
label = "down motion"

[[rules]]
from = [1, 0, "vertical"]
to = [0, 1, "vertical"]
rate = 9.45
label = "up motion"
"#;

    #[test]
    fn loads_river_table() {
        let t = RuleTable::from_toml_str(RIVER).unwrap();
        assert_eq!(t.len(), 4);
        assert_eq!(t.states().name(NodeState(1)), Some("particle"));
        let up = t.lookup(NodeState(1), NodeState(0), Vertical).unwrap();
        assert_eq!(up.label, "up motion");
        assert_eq!(up.rate, 9.45);
        assert!(t.lookup(NodeState(1), NodeState(1), Horizontal).is_none());
    }

    #[test]
    fn rules_section_is_optional() {
        let t = RuleTable::from_toml_str(r#"states = ["a", "b", "c"]"#).unwrap();
        assert!(t.is_empty());
        assert_eq!(t.states().len(), 3);
    }

    #[test]
    fn label_defaults_to_empty() {
        let t = RuleTable::from_toml_str(
            r#"
states = ["a", "b"]
[[rules]]
from = [0, 1, "vertical"]
to = [1, 1, "vertical"]
rate = 2.0
"#,
        )
        .unwrap();
        let r = t.lookup(NodeState(0), NodeState(1), Vertical).unwrap();
        assert_eq!(r.label, "");
    }

    #[test]
    fn syntax_error_is_parse() {
        let err = RuleTable::from_toml_str("states = [").unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn bad_orientation_is_parse() {
        let err = RuleTable::from_toml_str(
            r#"
states = ["a", "b"]
[[rules]]
from = [0, 1, "diagonal"]
to = [1, 0, "diagonal"]
rate = 1.0
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn validation_errors_pass_through() {
        let err = RuleTable::from_toml_str(
            r#"
states = ["a", "b"]
[[rules]]
from = [0, 1, "horizontal"]
to = [1, 0, "horizontal"]
rate = -3.0
"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::NonPositiveRate { .. }));

        let err = RuleTable::from_toml_str(r#"states = []"#).unwrap_err();
        assert_eq!(err, ConfigError::EmptyStateDict);
    }
}
