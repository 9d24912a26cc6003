//! Per-line machine state: resolution from blocks and sequential merge.

use std::collections::BTreeMap;
use std::fmt;

use crate::error::GcodeError;
use crate::modal::{Axis, Group, Mode};
use crate::word::{format_value, Block};

/// The resolved settings of one line, or, after merging, the cumulative
/// machine state valid through that line.
///
/// "Not yet set" is absence from the map; there are no sentinel values. The
/// maps are keyed by the `Ord` of [`Group`] and [`Axis`], so iterating them
/// yields the canonical output order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct State {
    groups: BTreeMap<Group, Mode>,
    axes: BTreeMap<Axis, f64>,
    comment: Option<String>,
}

impl State {
    /// Create an empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve a tokenized block into a per-line state.
    ///
    /// Classifies each word through the modal registry. Two words targeting
    /// the same group, the same axis, or the comment slot are a
    /// [`GcodeError::DuplicateAssignment`]; a G/M code with no registry entry
    /// is a [`GcodeError::UnsupportedCode`]. No cross-field validation
    /// happens here.
    pub fn resolve(block: &Block) -> Result<State, GcodeError> {
        let mut state = State::new();

        for word in &block.words {
            if word.is_comment() {
                if state.comment.is_some() {
                    return Err(GcodeError::DuplicateAssignment {
                        slot: "comment".to_string(),
                        line: block.line,
                    });
                }
                state.comment = word.text.clone();
            } else if word.letter == 'G' || word.letter == 'M' {
                let number = word.code_number();
                let mode = Mode::find(word.letter, number).ok_or_else(|| {
                    GcodeError::UnsupportedCode {
                        code: format!("{}{}", word.letter, number),
                        line: word.line,
                        column: word.column,
                    }
                })?;
                let group = mode.group();
                if state.groups.contains_key(&group) {
                    return Err(GcodeError::DuplicateAssignment {
                        slot: format!("{} group", group),
                        line: block.line,
                    });
                }
                state.groups.insert(group, mode);
            } else {
                let axis = Axis::from_letter(word.letter).ok_or_else(|| {
                    GcodeError::UnsupportedCode {
                        code: format!("{}{}", word.letter, format_value(word.value)),
                        line: word.line,
                        column: word.column,
                    }
                })?;
                if state.axes.contains_key(&axis) {
                    return Err(GcodeError::DuplicateAssignment {
                        slot: format!("axis {}", axis),
                        line: block.line,
                    });
                }
                state.axes.insert(axis, word.value);
            }
        }

        Ok(state)
    }

    /// The active mode for a group, if set.
    pub fn group(&self, group: Group) -> Option<Mode> {
        self.groups.get(&group).copied()
    }

    /// The value of an axis or parameter, if set.
    pub fn axis(&self, axis: Axis) -> Option<f64> {
        self.axes.get(&axis).copied()
    }

    /// Set or overwrite an axis value.
    pub fn set_axis(&mut self, axis: Axis, value: f64) {
        self.axes.insert(axis, value);
    }

    /// The line comment, if any.
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Whether this line sets any of the given axes itself.
    pub fn sets_any(&self, axes: &[Axis]) -> bool {
        axes.iter().any(|axis| self.axes.contains_key(axis))
    }

    /// Whether the state carries no settings at all.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty() && self.axes.is_empty() && self.comment.is_none()
    }

    /// Merge a later line into this running state.
    ///
    /// Every group set in `next` replaces the running mode for that group;
    /// every *persistent* axis set in `next` replaces the running value.
    /// Transient axes and the comment belong to their own line only and are
    /// never carried forward. Must be applied in ascending source-line order:
    /// the operation is deliberately not commutative.
    pub fn merge_from(&mut self, next: &State) {
        for (group, mode) in &next.groups {
            self.groups.insert(*group, *mode);
        }
        for (axis, value) in &next.axes {
            if axis.persistent() {
                self.axes.insert(*axis, *value);
            }
        }
    }
}

impl fmt::Display for State {
    /// Renders the state as one G-code line: set modes in canonical group
    /// order, then set axis values in canonical axis order, then the comment.
    /// Unset fields are omitted entirely, never zero-filled.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let mut sep = |f: &mut fmt::Formatter<'_>| -> fmt::Result {
            if first {
                first = false;
                Ok(())
            } else {
                write!(f, " ")
            }
        };

        for mode in self.groups.values() {
            sep(f)?;
            write!(f, "{}", mode.code())?;
        }
        for (axis, value) in &self.axes {
            sep(f)?;
            write!(f, "{}{}", axis.letter(), format_value(*value))?;
        }
        if let Some(comment) = &self.comment {
            sep(f)?;
            write!(f, "({})", comment)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokenizer::tokenize;

    fn resolve(line: &str) -> Result<State, GcodeError> {
        State::resolve(&tokenize(line, 1).unwrap())
    }

    #[test]
    fn test_resolve_basic_line() {
        let state = resolve("G1 X10 Y-2.5 F120 (FINISH)").unwrap();
        assert_eq!(state.group(Group::Motion), Some(Mode::Linear));
        assert_eq!(state.axis(Axis::X), Some(10.0));
        assert_eq!(state.axis(Axis::Y), Some(-2.5));
        assert_eq!(state.axis(Axis::Feed), Some(120.0));
        assert_eq!(state.comment(), Some("FINISH"));
    }

    #[test]
    fn test_two_groups_on_one_line_is_fine() {
        let state = resolve("G1 G90").unwrap();
        assert_eq!(state.group(Group::Motion), Some(Mode::Linear));
        assert_eq!(state.group(Group::Distance), Some(Mode::Absolute));
    }

    #[test]
    fn test_duplicate_axis_rejected() {
        let err = resolve("X1 X2").unwrap_err();
        assert!(matches!(
            err,
            GcodeError::DuplicateAssignment { ref slot, line: 1 } if slot == "axis X"
        ));
    }

    #[test]
    fn test_duplicate_group_rejected() {
        let err = resolve("G0 G1").unwrap_err();
        assert!(matches!(
            err,
            GcodeError::DuplicateAssignment { ref slot, .. } if slot == "motion group"
        ));
    }

    #[test]
    fn test_duplicate_comment_rejected() {
        let err = resolve("(one) (two)").unwrap_err();
        assert!(matches!(
            err,
            GcodeError::DuplicateAssignment { ref slot, .. } if slot == "comment"
        ));
    }

    #[test]
    fn test_unsupported_code_rejected() {
        let err = resolve("G41 X1").unwrap_err();
        assert!(matches!(
            err,
            GcodeError::UnsupportedCode { ref code, line: 1, column: 1 } if code == "G41"
        ));
    }

    #[test]
    fn test_merge_carries_persistent_and_drops_transient() {
        let mut running = State::new();
        running.merge_from(&resolve("G1 X1 Y2 Z3 F100").unwrap());
        running.merge_from(&resolve("G2 X5 I0.5 J0.5").unwrap());

        assert_eq!(running.group(Group::Motion), Some(Mode::CircularCw));
        assert_eq!(running.axis(Axis::X), Some(5.0));
        assert_eq!(running.axis(Axis::Y), Some(2.0));
        assert_eq!(running.axis(Axis::Z), Some(3.0));
        assert_eq!(running.axis(Axis::Feed), Some(100.0));
        // Arc center offsets never carry forward.
        assert_eq!(running.axis(Axis::I), None);
        assert_eq!(running.axis(Axis::J), None);
    }

    #[test]
    fn test_merge_is_order_dependent() {
        let s1 = resolve("G0 Z5").unwrap();
        let s2 = resolve("G1 Z-1").unwrap();
        let s3 = resolve("Z2").unwrap();

        let mut in_order = State::new();
        for s in [&s1, &s2, &s3] {
            in_order.merge_from(s);
        }

        let mut out_of_order = State::new();
        for s in [&s3, &s2, &s1] {
            out_of_order.merge_from(s);
        }

        assert_eq!(in_order.axis(Axis::Z), Some(2.0));
        assert_eq!(out_of_order.axis(Axis::Z), Some(5.0));
        assert_ne!(in_order, out_of_order);
    }

    #[test]
    fn test_merge_sequence_equivalence_in_order() {
        // Folding [s1, s2, s3] one at a time equals folding s1 with the
        // pre-merged [s2, s3], as long as order is preserved.
        let s1 = resolve("G1 X1 F100").unwrap();
        let s2 = resolve("X2 Z-0.5").unwrap();
        let s3 = resolve("G0 Z5").unwrap();

        let mut stepwise = State::new();
        for s in [&s1, &s2, &s3] {
            stepwise.merge_from(s);
        }

        let mut tail = s2.clone();
        tail.merge_from(&s3);
        let mut grouped = State::new();
        grouped.merge_from(&s1);
        grouped.merge_from(&tail);

        assert_eq!(stepwise, grouped);
    }

    #[test]
    fn test_display_canonical_order() {
        let state = resolve("(SLOT) Y2 X1 M3 G1 F100 N10").unwrap();
        assert_eq!(state.to_string(), "G1 M3 N10 F100 X1 Y2 (SLOT)");
    }

    #[test]
    fn test_display_empty_state() {
        assert_eq!(State::new().to_string(), "");
    }
}
