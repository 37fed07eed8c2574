//! Client-side column sorting over the loaded page.

use std::cmp::Ordering;

/// Value of a cell as seen by the sorter.
#[derive(Clone, Debug, PartialEq)]
pub enum SortValue {
    Number(f64),
    Text(String),
    Missing,
}

impl SortValue {
    fn text(&self) -> String {
        match self {
            SortValue::Number(n) => n.to_string(),
            SortValue::Text(text) => text.to_lowercase(),
            SortValue::Missing => String::new(),
        }
    }
}

impl From<&str> for SortValue {
    fn from(value: &str) -> Self {
        SortValue::Text(value.to_string())
    }
}

impl From<String> for SortValue {
    fn from(value: String) -> Self {
        SortValue::Text(value)
    }
}

impl From<f64> for SortValue {
    fn from(value: f64) -> Self {
        SortValue::Number(value)
    }
}

impl From<i64> for SortValue {
    fn from(value: i64) -> Self {
        SortValue::Number(value as f64)
    }
}

impl From<bool> for SortValue {
    fn from(value: bool) -> Self {
        SortValue::Number(if value { 1.0 } else { 0.0 })
    }
}

impl<T: Into<SortValue>> From<Option<T>> for SortValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(SortValue::Missing, Into::into)
    }
}

/// Numbers compare numerically; anything else compares as case-folded text.
pub fn compare(a: &SortValue, b: &SortValue) -> Ordering {
    match (a, b) {
        (SortValue::Number(x), SortValue::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        _ => a.text().cmp(&b.text()),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SortState {
    pub key: &'static str,
    pub direction: SortDirection,
}

impl SortState {
    /// Next state after clicking `key`: a new column starts ascending, the
    /// current column flips.
    pub fn toggle(current: Option<SortState>, key: &'static str) -> SortState {
        match current {
            Some(state) if state.key == key => SortState {
                key,
                direction: match state.direction {
                    SortDirection::Asc => SortDirection::Desc,
                    SortDirection::Desc => SortDirection::Asc,
                },
            },
            _ => SortState {
                key,
                direction: SortDirection::Asc,
            },
        }
    }
}

/// Stable sort of `rows` by the value `value_of` extracts.
pub fn sort_rows<R>(rows: &mut [R], direction: SortDirection, value_of: impl Fn(&R) -> SortValue) {
    rows.sort_by(|a, b| {
        let ordering = compare(&value_of(a), &value_of(b));
        match direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_sort_numerically() {
        let mut rows = vec![3.0, 1.0, 2.0];
        sort_rows(&mut rows, SortDirection::Asc, |n| SortValue::Number(*n));
        assert_eq!(rows, vec![1.0, 2.0, 3.0]);

        sort_rows(&mut rows, SortDirection::Desc, |n| SortValue::Number(*n));
        assert_eq!(rows, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn mixed_values_fall_back_to_text() {
        let mut rows = vec!["beta", "Alpha", "10", "gamma"];
        sort_rows(&mut rows, SortDirection::Asc, |s| SortValue::from(*s));
        assert_eq!(rows, vec!["10", "Alpha", "beta", "gamma"]);
    }

    #[test]
    fn toggling_cycles_between_directions() {
        let first = SortState::toggle(None, "tip");
        assert_eq!(first.direction, SortDirection::Asc);

        let second = SortState::toggle(Some(first), "tip");
        assert_eq!(second.direction, SortDirection::Desc);

        let third = SortState::toggle(Some(second), "tip");
        assert_eq!(third.direction, SortDirection::Asc);

        let other = SortState::toggle(Some(third), "name");
        assert_eq!(
            other,
            SortState {
                key: "name",
                direction: SortDirection::Asc
            }
        );
    }

    #[test]
    fn missing_sorts_first() {
        assert_eq!(
            compare(&SortValue::Missing, &SortValue::from("a")),
            Ordering::Less
        );
    }
}
