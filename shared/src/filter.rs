use std::borrow::Cow;

use crate::{Movement, PeriodValue};

/// Month/year filter over the movement list. A missing field does not constrain.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub month: Option<PeriodValue>,
    pub year: Option<PeriodValue>,
}

impl FilterCriteria {
    pub fn new(month: Option<PeriodValue>, year: Option<PeriodValue>) -> Self {
        Self { month, year }
    }

    /// Build criteria from the raw text of the filter inputs.
    ///
    /// Blank inputs are left unset. Numeric text becomes a number, anything
    /// else is kept as text and will match nothing.
    pub fn from_inputs(month: &str, year: &str) -> Self {
        Self {
            month: parse_input(month),
            year: parse_input(year),
        }
    }

    /// True when no criterion would constrain the list.
    pub fn is_empty(&self) -> bool {
        !is_set(&self.month) && !is_set(&self.year)
    }

    pub fn matches(&self, movement: &Movement) -> bool {
        matches_field(&self.month, &movement.month) && matches_field(&self.year, &movement.year)
    }
}

/// Stable subset of `movements` matching every set criterion.
///
/// With no criterion set, the input is handed back as is.
pub fn filter_movements<'a>(movements: &'a [Movement], criteria: &FilterCriteria) -> Cow<'a, [Movement]> {
    if criteria.is_empty() {
        return Cow::Borrowed(movements);
    }

    Cow::Owned(
        movements
            .iter()
            .filter(|movement| criteria.matches(movement))
            .cloned()
            .collect(),
    )
}

fn is_set(criterion: &Option<PeriodValue>) -> bool {
    criterion.as_ref().map_or(false, PeriodValue::is_set)
}

// NaN never compares equal, so an uncoercible criterion excludes everything.
fn matches_field(criterion: &Option<PeriodValue>, value: &PeriodValue) -> bool {
    match criterion {
        Some(wanted) if wanted.is_set() => wanted.as_number() == value.as_number(),
        _ => true,
    }
}

fn parse_input(raw: &str) -> Option<PeriodValue> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse::<f64>() {
        Ok(n) if n.is_finite() => Some(PeriodValue::Number(n)),
        _ => Some(PeriodValue::Text(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::movement;

    fn descriptions(movements: &[Movement]) -> Vec<&str> {
        movements.iter().map(|m| m.description.as_str()).collect()
    }

    #[test]
    fn test_empty_criteria_returns_input() {
        let movements = vec![movement(3, 2024, "a"), movement(4, 2023, "b")];

        let filtered = filter_movements(&movements, &FilterCriteria::default());
        assert!(matches!(filtered, Cow::Borrowed(_)));
        assert_eq!(&*filtered, movements.as_slice());
    }

    #[test]
    fn test_unset_values_count_as_empty() {
        let movements = vec![movement(3, 2024, "a"), movement(4, 2023, "b")];
        let criteria = FilterCriteria::new(Some(PeriodValue::from(0)), Some(PeriodValue::from("")));

        assert!(criteria.is_empty());
        assert_eq!(filter_movements(&movements, &criteria).len(), 2);
    }

    #[test]
    fn test_month_filter_coerces_text() {
        let movements = vec![movement(3, 2024, "first"), movement(4, 2024, "second"), movement("3", 2024, "third")];
        let criteria = FilterCriteria::new(Some(PeriodValue::from(3)), None);

        let filtered = filter_movements(&movements, &criteria);
        assert_eq!(descriptions(&filtered), vec!["first", "third"]);
    }

    #[test]
    fn test_month_and_year_must_both_match() {
        let movements = vec![
            movement(3, 2024, "both"),
            movement(3, 2023, "month only"),
            movement(5, 2024, "year only"),
            movement("3", "2024", "both as text"),
        ];
        let criteria = FilterCriteria::new(Some(PeriodValue::from(3)), Some(PeriodValue::from(2024)));

        let filtered = filter_movements(&movements, &criteria);
        assert_eq!(descriptions(&filtered), vec!["both", "both as text"]);
    }

    #[test]
    fn test_year_only() {
        let movements = vec![movement(1, 2023, "a"), movement(2, 2024, "b"), movement(3, 2024, "c")];
        let criteria = FilterCriteria::new(None, Some(PeriodValue::from("2024")));

        assert_eq!(descriptions(&filter_movements(&movements, &criteria)), vec!["b", "c"]);
    }

    #[test]
    fn test_uncoercible_criterion_matches_nothing() {
        let movements = vec![movement(3, 2024, "a"), movement("abc", 2024, "b")];
        let criteria = FilterCriteria::new(Some(PeriodValue::from("abc")), None);

        assert!(filter_movements(&movements, &criteria).is_empty());
    }

    #[test]
    fn test_filter_is_repeatable() {
        let movements = vec![movement(3, 2024, "a"), movement(4, 2024, "b")];
        let criteria = FilterCriteria::new(Some(PeriodValue::from(4)), None);

        let first = filter_movements(&movements, &criteria).into_owned();
        let second = filter_movements(&movements, &criteria).into_owned();
        assert_eq!(first, second);
        assert_eq!(movements.len(), 2);
    }

    #[test]
    fn test_from_inputs() {
        let criteria = FilterCriteria::from_inputs(" 3 ", "");
        assert_eq!(criteria.month, Some(PeriodValue::Number(3.0)));
        assert_eq!(criteria.year, None);

        let criteria = FilterCriteria::from_inputs("mar", "2024");
        assert_eq!(criteria.month, Some(PeriodValue::Text("mar".to_string())));
        assert_eq!(criteria.year, Some(PeriodValue::Number(2024.0)));

        assert!(FilterCriteria::from_inputs("", "  ").is_empty());
    }
}
