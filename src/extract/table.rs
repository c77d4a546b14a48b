//! The rectangular trial table.
//!
//! Columns are stored unordered; the output order (`trial` first, then the
//! remaining names in lexicographic order) is derived on demand by
//! `column_order`.

use std::collections::HashMap;

use super::error::ExtractError;

/// Name of the synthetic trial index column.
pub const TRIAL_COLUMN: &str = "trial";

/// Named integer columns, all of length `n_trials`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialTable {
    columns: HashMap<String, Vec<i64>>,
    n_trials: usize,
}

impl TrialTable {
    /// Build the table from accumulated columns of varying length.
    ///
    /// - `n_max` is the longest column (fails when there are no columns)
    /// - `trial` is set to `0..n_max`, replacing any input column of that name
    /// - columns that never received a value are dropped
    /// - every remaining column is right-padded with `0` to `n_max`
    pub fn from_accumulated(mut columns: HashMap<String, Vec<i64>>) -> Result<Self, ExtractError> {
        let n_trials = columns
            .values()
            .map(Vec::len)
            .max()
            .ok_or(ExtractError::EmptyInput)?;

        columns.insert(TRIAL_COLUMN.to_string(), (0..n_trials as i64).collect());
        columns.retain(|name, values| name == TRIAL_COLUMN || !values.is_empty());
        for values in columns.values_mut() {
            values.resize(n_trials, 0);
        }

        Ok(Self { columns, n_trials })
    }

    /// `n_max`: number of rows in every column.
    pub fn n_trials(&self) -> usize {
        self.n_trials
    }

    pub fn n_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn column(&self, name: &str) -> Option<&[i64]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    /// Column names in output order.
    pub fn column_names(&self) -> Vec<&str> {
        column_order(self.columns.keys().map(String::as_str))
    }

    /// `(name, values)` pairs in output order.
    pub fn ordered_columns(&self) -> Vec<(&str, &[i64])> {
        self.column_names()
            .into_iter()
            .filter_map(|name| self.column(name).map(|values| (name, values)))
            .collect()
    }
}

/// `trial` first, then the rest in ascending lexicographic order.
pub fn column_order<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut has_trial = false;
    let mut rest: Vec<&str> = names
        .into_iter()
        .filter(|name| {
            let is_trial = *name == TRIAL_COLUMN;
            has_trial |= is_trial;
            !is_trial
        })
        .collect();
    rest.sort_unstable();
    rest.dedup();

    let mut out = Vec::with_capacity(rest.len() + 1);
    if has_trial {
        out.push(TRIAL_COLUMN);
    }
    out.extend(rest);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn accumulated(pairs: &[(&str, &[i64])]) -> HashMap<String, Vec<i64>> {
        pairs
            .iter()
            .map(|(name, values)| (name.to_string(), values.to_vec()))
            .collect()
    }

    #[test]
    fn pads_to_longest_and_adds_trial() {
        let table =
            TrialTable::from_accumulated(accumulated(&[("b", &[1, 2, 3]), ("a", &[4])])).unwrap();

        assert_eq!(table.n_trials(), 3);
        assert_eq!(table.column("trial"), Some(&[0, 1, 2][..]));
        assert_eq!(table.column("a"), Some(&[4, 0, 0][..]));
        assert_eq!(table.column("b"), Some(&[1, 2, 3][..]));
        assert_eq!(table.column_names(), vec!["trial", "a", "b"]);
    }

    #[test]
    fn drops_columns_without_values() {
        let table = TrialTable::from_accumulated(accumulated(&[("empty", &[]), ("x", &[9])])).unwrap();

        assert!(table.column("empty").is_none());
        assert_eq!(table.column_names(), vec!["trial", "x"]);
    }

    #[test]
    fn keeps_trial_even_when_every_column_is_empty() {
        let table = TrialTable::from_accumulated(accumulated(&[("a", &[]), ("b", &[])])).unwrap();

        assert_eq!(table.n_trials(), 0);
        assert_eq!(table.column_names(), vec!["trial"]);
        assert_eq!(table.column("trial"), Some(&[] as &[i64]));
    }

    #[test]
    fn no_columns_is_empty_input() {
        let err = TrialTable::from_accumulated(HashMap::new()).unwrap_err();
        assert_eq!(err, ExtractError::EmptyInput);
    }

    #[test]
    fn input_trial_column_is_replaced_by_index() {
        let table =
            TrialTable::from_accumulated(accumulated(&[("trial", &[7, 7, 7, 7]), ("a", &[1])])).unwrap();

        assert_eq!(table.n_trials(), 4);
        assert_eq!(table.column("trial"), Some(&[0, 1, 2, 3][..]));
    }

    #[test]
    fn order_pins_trial_and_sorts_the_rest() {
        let order = column_order(["RT-MT 1", "trial", "RT 1", "Angle", "RT 2"]);
        assert_eq!(order, vec!["trial", "Angle", "RT 1", "RT 2", "RT-MT 1"]);
    }

    #[test]
    fn ordered_columns_are_equal_length() {
        let table = TrialTable::from_accumulated(accumulated(&[
            ("z", &[1]),
            ("m", &[1, 2, 3, 4, 5]),
            ("a", &[1, 2]),
        ]))
        .unwrap();

        for (_, values) in table.ordered_columns() {
            assert_eq!(values.len(), table.n_trials());
        }
    }
}
