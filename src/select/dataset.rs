//! Datasets
//!
//! A selectable dataset: a flat list or a two-dimensional table of
//! primitive values, with coarse type detection and a generic selection
//! entry point dispatching on the data shape.

use crate::error::{Error, Result};

use super::list::select_from_list;
use super::table::select_table_rows;
use super::value::{Value, IS_ANY, IS_LIST, IS_TABLE};

/// The data behind a dataset.
#[derive(Debug, Clone, PartialEq)]
pub enum Data {
    List(Vec<Value>),
    Table(Vec<Vec<Value>>),
}

/// A selectable dataset with an optional header.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub header: Vec<String>,
    pub data: Data,
}

/// Outcome of a confirmed selection.
#[derive(Debug, Clone, PartialEq)]
pub enum Selection {
    Item(String),
    Row(Vec<Value>),
}

impl Dataset {
    pub fn from_list<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self {
            header: Vec::new(),
            data: Data::List(values.into_iter().map(Into::into).collect()),
        }
    }

    pub fn from_table(rows: Vec<Vec<Value>>) -> Self {
        Self {
            header: Vec::new(),
            data: Data::Table(rows),
        }
    }

    pub fn with_header<I, S>(mut self, header: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.header = header.into_iter().map(Into::into).collect();
        self
    }

    pub fn is_list(&self) -> bool {
        matches!(self.data, Data::List(_))
    }

    pub fn is_table(&self) -> bool {
        matches!(self.data, Data::Table(_))
    }

    /// Folded type information: the element tag bits, IS_ANY when two or
    /// more element types are present, plus the IS_TABLE shape bit.
    pub fn type_mask(&self) -> u8 {
        let mut mask = match &self.data {
            Data::List(values) => values.iter().fold(IS_LIST, |m, v| m | v.tag()),
            Data::Table(rows) => rows
                .iter()
                .flatten()
                .fold(IS_TABLE, |m, v| m | v.tag()),
        };
        let tags = mask & IS_ANY;
        if tags & tags.wrapping_sub(1) != 0 {
            // two or more element types detected
            mask |= IS_ANY;
        }
        mask
    }

    /// Per-element tags for a list dataset.
    pub fn type_list(&self) -> Result<Vec<u8>> {
        match &self.data {
            Data::List(values) => Ok(values.iter().map(Value::tag).collect()),
            Data::Table(_) => Err(Error::UnsupportedValue(
                "dataset is not a list, but a table".to_string(),
            )),
        }
    }

    /// Per-cell tags for a table dataset.
    pub fn type_table(&self) -> Result<Vec<Vec<u8>>> {
        match &self.data {
            Data::Table(rows) => Ok(rows
                .iter()
                .map(|row| row.iter().map(Value::tag).collect())
                .collect()),
            Data::List(_) => Err(Error::UnsupportedValue(
                "dataset is not a table, but a list".to_string(),
            )),
        }
    }

    /// Runs an interactive selection appropriate for the data shape.
    /// Returns `None` when the user quits without choosing.
    pub fn select(&self) -> Result<Option<Selection>> {
        match &self.data {
            Data::List(values) => {
                let items = values
                    .iter()
                    .map(Value::render)
                    .collect::<Result<Vec<_>>>()?;
                Ok(select_from_list(&items)?.map(Selection::Item))
            }
            Data::Table(rows) => {
                Ok(select_table_rows(rows, &self.header)?.map(Selection::Row))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::value::{IS_BOOL, IS_FLOAT, IS_INT, IS_STRING};
    use super::*;

    #[test]
    fn test_string_list_mask() {
        let ds = Dataset::from_list(["a", "b", "c"]);
        assert!(ds.is_list());
        assert_eq!(ds.type_mask(), IS_LIST | IS_STRING);
    }

    #[test]
    fn test_uniform_list_keeps_single_tag() {
        let ds = Dataset::from_list([1i64, 2, 3]);
        assert_eq!(ds.type_mask(), IS_INT);
    }

    #[test]
    fn test_mixed_table_folds_to_any() {
        let ds = Dataset::from_table(vec![
            vec![Value::from("AGI"), Value::from(3i64), Value::from(true), Value::from(3.58f64)],
            vec![Value::from("BGM"), Value::from(2i64), Value::from(true), Value::from(0.9f64)],
        ]);
        assert!(ds.is_table());
        let mask = ds.type_mask();
        assert_eq!(mask & IS_TABLE, IS_TABLE);
        assert_eq!(mask & IS_ANY, IS_ANY);
    }

    #[test]
    fn test_type_list_and_table_shape_checks() {
        let list = Dataset::from_list(["a"]);
        assert_eq!(list.type_list().unwrap(), vec![IS_STRING]);
        assert!(list.type_table().is_err());

        let table = Dataset::from_table(vec![vec![Value::from(1.0f64), Value::from(false)]]);
        assert_eq!(table.type_table().unwrap(), vec![vec![IS_FLOAT, IS_BOOL]]);
        assert!(table.type_list().is_err());
    }
}
