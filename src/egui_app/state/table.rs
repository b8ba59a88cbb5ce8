use crate::summary_api::Record;
use crate::summary_api::records::{cell_text, record_matches};

/// Text of the single row shown for an empty table.
pub const PLACEHOLDER_TEXT: &str = "No data";

/// One titled table of summary records with a free-text filter.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DataTableState {
    pub title: String,
    records: Vec<Record>,
    columns: Vec<String>,
    query: String,
    visible: Vec<usize>,
}

impl DataTableState {
    /// Build a table; columns come from the keys of the first record.
    pub fn new(title: impl Into<String>, records: Option<Vec<Record>>) -> Self {
        let records = records.unwrap_or_default();
        let columns = records
            .first()
            .map(|first| first.keys().cloned().collect())
            .unwrap_or_default();
        let visible = (0..records.len()).collect();
        Self {
            title: title.into(),
            records,
            columns,
            query: String::new(),
            visible,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Replace the filter and recompute visible rows from the full record set.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.refilter();
    }

    /// True when the table has no input rows and shows the placeholder.
    pub fn shows_placeholder(&self) -> bool {
        self.records.is_empty()
    }

    /// Records passing the current filter, in input order.
    pub fn visible_records(&self) -> impl Iterator<Item = &Record> + '_ {
        self.visible.iter().filter_map(|&index| self.records.get(index))
    }

    /// Rows the renderer draws, counting the placeholder row.
    pub fn rendered_row_count(&self) -> usize {
        if self.shows_placeholder() {
            1
        } else {
            self.visible.len()
        }
    }

    /// Cell texts of the `row`-th visible record, one per column.
    pub fn row_cells(&self, row: usize) -> Option<Vec<String>> {
        let record = self.records.get(*self.visible.get(row)?)?;
        Some(
            self.columns
                .iter()
                .map(|column| cell_text(record, column))
                .collect(),
        )
    }

    fn refilter(&mut self) {
        let needle = self.query.to_lowercase();
        self.visible = if needle.is_empty() {
            (0..self.records.len()).collect()
        } else {
            self.records
                .iter()
                .enumerate()
                .filter(|(_, record)| record_matches(record, &needle))
                .map(|(index, _)| index)
                .collect()
        };
    }
}
