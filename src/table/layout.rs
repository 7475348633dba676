use crate::table::TableError;
use std::collections::HashMap;

/// Allocates zero-based indices for a sequence of named column groups and
/// yields the consistent name map / name order pair a
/// [`Table`](crate::table::Table) is built from.
///
/// Columns are only ever appended, so a gap in the index range is
/// unrepresentable; duplicate names are rejected at registration time.
#[derive(Debug, Default)]
pub struct ColumnLayout {
    indexes: HashMap<String, usize>,
    order: Vec<String>,
}

impl ColumnLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `name` at the next free index and returns that index.
    pub fn push(&mut self, name: &str) -> Result<usize, TableError> {
        if self.indexes.contains_key(name) {
            return Err(TableError::DuplicateColumn(name.to_owned()));
        }
        let index = self.order.len();
        self.indexes.insert(name.to_owned(), index);
        self.order.push(name.to_owned());
        Ok(index)
    }

    /// Registers every name in `names`, in order.
    pub fn extend<'a, I>(&mut self, names: I) -> Result<(), TableError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        for name in names {
            self.push(name)?;
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Consumes the builder into its name map and index-ordered name list.
    pub(crate) fn into_parts(self) -> (HashMap<String, usize>, Vec<String>) {
        (self.indexes, self.order)
    }
}
