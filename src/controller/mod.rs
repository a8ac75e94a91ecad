use std::sync::Arc;

use tracing::{debug, info};

use crate::catalog::{build_categories, CategorySelect};
use crate::loader::{self, DataSource, LoadError};
use crate::model::Dataset;
use crate::table::{self, TableBody};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ControlEvent {
    CategoryChanged(String),
    SearchInput(String),
}

/// Owns the loaded snapshot and the current control values, and keeps the
/// rendered table in sync with them.
#[derive(Clone, Debug)]
pub struct Controller {
    dataset: Arc<Dataset>,
    categories: CategorySelect,
    search: String,
    table: TableBody,
}

impl Controller {
    /// Loads the dataset, then builds the controller. The load is the only
    /// suspension point.
    pub async fn init(source: &DataSource) -> Result<Self, LoadError> {
        let dataset = loader::load_data(source).await?;
        Ok(Self::new(dataset))
    }

    pub fn new(dataset: impl Into<Arc<Dataset>>) -> Self {
        let dataset = dataset.into();
        let mut categories = CategorySelect::new();
        categories.populate(&build_categories(&dataset));
        let table = table::render(&dataset, "", "");
        info!(
            records = dataset.len(),
            categories = categories.options().len(),
            rows = table.len(),
            "controller ready"
        );
        Self {
            dataset,
            categories,
            search: String::new(),
            table,
        }
    }

    /// Applies a control change and re-renders the whole table from the
    /// in-memory snapshot using both current control values.
    pub fn handle(&mut self, event: ControlEvent) -> &TableBody {
        debug!(?event, "control event");
        match event {
            ControlEvent::CategoryChanged(value) => self.categories.select(&value),
            ControlEvent::SearchInput(value) => self.search = value,
        }
        self.rerender()
    }

    pub fn select_next_category(&mut self) -> &TableBody {
        self.categories.select_next();
        self.rerender()
    }

    pub fn select_previous_category(&mut self) -> &TableBody {
        self.categories.select_previous();
        self.rerender()
    }

    fn rerender(&mut self) -> &TableBody {
        self.table = table::render(&self.dataset, self.categories.selected(), &self.search);
        &self.table
    }

    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    pub fn categories(&self) -> &CategorySelect {
        &self.categories
    }

    pub fn category(&self) -> &str {
        self.categories.selected()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn table(&self) -> &TableBody {
        &self.table
    }
}
