//! JSON table catalog: the CLI's stand-in for an external data loader.
//!
//! ```json
//! { "tables": [
//!     { "name": "states",
//!       "columns": [ { "name": "name", "type": "string", "values": ["Minnesota", "South Dakota"] } ] },
//!     { "name": "cities",
//!       "columns": [ { "name": "name", "type": "string", "values": ["Minneapolis", "Pierre"] } ],
//!       "associations": [ { "target": "states", "mapping": [0, 1] } ] }
//! ] }
//! ```
//!
//! Tables are built in file order; an association may only target a table
//! defined earlier, which keeps the association graph acyclic.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use tabulon_core::types::Column;
use tabulon_core::Table;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("reading catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("parsing catalog: {0}")]
    Json(#[from] serde_json::Error),

    #[error("table '{0}' is defined twice")]
    DuplicateTable(String),

    #[error("table '{table}' associates to '{target}', which is not defined before it")]
    UnknownTarget { table: String, target: String },

    #[error("no table named '{name}' (available: {available})")]
    UnknownTable { name: String, available: String },

    #[error("table '{table}': {source}")]
    Table {
        table: String,
        #[source]
        source: tabulon_core::Error,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogDef {
    pub tables: Vec<TableDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableDef {
    pub name: String,
    pub columns: Vec<ColumnDef>,
    #[serde(default)]
    pub associations: Vec<AssociationDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnDef {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(flatten)]
    pub column: Column,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssociationDef {
    pub target: String,
    /// `null` entries mark rows without a target.
    pub mapping: Vec<Option<usize>>,
}

#[derive(Debug, Default)]
pub struct Catalog {
    tables: BTreeMap<String, Arc<Table>>,
}

impl Catalog {
    pub fn load(path: &Path) -> Result<Catalog, CatalogError> {
        let src = fs::read_to_string(path)?;
        Catalog::from_json(&src)
    }

    pub fn from_json(src: &str) -> Result<Catalog, CatalogError> {
        let def: CatalogDef = serde_json::from_str(src)?;
        Catalog::build(def)
    }

    pub fn build(def: CatalogDef) -> Result<Catalog, CatalogError> {
        let mut catalog = Catalog::default();
        for table_def in def.tables {
            if catalog.tables.contains_key(&table_def.name) {
                return Err(CatalogError::DuplicateTable(table_def.name));
            }
            let table = catalog.build_table(&table_def)?;
            tracing::debug!(
                table = %table_def.name,
                rows = table.row_count(),
                columns = table.columns().len(),
                associations = table.associations().len(),
                "loaded table"
            );
            catalog.tables.insert(table_def.name, Arc::new(table));
        }
        Ok(catalog)
    }

    fn build_table(&self, def: &TableDef) -> Result<Table, CatalogError> {
        let wrap = |source| CatalogError::Table {
            table: def.name.clone(),
            source,
        };
        let mut builder = Table::builder();
        for col in &def.columns {
            builder = match &col.name {
                Some(name) => builder.named_column(name.clone(), col.column.clone()),
                None => builder.column(col.column.clone()),
            };
        }
        let mut table = builder.build().map_err(wrap)?;
        for assoc in &def.associations {
            let target = self
                .tables
                .get(&assoc.target)
                .ok_or_else(|| CatalogError::UnknownTarget {
                    table: def.name.clone(),
                    target: assoc.target.clone(),
                })?;
            table
                .associate_to_partial(Arc::clone(target), assoc.mapping.clone())
                .map_err(wrap)?;
        }
        Ok(table)
    }

    pub fn table(&self, name: &str) -> Result<&Arc<Table>, CatalogError> {
        self.tables
            .get(name)
            .ok_or_else(|| CatalogError::UnknownTable {
                name: name.to_string(),
                available: self.names().collect::<Vec<_>>().join(", "),
            })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}
