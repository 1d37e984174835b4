//! # Table Exporter Actor
//!
//! This module provides the implementation of the Table Exporter Actor.

use std::io::Write;

use anyhow::Context;
use csv::WriterBuilder;
use log::debug;
use serde::Serialize;

use crate::{
    model::{ColumnType, Table},
    Result,
};

/// One line of a table schema export.
#[derive(Debug, Serialize)]
struct ColumnSchema<'a> {
    name: &'a str,
    #[serde(rename = "type")]
    column_type: ColumnType,
}

/// The table exporter actor.
pub struct TableExporter {
    /// The table to export.
    table: Table,

    /// A Write interface to export the CSV to
    writer: Box<dyn Write + Sync + Send>,
}

impl TableExporter {
    /// Create a new table exporter actor.
    pub fn new(table: Table, writer: Box<dyn Write + Sync + Send>) -> Self {
        Self { table, writer }
    }

    /// Run the table exporter actor.
    /// The actor writes the header line then every row, missing cells are
    /// written as empty fields.
    pub fn run(self) -> Result<()> {
        debug!("Table Exporter Actor started");

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(self.writer);
        writer
            .write_record(self.table.column_names())
            .context("Could not write the header line.")?;
        for row in self.table.rows() {
            writer.serialize(row)?;
        }

        writer.flush()?;

        debug!("Table Exporter Actor stopped");

        Ok(())
    }

    /// Write the table schema instead of its content: one `name,type` line per
    /// column.
    pub fn run_schema(self) -> Result<()> {
        debug!("Table Exporter Actor started (schema)");

        let mut writer = csv::Writer::from_writer(self.writer);
        for column in self.table.columns() {
            writer.serialize(ColumnSchema {
                name: column.name(),
                column_type: column.column_type(),
            })?;
        }

        writer.flush()?;

        debug!("Table Exporter Actor stopped");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::model::LoaderOptions;

    /// A writer keeping its output readable after the exporter dropped it.
    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().write(buf)
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn table(data: &str) -> Table {
        Table::from_reader(data.as_bytes(), &LoaderOptions::default()).unwrap()
    }

    #[test]
    fn test_table_exporter_actor() {
        let buffer = SharedBuffer::default();
        let exporter = TableExporter::new(
            table("id,name,lat,open\n1,\"Limbe, Market\",-15.8115,true\n2,,NA,false\n"),
            Box::new(buffer.clone()),
        );

        exporter.run().unwrap();

        assert_eq!(
            buffer.contents(),
            "id,name,lat,open\n1,\"Limbe, Market\",-15.8115,true\n2,,,false\n"
        );
    }

    #[test]
    fn test_exported_table_reloads() {
        let original = crate::load_skips().unwrap();
        let buffer = SharedBuffer::default();

        TableExporter::new(original.clone(), Box::new(buffer.clone()))
            .run()
            .unwrap();

        assert_eq!(table(&buffer.contents()), original);
    }

    #[test]
    fn test_schema_export() {
        let buffer = SharedBuffer::default();
        let exporter = TableExporter::new(
            table("id,name,lat,open\n1,Soche,-15.8,true\n"),
            Box::new(buffer.clone()),
        );

        exporter.run_schema().unwrap();

        assert_eq!(
            buffer.contents(),
            "name,type\nid,integer\nname,text\nlat,float\nopen,boolean\n"
        );
    }
}
