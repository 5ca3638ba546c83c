//! CSV reports.
//!
//! A report is a serializable row type. Register it once with [`Reports::add_report`], which
//! opens `<directory>/<file_prefix><short_name>.csv`, then send rows with
//! [`Reports::send_report`]. Each row is flushed as soon as it is written so a report is
//! readable while the simulation is still running.

use std::any::TypeId;
use std::fs::{create_dir_all, File};
use std::path::PathBuf;

use csv::Writer;
use log::trace;

use crate::error::OutbreakError;
use crate::hashing::HashMap;

pub trait Report: 'static {
    // Serializes the data with the correct writer
    fn serialize(&self, writer: &mut Writer<File>) -> Result<(), csv::Error>;
}

/// Use this macro to define a unique report type
#[macro_export]
macro_rules! define_report {
    ($name:ident) => {
        impl $crate::report::Report for $name {
            fn serialize(
                &self,
                writer: &mut $crate::csv::Writer<std::fs::File>,
            ) -> Result<(), $crate::csv::Error> {
                writer.serialize(self)
            }
        }
    };
}
pub use define_report;

/// Where report files go and whether existing files may be replaced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    pub directory: PathBuf,
    pub file_prefix: String,
    pub overwrite: bool,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            directory: PathBuf::from("."),
            file_prefix: String::new(),
            overwrite: false,
        }
    }
}

impl ReportOptions {
    pub fn directory(&mut self, directory: PathBuf) -> &mut Self {
        self.directory = directory;
        self
    }

    pub fn file_prefix(&mut self, file_prefix: String) -> &mut Self {
        self.file_prefix = file_prefix;
        self
    }

    pub fn overwrite(&mut self, overwrite: bool) -> &mut Self {
        self.overwrite = overwrite;
        self
    }

    #[must_use]
    pub fn path_for(&self, short_name: &str) -> PathBuf {
        self.directory
            .join(format!("{}{}.csv", self.file_prefix, short_name))
    }
}

#[derive(Default)]
pub struct Reports {
    options: ReportOptions,
    file_writers: HashMap<TypeId, Writer<File>>,
}

impl Reports {
    #[must_use]
    pub fn new() -> Reports {
        Reports::default()
    }

    /// Options used by subsequent calls to `add_report`.
    pub fn report_options(&mut self) -> &mut ReportOptions {
        &mut self.options
    }

    /// Opens the file for report type `T`, creating the output directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an `OutbreakError` if the file exists and overwriting is off, or if the
    /// directory or file cannot be created.
    pub fn add_report<T: Report>(&mut self, short_name: &str) -> Result<(), OutbreakError> {
        let path = self.options.path_for(short_name);
        if path.exists() && !self.options.overwrite {
            return Err(OutbreakError::ReportError(format!(
                "file already exists: {}. Please set `overwrite` to true in the file configuration and rerun.",
                path.display()
            )));
        }
        create_dir_all(&self.options.directory)?;
        trace!("adding report {} at {}", short_name, path.display());
        let file = File::create(&path)?;
        self.file_writers
            .insert(TypeId::of::<T>(), Writer::from_writer(file));
        Ok(())
    }

    #[must_use]
    pub fn has_report<T: Report>(&self) -> bool {
        self.file_writers.contains_key(&TypeId::of::<T>())
    }

    /// Write a new row with columns following items in the report struct
    /// to the report file associated with the report type struct.
    ///
    /// # Errors
    ///
    /// Returns an `OutbreakError` if no report of this type was added or the row cannot be
    /// written.
    pub fn send_report<T: Report>(&mut self, report: &T) -> Result<(), OutbreakError> {
        let writer = self
            .file_writers
            .get_mut(&TypeId::of::<T>())
            .ok_or_else(|| {
                OutbreakError::ReportError("No writer found for the report type".to_string())
            })?;
        report.serialize(writer)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use serde_derive::{Deserialize, Serialize};
    use tempfile::tempdir;

    #[derive(Serialize, Deserialize)]
    struct SampleReport {
        id: u32,
        value: String,
    }

    define_report!(SampleReport);

    #[test]
    fn add_and_send_report() {
        let temp_dir = tempdir().unwrap();
        let mut reports = Reports::new();
        reports
            .report_options()
            .directory(temp_dir.path().to_path_buf());
        reports.add_report::<SampleReport>("sample_report").unwrap();
        assert!(reports.has_report::<SampleReport>());

        reports
            .send_report(&SampleReport {
                id: 1,
                value: "Value,1".to_string(),
            })
            .unwrap();
        reports
            .send_report(&SampleReport {
                id: 2,
                value: "Value\n2".to_string(),
            })
            .unwrap();

        let file_path = temp_dir.path().join("sample_report.csv");
        let mut reader = csv::Reader::from_path(file_path).unwrap();
        let records: Vec<SampleReport> = reader.deserialize().map(Result::unwrap).collect();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, 1);
        assert_eq!(records[0].value, "Value,1");
        assert_eq!(records[1].value, "Value\n2");
    }

    #[test]
    fn prefix_and_nested_directory() {
        let temp_dir = tempdir().unwrap();
        let directory = temp_dir.path().join("nested").join("output");
        let mut reports = Reports::new();
        reports
            .report_options()
            .directory(directory.clone())
            .file_prefix("run_1_".to_string());
        reports.add_report::<SampleReport>("sample").unwrap();

        assert!(directory.join("run_1_sample.csv").exists());
    }

    #[test]
    fn existing_file_requires_overwrite() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().to_path_buf();

        let mut first = Reports::new();
        first.report_options().directory(path.clone());
        first.add_report::<SampleReport>("sample").unwrap();

        let mut second = Reports::new();
        second.report_options().directory(path.clone());
        assert!(matches!(
            second.add_report::<SampleReport>("sample"),
            Err(OutbreakError::ReportError(_))
        ));

        second.report_options().overwrite(true);
        assert!(second.add_report::<SampleReport>("sample").is_ok());
    }

    #[test]
    fn send_report_without_adding_report() {
        let mut reports = Reports::new();
        let result = reports.send_report(&SampleReport {
            id: 1,
            value: "Test Value".to_string(),
        });
        assert!(matches!(result, Err(OutbreakError::ReportError(_))));
    }
}
