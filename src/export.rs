// CSV and terminal report rendering
use crate::aircraft::Aircraft;
use anyhow::Result;
use chrono::{Datelike, Local};
use colored::Colorize;
use comfy_table::presets::UTF8_FULL;
use comfy_table::Table;
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

/// Sectioned, spreadsheet-style CSV report. Mirrors the terminal tables so
/// a report can be re-opened in a spreadsheet later.
#[derive(Debug, Default)]
pub struct CsvReport {
    out: String,
}

impl CsvReport {
    pub fn new() -> Self {
        CsvReport::default()
    }

    pub fn section(&mut self, heading: &str) {
        let _ = writeln!(self.out, "{}", csv_field(heading));
    }

    fn row(&mut self, columns: &[String]) {
        let fields: Vec<String> = columns.iter().map(|c| csv_field(c)).collect();
        let _ = writeln!(self.out, "{}", fields.join(","));
    }

    fn blank(&mut self) {
        let _ = writeln!(self.out);
    }

    /// Ranked aircraft with the full identity columns and percent-of-total.
    pub fn aircraft_section(&mut self, heading: &str, ranked: &[(Aircraft, u64)], total: u64) {
        self.section(heading);
        self.row(&[
            "Aircraft".to_string(),
            "Engines".to_string(),
            "Classification".to_string(),
            "Studio".to_string(),
            "% Flights".to_string(),
        ]);
        for (aircraft, count) in ranked {
            self.row(&[
                aircraft.name.clone(),
                aircraft.engines_label(),
                aircraft.category_label(),
                aircraft.studio.clone(),
                percent_of(*count, total),
            ]);
        }
        self.blank();
    }

    /// Generic label → percent section (hardware dumps).
    pub fn percent_section(&mut self, heading: &str, label: &str, metric: &str, rows: &[(String, f64)]) {
        self.section(heading);
        self.row(&[label.to_string(), format!("% of All {metric}")]);
        for (name, percent) in rows {
            self.row(&[name.clone(), format!("{percent}%")]);
        }
        self.blank();
    }

    /// Generic label → absolute-count section (time series, core counts).
    pub fn count_section(&mut self, heading: &str, label: &str, metric: &str, rows: &[(String, u64)]) {
        self.section(heading);
        self.row(&[label.to_string(), format!("Num {metric}")]);
        for (name, count) in rows {
            self.row(&[name.clone(), count.to_string()]);
        }
        self.blank();
    }

    pub fn write_to(&self, path: &Path) -> Result<()> {
        fs::write(path, &self.out)?;
        Ok(())
    }

    #[cfg(test)]
    fn as_str(&self) -> &str {
        &self.out
    }
}

fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn percent_of(count: u64, total: u64) -> String {
    if total == 0 {
        return "0.00%".to_string();
    }
    format!("{:.2}%", count as f64 / total as f64 * 100.0)
}

/// Output-file suffix carrying version, user group, and run date.
pub fn file_suffix(version: &str, group: &str) -> String {
    let today = Local::now().date_naive();
    format!("_{version}_{group}_{}_{}_{}", today.year(), today.month(), today.day())
}

pub fn print_heading(heading: &str) {
    println!();
    println!("{}", heading.cyan().bold());
}

/// Ranked aircraft as a terminal table.
pub fn print_aircraft_table(heading: &str, ranked: &[(Aircraft, u64)], total: u64) {
    print_heading(heading);
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(vec!["Aircraft", "Engines", "Classification", "Studio", "% Flights"]);
    for (aircraft, count) in ranked {
        table.add_row(vec![
            aircraft.name.clone(),
            aircraft.engines_label(),
            aircraft.category_label(),
            aircraft.studio.clone(),
            percent_of(*count, total),
        ]);
    }
    println!("{table}");
}

pub fn print_percent_table(heading: &str, label: &str, rows: &[(String, f64)]) {
    print_heading(heading);
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![label, "%"]);
    for (name, percent) in rows {
        table.add_row(vec![name.clone(), format!("{percent}%")]);
    }
    println!("{table}");
}

pub fn print_count_table(heading: &str, label: &str, rows: &[(String, u64)]) {
    print_heading(heading);
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![label, "Count"]);
    for (name, count) in rows {
        table.add_row(vec![name.clone(), count.to_string()]);
    }
    println!("{table}");
}
