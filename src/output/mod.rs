pub mod report;

use std::collections::BTreeMap;

use colored::Colorize;
use serde::Serialize;

use crate::controller::Controller;
use crate::table::{Cell, TableBody, EMPTY_CELL};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

#[derive(Clone, Debug, Serialize)]
pub struct OutputRow<'a> {
    pub popis: &'a str,
    pub cells: BTreeMap<&'static str, &'a Cell>,
}

pub fn build_rows(body: &TableBody) -> Vec<OutputRow<'_>> {
    body.rows()
        .iter()
        .map(|row| OutputRow {
            popis: &row.popis,
            cells: row.columns().map(|(i, c)| (i.label(), c)).collect(),
        })
        .collect()
}

pub fn render_text(body: &TableBody) -> Vec<u8> {
    let mut out = String::new();
    for row in body.rows() {
        out.push_str(&format!("{}\n", row.popis.bold()));
        for (insurer, cell) in row.columns() {
            let label = format!("{:<8}", insurer.label());
            match cell {
                Cell::Empty => {
                    out.push_str(&format!("  {} {}\n", label.cyan(), EMPTY_CELL.dimmed()));
                }
                Cell::List(items) => {
                    out.push_str(&format!("  {} * {}\n", label.cyan(), items[0]));
                    for item in &items[1..] {
                        out.push_str(&format!("  {:<8} * {}\n", "", item));
                    }
                }
            }
        }
        out.push('\n');
    }
    out.into_bytes()
}

pub fn render_json(body: &TableBody) -> Vec<u8> {
    serde_json::to_vec_pretty(&build_rows(body)).unwrap_or_else(|_| b"[]\n".to_vec())
}

pub fn render_html(controller: &Controller) -> Vec<u8> {
    report::render_html(controller)
}

pub fn render(format: OutputFormat, controller: &Controller) -> Vec<u8> {
    match format {
        OutputFormat::Text => render_text(controller.table()),
        OutputFormat::Json => render_json(controller.table()),
        OutputFormat::Html => render_html(controller),
    }
}
