pub mod groups;

use serde::Serialize;
use tracing::debug;

use crate::catalog::category_rank;
use crate::model::{category_of, BenefitRecord, Insurer};

pub use groups::{BenefitGroups, OrderedMap};

/// Text shown in place of an empty benefit list.
pub const EMPTY_CELL: &str = "-";

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    List(Vec<String>),
    Empty,
}

impl Cell {
    fn from_benefits(benefits: Vec<String>) -> Self {
        if benefits.is_empty() {
            Cell::Empty
        } else {
            Cell::List(benefits)
        }
    }

    pub fn items(&self) -> &[String] {
        match self {
            Cell::List(items) => items,
            Cell::Empty => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    /// Inner markup of the cell: a `<ul>` list or the `-` placeholder.
    pub fn markup(&self) -> String {
        match self {
            Cell::Empty => EMPTY_CELL.to_string(),
            Cell::List(items) => {
                let mut out = String::from("<ul>");
                for item in items {
                    out.push_str("<li>");
                    out.push_str(&escape_html(item));
                    out.push_str("</li>");
                }
                out.push_str("</ul>");
                out
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub popis: String,
    /// One cell per [`Insurer::ALL`] entry, same order.
    pub cells: [Cell; 3],
}

impl Row {
    pub fn cell(&self, insurer: Insurer) -> &Cell {
        let idx = Insurer::ALL
            .iter()
            .position(|i| *i == insurer)
            .unwrap_or_default();
        &self.cells[idx]
    }

    pub fn columns(&self) -> impl Iterator<Item = (Insurer, &Cell)> {
        Insurer::ALL.into_iter().zip(self.cells.iter())
    }

    /// The `<td>` sequence of the row, as a browser would serialize it.
    pub fn markup(&self) -> String {
        let mut out = format!("<td>{}</td>", escape_html(&self.popis));
        for cell in &self.cells {
            out.push_str("<td>");
            out.push_str(&cell.markup());
            out.push_str("</td>");
        }
        out
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TableBody {
    rows: Vec<Row>,
}

impl TableBody {
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn labels(&self) -> Vec<&str> {
        self.rows.iter().map(|r| r.popis.as_str()).collect()
    }

    /// Contents of the table body: one `<tr>` per row.
    pub fn markup(&self) -> String {
        self.rows
            .iter()
            .map(|r| format!("<tr>{}</tr>", r.markup()))
            .collect()
    }
}

/// Groups, orders and filters `records` into table rows.
///
/// `category_filter` is a literal, case-sensitive prefix of `Popis`.
/// `search_text` is matched case-insensitively, first per benefit and then
/// against the assembled row markup, so a search hitting only the row label
/// still keeps the row.
pub fn render(records: &[BenefitRecord], category_filter: &str, search_text: &str) -> TableBody {
    let groups = BenefitGroups::build(records);
    let needle = search_text.to_lowercase();

    let mut labels: Vec<&str> = groups.labels().collect();
    labels.sort_by_key(|popis| category_rank(category_of(popis)));

    let mut rows = Vec::new();
    for popis in labels {
        if !category_filter.is_empty() && !popis.starts_with(category_filter) {
            continue;
        }

        let cells = Insurer::ALL.map(|insurer| {
            let matching = groups
                .benefits(popis, insurer.label())
                .iter()
                .filter(|b| b.to_lowercase().contains(&needle))
                .cloned()
                .collect();
            Cell::from_benefits(matching)
        });
        let row = Row {
            popis: popis.to_string(),
            cells,
        };

        if !search_text.is_empty() && !row.markup().to_lowercase().contains(&needle) {
            continue;
        }
        rows.push(row);
    }

    debug!(
        groups = groups.len(),
        rows = rows.len(),
        category = category_filter,
        search = search_text,
        "table rendered"
    );
    TableBody { rows }
}

pub fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod table_tests {
    use super::*;

    fn rec(popis: &str, poistovna: &str, benefit: &str) -> BenefitRecord {
        BenefitRecord::new(popis, poistovna, benefit)
    }

    #[test]
    fn senior_scenario_renders_one_row() {
        let data = vec![
            rec("Senior - X", "Dôvera", "Zľava na lieky"),
            rec("Senior - X", "UNION", "Bonus program"),
        ];
        let body = render(&data, "", "");
        assert_eq!(body.len(), 1);
        let row = &body.rows()[0];
        assert_eq!(row.popis, "Senior - X");
        assert_eq!(row.cell(Insurer::Dovera).items(), ["Zľava na lieky"]);
        assert!(row.cell(Insurer::Vszp).is_empty());
        assert_eq!(row.cell(Insurer::Union).items(), ["Bonus program"]);
        assert_eq!(
            body.markup(),
            "<tr><td>Senior - X</td><td><ul><li>Zľava na lieky</li></ul></td>\
             <td>-</td><td><ul><li>Bonus program</li></ul></td></tr>"
        );
    }

    #[test]
    fn rows_follow_category_order_with_unknown_first() {
        let data = vec![
            rec("Senior - A", "Dôvera", "a"),
            rec("Rodina - B", "Dôvera", "b"),
            rec("Unknown - C", "Dôvera", "c"),
        ];
        assert_eq!(
            render(&data, "", "").labels(),
            vec!["Unknown - C", "Rodina - B", "Senior - A"]
        );
    }

    #[test]
    fn category_filter_is_literal_prefix() {
        let data = vec![
            rec("Rodina - Dieťa", "VšZP", "a"),
            rec("Dospelý - Muž", "VšZP", "b"),
        ];
        assert_eq!(render(&data, "Rodina", "").labels(), vec!["Rodina - Dieťa"]);
        assert!(render(&data, "rodina", "").is_empty());
        assert_eq!(render(&data, "Rodina ", "").len(), 1);
        assert!(render(&data, " Rodina", "").is_empty());
    }

    #[test]
    fn search_is_case_insensitive() {
        let data = vec![
            rec("Žena - A", "Dôvera", "Zľava 50%"),
            rec("Žena - A", "Dôvera", "Vitamíny"),
        ];
        let body = render(&data, "", "ZĽAVA");
        assert_eq!(body.len(), 1);
        assert_eq!(body.rows()[0].cell(Insurer::Dovera).items(), ["Zľava 50%"]);
    }

    #[test]
    fn search_matching_only_label_keeps_empty_row() {
        let data = vec![rec("Senior - Kúpele", "VšZP", "Príspevok")];
        let body = render(&data, "", "kúpele");
        assert_eq!(body.len(), 1);
        assert!(body.rows()[0].cells.iter().all(Cell::is_empty));
    }

    #[test]
    fn search_without_any_match_drops_row() {
        let data = vec![rec("Senior - X", "VšZP", "Príspevok")];
        assert!(render(&data, "", "okuliare").is_empty());
    }

    #[test]
    fn unknown_insurers_are_not_displayed() {
        let data = vec![rec("Muž - X", "Generali", "a")];
        let body = render(&data, "", "");
        assert_eq!(body.len(), 1);
        assert!(body.rows()[0].cells.iter().all(Cell::is_empty));
    }

    #[test]
    fn markup_escapes_text() {
        let data = vec![rec("Dieťa - <3 roky", "UNION", "A & B")];
        assert_eq!(
            render(&data, "", "").markup(),
            "<tr><td>Dieťa - &lt;3 roky</td><td>-</td><td>-</td>\
             <td><ul><li>A &amp; B</li></ul></td></tr>"
        );
    }
}
