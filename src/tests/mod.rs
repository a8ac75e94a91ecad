use std::collections::HashSet;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::controller::{ControlEvent, Controller};
use crate::loader::{load_data, load_data_with_client, DataSource, LoadError};
use crate::model::{BenefitRecord, Dataset, Insurer};
use crate::table::{render, Cell};

const SAMPLE: &str = r#"[
  {"Popis": "Senior - Kúpele", "Poistovna": "Dôvera", "Benefit": "Príspevok 50 €"},
  {"Popis": "Rodina - Dieťa", "Poistovna": "VšZP", "Benefit": "Zľava 50% na tábor"},
  {"Popis": "Doplatky - Lieky", "Poistovna": "UNION", "Benefit": "Vrátenie doplatkov"},
  {"Popis": "Rodina - Dieťa", "Poistovna": "VšZP", "Benefit": "Očkovanie"},
  {"Popis": "Dospelý - Muž", "Poistovna": "Dôvera", "Benefit": "Preventívna prehliadka"},
  {"Popis": "Rodina - Dieťa", "Poistovna": "Generali", "Benefit": "Skryté"},
  {"Popis": "Iné - Cestovné", "Poistovna": "UNION", "Benefit": "Poistenie"}
]"#;

fn local_client() -> reqwest::Client {
    reqwest::Client::builder().no_proxy().build().unwrap()
}

fn sample() -> Dataset {
    crate::loader::parse_dataset(SAMPLE.as_bytes(), "sample").unwrap()
}

/// Serves `body` once over plain HTTP and returns the URL to fetch it from.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let _ = socket.read(&mut buf).await;
        let response = format!(
            "{status_line}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        let _ = socket.shutdown().await;
    });
    format!("http://{addr}/poistovne.json")
}

#[test]
fn unfiltered_labels_equal_distinct_popis() {
    let data = sample();
    let body = render(&data, "", "");
    let rendered: HashSet<&str> = body.labels().into_iter().collect();
    let distinct: HashSet<&str> = data.iter().map(|r| r.popis.as_str()).collect();
    assert_eq!(rendered, distinct);
    assert_eq!(body.len(), distinct.len());
}

#[test]
fn rows_are_ordered_by_category_priority() {
    assert_eq!(
        render(&sample(), "", "").labels(),
        vec![
            "Iné - Cestovné",
            "Doplatky - Lieky",
            "Rodina - Dieťa",
            "Dospelý - Muž",
            "Senior - Kúpele",
        ]
    );
}

#[test]
fn unknown_category_sorts_before_listed() {
    let data = Dataset::new(vec![
        BenefitRecord::new("Senior", "VšZP", "a"),
        BenefitRecord::new("Rodina", "VšZP", "b"),
        BenefitRecord::new("Unknown", "VšZP", "c"),
    ]);
    assert_eq!(render(&data, "", "").labels(), vec!["Unknown", "Rodina", "Senior"]);
    assert_eq!(
        crate::catalog::build_categories(&data),
        vec!["Unknown", "Rodina", "Senior"]
    );
}

#[test]
fn duplicate_pairs_share_one_cell() {
    let body = render(&sample(), "Rodina", "");
    assert_eq!(body.len(), 1);
    let row = &body.rows()[0];
    assert_eq!(
        row.cell(Insurer::Vszp),
        &Cell::List(vec!["Zľava 50% na tábor".to_string(), "Očkovanie".to_string()])
    );
    assert_eq!(row.cell(Insurer::Dovera).markup(), "-");
}

#[test]
fn search_keeps_only_matching_benefits() {
    let body = render(&sample(), "", "ZĽAVA");
    assert_eq!(body.labels(), vec!["Rodina - Dieťa"]);
    assert_eq!(
        body.rows()[0].cell(Insurer::Vszp).items(),
        ["Zľava 50% na tábor"]
    );
}

#[test]
fn category_prefix_filter() {
    let data = Dataset::new(vec![
        BenefitRecord::new("Rodina - Dieťa", "Dôvera", "a"),
        BenefitRecord::new("Dospelý - Muž", "Dôvera", "b"),
    ]);
    assert_eq!(render(&data, "Rodina", "").labels(), vec!["Rodina - Dieťa"]);
}

#[test]
fn controller_rerenders_from_snapshot() {
    let mut controller = Controller::new(sample());
    assert_eq!(controller.table().len(), 5);
    controller.handle(ControlEvent::SearchInput("prehliadka".to_string()));
    assert_eq!(controller.table().labels(), vec!["Dospelý - Muž"]);
    controller.handle(ControlEvent::CategoryChanged("Senior".to_string()));
    assert!(controller.table().is_empty());
    controller.handle(ControlEvent::SearchInput(String::new()));
    assert_eq!(controller.table().labels(), vec!["Senior - Kúpele"]);
}

#[tokio::test]
async fn loads_dataset_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("poistovne.json");
    tokio::fs::write(&path, SAMPLE).await.unwrap();

    let controller = Controller::init(&DataSource::Path(path)).await.unwrap();
    assert_eq!(controller.dataset().len(), 7);
    assert_eq!(controller.categories().options().len(), 5);
}

#[tokio::test]
async fn missing_file_is_a_read_error() {
    let dir = tempfile::tempdir().unwrap();
    let source = DataSource::Path(dir.path().join("absent.json"));
    let err = load_data(&source).await.unwrap_err();
    assert!(matches!(err, LoadError::Read { .. }));
}

#[tokio::test]
async fn malformed_file_is_a_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("poistovne.json");
    tokio::fs::write(&path, r#"[{"Popis": 12}]"#).await.unwrap();
    let err = load_data(&DataSource::Path(path)).await.unwrap_err();
    assert!(matches!(err, LoadError::Parse { .. }));
}

#[tokio::test]
async fn loads_dataset_over_http() {
    let url = serve_once("HTTP/1.1 200 OK", SAMPLE).await;
    let source = DataSource::parse(&url).unwrap();
    let dataset = load_data_with_client(&source, Some(&local_client()))
        .await
        .unwrap();
    assert_eq!(dataset.len(), 7);
    assert_eq!(dataset[0].poistovna, "Dôvera");
}

#[tokio::test]
async fn http_error_status_is_reported() {
    let url = serve_once("HTTP/1.1 404 Not Found", "[]").await;
    let source = DataSource::parse(&url).unwrap();
    let err = load_data_with_client(&source, Some(&local_client()))
        .await
        .unwrap_err();
    assert!(matches!(err, LoadError::Status { .. }));
}
