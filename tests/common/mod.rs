//! Shared utilities for integration tests.

use std::net::SocketAddr;
use std::path::Path;

use redirector::config::RedirectorConfig;
use redirector::http::HttpServer;
use redirector::lifecycle::Shutdown;
use rust_xlsxwriter::Workbook;
use tokio::net::TcpListener;

pub const HEADER: [&str; 3] = ["Source URL", "Destination URL", "Status Code"];

/// Write a workbook with one sheet of rules. Numeric status cells are
/// written as numbers, like a spreadsheet editor would.
pub fn write_rules(path: &Path, sheet_name: &str, rows: &[[&str; 3]]) {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name).unwrap();

    for (col, title) in HEADER.iter().enumerate() {
        sheet.write_string(0, col as u16, *title).unwrap();
    }

    for (i, row) in rows.iter().enumerate() {
        let r = i as u32 + 1;
        sheet.write_string(r, 0, row[0]).unwrap();
        sheet.write_string(r, 1, row[1]).unwrap();
        match row[2].parse::<f64>() {
            Ok(code) => {
                sheet.write_number(r, 2, code).unwrap();
            }
            Err(_) if row[2].is_empty() => {}
            Err(_) => {
                sheet.write_string(r, 2, row[2]).unwrap();
            }
        }
    }

    workbook.save(path).unwrap();
}

/// Config pointing at `rules` with an ephemeral listener.
pub fn config_for(rules: &Path) -> RedirectorConfig {
    let mut config = RedirectorConfig::default();
    config.listener.bind_address = "127.0.0.1:0".to_string();
    config.source.path = rules.to_path_buf();
    config
}

/// A server running in the background until the returned `Shutdown` fires.
#[allow(dead_code)]
pub async fn start_server(config: RedirectorConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind(&config.listener.bind_address).await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let rx = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, rx).await;
    });

    (addr, shutdown)
}

/// Client that reports redirects instead of following them.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .pool_max_idle_per_host(0)
        .build()
        .unwrap()
}
