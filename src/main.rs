//! # mycurl - Entry Point
//! src/main.rs
//!
//! Punto de entrada del cliente: parsea la configuración, ejecuta un
//! intercambio y presenta la respuesta.
//!
//! Códigos de salida:
//! - `0`: respuesta recibida
//! - `1`: error durante el intercambio
//! - `2`: configuración inválida
//! - `22`: status 4xx/5xx con `--fail`

use mycurl::config::Config;
use mycurl::{HttpClient, Response};
use std::process;
use tracing::Level;

fn main() {
    let config = Config::new();

    if let Err(e) = config.validate() {
        eprintln!("mycurl: {}", e);
        eprintln!("Usage: mycurl [OPTIONS] <URL> [BODY]  (mycurl --help)");
        process::exit(2);
    }

    init_logging(config.verbose);

    if config.verbose {
        config.print_summary();
    }

    let response = match do_request(&config) {
        Ok(response) => response,
        Err(e) => {
            eprintln!("mycurl: {}", e);
            process::exit(1);
        }
    };

    if config.json {
        match serde_json::to_string_pretty(&response) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("mycurl: {}", e);
                process::exit(1);
            }
        }
    } else {
        if config.verbose {
            print_response_summary(&response);
        }
        println!("{}", String::from_utf8_lossy(response.body()));
    }

    let status = response.status();
    if config.fail && (status.is_client_error() || status.is_server_error()) {
        process::exit(22);
    }
}

fn do_request(config: &Config) -> mycurl::error::Result<Response> {
    let request = config.build_request()?;
    HttpClient::new(config.timeout()).send(&request)
}

/// Logs de diagnóstico a stderr: DEBUG con `--verbose`, WARN si no
fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };

    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_response_summary(response: &Response) {
    println!("RESPONSE");
    println!("Status: {} {}", response.status().as_u16(), response.reason());
    println!(
        "Content type: {}",
        response.header("Content-Type").unwrap_or("")
    );
    println!("Body len: {}", response.body().len());
    println!("Body: ");
}
