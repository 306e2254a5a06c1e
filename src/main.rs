use crate::api::{Summarizer, SummarizerConfig, ZillowClient, ZillowConfig};
use crate::responses::errors::error_to_response;
use crate::router::{handle, App};
use astra::Server;
use std::net::SocketAddr;
use std::sync::Arc;

mod api;
mod data;
mod errors;
mod responses;
mod router;
mod spreadsheets;
mod templates;

#[cfg(test)]
mod tests;

fn main() {
    let zillow_config = match ZillowConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    };

    let zillow = match ZillowClient::new(zillow_config) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("❌ HTTP client init failed: {e}");
            std::process::exit(1);
        }
    };

    // Summaries are optional; searches still work without the key.
    let summarizer = match SummarizerConfig::from_env() {
        Ok(config) => Some(Summarizer::new(config)),
        Err(e) => {
            eprintln!("⚠️ {e}; summaries disabled");
            None
        }
    };

    let app = Arc::new(App { zillow, summarizer });

    let addr: SocketAddr = "127.0.0.1:3000".parse().unwrap();
    println!("Starting server at http://{addr}");

    let server = Server::bind(&addr).max_workers(8);

    let result = server.serve(move |req, _info| match handle(req, &app) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        eprintln!("Server ended with error: {e}");
    }

    println!("Server shut down cleanly.");
}
