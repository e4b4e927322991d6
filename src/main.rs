//! Entry point for the sales report binary.
//!
//! With `SALES_INPUT_FILE` set, the binary computes the report for
//! that JSON file, prints it to stdout and exits.  Otherwise it starts
//! an HTTP server on `SALES_BIND_ADDR` exposing the report engine.

use anyhow::Result;
use sales_report::config::ServiceConfig;
use sales_report::{analyze_json, api, loader, AnalysisOptions};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServiceConfig::from_env()?;
    init_tracing(config.log_json);

    match &config.input_file {
        Some(path) => {
            let input = loader::load_input_json(path)?;
            let report = analyze_json(&input, &AnalysisOptions::reference())?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        None => api::serve(&config.bind_addr).await?,
    }
    Ok(())
}

fn init_tracing(json: bool) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}
