use std::fs;

use anyhow::{Context, Result};
use clap::Parser;
use clap::error::ErrorKind;
use tracing::info;
use tracing_subscriber::EnvFilter;

use seoscan::{
    cli::{Cli, validate_target},
    config::Config,
    document::HtmlDocument,
    extractor::ExtractionPipeline,
    fetcher::PageLoader,
    report,
};

fn init_tracing(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_level()));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if cli.log_json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) if matches!(err.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            err.exit()
        }
        Err(err) => {
            // usage errors exit with 1, not clap's default of 2
            let _ = err.print();
            std::process::exit(1);
        }
    };

    init_tracing(&cli);

    let config = cli.apply(Config::from_env()?);
    let target = validate_target(&cli.url)?;

    let loader = PageLoader::new(&config)?;
    let page = loader
        .fetch(target.as_str())
        .await
        .with_context(|| format!("fetch failed for {}", target))?;
    info!(
        status = %page.status,
        final_url = %page.url_final,
        charset = ?page.charset,
        bytes = page.body_utf8.len(),
        "page fetched"
    );

    let document = HtmlDocument::parse(page.body_utf8);
    let report = ExtractionPipeline::new(config.resource_costs()).run(&cli.url, &document);

    if !cli.json {
        println!("{}", report::render_summary(&report));
    }

    let json = report::to_json_pretty(&report).context("could not serialize report")?;
    println!("{json}");

    if let Some(path) = &cli.output {
        fs::write(path, &json).with_context(|| format!("could not write {}", path.display()))?;
    }

    Ok(())
}
