mod app;

use anyhow::{Context, Result};

/// Built-in sample content, used when no portfolio file is given.
static SAMPLE_PORTFOLIO: &[u8] = include_bytes!("../assets/portfolio.json");

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let portfolio = match args.get(1) {
        Some(path) => {
            let data =
                std::fs::read(path).with_context(|| format!("reading portfolio file {path}"))?;
            folio_core::parse_portfolio(&data).with_context(|| format!("parsing {path}"))?
        }
        None => folio_core::parse_portfolio(SAMPLE_PORTFOLIO)
            .context("parsing built-in sample portfolio")?,
    };

    app::run(&portfolio)
}
