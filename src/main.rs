use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use publico::app::AppContext;
use publico::cli::{commands, Cli, Commands};
use publico::config::Config;
use publico::fetcher::ArticleSource;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Logs go to stderr; stdout carries command output.
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Commands::Id { url } = &cli.command {
        return Ok(if commands::print_article_id(url) {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    let config = Config::load(cli.config.as_deref())?;
    let ctx = AppContext::with_workers(config, cli.workers)?;

    match cli.command {
        Commands::Latest(args) => {
            commands::list_articles(&ctx, &ArticleSource::Latest, &args).await?;
        }
        Commands::Top(args) => {
            commands::list_articles(&ctx, &ArticleSource::Top, &args).await?;
        }
        Commands::Search { query, list } => {
            commands::list_articles(&ctx, &ArticleSource::Search(query), &list).await?;
        }
        Commands::Show { target } => {
            commands::show_article(&ctx, &target).await?;
        }
        Commands::Tui { top, search } => {
            let source = match (top, search) {
                (_, Some(query)) => ArticleSource::Search(query.trim().to_string()),
                (true, None) => ArticleSource::Top,
                (false, None) => ArticleSource::Latest,
            };
            publico::tui::run(Arc::new(ctx), source).await?;
        }
        Commands::Id { .. } => {}
    }

    Ok(ExitCode::SUCCESS)
}
