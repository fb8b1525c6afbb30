use std::io::Write;

use crate::app::{AppContext, PublicoError, Result};
use crate::cli::ListArgs;
use crate::domain::{Article, ArticleView};
use crate::extractor::extract_article_id;
use crate::fetcher::parallel::DetailOutcome;
use crate::fetcher::ArticleSource;
use crate::render::{self, ArticlePage};

pub async fn list_articles(ctx: &AppContext, source: &ArticleSource, args: &ListArgs) -> Result<()> {
    if let ArticleSource::Search(query) = source {
        if query.trim().is_empty() {
            println!("Type a keyword to find articles.");
            return Ok(());
        }
    }

    let mut articles = ctx.client.articles(source).await?;
    if let Some(limit) = args.limit {
        articles.truncate(limit);
    }

    if args.details {
        enrich_all(ctx, &articles).await;
    }

    let views: Vec<ArticleView> = articles.iter().map(|a| ctx.view_of(a)).collect();

    if args.json {
        let json = serde_json::to_string_pretty(&views)
            .map_err(|e| PublicoError::Other(format!("Failed to serialize articles: {}", e)))?;
        println!("{}", json);
        return Ok(());
    }

    if views.is_empty() {
        match source {
            ArticleSource::Search(query) => {
                println!("No results for '{}'. Try another search.", query.trim())
            }
            _ => println!("No articles found"),
        }
        return Ok(());
    }

    let max_tags = ctx.config.display.max_tags;
    let mut stdout = std::io::stdout().lock();
    for (index, view) in views.iter().enumerate() {
        if args.details {
            writeln!(stdout, "{}", render::list_detail_markdown(view, max_tags))?;
            writeln!(stdout, "{}\n", view.url)?;
            continue;
        }

        writeln!(stdout, "{}", render::list_line(index, view))?;
        let tags = render::visible_tags(view, max_tags);
        if !tags.is_empty() {
            writeln!(stdout, "     [{}]", tags.join("] ["))?;
        }
        if !view.summary.is_empty() {
            writeln!(stdout, "     {}", view.summary)?;
        }
        writeln!(stdout)?;
    }

    Ok(())
}

/// Fetch details for every article not cached yet. Failures are logged only.
async fn enrich_all(ctx: &AppContext, articles: &[Article]) {
    let ids: Vec<String> = articles
        .iter()
        .filter_map(|a| ctx.normalizer.normalize(a).id)
        .collect();

    if ids.is_empty() {
        return;
    }

    tracing::info!("Fetching details for {} articles", ids.len());
    let results = ctx.parallel_fetcher.fetch_all(ids, ctx.store.clone()).await;

    let mut loaded = 0;
    for (id, result) in results {
        match result {
            Ok(DetailOutcome::Loaded) => loaded += 1,
            Ok(_) => {}
            Err(e) => tracing::warn!(article_id = %id, error = %e, "Failed to enrich article"),
        }
    }
    tracing::info!("Loaded details for {} articles", loaded);
}

pub async fn show_article(ctx: &AppContext, target: &str) -> Result<()> {
    let page = ctx.load_article(target).await;
    println!("{}", render::article_markdown(&page).trim_end());

    if let ArticlePage::Ready(view) = &page {
        println!("\n{}", view.url);
    }
    Ok(())
}

/// Print the article ID in `url`. Returns `false` when there is none.
pub fn print_article_id(url: &str) -> bool {
    match extract_article_id(url) {
        Some(id) => {
            println!("{}", id);
            true
        }
        None => {
            eprintln!("{}", render::NO_ARTICLE_ID_MESSAGE);
            false
        }
    }
}
