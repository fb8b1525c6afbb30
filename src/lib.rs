//! # Publico
//!
//! A terminal client for the Público news API.
//!
//! ## Architecture
//!
//! Raw API payloads flow through a strict decoding boundary before anything
//! is displayed:
//!
//! ```text
//! Fetcher → Article (domain) → Normalizer → ArticleView → CLI / TUI
//!                                   ↑
//!             enrich (debounced detail fetch) → Store
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! # Latest headlines
//! publico latest
//!
//! # Search, with full details for every result, as JSON
//! publico search "orçamento" --details --json
//!
//! # Read an article
//! publico show https://www.publico.pt/2024/01/02/politica/noticia/governo-anuncia-2075123
//!
//! # Launch TUI
//! publico tui
//! ```

/// Application context and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the client,
/// the detail store and the normalizer.
pub mod app;

/// Command-line interface using clap.
///
/// - `latest` / `top` / `search <query>` - List articles
/// - `show <url|id>` - Read one article
/// - `id <url>` - Print the article ID of a URL
/// - `tui` - Launch the TUI
pub mod cli;

/// Configuration loaded from `~/.config/publico/config.toml`.
pub mod config;

/// Core domain models.
///
/// - [`Article`](domain::Article): API payload, validated field by field
/// - [`ArticleView`](domain::ArticleView): display-ready normalized article
pub mod domain;

/// Debounced, cancellable background loading of the selected article's details.
pub mod enrich;

/// Article ID extraction from provider URLs.
pub mod extractor;

/// HTTP access to the news API.
///
/// - [`Fetcher`](fetcher::Fetcher): Async trait for plain GET requests
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
/// - [`PublicoClient`](fetcher::PublicoClient): Endpoints and response-shape guards
/// - [`ParallelFetcher`](fetcher::parallel::ParallelFetcher): Concurrent detail fetching with semaphore
pub mod fetcher;

/// Payload normalization into [`ArticleView`](domain::ArticleView)s.
pub mod normalizer;

/// Text and markdown rendering of normalized articles.
pub mod render;

/// In-memory cache of enriched article details.
pub mod store;

/// Terminal user interface.
///
/// Article list on top, preview below. Keybindings: j/k navigate,
/// Enter reads, / searches, l/t switch lists, o opens in browser,
/// R refreshes, q quits.
pub mod tui;
