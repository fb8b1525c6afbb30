pub mod app;
pub mod event;
pub mod layout;

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::error::TryRecvError;

use crate::app::{AppContext, Result};
use crate::enrich::{spawn_detail_supervisor, EnrichEvent, EnrichHandle};
use crate::fetcher::ArticleSource;

use self::app::{ActivePane, InputMode, TuiApp};
use self::event::{Action, AppEvent, EventHandler, SearchInput};

type Tui = Terminal<CrosstermBackend<Stdout>>;

pub async fn run(ctx: Arc<AppContext>, source: ArticleSource) -> Result<()> {
    let mut terminal = setup_terminal()?;
    let result = run_app(&mut terminal, ctx, source).await;
    restore_terminal(&mut terminal)?;
    result
}

fn setup_terminal() -> Result<Tui> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut Tui) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

async fn run_app(terminal: &mut Tui, ctx: Arc<AppContext>, source: ArticleSource) -> Result<()> {
    let mut tui_app = TuiApp::new(source.clone());
    let event_handler = EventHandler::new(Duration::from_millis(100));
    let colors = ctx.config.colors.clone();
    let display = ctx.config.display.clone();

    let (enrich, mut enrich_events) = spawn_detail_supervisor(
        ctx.client.clone(),
        ctx.store.clone(),
        Duration::from_millis(display.detail_debounce_ms),
    );

    if let ArticleSource::Search(query) = &source {
        if query.is_empty() {
            tui_app.start_search();
        }
    }
    load_source(terminal, &mut tui_app, &ctx, source, false).await?;

    loop {
        notify_selection(&mut tui_app, &enrich).await;
        terminal.draw(|frame| layout::render(frame, &mut tui_app, &colors, &display))?;

        match event_handler.next()? {
            AppEvent::Key(key) if tui_app.input_mode == InputMode::Search => {
                match SearchInput::from(key) {
                    SearchInput::Char(c) => tui_app.search_input.push(c),
                    SearchInput::Backspace => {
                        tui_app.search_input.pop();
                    }
                    SearchInput::Submit => {
                        let source = tui_app.submit_search();
                        load_source(terminal, &mut tui_app, &ctx, source, false).await?;
                    }
                    SearchInput::Cancel => tui_app.cancel_search(),
                    SearchInput::None => {}
                }
            }
            AppEvent::Key(key) => {
                tui_app.clear_status();
                match Action::from(key) {
                    Action::Quit => {
                        tui_app.should_quit = true;
                    }
                    Action::MoveUp => tui_app.move_up(),
                    Action::MoveDown => tui_app.move_down(),
                    Action::NextPage => tui_app.page_down(),
                    Action::PrevPage => tui_app.page_up(),
                    Action::NextPane => {
                        tui_app.active_pane = tui_app.active_pane.next();
                    }
                    Action::PrevPane => {
                        tui_app.active_pane = tui_app.active_pane.prev();
                    }
                    Action::ToggleMaximize => tui_app.toggle_maximize(),
                    Action::Back => {
                        if tui_app.maximized {
                            tui_app.toggle_maximize();
                        } else {
                            tui_app.active_pane = ActivePane::Articles;
                        }
                    }
                    Action::OpenInBrowser => {
                        if let Some(view) = tui_app.selected_view() {
                            let url = view.url.clone();
                            if let Err(e) = open::that(&url) {
                                tui_app.set_status(format!("Failed to open browser: {}", e));
                            } else {
                                tui_app.set_status(format!("Opened {}", url));
                            }
                        }
                    }
                    Action::Refresh => {
                        let source = tui_app.source.clone();
                        load_source(terminal, &mut tui_app, &ctx, source, true).await?;
                    }
                    Action::ShowLatest => {
                        load_source(terminal, &mut tui_app, &ctx, ArticleSource::Latest, false)
                            .await?;
                    }
                    Action::ShowTop => {
                        load_source(terminal, &mut tui_app, &ctx, ArticleSource::Top, false).await?;
                    }
                    Action::StartSearch => tui_app.start_search(),
                    Action::None => {}
                }
            }
            AppEvent::Tick => {}
        }

        drain_enrich_events(&mut tui_app, &ctx, &mut enrich_events);

        if tui_app.should_quit {
            break;
        }
    }

    enrich.shutdown().await;
    Ok(())
}

/// Show the list for `source`, from the cache unless `force` is set.
///
/// The current list stays visible while loading and when the request fails.
async fn load_source(
    terminal: &mut Tui,
    tui_app: &mut TuiApp,
    ctx: &AppContext,
    source: ArticleSource,
    force: bool,
) -> Result<()> {
    if !force {
        if let Some(articles) = tui_app.cached(&source).cloned() {
            tui_app.set_articles(source, articles);
            refresh_views(tui_app, ctx);
            return Ok(());
        }
    }

    tui_app.is_loading = true;
    let colors = &ctx.config.colors;
    let display = &ctx.config.display;
    terminal.draw(|frame| layout::render(frame, tui_app, colors, display))?;

    let result = ctx.client.articles(&source).await;
    tui_app.is_loading = false;

    match result {
        Ok(articles) => {
            tui_app.set_articles(source, articles);
            refresh_views(tui_app, ctx);
        }
        Err(e) => {
            tracing::error!(source = %source.label(), error = %e, "Failed to load articles");
            tui_app.set_status(format!("Unable to fetch results: {}", e));
        }
    }

    Ok(())
}

fn refresh_views(tui_app: &mut TuiApp, ctx: &AppContext) {
    let views = tui_app.articles.iter().map(|a| ctx.view_of(a)).collect();
    tui_app.set_views(views);
}

async fn notify_selection(tui_app: &mut TuiApp, enrich: &EnrichHandle) {
    match tui_app.take_selection_change() {
        Some(Some(id)) => enrich.select(&id).await,
        Some(None) => enrich.clear().await,
        None => {}
    }
}

fn drain_enrich_events(
    tui_app: &mut TuiApp,
    ctx: &AppContext,
    events: &mut tokio::sync::mpsc::UnboundedReceiver<EnrichEvent>,
) {
    let mut loaded = false;
    loop {
        match events.try_recv() {
            Ok(event) => {
                tui_app.apply_enrich_event(&event);
                loaded |= matches!(event, EnrichEvent::Loaded(_));
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => break,
        }
    }

    if loaded {
        refresh_views(tui_app, ctx);
    }
}
