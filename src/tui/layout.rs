use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::config::{ColorConfig, DisplayConfig};
use crate::domain::{ArticleView, Icon};
use crate::fetcher::ArticleSource;
use crate::normalizer::DEFAULT_METADATA_PLACEHOLDER;
use crate::render::{self, ArticlePage, SUMMARY_PLACEHOLDER};
use crate::tui::app::{ActivePane, InputMode, TuiApp};

pub fn render(frame: &mut Frame, app: &mut TuiApp, colors: &ColorConfig, display: &DisplayConfig) {
    if app.maximized {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),   // Reader (full height)
                Constraint::Length(1), // Status bar
            ])
            .split(frame.area());

        render_preview_pane(frame, app, chunks[0], colors, display);
        render_status_bar(frame, app, chunks[1], colors);
    } else {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(45), // Article list
                Constraint::Min(10),        // Preview pane
                Constraint::Length(1),      // Status bar
            ])
            .split(frame.area());

        render_articles_pane(frame, app, chunks[0], colors);
        render_preview_pane(frame, app, chunks[1], colors, display);
        render_status_bar(frame, app, chunks[2], colors);
    }
}

fn border_style(active: bool, colors: &ColorConfig) -> Style {
    if active {
        Style::default().fg(colors.active_border)
    } else {
        Style::default().fg(colors.inactive_border)
    }
}

fn render_articles_pane(frame: &mut Frame, app: &mut TuiApp, area: Rect, colors: &ColorConfig) {
    let is_active = app.active_pane == ActivePane::Articles;

    let title = format!(
        " {} ({}) [{}/{}] {}",
        app.source.label(),
        app.views.len(),
        (app.article_index + 1).min(app.views.len().max(1)),
        app.views.len().max(1),
        if app.is_loading { "Loading… " } else { "" }
    );
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_active, colors));

    if app.views.is_empty() {
        let paragraph = Paragraph::new(empty_list_text(app))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, area);
        return;
    }

    let items: Vec<ListItem> = app
        .views
        .iter()
        .map(|view| {
            let marker = match view.icon {
                Icon::Image(_) => Span::raw("▣ "),
                Icon::Globe => Span::styled("◍ ", Style::default().fg(colors.icon_globe)),
            };
            let content = Line::from(vec![
                marker,
                Span::raw(view.title.clone()),
                Span::styled(
                    format!("  {}", view.published),
                    Style::default().fg(colors.metadata_date),
                ),
            ]);
            ListItem::new(content)
        })
        .collect();

    let highlight_style = if is_active {
        Style::default()
            .bg(colors.selection_bg)
            .fg(colors.selection_fg)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    };

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style)
        .highlight_symbol("> ");

    frame.render_stateful_widget(list, area, &mut app.list_state);
}

fn empty_list_text(app: &TuiApp) -> Text<'static> {
    if app.is_loading {
        return Text::from("Loading…");
    }
    match &app.source {
        ArticleSource::Search(query) if query.is_empty() => Text::from(vec![
            Line::from(Span::styled(
                "Search Público News",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from("Type a keyword to find articles."),
        ]),
        ArticleSource::Search(query) => Text::from(vec![
            Line::from(Span::styled(
                "No articles found",
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!("No results for '{}'. Try another search.", query)),
        ]),
        _ => Text::from("No articles found"),
    }
}

fn render_preview_pane(
    frame: &mut Frame,
    app: &TuiApp,
    area: Rect,
    colors: &ColorConfig,
    display: &DisplayConfig,
) {
    let is_active = app.active_pane == ActivePane::Preview;

    let (title, content) = match app.selected_view() {
        Some(view) if app.maximized => {
            let page = if !view.has_body() && app.is_selected_loading() {
                ArticlePage::Loading {
                    title: view.title.clone(),
                }
            } else {
                ArticlePage::Ready(view.clone())
            };
            let text = Text::from(render::article_markdown(&page));
            (format!(" {} ", view.title), text)
        }
        Some(view) => {
            let text = preview_text(view, area, colors, display.max_tags);
            let title = if app.is_selected_loading() {
                " Preview (loading details…) ".to_string()
            } else {
                " Preview ".to_string()
            };
            (title, text)
        }
        None => (" Preview ".to_string(), Text::from("No article selected")),
    };

    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(border_style(is_active, colors));

    let paragraph = Paragraph::new(content)
        .block(block)
        .wrap(Wrap { trim: false })
        .scroll((app.preview_scroll, 0));

    frame.render_widget(paragraph, area);
}

fn preview_text(view: &ArticleView, area: Rect, colors: &ColorConfig, max_tags: usize) -> Text<'static> {
    let mut lines = Vec::new();

    lines.push(Line::from(Span::styled(
        view.title.clone(),
        Style::default().add_modifier(Modifier::BOLD),
    )));
    lines.push(Line::from(""));
    lines.push(Line::from("─".repeat(area.width.saturating_sub(2) as usize)));
    lines.push(Line::from(""));

    let summary = if view.summary.is_empty() {
        SUMMARY_PLACEHOLDER.to_string()
    } else {
        view.summary.clone()
    };
    lines.push(Line::from(summary));
    lines.push(Line::from(""));

    lines.push(Line::from(Span::styled(
        format!("Author: {}", view.authors),
        Style::default().fg(colors.metadata_author),
    )));
    lines.push(Line::from(Span::styled(
        format!("Published: {}", view.published),
        Style::default().fg(colors.metadata_date),
    )));

    let tags = render::visible_tags(view, max_tags);
    let mut keywords = vec![Span::raw("Keywords: ")];
    if tags.is_empty() {
        keywords.push(Span::raw(DEFAULT_METADATA_PLACEHOLDER));
    } else {
        for (index, tag) in tags.iter().enumerate() {
            keywords.push(Span::styled(
                format!(" {} ", tag),
                Style::default()
                    .bg(colors.tag_color(index))
                    .fg(colors.status_fg),
            ));
            keywords.push(Span::raw(" "));
        }
    }
    lines.push(Line::from(keywords));

    lines.push(Line::from(Span::styled(
        format!("Link: {}", view.url),
        Style::default().fg(colors.metadata_link),
    )));

    Text::from(lines)
}

fn render_status_bar(frame: &mut Frame, app: &TuiApp, area: Rect, colors: &ColorConfig) {
    let status = if app.input_mode == InputMode::Search {
        format!("Search Público news: {}▏", app.search_input)
    } else if let Some(ref msg) = app.status_message {
        msg.clone()
    } else if app.maximized {
        "j/k:Scroll  n/p:Page  o:Open  Esc/m:Back  q:Quit".to_string()
    } else {
        "j/k:Nav  n/p:Page  Tab:Pane  Enter:Read  o:Open  /:Search  l:Latest  t:Top  R:Refresh  q:Quit"
            .to_string()
    };

    let paragraph =
        Paragraph::new(status).style(Style::default().fg(colors.status_fg).bg(colors.status_bg));

    frame.render_widget(paragraph, area);
}
