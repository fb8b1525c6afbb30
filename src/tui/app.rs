use std::collections::HashMap;

use ratatui::widgets::ListState;

use crate::domain::{Article, ArticleView};
use crate::enrich::EnrichEvent;
use crate::fetcher::ArticleSource;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActivePane {
    Articles,
    Preview,
}

impl ActivePane {
    pub fn next(self) -> Self {
        match self {
            ActivePane::Articles => ActivePane::Preview,
            ActivePane::Preview => ActivePane::Articles,
        }
    }

    pub fn prev(self) -> Self {
        self.next()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

pub const PAGE_SIZE: usize = 10;

pub struct TuiApp {
    pub active_pane: ActivePane,
    pub input_mode: InputMode,
    pub search_input: String,
    pub source: ArticleSource,
    pub articles: Vec<Article>,
    pub views: Vec<ArticleView>,
    pub article_index: usize,
    pub preview_scroll: u16,
    pub should_quit: bool,
    pub status_message: Option<String>,
    pub is_loading: bool,
    /// Article whose details are being fetched.
    pub loading_detail: Option<String>,
    /// Reader mode: the preview shows the full article.
    pub maximized: bool,
    pub list_state: ListState,
    /// Last list fetched per source, searches keyed by query.
    cache: HashMap<ArticleSource, Vec<Article>>,
    /// Last ID handed to the enrichment supervisor.
    last_selected: Option<String>,
}

impl TuiApp {
    pub fn new(source: ArticleSource) -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));

        Self {
            active_pane: ActivePane::Articles,
            input_mode: InputMode::Normal,
            search_input: String::new(),
            source,
            articles: Vec::new(),
            views: Vec::new(),
            article_index: 0,
            preview_scroll: 0,
            should_quit: false,
            status_message: None,
            is_loading: false,
            loading_detail: None,
            maximized: false,
            list_state,
            cache: HashMap::new(),
            last_selected: None,
        }
    }

    pub fn selected_view(&self) -> Option<&ArticleView> {
        self.views.get(self.article_index)
    }

    pub fn selected_id(&self) -> Option<&str> {
        self.selected_view().and_then(|v| v.id.as_deref())
    }

    pub fn cached(&self, source: &ArticleSource) -> Option<&Vec<Article>> {
        self.cache.get(source)
    }

    /// Replace the displayed list. The list is remembered for `source`.
    pub fn set_articles(&mut self, source: ArticleSource, articles: Vec<Article>) {
        self.cache.insert(source.clone(), articles.clone());
        if source != self.source {
            self.article_index = 0;
        }
        self.source = source;
        self.articles = articles;
        self.views.clear();
        self.article_index = self.article_index.min(self.articles.len().saturating_sub(1));
        self.preview_scroll = 0;
        self.sync_list_state();
    }

    pub fn set_views(&mut self, views: Vec<ArticleView>) {
        self.views = views;
    }

    /// The new selection if it changed since the last call. The inner value
    /// is `None` when the selected row has no ID (or nothing is selected).
    pub fn take_selection_change(&mut self) -> Option<Option<String>> {
        let current = self.selected_id().map(String::from);
        if current == self.last_selected {
            return None;
        }
        self.last_selected = current.clone();
        Some(current)
    }

    pub fn apply_enrich_event(&mut self, event: &EnrichEvent) {
        match event {
            EnrichEvent::Started(id) => self.loading_detail = Some(id.clone()),
            _ => {
                if self.loading_detail.as_deref() == Some(event.id()) {
                    self.loading_detail = None;
                }
            }
        }
    }

    pub fn is_selected_loading(&self) -> bool {
        self.loading_detail.is_some() && self.loading_detail.as_deref() == self.selected_id()
    }

    pub fn move_up(&mut self) {
        match self.active_pane {
            ActivePane::Articles => {
                if self.article_index > 0 {
                    self.article_index -= 1;
                    self.preview_scroll = 0;
                    self.sync_list_state();
                }
            }
            ActivePane::Preview => {
                self.preview_scroll = self.preview_scroll.saturating_sub(1);
            }
        }
    }

    pub fn move_down(&mut self) {
        match self.active_pane {
            ActivePane::Articles => {
                if !self.articles.is_empty() && self.article_index < self.articles.len() - 1 {
                    self.article_index += 1;
                    self.preview_scroll = 0;
                    self.sync_list_state();
                }
            }
            ActivePane::Preview => {
                self.preview_scroll = self.preview_scroll.saturating_add(1);
            }
        }
    }

    pub fn page_down(&mut self) {
        match self.active_pane {
            ActivePane::Articles => {
                if !self.articles.is_empty() {
                    self.article_index =
                        (self.article_index + PAGE_SIZE).min(self.articles.len() - 1);
                    self.preview_scroll = 0;
                    self.sync_list_state();
                }
            }
            ActivePane::Preview => {
                self.preview_scroll = self.preview_scroll.saturating_add(PAGE_SIZE as u16);
            }
        }
    }

    pub fn page_up(&mut self) {
        match self.active_pane {
            ActivePane::Articles => {
                self.article_index = self.article_index.saturating_sub(PAGE_SIZE);
                self.preview_scroll = 0;
                self.sync_list_state();
            }
            ActivePane::Preview => {
                self.preview_scroll = self.preview_scroll.saturating_sub(PAGE_SIZE as u16);
            }
        }
    }

    pub fn toggle_maximize(&mut self) {
        self.maximized = !self.maximized;
        self.preview_scroll = 0;
        if self.maximized {
            self.active_pane = ActivePane::Preview;
        } else {
            self.active_pane = ActivePane::Articles;
        }
    }

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
        self.search_input = match &self.source {
            ArticleSource::Search(query) => query.clone(),
            _ => String::new(),
        };
    }

    pub fn cancel_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.search_input.clear();
    }

    /// Leave search input, returning the source to load.
    pub fn submit_search(&mut self) -> ArticleSource {
        self.input_mode = InputMode::Normal;
        let query = std::mem::take(&mut self.search_input);
        ArticleSource::Search(query.trim().to_string())
    }

    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    fn sync_list_state(&mut self) {
        self.list_state.select(Some(self.article_index));
    }
}
