// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Dictionary, EntrySource, PageView, Row, filter, paginate};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub query: String,
    pub page: usize,
    pub total_pages: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            query: String::new(),
            page: 1,
            total_pages: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewCommand {
    Search(String),
    GoToPage(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    QueryChanged(String),
    PageChanged(usize),
}

impl ViewState {
    pub fn dispatch(&mut self, command: ViewCommand) -> Vec<ViewEvent> {
        match command {
            ViewCommand::Search(query) => {
                if query == self.query {
                    return Vec::new();
                }
                self.query = query;
                vec![ViewEvent::QueryChanged(self.query.clone())]
            }
            ViewCommand::GoToPage(page) => self.set_page(page),
        }
    }

    /// Filters the merged view with the current query and cuts out the
    /// current page. A page left over from a larger result set is reset to 1
    /// here and the state keeps the corrected page.
    pub fn render(&mut self, merged: &Dictionary, user: &Dictionary, page_size: usize) -> PageView {
        let matches = filter(merged, &self.query);
        let page = paginate(&matches, page_size, self.page);
        self.page = page.page;
        self.total_pages = page.total_pages;

        let rows = page
            .entries
            .into_iter()
            .map(|entry| {
                let source = if user.contains_key(&entry.typo) {
                    EntrySource::User
                } else {
                    EntrySource::Builtin
                };
                Row { entry, source }
            })
            .collect();

        PageView {
            rows,
            page: page.page,
            total_pages: page.total_pages,
            total_matches: page.total_matches,
        }
    }

    fn set_page(&mut self, page: usize) -> Vec<ViewEvent> {
        let page = page.max(1);
        if page == self.page {
            return Vec::new();
        }
        self.page = page;
        vec![ViewEvent::PageChanged(page)]
    }
}
