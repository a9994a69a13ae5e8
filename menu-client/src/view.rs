//! Menu page state
//!
//! Holds the fetched entities and dialog state of the weekly menu page.
//! Fetches are split into [`MenuView::begin_fetch`] / [`MenuView::finish_fetch`]
//! so the caller can run them however it likes; a response that belongs to
//! an older fetch than the latest one is discarded.

use chrono::NaiveDate;
use shared::models::{Dish, MenuSnapshot};

use crate::grid::MenuGrid;
use crate::week::MenuWeek;
use crate::{ClientError, ClientResult, HttpClient};

/// Load status of the page data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Idle,
    Loading,
    Loaded,
    /// Last fetch failed; `retryable` drives the "try again" affordance
    Failed { message: String, retryable: bool },
}

/// Handle for one in-flight fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    generation: u64,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

#[derive(Debug, Clone)]
pub struct MenuView {
    week: MenuWeek,
    authorized: bool,
    data: MenuSnapshot,
    dialog_open: bool,
    edit_item: Option<Dish>,
    load_state: LoadState,
    generation: u64,
}

impl MenuView {
    /// `authorized` enables editing dishes from the grid
    pub fn new(week: MenuWeek, authorized: bool) -> Self {
        Self {
            week,
            authorized,
            data: MenuSnapshot::default(),
            dialog_open: false,
            edit_item: None,
            load_state: LoadState::Idle,
            generation: 0,
        }
    }

    pub fn week(&self) -> &MenuWeek {
        &self.week
    }

    pub fn data(&self) -> &MenuSnapshot {
        &self.data
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    pub fn dialog_open(&self) -> bool {
        self.dialog_open
    }

    /// Dish being edited; `None` while creating or closed
    pub fn edit_item(&self) -> Option<&Dish> {
        self.edit_item.as_ref()
    }

    /// Render model, rebuilt from the current data
    pub fn grid(&self) -> MenuGrid {
        MenuGrid::build(&self.week, &self.data)
    }

    // ========== Fetching ==========

    /// Start a fetch for the current week; older tickets become stale
    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.generation += 1;
        self.load_state = LoadState::Loading;
        FetchTicket {
            generation: self.generation,
            from: self.week.monday(),
            to: self.week.friday(),
        }
    }

    /// Apply a fetch result. Returns `false` when the ticket is stale and
    /// the result was ignored.
    pub fn finish_fetch(&mut self, ticket: FetchTicket, result: ClientResult<MenuSnapshot>) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                ticket = ticket.generation,
                latest = self.generation,
                "Discarding stale menu response"
            );
            return false;
        }

        match result {
            Ok(snapshot) => {
                self.data = snapshot;
                self.load_state = LoadState::Loaded;
            }
            Err(e) => {
                tracing::warn!(error = %e, "Menu fetch failed");
                self.load_state = failed(&e);
            }
        }
        true
    }

    /// Fetch the current week with dishes and apply the result
    pub async fn refresh(&mut self, client: &HttpClient) -> bool {
        let ticket = self.begin_fetch();
        let result = client.menu(ticket.from, ticket.to, true).await;
        self.finish_fetch(ticket, result)
    }

    // ========== Navigation ==========

    /// Follow a route change. Returns `true` when the week differs and a
    /// refetch is needed.
    pub fn set_week(&mut self, week: MenuWeek) -> bool {
        if week == self.week {
            return false;
        }
        self.week = week;
        true
    }

    /// Route to push after a date was picked, if it leaves this week
    pub fn change_week(&self, picked: NaiveDate) -> Option<String> {
        self.week.route_for(picked)
    }

    // ========== Dialog ==========

    /// Open the dialog empty, for a new dish
    pub fn open_create(&mut self) {
        self.edit_item = None;
        self.dialog_open = true;
    }

    /// Open the dialog on an existing dish. Ignored without authorization
    /// or when the dish is not loaded.
    pub fn open_edit(&mut self, dish_id: i64) -> bool {
        if !self.authorized {
            return false;
        }
        let Some(dish) = self.data.dishes.iter().find(|d| d.id == dish_id) else {
            return false;
        };
        self.edit_item = Some(dish.clone());
        self.dialog_open = true;
        true
    }

    pub fn close_dialog(&mut self) {
        self.dialog_open = false;
        self.edit_item = None;
    }

    /// Replace the dish list after a save.
    ///
    /// `keep_adding` leaves the dialog open for the next entry, prefilled
    /// with `next_item` when given.
    pub fn update_dishes(&mut self, dishes: Vec<Dish>, keep_adding: bool, next_item: Option<Dish>) {
        self.data.dishes = dishes;
        self.dialog_open = keep_adding;
        self.edit_item = next_item;
    }
}

fn failed(err: &ClientError) -> LoadState {
    LoadState::Failed {
        message: err.to_string(),
        retryable: err.is_retryable(),
    }
}
