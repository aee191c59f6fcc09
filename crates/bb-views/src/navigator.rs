//! # Navigator
//!
//! The application shell. Resolves a path to its route, runs that route's
//! view model and publishes the result as the current [`Screen`].
//!
//! Every navigation takes a new [`NavToken`]. A view model's result is
//! published only while its token is still the newest, so a slow response
//! for a page the user already left can never overwrite the page they are
//! on now.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use bb_core::error::{AppError, Result};
use bb_core::models::{AuthorSummary, Bulletin};
use bb_core::traits::BulletinApi;
use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::router::Route;
use crate::selection::BoardSelection;
use crate::status::StatusCache;
use crate::views::*;

/// Bound state of the current route.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "camelCase")]
pub enum ViewState {
    /// Requested, or failed; failures leave the view here
    Loading,
    Boards(BoardsState),
    Board(BoardState),
    Bulletin(Bulletin),
    Author(AuthorSummary),
    Authors(Vec<AuthorSummary>),
    Blacklist(BlacklistState),
    BlocksDay(BlocksDayState),
    Block(BlockState),
    Bulletins(BulletinListState),
    Status(StatusState),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screen {
    pub route: Route,
    pub template: &'static str,
    pub view: ViewState,
}

impl Screen {
    fn loading(route: Route) -> Self {
        Self {
            template: route.template(),
            route,
            view: ViewState::Loading,
        }
    }
}

/// Identifies one navigation. Stale once a newer navigation started.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavToken(u64);

pub struct Navigator {
    api: Arc<dyn BulletinApi>,
    status: StatusCache,
    selection: Mutex<BoardSelection>,
    generation: AtomicU64,
    screen: watch::Sender<Screen>,
}

impl Navigator {
    pub fn new(api: Arc<dyn BulletinApi>, status: StatusCache) -> Self {
        Self {
            api,
            status,
            selection: Mutex::new(BoardSelection::default()),
            generation: AtomicU64::new(0),
            screen: watch::Sender::new(Screen::loading(Route::Home)),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Screen> {
        self.screen.subscribe()
    }

    pub fn is_current(&self, token: NavToken) -> bool {
        self.generation.load(Ordering::SeqCst) == token.0
    }

    /// Resolves `path` (unmatched paths redirect to `/`) and loads it.
    pub async fn navigate(&self, path: &str) -> Route {
        let route = match Route::matches(path) {
            Some(route) => route,
            None => {
                info!(path, "no route matched, redirecting to /");
                Route::Home
            }
        };
        self.go(route.clone()).await;
        route
    }

    /// Loads `route` and publishes its state unless superseded.
    /// Returns whether the loaded state was published.
    pub async fn go(&self, route: Route) -> bool {
        let token = self.begin(&route);
        debug!(%route, "navigating");

        match self.load(&route).await {
            Ok(view) => self.publish(token, route, view),
            Err(e) => {
                warn!(%route, error = %e, "view failed to load");
                false
            }
        }
    }

    /// Selects a board in the listing and navigates to it.
    pub async fn open_board(&self, name: &str) -> Route {
        let route = self.selection().open_board(name);
        self.go(route.clone()).await;
        route
    }

    pub fn is_open(&self, name: &str) -> bool {
        self.selection().is_open(name)
    }

    /// Moves the day view `days` away and navigates there.
    pub async fn shift_day(&self, days: i64) -> Result<Route> {
        let Route::BlocksDay(day) = self.screen().route else {
            return Err(AppError::Internal("not on a day of blocks".into()));
        };
        let route = blocks::shift_day(&day, days)?;
        self.go(route.clone()).await;
        Ok(route)
    }

    pub async fn previous_day(&self) -> Result<Route> {
        self.shift_day(-1).await
    }

    pub async fn next_day(&self) -> Result<Route> {
        self.shift_day(1).await
    }

    /// Reverses the bulletins of the block on screen without refetching.
    /// Returns false when no block is shown.
    pub fn reverse_block(&self) -> bool {
        self.screen.send_if_modified(|screen| match &mut screen.view {
            ViewState::Block(block) => {
                block.reverse();
                true
            }
            _ => false,
        })
    }

    fn selection(&self) -> MutexGuard<'_, BoardSelection> {
        // A poisoned selection is still a valid selection.
        self.selection.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Starts a navigation: bumps the generation and shows `route` as loading.
    fn begin(&self, route: &Route) -> NavToken {
        self.selection().sync(route);
        let mut token = NavToken(0);
        self.screen.send_modify(|screen| {
            token = NavToken(self.generation.fetch_add(1, Ordering::SeqCst) + 1);
            *screen = Screen::loading(route.clone());
        });
        token
    }

    fn publish(&self, token: NavToken, route: Route, view: ViewState) -> bool {
        let published = self.screen.send_if_modified(|screen| {
            if !self.is_current(token) {
                return false;
            }
            *screen = Screen {
                template: route.template(),
                route: route.clone(),
                view,
            };
            true
        });
        if !published {
            debug!(%route, "dropping stale response");
        }
        published
    }

    async fn load(&self, route: &Route) -> Result<ViewState> {
        let api = Arc::clone(&self.api);
        let status = self.status.clone();

        let view = match route {
            Route::Home | Route::Boards => {
                let selection = self.selection().clone();
                ViewState::Boards(BoardsView::new(api).load(&selection).await?)
            }
            Route::Board(name) => ViewState::Board(BoardView::new(api, status).load(name).await?),
            Route::NilBoard => ViewState::Board(BoardView::new(api, status).load_nil().await?),
            Route::Bulletin(txid) => ViewState::Bulletin(BulletinView::new(api).load(txid).await?),
            Route::Author(author) => ViewState::Author(AuthorView::new(api).load(author).await?),
            Route::Authors => ViewState::Authors(AuthorsView::new(api).load().await?),
            Route::Blacklist(txid) => {
                ViewState::Blacklist(BlacklistView::new(api).load(txid.as_deref()).await?)
            }
            Route::BlocksDay(day) => ViewState::BlocksDay(BlocksDayView::new(api).load(day).await?),
            Route::Block(hash) => ViewState::Block(BlockView::new(api, status).load(hash).await?),
            Route::Recent => {
                ViewState::Bulletins(BulletinListView::new(api, status).load(ListKind::Recent).await?)
            }
            Route::Unconfirmed => ViewState::Bulletins(
                BulletinListView::new(api, status)
                    .load(ListKind::Unconfirmed)
                    .await?,
            ),
            Route::Status => ViewState::Status(StatusState::from_cache(&status)),
        };
        Ok(view)
    }
}
