//! Which board the listing shows as open.

use crate::router::Route;

/// Selection state owned by whoever renders the board listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSelection {
    viewing: Option<String>,
}

impl BoardSelection {
    /// Seeds the selection from the route currently displayed.
    pub fn from_route(route: &Route) -> Self {
        let mut selection = Self::default();
        selection.sync(route);
        selection
    }

    /// Follows navigation that did not go through [`open_board`](Self::open_board).
    pub fn sync(&mut self, route: &Route) {
        if let Route::Board(name) = route {
            self.viewing = Some(name.clone());
        }
    }

    /// Selects `name` and returns where to navigate.
    /// The empty name is the nil board.
    pub fn open_board(&mut self, name: &str) -> Route {
        self.viewing = Some(name.to_string());
        if name.is_empty() {
            Route::NilBoard
        } else {
            Route::Board(name.to_string())
        }
    }

    pub fn is_open(&self, name: &str) -> bool {
        self.viewing.as_deref() == Some(name)
    }

    pub fn current(&self) -> Option<&str> {
        self.viewing.as_deref()
    }
}
