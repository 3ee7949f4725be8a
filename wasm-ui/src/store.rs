//! Session store shared by the page components.

use std::rc::Rc;

use tasdeed_dashboard::{Dashboard, DashboardConfig, Event};
use yew::prelude::*;

use crate::browser::time_of_day;

/// Reducer wrapper around the session state.
///
/// Push frames and request results arrive from async tasks and socket
/// callbacks, so every change goes through the reducer instead of cloning
/// a captured snapshot.
#[derive(Clone, PartialEq)]
pub struct DashboardStore {
    pub dashboard: Dashboard,
}

impl Default for DashboardStore {
    fn default() -> Self {
        Self {
            dashboard: Dashboard::new(DashboardConfig::default().default_output_dir),
        }
    }
}

impl Reducible for DashboardStore {
    type Action = Event;

    fn reduce(self: Rc<Self>, event: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.dashboard.handle(event, &time_of_day());
        if next == *self {
            return self;
        }
        Rc::new(next)
    }
}
