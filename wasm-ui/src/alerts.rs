//! Dismissible page alerts.
//!
//! Alerts stack at the top of the page, newest first. Each one fades out
//! after a delay and is removed shortly after, unless dismissed earlier.

use std::rc::Rc;

use yew::prelude::*;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AlertKind {
    Info,
    Success,
    Warning,
    Error,
}

impl AlertKind {
    /// Bootstrap contextual class suffix.
    pub fn css(self) -> &'static str {
        match self {
            AlertKind::Info => "info",
            AlertKind::Success => "success",
            AlertKind::Warning => "warning",
            AlertKind::Error => "danger",
        }
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Alert {
    pub id: u32,
    pub kind: AlertKind,
    pub message: String,
    /// Set once the fade-out has started.
    pub fading: bool,
}

impl Alert {
    pub fn class(&self) -> Classes {
        classes!(
            "alert",
            format!("alert-{}", self.kind.css()),
            "alert-dismissible",
            "fade",
            (!self.fading).then_some("show"),
        )
    }
}

pub enum AlertAction {
    Show(AlertKind, String),
    Fade(u32),
    Remove(u32),
}

#[derive(Clone, PartialEq, Default, Debug)]
pub struct AlertStore {
    alerts: Vec<Alert>,
    next_id: u32,
}

impl AlertStore {
    pub fn alerts(&self) -> &[Alert] {
        &self.alerts
    }
}

impl Reducible for AlertStore {
    type Action = AlertAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        match action {
            AlertAction::Show(kind, message) => {
                next.alerts.insert(
                    0,
                    Alert {
                        id: next.next_id,
                        kind,
                        message,
                        fading: false,
                    },
                );
                next.next_id = next.next_id.wrapping_add(1);
            }
            AlertAction::Fade(id) => {
                match next.alerts.iter_mut().find(|a| a.id == id) {
                    Some(alert) => alert.fading = true,
                    None => return self,
                }
            }
            AlertAction::Remove(id) => {
                let before = next.alerts.len();
                next.alerts.retain(|a| a.id != id);
                if next.alerts.len() == before {
                    return self;
                }
            }
        }
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn show(store: Rc<AlertStore>, kind: AlertKind, msg: &str) -> Rc<AlertStore> {
        store.reduce(AlertAction::Show(kind, msg.to_string()))
    }

    #[test]
    fn test_newest_first() {
        let store = Rc::new(AlertStore::default());
        let store = show(store, AlertKind::Info, "first");
        let store = show(store, AlertKind::Warning, "second");
        let messages: Vec<_> = store.alerts().iter().map(|a| a.message.as_str()).collect();
        assert_eq!(messages, vec!["second", "first"]);
        assert_ne!(store.alerts()[0].id, store.alerts()[1].id);
    }

    #[test]
    fn test_fade_then_remove() {
        let store = show(Rc::new(AlertStore::default()), AlertKind::Success, "saved");
        let id = store.alerts()[0].id;

        let store = store.reduce(AlertAction::Fade(id));
        assert!(store.alerts()[0].fading);

        let store = store.reduce(AlertAction::Remove(id));
        assert!(store.alerts().is_empty());
    }

    #[test]
    fn test_unknown_id_keeps_store() {
        let store = show(Rc::new(AlertStore::default()), AlertKind::Info, "x");
        let same = store.clone().reduce(AlertAction::Remove(99));
        assert!(Rc::ptr_eq(&store, &same));
        let same = store.clone().reduce(AlertAction::Fade(99));
        assert!(Rc::ptr_eq(&store, &same));
    }

    #[test]
    fn test_error_maps_to_danger() {
        assert_eq!(AlertKind::Error.css(), "danger");
        assert_eq!(AlertKind::Warning.css(), "warning");
    }
}
