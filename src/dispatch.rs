//! Event routing for the admin session.
//!
//! Every user action is an [`Event`] aimed at a [`Component`]. The
//! [`Dispatcher`] looks up the handler registered for `(component, kind)`,
//! lets it mutate the [`UiSession`] synchronously and returns the [`Effect`]
//! the caller still has to perform, such as sending the draft.

use crate::error::DispatchError;
use crate::session::UiSession;
use model::{HeaderField, LineField, LineHandle};
use std::collections::HashMap;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Component {
    Accounts,
    JournalForm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    AddLine,
    RemoveLine,
    EditLine,
    EditHeader,
    Submit,
    Refresh,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    AddLine,
    RemoveLine(LineHandle),
    EditLine {
        handle: LineHandle,
        field: LineField,
        value: String,
    },
    EditHeader {
        field: HeaderField,
        value: String,
    },
    Submit,
    Refresh,
}

impl Event {
    pub fn kind(&self) -> EventKind {
        match self {
            Event::AddLine => EventKind::AddLine,
            Event::RemoveLine(_) => EventKind::RemoveLine,
            Event::EditLine { .. } => EventKind::EditLine,
            Event::EditHeader { .. } => EventKind::EditHeader,
            Event::Submit => EventKind::Submit,
            Event::Refresh => EventKind::Refresh,
        }
    }
}

/// Follow-up work a handler leaves to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    LineAdded(LineHandle),
    Submit,
    LoadAccounts,
}

pub type Handler = fn(&mut UiSession, &Event) -> Result<Effect, DispatchError>;

/// Handler table keyed by `(component, event kind)`.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    handlers: HashMap<(Component, EventKind), Handler>,
}

impl Dispatcher {
    /// Empty table; every event is unhandled until registered.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// Table with the journal form and account catalog handlers.
    pub fn new() -> Self {
        let mut dispatcher = Self::empty();
        dispatcher.register(Component::JournalForm, EventKind::AddLine, add_line);
        dispatcher.register(Component::JournalForm, EventKind::RemoveLine, remove_line);
        dispatcher.register(Component::JournalForm, EventKind::EditLine, edit_line);
        dispatcher.register(Component::JournalForm, EventKind::EditHeader, edit_header);
        dispatcher.register(Component::JournalForm, EventKind::Submit, submit);
        dispatcher.register(Component::Accounts, EventKind::Refresh, refresh_accounts);
        dispatcher
    }

    /// Registers `handler`, replacing any previous one for the same key.
    pub fn register(&mut self, component: Component, kind: EventKind, handler: Handler) {
        self.handlers.insert((component, kind), handler);
    }

    pub fn handles(&self, component: Component, kind: EventKind) -> bool {
        self.handlers.contains_key(&(component, kind))
    }

    /// Registered keys, in no particular order.
    pub fn routes(&self) -> impl Iterator<Item = (Component, EventKind)> + '_ {
        self.handlers.keys().copied()
    }

    pub fn dispatch(
        &self,
        session: &mut UiSession,
        component: Component,
        event: &Event,
    ) -> Result<Effect, DispatchError> {
        let kind = event.kind();
        let Some(handler) = self.handlers.get(&(component, kind)) else {
            warn!("No handler for {:?} on {:?}", kind, component);
            return Err(DispatchError::Unhandled { component, kind });
        };
        debug!("Dispatching {:?} to {:?}", kind, component);
        handler(session, event)
    }
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new()
    }
}

fn mismatch(expected: EventKind, event: &Event) -> DispatchError {
    DispatchError::PayloadMismatch {
        expected,
        actual: event.kind(),
    }
}

fn add_line(session: &mut UiSession, event: &Event) -> Result<Effect, DispatchError> {
    match event {
        Event::AddLine => Ok(Effect::LineAdded(session.edit(|draft| draft.add_line()))),
        other => Err(mismatch(EventKind::AddLine, other)),
    }
}

fn remove_line(session: &mut UiSession, event: &Event) -> Result<Effect, DispatchError> {
    match event {
        Event::RemoveLine(handle) => {
            session.edit(|draft| draft.remove_line(*handle));
            Ok(Effect::None)
        }
        other => Err(mismatch(EventKind::RemoveLine, other)),
    }
}

fn edit_line(session: &mut UiSession, event: &Event) -> Result<Effect, DispatchError> {
    match event {
        Event::EditLine { handle, field, value } => {
            session.edit(|draft| draft.update_line(*handle, *field, value));
            Ok(Effect::None)
        }
        other => Err(mismatch(EventKind::EditLine, other)),
    }
}

fn edit_header(session: &mut UiSession, event: &Event) -> Result<Effect, DispatchError> {
    match event {
        Event::EditHeader { field, value } => {
            session.edit(|draft| draft.update_header(*field, value));
            Ok(Effect::None)
        }
        other => Err(mismatch(EventKind::EditHeader, other)),
    }
}

fn submit(_session: &mut UiSession, event: &Event) -> Result<Effect, DispatchError> {
    match event {
        Event::Submit => Ok(Effect::Submit),
        other => Err(mismatch(EventKind::Submit, other)),
    }
}

fn refresh_accounts(_session: &mut UiSession, event: &Event) -> Result<Effect, DispatchError> {
    match event {
        Event::Refresh => Ok(Effect::LoadAccounts),
        other => Err(mismatch(EventKind::Refresh, other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    #[test]
    fn test_journal_form_events_edit_the_draft() {
        let dispatcher = Dispatcher::new();
        let mut session = UiSession::default();
        let first = session.draft().handles()[0];

        let effect = dispatcher
            .dispatch(&mut session, Component::JournalForm, &Event::AddLine)
            .unwrap();
        let Effect::LineAdded(second) = effect else {
            panic!("expected a new line, got {effect:?}");
        };

        dispatcher
            .dispatch(
                &mut session,
                Component::JournalForm,
                &Event::EditLine {
                    handle: first,
                    field: LineField::Debit,
                    value: "1,000".to_string(),
                },
            )
            .unwrap();
        dispatcher
            .dispatch(
                &mut session,
                Component::JournalForm,
                &Event::EditHeader {
                    field: HeaderField::Description,
                    value: "Rent".to_string(),
                },
            )
            .unwrap();

        assert_eq!(session.balance().total_debit, Decimal::from(1000));
        assert_eq!(session.draft().description(), "Rent");

        dispatcher
            .dispatch(&mut session, Component::JournalForm, &Event::RemoveLine(second))
            .unwrap();
        assert_eq!(session.draft().handles(), vec![first]);
    }

    #[test]
    fn test_removing_twice_is_a_no_op() {
        let dispatcher = Dispatcher::new();
        let mut session = UiSession::default();
        let first = session.draft().handles()[0];

        for _ in 0..2 {
            let effect = dispatcher
                .dispatch(&mut session, Component::JournalForm, &Event::RemoveLine(first))
                .unwrap();
            assert_eq!(effect, Effect::None);
        }
        assert!(session.draft().is_empty());
    }

    #[test]
    fn test_submit_and_refresh_return_effects() {
        let dispatcher = Dispatcher::new();
        let mut session = UiSession::default();
        assert_eq!(
            dispatcher.dispatch(&mut session, Component::JournalForm, &Event::Submit),
            Ok(Effect::Submit)
        );
        assert_eq!(
            dispatcher.dispatch(&mut session, Component::Accounts, &Event::Refresh),
            Ok(Effect::LoadAccounts)
        );
    }

    #[test]
    fn test_unregistered_key_is_unhandled() {
        let dispatcher = Dispatcher::new();
        let mut session = UiSession::default();
        let err = dispatcher
            .dispatch(&mut session, Component::Accounts, &Event::AddLine)
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::Unhandled {
                component: Component::Accounts,
                kind: EventKind::AddLine,
            }
        );
        assert!(Dispatcher::empty().routes().next().is_none());
        assert_eq!(Dispatcher::new().routes().count(), 6);
    }

    #[test]
    fn test_handler_rejects_wrong_payload() {
        let mut dispatcher = Dispatcher::empty();
        dispatcher.register(Component::JournalForm, EventKind::Submit, add_line);
        let mut session = UiSession::default();

        let err = dispatcher
            .dispatch(&mut session, Component::JournalForm, &Event::Submit)
            .unwrap_err();
        assert_eq!(
            err,
            DispatchError::PayloadMismatch {
                expected: EventKind::AddLine,
                actual: EventKind::Submit,
            }
        );
        assert!(dispatcher.handles(Component::JournalForm, EventKind::Submit));
    }
}
