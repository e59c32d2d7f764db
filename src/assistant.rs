//! The boundary between the core and any front end.
//!
//! Front ends collect text, show role-gated controls and display rendered
//! outcomes. They go through `Assistant` for everything else, so RBAC and
//! ledger success classification live in exactly one place.

use crate::ai::TextGenerator;
use crate::dispatch::Dispatcher;
use crate::events::{Event, EventAction, EventLog};
use crate::intent::{Intent, IntentParser};
use crate::ledger::LedgerInvoker;
use crate::outcome::{Outcome, OutcomeText};
use crate::role::Role;
use crate::session::{Session, Speaker};
use serde_json::json;
use tracing::warn;

pub struct Assistant<G, W, R> {
    parser: IntentParser<G>,
    dispatcher: Dispatcher<W, R>,
    events: Option<EventLog>,
}

impl<G, W, R> Assistant<G, W, R>
where
    G: TextGenerator,
    W: LedgerInvoker,
    R: LedgerInvoker,
{
    pub fn new(parser: IntentParser<G>, dispatcher: Dispatcher<W, R>) -> Self {
        Self {
            parser,
            dispatcher,
            events: None,
        }
    }

    /// Append an audit line per request to `log`.
    pub fn with_events(mut self, log: EventLog) -> Self {
        self.events = Some(log);
        self
    }

    pub fn dispatcher(&self) -> &Dispatcher<W, R> {
        &self.dispatcher
    }

    pub fn parse_intent(&self, text: &str, role: Role) -> Intent {
        self.parser.parse_intent(text, role)
    }

    /// Parse `text` and dispatch the result.
    pub fn handle(&self, text: &str, role: Role) -> Outcome {
        self.handle_as(text, role, None)
    }

    /// One chat turn: records both sides in the session transcript and
    /// attributes the event to the session's user.
    pub fn handle_turn(&self, session: &mut Session, text: &str) -> Outcome {
        session.record(Speaker::User, text);
        let outcome = self.handle_as(text, session.role(), Some(session.username()));
        session.record(Speaker::Assistant, outcome.render());
        outcome
    }

    /// Submit an already-structured intent. It passes the same policy gate
    /// as parsed requests.
    pub fn submit(&self, intent: &Intent, role: Role) -> Outcome {
        let outcome = self.dispatcher.dispatch(intent, role);
        self.log_event(EventAction::DirectSubmit, Some(role), None, &intent.name, &outcome);
        outcome
    }

    pub fn submit_transaction(&self, intent: &Intent, role: Role) -> OutcomeText {
        self.submit(intent, role).into()
    }

    /// Look up the asset named by a query intent. Reads take no role.
    pub fn evaluate(&self, intent: &Intent) -> Outcome {
        let outcome = self.dispatcher.lookup(intent);
        self.log_event(EventAction::DirectQuery, None, None, &intent.name, &outcome);
        outcome
    }

    pub fn evaluate_query(&self, intent: &Intent) -> OutcomeText {
        self.evaluate(intent).into()
    }

    fn handle_as(&self, text: &str, role: Role, actor: Option<&str>) -> Outcome {
        let intent = self.parse_intent(text, role);
        let outcome = self.dispatcher.dispatch(&intent, role);
        self.log_event(EventAction::Dispatch, Some(role), actor, &intent.name, &outcome);
        outcome
    }

    fn log_event(
        &self,
        action: EventAction,
        role: Option<Role>,
        actor: Option<&str>,
        intent: &str,
        outcome: &Outcome,
    ) {
        let Some(log) = &self.events else {
            return;
        };

        let mut event = Event::new(action)
            .with_intent(intent)
            .with_details(json!({ "outcome": outcome, "success": outcome.is_success() }));
        if let Some(role) = role {
            event = event.with_role(role);
        }
        if let Some(actor) = actor {
            event = event.with_actor(actor);
        }

        if let Err(e) = log.append(&event) {
            warn!(error = %e, "failed to record event");
        }
    }
}
