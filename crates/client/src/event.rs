//! Lifecycle events and their listener registry.
//!
//! Three fixed points in request processing can be observed: after a
//! request's options have been staged on its transport handle
//! (`request-built`), after a native transport failure (`error`), and
//! after a response has been assembled (`response-built`). Listeners run
//! synchronously, in registration order, on the thread that called send.
//! Nothing is dispatched asynchronously, and nothing a listener raises is
//! swallowed — a panicking listener unwinds straight out of send.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use tracing::trace;

use crate::protocol::{ClientError, Request, Response};

/// The fixed set of observable lifecycle points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// A request's options have been staged; the transfer has not run yet.
    RequestBuilt,
    /// The native transport reported a failure.
    Error,
    /// A response has been assembled and is about to be returned.
    ResponseBuilt,
}

impl EventKind {
    pub const ALL: [EventKind; 3] = [EventKind::RequestBuilt, EventKind::Error, EventKind::ResponseBuilt];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::RequestBuilt => "request-built",
            EventKind::Error => "error",
            EventKind::ResponseBuilt => "response-built",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = ClientError;

    /// Accepts exactly the three recognized event names.
    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "request-built" => Ok(EventKind::RequestBuilt),
            "error" => Ok(EventKind::Error),
            "response-built" => Ok(EventKind::ResponseBuilt),
            _ => Err(ClientError::invalid_argument(format!("unknown event name: {name}"))),
        }
    }
}

/// Payload handed to listeners.
#[derive(Debug)]
pub enum Event<'a> {
    RequestBuilt(&'a Request),
    Error(&'a ClientError),
    ResponseBuilt(&'a Response),
}

impl Event<'_> {
    /// The registry key this payload dispatches under.
    pub fn kind(&self) -> EventKind {
        match self {
            Event::RequestBuilt(_) => EventKind::RequestBuilt,
            Event::Error(_) => EventKind::Error,
            Event::ResponseBuilt(_) => EventKind::ResponseBuilt,
        }
    }
}

/// A registered lifecycle callback.
pub type Listener = Box<dyn FnMut(&Event<'_>)>;

/// Ordered listener sequences, one per event kind.
///
/// Every kind is present from construction, so registration order is the
/// only ordering listeners ever observe.
pub(crate) struct EventRegistry {
    listeners: HashMap<EventKind, Vec<Listener>>,
}

impl EventRegistry {
    pub(crate) fn new() -> Self {
        let mut listeners = HashMap::with_capacity(EventKind::ALL.len());
        for kind in EventKind::ALL {
            listeners.insert(kind, Vec::new());
        }
        Self { listeners }
    }

    pub(crate) fn register(&mut self, kind: EventKind, listener: Listener) {
        if let Some(sequence) = self.listeners.get_mut(&kind) {
            sequence.push(listener);
        }
    }

    pub(crate) fn emit(&mut self, event: &Event<'_>) {
        if let Some(sequence) = self.listeners.get_mut(&event.kind()) {
            trace!(kind = %event.kind(), listener_count = sequence.len(), "dispatching lifecycle event");
            for listener in sequence.iter_mut() {
                listener(event);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::protocol::{Headers, RequestFactory, Verb};

    #[test]
    fn event_names_round_trip() {
        for kind in EventKind::ALL {
            assert_eq!(kind.as_str().parse::<EventKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_event_name_is_invalid_argument() {
        let err = "shutdown".parse::<EventKind>().unwrap_err();
        assert!(matches!(err, ClientError::InvalidArgument { .. }));
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut registry = EventRegistry::new();
        for tag in [1, 2, 3] {
            let seen = Rc::clone(&seen);
            registry.register(EventKind::RequestBuilt, Box::new(move |_| seen.borrow_mut().push(tag)));
        }

        let request = RequestFactory.build(Verb::Get, "http://localhost/", Headers::new()).unwrap();
        registry.emit(&Event::RequestBuilt(&request));

        assert_eq!(*seen.borrow(), vec![1, 2, 3]);
    }

    #[test]
    fn emit_only_reaches_the_matching_kind() {
        let seen = Rc::new(RefCell::new(0));
        let mut registry = EventRegistry::new();
        {
            let seen = Rc::clone(&seen);
            registry.register(EventKind::Error, Box::new(move |_| *seen.borrow_mut() += 1));
        }

        let request = RequestFactory.build(Verb::Get, "http://localhost/", Headers::new()).unwrap();
        registry.emit(&Event::RequestBuilt(&request));

        assert_eq!(*seen.borrow(), 0);
    }
}
