// src/dsl/callbacks.rs

//! Callback hooks indexed by lifecycle event.

use std::collections::BTreeSet;
use std::fmt;

use crate::errors::{Result, WatchfileError};
use crate::types::{EventName, OneOrMany};

/// Reference to a hook the plugin runtime resolves and runs (a registered
/// listener name or a shell command). The compiler never runs it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Listener(String);

impl Listener {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Listener {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One listener bound to a non-empty set of events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallbackEntry {
    events: BTreeSet<EventName>,
    listener: Listener,
}

impl CallbackEntry {
    pub fn new<I, E>(listener: Listener, events: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<EventName>,
    {
        let events: BTreeSet<EventName> = events.into_iter().map(Into::into).collect();
        if events.is_empty() {
            return Err(WatchfileError::InvalidCallback(format!(
                "callback `{listener}` must name at least one event"
            )));
        }
        Ok(Self { events, listener })
    }

    /// Normalize the two declaration shapes.
    ///
    /// - `listener` + `events`: used as given.
    /// - positional `args`: with more than one argument the first is the
    ///   listener and the second the event(s); with exactly one argument the
    ///   named `listener` must be present and the argument is the event(s).
    pub fn from_declaration(
        listener: Option<String>,
        events: Option<OneOrMany<String>>,
        args: Option<Vec<OneOrMany<String>>>,
    ) -> Result<Self> {
        let (listener, events) = match (args, events) {
            (Some(_), Some(_)) => {
                return Err(WatchfileError::InvalidCallback(
                    "use either `args` or `events`, not both".to_string(),
                ));
            }
            (Some(args), None) if args.len() > 1 => {
                let mut args = args.into_iter();
                let first = args.next();
                let second = args.next();
                match (first, second, listener) {
                    (Some(OneOrMany::One(l)), Some(evs), None) => (l, evs),
                    (_, _, Some(_)) => {
                        return Err(WatchfileError::InvalidCallback(
                            "listener given both as `listener` and in `args`".to_string(),
                        ));
                    }
                    _ => {
                        return Err(WatchfileError::InvalidCallback(
                            "the first positional argument must be a single listener".to_string(),
                        ));
                    }
                }
            }
            (Some(args), None) => match (args.into_iter().next(), listener) {
                (Some(evs), Some(l)) => (l, evs),
                _ => {
                    return Err(WatchfileError::InvalidCallback(
                        "a single positional argument needs a `listener`".to_string(),
                    ));
                }
            },
            (None, Some(evs)) => match listener {
                Some(l) => (l, evs),
                None => {
                    return Err(WatchfileError::InvalidCallback(
                        "callback is missing a `listener`".to_string(),
                    ));
                }
            },
            (None, None) => {
                return Err(WatchfileError::InvalidCallback(
                    "callback is missing its events".to_string(),
                ));
            }
        };

        Self::new(Listener::new(listener), events.into_vec())
    }

    pub fn events(&self) -> &BTreeSet<EventName> {
        &self.events
    }

    pub fn listener(&self) -> &Listener {
        &self.listener
    }

    pub fn handles(&self, event: &EventName) -> bool {
        self.events.contains(event)
    }
}

/// Ordered list of callback entries for one plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CallbackRegistry {
    entries: Vec<CallbackEntry>,
}

impl CallbackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, entry: CallbackEntry) {
        self.entries.push(entry);
    }

    /// Listeners for one event, in declaration order.
    pub fn for_event<'a>(&'a self, event: &'a EventName) -> impl Iterator<Item = &'a Listener> + 'a {
        self.entries
            .iter()
            .filter(move |entry| entry.handles(event))
            .map(CallbackEntry::listener)
    }

    pub fn entries(&self) -> &[CallbackEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one(s: &str) -> OneOrMany<String> {
        OneOrMany::One(s.to_string())
    }

    fn many(items: &[&str]) -> OneOrMany<String> {
        OneOrMany::Many(items.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn single_event_and_event_list_each_make_one_entry() {
        let a = CallbackEntry::from_declaration(Some("hook".into()), Some(one("start")), None).unwrap();
        let b = CallbackEntry::from_declaration(Some("hook".into()), Some(many(&["start", "stop"])), None)
            .unwrap();

        assert_eq!(a.events().iter().cloned().collect::<Vec<_>>(), vec![EventName::Start]);
        assert_eq!(
            b.events().iter().cloned().collect::<Vec<_>>(),
            vec![EventName::Start, EventName::Stop]
        );
    }

    #[test]
    fn positional_args_take_listener_first() {
        let entry =
            CallbackEntry::from_declaration(None, None, Some(vec![one("hook"), many(&["run_all", "reload"])]))
                .unwrap();
        assert_eq!(entry.listener().as_str(), "hook");
        assert!(entry.handles(&EventName::RunAll));
        assert!(entry.handles(&EventName::Reload));
    }

    #[test]
    fn single_positional_arg_without_listener_is_rejected() {
        let err = CallbackEntry::from_declaration(None, None, Some(vec![one("start")])).unwrap_err();
        assert!(matches!(err, WatchfileError::InvalidCallback(_)));
    }

    #[test]
    fn empty_event_list_is_rejected() {
        let err = CallbackEntry::from_declaration(Some("hook".into()), Some(many(&[])), None).unwrap_err();
        assert!(matches!(err, WatchfileError::InvalidCallback(_)));
    }

    #[test]
    fn registry_indexes_by_event_in_order() {
        let mut reg = CallbackRegistry::new();
        reg.register(CallbackEntry::new(Listener::new("a"), ["start"]).unwrap());
        reg.register(CallbackEntry::new(Listener::new("b"), ["stop"]).unwrap());
        reg.register(CallbackEntry::new(Listener::new("c"), ["start", "start_end"]).unwrap());

        let start = EventName::Start;
        let names: Vec<&str> = reg.for_event(&start).map(Listener::as_str).collect();
        assert_eq!(names, vec!["a", "c"]);

        let custom = EventName::from("start_end");
        assert_eq!(reg.for_event(&custom).count(), 1);
    }
}
