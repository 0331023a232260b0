//! # Validation Error List
//!
//! The derived per-error view shown next to a validation result, and the
//! generation rule that keeps slow path lookups from an older result out of
//! a newer list.
//!
//! Every call to [`ErrorListState::begin`] rebuilds the list from scratch,
//! bumps the generation and hands back one [`LookupTicket`] per error that
//! carries a path. A ticket's result is applied only while its generation is
//! still current; anything older is discarded without touching the list.

use serde::Serialize;

use xsdnav_core::parse_validation_error;

/// Monotonic counter identifying one validation result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
pub struct Generation(u64);

impl Generation {
    /// Raw counter value.
    pub fn value(self) -> u64 {
        self.0
    }
}

/// One validation error as presented to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationErrorView {
    /// The validator's message, verbatim.
    pub raw: String,
    /// Location prefix, if the message had one.
    pub path: Option<String>,
    /// Message text without the location prefix.
    pub message: String,
    /// Whether `path` resolved against the schema tree.
    pub can_jump: bool,
}

/// A pending path lookup for one entry of the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    /// Generation the lookup was started under.
    pub generation: Generation,
    /// Position of the entry in the list.
    pub index: usize,
    /// The path to resolve.
    pub path: String,
}

/// What happened to a finished lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    /// The entry was updated.
    Applied,
    /// A newer result replaced the list; the lookup was discarded.
    Stale,
    /// The ticket does not address an entry of the current list.
    OutOfRange,
}

/// The error list and its generation counter.
#[derive(Debug, Clone, Default)]
pub struct ErrorListState {
    generation: Generation,
    entries: Vec<ValidationErrorView>,
}

impl ErrorListState {
    /// An empty list at generation zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the list with views of `raw_errors` under a new generation.
    /// Every entry starts with `can_jump = false`.
    pub fn begin<S: AsRef<str>>(&mut self, raw_errors: &[S]) -> Vec<LookupTicket> {
        self.generation = Generation(self.generation.0 + 1);
        self.entries = raw_errors
            .iter()
            .map(|raw| {
                let raw = raw.as_ref();
                let parsed = parse_validation_error(raw);
                ValidationErrorView {
                    raw: raw.to_string(),
                    path: parsed.path,
                    message: parsed.message,
                    can_jump: false,
                }
            })
            .collect();

        self.entries
            .iter()
            .enumerate()
            .filter_map(|(index, entry)| {
                entry.path.as_ref().map(|path| LookupTicket {
                    generation: self.generation,
                    index,
                    path: path.clone(),
                })
            })
            .collect()
    }

    /// Record the result of a lookup started under `ticket.generation`.
    pub fn apply(&mut self, ticket: &LookupTicket, resolved: bool) -> LookupOutcome {
        if ticket.generation != self.generation {
            tracing::trace!(
                ticket = ticket.generation.value(),
                current = self.generation.value(),
                path = %ticket.path,
                "discarding stale path lookup"
            );
            return LookupOutcome::Stale;
        }
        let Some(entry) = self.entries.get_mut(ticket.index) else {
            return LookupOutcome::OutOfRange;
        };
        entry.can_jump = resolved;
        LookupOutcome::Applied
    }

    /// Current generation.
    pub fn generation(&self) -> Generation {
        self.generation
    }

    /// Current entries.
    pub fn entries(&self) -> &[ValidationErrorView] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_splits_messages_and_tickets_only_pathed_entries() {
        let mut list = ErrorListState::new();
        let tickets = list.begin(&["/Schema/A/B: missing value", "unrelated message"]);

        let entries = list.entries();
        assert_eq!(entries[0].path.as_deref(), Some("/Schema/A/B"));
        assert_eq!(entries[0].message, "missing value");
        assert_eq!(entries[1].path, None);
        assert_eq!(entries[1].message, "unrelated message");
        assert!(entries.iter().all(|e| !e.can_jump));

        assert_eq!(tickets.len(), 1);
        assert_eq!(tickets[0].index, 0);
        assert_eq!(tickets[0].path, "/Schema/A/B");
        assert_eq!(tickets[0].generation, list.generation());
    }

    #[test]
    fn current_generation_result_is_applied() {
        let mut list = ErrorListState::new();
        let tickets = list.begin(&["/a: x"]);
        assert_eq!(list.apply(&tickets[0], true), LookupOutcome::Applied);
        assert!(list.entries()[0].can_jump);
    }

    #[test]
    fn failed_lookup_leaves_can_jump_false() {
        let mut list = ErrorListState::new();
        let tickets = list.begin(&["/a: x"]);
        assert_eq!(list.apply(&tickets[0], false), LookupOutcome::Applied);
        assert!(!list.entries()[0].can_jump);
    }

    #[test]
    fn older_generation_result_is_discarded() {
        let mut list = ErrorListState::new();
        let old = list.begin(&["/a: first run"]);
        let new = list.begin(&["/b: second run", "/c: second run"]);
        let before = list.entries().to_vec();

        assert_eq!(list.apply(&old[0], true), LookupOutcome::Stale);
        assert_eq!(list.entries(), before.as_slice());

        assert_eq!(list.apply(&new[1], true), LookupOutcome::Applied);
        assert!(!list.entries()[0].can_jump);
        assert!(list.entries()[1].can_jump);
    }

    #[test]
    fn generation_increases_on_every_result() {
        let mut list = ErrorListState::new();
        let g0 = list.generation();
        list.begin::<&str>(&[]);
        let g1 = list.generation();
        list.begin::<&str>(&[]);
        assert!(g0 < g1 && g1 < list.generation());
    }

    #[test]
    fn out_of_range_ticket_is_reported() {
        let mut list = ErrorListState::new();
        list.begin(&["/a: x"]);
        let ticket = LookupTicket {
            generation: list.generation(),
            index: 7,
            path: "/a".into(),
        };
        assert_eq!(list.apply(&ticket, true), LookupOutcome::OutOfRange);
    }
}
