//! Identifier generation for layout nodes.
//!
//! Every node section in the output is keyed by a unique identifier and
//! children point back at their parent through it. Generation is behind the
//! [`IdGenerator`] trait so tests can use [`SequentialIds`] and get stable output.

use uuid::Uuid;

/// Source of unique identifiers.
pub trait IdGenerator {
    /// Produce a fresh identifier, never returned before in this run.
    fn uuid(&mut self) -> String;

    /// Produce a node identifier of the form `<kind>_<uuid>`.
    fn node_id(&mut self, kind: &str) -> String {
        format!("{}_{}", kind, self.uuid())
    }
}

/// Random v4 UUIDs. Used by the binary.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomIds;

impl IdGenerator for RandomIds {
    fn uuid(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

/// Counter-based identifiers (`1`, `2`, `3`, ...).
#[derive(Debug, Default, Clone)]
pub struct SequentialIds {
    next: u64,
}

impl SequentialIds {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIds {
    fn uuid(&mut self) -> String {
        self.next += 1;
        self.next.to_string()
    }
}
