use serde::{Deserialize, Serialize};

/// Monotonic ID generator shared by every campaign object type.
/// Settlements, clans, kingdoms, heroes, parties, and troop types never share an ID.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdGenerator {
    next: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self { next: 1 }
    }

    pub fn starting_from(start: u64) -> Self {
        Self { next: start }
    }

    pub fn next_id(&mut self) -> u64 {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Make sure the next allocated ID is strictly greater than `id`.
    ///
    /// Used when a world is assembled from externally numbered objects.
    pub fn reserve_through(&mut self, id: u64) {
        if self.next <= id {
            self.next = id + 1;
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
