//! Entity trait: identity + continuity across snapshots.

/// Entity marker + minimal interface.
///
/// Inventory items and suppliers are both read from the data store as
/// snapshots; identity is what lets logs and outreach results point back at
/// the stored record.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Human-readable name used in logs and generated text.
    fn display_name(&self) -> &str;
}

/// Ids that occur more than once, in order of their second occurrence.
///
/// List-shaped collections can repeat a record id; keyed maps cannot.
pub fn duplicate_ids<E: Entity>(records: &[E]) -> Vec<&E::Id> {
    let mut seen = std::collections::HashSet::new();
    let mut dupes = Vec::new();
    for record in records {
        let id = record.id();
        if !seen.insert(id) && !dupes.contains(&id) {
            dupes.push(id);
        }
    }
    dupes
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Named(u32, &'static str);

    impl Entity for Named {
        type Id = u32;

        fn id(&self) -> &u32 {
            &self.0
        }

        fn display_name(&self) -> &str {
            self.1
        }
    }

    #[test]
    fn reports_each_duplicate_once() {
        let records = [Named(1, "a"), Named(2, "b"), Named(1, "c"), Named(1, "d"), Named(2, "e")];
        assert_eq!(duplicate_ids(&records), vec![&1, &2]);
        assert_eq!(records[2].display_name(), "c");
        assert!(duplicate_ids::<Named>(&[]).is_empty());
    }
}
