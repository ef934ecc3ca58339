//! The unit roster that drives push-notification fan-out.
//!
//! The original deployment hardcoded `FM-1..FM-25` and `DISPATCH-1..DISPATCH-5`
//! at every emit site. Here the roster is injected configuration built at
//! startup from the storage collaborator (with a config fallback), so the
//! notification router never embeds cardinality assumptions and newly issued
//! units participate in fan-out.

use super::foundation::UnitId;

/// The set of units that receive targeted push notifications.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitRoster {
    fire_marshals: Vec<UnitId>,
    dispatchers: Vec<UnitId>,
}

impl UnitRoster {
    /// Builds a roster from explicit unit id lists.
    pub fn new(fire_marshals: Vec<UnitId>, dispatchers: Vec<UnitId>) -> Self {
        Self {
            fire_marshals,
            dispatchers,
        }
    }

    /// Generates the conventional roster `FM-1..FM-n` / `DISPATCH-1..DISPATCH-m`.
    pub fn generated(fire_marshal_count: u32, dispatch_count: u32) -> Self {
        Self {
            fire_marshals: (1..=fire_marshal_count)
                .map(|i| UnitId::new(format!("FM-{}", i)))
                .collect(),
            dispatchers: (1..=dispatch_count)
                .map(|i| UnitId::new(format!("DISPATCH-{}", i)))
                .collect(),
        }
    }

    /// Fire-marshal units, the targets of new-incident pushes.
    pub fn fire_marshals(&self) -> &[UnitId] {
        &self.fire_marshals
    }

    /// Dispatch units, the targets of response and resource-request pushes.
    pub fn dispatchers(&self) -> &[UnitId] {
        &self.dispatchers
    }

    /// True when neither group has any units.
    pub fn is_empty(&self) -> bool {
        self.fire_marshals.is_empty() && self.dispatchers.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_roster_matches_conventional_ids() {
        let roster = UnitRoster::generated(25, 5);
        assert_eq!(roster.fire_marshals().len(), 25);
        assert_eq!(roster.dispatchers().len(), 5);
        assert_eq!(roster.fire_marshals()[0], UnitId::new("FM-1"));
        assert_eq!(roster.fire_marshals()[24], UnitId::new("FM-25"));
        assert_eq!(roster.dispatchers()[4], UnitId::new("DISPATCH-5"));
    }

    #[test]
    fn explicit_roster_keeps_given_order() {
        let roster = UnitRoster::new(
            vec![UnitId::new("FM-31")],
            vec![UnitId::new("DISPATCH-9"), UnitId::new("DISPATCH-1")],
        );
        assert_eq!(roster.fire_marshals(), &[UnitId::new("FM-31")]);
        assert_eq!(roster.dispatchers()[0], UnitId::new("DISPATCH-9"));
    }

    #[test]
    fn empty_roster_is_reported_empty() {
        assert!(UnitRoster::new(Vec::new(), Vec::new()).is_empty());
        assert!(!UnitRoster::generated(1, 0).is_empty());
    }
}
