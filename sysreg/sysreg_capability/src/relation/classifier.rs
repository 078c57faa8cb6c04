use std::sync::Arc;
use tracing::debug;

use sysreg_core::error::Result;
use sysreg_core::id::{CallerId, EntityId};
use sysreg_core::types::Relation;

use super::source::MembershipSource;

/// Derives a caller's single relation to an entity instance.
pub struct RelationClassifier {
    source: Arc<dyn MembershipSource>,
}

impl RelationClassifier {
    pub fn new(source: Arc<dyn MembershipSource>) -> Self {
        Self { source }
    }

    /// Classifies `caller` against `entity`.
    ///
    /// No caller means not logged in, which is anonymous. Lookup failures
    /// are propagated rather than guessed at.
    pub fn classify(&self, caller: Option<CallerId>, entity: EntityId) -> Result<Relation> {
        let Some(caller) = caller else {
            return Ok(Relation::Anonymous);
        };

        if self.source.lookup_owner(entity)? == Some(caller) {
            debug!(caller = %caller, entity = %entity, "caller owns entity");
            return Ok(Relation::Owner);
        }

        let relation = self
            .source
            .lookup_membership(entity, caller)?
            .map_or(Relation::Anonymous, |roles| roles.relation());
        debug!(caller = %caller, entity = %entity, relation = %relation, "classified caller");
        Ok(relation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::relation::{InMemoryMembershipSource, RoleMask};

    fn classifier() -> (InMemoryMembershipSource, RelationClassifier) {
        let source = InMemoryMembershipSource::new();
        let classifier = RelationClassifier::new(Arc::new(source.clone()));
        (source, classifier)
    }

    #[test]
    fn test_no_caller_is_anonymous() {
        let (_, classifier) = classifier();
        let relation = classifier.classify(None, EntityId::new(1)).unwrap();
        assert_eq!(relation, Relation::Anonymous);
    }

    #[test]
    fn test_owner_beats_membership() {
        let (source, classifier) = classifier();
        let project = EntityId::new(1);
        let alice = CallerId::new(10);
        source.set_owner(project, alice);
        source.add_member(project, alice, RoleMask::MEMBER);

        assert_eq!(
            classifier.classify(Some(alice), project).unwrap(),
            Relation::Owner
        );
    }

    #[test]
    fn test_membership_and_stranger() {
        let (source, classifier) = classifier();
        let project = EntityId::new(1);
        source.set_owner(project, CallerId::new(1));
        source.add_member(project, CallerId::new(7), RoleMask::PARTICIPANT);

        assert_eq!(
            classifier.classify(Some(CallerId::new(7)), project).unwrap(),
            Relation::Participant
        );
        assert_eq!(
            classifier.classify(Some(CallerId::new(8)), project).unwrap(),
            Relation::Anonymous
        );
    }
}
