use chrono::{DateTime, SubsecRound, Utc};
use uuid::Uuid;

pub trait Entity {
    fn ident(&self) -> Uuid;
    fn version(&self) -> u32;
    fn created(&self) -> DateTime<Utc>;
    fn updated(&self) -> Option<DateTime<Utc>>;
    fn removed(&self) -> Option<DateTime<Utc>>;

    fn is_removed(&self) -> bool {
        self.removed().is_some()
    }
}

/// Data used to restore a entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityData {
    pub(in crate::domain) id: Uuid,
    pub(in crate::domain) created: DateTime<Utc>,
    pub(in crate::domain) updated: Option<DateTime<Utc>>,
    pub(in crate::domain) removed: Option<DateTime<Utc>>,
    pub(in crate::domain) version: u32,
}

impl EntityData {
    pub(in crate::domain) fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created: now(),
            updated: None,
            removed: None,
            version: 1,
        }
    }

    /// Marks a state change.
    pub(in crate::domain) fn touch(&mut self) {
        self.updated = Some(now());
        self.version += 1;
    }

    pub(in crate::domain) fn remove(&mut self) {
        self.removed = Some(now());
    }
}

/// Current time truncated to the microsecond precision of the storage.
pub(in crate::domain) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

macro_rules! impl_entity {
    ($entity:ty) => {
        impl crate::domain::entity::Entity for $entity {
            fn ident(&self) -> uuid::Uuid {
                self.data.id
            }

            fn version(&self) -> u32 {
                self.data.version
            }

            fn created(&self) -> chrono::DateTime<chrono::Utc> {
                self.data.created
            }

            fn updated(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                self.data.updated
            }

            fn removed(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                self.data.removed
            }
        }
    };
}

macro_rules! state_ref {
    ($prop:ident, $rtrn:ty) => {
        pub fn $prop(&self) -> &$rtrn {
            &self.state.$prop
        }
    };
}

macro_rules! state_copy {
    ($prop:ident, $rtrn:ty) => {
        pub fn $prop(&self) -> $rtrn {
            self.state.$prop
        }
    };
}

pub mod blog;
pub mod iam;
