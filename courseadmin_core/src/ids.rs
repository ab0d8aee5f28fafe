use sea_orm::{
    sea_query::{ArrayType, Nullable, ValueType, ValueTypeErr},
    DbErr, QueryResult, TryFromU64, TryGetError, TryGetable, Value,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Declares a typed record id backed by a UUIDv7.
///
/// The second argument is the human readable entity name used in error
/// messages (`"module"`, `"flashcard"`, ...).
macro_rules! define_id {
    ($name:ident, $entity:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            pub const ENTITY: &'static str = $entity;

            /// v7 ids sort by creation time, which the list queries use as the
            /// insertion-order tie-break.
            pub fn new() -> Self {
                Self(Uuid::now_v7())
            }

            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            pub fn into_uuid(self) -> Uuid {
                self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl From<$name> for Value {
            fn from(id: $name) -> Self {
                Value::Uuid(Some(Box::new(id.0)))
            }
        }

        impl TryGetable for $name {
            fn try_get_by<I: sea_orm::ColIdx>(
                res: &QueryResult,
                idx: I,
            ) -> Result<Self, TryGetError> {
                // Keep `TryGetError::Null` intact so `Option<Id>` columns read as `None`.
                let uuid = Uuid::try_get_by(res, idx)?;
                Ok(Self(uuid))
            }
        }

        impl ValueType for $name {
            fn try_from(v: Value) -> Result<Self, ValueTypeErr> {
                match v {
                    Value::Uuid(Some(uuid)) => Ok(Self(*uuid)),
                    _ => Err(ValueTypeErr),
                }
            }

            fn type_name() -> String {
                stringify!($name).to_owned()
            }

            fn array_type() -> ArrayType {
                ArrayType::Uuid
            }

            fn column_type() -> sea_orm::ColumnType {
                sea_orm::ColumnType::Uuid
            }
        }

        impl Nullable for $name {
            fn null() -> Value {
                Value::Uuid(None)
            }
        }

        impl TryFromU64 for $name {
            fn try_from_u64(_: u64) -> Result<Self, DbErr> {
                Err(DbErr::ConvertFromU64(stringify!($name)))
            }
        }
    };
}

// Content
define_id!(ModuleId, "module");
define_id!(FlashcardId, "flashcard");
define_id!(MultipleChoiceId, "multiple choice question");
define_id!(QuizId, "quiz");
define_id!(QuizQuestionId, "quiz question");
define_id!(ResourceId, "resource");
define_id!(BadgeId, "badge");

// Per-user state
define_id!(ProfileId, "profile");
define_id!(ModuleProgressId, "module progress");
define_id!(UserBadgeId, "user badge");
define_id!(QuestionProgressId, "question progress");
define_id!(QuizAttemptId, "quiz attempt");
define_id!(ActivityId, "activity");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_module_id_creation() {
        let id1 = ModuleId::new();
        let id2 = ModuleId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn test_ids_sort_by_creation() {
        let ids: Vec<FlashcardId> = (0..64).map(|_| FlashcardId::new()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(ids, sorted);
    }

    #[test]
    fn test_id_string_conversion() {
        let id = QuizId::new();
        let parsed: QuizId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
        assert!("not-a-uuid".parse::<QuizId>().is_err());
    }

    #[test]
    fn test_id_serializes_as_plain_uuid() {
        let id = BadgeId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
        let back: BadgeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_entity_labels() {
        assert_eq!(ModuleId::ENTITY, "module");
        assert_eq!(QuizQuestionId::ENTITY, "quiz question");
    }
}
