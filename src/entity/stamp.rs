use chrono::{DateTime, Utc};
use mongodb::bson;
use serde::{Deserialize, Serialize};

use crate::models::TimeStamp;

/// Creation and update instants as native BSON dates (millisecond precision).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTimeStamp {
    pub created_at: bson::DateTime,
    pub updated_at: bson::DateTime,
}

impl StoredTimeStamp {
    pub fn now() -> Self {
        let now = bson::DateTime::now();
        Self {
            created_at: now,
            updated_at: now,
        }
    }
}

pub fn to_chrono(value: bson::DateTime) -> DateTime<Utc> {
    DateTime::<Utc>::from(value.to_system_time())
}

impl From<StoredTimeStamp> for TimeStamp {
    fn from(stamp: StoredTimeStamp) -> Self {
        TimeStamp {
            created_at: to_chrono(stamp.created_at),
            updated_at: to_chrono(stamp.updated_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use mongodb::bson::{doc, spec::ElementType};

    use super::*;

    #[test]
    fn stored_as_native_dates() {
        let doc = bson::to_document(&StoredTimeStamp::now()).unwrap();
        assert_eq!(
            doc.get("created_at").map(|v| v.element_type()),
            Some(ElementType::DateTime)
        );
        assert_eq!(
            doc.get("updated_at").map(|v| v.element_type()),
            Some(ElementType::DateTime)
        );
    }

    #[test]
    fn converts_to_api_view() {
        let created = bson::DateTime::from_millis(1_700_000_000_000);
        let updated = bson::DateTime::from_millis(1_700_000_360_000);
        let view = TimeStamp::from(StoredTimeStamp {
            created_at: created,
            updated_at: updated,
        });
        assert_eq!(view.created_at.timestamp_millis(), 1_700_000_000_000);
        assert_eq!(view.updated_at.timestamp_millis(), 1_700_000_360_000);
    }

    #[test]
    fn decodes_native_date_document() {
        let raw = doc! {
            "created_at": bson::DateTime::from_millis(1_000),
            "updated_at": bson::DateTime::from_millis(2_000),
        };
        let stamp: StoredTimeStamp = bson::from_document(raw).unwrap();
        assert_eq!(stamp.created_at.timestamp_millis(), 1_000);
        assert_eq!(stamp.updated_at.timestamp_millis(), 2_000);
    }
}
