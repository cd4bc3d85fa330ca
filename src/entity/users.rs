use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::{entity::StoredTimeStamp, models::UserRole};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: UserRole,
    pub time_stamp: StoredTimeStamp,
}
