use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Role;

/// A chat message between a farmer and a vendor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub sender_id: String,
    pub receiver_id: String,
    pub sender_role: Role,
    pub room_id: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
    pub read: bool,
}

#[derive(Debug, Clone)]
pub struct MessageCreate {
    pub sender_id: String,
    pub receiver_id: String,
    pub sender_role: Role,
    pub text: String,
}

impl Message {
    /// The other participant, seen from `user_id`.
    pub fn counterparty(&self, user_id: &str) -> &str {
        if self.sender_id == user_id {
            &self.receiver_id
        } else {
            &self.sender_id
        }
    }

    pub fn is_unread_for(&self, user_id: &str) -> bool {
        self.receiver_id == user_id && !self.read
    }
}
