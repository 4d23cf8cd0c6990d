//! Room addressing and conversation summaries for farmer/vendor chat.

use std::collections::HashMap;

use chrono::{DateTime, Utc};

use crate::domain::Message;

/// Deterministic room key for a pair of participants.
///
/// The two ids are sorted and joined with `_`, so the key does not depend on
/// who writes first.
pub fn room_id(a: &str, b: &str) -> String {
    let (first, second) = if a <= b { (a, b) } else { (b, a) };
    format!("{}_{}", first, second)
}

/// Splits a participants value stored in the old pre-joined format (`"a_b"`).
///
/// Ids without `_` split on the only separator. Store ids (`user_12`) contain
/// one themselves, so a longer key is split where both halves have that shape.
/// Returns `None` unless exactly one reading fits.
pub fn parse_legacy_participants(joined: &str) -> Option<(String, String)> {
    let splits: Vec<(&str, &str)> = joined
        .match_indices('_')
        .map(|(i, _)| (&joined[..i], &joined[i + 1..]))
        .filter(|(a, b)| !a.is_empty() && !b.is_empty())
        .collect();

    let chosen = match splits.as_slice() {
        [(a, b)] if !a.contains('_') && !b.contains('_') => (*a, *b),
        _ => {
            let mut shaped = splits.iter().filter(|(a, b)| is_store_id(a) && is_store_id(b));
            let only = shaped.next()?;
            if shaped.next().is_some() {
                return None;
            }
            *only
        }
    };
    Some((chosen.0.to_string(), chosen.1.to_string()))
}

/// `<prefix>_<n>`, the shape of ids minted by the collection actors.
fn is_store_id(id: &str) -> bool {
    match id.split_once('_') {
        Some((prefix, n)) => {
            !prefix.is_empty()
                && prefix.chars().all(|c| c.is_ascii_alphabetic())
                && !n.is_empty()
                && n.chars().all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// One row of a user's chat list.
#[derive(Debug, Clone, PartialEq)]
pub struct Conversation {
    pub counterparty_id: String,
    pub room_id: String,
    pub last_message: String,
    pub last_sender_id: String,
    pub timestamp: DateTime<Utc>,
    pub unread_count: usize,
}

/// Merges the "sent by" and "received by" message sets for `user_id` into one
/// conversation per counterparty, newest conversation first.
///
/// The backend cannot express `sender == me OR receiver == me`, so callers run
/// both queries and hand the results here.
pub fn summarize_conversations(user_id: &str, sent: &[Message], received: &[Message]) -> Vec<Conversation> {
    let mut latest: HashMap<&str, &Message> = HashMap::new();
    let mut unread: HashMap<&str, usize> = HashMap::new();

    for message in sent.iter().chain(received) {
        let other = message.counterparty(user_id);
        if message.is_unread_for(user_id) {
            *unread.entry(other).or_default() += 1;
        }
        latest
            .entry(other)
            .and_modify(|current| {
                if message.timestamp > current.timestamp {
                    *current = message;
                }
            })
            .or_insert(message);
    }

    let mut conversations: Vec<Conversation> = latest
        .into_iter()
        .map(|(other, message)| Conversation {
            counterparty_id: other.to_string(),
            room_id: message.room_id.clone(),
            last_message: message.text.clone(),
            last_sender_id: message.sender_id.clone(),
            timestamp: message.timestamp,
            unread_count: unread.get(other).copied().unwrap_or(0),
        })
        .collect();
    conversations.sort_by(|a, b| {
        b.timestamp
            .cmp(&a.timestamp)
            .then_with(|| a.counterparty_id.cmp(&b.counterparty_id))
    });
    conversations
}
