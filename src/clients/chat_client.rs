use tracing::{debug, info, instrument};

use crate::actor_framework::{Query, ResourceClient};
use crate::chat::{room_id, summarize_conversations, Conversation};
use crate::chat_actor::{ChatError, MessageAction, MessageActionResult};
use crate::domain::{Message, MessageCreate, Role};

/// Client for farmer/vendor chat.
#[derive(Clone)]
pub struct ChatClient {
    inner: ResourceClient<Message>,
}

crate::impl_basic_client!(ChatClient, Message, ChatError, message);

impl ChatClient {
    #[instrument(skip(self, text))]
    pub async fn send_message(
        &self,
        sender_id: String,
        sender_role: Role,
        receiver_id: String,
        text: String,
    ) -> Result<String, ChatError> {
        debug!("Sending request");
        let params = MessageCreate {
            sender_id,
            receiver_id,
            sender_role,
            text,
        };
        self.inner.create(params).await.map_err(ChatError::from)
    }

    /// All messages between two users, oldest first.
    #[instrument(skip(self))]
    pub async fn room_history(&self, a: String, b: String) -> Result<Vec<Message>, ChatError> {
        let room = room_id(&a, &b);
        let query = Query::new(format!("room_id == {}", room), move |m: &Message| m.room_id == room);
        let mut messages = self.inner.list(query).await.map_err(ChatError::from)?;
        messages.sort_by_key(|m| m.timestamp);
        Ok(messages)
    }

    /// The user's chat list: one entry per counterparty, newest first.
    #[instrument(skip(self))]
    pub async fn conversations(&self, user_id: String) -> Result<Vec<Conversation>, ChatError> {
        let sender = user_id.clone();
        let sent = self
            .inner
            .list(Query::new(format!("sender_id == {}", sender), move |m: &Message| {
                m.sender_id == sender
            }))
            .await?;
        let receiver = user_id.clone();
        let received = self
            .inner
            .list(Query::new(format!("receiver_id == {}", receiver), move |m: &Message| {
                m.receiver_id == receiver
            }))
            .await?;

        let conversations = summarize_conversations(&user_id, &sent, &received);
        debug!(count = conversations.len(), "Built conversation list");
        Ok(conversations)
    }

    /// Marks everything `reader` received from `other` as read.
    #[instrument(skip(self))]
    pub async fn mark_room_read(&self, reader: String, other: String) -> Result<usize, ChatError> {
        let room = room_id(&reader, &other);
        let unread = self
            .inner
            .list(Query::new(format!("unread in {}", room), move |m: &Message| {
                m.room_id == room && m.is_unread_for(&reader)
            }))
            .await?;

        let mut marked = 0;
        for message in unread {
            let MessageActionResult::Read(was_unread) =
                self.inner.perform_action(message.id, MessageAction::MarkRead).await?;
            if was_unread {
                marked += 1;
            }
        }
        info!(marked, "Marked messages read");
        Ok(marked)
    }
}
