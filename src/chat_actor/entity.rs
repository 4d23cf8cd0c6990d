use chrono::Utc;

use super::actions::{MessageAction, MessageActionResult};
use crate::actor_framework::Entity;
use crate::chat::room_id;
use crate::domain::{Message, MessageCreate};

impl Entity for Message {
    type Id = String;
    type CreateParams = MessageCreate;
    type Patch = ();
    type Action = MessageAction;
    type ActionResult = MessageActionResult;

    fn id(&self) -> &String {
        &self.id
    }

    /// Stamps the message and files it under the pair's room.
    fn from_create_params(id: String, params: MessageCreate) -> Result<Self, String> {
        if params.text.trim().is_empty() {
            return Err("Message text is empty".to_string());
        }
        if params.sender_id == params.receiver_id {
            return Err("Cannot message yourself".to_string());
        }
        Ok(Self {
            id,
            room_id: room_id(&params.sender_id, &params.receiver_id),
            sender_id: params.sender_id,
            receiver_id: params.receiver_id,
            sender_role: params.sender_role,
            text: params.text,
            timestamp: Utc::now(),
            read: false,
        })
    }

    fn on_update(&mut self, _patch: ()) -> Result<(), String> {
        Ok(())
    }

    fn handle_action(&mut self, action: MessageAction) -> Result<MessageActionResult, String> {
        match action {
            MessageAction::MarkRead => {
                let was_unread = !self.read;
                self.read = true;
                Ok(MessageActionResult::Read(was_unread))
            }
        }
    }
}
