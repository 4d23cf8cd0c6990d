#[derive(Debug, Clone)]
pub enum MessageAction {
    MarkRead,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MessageActionResult {
    /// `true` when the message was unread before.
    Read(bool),
}
