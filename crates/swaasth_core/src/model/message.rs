//! Family message domain model.
//!
//! # Invariants
//! - Only `received` messages carry a meaningful `read` flag; sent
//!   messages are implicitly read from creation.
//! - The sender is a denormalized display label, not a link to a
//!   `FamilyMember` record.

use crate::model::profile::UserId;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a message record.
pub type MessageId = Uuid;

/// Transfer direction relative to the owning user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MessageDirection {
    /// Written by the owning user.
    Sent,
    /// Delivered to the owning user.
    Received,
}

/// Family chat message record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Stable record ID.
    pub uuid: MessageId,
    /// Owning user account.
    pub user_uuid: UserId,
    /// Sender display label.
    pub sender_name: String,
    /// Message body.
    pub content: String,
    /// Transfer direction relative to the owner.
    pub direction: MessageDirection,
    /// Read flag; meaningful only for `Received`.
    pub read: bool,
    /// Epoch milliseconds, assigned by storage on insert; 0 until persisted.
    pub created_at: i64,
}

/// Validation failures for message writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageValidationError {
    /// Sender label is blank after trim.
    BlankSender,
    /// Body is blank after trim.
    BlankContent,
}

impl Display for MessageValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankSender => write!(f, "message sender must not be blank"),
            Self::BlankContent => write!(f, "message content must not be blank"),
        }
    }
}

impl Error for MessageValidationError {}

impl Message {
    /// Creates a sent message; sent messages start as read.
    pub fn sent(
        user_uuid: UserId,
        sender_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        let mut message = Self::with_id(
            Uuid::new_v4(),
            user_uuid,
            sender_name,
            content,
            MessageDirection::Sent,
        );
        message.read = true;
        message
    }

    /// Creates a received message; received messages start as unread.
    pub fn received(
        user_uuid: UserId,
        sender_name: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self::with_id(
            Uuid::new_v4(),
            user_uuid,
            sender_name,
            content,
            MessageDirection::Received,
        )
    }

    /// Creates a message with a caller-provided stable ID.
    pub fn with_id(
        uuid: MessageId,
        user_uuid: UserId,
        sender_name: impl Into<String>,
        content: impl Into<String>,
        direction: MessageDirection,
    ) -> Self {
        Self {
            uuid,
            user_uuid,
            sender_name: sender_name.into(),
            content: content.into(),
            direction,
            read: matches!(direction, MessageDirection::Sent),
            created_at: 0,
        }
    }

    /// Marks this message as read.
    pub fn mark_read(&mut self) {
        self.read = true;
    }

    /// Returns whether this message counts toward the unread badge.
    pub fn is_unread(&self) -> bool {
        self.direction == MessageDirection::Received && !self.read
    }

    /// Checks write-path invariants.
    pub fn validate(&self) -> Result<(), MessageValidationError> {
        if self.sender_name.trim().is_empty() {
            return Err(MessageValidationError::BlankSender);
        }
        if self.content.trim().is_empty() {
            return Err(MessageValidationError::BlankContent);
        }
        Ok(())
    }
}
