//! Family message use-case service.
//!
//! # Invariants
//! - Sending creates an implicitly-read `sent` record; receiving creates
//!   an unread `received` record.
//! - Marking read is the only mutation after creation.

use crate::model::message::{Message, MessageId};
use crate::model::profile::UserId;
use crate::repo::message_repo::MessageRepository;
use crate::service::{CareServiceError, ServiceResult};

/// Message service facade over repository implementations.
pub struct MessageService<R: MessageRepository> {
    repo: R,
}

impl<R: MessageRepository> MessageService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Records a message written by the owning user.
    pub fn send_message(
        &self,
        user_uuid: UserId,
        sender_name: &str,
        content: &str,
    ) -> ServiceResult<Message> {
        let message = Message::sent(user_uuid, sender_name.trim(), content.trim());
        let id = self.repo.create_message(&message)?;
        self.read_back(id)
    }

    /// Records a message delivered to the owning user; starts unread.
    pub fn receive_message(
        &self,
        user_uuid: UserId,
        sender_name: &str,
        content: &str,
    ) -> ServiceResult<Message> {
        let message = Message::received(user_uuid, sender_name.trim(), content.trim());
        let id = self.repo.create_message(&message)?;
        self.read_back(id)
    }

    /// Lists one user's messages, newest first.
    pub fn list_messages(&self, user_uuid: UserId) -> ServiceResult<Vec<Message>> {
        Ok(self.repo.list_messages(user_uuid)?)
    }

    /// Marks one message read and returns the updated record.
    pub fn mark_read(&self, id: MessageId) -> ServiceResult<Message> {
        self.repo.mark_message_read(id)?;
        self.read_back(id)
    }

    /// Permanently deletes one message.
    pub fn delete_message(&self, id: MessageId) -> ServiceResult<()> {
        self.repo.delete_message(id)?;
        Ok(())
    }

    fn read_back(&self, id: MessageId) -> ServiceResult<Message> {
        self.repo
            .get_message(id)?
            .ok_or(CareServiceError::InconsistentState(
                "written message not found in read-back",
            ))
    }
}
