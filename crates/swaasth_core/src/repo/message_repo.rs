//! Message repository contract and SQLite implementation.
//!
//! # Invariants
//! - Write paths call `Message::validate()` before SQL mutations.
//! - `direction` is persisted as the wire labels `sent`/`received`;
//!   unknown labels are rejected on read instead of being masked.

use crate::model::message::{Message, MessageDirection, MessageId};
use crate::model::profile::UserId;
use crate::repo::{
    ensure_connection_ready, flag_to_int, parse_flag, parse_record_uuid, RepoError, RepoResult,
};
use rusqlite::{params, Connection, Row};

const MESSAGE_SELECT_SQL: &str = "SELECT
    uuid,
    user_uuid,
    sender_name,
    content,
    direction,
    read,
    created_at
FROM messages";

const MESSAGE_COLUMNS: &[&str] = &[
    "uuid",
    "user_uuid",
    "sender_name",
    "content",
    "direction",
    "read",
    "created_at",
];

/// Repository interface for message operations.
///
/// Messages are immutable once written except for the read flag; there is
/// no full-record update.
pub trait MessageRepository {
    fn create_message(&self, message: &Message) -> RepoResult<MessageId>;
    fn get_message(&self, id: MessageId) -> RepoResult<Option<Message>>;
    /// Lists one user's messages, newest first.
    fn list_messages(&self, user_uuid: UserId) -> RepoResult<Vec<Message>>;
    /// Marks one message as read. Idempotent for already-read messages.
    fn mark_message_read(&self, id: MessageId) -> RepoResult<()>;
    fn delete_message(&self, id: MessageId) -> RepoResult<()>;
}

/// SQLite-backed message repository.
pub struct SqliteMessageRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMessageRepository<'conn> {
    /// Constructs a repository from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, "messages", MESSAGE_COLUMNS)?;
        Ok(Self { conn })
    }
}

impl MessageRepository for SqliteMessageRepository<'_> {
    fn create_message(&self, message: &Message) -> RepoResult<MessageId> {
        message.validate()?;

        self.conn.execute(
            "INSERT INTO messages (
                uuid,
                user_uuid,
                sender_name,
                content,
                direction,
                read
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                message.uuid.to_string(),
                message.user_uuid.to_string(),
                message.sender_name.as_str(),
                message.content.as_str(),
                direction_to_db(message.direction),
                flag_to_int(message.read),
            ],
        )?;

        Ok(message.uuid)
    }

    fn get_message(&self, id: MessageId) -> RepoResult<Option<Message>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MESSAGE_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_message_row(row)?));
        }

        Ok(None)
    }

    fn list_messages(&self, user_uuid: UserId) -> RepoResult<Vec<Message>> {
        let mut stmt = self.conn.prepare(&format!(
            "{MESSAGE_SELECT_SQL}
             WHERE user_uuid = ?1
             ORDER BY created_at DESC, uuid ASC;"
        ))?;

        let mut rows = stmt.query([user_uuid.to_string()])?;
        let mut messages = Vec::new();
        while let Some(row) = rows.next()? {
            messages.push(parse_message_row(row)?);
        }

        Ok(messages)
    }

    fn mark_message_read(&self, id: MessageId) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE messages SET read = 1 WHERE uuid = ?1;",
            [id.to_string()],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }

    fn delete_message(&self, id: MessageId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM messages WHERE uuid = ?1;", [id.to_string()])?;

        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(())
    }
}

fn parse_message_row(row: &Row<'_>) -> RepoResult<Message> {
    let uuid_text: String = row.get("uuid")?;
    let user_text: String = row.get("user_uuid")?;
    let direction_text: String = row.get("direction")?;

    let message = Message {
        uuid: parse_record_uuid(&uuid_text, "messages.uuid")?,
        user_uuid: parse_record_uuid(&user_text, "messages.user_uuid")?,
        sender_name: row.get("sender_name")?,
        content: row.get("content")?,
        direction: parse_direction(&direction_text)?,
        read: parse_flag(row.get("read")?, "messages.read")?,
        created_at: row.get("created_at")?,
    };
    message.validate()?;
    Ok(message)
}

fn direction_to_db(direction: MessageDirection) -> &'static str {
    match direction {
        MessageDirection::Sent => "sent",
        MessageDirection::Received => "received",
    }
}

fn parse_direction(value: &str) -> RepoResult<MessageDirection> {
    match value {
        "sent" => Ok(MessageDirection::Sent),
        "received" => Ok(MessageDirection::Received),
        other => Err(RepoError::InvalidData(format!(
            "invalid direction `{other}` in messages.direction"
        ))),
    }
}
