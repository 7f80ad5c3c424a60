use rusqlite::Connection;
use swaasth_core::db::open_db_in_memory;
use swaasth_core::{
    AddFamilyMemberRequest, FamilyMember, FamilyMemberRepository, FamilyService, Message,
    MessageDirection, MessageRepository, MessageService, ProfileRepository, RepoError,
    SqliteFamilyMemberRepository, SqliteMessageRepository, SqliteProfileRepository, UserId,
    UserProfile,
};

fn seed_user(conn: &Connection) -> UserId {
    let repo = SqliteProfileRepository::try_new(conn).unwrap();
    repo.create_profile(&UserProfile::new("Asha")).unwrap()
}

#[test]
fn family_member_create_and_get_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let repo = SqliteFamilyMemberRepository::try_new(&conn).unwrap();

    let mut member = FamilyMember::new(user, "Ravi", "son");
    member.phone = Some("+91 98765 43210".to_string());
    member.email = Some("ravi@example.com".to_string());
    member.emergency_contact = true;
    let id = repo.create_family_member(&member).unwrap();

    let loaded = repo.get_family_member(id).unwrap().unwrap();
    assert_eq!(loaded.name, "Ravi");
    assert_eq!(loaded.relationship, "son");
    assert!(loaded.emergency_contact);
    assert!(loaded.created_at > 0);
}

#[test]
fn family_member_contact_shapes_are_validated() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let repo = SqliteFamilyMemberRepository::try_new(&conn).unwrap();

    let mut bad_email = FamilyMember::new(user, "Ravi", "son");
    bad_email.email = Some("not-an-email".to_string());
    assert!(matches!(
        repo.create_family_member(&bad_email).unwrap_err(),
        RepoError::Validation(_)
    ));

    let mut bad_phone = FamilyMember::new(user, "Ravi", "son");
    bad_phone.phone = Some("call me".to_string());
    assert!(matches!(
        repo.create_family_member(&bad_phone).unwrap_err(),
        RepoError::Validation(_)
    ));
}

#[test]
fn family_member_update_delete_lifecycle() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let repo = SqliteFamilyMemberRepository::try_new(&conn).unwrap();

    let mut member = FamilyMember::new(user, "Ravi", "son");
    repo.create_family_member(&member).unwrap();

    member.emergency_contact = true;
    repo.update_family_member(&member).unwrap();
    assert!(
        repo.get_family_member(member.uuid)
            .unwrap()
            .unwrap()
            .emergency_contact
    );

    repo.delete_family_member(member.uuid).unwrap();
    assert!(repo.get_family_member(member.uuid).unwrap().is_none());
    assert!(matches!(
        repo.delete_family_member(member.uuid).unwrap_err(),
        RepoError::NotFound(_)
    ));
}

#[test]
fn family_service_add_reads_back() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let service = FamilyService::new(SqliteFamilyMemberRepository::try_new(&conn).unwrap());

    let created = service
        .add_family_member(&AddFamilyMemberRequest {
            user_uuid: user,
            name: " Meera ".to_string(),
            relationship: "daughter".to_string(),
            phone: None,
            email: None,
            emergency_contact: false,
        })
        .unwrap();

    assert_eq!(created.name, "Meera");
    assert!(!created.emergency_contact);
}

#[test]
fn sent_messages_are_implicitly_read() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let service = MessageService::new(SqliteMessageRepository::try_new(&conn).unwrap());

    let sent = service.send_message(user, "Asha", "Took my tablets").unwrap();
    assert_eq!(sent.direction, MessageDirection::Sent);
    assert!(sent.read);
    assert!(!sent.is_unread());
}

#[test]
fn received_messages_start_unread_and_mark_read_is_idempotent() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let service = MessageService::new(SqliteMessageRepository::try_new(&conn).unwrap());

    let received = service
        .receive_message(user, "Ravi", "Did you take your tablets?")
        .unwrap();
    assert!(!received.read);
    assert!(received.is_unread());

    let read_once = service.mark_read(received.uuid).unwrap();
    assert!(read_once.read);

    let read_twice = service.mark_read(received.uuid).unwrap();
    assert!(read_twice.read);
}

#[test]
fn message_direction_round_trips_through_storage() {
    let conn = open_db_in_memory().unwrap();
    let user = seed_user(&conn);
    let repo = SqliteMessageRepository::try_new(&conn).unwrap();

    let sent = Message::sent(user, "Asha", "hello");
    let received = Message::received(user, "Ravi", "hi");
    repo.create_message(&sent).unwrap();
    repo.create_message(&received).unwrap();

    let loaded_sent = repo.get_message(sent.uuid).unwrap().unwrap();
    let loaded_received = repo.get_message(received.uuid).unwrap().unwrap();
    assert_eq!(loaded_sent.direction, MessageDirection::Sent);
    assert_eq!(loaded_received.direction, MessageDirection::Received);
}

#[test]
fn message_list_is_scoped_and_delete_is_permanent() {
    let conn = open_db_in_memory().unwrap();
    let user_a = seed_user(&conn);
    let user_b = seed_user(&conn);
    let repo = SqliteMessageRepository::try_new(&conn).unwrap();

    let for_a = Message::received(user_a, "Ravi", "ping");
    let for_b = Message::received(user_b, "Meera", "pong");
    repo.create_message(&for_a).unwrap();
    repo.create_message(&for_b).unwrap();

    let listed = repo.list_messages(user_a).unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].sender_name, "Ravi");

    repo.delete_message(for_a.uuid).unwrap();
    assert!(repo.list_messages(user_a).unwrap().is_empty());
}

#[test]
fn mark_read_on_missing_message_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    seed_user(&conn);
    let repo = SqliteMessageRepository::try_new(&conn).unwrap();

    let missing = uuid::Uuid::new_v4();
    let err = repo.mark_message_read(missing).unwrap_err();
    assert!(matches!(err, RepoError::NotFound(id) if id == missing));
}
