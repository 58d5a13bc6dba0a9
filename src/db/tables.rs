use redb::TableDefinition;

/// Users collection: user id -> UserRecord (serialized)
pub const USERS: TableDefinition<&str, &[u8]> = TableDefinition::new("users");

/// Unique index: normalized email -> user id
pub const USER_EMAILS: TableDefinition<&str, &str> = TableDefinition::new("user_emails");

/// Unique index: username -> user id
pub const USER_USERNAMES: TableDefinition<&str, &str> = TableDefinition::new("user_usernames");

/// Games collection: game id -> GameRecord (serialized)
pub const GAMES: TableDefinition<&str, &[u8]> = TableDefinition::new("games");
