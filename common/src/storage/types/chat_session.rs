use crate::{error::AppError, storage::db::SurrealDbClient, stored_object};
use uuid::Uuid;

stored_object!(ChatSession, "chat_session", {
    session_id: String,
    ip_address: Option<String>
});

#[derive(serde::Deserialize)]
struct SessionIdRow {
    #[serde(deserialize_with = "deserialize_flexible_id")]
    id: String,
}

impl ChatSession {
    pub fn new(session_id: String, ip_address: Option<String>) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            session_id,
            ip_address,
        }
    }

    /// Creates the session on first contact, bumps `updated_at` on every
    /// later message.
    pub async fn touch(
        db: &SurrealDbClient,
        session_id: &str,
        ip_address: Option<String>,
    ) -> Result<(), AppError> {
        let mut response = db
            .query("SELECT id FROM chat_session WHERE session_id = $session_id LIMIT 1")
            .bind(("session_id", session_id.to_owned()))
            .await?;
        let rows: Vec<SessionIdRow> = response.take(0)?;

        match rows.into_iter().next() {
            Some(row) => {
                db.query("UPDATE type::thing('chat_session', $id) SET updated_at = time::now()")
                    .bind(("id", row.id))
                    .await?;
            }
            None => {
                db.store_item(ChatSession::new(session_id.to_owned(), ip_address))
                    .await?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_touch_is_upsert() {
        let namespace = "test_ns";
        let database = &Uuid::new_v4().to_string();
        let db = SurrealDbClient::memory(namespace, database)
            .await
            .expect("Failed to start in-memory surrealdb");

        ChatSession::touch(&db, "session-1", Some("127.0.0.1".into()))
            .await
            .expect("Failed first touch");
        ChatSession::touch(&db, "session-1", None)
            .await
            .expect("Failed second touch");

        let sessions = db
            .get_all_stored_items::<ChatSession>()
            .await
            .expect("Failed to list sessions");
        assert_eq!(sessions.len(), 1, "touch must not duplicate sessions");
        assert_eq!(sessions[0].session_id, "session-1");
    }
}
