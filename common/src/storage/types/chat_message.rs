use crate::{error::AppError, language::Language, storage::db::SurrealDbClient, stored_object};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum MessageRole {
    User,
    Bot,
}

stored_object!(ChatMessage, "chat_message", {
    session_id: String,
    language: Language,
    role: MessageRole,
    content: String,
    document_ids: Vec<String>
});

impl ChatMessage {
    pub fn new(
        session_id: String,
        language: Language,
        role: MessageRole,
        content: String,
        document_ids: Vec<String>,
    ) -> Self {
        let now = chrono::Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            created_at: now,
            updated_at: now,
            session_id,
            language,
            role,
            content,
            document_ids,
        }
    }

    pub async fn for_session(
        db: &SurrealDbClient,
        session_id: &str,
    ) -> Result<Vec<ChatMessage>, AppError> {
        let mut response = db
            .query("SELECT * FROM chat_message WHERE session_id = $session_id ORDER BY created_at ASC")
            .bind(("session_id", session_id.to_owned()))
            .await?;
        let messages: Vec<ChatMessage> = response.take(0)?;
        Ok(messages)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_messages_are_scoped_to_session() {
        let namespace = "test_ns";
        let database = &Uuid::new_v4().to_string();
        let db = SurrealDbClient::memory(namespace, database)
            .await
            .expect("Failed to start in-memory surrealdb");

        let question = ChatMessage::new(
            "session-1".into(),
            Language::Ru,
            MessageRole::User,
            "Каков порядок остановки?".into(),
            Vec::new(),
        );
        let answer = ChatMessage::new(
            "session-1".into(),
            Language::Ru,
            MessageRole::Bot,
            "Порядок следующий.".into(),
            vec!["doc-1".into()],
        );
        let other = ChatMessage::new(
            "session-2".into(),
            Language::Kz,
            MessageRole::User,
            "Сәлем".into(),
            Vec::new(),
        );

        db.store_item(question).await.expect("Failed to store");
        db.store_item(answer).await.expect("Failed to store");
        db.store_item(other).await.expect("Failed to store");

        let messages = ChatMessage::for_session(&db, "session-1")
            .await
            .expect("Failed to fetch session messages");
        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m.session_id == "session-1"));
        assert_eq!(messages[1].document_ids, vec!["doc-1".to_string()]);
    }
}
