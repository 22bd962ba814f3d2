use std::sync::Arc;
use std::time::Duration;

use async_openai::{
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestSystemMessage, ChatCompletionRequestUserMessage,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use common::{
    error::AppError,
    language::Language,
    storage::{
        db::SurrealDbClient,
        types::{
            chat_message::{ChatMessage, MessageRole},
            chat_session::ChatSession,
            document::Document,
        },
    },
    utils::config::AppConfig,
};
use retrieval_pipeline::find_relevant_chunks;
use tracing::{error, info, instrument, warn};

use crate::{cache::ResponseCache, messages, quick_reply};

const RETRIEVAL_MAX_CHUNKS: usize = 8;
const RETRIEVAL_MAX_CONTEXT_TOKENS: usize = 3000;

/// Capability questions get a wider context so the topic summary can cover
/// more of the corpus.
const CAPABILITY_MAX_CHUNKS: usize = 12;
const CAPABILITY_MAX_CONTEXT_TOKENS: usize = 4500;

const COMPLETION_MAX_TOKENS: u32 = 700;
const COMPLETION_TEMPERATURE: f32 = 0.3;
const COMPLETION_PRESENCE_PENALTY: f32 = 0.1;
const COMPLETION_FREQUENCY_PENALTY: f32 = 0.1;

/// Identifies the client conversation for message recording.
#[derive(Debug, Clone)]
pub struct SessionContext {
    pub session_id: String,
    pub ip_address: Option<String>,
}

/// The textual answer plus the documents that contributed context to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatAnswer {
    pub response: String,
    pub document_ids: Vec<String>,
}

impl ChatAnswer {
    fn text_only(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            document_ids: Vec::new(),
        }
    }
}

/// Orchestrates one question end to end: intent shortcuts, cache lookup,
/// retrieval, the completion call, and cache population.
pub struct ChatService {
    db: Arc<SurrealDbClient>,
    openai_client: Arc<Client<OpenAIConfig>>,
    pub(crate) cache: ResponseCache,
    model: String,
    completion_timeout: Duration,
}

impl ChatService {
    pub fn new(
        db: Arc<SurrealDbClient>,
        openai_client: Arc<Client<OpenAIConfig>>,
        config: &AppConfig,
    ) -> Self {
        Self {
            db,
            openai_client,
            cache: ResponseCache::new(),
            model: config.completion_model.clone(),
            completion_timeout: Duration::from_secs(config.completion_timeout_secs),
        }
    }

    /// Answers a question in the requested language. Every path produces a
    /// textual response; internal failures are logged and surfaced as the
    /// localized processing-error reply rather than propagated.
    #[instrument(skip_all, fields(language = %language))]
    pub async fn answer(
        &self,
        question: &str,
        language: Language,
        session: Option<&SessionContext>,
    ) -> ChatAnswer {
        let question = question.trim();
        self.record_message(session, language, MessageRole::User, question, &[])
            .await;

        if let Some(reply) = quick_reply::quick_reply(question, language) {
            info!("Answering with quick reply");
            self.record_message(session, language, MessageRole::Bot, reply, &[])
                .await;
            self.cache.put(question, language, reply);
            return ChatAnswer::text_only(reply);
        }

        if let Some(cached) = self.cache.get(question, language) {
            info!("Returning cached answer");
            self.record_message(session, language, MessageRole::Bot, &cached, &[])
                .await;
            return ChatAnswer::text_only(cached);
        }

        match self.retrieve_and_complete(question, language).await {
            Ok(Some(answer)) => {
                self.record_message(
                    session,
                    language,
                    MessageRole::Bot,
                    &answer.response,
                    &answer.document_ids,
                )
                .await;
                self.cache.put(question, language, &answer.response);
                answer
            }
            Ok(None) => {
                warn!("No active documents, cannot answer");
                let reply = messages::no_documents(language);
                self.record_message(session, language, MessageRole::Bot, reply, &[])
                    .await;
                ChatAnswer::text_only(reply)
            }
            Err(err) => {
                error!(error = %err, "Failed to answer question");
                let reply = messages::processing_error(language);
                self.record_message(session, language, MessageRole::Bot, reply, &[])
                    .await;
                ChatAnswer::text_only(reply)
            }
        }
    }

    /// Runs retrieval and the completion call. `Ok(None)` means there are no
    /// active documents to ground an answer in.
    async fn retrieve_and_complete(
        &self,
        question: &str,
        language: Language,
    ) -> Result<Option<ChatAnswer>, AppError> {
        if Document::count_active(&self.db).await? == 0 {
            return Ok(None);
        }

        let capability = quick_reply::is_capability_question(question);
        let (max_chunks, max_context_tokens) = if capability {
            (CAPABILITY_MAX_CHUNKS, CAPABILITY_MAX_CONTEXT_TOKENS)
        } else {
            (RETRIEVAL_MAX_CHUNKS, RETRIEVAL_MAX_CONTEXT_TOKENS)
        };
        // an empty query makes the pipeline fall back to earliest content,
        // which is exactly what a topic summary should be built from
        let retrieval_query = if capability { "" } else { question };

        let retrieved =
            find_relevant_chunks(&self.db, retrieval_query, max_chunks, max_context_tokens)
                .await?;

        let system_prompt = messages::system_prompt(language, &retrieved.content);
        let user_message = if capability {
            messages::capability_instruction(language).to_owned()
        } else {
            question.to_owned()
        };

        let response = self.complete(system_prompt, user_message).await?;
        Ok(Some(ChatAnswer {
            response,
            document_ids: retrieved.document_ids,
        }))
    }

    async fn complete(
        &self,
        system_prompt: String,
        user_message: String,
    ) -> Result<String, AppError> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages([
                ChatCompletionRequestSystemMessage::from(system_prompt).into(),
                ChatCompletionRequestUserMessage::from(user_message).into(),
            ])
            .max_tokens(COMPLETION_MAX_TOKENS)
            .temperature(COMPLETION_TEMPERATURE)
            .presence_penalty(COMPLETION_PRESENCE_PENALTY)
            .frequency_penalty(COMPLETION_FREQUENCY_PENALTY)
            .build()?;

        let response = tokio::time::timeout(
            self.completion_timeout,
            self.openai_client.chat().create(request),
        )
        .await??;

        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
            .filter(|content| !content.is_empty())
            .ok_or_else(|| AppError::Completion("No content in completion response".into()))
    }

    /// Best-effort message recording: storage trouble is logged, never
    /// allowed to block an answer.
    async fn record_message(
        &self,
        session: Option<&SessionContext>,
        language: Language,
        role: MessageRole,
        content: &str,
        document_ids: &[String],
    ) {
        let Some(session) = session else {
            return;
        };

        if let Err(err) =
            ChatSession::touch(&self.db, &session.session_id, session.ip_address.clone()).await
        {
            warn!(error = %err, "Failed to touch chat session");
        }

        let message = ChatMessage::new(
            session.session_id.clone(),
            language,
            role,
            content.to_owned(),
            document_ids.to_vec(),
        );
        if let Err(err) = self.db.store_item(message).await {
            warn!(error = %err, "Failed to record chat message");
        }
    }
}
