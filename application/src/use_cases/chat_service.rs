//! Chat use case: the widget's send-and-reply flow.
//!
//! Wires the session store to the external assistant endpoint. The user's
//! message is recorded synchronously before the transport call, so a failed
//! reply leaves the question in the thread while the error surfaces to the
//! caller.

use crate::ports::gateways::{AssistantGateway, GatewayError};
use crate::use_cases::session_service::SessionService;
use clearflow_domain::{Locale, MessageRole};
use std::sync::Arc;
use tracing::{debug, info};

/// Chat widget flow over a [`SessionService`] and an assistant endpoint.
pub struct ChatService {
    sessions: SessionService,
    assistant: Arc<dyn AssistantGateway>,
    locale: Locale,
    greeting: String,
}

impl ChatService {
    pub fn new(
        sessions: SessionService,
        assistant: Arc<dyn AssistantGateway>,
        locale: Locale,
        greeting: impl Into<String>,
    ) -> Self {
        Self {
            sessions,
            assistant,
            locale,
            greeting: greeting.into(),
        }
    }

    pub fn sessions(&self) -> &SessionService {
        &self.sessions
    }

    pub fn sessions_mut(&mut self) -> &mut SessionService {
        &mut self.sessions
    }

    /// Send a user message and append the assistant's reply.
    ///
    /// Ensures a valid active session first, so the append can never be
    /// dropped. On transport failure the user message stays in the thread
    /// and the error is returned for the UI to surface as transient.
    pub async fn send(&mut self, text: &str) -> Result<String, GatewayError> {
        let session_id = self.sessions.ensure_active_session(self.greeting.clone());
        debug!("Chat send in session {}", session_id);

        self.sessions.append_message(MessageRole::User, text);

        let reply = self.assistant.reply(text, self.locale).await?;
        self.sessions.append_message(MessageRole::Assistant, reply.clone());
        Ok(reply)
    }

    /// Start a fresh conversation seeded with the current greeting.
    pub fn new_session(&mut self) -> String {
        self.sessions.create_session(self.greeting.clone())
    }

    /// Switch the widget locale: later sessions greet in the new language
    /// and the active session's seed message is rewritten in place.
    pub fn switch_locale(&mut self, locale: Locale, greeting: impl Into<String>) {
        info!("Chat locale switched to {}", locale);
        self.locale = locale;
        self.greeting = greeting.into();
        self.sessions.update_seed_message(self.greeting.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::state_store::MemoryStateStore;
    use async_trait::async_trait;

    struct CannedAssistant;

    #[async_trait]
    impl AssistantGateway for CannedAssistant {
        async fn reply(&self, prompt: &str, _locale: Locale) -> Result<String, GatewayError> {
            Ok(format!("You asked: {}", prompt))
        }
    }

    struct DownAssistant;

    #[async_trait]
    impl AssistantGateway for DownAssistant {
        async fn reply(&self, _prompt: &str, _locale: Locale) -> Result<String, GatewayError> {
            Err(GatewayError::ConnectionError("assistant offline".to_string()))
        }
    }

    fn service(assistant: Arc<dyn AssistantGateway>) -> ChatService {
        let sessions = SessionService::load(Arc::new(MemoryStateStore::new()));
        ChatService::new(sessions, assistant, Locale::En, "How can we help?")
    }

    #[tokio::test]
    async fn test_send_appends_both_sides() {
        let mut chat = service(Arc::new(CannedAssistant));

        let reply = chat.send("Do you sell filters?").await.unwrap();
        assert_eq!(reply, "You asked: Do you sell filters?");

        let session = chat.sessions().active_session().unwrap();
        // seed + user + assistant
        assert_eq!(session.messages.len(), 3);
        assert_eq!(session.messages[1].role, MessageRole::User);
        assert_eq!(session.messages[2].role, MessageRole::Assistant);
    }

    #[tokio::test]
    async fn test_failed_reply_keeps_user_message() {
        let mut chat = service(Arc::new(DownAssistant));

        let result = chat.send("hello?").await;
        assert!(result.is_err());

        let session = chat.sessions().active_session().unwrap();
        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[1].text, "hello?");
    }

    #[tokio::test]
    async fn test_switch_locale_rewrites_seed() {
        let mut chat = service(Arc::new(CannedAssistant));
        chat.send("hi").await.unwrap();

        chat.switch_locale(Locale::Ar, "مرحبا! كيف نساعدك؟");

        let session = chat.sessions().active_session().unwrap();
        assert_eq!(session.messages[0].text, "مرحبا! كيف نساعدك؟");
        // Later messages untouched
        assert_eq!(session.messages[1].text, "hi");
    }
}
