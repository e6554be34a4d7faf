use crate::{entities::ChatMessage, external::TextGenerator};

pub const GREETING_PROMPT: &str = "hello!";
pub const FAILURE_REPLY: &str = "Sorry, I could not answer that. Please try again.";

/// What the user sees when the text service fails.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ChatFailurePolicy {
    /// Log the failure; the transcript is left unchanged.
    #[default]
    LogOnly,
    /// Log the failure and append an apology reply.
    Visible,
}

#[derive(Clone, Debug, Default)]
pub struct ChatSession {
    pub input: String,
    transcript: Vec<ChatMessage>,
    loading: bool,
    policy: ChatFailurePolicy,
}

impl ChatSession {
    pub fn new(policy: ChatFailurePolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn policy(&self) -> ChatFailurePolicy {
        self.policy
    }

    /// Seeds the transcript with the model's answer to a greeting and returns
    /// it for the welcome banner.
    #[tracing::instrument(skip(self, text))]
    pub async fn greet(&mut self, text: &dyn TextGenerator) -> Option<String> {
        match text.complete(GREETING_PROMPT).await {
            Ok(reply) => {
                self.transcript = vec![ChatMessage::reply(reply.clone())];
                Some(reply)
            }
            Err(err) => {
                tracing::error!("error initializing chat: {}", err);
                self.on_failure();
                None
            }
        }
    }

    /// Sends the current input. Whitespace-only input is ignored.
    #[tracing::instrument(skip(self, text))]
    pub async fn send(&mut self, text: &dyn TextGenerator) {
        if self.input.trim().is_empty() {
            return;
        }

        self.loading = true;

        let message = ChatMessage::user(self.input.clone());
        self.transcript.push(message.clone());

        match text.complete(&message.text).await {
            Ok(reply) => self.transcript.push(ChatMessage::reply(reply)),
            Err(err) => {
                tracing::error!("error sending message: {}", err);
                self.on_failure();
            }
        }

        self.loading = false;
        self.input.clear();
    }

    pub fn clear(&mut self) {
        self.transcript.clear();
    }

    fn on_failure(&mut self) {
        if self.policy == ChatFailurePolicy::Visible {
            self.transcript.push(ChatMessage::reply(FAILURE_REPLY));
        }
    }
}
