mod auth;
mod chat;
mod feedback;
mod home;
mod navigate;

use futures::join;

use crate::external::Capabilities;

pub use auth::{AuthOutcome, SignInForm, SignUpForm};
pub use chat::{ChatFailurePolicy, ChatSession};
pub use feedback::FeedbackForm;
pub use home::HomeScreen;
pub use navigate::NavigateScreen;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Screen {
    Welcome,
    SignIn,
    SignUp,
    Home,
    Navigate,
    Services,
    About,
    ChatBot,
    Feedback,
}

/// Per-screen presentation settings, fixed when the screen is composed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ScreenOptions {
    pub header_shown: bool,
}

impl Screen {
    pub fn options(self) -> ScreenOptions {
        match self {
            Screen::Welcome
            | Screen::SignIn
            | Screen::SignUp
            | Screen::Home
            | Screen::Navigate
            | Screen::Services
            | Screen::About
            | Screen::ChatBot
            | Screen::Feedback => ScreenOptions {
                header_shown: false,
            },
        }
    }

    pub fn is_tab(self) -> bool {
        matches!(self, Screen::Home | Screen::Navigate | Screen::Services)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastDuration {
    Short,
    Long,
}

/// Transient notice; does not block the screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Toast {
    pub message: String,
    pub duration: ToastDuration,
}

impl Toast {
    pub fn short(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: ToastDuration::Short,
        }
    }

    pub fn long(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            duration: ToastDuration::Long,
        }
    }
}

/// Blocking dialog the user has to dismiss.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub message: String,
}

impl Alert {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            title: "Success".into(),
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            title: "Error".into(),
            message: message.into(),
        }
    }
}

/// Composition root: every screen, wired to one set of collaborators.
pub struct Hub {
    capabilities: Capabilities,
    pub home: HomeScreen,
    pub navigate: NavigateScreen,
    pub chat: ChatSession,
    pub feedback: FeedbackForm,
    pub sign_in: SignInForm,
    pub sign_up: SignUpForm,
}

impl Hub {
    pub fn new(capabilities: Capabilities, chat_policy: ChatFailurePolicy) -> Self {
        Self {
            home: HomeScreen::new(capabilities.feed.clone()),
            navigate: NavigateScreen::campus(capabilities.locator.clone()),
            chat: ChatSession::new(chat_policy),
            feedback: FeedbackForm::default(),
            sign_in: SignInForm::default(),
            sign_up: SignUpForm::default(),
            capabilities,
        }
    }

    pub fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    /// Loads the feed and resolves the device position side by side.
    #[tracing::instrument(skip(self))]
    pub async fn start(&mut self) {
        join!(self.home.refresh(), self.navigate.mount());
    }

    pub async fn greet(&mut self) -> Option<String> {
        self.chat.greet(self.capabilities.text.as_ref()).await
    }

    pub async fn send_chat(&mut self) {
        self.chat.send(self.capabilities.text.as_ref()).await;
    }

    pub async fn submit_feedback(&mut self) -> Alert {
        self.feedback.submit(self.capabilities.records.as_ref()).await
    }

    pub async fn sign_in(&mut self) -> AuthOutcome {
        self.sign_in.submit(self.capabilities.auth.as_ref()).await
    }

    pub async fn sign_up(&mut self) -> AuthOutcome {
        self.sign_up.submit(self.capabilities.auth.as_ref()).await
    }
}
