//! Per-session state for the interactive assistant.
//!
//! A session belongs to one caller for one process run. The transcript lives
//! in memory only.

use crate::role::Role;
use std::fmt;

/// Who wrote a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Assistant,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::User => write!(f, "user"),
            Speaker::Assistant => write!(f, "assistant"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub speaker: Speaker,
    pub text: String,
}

#[derive(Debug, Clone)]
pub struct Session {
    username: String,
    role: Role,
    transcript: Vec<Message>,
}

impl Session {
    pub fn new(username: impl Into<String>, role: Role) -> Self {
        Self {
            username: username.into(),
            role,
            transcript: Vec::new(),
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn record(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.transcript.push(Message {
            speaker,
            text: text.into(),
        });
    }

    /// Greeting shown when the chat loop starts.
    pub fn greeting(&self) -> String {
        format!(
            "Hello {}! You are logged in as {}. Type 'exit' to leave.",
            self.username, self.role
        )
    }
}

/// True if `line` asks to leave the chat loop.
pub fn is_exit_command(line: &str) -> bool {
    matches!(line.trim().to_lowercase().as_str(), "exit" | "quit" | "esci")
}
