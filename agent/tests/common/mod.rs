//! In-memory feed transport for driving the monitor without a network

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use gateway::{FeedSession, FeedTransport, TransportError};

/// Frames one accepted connection plays back
pub enum Frame {
    Text(String),
    /// Remote closes the socket
    Close,
    /// Block until cancelled
    Hang,
    /// Panic inside the read
    Panic,
}

pub fn text(s: &str) -> Frame {
    Frame::Text(s.to_string())
}

/// Each connect pops the next session; once empty every connect fails
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    sessions: Arc<Mutex<VecDeque<Vec<Frame>>>>,
    connects: Arc<AtomicU32>,
    sent: Arc<Mutex<Vec<String>>>,
}

impl ScriptedTransport {
    pub fn new(sessions: Vec<Vec<Frame>>) -> Self {
        ScriptedTransport {
            sessions: Arc::new(Mutex::new(sessions.into())),
            ..Default::default()
        }
    }

    pub fn connects(&self) -> u32 {
        self.connects.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedTransport for ScriptedTransport {
    type Session = ScriptedSession;

    async fn connect(&self, _endpoint: &str) -> Result<ScriptedSession, TransportError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        let frames = self.sessions.lock().unwrap().pop_front();
        match frames {
            Some(frames) => Ok(ScriptedSession {
                frames: frames.into(),
                sent: Arc::clone(&self.sent),
            }),
            None => Err(TransportError::Connect("refused".to_string())),
        }
    }
}

pub struct ScriptedSession {
    frames: VecDeque<Frame>,
    sent: Arc<Mutex<Vec<String>>>,
}

#[async_trait]
impl FeedSession for ScriptedSession {
    async fn send_text(&mut self, text: String) -> Result<(), TransportError> {
        self.sent.lock().unwrap().push(text);
        Ok(())
    }

    async fn next_text(&mut self) -> Option<Result<String, TransportError>> {
        match self.frames.pop_front() {
            Some(Frame::Text(text)) => Some(Ok(text)),
            Some(Frame::Hang) => std::future::pending().await,
            Some(Frame::Panic) => panic!("scripted session panicked"),
            Some(Frame::Close) | None => None,
        }
    }
}
