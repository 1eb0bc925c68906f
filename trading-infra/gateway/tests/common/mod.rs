//! Scripted in-memory transport shared by the integration tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use gateway::{FeedSession, FeedTransport, TransportError};

/// What one connection attempt does
pub enum Step {
    /// Handshake fails
    Fail,
    /// Handshake never completes
    Stall,
    /// Handshake succeeds and the session plays these frames
    Session(Vec<Frame>),
}

/// What one read from a session returns
pub enum Frame {
    Text(String),
    /// Transport read error
    Error,
    /// Remote closes the socket
    Close,
    /// Wait, then move on to the next frame
    Delay(Duration),
    /// Block forever
    Hang,
    /// Panic inside the read
    Panic,
}

pub fn text(s: &str) -> Frame {
    Frame::Text(s.to_string())
}

/// Transport that replays a script; once exhausted every connect fails
#[derive(Clone, Default)]
pub struct ScriptedTransport {
    script: Arc<Mutex<VecDeque<Step>>>,
    connects: Arc<AtomicU32>,
    sent: Arc<Mutex<Vec<String>>>,
}

impl ScriptedTransport {
    pub fn new(steps: Vec<Step>) -> Self {
        ScriptedTransport {
            script: Arc::new(Mutex::new(steps.into())),
            ..Default::default()
        }
    }

    /// Number of connection attempts so far
    pub fn connects(&self) -> u32 {
        self.connects.load(Ordering::SeqCst)
    }

    /// Every text frame sent by the client
    pub fn sent(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl FeedTransport for ScriptedTransport {
    type Session = ScriptedSession;

    async fn connect(&self, _endpoint: &str) -> Result<ScriptedSession, TransportError> {
        self.connects.fetch_add(1, Ordering::SeqCst);
        let step = self.script.lock().unwrap().pop_front();
        match step {
            Some(Step::Session(frames)) => Ok(ScriptedSession {
                frames: frames.into(),
                sent: Arc::clone(&self.sent),
            }),
            Some(Step::Stall) => std::future::pending().await,
            Some(Step::Fail) | None => Err(TransportError::Connect("refused".to_string())),
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
        loop {
            match self.frames.pop_front() {
                Some(Frame::Text(text)) => return Some(Ok(text)),
                Some(Frame::Error) => {
                    return Some(Err(TransportError::Receive("reset".to_string())));
                }
                Some(Frame::Delay(delay)) => tokio::time::sleep(delay).await,
                Some(Frame::Hang) => std::future::pending::<()>().await,
                Some(Frame::Panic) => panic!("scripted session panicked"),
                Some(Frame::Close) | None => return None,
            }
        }
    }
}
