//! Scripted reader used by the session tests

#![allow(dead_code)]

use std::collections::VecDeque;

use yhy_hal::{UartRx, UartTx};
use yhy_protocol::{encode, Frame, FrameParser};

/// Error injected by [`MockReader`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Unplugged;

/// What the mock does after each flushed request
#[derive(Debug, Clone)]
pub enum Reply {
    /// Deliver these chunks, one per read call at most
    Chunks(Vec<Vec<u8>>),
    /// Fail the next read
    Fail,
    /// Stay silent; reads report a closed channel
    Silent,
}

/// Reader double: records requests and replays scripted answers
#[derive(Default)]
pub struct MockReader {
    replies: VecDeque<Reply>,
    rx: VecDeque<Vec<u8>>,
    fail_next_read: bool,
    written: Vec<u8>,
    pub reads: usize,
}

impl MockReader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an answer frame for the next request
    pub fn answer(mut self, command: u16, status: u8, data: &[u8]) -> Self {
        self.replies
            .push_back(Reply::Chunks(vec![response(command, status, data)]));
        self
    }

    /// Queue a raw reply for the next request
    pub fn reply(mut self, reply: Reply) -> Self {
        self.replies.push_back(reply);
        self
    }

    /// Requests written so far, decoded
    pub fn requests(&self) -> Vec<Frame> {
        let mut parser = FrameParser::new();
        let mut frames = Vec::new();
        for &byte in &self.written {
            if let Some(frame) = parser.feed(byte).unwrap() {
                frames.push(frame);
            }
        }
        frames
    }

    /// Command codes written so far
    pub fn commands(&self) -> Vec<u16> {
        self.requests().iter().map(|f| f.command).collect()
    }

    pub fn written(&self) -> &[u8] {
        &self.written
    }
}

impl UartTx for MockReader {
    type Error = Unplugged;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Unplugged> {
        self.written.extend_from_slice(data);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Unplugged> {
        match self.replies.pop_front() {
            Some(Reply::Chunks(chunks)) => self.rx.extend(chunks),
            Some(Reply::Fail) => self.fail_next_read = true,
            Some(Reply::Silent) | None => {}
        }
        Ok(())
    }
}

impl UartRx for MockReader {
    type Error = Unplugged;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Unplugged> {
        self.reads += 1;
        if self.fail_next_read {
            self.fail_next_read = false;
            return Err(Unplugged);
        }

        let Some(chunk) = self.rx.front_mut() else {
            return Ok(0);
        };
        let n = buf.len().min(chunk.len());
        buf[..n].copy_from_slice(&chunk[..n]);
        chunk.drain(..n);
        if chunk.is_empty() {
            self.rx.pop_front();
        }
        Ok(n)
    }
}

/// Encoded answer frame: status byte followed by data
pub fn response(command: u16, status: u8, data: &[u8]) -> Vec<u8> {
    let mut payload = vec![status];
    payload.extend_from_slice(data);
    encode(command, &payload).unwrap()
}
