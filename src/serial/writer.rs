// src/serial/writer.rs

//! Text helpers layered on `tx_enqueue`
//!
//! Nothing here touches the hardware or changes the overflow policy: every
//! byte goes through [`SerialChannel::tx_enqueue`] one at a time.

use core::ffi::CStr;
use core::fmt::{self, Write};

use super::backend::UartPeripheral;
use super::channel::SerialChannel;
use crate::constants::LINE_TERMINATOR;

impl<P: UartPeripheral, const TX: usize, const RX: usize> SerialChannel<P, TX, RX> {
    /// Queue a slice of raw bytes
    pub fn send_bytes(&self, bytes: &[u8]) {
        for &byte in bytes {
            self.tx_enqueue(byte);
        }
    }

    /// Queue one character, UTF-8 encoded
    pub fn send_char(&self, c: char) {
        let mut buf = [0u8; 4];
        self.send_bytes(c.encode_utf8(&mut buf).as_bytes());
    }

    /// Queue a text line without terminator
    pub fn send_str(&self, s: &str) {
        self.send_bytes(s.as_bytes());
    }

    /// Queue a null-terminated string, stopping before the terminator
    pub fn send_cstr(&self, s: &CStr) {
        self.send_bytes(s.to_bytes());
    }

    /// Queue the line terminator (`\r\n`)
    pub fn send_crlf(&self) {
        self.send_bytes(LINE_TERMINATOR);
    }

    /// Queue `value` as signed decimal text
    pub fn send_i32(&self, value: i32) {
        // NOTE: ChannelWriter never fails, overflow is reported by the latch
        let _ = write!(self.writer(), "{}", value);
    }

    /// Queue `value` as signed decimal text
    pub fn send_i16(&self, value: i16) {
        self.send_i32(i32::from(value));
    }

    /// `core::fmt::Write` adapter over this channel
    #[inline]
    pub fn writer(&self) -> ChannelWriter<'_, P, TX, RX> {
        ChannelWriter { channel: self }
    }
}

/// Formatting sink that feeds a channel's transmit buffer
#[derive(Debug)]
pub struct ChannelWriter<'a, P, const TX: usize, const RX: usize> {
    channel: &'a SerialChannel<P, TX, RX>,
}

impl<P: UartPeripheral, const TX: usize, const RX: usize> fmt::Write
    for ChannelWriter<'_, P, TX, RX>
{
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.channel.send_str(s);
        Ok(())
    }
}
