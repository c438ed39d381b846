// SPDX-License-Identifier: MIT
//
// mini-term — the terminal boundary for the mini editor.
//
// Everything that touches the actual terminal device lives here: raw
// mode via termios (with RAII restore and a panic hook), window size
// queries, ANSI escape encoding, decoding raw stdin bytes into
// symbolic key events, and a frame buffer that is written to the
// terminal in a single syscall.
//
// The editor core never reads raw bytes or writes escape codes to a
// device itself. It consumes `KeyEvent`s and produces byte frames;
// this crate sits on either side of that contract.

pub mod ansi;
pub mod color;
pub mod input;
pub mod output;
pub mod reader;
pub mod terminal;
