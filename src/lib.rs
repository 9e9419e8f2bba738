//! Chessli - turn the chess openings you play into flashcards
//!
//! This library exports the core modules for testing and potential reuse.

pub mod app;
pub mod flashcards;
pub mod games;
pub mod logging;
pub mod models;
pub mod storage;
pub mod ui;
