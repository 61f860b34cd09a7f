//! Shared constants for end-to-end tests
//!
//! When the test catalogue changes, update only this file and fixtures.rs.

// ============================================================================
// Timeouts
// ============================================================================

pub const REQUEST_TIMEOUT_SECS: u64 = 5;
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 20;
/// How long to wait for a WebSocket frame before failing
pub const WS_FRAME_TIMEOUT_MS: u64 = 3000;

// ============================================================================
// Test Catalog
// ============================================================================

/// The playlist every chat session edits
pub const PLAYLIST_ID: i64 = 1;
pub const PLAYLIST_NAME: &str = "Test Playlist";

/// "Shape of You" by Ed Sheeran (Divide, 2017)
pub const SHAPE_OF_YOU_ID: i64 = 1;
/// "Perfect" by Ed Sheeran (Divide, 2017)
pub const PERFECT_ID: i64 = 2;
/// "Hey Jude" by The Beatles
pub const HEY_JUDE_BEATLES_ID: i64 = 3;
/// "Hey Jude" by Wilson Pickett
pub const HEY_JUDE_PICKETT_ID: i64 = 4;
/// "Hey Jude" by Elvis Presley
pub const HEY_JUDE_ELVIS_ID: i64 = 5;
/// "Thriller" by Michael Jackson (Thriller, 1982)
pub const THRILLER_ID: i64 = 6;
/// "Levitating" by Dua Lipa
pub const LEVITATING_ID: i64 = 7;

pub const CATALOG_SIZE: usize = 7;

/// Id that never exists in the test catalogue
pub const MISSING_SONG_ID: i64 = 9999;
