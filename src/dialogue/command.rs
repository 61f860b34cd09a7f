//! Slash commands, recognised by a literal match on the first token and
//! never sent to the classifier.

use lazy_static::lazy_static;
use regex::{Captures, Regex};

lazy_static! {
    static ref ARTIST_COLON_TITLE: Regex = Regex::new(r"^(.*):\s*(.*)$").unwrap();
    static ref TITLE_BY_ARTIST: Regex = Regex::new(r"(?i)^(.*)\s+by\s+(.*)$").unwrap();
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Hello,
    Help,
    Exit,
    Parrot(String),
    Seed,
    Add(String),
    Remove(String),
    View,
    Clear,
    Recommend,
}

impl Command {
    pub const NAMES: &'static [&'static str] = &[
        "/hello",
        "/help",
        "/exit",
        "/parrot",
        "/seed",
        "/add",
        "/remove",
        "/view",
        "/clear",
        "/recommend",
    ];

    /// `None` when the first token is not a known command.
    pub fn parse(text: &str) -> Option<Command> {
        let text = text.trim();
        let (head, rest) = match text.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (text, ""),
        };
        let command = match head {
            "/hello" => Command::Hello,
            "/help" | "/learn" => Command::Help,
            "/exit" => Command::Exit,
            "/parrot" => Command::Parrot(rest.to_string()),
            "/seed" => Command::Seed,
            "/add" => Command::Add(rest.to_string()),
            "/remove" => Command::Remove(rest.to_string()),
            "/view" => Command::View,
            "/clear" => Command::Clear,
            "/recommend" => Command::Recommend,
            _ => return None,
        };
        Some(command)
    }
}

/// Title and optional artist of an `/add` argument.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SongArgs {
    pub title: String,
    pub artist: Option<String>,
}

/// Trimmed capture group `n`, borrowing from the searched text.
fn group<'h>(caps: &Captures<'h>, n: usize) -> &'h str {
    caps.get(n).map_or("", |m| m.as_str()).trim()
}

/// Parses `"artist: title"`, `"title by artist"` or a bare title.
pub fn parse_song_args(args: &str) -> Option<SongArgs> {
    let args = args.trim();
    let (title, artist) = if let Some(caps) = ARTIST_COLON_TITLE.captures(args) {
        (group(&caps, 2), Some(group(&caps, 1)))
    } else if let Some(caps) = TITLE_BY_ARTIST.captures(args) {
        (group(&caps, 1), Some(group(&caps, 2)))
    } else {
        (args, None)
    };

    if title.is_empty() {
        return None;
    }
    Some(SongArgs {
        title: title.to_string(),
        artist: artist.filter(|a| !a.is_empty()).map(str::to_string),
    })
}
