//! Line commands typed on stdin.
//!
//! Plain text is typed into the current screen's search box; `:`-prefixed words
//! stand in for buttons and gestures.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Text(String),
    More,
    Open(String),
    Clear,
    Retry,
    Industries,
    ResetIndustry,
    Pick(String),
    Apply,
    Back,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
text            type into the search box
:more           scroll to the end of the list
:open <id>      open a vacancy
:clear          clear the search box
:retry          retry after an error
:industry       choose an industry filter
:reset-industry drop the industry filter
:pick <id>      select an industry (filter screen)
:apply          apply the selected industry (filter screen)
:back           leave the filter screen
:quit           exit";

pub fn parse_line(line: &str) -> Option<Command> {
    let line = line.trim_end_matches(['\r', '\n']);
    let Some(rest) = line.trim_start().strip_prefix(':') else {
        return if line.trim().is_empty() {
            None
        } else {
            Some(Command::Text(line.to_string()))
        };
    };

    let mut parts = rest.trim().splitn(2, char::is_whitespace);
    let word = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.next().map(str::trim).unwrap_or_default();

    let command = match (word.as_str(), arg) {
        ("more", _) => Command::More,
        ("open", id) if !id.is_empty() => Command::Open(id.to_string()),
        ("clear", _) => Command::Clear,
        ("retry", _) => Command::Retry,
        ("industry" | "industries", _) => Command::Industries,
        ("reset-industry", _) => Command::ResetIndustry,
        ("pick", id) if !id.is_empty() => Command::Pick(id.to_string()),
        ("apply", _) => Command::Apply,
        ("back", _) => Command::Back,
        ("help" | "?", _) => Command::Help,
        ("quit" | "q" | "exit", _) => Command::Quit,
        _ => Command::Unknown(line.trim().to_string()),
    };
    Some(command)
}
