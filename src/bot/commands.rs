use crate::core::models::Mode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    SetMode(Mode),
    ShowMode,
    Collect,
    Summarize,
    Clear,
    Usage,
    Unknown(String),
}

/// Parse a `/command`, ignoring any `@botname` suffix and trailing arguments.
/// Returns `None` for plain text.
#[must_use]
pub fn parse_command(text: &str) -> Option<Command> {
    let first = text.trim_start().split_whitespace().next()?;
    let name = first.strip_prefix('/')?;
    let name = name.split('@').next().unwrap_or(name).to_ascii_lowercase();

    let command = match name.as_str() {
        "start" => Command::Start,
        "help" => Command::Help,
        "mode" => Command::ShowMode,
        "collect" => Command::Collect,
        "summarize" | "summarise" | "done" => Command::Summarize,
        "clear" | "reset" => Command::Clear,
        "usage" => Command::Usage,
        other => match Mode::parse(other) {
            Some(mode) => Command::SetMode(mode),
            None => Command::Unknown(other.to_string()),
        },
    };
    Some(command)
}
