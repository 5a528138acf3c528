//! Parsing of REPL input lines.

use fureai_core::TouchTurn;

/// One line of REPL input.
#[derive(Debug)]
pub enum ReplCommand {
    Quit,
    Reset,
    Stop,
    Idle,
    Status,
    Touch(Box<TouchTurn>),
    Empty,
    Invalid(String),
}

impl ReplCommand {
    pub fn parse(line: &str) -> Self {
        let trimmed = line.trim();
        match trimmed {
            "" => ReplCommand::Empty,
            "quit" | "exit" => ReplCommand::Quit,
            "reset" => ReplCommand::Reset,
            "stop" => ReplCommand::Stop,
            "idle" => ReplCommand::Idle,
            "status" => ReplCommand::Status,
            json => match serde_json::from_str::<TouchTurn>(json) {
                Ok(turn) => ReplCommand::Touch(Box::new(turn)),
                Err(e) => ReplCommand::Invalid(e.to_string()),
            },
        }
    }
}
