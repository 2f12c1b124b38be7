/// Error returned when parsing the serialised path form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathParseError {
    /// A command letter outside `M`, `L`, `A` and `Z`.
    UnknownCommand(char),
    /// Numbers appeared before any command.
    MissingCommand,
    /// The command ended before all of its arguments were read.
    MissingNumber { command: char },
    /// A token could not be read as a number.
    InvalidNumber(String),
    /// An arc flag was not `0` or `1`.
    InvalidFlag(String),
}

impl std::fmt::Display for PathParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand(c) => write!(f, "Unknown path command: '{}'", c),
            Self::MissingCommand => write!(f, "Path data must start with a command"),
            Self::MissingNumber { command } => {
                write!(f, "Missing number for path command '{}'", command)
            }
            Self::InvalidNumber(token) => write!(f, "Invalid number in path data: {}", token),
            Self::InvalidFlag(token) => write!(f, "Invalid arc flag in path data: {}", token),
        }
    }
}

impl std::error::Error for PathParseError {}
