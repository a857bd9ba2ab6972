#[derive(Debug)]
pub enum EngineError {
    InvalidConfig(&'static str),
    BadServiceHours(String),
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::InvalidConfig(msg) => write!(f, "invalid timeline config: {msg}"),
            EngineError::BadServiceHours(hours) => {
                write!(f, "unparsable service hours: {hours}")
            }
        }
    }
}

impl std::error::Error for EngineError {}
