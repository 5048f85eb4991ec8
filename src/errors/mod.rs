use reqwest::StatusCode;
use thiserror::Error;

/// Input problems caught before anything is sent to the backend.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Fill in the password.")]
    EmptyPassword,

    #[error("Incorrect password.")]
    IncorrectPassword,

    #[error("Team \"{team}\": choose exactly 5 matches ({chosen}/5 chosen).")]
    WrongPickCount { team: String, chosen: usize },

    #[error("Team \"{team}\": duplicate match chosen, pick 5 unique matches.")]
    DuplicateMatch { team: String },

    #[error("Invalid pick \"{0}\": expected 1, X or 2.")]
    InvalidPick(String),

    #[error("Invalid coach points for {team}: \"{input}\".")]
    InvalidCoachPoints { team: String, input: String },

    #[error("Malformed argument \"{input}\": expected {expected}.")]
    MalformedArgument { input: String, expected: &'static str },
}

/// Failures of a single backend call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success status; `message` is taken from the body when possible.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("Request failed")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response from {path}: {reason}")]
    Decode { path: String, reason: String },

    /// Error marker inside a successful body.
    #[error("{0}")]
    Reported(String),
}

#[derive(Debug, Error)]
pub enum ConsoleError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Api(#[from] ApiError),

    #[error("Admin login required. Run `fantasy-console login` (return to {return_to}).")]
    LoginRequired { return_to: String },

    #[error("Local storage error: {0}")]
    Storage(String),

    #[error("Match #{match_id} is not part of matchday {matchday}.")]
    UnknownMatch { match_id: i64, matchday: u32 },

    #[error("Unknown team \"{0}\".")]
    UnknownTeam(String),

    #[error("Saving coach points stopped at {team} ({saved}/{total} saved)")]
    BatchAborted {
        team: String,
        saved: usize,
        total: usize,
        #[source]
        source: ApiError,
    },
}

pub type ConsoleResult<T> = Result<T, ConsoleError>;
