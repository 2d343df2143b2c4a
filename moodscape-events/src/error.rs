use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// `date` and `time` of an event do not form a valid timestamp.
    #[error("event {id} has an invalid schedule: {date} {time}")]
    InvalidSchedule {
        id: String,
        date: String,
        time: String,
    },

    #[error("event {id} has rating {rating}, expected a value between 0 and 5")]
    InvalidRating { id: String, rating: f32 },

    #[error("event id {0} appears more than once in the catalog")]
    DuplicateEvent(String),

    #[error("unknown event category: {0}")]
    UnknownCategory(String),

    #[error("malformed json: {0}")]
    Json(#[from] serde_json::Error),
}
