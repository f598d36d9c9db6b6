use std::io;

/// Errors that can occur while fetching, reading or displaying the calendar.
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// Downloading the calendar failed.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    /// Reading or writing the cached calendar failed.
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    /// The calendar file is not valid iCalendar.
    #[error("calendar parse error: {0}")]
    Ical(#[from] ical::parser::ParserError),
    /// An event lacks usable start or end information.
    #[error("invalid event '{name}': {reason}")]
    InvalidEvent { name: String, reason: String },
    /// The area is not part of the allow-list.
    #[error("unknown area '{0}'")]
    UnknownArea(String),
    /// The pin cannot be used as an output.
    #[error("invalid pin {0}")]
    InvalidPin(u8),
    /// The GPIO backend rejected an operation.
    #[error("gpio error: {0}")]
    Gpio(String),
}

#[cfg(feature = "rpi")]
impl From<rppal::gpio::Error> for Error {
    fn from(value: rppal::gpio::Error) -> Self {
        Error::Gpio(value.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
