//! Lifecycle stages.
//!
//! The fixed set of event names the application triggers over one run.
//! Error handling is not a separate stage: a faulted run re-uses `render`
//! and `finish` with the error still carried on the event.

use crate::AppError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A named stage of the application lifecycle, in trigger order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Stage {
    /// Default listeners are attached and the run's event is constructed.
    /// Informational: listener results carry no control flow.
    Bootstrap,
    /// Listeners attempt to match the request. A response-shaped result
    /// short-circuits the run; an event error skips dispatch.
    Route,
    /// Listeners attempt to produce the response. Same short-circuit rules
    /// as `Route`.
    Dispatch,
    /// Listeners transform the in-flight response in place.
    Render,
    /// Unconditionally triggered last, on every path out of a run.
    Finish,
}

impl Stage {
    /// Returns the canonical event name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bootstrap => "bootstrap",
            Self::Route => "route",
            Self::Dispatch => "dispatch",
            Self::Render => "render",
            Self::Finish => "finish",
        }
    }
}

impl FromStr for Stage {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bootstrap" => Ok(Self::Bootstrap),
            "route" => Ok(Self::Route),
            "dispatch" => Ok(Self::Dispatch),
            "render" => Ok(Self::Render),
            "finish" => Ok(Self::Finish),
            _ => Err(AppError::UnknownStage(s.to_string())),
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
