use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// what to do when a parcel id appears more than once in the parcel source
#[derive(Serialize, Deserialize, ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DuplicateParcelPolicy {
    /// abort the run
    #[default]
    Fail,
    /// keep the first occurrence, reject the rest with a warning
    Skip,
}

impl Display for DuplicateParcelPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DuplicateParcelPolicy::Fail => write!(f, "fail"),
            DuplicateParcelPolicy::Skip => write!(f, "skip"),
        }
    }
}
