//! Error types for Pariyesana

use thiserror::Error;

use crate::document::NodeId;

#[derive(Error, Debug)]
pub enum FindError {
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),

    #[error("Not a text node: {0}")]
    NotText(NodeId),

    #[error("{0}")]
    Other(String),
}
