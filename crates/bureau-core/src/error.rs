use thiserror::Error;

#[derive(Error, Debug)]
pub enum BureauError {
    /// The inference backend could not produce a response (transport, auth, quota, no reply text).
    #[error("Inference error: {0}")]
    Inference(String),

    /// The model reply did not contain a usable JSON object.
    #[error("Failed to parse model response as JSON ({source}): {raw}")]
    Parse {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("TSV error: {0}")]
    Tsv(#[from] csv::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, BureauError>;
