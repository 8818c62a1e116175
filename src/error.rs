use thiserror::Error;

#[allow(dead_code)]
#[derive(Error, Debug)]
pub enum CompassError {
    #[error("unmapped answer option '{option}' for question {question}")]
    UnmappedOption { question: String, option: String },

    #[error("malformed scoring rule for question {question}: {reason}")]
    MalformedScoringRule { question: String, reason: String },

    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("invalid template: {0}")]
    TemplateInvalid(String),

    #[error("policy parse error: {0}")]
    PolicyParse(String),

    #[error("path does not exist: {0}")]
    PathNotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("toml parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CompassError>;
