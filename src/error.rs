use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("content table is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("terminal command `{0}` has no canned response")]
    MissingCommand(&'static str),
    #[error("at least one social link is required")]
    NoSocialLinks,
    #[error("social link id `{0}` is declared more than once")]
    DuplicateLinkId(String),
    #[error("skills list is empty")]
    NoSkills,
}
