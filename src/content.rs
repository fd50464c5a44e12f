//! Static page content: identity, skills, projects, social links and the
//! terminal's canned responses. The table ships embedded in the binary and is
//! validated once at startup.

use std::collections::{BTreeMap, HashSet};

use serde::Deserialize;

use crate::error::ContentError;

const SITE_CONTENT_JSON: &str = include_str!("../content/site.json");

/// Commands the terminal answers from the table. `clear` and `exit` are
/// handled by the interpreter itself and have no entry here.
pub const CANNED_COMMANDS: [&str; 6] = ["whoami", "about", "stack", "projects", "contact", "help"];

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct SiteContent {
    pub identity: Identity,
    pub skills: Vec<Skill>,
    pub projects: Vec<Project>,
    pub social_links: Vec<SocialLink>,
    pub terminal: TerminalContent,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Identity {
    pub name: String,
    pub alias: String,
    pub brand: String,
    pub tagline: String,
    pub about: String,
    pub email: String,
    pub github: String,
    pub avatar: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Skill {
    pub name: String,
    pub icon: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Project {
    pub name: String,
    pub description: String,
    pub link: String,
    pub color: String,
    pub category: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SocialLink {
    pub id: String,
    pub name: String,
    pub href: String,
    pub icon: String,
    pub color: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct TerminalContent {
    pub prompt: String,
    pub banner: Vec<String>,
    pub hint: String,
    pub farewell: String,
    pub commands: BTreeMap<String, String>,
}

impl TerminalContent {
    pub fn response(&self, command: &str) -> Option<&str> {
        self.commands.get(command).map(String::as_str)
    }
}

impl SiteContent {
    pub fn load_embedded() -> Result<Self, ContentError> {
        Self::from_json(SITE_CONTENT_JSON)
    }

    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        let content: SiteContent = serde_json::from_str(raw)?;
        content.validate()?;
        Ok(content)
    }

    fn validate(&self) -> Result<(), ContentError> {
        if self.skills.is_empty() {
            return Err(ContentError::NoSkills);
        }

        if self.social_links.is_empty() {
            return Err(ContentError::NoSocialLinks);
        }

        let mut seen = HashSet::new();
        for link in &self.social_links {
            if !seen.insert(link.id.as_str()) {
                return Err(ContentError::DuplicateLinkId(link.id.clone()));
            }
        }

        for command in CANNED_COMMANDS {
            if self.terminal.response(command).is_none() {
                return Err(ContentError::MissingCommand(command));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_content_is_valid() {
        let content = SiteContent::load_embedded().expect("embedded content should load");

        assert_eq!(content.identity.alias, "Noctyx");
        assert_eq!(content.social_links.len(), 6);
        assert_eq!(content.projects.len(), 3);
        assert!(CANNED_COMMANDS
            .iter()
            .all(|command| content.terminal.response(command).is_some()));
    }

    #[test]
    fn malformed_json_is_reported() {
        let result = SiteContent::from_json("{ not json");
        assert!(matches!(result, Err(ContentError::Malformed(_))));
    }

    #[test]
    fn duplicate_link_ids_are_rejected() {
        let mut value: serde_json::Value =
            serde_json::from_str(SITE_CONTENT_JSON).expect("embedded content is JSON");
        value["social_links"][1]["id"] = serde_json::json!("email");

        let result = SiteContent::from_json(&value.to_string());
        assert!(matches!(result, Err(ContentError::DuplicateLinkId(id)) if id == "email"));
    }

    #[test]
    fn missing_canned_command_is_rejected() {
        let mut value: serde_json::Value =
            serde_json::from_str(SITE_CONTENT_JSON).expect("embedded content is JSON");
        value["terminal"]["commands"]
            .as_object_mut()
            .expect("commands object")
            .remove("stack");

        let result = SiteContent::from_json(&value.to_string());
        assert!(matches!(result, Err(ContentError::MissingCommand("stack"))));
    }

    #[test]
    fn empty_social_links_are_rejected() {
        let mut value: serde_json::Value =
            serde_json::from_str(SITE_CONTENT_JSON).expect("embedded content is JSON");
        value["social_links"] = serde_json::json!([]);

        let result = SiteContent::from_json(&value.to_string());
        assert!(matches!(result, Err(ContentError::NoSocialLinks)));
    }
}
