use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const DEFAULT_ABOUT_TEXT: &str = "Welcome to my cosmic portfolio!";
pub const DEFAULT_HIRE_TEXT: &str = "I'm available for hire and exciting opportunities!";
pub const DEFAULT_COLLAB_TEXT: &str = "Let's collaborate on amazing projects together!";
pub const DEFAULT_HIRE_FORM_LINK: &str = "https://forms.gle/VTqY4WynfDUTDfz68";

/// The single profile row as stored remotely. Any text field may be blank.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub id: i64,
    #[serde(default)]
    pub about_text: Option<String>,
    #[serde(default)]
    pub hire_text: Option<String>,
    #[serde(default)]
    pub collab_text: Option<String>,
    #[serde(default)]
    pub hire_form_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Profile content shown on the site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub about_text: String,
    pub hire_text: String,
    pub collab_text: String,
    pub hire_form_link: String,
}

impl Default for Profile {
    /// The profile created when the store has none.
    fn default() -> Self {
        Self {
            id: 1,
            about_text: DEFAULT_ABOUT_TEXT.to_string(),
            hire_text: DEFAULT_HIRE_TEXT.to_string(),
            collab_text: DEFAULT_COLLAB_TEXT.to_string(),
            hire_form_link: DEFAULT_HIRE_FORM_LINK.to_string(),
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.trim().is_empty())
}

impl From<ProfileRecord> for Profile {
    /// Blank about text and form link fall back to their defaults; blank
    /// hire and collab texts stay empty.
    fn from(record: ProfileRecord) -> Self {
        Self {
            id: record.id,
            about_text: non_blank(record.about_text)
                .unwrap_or_else(|| DEFAULT_ABOUT_TEXT.to_string()),
            hire_text: record.hire_text.unwrap_or_default(),
            collab_text: record.collab_text.unwrap_or_default(),
            hire_form_link: non_blank(record.hire_form_link)
                .unwrap_or_else(|| DEFAULT_HIRE_FORM_LINK.to_string()),
        }
    }
}

impl From<&Profile> for ProfileRecord {
    fn from(profile: &Profile) -> Self {
        let link = if profile.hire_form_link.trim().is_empty() {
            DEFAULT_HIRE_FORM_LINK.to_string()
        } else {
            profile.hire_form_link.clone()
        };
        Self {
            id: profile.id,
            about_text: Some(profile.about_text.clone()),
            hire_text: Some(profile.hire_text.clone()),
            collab_text: Some(profile.collab_text.clone()),
            hire_form_link: Some(link),
            updated_at: None,
        }
    }
}
