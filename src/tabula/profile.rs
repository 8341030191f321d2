use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TabulaError;
use crate::screen::Notice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Dark,
    Light,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Dark => f.write_str("dark"),
            Self::Light => f.write_str("light"),
        }
    }
}

impl FromStr for Theme {
    type Err = TabulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            other => Err(TabulaError::Input(format!(
                "Unknown theme: {}. Try dark or light.",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub bio: String,
    pub theme: Theme,
    pub notifications_enabled: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            name: "John Doe".to_string(),
            email: "john.doe@example.com".to_string(),
            bio: "Software Engineer".to_string(),
            theme: Theme::Dark,
            notifications_enabled: true,
        }
    }
}

/// The settings screen: a single-record edit form. Edits accumulate on a
/// draft; save publishes it, cancel falls back to the last saved profile.
#[derive(Debug, Default)]
pub struct ProfileForm {
    saved: Profile,
    draft: Option<Profile>,
}

impl ProfileForm {
    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    /// What the screen shows: the draft while editing, the saved profile
    /// otherwise.
    pub fn view(&self) -> &Profile {
        self.draft.as_ref().unwrap_or(&self.saved)
    }

    pub fn begin_edit(&mut self) {
        if self.draft.is_none() {
            self.draft = Some(self.saved.clone());
        }
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        if let Some(draft) = &mut self.draft {
            draft.name = name.into();
        }
    }

    pub fn set_email(&mut self, email: impl Into<String>) {
        if let Some(draft) = &mut self.draft {
            draft.email = email.into();
        }
    }

    pub fn set_bio(&mut self, bio: impl Into<String>) {
        if let Some(draft) = &mut self.draft {
            draft.bio = bio.into();
        }
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if let Some(draft) = &mut self.draft {
            draft.theme = theme;
        }
    }

    pub fn set_notifications(&mut self, enabled: bool) {
        if let Some(draft) = &mut self.draft {
            draft.notifications_enabled = enabled;
        }
    }

    /// Publishes the draft. None (and no-op) when no edit is active.
    pub fn save(&mut self) -> Option<Notice> {
        let draft = self.draft.take()?;
        self.saved = draft;
        Some(Notice::success("Profile updated successfully!"))
    }

    pub fn cancel(&mut self) {
        self.draft = None;
    }
}
