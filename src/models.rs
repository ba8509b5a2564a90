// Domain records shared by the providers and the session layer

use crate::error::PitchCraftError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name given to a user who logs in without one
pub const DEFAULT_USER_NAME: &str = "Demo User";

/// The current user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Display name, also used as the credits and history key
    pub name: String,
}

/// Partial user record accepted by login
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl UserUpdate {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }

    /// Resolve into a full user, filling a missing or blank name
    pub fn into_user(self) -> User {
        let name = self
            .name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_NAME.to_string());
        User { name }
    }
}

/// Supported pitch styles
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PitchStyle {
    #[default]
    #[serde(rename = "Elevator Pitch")]
    ElevatorPitch,
    #[serde(rename = "Formal Investor Deck")]
    FormalInvestorDeck,
    #[serde(rename = "Casual Social Media Blurb")]
    CasualSocialMediaBlurb,
    #[serde(rename = "Feature-Focused")]
    FeatureFocused,
    #[serde(rename = "Benefit-Driven")]
    BenefitDriven,
}

impl PitchStyle {
    /// Every style, in the order the form offers them
    pub const ALL: [PitchStyle; 5] = [
        PitchStyle::ElevatorPitch,
        PitchStyle::FormalInvestorDeck,
        PitchStyle::CasualSocialMediaBlurb,
        PitchStyle::FeatureFocused,
        PitchStyle::BenefitDriven,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PitchStyle::ElevatorPitch => "Elevator Pitch",
            PitchStyle::FormalInvestorDeck => "Formal Investor Deck",
            PitchStyle::CasualSocialMediaBlurb => "Casual Social Media Blurb",
            PitchStyle::FeatureFocused => "Feature-Focused",
            PitchStyle::BenefitDriven => "Benefit-Driven",
        }
    }
}

impl fmt::Display for PitchStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PitchStyle {
    type Err = PitchCraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        PitchStyle::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| PitchCraftError::InvalidPitchStyle(s.to_string()))
    }
}

/// A pitch as produced by the generator, before it is stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedPitch {
    /// App description the pitch was generated from
    pub input: String,
    pub style: PitchStyle,
    /// Generated body text
    pub pitch: String,
    /// Owner, when the caller tags one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl GeneratedPitch {
    pub fn new(input: impl Into<String>, style: PitchStyle, pitch: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            style,
            pitch: pitch.into(),
            user_id: None,
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// A saved pitch: immutable apart from deletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredPitch {
    pub id: String,
    pub input: String,
    pub style: PitchStyle,
    pub pitch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl StoredPitch {
    pub fn from_generated(pitch: GeneratedPitch, id: String, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            input: pitch.input,
            style: pitch.style,
            pitch: pitch.pitch,
            user_id: pitch.user_id,
            created_at,
        }
    }
}
