//! The profile record

use crate::error::Result;
use crate::registry::ServiceMap;
use crate::settings::SettingsDocument;
use crate::validate;
use time::OffsetDateTime;

/// A named, persisted bundle of settings, instructions and services
///
/// Identity is the name: two profiles cannot share one. The record is
/// persisted as a directory of up to three files; `created_at`/`updated_at`
/// are derived from filesystem metadata when a profile is loaded back.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub name: String,
    pub settings: SettingsDocument,
    /// Instructions text; blank means "no instructions file"
    pub instructions: String,
    pub services: ServiceMap,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Profile {
    /// Create an empty profile
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            name: name.into(),
            settings: SettingsDocument::default(),
            instructions: String::new(),
            services: ServiceMap::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a profile from captured live state
    #[must_use]
    pub fn from_active(
        name: impl Into<String>,
        settings: SettingsDocument,
        instructions: String,
        services: ServiceMap,
    ) -> Self {
        Self {
            settings,
            instructions,
            services,
            ..Self::new(name)
        }
    }

    /// Check the profile is storable (currently: the name rules)
    pub fn validate(&self) -> Result<()> {
        validate::profile_name(&self.name)
    }

    /// True when the profile carries no configuration at all
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.settings.is_empty() && self.instructions.trim().is_empty() && self.services.is_empty()
    }

    /// True when the instructions field would produce an instructions file
    #[must_use]
    pub fn has_instructions(&self) -> bool {
        !self.instructions.trim().is_empty()
    }

    /// Bump `updated_at` to now
    pub fn touch(&mut self) {
        self.updated_at = OffsetDateTime::now_utc();
    }
}
