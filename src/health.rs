//! Advisory health checks for profiles
//!
//! Inspects a profile's settings for configurations that are valid but
//! likely unintended, such as a wildcard allow rule or empty environment
//! variable values. Checks never fail; they only produce warnings.

use crate::profile::Profile;
use crate::settings::SettingsDocument;

// ----------------------------------------------------------------------------
// Report
// ----------------------------------------------------------------------------

/// Result of a profile health check, grouped by the area each warning
/// concerns.
#[derive(Debug, Clone, Default)]
pub struct HealthReport {
    /// Name of the checked profile
    pub profile: String,
    /// Warnings about the settings document as a whole
    pub settings: Vec<String>,
    /// Warnings about the permission rules
    pub permissions: Vec<String>,
    /// Warnings about environment variable values
    pub env: Vec<String>,
}

impl HealthReport {
    /// Returns `true` if the check produced no warnings at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.settings.is_empty() && self.permissions.is_empty() && self.env.is_empty()
    }

    /// Total number of warnings across all areas.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.settings.len() + self.permissions.len() + self.env.len()
    }

    /// All warnings in area order, flattened into a single list.
    #[must_use]
    pub fn warnings(&self) -> Vec<&str> {
        self.settings
            .iter()
            .chain(&self.permissions)
            .chain(&self.env)
            .map(String::as_str)
            .collect()
    }

    /// One-line status suitable for display.
    #[must_use]
    pub fn summary(&self) -> String {
        match self.warning_count() {
            0 => "Healthy".to_string(),
            1 => "Healthy (1 warning)".to_string(),
            n => format!("Healthy ({n} warnings)"),
        }
    }
}

// ----------------------------------------------------------------------------
// Checks
// ----------------------------------------------------------------------------

/// Runs all health checks against a profile.
#[must_use]
pub fn check_profile(profile: &Profile) -> HealthReport {
    HealthReport {
        profile: profile.name.clone(),
        settings: check_settings(&profile.settings),
        permissions: check_permissions(&profile.settings),
        env: check_env(&profile.settings),
    }
}

fn check_settings(settings: &SettingsDocument) -> Vec<String> {
    let mut warnings = Vec::new();
    if settings.model.is_none() {
        warnings.push("No model specified (the application default will apply)".to_string());
    }
    if settings.env.is_empty() {
        warnings.push("No environment variables set".to_string());
    }
    warnings
}

fn check_permissions(settings: &SettingsDocument) -> Vec<String> {
    let Some(permissions) = &settings.permissions else {
        return Vec::new();
    };

    let mut warnings = Vec::new();
    if permissions.allow.iter().any(|rule| rule == "*") {
        warnings.push("Wildcard \"*\" in the allow list permits every action".to_string());
    }
    if !permissions.allow.is_empty() && !permissions.deny.is_empty() {
        warnings
            .push("Both allow and deny lists are specified (deny takes precedence)".to_string());
    }
    warnings
}

fn check_env(settings: &SettingsDocument) -> Vec<String> {
    settings
        .env
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(key, _)| format!("Environment variable \"{key}\" has an empty value"))
        .collect()
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
