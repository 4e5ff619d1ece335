//! Field-level settings updates and the pure reducer that applies them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::models::{MessagePermission, ProfileVisibility, Theme, UserSettings};
use crate::errors::ErrorKind;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SettingsError {
    #[error("{field} cannot be empty")]
    EmptyField { field: &'static str },

    #[error("Failed to serialize settings: {0}")]
    Export(String),
}

impl SettingsError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Validation
    }

    pub fn client_message(&self) -> String {
        match self {
            SettingsError::Export(_) => "Failed to export settings".to_string(),
            _ => self.to_string(),
        }
    }
}

pub type SettingsResult<T> = Result<T, SettingsError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountUpdate {
    EmailNotifications(bool),
    PushNotifications(bool),
    SmsNotifications(bool),
    MarketingEmails(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrivacyUpdate {
    ProfileVisibility(ProfileVisibility),
    ShowOnlineStatus(bool),
    AllowMessagesFrom(MessagePermission),
    ShowLastSeen(bool),
    AllowProfileViews(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationUpdate {
    NewMatches(bool),
    Messages(bool),
    Likes(bool),
    SuperLikes(bool),
    SubscriptionUpdates(bool),
    StreamNotifications(bool),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppUpdate {
    Theme(Theme),
    Language(String),
    Timezone(String),
    AutoplayVideos(bool),
    SoundEffects(bool),
}

/// A single field change in one settings category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingsUpdate {
    Account(AccountUpdate),
    Privacy(PrivacyUpdate),
    Notifications(NotificationUpdate),
    App(AppUpdate),
}

/// Return `settings` with `update` applied. The input is never modified.
///
/// # Errors
///
/// * `SettingsError::EmptyField` - blank language or timezone
pub fn apply(settings: &UserSettings, update: SettingsUpdate) -> SettingsResult<UserSettings> {
    let mut next = settings.clone();
    match update {
        SettingsUpdate::Account(update) => {
            let account = &mut next.account;
            match update {
                AccountUpdate::EmailNotifications(on) => account.email_notifications = on,
                AccountUpdate::PushNotifications(on) => account.push_notifications = on,
                AccountUpdate::SmsNotifications(on) => account.sms_notifications = on,
                AccountUpdate::MarketingEmails(on) => account.marketing_emails = on,
            }
        }
        SettingsUpdate::Privacy(update) => {
            let privacy = &mut next.privacy;
            match update {
                PrivacyUpdate::ProfileVisibility(v) => privacy.profile_visibility = v,
                PrivacyUpdate::ShowOnlineStatus(on) => privacy.show_online_status = on,
                PrivacyUpdate::AllowMessagesFrom(p) => privacy.allow_messages_from = p,
                PrivacyUpdate::ShowLastSeen(on) => privacy.show_last_seen = on,
                PrivacyUpdate::AllowProfileViews(on) => privacy.allow_profile_views = on,
            }
        }
        SettingsUpdate::Notifications(update) => {
            let notifications = &mut next.notifications;
            match update {
                NotificationUpdate::NewMatches(on) => notifications.new_matches = on,
                NotificationUpdate::Messages(on) => notifications.messages = on,
                NotificationUpdate::Likes(on) => notifications.likes = on,
                NotificationUpdate::SuperLikes(on) => notifications.super_likes = on,
                NotificationUpdate::SubscriptionUpdates(on) => {
                    notifications.subscription_updates = on
                }
                NotificationUpdate::StreamNotifications(on) => {
                    notifications.stream_notifications = on
                }
            }
        }
        SettingsUpdate::App(update) => {
            let app = &mut next.app;
            match update {
                AppUpdate::Theme(theme) => app.theme = theme,
                AppUpdate::Language(language) => {
                    app.language = non_empty("language", language)?;
                }
                AppUpdate::Timezone(timezone) => {
                    app.timezone = non_empty("timezone", timezone)?;
                }
                AppUpdate::AutoplayVideos(on) => app.autoplay_videos = on,
                AppUpdate::SoundEffects(on) => app.sound_effects = on,
            }
        }
    }
    Ok(next)
}

/// Apply several updates in order, stopping at the first invalid one
pub fn apply_all(
    settings: &UserSettings,
    updates: impl IntoIterator<Item = SettingsUpdate>,
) -> SettingsResult<UserSettings> {
    updates
        .into_iter()
        .try_fold(settings.clone(), |acc, update| apply(&acc, update))
}

/// Pretty JSON snapshot of the settings
pub fn export_json(settings: &UserSettings) -> SettingsResult<String> {
    serde_json::to_string_pretty(settings).map_err(|e| SettingsError::Export(e.to_string()))
}

fn non_empty(field: &'static str, value: String) -> SettingsResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(SettingsError::EmptyField { field });
    }
    Ok(trimmed.to_string())
}
