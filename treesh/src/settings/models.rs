//! User settings models.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountSettings {
    pub email_notifications: bool,
    pub push_notifications: bool,
    pub sms_notifications: bool,
    pub marketing_emails: bool,
}

impl Default for AccountSettings {
    fn default() -> Self {
        Self {
            email_notifications: true,
            push_notifications: true,
            sms_notifications: false,
            marketing_emails: false,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProfileVisibility {
    #[default]
    Public,
    Friends,
    Private,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessagePermission {
    #[default]
    Everyone,
    Matches,
    Nobody,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrivacySettings {
    pub profile_visibility: ProfileVisibility,
    pub show_online_status: bool,
    pub allow_messages_from: MessagePermission,
    pub show_last_seen: bool,
    pub allow_profile_views: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            profile_visibility: ProfileVisibility::Public,
            show_online_status: true,
            allow_messages_from: MessagePermission::Everyone,
            show_last_seen: true,
            allow_profile_views: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationSettings {
    pub new_matches: bool,
    pub messages: bool,
    pub likes: bool,
    pub super_likes: bool,
    pub subscription_updates: bool,
    pub stream_notifications: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            new_matches: true,
            messages: true,
            likes: true,
            super_likes: true,
            subscription_updates: true,
            stream_notifications: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    #[default]
    System,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    pub theme: Theme,
    pub language: String,
    pub timezone: String,
    pub autoplay_videos: bool,
    pub sound_effects: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            theme: Theme::System,
            language: "en".to_string(),
            timezone: "UTC-5".to_string(),
            autoplay_videos: true,
            sound_effects: true,
        }
    }
}

/// All user-facing preferences
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSettings {
    pub account: AccountSettings,
    pub privacy: PrivacySettings,
    pub notifications: NotificationSettings,
    pub app: AppSettings,
}
