//! User settings and their field-level updates.
//!
//! Updates are applied by the pure [`apply`] reducer: the previous settings are
//! left untouched and a new value is returned.

pub mod models;
pub mod updates;

pub use models::{
    AccountSettings, AppSettings, MessagePermission, NotificationSettings, PrivacySettings,
    ProfileVisibility, Theme, UserSettings,
};
pub use updates::{
    AccountUpdate, AppUpdate, NotificationUpdate, PrivacyUpdate, SettingsError, SettingsResult,
    SettingsUpdate, apply, apply_all, export_json,
};
