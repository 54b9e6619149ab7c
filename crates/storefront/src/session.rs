//! Single-user session and order history.
//!
//! # States
//!
//! `LoggedOut` (initial) -> `LoggedIn(profile)` -> `LoggedOut` on logout.
//! Login is instantaneous: there is no credential check, only a well-formed
//! email address.
//!
//! # Order visibility
//!
//! The `orders` slot holds every order ever recorded on this device,
//! regardless of owner. The session only exposes the orders whose `userId`
//! matches the active profile, and recomputes that subset from the slot on
//! every load.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use technova_core::{Email, EmailError, UserId};

use crate::cart::CartLine;
use crate::orders::{Order, next_order_id, orders_for};
use crate::storage::{
    KeyValueStore, Slot, StorageError, load_json, load_json_records, save_json,
};

/// Minimum length accepted by [`validate_password_change`].
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Errors that can occur during session operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Login or profile data carried a malformed email.
    #[error("Invalid email: {0}")]
    InvalidEmail(#[from] EmailError),

    /// Session state changed in memory but could not be persisted.
    #[error("Failed to save session: {0}")]
    Storage(#[from] StorageError),
}

/// Password change form rejections.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordError {
    #[error("Passwords do not match")]
    Mismatch,
    #[error("Password must be at least {min} characters")]
    TooShort { min: usize },
}

/// What happens to the durable order log on logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogoutOrderPolicy {
    /// Erase the whole order log, including other users' orders.
    #[default]
    All,
    /// Erase only the orders owned by the user logging out.
    User,
}

impl std::str::FromStr for LogoutOrderPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "all" => Ok(Self::All),
            "user" => Ok(Self::User),
            _ => Err(format!("invalid logout order policy: {s}")),
        }
    }
}

const fn default_true() -> bool {
    true
}

/// The logged-in shopper.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub email: Email,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    pub member_since: DateTime<Utc>,
    #[serde(default = "default_true")]
    pub email_notifications: bool,
    #[serde(default)]
    pub sms_notifications: bool,
}

impl UserProfile {
    /// Short name for the account menu: first name, else the email's local part.
    #[must_use]
    pub fn display_name(&self) -> &str {
        if self.first_name.is_empty() {
            self.email.local_part()
        } else {
            &self.first_name
        }
    }

    /// Full name when both parts are set, else the email's local part.
    #[must_use]
    pub fn full_name(&self) -> String {
        if self.first_name.is_empty() || self.last_name.is_empty() {
            self.email.local_part().to_string()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }
}

/// Login input. Everything except the email is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileData {
    /// Existing user ID to resume; a new time-derived ID is used otherwise.
    pub id: Option<UserId>,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub member_since: Option<DateTime<Utc>>,
    pub email_notifications: Option<bool>,
    pub sms_notifications: Option<bool>,
}

impl ProfileData {
    /// Login data carrying only an email address.
    pub fn with_email(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            ..Self::default()
        }
    }
}

/// The built-in demo account.
#[must_use]
pub fn demo_profile() -> ProfileData {
    ProfileData {
        id: None,
        email: "demo@technova.com".to_string(),
        first_name: Some("Demo".to_string()),
        last_name: Some("User".to_string()),
        phone: Some("+1 (555) 123-4567".to_string()),
        address: Some("123 Tech Street, Digital City, DC 12345".to_string()),
        member_since: Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).single(),
        email_notifications: None,
        sms_notifications: None,
    }
}

/// Profile fields to overwrite; `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<Email>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email_notifications: Option<bool>,
    pub sms_notifications: Option<bool>,
}

impl ProfileUpdate {
    fn apply(self, profile: &mut UserProfile) {
        if let Some(first_name) = self.first_name {
            profile.first_name = first_name;
        }
        if let Some(last_name) = self.last_name {
            profile.last_name = last_name;
        }
        if let Some(email) = self.email {
            profile.email = email;
        }
        if let Some(phone) = self.phone {
            profile.phone = phone;
        }
        if let Some(address) = self.address {
            profile.address = address;
        }
        if let Some(enabled) = self.email_notifications {
            profile.email_notifications = enabled;
        }
        if let Some(enabled) = self.sms_notifications {
            profile.sms_notifications = enabled;
        }
    }
}

/// Check a new password against its confirmation.
///
/// No credential is stored anywhere; this only validates the form.
///
/// # Errors
///
/// Returns `PasswordError::Mismatch` if the two entries differ, or
/// `PasswordError::TooShort` if the password has fewer than
/// [`MIN_PASSWORD_LENGTH`] characters.
pub fn validate_password_change(new: &str, confirm: &str) -> Result<(), PasswordError> {
    if new != confirm {
        return Err(PasswordError::Mismatch);
    }
    if new.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(PasswordError::TooShort {
            min: MIN_PASSWORD_LENGTH,
        });
    }
    Ok(())
}

/// The active session: zero or one profile and that profile's orders.
pub struct Session {
    profile: Option<UserProfile>,
    orders: Vec<Order>,
    store: Arc<dyn KeyValueStore>,
    logout_policy: LogoutOrderPolicy,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("profile", &self.profile)
            .field("orders", &self.orders.len())
            .field("logout_policy", &self.logout_policy)
            .finish_non_exhaustive()
    }
}

impl Session {
    /// Resume the persisted profile, if any, and load its orders.
    #[must_use]
    pub fn load(store: Arc<dyn KeyValueStore>, logout_policy: LogoutOrderPolicy) -> Self {
        let profile: Option<UserProfile> = load_json(store.as_ref(), Slot::User);
        let mut session = Self {
            profile,
            orders: Vec::new(),
            store,
            logout_policy,
        };
        session.reload_orders();

        if let Some(profile) = &session.profile {
            tracing::info!(user_id = %profile.id, orders = session.orders.len(), "Session resumed");
        }
        session
    }

    /// Log in, replacing any active profile.
    ///
    /// Missing optional fields take defaults: empty names, phone and address,
    /// `member_since` of now, email notifications on, SMS off.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::InvalidEmail` if the email is malformed (the
    /// session is unchanged), or `SessionError::Storage` if the profile could
    /// not be persisted.
    pub fn login(&mut self, data: ProfileData) -> Result<&UserProfile, SessionError> {
        let email = Email::parse(&data.email)?;
        let now = Utc::now();

        let profile = UserProfile {
            id: data
                .id
                .unwrap_or_else(|| UserId::new(now.timestamp_millis())),
            email,
            first_name: data.first_name.unwrap_or_default(),
            last_name: data.last_name.unwrap_or_default(),
            phone: data.phone.unwrap_or_default(),
            address: data.address.unwrap_or_default(),
            member_since: data.member_since.unwrap_or(now),
            email_notifications: data.email_notifications.unwrap_or(true),
            sms_notifications: data.sms_notifications.unwrap_or(false),
        };

        tracing::info!(user_id = %profile.id, email = %profile.email, "Logged in");
        save_json(self.store.as_ref(), Slot::User, &profile)?;
        self.orders = orders_for(&self.load_log(), profile.id);

        Ok(self.profile.insert(profile))
    }

    /// Log out, erasing the persisted profile and orders per the configured
    /// [`LogoutOrderPolicy`]. A no-op when already logged out.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if a slot could not be erased.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        let Some(profile) = self.profile.take() else {
            return Ok(());
        };
        self.orders.clear();

        self.store.remove(Slot::User)?;
        match self.logout_policy {
            LogoutOrderPolicy::All => self.store.remove(Slot::Orders)?,
            LogoutOrderPolicy::User => {
                let mut log = self.load_log();
                log.retain(|o| o.user_id != profile.id);
                save_json(self.store.as_ref(), Slot::Orders, &log)?;
            }
        }

        tracing::info!(user_id = %profile.id, policy = ?self.logout_policy, "Logged out");
        Ok(())
    }

    /// Delete the account. Equivalent to [`Session::logout`].
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if a slot could not be erased.
    pub fn delete_account(&mut self) -> Result<(), SessionError> {
        self.logout()
    }

    /// Record an order for the active user from a cart snapshot.
    ///
    /// Returns `Ok(None)` without side effects when logged out or when
    /// `lines` is empty. A blank `shipping_address` falls back to the
    /// profile address. The order is prepended to the durable log, so it is
    /// first in [`Session::orders`].
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the order log could not be saved.
    pub fn place_order(
        &mut self,
        lines: &[CartLine],
        shipping_address: Option<&str>,
    ) -> Result<Option<Order>, SessionError> {
        let Some(profile) = &self.profile else {
            return Ok(None);
        };
        if lines.is_empty() {
            return Ok(None);
        }

        let address = shipping_address
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map_or_else(|| profile.address.clone(), str::to_string);
        let user_id = profile.id;

        let mut log = self.load_log();
        let now = Utc::now();
        let order = Order::record(next_order_id(now, &log), user_id, now, lines.to_vec(), address);
        log.insert(0, order.clone());

        save_json(self.store.as_ref(), Slot::Orders, &log)?;
        self.orders = orders_for(&log, user_id);

        tracing::info!(
            order_id = %order.id,
            user_id = %user_id,
            total = %order.total,
            "Order placed"
        );
        Ok(Some(order))
    }

    /// Overwrite profile fields. Returns `false` when logged out.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Storage` if the profile could not be saved.
    pub fn update_profile(&mut self, update: ProfileUpdate) -> Result<bool, SessionError> {
        let Some(profile) = self.profile.as_mut() else {
            return Ok(false);
        };

        update.apply(profile);
        save_json(self.store.as_ref(), Slot::User, profile)?;
        tracing::info!(user_id = %profile.id, "Profile updated");
        Ok(true)
    }

    /// Active profile, if logged in.
    #[must_use]
    pub const fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        self.profile.is_some()
    }

    /// Active user's orders, most recent first.
    #[must_use]
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    fn load_log(&self) -> Vec<Order> {
        load_json_records(self.store.as_ref(), Slot::Orders)
    }

    fn reload_orders(&mut self) {
        self.orders = match &self.profile {
            Some(profile) => orders_for(&self.load_log(), profile.id),
            None => Vec::new(),
        };
    }
}
