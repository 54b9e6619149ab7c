//! Session, profile, order and checkout commands.

use technova_core::Email;
use technova_storefront::config::StorefrontConfig;
use technova_storefront::session::{ProfileData, ProfileUpdate};
use technova_storefront::{CheckoutForm, Intent, Storefront};

use super::{CommandError, open};
use crate::render;

fn greet(app: &Storefront) {
    if let Some(profile) = app.session().profile() {
        render::emit(&format!("Welcome, {}!", profile.display_name()));
    }
}

/// Log in with the given profile data.
///
/// # Errors
///
/// Returns an error if the email is invalid or the session could not be saved.
pub fn login(config: &StorefrontConfig, data: ProfileData) -> Result<(), CommandError> {
    let mut app = open(config);
    app.dispatch(Intent::Login(data))?;
    greet(&app);
    Ok(())
}

/// Log in as the built-in demo user.
///
/// # Errors
///
/// Returns an error if the session could not be saved.
pub fn demo_login(config: &StorefrontConfig) -> Result<(), CommandError> {
    let mut app = open(config);
    app.dispatch(Intent::DemoLogin)?;
    greet(&app);
    Ok(())
}

/// End the session.
///
/// # Errors
///
/// Returns an error if the session could not be cleared.
pub fn logout(config: &StorefrontConfig) -> Result<(), CommandError> {
    let mut app = open(config);
    app.dispatch(Intent::Logout)?;
    render::emit("Logged out.");
    Ok(())
}

/// Delete the account and end the session.
///
/// # Errors
///
/// Returns an error if the session could not be cleared.
pub fn delete_account(config: &StorefrontConfig) -> Result<(), CommandError> {
    let mut app = open(config);
    if !app.session().is_logged_in() {
        return Err(CommandError::NotLoggedIn);
    }
    app.dispatch(Intent::DeleteAccount)?;
    render::emit("Account deleted.");
    Ok(())
}

/// Print the active profile.
///
/// # Errors
///
/// Returns `CommandError::NotLoggedIn` when no one is logged in.
pub fn show_profile(config: &StorefrontConfig) -> Result<(), CommandError> {
    let app = open(config);
    let profile = app.session().profile().ok_or(CommandError::NotLoggedIn)?;
    render::emit(&render::profile(profile));
    Ok(())
}

/// Profile fields given on the command line; `email` is still unparsed.
#[derive(Debug, Clone, Default)]
pub struct ProfileArgs {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub email_notifications: Option<bool>,
    pub sms_notifications: Option<bool>,
}

/// Overwrite profile fields.
///
/// # Errors
///
/// Returns an error if logged out, the email is invalid, or the profile
/// could not be saved.
pub fn update_profile(config: &StorefrontConfig, args: ProfileArgs) -> Result<(), CommandError> {
    let mut app = open(config);
    if !app.session().is_logged_in() {
        return Err(CommandError::NotLoggedIn);
    }

    let email = args.email.as_deref().map(str::parse::<Email>).transpose()?;
    app.dispatch(Intent::UpdateProfile(ProfileUpdate {
        first_name: args.first_name,
        last_name: args.last_name,
        email,
        phone: args.phone,
        address: args.address,
        email_notifications: args.email_notifications,
        sms_notifications: args.sms_notifications,
    }))?;

    render::emit("Profile updated successfully!");
    Ok(())
}

/// Validate a password change.
///
/// # Errors
///
/// Returns an error if the passwords differ or the new one is too short.
pub fn change_password(
    config: &StorefrontConfig,
    new: String,
    confirm: String,
) -> Result<(), CommandError> {
    let mut app = open(config);
    app.dispatch(Intent::ChangePassword { new, confirm })?;
    render::emit("Password updated successfully!");
    Ok(())
}

/// Print the active user's orders.
///
/// # Errors
///
/// Returns `CommandError::NotLoggedIn` when no one is logged in.
pub fn orders(config: &StorefrontConfig) -> Result<(), CommandError> {
    let app = open(config);
    if !app.session().is_logged_in() {
        return Err(CommandError::NotLoggedIn);
    }
    render::emit(&render::order_history(app.orders()));
    Ok(())
}

/// Place an order from the cart. The cart is cleared either way.
///
/// # Errors
///
/// Returns an error if the order or the emptied cart could not be saved.
pub fn checkout(config: &StorefrontConfig, form: CheckoutForm) -> Result<(), CommandError> {
    let mut app = open(config);
    let previous = app.orders().first().map(|o| o.id);

    app.dispatch(Intent::Checkout(form))?;

    match app.orders().first() {
        Some(order) if Some(order.id) != previous => {
            render::emit("Order placed successfully!");
            render::emit(&render::order_summary(order));
        }
        _ if !app.session().is_logged_in() => {
            render::emit("Please log in to place an order. Your cart has been cleared.");
        }
        _ => render::emit("Your cart was empty; no order was placed."),
    }
    Ok(())
}
