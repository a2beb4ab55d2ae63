//! Names and builders for the cookies the panel sets.

use axum_extra::extract::cookie::{Cookie, SameSite};
use time::Duration;

/// Login session token, matched against `users.session_id`.
pub const AUTH_TOKEN: &str = "pp_auth_token";
/// Per-server OAuth token of the viewed server's owner.
pub const ACCESS_TOKEN: &str = "accessToken";
pub const SERVER_NODE: &str = "pp_server_node";
pub const SERVER_HASH: &str = "pp_server_hash";
/// Base64 JSON copy of the last submitted new-server form.
pub const NEW_SERVER_FORM: &str = "__temporary_pp_admin_newserver";

/// Session cookie lifetime when "remember me" is ticked.
pub const REMEMBER_ME: Duration = Duration::days(7);
pub const NEW_SERVER_FORM_TTL: Duration = Duration::seconds(60);

/// Login cookie; persistent for `REMEMBER_ME` when requested, browser-session otherwise.
pub fn auth_token(token: String, remember_me: bool) -> Cookie<'static> {
    let mut builder = Cookie::build((AUTH_TOKEN, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);

    if remember_me {
        builder = builder.max_age(REMEMBER_ME);
    }

    builder.build()
}

pub fn access_token(token: String) -> Cookie<'static> {
    Cookie::build((ACCESS_TOKEN, token)).path("/").build()
}

pub fn new_server_form(encoded: String) -> Cookie<'static> {
    Cookie::build((NEW_SERVER_FORM, encoded))
        .path("/")
        .http_only(true)
        .max_age(NEW_SERVER_FORM_TTL)
        .build()
}

/// A cookie that, when added to a jar, expires `name` on the client.
pub fn removal(name: &'static str) -> Cookie<'static> {
    Cookie::build(name).path("/").build()
}
