//! Input rules for server names, usernames and passwords.

use std::sync::LazyLock;

use regex::Regex;

static SERVER_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z_ -]{4,35}$").expect("static regex"));

static USERNAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z_-]{4,35}$").expect("static regex"));

/// 4 to 35 ASCII word characters, spaces or hyphens.
pub fn is_valid_server_name(name: &str) -> bool {
    SERVER_NAME.is_match(name)
}

/// 4 to 35 ASCII word characters or hyphens.
pub fn is_valid_username(username: &str) -> bool {
    USERNAME.is_match(username)
}

/// At least 8 characters with a digit, a lower-case and an upper-case letter.
pub fn meets_password_requirements(password: &str) -> bool {
    password.chars().count() >= 8
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| c.is_lowercase())
        && password.chars().any(|c| c.is_uppercase())
}
