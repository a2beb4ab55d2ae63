mod account_change;
mod oauth;
mod user;
