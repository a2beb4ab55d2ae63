use crate::server::{data::oauth::OAuthRepository, model::oauth::CreateOAuthClientParams};
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod find_live_token;
