use std::collections::BTreeMap;

use axum::http::Method;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter};
use serde_json::{json, Value};

use super::*;
use crate::server::{
    model::server::{
        CreateServerOutcome, CreateServerParams, CreateServerRejection, DeleteServerOutcome,
    },
    service::{oauth::OAuthService, server::ServerService},
};

mod create;
mod list;
mod lookup;

fn create_form(node_id: i32, name: &str, owner_email: &str) -> CreateServerParams {
    let form: BTreeMap<String, String> = [
        ("location", "1".to_string()),
        ("plugin", "minecraft".to_string()),
        ("node", node_id.to_string()),
        ("server_name", name.to_string()),
        ("email", owner_email.to_string()),
        ("version", "1.12.2".to_string()),
        ("memory", "1024".to_string()),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect();

    CreateServerParams::from_form(&form)
}

/// Number of OAuth clients scoped to any server.
async fn server_client_count(db: &sea_orm::DatabaseConnection) -> Result<u64, sea_orm::DbErr> {
    entity::prelude::OauthClient::find()
        .filter(entity::oauth_client::Column::ServerId.is_not_null())
        .count(db)
        .await
}
