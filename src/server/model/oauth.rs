/// Values for a new OAuth client row.
#[derive(Debug, Clone)]
pub struct CreateOAuthClientParams {
    pub client_id: String,
    pub client_secret: String,
    pub user_id: Option<i32>,
    pub server_id: Option<i32>,
    pub scopes: String,
    pub name: String,
    pub description: String,
}
