pub use super::account_change::Entity as AccountChange;
pub use super::autodeploy::Entity as Autodeploy;
pub use super::location::Entity as Location;
pub use super::node::Entity as Node;
pub use super::oauth_access_token::Entity as OauthAccessToken;
pub use super::oauth_client::Entity as OauthClient;
pub use super::permission::Entity as Permission;
pub use super::server::Entity as Server;
pub use super::subuser::Entity as Subuser;
pub use super::user::Entity as User;
