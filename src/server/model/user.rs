use crate::model::server::{AccountDto, UserDto};
use crate::server::util::keygen::email_hash;

impl From<&entity::user::Model> for UserDto {
    fn from(user: &entity::user::Model) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            email: user.email.clone(),
            root_admin: user.root_admin,
        }
    }
}

impl From<&entity::user::Model> for AccountDto {
    fn from(user: &entity::user::Model) -> Self {
        Self {
            email: user.email.clone(),
            username: user.username.clone(),
            hash: email_hash(&user.email),
        }
    }
}

