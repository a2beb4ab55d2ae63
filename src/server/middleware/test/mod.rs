use axum_extra::extract::{cookie::Cookie, CookieJar};
use test_utils::{builder::TestBuilder, factory};

use crate::server::{
    error::{auth::AuthError, AppError},
    middleware::{
        auth::{AuthGuard, Permission},
        client_ip::ClientIp,
    },
    util::cookie,
};


fn jar_with_token(token: &str) -> CookieJar {
    CookieJar::new().add(Cookie::new(cookie::AUTH_TOKEN, token.to_string()))
}

fn ip(address: &str) -> ClientIp {
    ClientIp(address.to_string())
}
