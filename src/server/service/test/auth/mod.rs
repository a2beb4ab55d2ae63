use super::*;
use crate::server::{
    model::auth::{
        AccountChangeType, LoginOutcome, LoginParams, PasswordResetOutcome,
        PasswordVerifyOutcome, RegisterOutcome, RegisterParams,
    },
    service::{
        auth::{
            credentials::{hash_password, verify_password},
            AuthService,
        },
        email::{EmailTemplate, OutgoingEmail},
    },
};

mod deploy;
mod password;
mod register;

fn sent(outbox: &std::sync::Mutex<Vec<OutgoingEmail>>) -> Vec<OutgoingEmail> {
    outbox.lock().unwrap().clone()
}
