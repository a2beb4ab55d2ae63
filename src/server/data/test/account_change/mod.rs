use crate::server::{data::account_change::AccountChangeRepository, model::auth::AccountChangeType};
use sea_orm::DbErr;
use test_utils::{builder::TestBuilder, factory};

mod consume;
mod find_pending;
