use crate::{
    libs::{messages::Message, secret::Secret},
    msg_info, msg_success,
};
use anyhow::Result;

pub fn cmd() -> Result<()> {
    if Secret::api_token().delete()? {
        msg_success!(Message::TokenCacheDeleted);
    } else {
        msg_info!(Message::TokenCacheNotFound);
    }
    Ok(())
}
