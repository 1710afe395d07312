//! Encrypted on-disk cache for the Jira API token.
//!
//! The token is prompted once with a hidden input, encrypted with
//! AES-256-CBC using key material embedded at build time, and stored
//! base64-encoded in the data directory. Later runs decrypt it silently.

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::msg_bail_anyhow;
use aes::Aes256;
use anyhow::Result;
use base64::prelude::*;
use block_modes::block_padding::Pkcs7;
use block_modes::{BlockMode, Cbc};
use dialoguer::{theme::ColorfulTheme, Password};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

// Include generated metadata with encryption keys
include!(concat!(env!("OUT_DIR"), "/app_metadata.rs"));

type Aes256Cbc = Cbc<Aes256, Pkcs7>;

pub const API_TOKEN_FILE: &str = ".jira_api_token";

#[derive(Clone, Debug)]
pub struct Secret {
    prompt: String,
    secret_file_path: PathBuf,
    key: Vec<u8>,
    iv: Vec<u8>,
}

impl Secret {
    pub fn new(secret_name: &str, prompt: &str) -> Self {
        let secret_file_path = DataStorage::new().get_path(secret_name).unwrap_or_else(|_| PathBuf::from(secret_name));
        Self::at(secret_file_path, prompt)
    }

    /// A secret stored at an explicit path.
    pub fn at(secret_file_path: impl Into<PathBuf>, prompt: &str) -> Self {
        Self {
            prompt: prompt.to_owned(),
            secret_file_path: secret_file_path.into(),
            key: APP_METADATA_ENCRYPTION_KEY.to_vec(),
            iv: APP_METADATA_ENCRYPTION_IV.to_vec(),
        }
    }

    /// The cache holding the Jira API token.
    pub fn api_token() -> Self {
        Self::new(API_TOKEN_FILE, &Message::PromptApiToken.to_string())
    }

    pub fn path(&self) -> &Path {
        &self.secret_file_path
    }

    /// Returns the cached value, prompting for it when there is none.
    pub fn get_or_prompt(&self) -> Result<String> {
        if let Ok(value) = self.read() {
            return Ok(value);
        }
        self.prompt()
    }

    pub fn prompt(&self) -> Result<String> {
        let value = Password::with_theme(&ColorfulTheme::default()).with_prompt(&self.prompt).interact()?;
        if value.trim().is_empty() {
            msg_bail_anyhow!(Message::ApiTokenMissing);
        }
        self.store(&value)?;
        Ok(value)
    }

    /// Encrypts and writes `value`, replacing any cached one.
    pub fn store(&self, value: &str) -> Result<()> {
        let cipher = Aes256Cbc::new_from_slices(&self.key, &self.iv)?;
        let ciphertext = cipher.encrypt_vec(value.as_bytes());
        let encoded = BASE64_STANDARD.encode(&ciphertext);

        if let Some(parent) = self.secret_file_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut file = File::create(&self.secret_file_path)?;
        file.write_all(encoded.as_bytes())?;
        Ok(())
    }

    /// Decrypts the cached value.
    pub fn read(&self) -> Result<String> {
        let mut file = File::open(&self.secret_file_path)?;
        let mut encoded = String::new();
        file.read_to_string(&mut encoded)?;
        let ciphertext = BASE64_STANDARD.decode(encoded.trim())?;
        let cipher = Aes256Cbc::new_from_slices(&self.key, &self.iv)?;
        let decrypted = cipher.decrypt_vec(&ciphertext)?;
        Ok(String::from_utf8(decrypted)?)
    }

    /// Removes the cache file. Returns `false` when there was nothing to remove.
    pub fn delete(&self) -> Result<bool> {
        if !self.secret_file_path.exists() {
            return Ok(false);
        }
        fs::remove_file(&self.secret_file_path)?;
        Ok(true)
    }
}
