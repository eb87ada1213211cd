//! Cache-aside resolution of Scratch usernames

use std::sync::Arc;

use tracing::debug;

use crate::avatar::{AvatarUrlTemplate, ResolvedAvatar};
use crate::cache::{cache_key, IdCache};
use crate::client::UserDirectory;
use crate::types::{LookupFailure, LookupResult};

/// Convert a display username (wiki style, with spaces) to a Scratch username
pub fn normalize(username: &str) -> String {
    username.replace(' ', "_")
}

/// Resolves usernames to Scratch user IDs, caching confirmed IDs only
#[derive(Clone)]
pub struct UserIdResolver {
    directory: Arc<dyn UserDirectory>,
    cache: Arc<dyn IdCache>,
    avatar: AvatarUrlTemplate,
}

impl UserIdResolver {
    pub fn new(directory: Arc<dyn UserDirectory>, cache: Arc<dyn IdCache>) -> Self {
        Self::with_avatar_template(directory, cache, AvatarUrlTemplate::default())
    }

    pub fn with_avatar_template(
        directory: Arc<dyn UserDirectory>,
        cache: Arc<dyn IdCache>,
        avatar: AvatarUrlTemplate,
    ) -> Self {
        Self {
            directory,
            cache,
            avatar,
        }
    }

    /// Resolve a display username to a user ID.
    ///
    /// Not-found and transient outcomes are never cached, so the next call
    /// for the same username asks the API again.
    pub async fn resolve(&self, username: &str) -> LookupResult {
        let username = normalize(username);
        let key = cache_key(&username);

        if let Some(user_id) = self.cache.get(&key).await {
            debug!(username = %username, user_id = %user_id, "User ID cache hit");
            return LookupResult::Found(user_id);
        }

        let result = self.directory.fetch_user_id(&username).await;
        if let LookupResult::Found(ref user_id) = result {
            self.cache.set(&key, user_id.clone()).await;
        }

        result
    }

    /// User ID and avatar image URL for a display username
    pub async fn resolve_avatar(&self, username: &str) -> Result<ResolvedAvatar, LookupFailure> {
        let user_id = self.resolve(username).await.into_result()?;
        let avatar_url = self.avatar.url_for(&user_id);
        Ok(ResolvedAvatar {
            user_id,
            avatar_url,
        })
    }

    /// Avatar image URL for a display username
    pub async fn avatar_url(&self, username: &str) -> Result<String, LookupFailure> {
        self.resolve_avatar(username)
            .await
            .map(|resolved| resolved.avatar_url)
    }

    pub fn avatar_template(&self) -> &AvatarUrlTemplate {
        &self.avatar
    }
}
