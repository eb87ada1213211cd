//! Avatar image URLs on the Scratch CDN

const DEFAULT_AVATAR_BASE_URL: &str = "https://cdn2.scratch.mit.edu/get_image/user";
const DEFAULT_AVATAR_SIZE: u32 = 18;

/// A resolved user ID together with its avatar URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedAvatar {
    pub user_id: String,
    pub avatar_url: String,
}

/// Builds `{base}/{id}_{size}x{size}.png` avatar URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarUrlTemplate {
    base_url: String,
    size: u32,
}

impl AvatarUrlTemplate {
    pub fn new(base_url: &str, size: u32) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            size,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Avatar URL for a resolved user ID. The ID is inserted verbatim.
    pub fn url_for(&self, user_id: &str) -> String {
        format!(
            "{}/{}_{}x{}.png",
            self.base_url, user_id, self.size, self.size
        )
    }
}

impl Default for AvatarUrlTemplate {
    fn default() -> Self {
        Self::new(DEFAULT_AVATAR_BASE_URL, DEFAULT_AVATAR_SIZE)
    }
}
