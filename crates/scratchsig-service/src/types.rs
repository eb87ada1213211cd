//! Response bodies for the scratchsig service

use serde::Serialize;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_secs: u64,
}

/// A resolved signature avatar
#[derive(Debug, Serialize)]
pub struct AvatarResponse {
    pub username: String,
    pub user_id: String,
    pub avatar_url: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_avatar_response_serialization() {
        let response = AvatarResponse {
            username: "Jane_Doe".to_string(),
            user_id: "42".to_string(),
            avatar_url: "https://cdn2.scratch.mit.edu/get_image/user/42_18x18.png".to_string(),
        };

        let json: serde_json::Value = serde_json::to_value(&response).unwrap();
        assert_eq!(json["username"], "Jane_Doe");
        assert_eq!(json["user_id"], "42");
        assert!(json["avatar_url"].as_str().unwrap().ends_with("42_18x18.png"));
    }
}
