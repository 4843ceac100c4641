//! Mock auth helpers for router and integration tests.
//!
//! Services behind the gateway receive `x-foodgram-user-id` and
//! `x-foodgram-user-staff` headers. `MockAuth` produces them directly so no
//! real gateway is needed.

use axum::http::{HeaderMap, HeaderName, HeaderValue};

use foodgram_auth_types::identity::{USER_ID_HEADER, USER_STAFF_HEADER};

/// Configurable identity injected into test requests.
#[derive(Debug, Clone, Copy)]
pub struct MockAuth {
    pub user_id: i32,
    pub is_staff: bool,
}

impl MockAuth {
    pub fn user(user_id: i32) -> Self {
        Self {
            user_id,
            is_staff: false,
        }
    }

    pub fn staff(user_id: i32) -> Self {
        Self {
            user_id,
            is_staff: true,
        }
    }

    /// Return headers as if the gateway injected them.
    pub fn headers(&self) -> HeaderMap {
        let mut map = HeaderMap::new();
        map.insert(
            HeaderName::from_static(USER_ID_HEADER),
            HeaderValue::from(self.user_id),
        );
        map.insert(
            HeaderName::from_static(USER_STAFF_HEADER),
            HeaderValue::from_static(if self.is_staff { "true" } else { "false" }),
        );
        map
    }
}
