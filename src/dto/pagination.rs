use serde::Deserialize;
use validator::Validate;

use crate::repositories::Page;

pub const DEFAULT_LIMIT: i64 = 100;
pub const MAX_LIMIT: i64 = 100;

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

/// Parámetros `?offset&limit` comunes a los listados
#[derive(Debug, Clone, Copy, Deserialize, Validate)]
pub struct PaginationParams {
    #[serde(default)]
    #[validate(range(min = 0))]
    pub offset: i64,

    #[serde(default = "default_limit")]
    #[validate(range(min = 1, max = 100))]
    pub limit: i64,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl PaginationParams {
    pub fn page(&self) -> Page {
        Page {
            offset: self.offset,
            limit: self.limit.min(MAX_LIMIT),
        }
    }
}
