use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::types::{CompanyId, UserId};

/// Request-scoped environment passed into every action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Context {
    /// Company the request runs for.
    pub company_id: CompanyId,
    /// User performing the action.
    pub user_id: UserId,
    /// Date of the request; used where a document date is missing.
    pub today: NaiveDate,
}

impl Context {
    pub fn new(company_id: CompanyId, user_id: UserId, today: NaiveDate) -> Self {
        Self {
            company_id,
            user_id,
            today,
        }
    }
}
