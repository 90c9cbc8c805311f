//! Typed access to the backend's resources through the gateway.
//!
//! Record bodies are passed through as JSON values; only the pieces the
//! session layer depends on are typed.

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;
use tracing::instrument;

use armory_core::{BaseId, Result, UserProfile};

use crate::endpoints::*;
use crate::gateway::ApiGateway;

/// Filters accepted by the dashboard endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DashboardFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_id: Option<BaseId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub equipment_type_id: Option<i64>,
}

impl DashboardFilter {
    pub fn base(mut self, base_id: BaseId) -> Self {
        self.base_id = Some(base_id);
        self
    }

    pub fn between(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    pub fn equipment_type(mut self, id: i64) -> Self {
        self.equipment_type_id = Some(id);
        self
    }
}

/// A collection endpoint such as `purchases` or `transfers`.
#[derive(Debug, Clone, Copy)]
pub struct Collection<'a> {
    gateway: &'a ApiGateway,
    path: &'static str,
}

impl<'a> Collection<'a> {
    pub fn path(&self) -> &'static str {
        self.path
    }

    /// List records matching `query`.
    #[instrument(skip(self, query), fields(collection = self.path))]
    pub async fn list<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<Value> {
        self.gateway.get(self.path, query).await
    }

    /// Create a record.
    #[instrument(skip(self, record), fields(collection = self.path))]
    pub async fn create(&self, record: &Value) -> Result<Value> {
        self.gateway.post(self.path, record).await
    }

    /// Replace record `id`.
    #[instrument(skip(self, record), fields(collection = self.path))]
    pub async fn update(&self, id: i64, record: &Value) -> Result<Value> {
        self.gateway.put(&format!("{}/{}", self.path, id), record).await
    }

    /// Delete record `id`.
    #[instrument(skip(self), fields(collection = self.path))]
    pub async fn delete(&self, id: i64) -> Result<Value> {
        self.gateway.delete(&format!("{}/{}", self.path, id)).await
    }

    /// Apply a named action to record `id`, e.g. `transfers/7/status`.
    #[instrument(skip(self, body), fields(collection = self.path))]
    pub async fn act<B>(&self, id: i64, action: &str, body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.gateway
            .put(&format!("{}/{}/{}", self.path, id, action), body)
            .await
    }
}

impl ApiGateway {
    fn collection(&self, path: &'static str) -> Collection<'_> {
        Collection {
            gateway: self,
            path,
        }
    }

    pub fn purchases(&self) -> Collection<'_> {
        self.collection(PURCHASES)
    }

    pub fn transfers(&self) -> Collection<'_> {
        self.collection(TRANSFERS)
    }

    pub fn assignments(&self) -> Collection<'_> {
        self.collection(ASSIGNMENTS)
    }

    pub fn expenditures(&self) -> Collection<'_> {
        self.collection(EXPENDITURES)
    }

    /// Move a transfer to a new status, recording when it arrived if known.
    pub async fn update_transfer_status(
        &self,
        id: i64,
        status: &str,
        received_date: Option<NaiveDate>,
    ) -> Result<Value> {
        let request = TransferStatusRequest {
            status,
            received_date,
        };
        self.transfers().act(id, "status", &request).await
    }

    /// Mark an assignment as returned on `return_date`.
    pub async fn return_assignment(&self, id: i64, return_date: NaiveDate) -> Result<Value> {
        let request = ReturnAssignmentRequest { return_date };
        self.assignments().act(id, "return", &request).await
    }

    pub async fn dashboard_metrics(&self, filter: &DashboardFilter) -> Result<Value> {
        self.get(DASHBOARD_METRICS, filter).await
    }

    pub async fn movement_details(&self, filter: &DashboardFilter) -> Result<Value> {
        self.get(DASHBOARD_MOVEMENT_DETAILS, filter).await
    }

    pub async fn inventory_summary(&self, filter: &DashboardFilter) -> Result<Value> {
        self.get(DASHBOARD_INVENTORY_SUMMARY, filter).await
    }

    pub async fn bases(&self) -> Result<Value> {
        self.get(BASES, NO_QUERY).await
    }

    pub async fn equipment_types<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<Value> {
        self.get(EQUIPMENT_TYPES, query).await
    }

    pub async fn users(&self) -> Result<Value> {
        self.get(USERS, NO_QUERY).await
    }

    pub async fn audit_logs<Q: Serialize + ?Sized>(&self, query: &Q) -> Result<Value> {
        self.get(AUDIT_LOGS, query).await
    }

    /// Fetch the profile the server holds for the current token.
    #[instrument(skip(self))]
    pub async fn me(&self) -> Result<UserProfile> {
        let response: MeResponse = self.get(ME, NO_QUERY).await?;
        Ok(response.user)
    }

    /// Change the signed-in user's password.
    ///
    /// The server answers a wrong old password with 401, which ends the
    /// session like any other 401.
    #[instrument(skip_all)]
    pub async fn change_password(&self, old_password: &str, new_password: &str) -> Result<Value> {
        let request = ChangePasswordRequest {
            old_password,
            new_password,
        };
        self.post(CHANGE_PASSWORD, &request).await
    }
}
