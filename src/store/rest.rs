//! HTTP implementation of the data store
//!
//! Talks to the remote relational store through its REST resource endpoints
//! (PostgREST dialect): row filters are query parameters (`user_id=eq.<id>`),
//! inserts ask for the created row back with `Prefer: return=representation`,
//! and partial updates PATCH the filtered row. Amounts travel as integer
//! cents. Every call is a single request with no retry.

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::error::{OutlayError, OutlayResult};
use crate::models::{
    Budget, BudgetId, BudgetPatch, Category, CategoryId, CategoryPatch, Expense, ExpenseId,
    ExpensePatch, NewBudget, NewCategory, NewExpense, UserId,
};

use super::DataStore;

/// Client for the remote store's REST endpoints
#[derive(Debug, Clone)]
pub struct RestStore {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    access_token: String,
}

/// Insert payload: the creation request plus the owner column
#[derive(Serialize)]
struct Insert<T: Serialize> {
    user_id: UserId,
    #[serde(flatten)]
    row: T,
}

impl RestStore {
    /// Create a client for the store at `base_url`
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            http: reqwest::Client::new(),
            base_url,
            api_key: api_key.into(),
            access_token: access_token.into(),
        }
    }

    fn resource_url(&self, resource: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url, resource)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
    }

    /// Fail on non-2xx responses, folding the status and body into the error
    async fn check(resource: &str, verb: &str, response: Response) -> OutlayResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(OutlayError::Auth(format!(
                "{} {} rejected ({}): {}",
                resource, verb, status.as_u16(), body
            )));
        }
        Err(OutlayError::Store(format!(
            "{} {} failed ({}): {}",
            resource, verb, status.as_u16(), body
        )))
    }

    async fn list<T: DeserializeOwned>(
        &self,
        resource: &str,
        user_id: UserId,
        order: Option<&str>,
    ) -> OutlayResult<Vec<T>> {
        debug!(resource, %user_id, "listing rows");

        let mut query = vec![
            ("select".to_string(), "*".to_string()),
            ("user_id".to_string(), format!("eq.{}", user_id.as_uuid())),
        ];
        if let Some(order) = order {
            query.push(("order".to_string(), order.to_string()));
        }

        let response = self
            .request(Method::GET, &self.resource_url(resource))
            .query(&query)
            .send()
            .await?;
        let response = Self::check(resource, "list", response).await?;

        response
            .json::<Vec<T>>()
            .await
            .map_err(|e| OutlayError::Store(format!("{} list returned malformed rows: {}", resource, e)))
    }

    async fn insert<T: Serialize, R: DeserializeOwned>(
        &self,
        resource: &str,
        user_id: UserId,
        row: T,
    ) -> OutlayResult<R> {
        debug!(resource, %user_id, "inserting row");

        let response = self
            .request(Method::POST, &self.resource_url(resource))
            .header("Prefer", "return=representation")
            .json(&Insert { user_id, row })
            .send()
            .await?;
        let response = Self::check(resource, "insert", response).await?;

        let mut rows: Vec<R> = response
            .json()
            .await
            .map_err(|e| OutlayError::Store(format!("{} insert returned malformed row: {}", resource, e)))?;

        if rows.is_empty() {
            return Err(OutlayError::Store(format!(
                "{} insert returned no row",
                resource
            )));
        }
        Ok(rows.remove(0))
    }

    async fn patch<T: Serialize>(
        &self,
        resource: &str,
        id: &uuid::Uuid,
        patch: &T,
    ) -> OutlayResult<()> {
        debug!(resource, %id, "updating row");

        let response = self
            .request(Method::PATCH, &self.resource_url(resource))
            .query(&[("id", format!("eq.{}", id))])
            .json(patch)
            .send()
            .await?;
        Self::check(resource, "update", response).await?;
        Ok(())
    }
}

impl DataStore for RestStore {
    async fn list_expenses(&self, user_id: UserId) -> OutlayResult<Vec<Expense>> {
        self.list("expenses", user_id, Some("date.desc")).await
    }

    async fn create_expense(&self, user_id: UserId, new: &NewExpense) -> OutlayResult<Expense> {
        self.insert("expenses", user_id, new.clone()).await
    }

    async fn update_expense(&self, id: ExpenseId, patch: &ExpensePatch) -> OutlayResult<()> {
        self.patch("expenses", id.as_uuid(), patch).await
    }

    async fn delete_expense(&self, id: ExpenseId) -> OutlayResult<()> {
        debug!(%id, "deleting expense");

        let response = self
            .request(Method::DELETE, &self.resource_url("expenses"))
            .query(&[("id", format!("eq.{}", id.as_uuid()))])
            .send()
            .await?;
        Self::check("expenses", "delete", response).await?;
        Ok(())
    }

    async fn list_categories(&self, user_id: UserId) -> OutlayResult<Vec<Category>> {
        self.list("categories", user_id, Some("name.asc")).await
    }

    async fn create_category(&self, user_id: UserId, new: &NewCategory) -> OutlayResult<Category> {
        self.insert("categories", user_id, new.clone()).await
    }

    async fn update_category(&self, id: CategoryId, patch: &CategoryPatch) -> OutlayResult<()> {
        self.patch("categories", id.as_uuid(), patch).await
    }

    async fn list_budgets(&self, user_id: UserId) -> OutlayResult<Vec<Budget>> {
        self.list("budgets", user_id, None).await
    }

    async fn create_budget(&self, user_id: UserId, new: &NewBudget) -> OutlayResult<Budget> {
        self.insert("budgets", user_id, new.clone()).await
    }

    async fn update_budget(&self, id: BudgetId, patch: &BudgetPatch) -> OutlayResult<()> {
        self.patch("budgets", id.as_uuid(), patch).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use chrono::NaiveDate;

    #[test]
    fn test_base_url_trailing_slash_trimmed() {
        let store = RestStore::new("https://store.example.com/", "key", "token");
        assert_eq!(
            store.resource_url("expenses"),
            "https://store.example.com/rest/v1/expenses"
        );
    }

    #[test]
    fn test_insert_payload_includes_owner() {
        let user = UserId::new();
        let new = NewExpense {
            amount: Money::from_cents(550),
            category_id: None,
            description: Some("Coffee".into()),
            date: NaiveDate::from_ymd_opt(2026, 3, 14).unwrap(),
            input_method: Default::default(),
            photo_url: None,
        };
        let json = serde_json::to_value(Insert {
            user_id: user,
            row: new,
        })
        .unwrap();

        assert_eq!(json["user_id"], user.as_uuid().to_string());
        assert_eq!(json["amount"], 550);
        assert_eq!(json["input_method"], "manual");
    }
}
