//! Backend operations used by the shop
//!
//! [`ShopBackend`] is the seam between the HTTP service and the hosted
//! backend. [`HttpClient`] implements it against the real REST/auth API;
//! tests substitute an in-memory implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use shared::models::{MenuItem, Role, SaleRecord};
use shared::rows::{self, Decoded, MenuInsertRow, SaleInsertRow};

use crate::{ClientError, ClientResult, HttpClient};

const SALES_PATH: &str = "rest/v1/Sales";
const MENU_PATH: &str = "rest/v1/Menu";
const PROFILES_PATH: &str = "rest/v1/profiles";

/// Authenticated user as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Result of a password sign-in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub user: BackendUser,
}

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize, Deserialize)]
struct ProfileRow {
    id: String,
    role: String,
}

#[derive(Debug, Deserialize)]
struct RoleRow {
    role: Option<String>,
}

/// Operations the shop needs from the hosted backend
///
/// `access_token` is the signed-in user's backend token; `None` falls back
/// to anonymous access.
#[async_trait]
pub trait ShopBackend: Send + Sync {
    /// Bulk read of all sale records
    async fn fetch_sales(&self, access_token: Option<&str>) -> ClientResult<Decoded<SaleRecord>>;

    /// Bulk read of the menu
    async fn fetch_menu(&self, access_token: Option<&str>) -> ClientResult<Decoded<MenuItem>>;

    /// Add a drink to the menu, returning the stored row
    async fn insert_menu_item(
        &self,
        item: &MenuItem,
        access_token: Option<&str>,
    ) -> ClientResult<MenuItem>;

    /// Append a sale, returning the stored row
    async fn insert_sale(
        &self,
        sale: &SaleRecord,
        access_token: Option<&str>,
    ) -> ClientResult<SaleRecord>;

    /// Register a new account
    async fn sign_up(&self, email: &str, password: &str) -> ClientResult<BackendUser>;

    /// Password sign-in
    async fn sign_in(&self, email: &str, password: &str) -> ClientResult<AuthSession>;

    /// Revoke a backend session
    async fn sign_out(&self, access_token: &str) -> ClientResult<()>;

    /// Role stored in the user's profile row, if any
    async fn fetch_role(&self, user_id: &str, access_token: Option<&str>)
    -> ClientResult<Option<Role>>;

    /// Create the profile row for a new account
    async fn create_profile(
        &self,
        user_id: &str,
        role: Role,
        access_token: Option<&str>,
    ) -> ClientResult<()>;
}

#[async_trait]
impl ShopBackend for HttpClient {
    async fn fetch_sales(&self, access_token: Option<&str>) -> ClientResult<Decoded<SaleRecord>> {
        let raw: Vec<Value> = self
            .get(&format!("{}?select=*", SALES_PATH), access_token)
            .await?;
        tracing::debug!(rows = raw.len(), "Fetched sales rows");
        Ok(rows::decode_sales(raw))
    }

    async fn fetch_menu(&self, access_token: Option<&str>) -> ClientResult<Decoded<MenuItem>> {
        let raw: Vec<Value> = self
            .get(&format!("{}?select=*", MENU_PATH), access_token)
            .await?;
        tracing::debug!(rows = raw.len(), "Fetched menu rows");
        Ok(rows::decode_menu(raw))
    }

    async fn insert_menu_item(
        &self,
        item: &MenuItem,
        access_token: Option<&str>,
    ) -> ClientResult<MenuItem> {
        let body = [MenuInsertRow::from(item)];
        let stored: Vec<Value> = self.post(MENU_PATH, &body, access_token).await?;
        match stored.first() {
            Some(row) => rows::decode_menu_row(row)
                .map_err(|e| ClientError::InvalidResponse(format!("stored menu row: {}", e))),
            None => Ok(item.clone()),
        }
    }

    async fn insert_sale(
        &self,
        sale: &SaleRecord,
        access_token: Option<&str>,
    ) -> ClientResult<SaleRecord> {
        let body = [SaleInsertRow::from(sale)];
        let stored: Vec<Value> = self.post(SALES_PATH, &body, access_token).await?;
        match stored.first() {
            Some(row) => rows::decode_sale_row(row)
                .map_err(|e| ClientError::InvalidResponse(format!("stored sale row: {}", e))),
            None => Ok(sale.clone()),
        }
    }

    async fn sign_up(&self, email: &str, password: &str) -> ClientResult<BackendUser> {
        let body: Value = self
            .post("auth/v1/signup", &Credentials { email, password }, None)
            .await?;
        // With email confirmation enabled the user object comes back bare,
        // otherwise it is wrapped in a session.
        let user = body.get("user").cloned().unwrap_or(body);
        serde_json::from_value(user).map_err(Into::into)
    }

    async fn sign_in(&self, email: &str, password: &str) -> ClientResult<AuthSession> {
        self.post(
            "auth/v1/token?grant_type=password",
            &Credentials { email, password },
            None,
        )
        .await
    }

    async fn sign_out(&self, access_token: &str) -> ClientResult<()> {
        self.post_empty("auth/v1/logout", Some(access_token)).await
    }

    async fn fetch_role(
        &self,
        user_id: &str,
        access_token: Option<&str>,
    ) -> ClientResult<Option<Role>> {
        let rows: Vec<RoleRow> = self
            .get(
                &format!("{}?id=eq.{}&select=role", PROFILES_PATH, user_id),
                access_token,
            )
            .await?;
        Ok(rows
            .into_iter()
            .next()
            .and_then(|r| r.role)
            .map(|r| Role::parse(&r)))
    }

    async fn create_profile(
        &self,
        user_id: &str,
        role: Role,
        access_token: Option<&str>,
    ) -> ClientResult<()> {
        let body = [ProfileRow {
            id: user_id.to_string(),
            role: role.as_str().to_string(),
        }];
        let _: Value = self.post(PROFILES_PATH, &body, access_token).await?;
        Ok(())
    }
}
