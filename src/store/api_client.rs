//! Typed HTTP client over the auction API, used by the state store.

use serde::de::DeserializeOwned;
use serde_json::json;

use crate::models::{client, enchere, image, lot::LotWithBuyer, participation::ParticipantDto};
use crate::services::client_service::ClientInput;
use crate::services::stats_service::{ClientPurchases, EnchereReport, EnchereStats};

#[derive(Debug)]
pub enum ApiError {
    /// Transport-level failure (connection refused, timeout, bad body).
    Request(String),
    /// The server answered with an error status and message.
    Api { status: u16, message: String },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::Request(msg) => write!(f, "request failed: {}", msg),
            ApiError::Api { status, message } => write!(f, "API error {}: {}", status, message),
        }
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        ApiError::Request(e.to_string())
    }
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
        let status = response.status();
        if !status.is_success() {
            let message = response
                .json::<serde_json::Value>()
                .await
                .ok()
                .and_then(|v| v.get("error").and_then(|e| e.as_str()).map(String::from))
                .unwrap_or_else(|| status.to_string());
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json::<T>().await?)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Self::decode(self.http.get(self.url(path)).send().await?).await
    }

    async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        Self::decode(self.http.post(self.url(path)).json(body).send().await?).await
    }

    async fn put<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &serde_json::Value,
    ) -> Result<T, ApiError> {
        Self::decode(self.http.put(self.url(path)).json(body).send().await?).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        Self::decode(self.http.delete(self.url(path)).send().await?).await
    }

    // Auth

    pub async fn login(
        &self,
        username: &str,
        password: &str,
    ) -> Result<serde_json::Value, ApiError> {
        self.post(
            "/login",
            &json!({ "username": username, "password": password }),
        )
        .await
    }

    // Clients

    pub async fn list_clients(&self) -> Result<Vec<client::Model>, ApiError> {
        self.get("/clients").await
    }

    pub async fn get_client(&self, id: i32) -> Result<client::Model, ApiError> {
        self.get(&format!("/clients/{}", id)).await
    }

    pub async fn create_client(&self, input: &ClientInput) -> Result<client::Model, ApiError> {
        self.post(
            "/clients",
            &json!({
                "name": input.name,
                "surname": input.surname,
                "email": input.email,
                "phone": input.phone,
                "address": input.address,
                "notes": input.notes,
            }),
        )
        .await
    }

    pub async fn update_client(
        &self,
        id: i32,
        input: &ClientInput,
    ) -> Result<client::Model, ApiError> {
        self.put(
            &format!("/clients/{}", id),
            &json!({
                "name": input.name,
                "surname": input.surname,
                "email": input.email,
                "phone": input.phone,
                "address": input.address,
                "notes": input.notes,
            }),
        )
        .await
    }

    pub async fn delete_client(&self, id: i32) -> Result<serde_json::Value, ApiError> {
        self.delete(&format!("/clients/{}", id)).await
    }

    // Encheres

    pub async fn list_encheres(&self) -> Result<Vec<enchere::Model>, ApiError> {
        self.get("/encheres").await
    }

    pub async fn get_enchere(&self, id: i32) -> Result<enchere::Model, ApiError> {
        self.get(&format!("/encheres/{}", id)).await
    }

    pub async fn create_enchere(
        &self,
        name: &str,
        date: &str,
        address: &str,
    ) -> Result<enchere::Model, ApiError> {
        self.post(
            "/encheres",
            &json!({ "name": name, "date": date, "address": address }),
        )
        .await
    }

    pub async fn update_enchere(
        &self,
        id: i32,
        name: &str,
        date: &str,
        address: &str,
    ) -> Result<enchere::Model, ApiError> {
        self.put(
            &format!("/encheres/{}", id),
            &json!({ "name": name, "date": date, "address": address }),
        )
        .await
    }

    pub async fn delete_enchere(&self, id: i32) -> Result<serde_json::Value, ApiError> {
        self.delete(&format!("/encheres/{}", id)).await
    }

    // Lots

    pub async fn list_lots(&self, enchere_id: i32) -> Result<Vec<LotWithBuyer>, ApiError> {
        self.get(&format!("/encheres/{}/lots", enchere_id)).await
    }

    pub async fn get_lot(&self, id: i32) -> Result<LotWithBuyer, ApiError> {
        self.get(&format!("/lots/{}", id)).await
    }

    pub async fn create_lot(
        &self,
        enchere_id: i32,
        body: &serde_json::Value,
    ) -> Result<LotWithBuyer, ApiError> {
        // Creation returns the bare lot; sold_to_name is always absent here.
        let lot: crate::models::lot::Model = self
            .post(&format!("/encheres/{}/lots", enchere_id), body)
            .await?;
        Ok(LotWithBuyer::from_join(lot, None))
    }

    pub async fn update_lot(
        &self,
        id: i32,
        body: &serde_json::Value,
    ) -> Result<LotWithBuyer, ApiError> {
        self.put(&format!("/lots/{}", id), body).await
    }

    pub async fn delete_lot(&self, id: i32) -> Result<serde_json::Value, ApiError> {
        self.delete(&format!("/lots/{}", id)).await
    }

    pub async fn sell_lot(
        &self,
        lot_id: i32,
        client_id: i32,
        sold_price: f64,
    ) -> Result<LotWithBuyer, ApiError> {
        self.post(
            &format!("/lots/{}/sell", lot_id),
            &json!({ "clientId": client_id, "soldPrice": sold_price }),
        )
        .await
    }

    pub async fn list_images(&self, lot_id: i32) -> Result<Vec<image::Model>, ApiError> {
        self.get(&format!("/lots/{}/images", lot_id)).await
    }

    pub async fn delete_image(&self, id: i32) -> Result<serde_json::Value, ApiError> {
        self.delete(&format!("/images/{}", id)).await
    }

    // Participants

    pub async fn list_participants(
        &self,
        enchere_id: i32,
    ) -> Result<Vec<ParticipantDto>, ApiError> {
        self.get(&format!("/encheres/{}/participants", enchere_id))
            .await
    }

    pub async fn add_participant(
        &self,
        enchere_id: i32,
        client_id: i32,
        notes: Option<&str>,
    ) -> Result<ParticipantDto, ApiError> {
        self.post(
            &format!("/encheres/{}/participants", enchere_id),
            &json!({ "clientId": client_id, "notes": notes }),
        )
        .await
    }

    pub async fn remove_participant(
        &self,
        enchere_id: i32,
        client_id: i32,
    ) -> Result<serde_json::Value, ApiError> {
        self.delete(&format!(
            "/encheres/{}/participants/{}",
            enchere_id, client_id
        ))
        .await
    }

    pub async fn update_participant_notes(
        &self,
        enchere_id: i32,
        client_id: i32,
        notes: &str,
    ) -> Result<serde_json::Value, ApiError> {
        self.put(
            &format!("/encheres/{}/participants/{}", enchere_id, client_id),
            &json!({ "notes": notes }),
        )
        .await
    }

    // Analytics

    pub async fn enchere_stats(&self, enchere_id: i32) -> Result<EnchereStats, ApiError> {
        self.get(&format!("/encheres/{}/stats", enchere_id)).await
    }

    pub async fn enchere_report(&self, enchere_id: i32) -> Result<EnchereReport, ApiError> {
        self.get(&format!("/encheres/{}/report", enchere_id)).await
    }

    pub async fn client_purchases(
        &self,
        enchere_id: i32,
        client_id: i32,
    ) -> Result<ClientPurchases, ApiError> {
        self.get(&format!(
            "/encheres/{}/clients/{}/purchases",
            enchere_id, client_id
        ))
        .await
    }
}
