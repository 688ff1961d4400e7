//! Client-side state store over the auction API.
//!
//! Holds a denormalized view of every auction (participants, lots-as-bundles
//! and the derived sales list) plus the global client directory.
//!
//! Refresh contract: every mutating action re-fetches the full auction list
//! (and the client list where relevant) after its API call instead of
//! patching the cached state in place. At this data scale the wholesale
//! reload is the documented behavior of this layer, not an optimization
//! opportunity.

pub mod api_client;

pub use api_client::{ApiClient, ApiError};

use serde::Serialize;

use crate::models::{client, enchere, lot::LotWithBuyer, participation::ParticipantDto};
use crate::services::client_service::ClientInput;

/// One sale, synthesized from a sold lot joined with the buying
/// participant's details. Never persisted server-side.
#[derive(Debug, Clone, Serialize)]
pub struct SaleView {
    pub bundle_id: i32,
    pub bundle_name: String,
    pub participant_id: i32,
    pub participant_name: String,
    pub bidder_number: String,
    pub starting_price: f64,
    pub final_price: f64,
    pub profit: f64,
    pub date: String,
}

/// An auction enriched with everything the views need.
#[derive(Debug, Clone, Serialize)]
pub struct EnchereView {
    pub enchere: enchere::Model,
    pub participants: Vec<ParticipantDto>,
    pub bundles: Vec<LotWithBuyer>,
    pub sales: Vec<SaleView>,
}

pub struct AuctionStore {
    api: ApiClient,
    pub encheres: Vec<EnchereView>,
    pub clients: Vec<client::Model>,
    pub loading: bool,
    pub error: Option<String>,
}

impl AuctionStore {
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            encheres: Vec::new(),
            clients: Vec::new(),
            loading: false,
            error: None,
        }
    }

    fn fail(&mut self, context: &str, err: ApiError) -> ApiError {
        tracing::error!("{}: {}", context, err);
        self.error = Some(err.to_string());
        self.loading = false;
        err
    }

    /// Reload the full auction list with participants, bundles and derived
    /// sales per auction. An auction whose detail fetch fails is kept with
    /// empty collections rather than dropped.
    pub async fn load_encheres(&mut self) -> Result<(), ApiError> {
        self.loading = true;
        self.error = None;

        let encheres = match self.api.list_encheres().await {
            Ok(list) => list,
            Err(e) => return Err(self.fail("Loading encheres", e)),
        };

        let mut views = Vec::with_capacity(encheres.len());
        for enchere in encheres {
            let details = async {
                let participants = self.api.list_participants(enchere.id).await?;
                let bundles = self.api.list_lots(enchere.id).await?;
                Ok::<_, ApiError>((participants, bundles))
            }
            .await;

            let view = match details {
                Ok((participants, bundles)) => {
                    let sales = derive_sales(&bundles, &participants);
                    EnchereView {
                        enchere,
                        participants,
                        bundles,
                        sales,
                    }
                }
                Err(e) => {
                    tracing::warn!("Error loading details for enchere {}: {}", enchere.id, e);
                    EnchereView {
                        enchere,
                        participants: Vec::new(),
                        bundles: Vec::new(),
                        sales: Vec::new(),
                    }
                }
            };
            views.push(view);
        }

        self.encheres = views;
        self.loading = false;
        Ok(())
    }

    pub async fn load_clients(&mut self) -> Result<(), ApiError> {
        match self.api.list_clients().await {
            Ok(clients) => {
                self.clients = clients;
                Ok(())
            }
            Err(e) => Err(self.fail("Loading clients", e)),
        }
    }

    pub async fn add_enchere(
        &mut self,
        name: &str,
        date: &str,
        address: &str,
    ) -> Result<enchere::Model, ApiError> {
        let created = match self.api.create_enchere(name, date, address).await {
            Ok(e) => e,
            Err(e) => return Err(self.fail("Adding enchere", e)),
        };
        self.load_encheres().await?;
        Ok(created)
    }

    pub async fn update_enchere(
        &mut self,
        id: i32,
        name: &str,
        date: &str,
        address: &str,
    ) -> Result<enchere::Model, ApiError> {
        let updated = match self.api.update_enchere(id, name, date, address).await {
            Ok(e) => e,
            Err(e) => return Err(self.fail("Updating enchere", e)),
        };
        self.load_encheres().await?;
        Ok(updated)
    }

    /// Create the client, or update the existing one matched by
    /// case-insensitive email.
    pub async fn add_or_update_client(
        &mut self,
        input: ClientInput,
    ) -> Result<client::Model, ApiError> {
        let existing_id = self
            .clients
            .iter()
            .find(|c| c.email.eq_ignore_ascii_case(&input.email))
            .map(|c| c.id);

        let result = match existing_id {
            Some(id) => self.api.update_client(id, &input).await,
            None => self.api.create_client(&input).await,
        };

        let saved = match result {
            Ok(c) => c,
            Err(e) => return Err(self.fail("Adding/updating client", e)),
        };
        self.load_clients().await?;
        Ok(saved)
    }

    /// Upsert the underlying client, then attach them to the auction. The
    /// bidder number is assigned server-side.
    pub async fn add_participant(
        &mut self,
        enchere_id: i32,
        input: ClientInput,
    ) -> Result<ParticipantDto, ApiError> {
        let notes = input.notes.clone();
        let saved_client = self.add_or_update_client(input).await?;

        let participant = match self
            .api
            .add_participant(enchere_id, saved_client.id, notes.as_deref())
            .await
        {
            Ok(p) => p,
            Err(e) => return Err(self.fail("Adding participant", e)),
        };
        self.load_encheres().await?;
        Ok(participant)
    }

    pub async fn remove_participant(
        &mut self,
        enchere_id: i32,
        client_id: i32,
    ) -> Result<(), ApiError> {
        if let Err(e) = self.api.remove_participant(enchere_id, client_id).await {
            return Err(self.fail("Removing participant", e));
        }
        self.load_encheres().await?;
        Ok(())
    }

    pub async fn add_bundle(
        &mut self,
        enchere_id: i32,
        bundle: &serde_json::Value,
    ) -> Result<LotWithBuyer, ApiError> {
        let lot = match self.api.create_lot(enchere_id, bundle).await {
            Ok(l) => l,
            Err(e) => return Err(self.fail("Adding bundle", e)),
        };
        self.load_encheres().await?;
        Ok(lot)
    }

    pub async fn record_sale(
        &mut self,
        lot_id: i32,
        client_id: i32,
        final_price: f64,
    ) -> Result<LotWithBuyer, ApiError> {
        let sold = match self.api.sell_lot(lot_id, client_id, final_price).await {
            Ok(l) => l,
            Err(e) => return Err(self.fail("Recording sale", e)),
        };
        self.load_encheres().await?;
        Ok(sold)
    }

    pub async fn update_participant_notes(
        &mut self,
        enchere_id: i32,
        client_id: i32,
        notes: &str,
    ) -> Result<(), ApiError> {
        if let Err(e) = self
            .api
            .update_participant_notes(enchere_id, client_id, notes)
            .await
        {
            return Err(self.fail("Updating notes", e));
        }
        self.load_encheres().await?;
        Ok(())
    }

    pub async fn remove_enchere(&mut self, id: i32) -> Result<(), ApiError> {
        if let Err(e) = self.api.delete_enchere(id).await {
            return Err(self.fail("Removing enchere", e));
        }
        self.load_encheres().await?;
        Ok(())
    }

    pub async fn remove_bundle(&mut self, lot_id: i32) -> Result<(), ApiError> {
        if let Err(e) = self.api.delete_lot(lot_id).await {
            return Err(self.fail("Removing bundle", e));
        }
        self.load_encheres().await?;
        Ok(())
    }

    /// Remove a client from the directory. Their participations disappear
    /// server-side, so the auction views are reloaded too.
    pub async fn remove_client(&mut self, id: i32) -> Result<(), ApiError> {
        if let Err(e) = self.api.delete_client(id).await {
            return Err(self.fail("Removing client", e));
        }
        self.load_clients().await?;
        self.load_encheres().await?;
        Ok(())
    }
}

/// Build the derived sales list from a snapshot of an auction's lots and
/// participants.
fn derive_sales(bundles: &[LotWithBuyer], participants: &[ParticipantDto]) -> Vec<SaleView> {
    bundles
        .iter()
        .filter(|lot| lot.sold_to.is_some())
        .map(|lot| {
            let buyer_id = lot.sold_to.unwrap_or_default();
            let participant = participants.iter().find(|p| p.id == buyer_id);
            let final_price = lot.sold_price.unwrap_or(0.0);
            SaleView {
                bundle_id: lot.id,
                bundle_name: if lot.name.is_empty() {
                    format!("Lot #{}", lot.id)
                } else {
                    lot.name.clone()
                },
                participant_id: buyer_id,
                participant_name: participant
                    .map(|p| p.name.clone())
                    .or_else(|| lot.sold_to_name.clone())
                    .unwrap_or_else(|| "Unknown".to_string()),
                bidder_number: participant
                    .map(|p| p.local_number.clone())
                    .unwrap_or_else(|| "000".to_string()),
                starting_price: lot.starting_price,
                final_price,
                profit: final_price - lot.starting_price,
                date: lot.sold_at.clone().unwrap_or_default(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::derive_sales;
    use crate::models::lot::LotWithBuyer;
    use crate::models::participation::ParticipantDto;

    fn lot(id: i32, sold_to: Option<i32>, starting: f64, sold: Option<f64>) -> LotWithBuyer {
        LotWithBuyer {
            id,
            enchere_id: 1,
            name: format!("Lot {}", id),
            description: String::new(),
            category: String::new(),
            starting_price: starting,
            sold_price: sold,
            sold_to,
            sold_at: sold.map(|_| "2025-06-01T12:00:00Z".to_string()),
            sold_to_name: sold_to.map(|_| "Alice".to_string()),
            notes: String::new(),
            created_at: String::new(),
        }
    }

    fn participant(id: i32, number: &str) -> ParticipantDto {
        ParticipantDto {
            id,
            name: "Alice".to_string(),
            surname: String::new(),
            email: "alice@example.com".to_string(),
            phone: String::new(),
            address: String::new(),
            notes: String::new(),
            local_number: number.to_string(),
            registered_at: String::new(),
        }
    }

    #[test]
    fn only_sold_lots_become_sales() {
        let bundles = vec![
            lot(1, None, 10.0, None),
            lot(2, Some(5), 20.0, Some(25.0)),
        ];
        let participants = vec![participant(5, "001")];

        let sales = derive_sales(&bundles, &participants);
        assert_eq!(sales.len(), 1);
        assert_eq!(sales[0].bundle_id, 2);
        assert_eq!(sales[0].participant_name, "Alice");
        assert_eq!(sales[0].bidder_number, "001");
        assert_eq!(sales[0].profit, 5.0);
    }

    #[test]
    fn missing_participant_falls_back_to_buyer_name() {
        let bundles = vec![lot(1, Some(9), 10.0, Some(12.0))];
        let sales = derive_sales(&bundles, &[]);
        assert_eq!(sales[0].participant_name, "Alice");
        assert_eq!(sales[0].bidder_number, "000");
    }
}
