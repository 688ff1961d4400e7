//! Read-only aggregation over auctions: per-auction totals, per-client
//! purchases, and the composite report.

use sea_orm::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::client::Entity as Client;
use crate::models::enchere;
use crate::models::lot::{self, Entity as Lot};
use crate::models::participation::{self, Entity as Participation};
use crate::services::ServiceError;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnchereStats {
    pub total_lots: i64,
    pub sold_lots: i64,
    pub available_lots: i64,
    pub total_revenue: f64,
    pub total_starting_value: f64,
    pub total_profit: f64,
    pub total_participants: i64,
    pub success_rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseLine {
    #[serde(flatten)]
    pub lot: lot::Model,
    pub profit: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseSummary {
    pub total_items: usize,
    pub total_spent: f64,
    pub total_profit: f64,
    pub average_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientPurchases {
    pub purchases: Vec<PurchaseLine>,
    pub summary: PurchaseSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopSale {
    pub name: String,
    pub sold_price: f64,
    pub starting_price: f64,
    pub client_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryBreakdown {
    pub category: String,
    pub items_sold: i64,
    pub total_revenue: f64,
    pub average_price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnchereReport {
    pub enchere: enchere::Model,
    pub stats: EnchereStats,
    pub top_sales: Vec<TopSale>,
    pub category_breakdown: Vec<CategoryBreakdown>,
}

/// Per-auction totals. Division guards: an auction with no lots has a
/// success rate of 0.
pub async fn enchere_stats(
    db: &DatabaseConnection,
    enchere_id: i32,
) -> Result<EnchereStats, ServiceError> {
    crate::services::enchere_service::get_enchere(db, enchere_id).await?;

    let lots = Lot::find()
        .filter(lot::Column::EnchereId.eq(enchere_id))
        .all(db)
        .await?;

    let total_lots = lots.len() as i64;
    let sold: Vec<&lot::Model> = lots.iter().filter(|l| l.sold_to.is_some()).collect();
    let sold_lots = sold.len() as i64;
    let total_revenue: f64 = sold.iter().filter_map(|l| l.sold_price).sum();
    let total_starting_value: f64 = lots.iter().map(|l| l.starting_price).sum();

    let total_participants = Participation::find()
        .filter(participation::Column::EnchereId.eq(enchere_id))
        .count(db)
        .await? as i64;

    let success_rate = if total_lots > 0 {
        (sold_lots as f64 / total_lots as f64) * 100.0
    } else {
        0.0
    };

    Ok(EnchereStats {
        total_lots,
        sold_lots,
        available_lots: total_lots - sold_lots,
        total_revenue,
        total_starting_value,
        total_profit: total_revenue - total_starting_value,
        total_participants,
        success_rate,
    })
}

/// Lots a client bought in one auction, with per-item profit and aggregates.
pub async fn client_purchases(
    db: &DatabaseConnection,
    enchere_id: i32,
    client_id: i32,
) -> Result<ClientPurchases, ServiceError> {
    crate::services::enchere_service::get_enchere(db, enchere_id).await?;

    let lots = Lot::find()
        .filter(lot::Column::EnchereId.eq(enchere_id))
        .filter(lot::Column::SoldTo.eq(client_id))
        .order_by_asc(lot::Column::Id)
        .all(db)
        .await?;

    let purchases: Vec<PurchaseLine> = lots
        .into_iter()
        .map(|l| {
            let profit = l.sold_price.unwrap_or(0.0) - l.starting_price;
            PurchaseLine { lot: l, profit }
        })
        .collect();

    let total_spent: f64 = purchases
        .iter()
        .filter_map(|p| p.lot.sold_price)
        .sum();
    let total_profit: f64 = purchases.iter().map(|p| p.profit).sum();
    let total_items = purchases.len();
    let average_price = if total_items > 0 {
        total_spent / total_items as f64
    } else {
        0.0
    };

    Ok(ClientPurchases {
        purchases,
        summary: PurchaseSummary {
            total_items,
            total_spent,
            total_profit,
            average_price,
        },
    })
}

/// Composite report: auction details, stats, top-10 sales by price, and
/// revenue grouped by category. No sales at all yields a single placeholder
/// bucket rather than an empty list.
pub async fn enchere_report(
    db: &DatabaseConnection,
    enchere_id: i32,
) -> Result<EnchereReport, ServiceError> {
    let enchere = crate::services::enchere_service::get_enchere(db, enchere_id).await?;
    let stats = enchere_stats(db, enchere_id).await?;

    let sold_lots = Lot::find()
        .filter(lot::Column::EnchereId.eq(enchere_id))
        .filter(lot::Column::SoldTo.is_not_null())
        .find_also_related(Client)
        .all(db)
        .await?;

    let mut top_sales: Vec<TopSale> = sold_lots
        .iter()
        .map(|(l, buyer)| TopSale {
            name: l.name.clone(),
            sold_price: l.sold_price.unwrap_or(0.0),
            starting_price: l.starting_price,
            client_name: buyer
                .as_ref()
                .map(|c| c.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
        })
        .collect();
    top_sales.sort_by(|a, b| {
        b.sold_price
            .partial_cmp(&a.sold_price)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    top_sales.truncate(10);

    let category_breakdown = breakdown_by_category(
        sold_lots
            .iter()
            .map(|(l, _)| (l.category.clone(), l.sold_price.unwrap_or(0.0))),
    );

    Ok(EnchereReport {
        enchere,
        stats,
        top_sales,
        category_breakdown,
    })
}

fn breakdown_by_category(
    sales: impl Iterator<Item = (String, f64)>,
) -> Vec<CategoryBreakdown> {
    let mut buckets: HashMap<String, (i64, f64)> = HashMap::new();
    for (category, price) in sales {
        let entry = buckets.entry(category).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += price;
    }

    if buckets.is_empty() {
        return vec![CategoryBreakdown {
            category: "No sales yet".to_string(),
            items_sold: 0,
            total_revenue: 0.0,
            average_price: 0.0,
        }];
    }

    let mut breakdown: Vec<CategoryBreakdown> = buckets
        .into_iter()
        .map(|(category, (count, revenue))| CategoryBreakdown {
            category,
            items_sold: count,
            total_revenue: revenue,
            average_price: revenue / count as f64,
        })
        .collect();
    breakdown.sort_by(|a, b| {
        b.total_revenue
            .partial_cmp(&a.total_revenue)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    breakdown
}
