use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::delay::Deferred;
use crate::error::TabulaError;
use crate::model::{FieldValue, Record};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Sales,
    Inventory,
}

impl ReportKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Sales => "Sales Report",
            Self::Inventory => "Inventory Report",
        }
    }
}

impl FromStr for ReportKind {
    type Err = TabulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sales" => Ok(Self::Sales),
            "inventory" => Ok(Self::Inventory),
            other => Err(TabulaError::Input(format!(
                "Unknown report type: {}. Try sales or inventory.",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalesRow {
    pub month: &'static str,
    pub sales: u32,
}

pub const SALES_FIGURES: [SalesRow; 5] = [
    SalesRow { month: "Jan", sales: 120 },
    SalesRow { month: "Feb", sales: 150 },
    SalesRow { month: "Mar", sales: 200 },
    SalesRow { month: "Apr", sales: 180 },
    SalesRow { month: "May", sales: 250 },
];

#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRow {
    pub product: String,
    pub stock: f64,
    pub category: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Report {
    Sales(Vec<SalesRow>),
    Inventory(Vec<InventoryRow>),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Self::Sales(_) => ReportKind::Sales,
            Self::Inventory(_) => ReportKind::Inventory,
        }
    }
}

/// Builds report content from a snapshot taken at request time, then holds
/// it back until the simulated generation delay has elapsed. A newer
/// request replaces a still-pending one.
#[derive(Debug, Default)]
pub struct ReportDesk {
    pending: Option<Deferred<Report>>,
    finished: Option<Report>,
}

impl ReportDesk {
    pub fn request(
        &mut self,
        kind: ReportKind,
        products: &[Record],
        delay: Duration,
        now: Instant,
    ) {
        let report = match kind {
            ReportKind::Sales => Report::Sales(SALES_FIGURES.to_vec()),
            ReportKind::Inventory => Report::Inventory(
                products
                    .iter()
                    .map(|r| InventoryRow {
                        product: r.text("name").to_string(),
                        stock: r.get("stock").and_then(FieldValue::as_number).unwrap_or(0.0),
                        category: r.text("category").to_string(),
                    })
                    .collect(),
            ),
        };
        self.pending = Some(Deferred::new(report, delay, now));
    }

    pub fn is_generating(&self) -> bool {
        self.pending.is_some()
    }

    /// Moves a due report into place and hands it back; None while nothing
    /// new has finished.
    pub fn poll(&mut self, now: Instant) -> Option<&Report> {
        if let Some(deferred) = &mut self.pending {
            if let Some(report) = deferred.take_if_ready(now) {
                self.pending = None;
                self.finished = Some(report);
                return self.finished.as_ref();
            }
        }
        None
    }

    /// The most recently finished report, if any.
    pub fn latest(&self) -> Option<&Report> {
        self.finished.as_ref()
    }

    /// Drops an in-flight generation. Called when the screen is left so it
    /// can never be updated late.
    pub fn teardown(&mut self) {
        self.pending = None;
    }
}
