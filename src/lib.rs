//! # myjvn - A Rust client for the MyJVN API
//!
//! myjvn provides a typed, async API for the vulnerability countermeasure
//! information database JVN iPedia, published by IPA and JPCERT/CC through the
//! MyJVN API.
//!
//! ## Features
//!
//! - **Retrying HTTP client** - Exponential backoff on transport failures and 5xx responses
//! - **Security alerts** - The JVN alert feed (`getAlertList`)
//! - **Catalog** - Vendor and product lists with their CPE names (`getVendorList`, `getProductList`)
//! - **Statistics** - Aggregations by period, CVSS severity and CWE (`getStatistics`)
//! - **Vulnerabilities** - Search summaries and full records (`getVulnOverviewList`, `getVulnDetailInfo`)
//! - **XML and JSON** - Every response can be requested and decoded in either format
//!
//! ## Requirements
//!
//! myjvn is async-first and runs on [tokio](https://tokio.rs). Every network
//! operation takes a `tokio_util::sync::CancellationToken`.
//!
//! ## Basic Usage
//!
//! ```ignore
//! use myjvn::{Format, MyJvn, Parameters, VulnerabilityOperations};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = MyJvn::new()?;
//!     let cancel = CancellationToken::new();
//!
//!     let opts = Parameters::new()
//!         .with_keyword("openssl")
//!         .with_max_count_item(5)
//!         .with_format(Format::Json);
//!
//!     let overview = client.vuln_overview_list(&cancel, Some(opts)).await?;
//!     for item in overview.items {
//!         println!("{}: {}", item.identifier, item.title);
//!     }
//!
//!     Ok(())
//! }
//! ```

mod config;
mod core;
mod error;
mod options;
pub mod parsing;

#[cfg(any(
    feature = "alerts",
    feature = "catalog",
    feature = "statistics",
    feature = "vulnerabilities"
))]
mod traits;

#[cfg(feature = "alerts")]
mod alerts;
#[cfg(feature = "catalog")]
mod catalog;
#[cfg(feature = "statistics")]
mod statistics;
#[cfg(feature = "vulnerabilities")]
mod vulnerabilities;

// Core client functionality (always available)
pub use config::{MyJvnConfig, RetryPolicy};
pub use core::{MyJvn, is_retryable_status};
pub use error::{ErrorKind, MyJvnError, Result};
pub use options::{Feed, Format, Method, Parameters, QueryOption, RequestDescriptor};
pub use parsing::{Handling, Marking, MarkingStructure, Status};

// Response records
#[cfg(feature = "alerts")]
pub use alerts::{
    AlertAuthor, AlertCategory, AlertEntry, AlertItem, AlertItemLink, AlertItems, AlertLink,
    AlertList, AlertTitle,
};
#[cfg(feature = "catalog")]
pub use catalog::{Product, ProductList, Vendor, VendorInfo, VendorList};
#[cfg(feature = "statistics")]
pub use statistics::{ResData, ResDataTotal, Statistics, Summary, SummaryTitle};
#[cfg(feature = "vulnerabilities")]
pub use vulnerabilities::{
    Affected, AffectedItem, Channel, ChannelItems, ChannelSeq, ChannelSeqEntry, Cpe, Cvss, History,
    HistoryItem, Impact, ImpactItem, OverviewCpe, OverviewCvss, OverviewItem, Reference, Related,
    RelatedItem, Severity, Solution, SolutionItem, VulInfo, VulInfoData, VulInfoDescription,
    VulnDetailInfo, VulnOverviewList,
};

// Conditionally export traits
#[cfg(feature = "alerts")]
pub use traits::AlertOperations;
#[cfg(feature = "catalog")]
pub use traits::CatalogOperations;
#[cfg(feature = "statistics")]
pub use traits::StatisticsOperations;
#[cfg(feature = "vulnerabilities")]
pub use traits::VulnerabilityOperations;

/// Current crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
