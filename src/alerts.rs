//! JVN security alerts (`getAlertList`).
//!
//! The alert list is an Atom feed. Each `entry` groups one alert and carries a
//! `sec:items` block listing the advisories it refers to, newest first.
//!
//! Accepted parameters: `startItem`, `maxCountItem`, `datePublished`,
//! `dateFirstPublished`, `cpeName` and `ft`. Everything else set on
//! [`Parameters`] is left out of the query.

use super::MyJvn;
use super::error::Result;
use super::options::{Feed, Format, Method, Parameters, RequestDescriptor};
use super::parsing::{Handling, ResponseDecoder, Status};
use super::traits::AlertOperations;
use async_trait::async_trait;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// Response of `getAlertList`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertList {
    #[serde(rename = "@schemaLocation", alias = "@xsi:schemaLocation")]
    pub schema_location: String,
    #[serde(rename = "@lang", alias = "@xml:lang")]
    pub language: String,
    pub title: AlertTitle,
    pub updated: String,
    pub id: String,
    pub link: AlertLink,
    pub author: AlertAuthor,
    #[serde(alias = "sec:handling")]
    pub handling: Handling,
    #[serde(rename = "entry")]
    pub entries: Vec<AlertEntry>,
    #[serde(rename = "Status", alias = "status:Status")]
    pub status: Status,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertTitle {
    #[serde(rename = "@type")]
    pub title_type: String,
    #[serde(rename = "$text", alias = "#text")]
    pub text: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertLink {
    #[serde(rename = "@rel")]
    pub rel: String,
    #[serde(rename = "@type")]
    pub link_type: String,
    #[serde(rename = "@hreflang")]
    pub hreflang: String,
    #[serde(rename = "@href")]
    pub href: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertAuthor {
    pub name: String,
    pub uri: String,
}

/// One alert of the feed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertEntry {
    pub title: String,
    pub id: String,
    pub published: String,
    pub updated: String,
    pub category: AlertCategory,
    #[serde(alias = "sec:items")]
    pub items: AlertItems,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertCategory {
    #[serde(rename = "@label")]
    pub label: String,
    #[serde(rename = "@term")]
    pub term: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertItems {
    #[serde(rename = "item", alias = "sec:item")]
    pub items: Vec<AlertItem>,
}

/// An advisory referenced by an alert.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertItem {
    #[serde(alias = "sec:title")]
    pub title: String,
    /// Alert identifier, e.g. `MYJVN-ALT-2020-0002-0001`.
    #[serde(alias = "sec:identifier")]
    pub identifier: String,
    #[serde(alias = "sec:link")]
    pub link: AlertItemLink,
    #[serde(alias = "sec:published")]
    pub published: String,
    #[serde(alias = "sec:updated")]
    pub updated: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AlertItemLink {
    #[serde(rename = "@href")]
    pub href: String,
}

impl AlertList {
    /// Every advisory of every entry, in feed order.
    pub fn items(&self) -> impl Iterator<Item = &AlertItem> {
        self.entries.iter().flat_map(|entry| entry.items.items.iter())
    }
}

/// Alert operations for the MyJVN API.
///
/// # Examples
///
/// ```ignore
/// use myjvn::{AlertOperations, MyJvn, Parameters};
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = MyJvn::new()?;
///     let cancel = CancellationToken::new();
///
///     let opts = Parameters::new().with_date_published(2024).with_max_count_item(10);
///     let alerts = client.alert_list(&cancel, Some(opts)).await?;
///     for item in alerts.items() {
///         println!("{} {}", item.identifier, item.title);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
impl AlertOperations for MyJvn {
    async fn alert_list(
        &self,
        cancel: &CancellationToken,
        opts: Option<Parameters>,
    ) -> Result<AlertList> {
        let request = RequestDescriptor::new(Method::GetAlertList, Feed::Hnd, opts);
        self.fetch(&request, cancel).await
    }

    fn alert_list_from_str(&self, content: &str, format: Option<Format>) -> Result<AlertList> {
        ResponseDecoder::new(format).decode_str(content)
    }
}
