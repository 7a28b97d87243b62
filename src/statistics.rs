//! Aggregated vulnerability statistics (`getStatistics`).
//!
//! A statistics document carries up to three summaries selected by `theme`:
//! registrations per period (`sumJvnDb`), counts per CVSS severity
//! (`sumCvss`) and counts for one CWE category (`sumCwe`). The `itm` feed only
//! ever returns the CVSS summary.

use super::MyJvn;
use super::error::Result;
use super::options::{Feed, Format, Method, Parameters, RequestDescriptor};
use super::parsing::{ResponseDecoder, Status};
use super::traits::StatisticsOperations;
use async_trait::async_trait;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

/// Response of `getStatistics`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Statistics {
    #[serde(rename = "@version")]
    pub version: String,
    #[serde(rename = "@schemaLocation", alias = "@xsi:schemaLocation")]
    pub schema_location: String,
    #[serde(rename = "sumJvnDb", alias = "mjstat:sumJvnDb")]
    pub sum_jvndb: Summary,
    #[serde(rename = "sumCvss", alias = "mjstat:sumCvss")]
    pub sum_cvss: Summary,
    #[serde(rename = "sumCwe", alias = "mjstat:sumCwe")]
    pub sum_cwe: Summary,
    #[serde(rename = "Status", alias = "status:Status")]
    pub status: Status,
}

/// One aggregation. Counts are kept as the server sent them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Summary {
    /// Only set on `sumCwe`.
    #[serde(rename = "@cweId")]
    pub cwe_id: String,
    #[serde(rename = "title", alias = "mjstat:title")]
    pub titles: Vec<SummaryTitle>,
    #[serde(rename = "resDataTotal", alias = "mjstat:resDataTotal")]
    pub res_data_total: ResDataTotal,
    #[serde(rename = "resData", alias = "mjstat:resData")]
    pub res_data: Vec<ResData>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SummaryTitle {
    #[serde(rename = "@lang", alias = "@xml:lang")]
    pub language: String,
    #[serde(rename = "$text", alias = "#text")]
    pub text: String,
}

/// Database-wide totals at the time of the request.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResDataTotal {
    #[serde(rename = "@vulinfo")]
    pub vulinfo: String,
    #[serde(rename = "@vendor")]
    pub vendor: String,
    #[serde(rename = "@product")]
    pub product: String,
}

/// Counts for one period. The severity columns (`C`ritical, `H`igh, `M`edium,
/// `L`ow, `N`one) are only present in CVSS summaries.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ResData {
    #[serde(rename = "@date")]
    pub date: String,
    #[serde(rename = "@cntAll")]
    pub cnt_all: String,
    #[serde(rename = "@cntC")]
    pub cnt_c: String,
    #[serde(rename = "@cntH")]
    pub cnt_h: String,
    #[serde(rename = "@cntM")]
    pub cnt_m: String,
    #[serde(rename = "@cntL")]
    pub cnt_l: String,
    #[serde(rename = "@cntN")]
    pub cnt_n: String,
}

impl Summary {
    /// Title in the given language (`ja`, `en-US`).
    pub fn title(&self, language: &str) -> Option<&str> {
        self.titles
            .iter()
            .find(|title| title.language == language)
            .map(|title| title.text.as_str())
    }
}

/// Statistics operations for the MyJVN API.
///
/// # Examples
///
/// ```ignore
/// use myjvn::{MyJvn, Parameters, StatisticsOperations};
/// use tokio_util::sync::CancellationToken;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let client = MyJvn::new()?;
///     let cancel = CancellationToken::new();
///
///     let opts = Parameters::new()
///         .with_theme("sumCvss")
///         .with_aggregation_type("y")
///         .with_date_public_start(2015, 0, 0);
///     let stats = client.statistics_itm(&cancel, Some(opts)).await?;
///     for row in &stats.sum_cvss.res_data {
///         println!("{}: {}", row.date, row.cnt_all);
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
impl StatisticsOperations for MyJvn {
    async fn statistics(
        &self,
        cancel: &CancellationToken,
        feed: Feed,
        opts: Option<Parameters>,
    ) -> Result<Statistics> {
        let request = RequestDescriptor::new(Method::GetStatistics, feed, opts);
        self.fetch(&request, cancel).await
    }

    async fn statistics_hnd(
        &self,
        cancel: &CancellationToken,
        opts: Option<Parameters>,
    ) -> Result<Statistics> {
        self.statistics(cancel, Feed::Hnd, opts).await
    }

    async fn statistics_itm(
        &self,
        cancel: &CancellationToken,
        opts: Option<Parameters>,
    ) -> Result<Statistics> {
        self.statistics(cancel, Feed::Itm, opts).await
    }

    fn statistics_from_str(&self, content: &str, format: Option<Format>) -> Result<Statistics> {
        ResponseDecoder::new(format).decode_str(content)
    }
}
