//! Records shared by every MyJVN response.

use super::utils::deserialize_lenient_number;
use serde::Deserialize;

/// Traffic Light Protocol marking attached to a response (`sec:handling`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Handling {
    #[serde(rename = "Marking", alias = "marking:Marking")]
    pub marking: Marking,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Marking {
    #[serde(rename = "Marking_Structure", alias = "marking:Marking_Structure")]
    pub structure: MarkingStructure,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct MarkingStructure {
    /// `xsi:type`, e.g. `tlpMarking:TLPMarkingStructureType`.
    #[serde(rename = "@type", alias = "@xsi:type")]
    pub structure_type: String,
    #[serde(rename = "@marking_model_name")]
    pub marking_model_name: String,
    #[serde(rename = "@marking_model_ref")]
    pub marking_model_ref: String,
    /// TLP color, e.g. `WHITE`.
    #[serde(rename = "@color")]
    pub color: String,
}

/// Server-side accounting of a request (`status:Status`).
///
/// Present in every response whether or not the request succeeded. Besides the
/// result counters it echoes back every parameter the server understood.
/// Counters are kept as strings: the service is known to emit placeholders in
/// them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Status {
    #[serde(rename = "@version")]
    pub version: String,
    #[serde(rename = "@method")]
    pub method: String,
    #[serde(rename = "@lang")]
    pub language: String,
    /// `0` on success, `1` on error.
    #[serde(rename = "@retCd", deserialize_with = "deserialize_lenient_number")]
    pub ret_cd: u32,
    /// Upper bound of results the method can return per request.
    #[serde(rename = "@retMax")]
    pub ret_max: String,
    #[serde(rename = "@retMaxCnt")]
    pub ret_max_cnt: String,
    #[serde(rename = "@errCd")]
    pub err_cd: String,
    #[serde(rename = "@errMsg")]
    pub err_msg: String,
    /// Total number of matching results.
    #[serde(rename = "@totalRes")]
    pub total_res: String,
    /// Number of results in this response.
    #[serde(rename = "@totalResRet")]
    pub total_res_ret: String,
    /// Position of the first result in this response (1-based).
    #[serde(rename = "@firstRes")]
    pub first_res: String,
    #[serde(rename = "@feed")]
    pub feed: String,
    #[serde(rename = "@startItem", deserialize_with = "deserialize_lenient_number")]
    pub start_item: u32,
    #[serde(rename = "@maxCountItem", deserialize_with = "deserialize_lenient_number")]
    pub max_count_item: u32,
    #[serde(rename = "@datePublished", deserialize_with = "deserialize_lenient_number")]
    pub date_published: u16,
    #[serde(
        rename = "@dateFirstPublished",
        deserialize_with = "deserialize_lenient_number"
    )]
    pub date_first_published: u16,
    #[serde(rename = "@cpeName")]
    pub cpe_name: String,
    #[serde(rename = "@format", alias = "@ft")]
    pub format: String,
    #[serde(rename = "@keyword")]
    pub keyword: String,
    #[serde(rename = "@vendorId")]
    pub vendor_id: String,
    #[serde(rename = "@productId")]
    pub product_id: String,
    #[serde(rename = "@vulnId")]
    pub vuln_id: String,
    #[serde(rename = "@severity")]
    pub severity: String,
    #[serde(rename = "@vector")]
    pub vector: String,
    #[serde(rename = "@rangeDatePublic")]
    pub range_date_public: String,
    #[serde(rename = "@rangeDatePublished")]
    pub range_date_published: String,
    #[serde(rename = "@rangeDateFirstPublished")]
    pub range_date_first_published: String,
    #[serde(rename = "@datePublicStartY", deserialize_with = "deserialize_lenient_number")]
    pub date_public_start_y: u16,
    #[serde(rename = "@datePublicStartM", deserialize_with = "deserialize_lenient_number")]
    pub date_public_start_m: u8,
    #[serde(rename = "@datePublicStartD", deserialize_with = "deserialize_lenient_number")]
    pub date_public_start_d: u8,
    #[serde(rename = "@datePublicEndY", deserialize_with = "deserialize_lenient_number")]
    pub date_public_end_y: u16,
    #[serde(rename = "@datePublicEndM", deserialize_with = "deserialize_lenient_number")]
    pub date_public_end_m: u8,
    #[serde(rename = "@datePublicEndD", deserialize_with = "deserialize_lenient_number")]
    pub date_public_end_d: u8,
    #[serde(
        rename = "@dateFirstPublishedStartY",
        deserialize_with = "deserialize_lenient_number"
    )]
    pub date_first_published_start_y: u16,
    #[serde(
        rename = "@dateFirstPublishedStartM",
        deserialize_with = "deserialize_lenient_number"
    )]
    pub date_first_published_start_m: u8,
    #[serde(
        rename = "@dateFirstPublishedStartD",
        deserialize_with = "deserialize_lenient_number"
    )]
    pub date_first_published_start_d: u8,
    #[serde(
        rename = "@dateFirstPublishedEndY",
        deserialize_with = "deserialize_lenient_number"
    )]
    pub date_first_published_end_y: u16,
    #[serde(
        rename = "@dateFirstPublishedEndM",
        deserialize_with = "deserialize_lenient_number"
    )]
    pub date_first_published_end_m: u8,
    #[serde(
        rename = "@dateFirstPublishedEndD",
        deserialize_with = "deserialize_lenient_number"
    )]
    pub date_first_published_end_d: u8,
    #[serde(rename = "@theme")]
    pub theme: String,
    #[serde(rename = "@type")]
    pub aggregation_type: String,
    #[serde(rename = "@cweId")]
    pub cwe_id: String,
    #[serde(rename = "@pid", deserialize_with = "deserialize_lenient_number")]
    pub pid: u32,
}

impl Status {
    /// True when the server reported a failure for this request.
    pub fn has_error(&self) -> bool {
        self.ret_cd != 0 || !self.err_cd.is_empty()
    }

    /// `startItem` of the next page, or `None` when this response holds the
    /// last page or the counters cannot be read.
    pub fn next_start_item(&self) -> Option<u32> {
        let first: u32 = self.first_res.trim().parse().ok()?;
        let returned: u32 = self.total_res_ret.trim().parse().ok()?;
        let total: u32 = self.total_res.trim().parse().ok()?;
        if returned == 0 {
            return None;
        }
        let next = first.checked_add(returned)?;
        (next <= total).then_some(next)
    }
}
