// src/specs/search.rs
//! Search-results page: URL construction and listing-id extraction.

use indexmap::IndexMap;
use url::Url;

use crate::config::consts::{PAGE_PARAM, provider_key};
use crate::core::html::{self, attr_of, select_all, select_first};

/// Opaque posting id: the last `:` segment of a listing's entity URN.
pub type ListingId = String;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub keywords: Option<String>,
    pub location: Option<String>,
    pub geo_id: Option<String>,
    /// Logical filter name -> provider codes. Names missing from the
    /// catalog are dropped when the URL is built.
    pub filters: IndexMap<String, Vec<String>>,
    pub page_offset: usize,
}

/// Compose the search URL for `query` on top of `base`.
///
/// Empty `keywords`/`location`/`geoId` are left out. Each recognised filter
/// with values becomes one `key=value` pair per value. `start` is always set.
pub fn build_search_url(base: &Url, query: &SearchQuery) -> Url {
    let mut url = base.clone();
    {
        let mut qs = url.query_pairs_mut();
        qs.clear();

        let optional = [
            ("keywords", &query.keywords),
            ("location", &query.location),
            ("geoId", &query.geo_id),
        ];
        for (key, val) in optional {
            if let Some(v) = val.as_deref().filter(|v| !v.is_empty()) {
                qs.append_pair(key, v);
            }
        }

        for (name, vals) in &query.filters {
            let Some(key) = provider_key(name) else { continue };
            for v in vals {
                qs.append_pair(key, v);
            }
        }

        qs.append_pair(PAGE_PARAM, &query.page_offset.to_string());
    }
    url
}

/// Same URL with `start` set to `offset`; every other pair keeps its place.
pub fn with_page_offset(url: &Url, offset: usize) -> Url {
    let offset = offset.to_string();
    let mut replaced = false;
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            if k == PAGE_PARAM {
                replaced = true;
                (k.into_owned(), offset.clone())
            } else {
                (k.into_owned(), v.into_owned())
            }
        })
        .collect();
    if !replaced {
        pairs.push((s!(PAGE_PARAM), offset));
    }

    let mut out = url.clone();
    out.query_pairs_mut().clear().extend_pairs(pairs);
    out
}

/// Pull listing ids out of one results fragment, in document order.
///
/// Each `<li>` must hold a `div.base-card` with a `data-entity-urn`; items
/// without one, or whose id comes out empty, are skipped.
pub fn parse_listing_ids(fragment: &str) -> Vec<ListingId> {
    let doc = html::parse(fragment);
    let mut ids = Vec::new();
    for li in select_all(doc.root_element(), "li") {
        let Some(card) = select_first(li, "div.base-card") else { continue };
        let Some(urn) = attr_of(card, "data-entity-urn") else { continue };
        let id = urn.rsplit(':').next().unwrap_or("").trim();
        if !id.is_empty() {
            ids.push(id.to_string());
        }
    }
    ids
}
