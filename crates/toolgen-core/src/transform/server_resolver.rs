//! Picks the base URL the generated client calls.
//!
//! Discovery walks the three levels a document can declare servers at (root,
//! path, operation) and stops at the first level that yields a usable URL.
//! A bare `/` is never usable, so a root-level `/` does not end the search.

use log::debug;

use crate::config::DEFAULT_FALLBACK_URL;
use crate::ir::{Advisory, ServerSelection};
use crate::parse::server::Server;

use super::spec_model::SpecModel;

/// Operator overrides for base URL selection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerOverride {
    pub index: Option<usize>,
    pub url: Option<String>,
}

type Provider<'m> = Box<dyn Fn() -> Option<Vec<String>> + 'm>;

/// Usable URLs of a server list: variables expanded, blanks and `/` dropped.
pub fn usable_urls(servers: &[Server]) -> Vec<String> {
    servers
        .iter()
        .filter_map(Server::expanded_url)
        .map(|url| url.trim().to_string())
        .filter(|url| !url.is_empty() && url != "/")
        .collect()
}

fn non_empty(urls: Vec<String>) -> Option<Vec<String>> {
    (!urls.is_empty()).then_some(urls)
}

/// Candidate server URLs in discovery order, or `[fallback_url]` when the
/// document declares none. A blank `fallback_url` means [`DEFAULT_FALLBACK_URL`].
pub fn discover_servers(model: &SpecModel<'_>, fallback_url: &str) -> Vec<String> {
    let providers: [Provider<'_>; 2] = [
        Box::new(|| {
            debug!("checking root-level servers");
            non_empty(usable_urls(model.root_servers()))
        }),
        Box::new(|| {
            model.path_items().find_map(|(path, item)| {
                debug!("checking path-level servers for {path}");
                non_empty(usable_urls(&item.servers)).or_else(|| {
                    SpecModel::operation_servers(item).find_map(|(method, servers)| {
                        debug!("checking {method} operation servers for {path}");
                        non_empty(usable_urls(servers))
                    })
                })
            })
        }),
    ];

    providers
        .iter()
        .find_map(|provider| provider())
        .unwrap_or_else(|| {
            let fallback = match fallback_url.trim() {
                "" => DEFAULT_FALLBACK_URL,
                url => url,
            };
            debug!("no servers declared, falling back to {fallback}");
            vec![fallback.to_string()]
        })
}

/// Choose the base URL from the candidates. An explicit URL wins
/// unconditionally, then an in-range index, then the first candidate.
pub fn select_base_url(
    candidates: &[String],
    overrides: &ServerOverride,
) -> (String, Vec<Advisory>) {
    let mut advisories = Vec::new();
    let first = candidates
        .first()
        .cloned()
        .unwrap_or_else(|| DEFAULT_FALLBACK_URL.to_string());

    if let Some(url) = overrides.url.as_deref().filter(|u| !u.trim().is_empty()) {
        debug!("using explicit server url {url}");
        return (url.to_string(), advisories);
    }

    match overrides.index {
        Some(index) => match candidates.get(index) {
            Some(url) => {
                debug!("using server [{index}] {url}");
                return (url.clone(), advisories);
            }
            None => advisories.push(Advisory::ServerIndexOutOfRange {
                index,
                available: candidates.len(),
            }),
        },
        None if candidates.len() > 1 => advisories.push(Advisory::MultipleServers {
            candidates: candidates.to_vec(),
        }),
        None => {}
    }

    (first, advisories)
}

/// Discover candidates and select the base URL in one step.
pub fn resolve_servers(
    model: &SpecModel<'_>,
    overrides: &ServerOverride,
    fallback_url: &str,
) -> (ServerSelection, Vec<Advisory>) {
    let candidates = discover_servers(model, fallback_url);
    let (base_url, advisories) = select_base_url(&candidates, overrides);
    (
        ServerSelection {
            candidates,
            base_url,
        },
        advisories,
    )
}
