//! Updates endpoint address derived from the host's own address.

use url::Url;

use crate::domain::Cursor;
use crate::error::AddressError;
use crate::ports::AddressBuilder;
use crate::settings::{LiveUpdateSettings, is_plain_absolute_path};

/// Builds `ws(s)://<host>/updates?since=<millis>` addresses.
///
/// The scheme follows the host: `http` becomes `ws` and `https` becomes `wss`.
/// When `forward_page_query` is set, the host address's own query string is
/// appended after the cursor.
#[derive(Debug, Clone)]
pub struct HostAddressBuilder {
    endpoint: Url,
    page_query: Option<String>,
}

impl HostAddressBuilder {
    /// Derive the updates endpoint from a host (page) address.
    pub fn new(host: &str, settings: &LiveUpdateSettings) -> Result<Self, AddressError> {
        let page = Url::parse(host).map_err(|source| AddressError::Invalid {
            address: host.to_string(),
            source,
        })?;

        let scheme = match page.scheme() {
            "http" | "ws" => "ws",
            "https" | "wss" => "wss",
            other => return Err(AddressError::UnsupportedScheme(other.to_string())),
        };

        let path = settings.effective_updates_path();
        let mut endpoint = page.join(path).map_err(|source| AddressError::Invalid {
            address: host.to_string(),
            source,
        })?;
        if !is_plain_absolute_path(path)
            || endpoint.host_str() != page.host_str()
            || endpoint.port_or_known_default() != page.port_or_known_default()
        {
            return Err(AddressError::ForeignUpdatesPath {
                path: path.to_string(),
                host: host.to_string(),
            });
        }
        endpoint
            .set_scheme(scheme)
            .map_err(|()| AddressError::UnsupportedScheme(page.scheme().to_string()))?;
        endpoint.set_query(None);
        endpoint.set_fragment(None);

        let page_query = if settings.effective_forward_page_query() {
            page.query()
                .filter(|query| !query.is_empty())
                .map(str::to_string)
        } else {
            None
        };

        Ok(Self {
            endpoint,
            page_query,
        })
    }

    /// The endpoint without any query.
    pub const fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

impl AddressBuilder for HostAddressBuilder {
    fn address_for(&self, cursor: Cursor) -> String {
        let mut address = self.endpoint.clone();

        let mut query = Vec::with_capacity(2);
        if let Some(since) = cursor.since_millis() {
            query.push(format!("since={since}"));
        }
        if let Some(ref page_query) = self.page_query {
            query.push(page_query.clone());
        }
        if !query.is_empty() {
            address.set_query(Some(&query.join("&")));
        }

        address.into()
    }
}
