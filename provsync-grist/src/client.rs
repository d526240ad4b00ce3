//! Blocking HTTP client for the Grist records API.

use serde_json::json;

use crate::error::{api_err, GristError};
use crate::types::{RecordUpdate, RecordsResponse, RemoteRecord};
use crate::Destination;

/// Client for one Grist document.
///
/// All calls carry a bearer credential. When a forward proxy is configured,
/// traffic is routed through it; TLS trust adjustments beyond that are left
/// to the proxy/transport configuration.
pub struct GristClient {
    agent: ureq::Agent,
    base_url: String,
    api_key: String,
}

impl GristClient {
    /// Build a client for `https://{domain}/api/docs/{doc_id}`.
    pub fn new(
        domain: &str,
        doc_id: &str,
        api_key: &str,
        proxy: Option<&str>,
    ) -> Result<Self, GristError> {
        let mut builder = ureq::AgentBuilder::new();
        if let Some(proxy) = proxy {
            let proxy = ureq::Proxy::new(proxy).map_err(|e| GristError::Proxy(Box::new(e)))?;
            builder = builder.proxy(proxy);
        }

        Ok(Self {
            agent: builder.build(),
            base_url: format!("https://{domain}/api/docs/{doc_id}"),
            api_key: api_key.to_owned(),
        })
    }

    fn records_url(&self, table_id: &str) -> String {
        format!("{}/tables/{}/records", self.base_url, table_id)
    }

    fn bearer(&self) -> String {
        format!("Bearer {}", self.api_key)
    }
}

impl Destination for GristClient {
    fn fetch_records(&self, table_id: &str) -> Result<Vec<RemoteRecord>, GristError> {
        let url = self.records_url(table_id);
        tracing::debug!("GET {url}");
        let response = self
            .agent
            .get(&url)
            .set("Authorization", &self.bearer())
            .call()
            .map_err(api_err)?;
        let body: RecordsResponse = response.into_json()?;
        Ok(body.records)
    }

    fn put_records(&self, table_id: &str, updates: &[RecordUpdate]) -> Result<(), GristError> {
        let url = self.records_url(table_id);
        tracing::debug!("PUT {url} ({} records)", updates.len());
        self.agent
            .put(&url)
            .set("Authorization", &self.bearer())
            .send_json(json!({ "records": updates }))
            .map_err(api_err)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_url_targets_the_document_table() {
        let client =
            GristClient::new("grist.example.org", "doc123", "key", None).expect("client");
        assert_eq!(
            client.records_url("Fournisseurs_identite"),
            "https://grist.example.org/api/docs/doc123/tables/Fournisseurs_identite/records"
        );
    }

    #[test]
    fn proxy_configuration_is_accepted() {
        let client = GristClient::new(
            "grist.example.org",
            "doc123",
            "key",
            Some("http://proxy.local:3128"),
        );
        assert!(client.is_ok());
    }
}
