use super::{parse_catalog, CatalogSource};
use crate::error::{Result, VdError};
use crate::model::CatalogEntry;
use reqwest::Url;
use std::time::Duration;

const HTTP_TIMEOUT_SECS: u64 = 30;

/// The hosted catalog, fetched with a single GET. No retries.
pub struct HttpCatalog {
    url: Url,
}

impl HttpCatalog {
    pub fn new(url: &str) -> Result<Self> {
        let url = Url::parse(url)
            .map_err(|e| VdError::CatalogLoad(format!("Invalid catalog URL {}: {}", url, e)))?;
        Ok(Self { url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl CatalogSource for HttpCatalog {
    fn load(&self) -> Result<Vec<CatalogEntry>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .user_agent(concat!("vdplugins/", env!("CARGO_PKG_VERSION")))
            .build()?;

        let response = client
            .get(self.url.clone())
            .header("Accept", "application/json")
            .send()?;

        if !response.status().is_success() {
            return Err(VdError::CatalogLoad(format!(
                "{} returned {}",
                self.url,
                response.status()
            )));
        }

        let body = response.text()?;
        parse_catalog(&body, &self.url)
    }

    fn describe(&self) -> String {
        self.url.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_url() {
        assert!(matches!(
            HttpCatalog::new("not a url"),
            Err(VdError::CatalogLoad(_))
        ));
    }

    #[test]
    fn describe_is_the_url() {
        let catalog = HttpCatalog::new("https://example.com/plugins.json").unwrap();
        assert_eq!(catalog.describe(), "https://example.com/plugins.json");
    }
}
