//! Quotation rendering entry point

use crate::assembler::Assembler;
use crate::config::RendererConfig;
use crate::model::{CompanyProfile, Quotation};
use crate::storage::OutputStore;
use crate::{QuoteError, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Renders quotations into `<uploadsDir>/quotation-<quoteNumber>.pdf`
///
/// The renderer holds no per-document state; concurrent calls for
/// different quote numbers are independent.
#[derive(Debug, Clone)]
pub struct QuotationRenderer {
    config: RendererConfig,
    store: OutputStore,
}

impl QuotationRenderer {
    /// Create a renderer, rejecting an invalid configuration
    pub fn new(config: RendererConfig) -> Result<Self> {
        config.validate()?;
        let store = OutputStore::new(config.uploads_dir.clone());
        Ok(Self { config, store })
    }

    pub fn config(&self) -> &RendererConfig {
        &self.config
    }

    /// Render `quotation` and persist it, resolving with the absolute path
    ///
    /// Validation happens before any I/O. Repeated calls for the same quote
    /// number overwrite the same file. A failure leaves no partial file.
    ///
    /// # Errors
    /// * `Validation` - unusable quote number, line item values or VAT rate
    /// * `Render` - logo cannot be read or decoded, or a drawing primitive fails
    /// * `Io` - directory creation or file write fails
    pub async fn generate_document(
        &self,
        quotation: &Quotation,
        profile: Option<&CompanyProfile>,
    ) -> Result<PathBuf> {
        info!(quote_number = %quotation.quote_number, "Rendering quotation");

        quotation.validate()?;
        let profile = self.config.resolve_profile(profile);
        if let Some(profile) = profile {
            profile.validate()?;
        }

        self.store.ensure_dir().await?;

        let logo = match profile.and_then(|p| p.logo.as_deref()) {
            Some(path) => Some(load_logo(path).await?),
            None => None,
        };

        let bytes = Assembler::new(&self.config).render(quotation, profile, logo.as_deref())?;
        let size = bytes.len();

        let path = self.store.persist(&quotation.quote_number, bytes).await?;

        info!(
            quote_number = %quotation.quote_number,
            path = %path.display(),
            size_kb = size / 1024,
            "Quotation persisted"
        );

        Ok(path)
    }
}

async fn load_logo(path: &Path) -> Result<Vec<u8>> {
    match tokio::fs::read(path).await {
        Ok(data) => {
            debug!(path = %path.display(), bytes = data.len(), "Loaded logo");
            Ok(data)
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Logo cannot be read");
            Err(QuoteError::Render(format!(
                "Failed to read logo {}: {e}",
                path.display()
            )))
        }
    }
}
