//! New-link creation form.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{LinkRecord, NewLink, split_labels};
use crate::ports::{Notifier, StoreError, Toast};
use crate::services::LinkMutations;

/// Models offered as suggestions. Any other text is accepted as well.
pub const KNOWN_MODELS: &[&str] = &[
    "GPT-4o",
    "GPT-4",
    "GPT-3.5",
    "o1",
    "Claude",
    "Gemini",
    "Llama",
    "Mistral",
    "DeepSeek",
    "Perplexity",
];

const CREATE_FALLBACK: &str = "Error creating link";

/// Form validation and submission errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("Name is required")]
    MissingName,

    #[error("URL is required")]
    MissingUrl,

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Raw form fields as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewLinkForm {
    pub url: String,
    pub name: String,
    pub model: String,
    pub description: String,
    /// Comma-separated.
    pub categories: String,
    /// Comma-separated.
    pub tags: String,
    pub is_popular: bool,
}

impl NewLinkForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Known models whose name contains the typed model text.
    pub fn model_suggestions(&self) -> Vec<&'static str> {
        let typed = self.model.trim().to_lowercase();
        KNOWN_MODELS
            .iter()
            .copied()
            .filter(|model| typed.is_empty() || model.to_lowercase().contains(&typed))
            .collect()
    }

    /// Check required fields and build the insert payload.
    pub fn validate(&self) -> Result<NewLink, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingName);
        }
        let url = self.url.trim();
        if url.is_empty() {
            return Err(FormError::MissingUrl);
        }

        let mut link = NewLink::new(name, url)
            .with_category(split_labels(&self.categories))
            .with_tags(split_labels(&self.tags))
            .popular(self.is_popular);
        if !self.model.trim().is_empty() {
            link = link.with_model(self.model.trim());
        }
        if !self.description.trim().is_empty() {
            link = link.with_description(self.description.trim());
        }
        Ok(link)
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate and create the link. The form is cleared only on success.
    pub async fn submit(
        &mut self,
        mutations: &LinkMutations,
        notifier: &dyn Notifier,
    ) -> Result<LinkRecord, FormError> {
        let link = self.validate()?;
        match mutations.create(&link).await {
            Ok(record) => {
                notifier.notify(Toast::info(
                    "Link added",
                    format!("{} was added to the catalog.", record.name),
                ));
                self.reset();
                Ok(record)
            }
            Err(e) => {
                notifier.notify(Toast::failure("Create failed", e.message_or(CREATE_FALLBACK)));
                Err(e.into())
            }
        }
    }
}
