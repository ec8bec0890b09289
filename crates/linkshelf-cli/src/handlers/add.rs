//! Add command handler.
//!
//! Fills the creation form from flags and submits it.

use anyhow::Result;
use linkshelf_core::{LinkRecord, NewLinkForm};

use crate::bootstrap::CliContext;
use crate::commands::AddArgs;
use crate::error::CliError;

/// The creation form as the flags fill it.
pub fn form_for(args: &AddArgs) -> NewLinkForm {
    NewLinkForm {
        url: args.url.clone(),
        name: args.name.clone(),
        model: args.model.clone(),
        description: args.description.clone(),
        categories: args.categories.clone(),
        tags: args.tags.clone(),
        is_popular: args.popular,
    }
}

/// Known model names close to what was typed, when it is not one of them.
fn model_hint(form: &NewLinkForm) -> Option<String> {
    let typed = form.model.trim();
    if typed.is_empty() {
        return None;
    }
    let suggestions = form.model_suggestions();
    if suggestions.is_empty() || suggestions.iter().any(|known| *known == typed) {
        return None;
    }
    Some(format!("Known models matching '{typed}': {}", suggestions.join(", ")))
}

/// Execute the add command.
pub async fn execute(ctx: &CliContext, args: &AddArgs) -> Result<LinkRecord> {
    let mut form = form_for(args);
    if let Some(hint) = model_hint(&form) {
        eprintln!("{hint}");
    }

    let record = form
        .submit(&ctx.mutations, ctx.notifier.as_ref())
        .await
        .map_err(CliError::from)?;
    println!("Added {} ({})", record.name, record.id);
    Ok(record)
}
