//! update command - Fetch the rate and write it into the units file

use anyhow::{Context as _, Result};

use crate::core::config::Settings;
use crate::engine::{run_update, Context, UpdateOutcome, UpdateRequest};
use crate::rates::{HttpRateSource, RateSelection, RateSource};
use crate::ui::output;

/// Run the update against the configured HTTP endpoint.
///
/// This is a synchronous wrapper that uses tokio to run the async engine.
pub fn update(ctx: &Context, settings: &Settings, selection: &RateSelection) -> Result<()> {
    let source =
        HttpRateSource::new(settings.timeout).context("failed to set up the HTTP client")?;
    update_with_source(ctx, settings, selection, &source).map(|_| ())
}

/// Run the update against any rate source.
pub fn update_with_source(
    ctx: &Context,
    settings: &Settings,
    selection: &RateSelection,
    source: &dyn RateSource,
) -> Result<UpdateOutcome> {
    let request = UpdateRequest {
        units_file: settings.units_file.clone(),
        url: selection.resolve(&settings.endpoints).to_string(),
    };
    output::debug(
        format!("units file: {}", request.units_file.display()),
        ctx.verbosity,
    );
    output::debug(
        format!("timeout: {}s", settings.timeout.as_secs()),
        ctx.verbosity,
    );

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to start the async runtime")?;
    let outcome = rt.block_on(run_update(ctx, &request, source))?;

    if ctx.dry_run {
        print!("{}", outcome.document);
    } else {
        let previous = if outcome.previous.is_empty() {
            "none"
        } else {
            outcome.previous.as_str()
        };
        output::info(
            format!(
                "Updated Bitcoin rate in {}: {} -> {} EUR",
                request.units_file.display(),
                previous,
                outcome.rate
            ),
            ctx.verbosity,
        );
    }

    Ok(outcome)
}
