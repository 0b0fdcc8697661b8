use anyhow::Result;
use recur_core::summary::Summary;
use recur_core::{RecurrenceConfig, generate};

use super::print_warnings;
use crate::recur_config::RecurConfig;
use crate::render::render_summary;

pub fn run(
    config: RecurrenceConfig,
    settings: &RecurConfig,
    count: Option<usize>,
    json: bool,
) -> Result<()> {
    print_warnings(&config);
    let dates = generate(&config);
    let summary = Summary::new(&config, &dates, count.unwrap_or(settings.preview_count));

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", render_summary(&summary, &settings.date_format));
    }

    Ok(())
}
