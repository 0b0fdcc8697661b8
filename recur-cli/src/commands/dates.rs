use anyhow::Result;
use recur_core::{RecurrenceConfig, generate};

use super::print_warnings;
use crate::recur_config::RecurConfig;
use crate::render::render_date_list;

static ISO_DATE: &str = "%Y-%m-%d";

pub fn run(
    config: RecurrenceConfig,
    settings: &RecurConfig,
    json: bool,
    pretty: bool,
) -> Result<()> {
    print_warnings(&config);
    let dates = generate(&config);

    if json {
        println!("{}", serde_json::to_string(&dates)?);
        return Ok(());
    }

    let format = if pretty { settings.date_format.as_str() } else { ISO_DATE };
    if !dates.is_empty() {
        println!("{}", render_date_list(&dates, format));
    }

    Ok(())
}
