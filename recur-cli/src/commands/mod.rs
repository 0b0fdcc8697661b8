pub mod calendar;
pub mod config;
pub mod dates;
pub mod summary;

use recur_core::RecurrenceConfig;
use recur_core::warnings::warnings;

use crate::render::Render;

/// Print config warnings to stderr. They never fail the command.
fn print_warnings(config: &RecurrenceConfig) {
    for warning in warnings(config) {
        eprintln!("{}", warning.render());
    }
}
