mod args;
mod config;
mod entry;
mod error;
mod logger;
mod probe;
mod report;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
