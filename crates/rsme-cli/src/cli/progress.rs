//! Progress lines on stdout, mirrored to the log.

use rsme_core::pipeline::{Progress, Step};

pub struct ConsoleProgress;

impl Progress for ConsoleProgress {
    fn step(&self, step: &Step) {
        tracing::info!("{}", step);
        println!("{}", step);
    }
}
