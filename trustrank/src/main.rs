//! Score and rank the trustworthiness of open-source packages.
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

use std::io::{Write, stderr, stdout};
use std::process::ExitCode;
use trustrank_lib::{Host, run};

/// Host bound to the real process streams.
#[derive(Debug, Clone, Default)]
pub struct ProcessHost;

#[cfg_attr(coverage_nightly, coverage(off))]
impl Host for ProcessHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
#[cfg_attr(coverage_nightly, coverage(off))]
async fn main() -> ExitCode {
    let mut host = ProcessHost;
    match run(&mut host, std::env::args()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let _ = writeln!(host.error(), "error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
