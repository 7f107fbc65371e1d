//! Compare real photos against campus captures.
//!
//! Usage: campus-compare [captures-dir]   (default: `captures`)

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let captures_dir = args.next().map_or_else(|| PathBuf::from("captures"), PathBuf::from);
    if args.next().is_some() {
        eprintln!("usage: campus-compare [captures-dir]");
        return ExitCode::from(2);
    }

    match compare::run(&captures_dir) {
        Ok((report, path)) => {
            println!(
                "{} comparisons, average difference {:.2}",
                report.summary.total_comparisons, report.summary.average_score
            );
            for rec in &report.summary.recommendations {
                println!("  - {rec}");
            }
            println!("Report written to {}", path.display());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("campus-compare: {err}");
            ExitCode::FAILURE
        }
    }
}
