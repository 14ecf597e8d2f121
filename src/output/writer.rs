// src/output/writer.rs
//! Executes output operations. The only place that writes files.

use super::types::*;
use crate::error::AppError;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::time::Instant;

/// Runs every operation of the plan, recording failures instead of
/// stopping at the first one.
pub fn deliver(plan: OutputPlan) -> OutputReport {
    let mut report = OutputReport::new();
    let start_time = Instant::now();

    log::debug!(
        "Executing output plan with {} operations",
        plan.operations.len()
    );

    for operation in plan.operations {
        let op_start = Instant::now();
        match execute_operation(&operation) {
            Ok(bytes_written) => {
                report = report.with_completed(CompletedOperation {
                    operation,
                    bytes_written,
                    duration_ms: op_start.elapsed().as_millis() as u64,
                });
            }
            Err(e) => {
                log::error!("Operation failed: {}", e);
                report = report.with_failed(FailedOperation {
                    operation,
                    error: e.to_string(),
                });
            }
        }
    }

    report.stats.total_duration_ms = start_time.elapsed().as_millis() as u64;
    log::info!(
        "Output: {} succeeded, {} failed, {} bytes in {}ms",
        report.stats.operations_completed,
        report.stats.operations_failed,
        report.stats.bytes_written,
        report.stats.total_duration_ms
    );
    report
}

/// Like [`deliver`], but any failed operation becomes an error.
pub fn deliver_all(plan: OutputPlan) -> Result<OutputReport, AppError> {
    let report = deliver(plan);
    if report.is_success() {
        Ok(report)
    } else {
        let failures: Vec<&str> = report.failed.iter().map(|f| f.error.as_str()).collect();
        Err(AppError::DeliveryFailed(failures.join("; ")))
    }
}

fn execute_operation(operation: &DeliveryTarget) -> Result<usize, AppError> {
    match operation {
        DeliveryTarget::WriteFile { path, content } => write_file(path, content),
        DeliveryTarget::PrintToStdout { content } => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(content.len())
        }
    }
}

fn write_file(path: &Path, content: &str) -> Result<usize, AppError> {
    log::debug!("Writing {} bytes to {}", content.len(), path.display());

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;

    log::info!("Wrote file: {}", path.display());
    Ok(content.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_file_and_creates_parents() {
        let dir = std::env::temp_dir().join(format!("notion2html-{}", uuid::Uuid::new_v4()));
        let path = dir.join("posts").join("index.html");

        let report = deliver_all(OutputPlan::for_destination(
            Some(path.clone()),
            "<p>hi</p>".to_string(),
        ))
        .unwrap();

        assert_eq!(report.stats.bytes_written, 9);
        assert_eq!(fs::read_to_string(&path).unwrap(), "<p>hi</p>");
        fs::remove_dir_all(dir).unwrap();
    }

    #[test]
    fn failures_are_reported() {
        let dir = std::env::temp_dir().join(format!("notion2html-{}", uuid::Uuid::new_v4()));
        fs::create_dir_all(&dir).unwrap();

        // A directory cannot be overwritten by a file.
        let plan = OutputPlan::for_destination(Some(dir.clone()), "x".to_string());
        let report = deliver(plan);

        assert!(!report.is_success());
        assert_eq!(report.stats.operations_failed, 1);
        fs::remove_dir_all(dir).unwrap();
    }
}
